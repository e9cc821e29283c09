//! CPU-side mesh representation used by loaders.

use bytemuck::{Pod, Zeroable};

use crate::error::{AttributeArray, FlattenError};

/// One `pos/uv/normal` triple of a face, 1-based as authored.
/// Signed so that `0` and negative values reach bounds checking intact.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FaceVertex {
    pub position: i64,
    pub uv: i64,
    pub normal: i64,
}

impl FaceVertex {
    pub fn new(position: i64, uv: i64, normal: i64) -> Self {
        Self {
            position,
            uv,
            normal,
        }
    }
}

/// Face-indexed triangle mesh: three attribute arrays plus three parallel
/// index arrays, one entry per face-vertex.
///
/// Indices are only appended a whole triangle at a time, so the index
/// arrays always share a length that is a multiple of 3.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Mesh {
    positions: Vec<[f32; 3]>,
    normals: Vec<[f32; 3]>,
    uvs: Vec<[f32; 2]>,
    position_indices: Vec<i64>,
    uv_indices: Vec<i64>,
    normal_indices: Vec<i64>,
}

impl Mesh {
    /// Mesh with the given attributes and no faces yet.
    pub fn new(positions: Vec<[f32; 3]>, uvs: Vec<[f32; 2]>, normals: Vec<[f32; 3]>) -> Self {
        Self {
            positions,
            normals,
            uvs,
            ..Self::default()
        }
    }

    pub(crate) fn push_position(&mut self, p: [f32; 3]) {
        self.positions.push(p);
    }

    pub(crate) fn push_normal(&mut self, n: [f32; 3]) {
        self.normals.push(n);
    }

    pub(crate) fn push_uv(&mut self, uv: [f32; 2]) {
        self.uvs.push(uv);
    }

    /// Append one triangle. Indices are not checked here.
    pub fn push_face(&mut self, face: [FaceVertex; 3]) {
        for fv in face {
            self.position_indices.push(fv.position);
            self.uv_indices.push(fv.uv);
            self.normal_indices.push(fv.normal);
        }
    }

    pub fn positions(&self) -> &[[f32; 3]] {
        &self.positions
    }

    pub fn normals(&self) -> &[[f32; 3]] {
        &self.normals
    }

    pub fn uvs(&self) -> &[[f32; 2]] {
        &self.uvs
    }

    pub fn position_indices(&self) -> &[i64] {
        &self.position_indices
    }

    pub fn uv_indices(&self) -> &[i64] {
        &self.uv_indices
    }

    pub fn normal_indices(&self) -> &[i64] {
        &self.normal_indices
    }

    #[inline]
    pub fn face_count(&self) -> usize {
        self.position_indices.len() / 3
    }

    /// Faces in file order.
    pub fn faces(&self) -> impl Iterator<Item = [FaceVertex; 3]> + '_ {
        (0..self.face_count()).map(move |f| {
            let at = |k: usize| {
                FaceVertex::new(
                    self.position_indices[k],
                    self.uv_indices[k],
                    self.normal_indices[k],
                )
            };
            [at(3 * f), at(3 * f + 1), at(3 * f + 2)]
        })
    }

    /// Check every index of all three index arrays against its attribute
    /// array. Unlike [`flatten`](crate::flatten::flatten) this also covers
    /// normals, which the flat vertex layout does not carry.
    pub fn validate(&self) -> Result<(), FlattenError> {
        let checks: [(&[i64], AttributeArray, usize); 3] = [
            (self.position_indices.as_slice(), AttributeArray::Positions, self.positions.len()),
            (self.uv_indices.as_slice(), AttributeArray::Uvs, self.uvs.len()),
            (self.normal_indices.as_slice(), AttributeArray::Normals, self.normals.len()),
        ];
        for (indices, array, len) in checks {
            for &index in indices {
                resolve_index(index, array, len)?;
            }
        }
        Ok(())
    }
}

/// Map a 1-based index onto a 0-based slot of an array of `len` elements.
pub(crate) fn resolve_index(
    index: i64,
    array: AttributeArray,
    len: usize,
) -> Result<usize, FlattenError> {
    usize::try_from(index)
        .ok()
        .filter(|&i| i >= 1 && i <= len)
        .map(|i| i - 1)
        .ok_or(FlattenError::IndexOutOfRange { array, index, len })
}

/// Interleaved vertex of the flat buffer: position + texture coordinate.
/// Layout is `x y z u v`, 20 bytes, no padding.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct FlatVertex {
    pub position: [f32; 3],
    pub uv: [f32; 2],
}

impl FlatVertex {
    /// Floats per vertex in the interleaved stream.
    pub const STRIDE_FLOATS: usize = 5;

    pub fn new(position: [f32; 3], uv: [f32; 2]) -> Self {
        Self { position, uv }
    }
}
