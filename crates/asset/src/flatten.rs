//! Resolve a face-indexed [`Mesh`] into a non-indexed triangle list.

use crate::{
    error::{AttributeArray, FlattenError},
    mesh::{FlatVertex, Mesh, resolve_index},
};

/// How the texture coordinate of a face-vertex is looked up.
///
/// `PositionKeyed` keeps the historical loader behaviour: the uv index
/// slot is chosen by the *value* of the position index, not by the
/// face-vertex slot. The two agree only where `uv_indices[pos - 1]`
/// happens to equal the slot's own uv index.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum UvLookup {
    /// `uvs[uv_indices[position_indices[k] - 1] - 1]`
    #[default]
    PositionKeyed,
    /// `uvs[uv_indices[k] - 1]`
    SlotKeyed,
}

/// Flatten with the default [`UvLookup::PositionKeyed`] rule.
pub fn flatten(mesh: &Mesh) -> Result<Vec<FlatVertex>, FlattenError> {
    flatten_with(mesh, UvLookup::default())
}

/// One [`FlatVertex`] per face-vertex, in index order. Normals are not
/// carried. Any out-of-range index aborts the whole call.
pub fn flatten_with(mesh: &Mesh, lookup: UvLookup) -> Result<Vec<FlatVertex>, FlattenError> {
    let positions = mesh.positions();
    let uvs = mesh.uvs();
    let uv_indices = mesh.uv_indices();

    // Every uv index must be valid, including slots the position-keyed
    // lookup never reaches.
    for &ti in uv_indices {
        resolve_index(ti, AttributeArray::Uvs, uvs.len())?;
    }

    let out = mesh
        .position_indices()
        .iter()
        .enumerate()
        .map(|(k, &pi)| -> Result<FlatVertex, FlattenError> {
            let p = resolve_index(pi, AttributeArray::Positions, positions.len())?;
            let uv_slot = match lookup {
                UvLookup::PositionKeyed => {
                    resolve_index(pi, AttributeArray::UvIndices, uv_indices.len())?
                }
                UvLookup::SlotKeyed => k,
            };
            let t = resolve_index(uv_indices[uv_slot], AttributeArray::Uvs, uvs.len())?;
            Ok(FlatVertex::new(positions[p], uvs[t]))
        })
        .collect::<Result<Vec<_>, _>>()?;

    log::debug!(
        "Flattened {} faces into {} vertices ({:?})",
        mesh.face_count(),
        out.len(),
        lookup
    );
    Ok(out)
}

/// View a flat buffer as its interleaved `x y z u v` float stream.
pub fn vertex_floats(vertices: &[FlatVertex]) -> &[f32] {
    bytemuck::cast_slice(vertices)
}

/// Axis-aligned bounds of a vertex stream.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounds {
    pub min: [f32; 3],
    pub max: [f32; 3],
}

impl Bounds {
    /// `None` for an empty stream.
    pub fn from_vertices(vertices: &[FlatVertex]) -> Option<Self> {
        let first = vertices.first()?.position;
        Some(vertices.iter().fold(
            Bounds {
                min: first,
                max: first,
            },
            |mut b, v| {
                for axis in 0..3 {
                    b.min[axis] = b.min[axis].min(v.position[axis]);
                    b.max[axis] = b.max[axis].max(v.position[axis]);
                }
                b
            },
        ))
    }

    pub fn center(&self) -> [f32; 3] {
        [
            0.5 * (self.min[0] + self.max[0]),
            0.5 * (self.min[1] + self.max[1]),
            0.5 * (self.min[2] + self.max[2]),
        ]
    }

    /// Radius of the sphere through the box corners.
    pub fn radius(&self) -> f32 {
        let d = [
            self.max[0] - self.min[0],
            self.max[1] - self.min[1],
            self.max[2] - self.min[2],
        ];
        0.5 * (d[0] * d[0] + d[1] * d[1] + d[2] * d[2]).sqrt()
    }
}
