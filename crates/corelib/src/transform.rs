use crate::{EulerRot, Mat4, Quat, Vec3};

/// Model transform: offset applied first, then Euler XYZ rotation about
/// the origin, then uniform scale.
#[derive(Clone, Copy, Debug)]
pub struct Transform {
    pub offset: Vec3,
    /// Euler angles in radians (XYZ order).
    pub rotation_euler: Vec3,
    pub scale: f32,
}

impl Transform {
    #[inline]
    pub const fn identity() -> Self {
        Self {
            offset: Vec3::ZERO,
            rotation_euler: Vec3::ZERO,
            scale: 1.0,
        }
    }

    /// Transform that moves `center` to the origin so the model spins in place.
    #[inline]
    pub fn recentered(center: Vec3) -> Self {
        Self {
            offset: -center,
            ..Self::identity()
        }
    }

    #[inline]
    pub fn with_rotation(mut self, rotation_euler: Vec3) -> Self {
        self.rotation_euler = rotation_euler;
        self
    }

    /// matrix = S * R * T(offset) (column-major Mat4 per glam).
    #[inline]
    pub fn matrix(&self) -> Mat4 {
        let q = Quat::from_euler(
            EulerRot::XYZ,
            self.rotation_euler.x,
            self.rotation_euler.y,
            self.rotation_euler.z,
        );
        Mat4::from_scale(Vec3::splat(self.scale))
            * Mat4::from_quat(q)
            * Mat4::from_translation(self.offset)
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::identity()
    }
}
