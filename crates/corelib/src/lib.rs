//! Core types: math re-exports, Transform, Camera.

pub use glam::{EulerRot, Mat4, Quat, Vec3, vec3};

pub mod camera;
pub mod transform;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_transform_is_identity_matrix() {
        let t = transform::Transform::identity();
        assert_eq!(t.matrix(), Mat4::IDENTITY);
    }

    #[test]
    fn recentered_moves_center_to_origin() {
        let t = transform::Transform::recentered(vec3(1.0, 2.0, 3.0));
        let p = t.matrix().transform_point3(vec3(1.0, 2.0, 3.0));
        assert!(p.abs_diff_eq(Vec3::ZERO, 1e-6));
    }

    #[test]
    fn spin_keeps_translation_applied_first() {
        // Rotation happens about the origin after the recentring offset.
        let t = transform::Transform::recentered(vec3(1.0, 0.0, 0.0))
            .with_rotation(vec3(0.0, std::f32::consts::FRAC_PI_2, 0.0));
        let p = t.matrix().transform_point3(vec3(2.0, 0.0, 0.0));
        assert!(p.abs_diff_eq(vec3(0.0, 0.0, -1.0), 1e-5));
    }

    #[test]
    fn framing_camera_sees_the_sphere() {
        let cam = camera::Camera::framing(Vec3::ZERO, 2.0, 60f32.to_radians(), 16.0 / 9.0);
        let pv = cam.proj_view();
        let a = pv.to_cols_array();
        assert!(a.iter().all(|f| f.is_finite()));

        // The sphere center lands in the middle of clip space, inside the depth range.
        let clip = pv.project_point3(Vec3::ZERO);
        assert!(clip.x.abs() < 1e-5 && clip.y.abs() < 1e-5);
        assert!(clip.z > 0.0 && clip.z < 1.0);
    }

    #[test]
    fn framing_degenerate_radius_is_finite() {
        let cam = camera::Camera::framing(vec3(5.0, 0.0, 0.0), 0.0, 60f32.to_radians(), 1.0);
        assert!(cam.proj_view().to_cols_array().iter().all(|f| f.is_finite()));
        assert!(cam.z_near > 0.0 && cam.z_far > cam.z_near);
    }
}
