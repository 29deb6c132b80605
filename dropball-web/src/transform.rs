use glam::{EulerRot, Mat4, Quat, Vec3};

use crate::scene::{Scene, TransformState};

/// Compute world matrices for all meshes in the scene.
/// Meshes have no parents, so the world matrix is the local transform.
pub fn compute_world_matrices(scene: &mut Scene) {
    for mesh in scene.meshes_mut() {
        mesh.world_matrix = compose_local_transform(&mesh.transform);
    }
}

/// Compose a local transform matrix from position, rotation, and scale.
/// A rotation quaternion, when set, takes precedence over the Euler angles.
pub fn compose_local_transform(transform: &TransformState) -> Mat4 {
    let rotation = transform
        .rotation_quaternion
        .unwrap_or_else(|| euler_to_quaternion(transform.rotation));
    Mat4::from_scale_rotation_translation(transform.scale, rotation, transform.position)
}

/// Euler angles (x = pitch, y = yaw, z = roll) to a quaternion, applied
/// yaw, then pitch, then roll.
pub fn euler_to_quaternion(rotation: Vec3) -> Quat {
    Quat::from_euler(EulerRot::YXZ, rotation.y, rotation.x, rotation.z)
}

/// Inverse of [`euler_to_quaternion`].
pub fn quaternion_to_euler(rotation: Quat) -> Vec3 {
    let (yaw, pitch, roll) = rotation.to_euler(EulerRot::YXZ);
    Vec3::new(pitch, yaw, roll)
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 1e-5;

    fn approx_eq(a: f32, b: f32) -> bool {
        (a - b).abs() < EPSILON
    }

    fn transform() -> TransformState {
        TransformState::default()
    }

    #[test]
    fn test_identity_transform() {
        assert_eq!(compose_local_transform(&transform()), Mat4::IDENTITY);
    }

    #[test]
    fn test_quaternion_overrides_euler() {
        let mut t = transform();
        t.rotation = Vec3::new(0.0, 1.0, 0.0);
        t.rotation_quaternion = Some(Quat::IDENTITY);
        t.position = Vec3::new(1.0, 2.0, 3.0);
        let m = compose_local_transform(&t);
        assert_eq!(m, Mat4::from_translation(Vec3::new(1.0, 2.0, 3.0)));
    }

    #[test]
    fn test_roll_only_matches_z_rotation() {
        let q = euler_to_quaternion(Vec3::new(0.0, 0.0, 0.1));
        assert!(q.abs_diff_eq(Quat::from_rotation_z(0.1), EPSILON));
    }

    #[test]
    fn test_euler_round_trip() {
        let angles = Vec3::new(0.3, -0.7, 0.2);
        let back = quaternion_to_euler(euler_to_quaternion(angles));
        assert!(approx_eq(back.x, angles.x));
        assert!(approx_eq(back.y, angles.y));
        assert!(approx_eq(back.z, angles.z));
    }
}
