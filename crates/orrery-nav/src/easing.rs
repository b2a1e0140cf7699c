//! The warp easing curve and the look-at rotation shared by the automated modes.

use glam::{DMat3, DQuat, DVec3};

/// Quintic ease-in-out of a linear progress value, clamped to `[0, 1]`.
pub fn ease_in_out_quintic(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0);
    if t < 0.5 {
        16.0 * t.powi(5)
    } else {
        1.0 - (-2.0 * t + 2.0).powi(5) / 2.0
    }
}

/// Rotation that points the camera's −Z at `target` from `eye`, keeping +Y
/// as close to world up as possible. `None` when the two points coincide.
pub fn look_at(eye: DVec3, target: DVec3) -> Option<DQuat> {
    let forward = (target - eye).normalize_or_zero();
    if forward == DVec3::ZERO {
        return None;
    }
    let mut right = forward.cross(DVec3::Y);
    if right.length_squared() < 1e-12 {
        // Looking straight up or down.
        right = forward.cross(DVec3::Z);
    }
    let right = right.normalize();
    let up = right.cross(forward);
    Some(DQuat::from_mat3(&DMat3::from_cols(right, up, -forward)).normalize())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quintic_endpoints() {
        assert_eq!(ease_in_out_quintic(0.0), 0.0);
        assert!((ease_in_out_quintic(1.0) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_quintic_is_symmetric_and_monotone() {
        assert!((ease_in_out_quintic(0.5) - 0.5).abs() < 1e-12);
        for i in 0..100 {
            let t = i as f64 / 100.0;
            assert!((ease_in_out_quintic(t) + ease_in_out_quintic(1.0 - t) - 1.0).abs() < 1e-12);
            assert!(ease_in_out_quintic(t + 0.01) >= ease_in_out_quintic(t));
        }
        // Gentle at the ends.
        assert!(ease_in_out_quintic(0.1) < 0.001);
    }

    #[test]
    fn test_quintic_clamps_input() {
        assert_eq!(ease_in_out_quintic(-3.0), 0.0);
        assert_eq!(ease_in_out_quintic(7.0), 1.0);
    }

    #[test]
    fn test_look_at_points_negative_z_at_target() {
        let eye = DVec3::new(10.0, 5.0, -3.0);
        let target = DVec3::new(-4.0, 2.0, 8.0);
        let rotation = look_at(eye, target).unwrap();
        let forward = rotation * DVec3::NEG_Z;
        assert!((forward - (target - eye).normalize()).length() < 1e-9);
        assert!((rotation * DVec3::Y).y > 0.0);
    }

    #[test]
    fn test_look_at_straight_down_is_valid() {
        let rotation = look_at(DVec3::new(0.0, 100.0, 0.0), DVec3::ZERO).unwrap();
        assert!((rotation * DVec3::NEG_Z - DVec3::NEG_Y).length() < 1e-9);
        assert!(rotation.is_normalized());
    }

    #[test]
    fn test_look_at_coincident_points() {
        assert!(look_at(DVec3::ONE, DVec3::ONE).is_none());
    }
}
