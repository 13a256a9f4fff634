// Math utilities and helper functions

use glam::{Quat, Vec3};

/// Drop the vertical component of a vector
pub fn flatten(v: Vec3) -> Vec3 {
    Vec3::new(v.x, 0.0, v.z)
}

/// Rotation for a yaw angle given in degrees (rotation around +Y)
pub fn yaw_rotation(yaw_degrees: f32) -> Quat {
    Quat::from_rotation_y(yaw_degrees.to_radians())
}

/// Forward vector (+Z rotated by yaw)
pub fn forward(yaw_degrees: f32) -> Vec3 {
    yaw_rotation(yaw_degrees) * Vec3::Z
}

/// Quadratic Bézier interpolation between `start` and `end` through `control`
///
/// Evaluated as two nested lerps, so `t = 0` yields `start` and `t = 1`
/// yields `end` exactly.
pub fn quadratic_bezier(start: Vec3, control: Vec3, end: Vec3, t: f32) -> Vec3 {
    let a = start.lerp(control, t);
    let b = control.lerp(end, t);
    a.lerp(b, t)
}

/// Control point of a throw arc: the midpoint of `start` and `end`, raised by `height`
pub fn arc_control_point(start: Vec3, end: Vec3, height: f32) -> Vec3 {
    (start + end) * 0.5 + Vec3::Y * height
}

/// Point on a throw arc from `start` to `end` at fraction `t`
pub fn arc_point(start: Vec3, end: Vec3, height: f32, t: f32) -> Vec3 {
    quadratic_bezier(start, arc_control_point(start, end, height), end, t)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_flatten() {
        assert_eq!(flatten(Vec3::new(1.0, 5.0, -2.0)), Vec3::new(1.0, 0.0, -2.0));
    }

    #[test]
    fn test_forward_rotates_with_yaw() {
        let f = forward(0.0);
        assert_abs_diff_eq!(f.z, 1.0, epsilon = 1e-6);

        let f = forward(90.0);
        assert_abs_diff_eq!(f.x, 1.0, epsilon = 1e-6);
        assert_abs_diff_eq!(f.z, 0.0, epsilon = 1e-6);
    }

    #[test]
    fn test_bezier_endpoints() {
        let start = Vec3::new(0.0, 1.0, 0.0);
        let control = Vec3::new(5.0, 4.0, 5.0);
        let end = Vec3::new(10.0, 1.0, 10.0);

        assert_eq!(quadratic_bezier(start, control, end, 0.0), start);
        assert_eq!(quadratic_bezier(start, control, end, 1.0), end);
    }

    #[test]
    fn test_arc_peaks_above_midpoint() {
        let start = Vec3::ZERO;
        let end = Vec3::new(10.0, 0.0, 0.0);
        let mid = arc_point(start, end, 2.0, 0.5);

        assert_abs_diff_eq!(mid.x, 5.0, epsilon = 1e-5);
        // Halfway along a quadratic curve reaches half the control offset
        assert_abs_diff_eq!(mid.y, 1.0, epsilon = 1e-5);
    }
}
