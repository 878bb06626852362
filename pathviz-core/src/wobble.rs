/// Planar wobble: particles slide along the path while swinging sideways
use nalgebra::{Point3, Vector3};

use crate::mapper::wrap_unit;
use crate::path::Path;

const BASE_SPEED: f64 = 0.2;
const SPEED_GAIN: f64 = 0.05;
const SWING: f64 = 1.2;

/// Position of the `index`-th wobbling particle after `elapsed` seconds.
///
/// The sideways offset lies in the xy plane, perpendicular to the path's
/// projection, and scales with the square of the swing.
pub fn wobble_position(path: &Path, elapsed: f64, index: usize) -> Point3<f32> {
    let step = (index + 1) as f64;
    let speed = BASE_SPEED + elapsed * SPEED_GAIN;
    let t = wrap_unit((step * speed).rem_euclid(1.0) as f32);
    let radius = ((step * 2.0 + elapsed).sin() * SWING) as f32;

    let direction = path.basis().direction();
    let planar = Vector3::new(-direction.y, direction.x, 0.0);
    let perpendicular = planar
        .try_normalize(f32::EPSILON)
        .unwrap_or_else(|| path.basis().basis1());

    path.lerp(t) + perpendicular * radius * radius
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_offset_is_perpendicular_in_plane() {
        let path = Path::new(Point3::new(-4.0, -3.0, 0.0), Point3::new(4.0, 3.0, 0.0)).unwrap();
        let elapsed = 0.0;
        let point = wobble_position(&path, elapsed, 0);

        // step 1: t = 0.2, radius = 1.2 sin(2)
        let on_line = path.lerp(0.2);
        let radius = 2.0f32.sin() * 1.2;
        let offset = point - on_line;
        assert_abs_diff_eq!(offset.norm(), radius * radius, epsilon = 1e-5);
        assert_abs_diff_eq!(offset.dot(&path.basis().direction()), 0.0, epsilon = 1e-5);
        assert_abs_diff_eq!(offset.z, 0.0, epsilon = 1e-6);
    }

    #[test]
    fn test_position_follows_time_and_index() {
        let path = Path::new(Point3::new(-4.0, -3.0, 0.0), Point3::new(4.0, 3.0, 0.0)).unwrap();
        let normal = Vector3::new(-0.6, 0.8, 0.0);

        // step 3 at 2s: speed 0.3, t = 0.9, radius = 1.2 sin(8)
        let radius = 1.2 * 8.0f32.sin();
        let expected = path.lerp(0.9) + normal * radius * radius;
        let point = wobble_position(&path, 2.0, 2);
        assert_abs_diff_eq!(point, expected, epsilon = 1e-4);
        assert!((point - path.lerp(0.9)).dot(&normal) > 0.0);

        // step 2 at 10s: speed 0.7, 1.4 wraps to t = 0.4, radius = 1.2 sin(14)
        let radius = 1.2 * 14.0f32.sin();
        let expected = path.lerp(0.4) + normal * radius * radius;
        assert_abs_diff_eq!(wobble_position(&path, 10.0, 1), expected, epsilon = 1e-4);
    }

    #[test]
    fn test_vertical_path_uses_basis_fallback() {
        let path = Path::new(Point3::origin(), Point3::new(0.0, 0.0, 4.0)).unwrap();
        let point = wobble_position(&path, 1.5, 2);
        assert!(point.iter().all(|c| c.is_finite()));
    }
}
