/// Orthonormal frames aligned to a path direction
use nalgebra::{Matrix3, Point3, Vector3};
use tracing::debug;

use crate::error::PathError;

/// Endpoints closer than this are treated as the same point
pub const PATH_EPSILON: f32 = 1e-6;

/// Below this norm the projected reference axis is considered parallel to the path
pub const REFERENCE_EPSILON: f32 = 1e-4;

/// A change-of-basis matrix with columns `(basis1, basis2, direction)`.
///
/// `direction` is the unit vector along the path; `basis1` and `basis2` span
/// the plane perpendicular to it. Applying the basis to a local point
/// `(x, y, h)` rotates the local z axis onto the path.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Basis {
    matrix: Matrix3<f32>,
}

impl Basis {
    pub fn basis1(&self) -> Vector3<f32> {
        self.matrix.column(0).into_owned()
    }

    pub fn basis2(&self) -> Vector3<f32> {
        self.matrix.column(1).into_owned()
    }

    pub fn direction(&self) -> Vector3<f32> {
        self.matrix.column(2).into_owned()
    }

    pub fn matrix(&self) -> &Matrix3<f32> {
        &self.matrix
    }

    /// Rotate a local-frame vector into world orientation
    pub fn apply(&self, local: &Vector3<f32>) -> Vector3<f32> {
        self.matrix * local
    }
}

/// Build the basis for the segment `start -> end`.
///
/// `basis1` is the Gram-Schmidt rejection of the x axis from the path
/// direction. When the path runs along x that rejection vanishes, so the y
/// axis is used as the reference instead.
pub fn compute_basis(start: &Point3<f32>, end: &Point3<f32>) -> Result<Basis, PathError> {
    let delta = end - start;
    if !delta.iter().all(|c| c.is_finite()) {
        return Err(PathError::NonFinite);
    }
    if delta.norm() < PATH_EPSILON {
        return Err(PathError::Degenerate {
            x: start.x,
            y: start.y,
            z: start.z,
        });
    }

    let direction = delta.normalize();

    let mut rejection = reject(&Vector3::x(), &direction);
    if rejection.norm() < REFERENCE_EPSILON {
        debug!(?direction, "path parallel to x axis, using y as basis reference");
        rejection = reject(&Vector3::y(), &direction);
    }

    let basis1 = rejection.normalize();
    let basis2 = direction.cross(&basis1).normalize();

    Ok(Basis {
        matrix: Matrix3::from_columns(&[basis1, basis2, direction]),
    })
}

/// Component of `reference` perpendicular to the unit vector `direction`
fn reject(reference: &Vector3<f32>, direction: &Vector3<f32>) -> Vector3<f32> {
    reference - direction * direction.dot(reference)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn assert_orthonormal(basis: &Basis) {
        let columns = [basis.basis1(), basis.basis2(), basis.direction()];
        for column in &columns {
            assert_abs_diff_eq!(column.norm(), 1.0, epsilon = 1e-5);
        }
        assert_abs_diff_eq!(columns[0].dot(&columns[1]), 0.0, epsilon = 1e-5);
        assert_abs_diff_eq!(columns[0].dot(&columns[2]), 0.0, epsilon = 1e-5);
        assert_abs_diff_eq!(columns[1].dot(&columns[2]), 0.0, epsilon = 1e-5);
    }

    #[test]
    fn test_basis_is_orthonormal() {
        let cases = [
            (Point3::new(-7.0, 4.0, -8.0), Point3::new(1.0, -0.5, 4.0)),
            (Point3::new(-7.0, 4.0, -12.0), Point3::new(2.0, -0.5, 0.0)),
            (Point3::new(0.0, 0.0, 0.0), Point3::new(0.0, 0.0, 3.0)),
            (Point3::new(1.0, 2.0, 3.0), Point3::new(-4.0, 0.5, 9.0)),
        ];
        for (start, end) in cases {
            let basis = compute_basis(&start, &end).unwrap();
            assert_orthonormal(&basis);
            let expected = (end - start).normalize();
            assert_abs_diff_eq!(basis.direction(), expected, epsilon = 1e-6);
        }
    }

    #[test]
    fn test_x_axis_paths_fall_back_to_y_reference() {
        let origin = Point3::origin();
        for end in [Point3::new(5.0, 0.0, 0.0), Point3::new(-2.0, 0.0, 0.0)] {
            let basis = compute_basis(&origin, &end).unwrap();
            assert_orthonormal(&basis);
            assert!(basis.matrix().iter().all(|v| v.is_finite()));
        }

        let basis = compute_basis(&origin, &Point3::new(1.0, 0.0, 0.0)).unwrap();
        assert_abs_diff_eq!(basis.basis1(), Vector3::y(), epsilon = 1e-6);
        assert_abs_diff_eq!(basis.basis2(), Vector3::z(), epsilon = 1e-6);
    }

    #[test]
    fn test_y_axis_path_uses_x_reference() {
        let basis = compute_basis(&Point3::origin(), &Point3::new(0.0, 1.0, 0.0)).unwrap();
        assert_abs_diff_eq!(basis.basis1(), Vector3::x(), epsilon = 1e-6);
        assert_abs_diff_eq!(basis.basis2(), -Vector3::z(), epsilon = 1e-6);
    }

    #[test]
    fn test_degenerate_path_rejected() {
        let p = Point3::new(1.0, 1.0, 1.0);
        assert_eq!(
            compute_basis(&p, &p),
            Err(PathError::Degenerate { x: 1.0, y: 1.0, z: 1.0 })
        );

        let far = Point3::new(f32::NAN, 0.0, 0.0);
        assert_eq!(compute_basis(&p, &far), Err(PathError::NonFinite));
    }
}
