/// Straight paths that particles are arranged around
use nalgebra::{Point3, Vector3};

use crate::basis::{compute_basis, Basis};
use crate::error::PathError;

/// A directed segment with its length and aligned basis precomputed
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Path {
    start: Point3<f32>,
    end: Point3<f32>,
    length: f32,
    basis: Basis,
}

impl Path {
    pub fn new(start: Point3<f32>, end: Point3<f32>) -> Result<Self, PathError> {
        let basis = compute_basis(&start, &end)?;
        Ok(Self {
            start,
            end,
            length: nalgebra::distance(&start, &end),
            basis,
        })
    }

    pub fn start(&self) -> &Point3<f32> {
        &self.start
    }

    pub fn end(&self) -> &Point3<f32> {
        &self.end
    }

    pub fn length(&self) -> f32 {
        self.length
    }

    pub fn basis(&self) -> &Basis {
        &self.basis
    }

    pub fn midpoint(&self) -> Point3<f32> {
        nalgebra::center(&self.start, &self.end)
    }

    /// Point at fraction `t` of the way from start to end
    pub fn lerp(&self, t: f32) -> Point3<f32> {
        Point3::from(self.start.coords.lerp(&self.end.coords, t))
    }

    /// Map a local `(x, y, z)` point, with z measured along the path, into world space
    pub fn to_world(&self, local: &Vector3<f32>) -> Point3<f32> {
        self.start + self.basis.apply(local)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_path_length_and_midpoint() {
        let path = Path::new(Point3::new(0.0, 0.0, 0.0), Point3::new(3.0, 4.0, 0.0)).unwrap();
        assert_abs_diff_eq!(path.length(), 5.0, epsilon = 1e-6);
        assert_abs_diff_eq!(path.midpoint(), Point3::new(1.5, 2.0, 0.0), epsilon = 1e-6);
        assert_abs_diff_eq!(path.lerp(1.0), *path.end(), epsilon = 1e-6);
    }

    #[test]
    fn test_local_z_runs_along_path() {
        let start = Point3::new(-7.0, 4.0, -12.0);
        let end = Point3::new(2.0, -0.5, 0.0);
        let path = Path::new(start, end).unwrap();
        let world = path.to_world(&Vector3::new(0.0, 0.0, path.length()));
        assert_abs_diff_eq!(world, end, epsilon = 1e-4);
    }

    #[test]
    fn test_coincident_endpoints_rejected() {
        let p = Point3::new(2.0, 2.0, 2.0);
        assert!(matches!(Path::new(p, p), Err(PathError::Degenerate { .. })));
    }
}
