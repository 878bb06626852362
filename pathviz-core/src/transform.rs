/// Orbit state and model matrices for viewing a scene
use nalgebra::{Matrix4, Point3, Vector3};

/// Orbit angles around the three axes (in radians)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Orbit {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Orbit {
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    pub fn zero() -> Self {
        Self::new(0.0, 0.0, 0.0)
    }

    /// Rotate by delta amounts (in radians)
    pub fn rotate(&mut self, dx: f32, dy: f32, dz: f32) {
        self.x += dx;
        self.y += dy;
        self.z += dz;
    }
}

impl Default for Orbit {
    fn default() -> Self {
        Self::zero()
    }
}

/// Model matrix helpers
pub struct Transform;

impl Transform {
    /// Rotation applying Z, then Y, then X
    pub fn rotation_matrix(orbit: &Orbit) -> Matrix4<f32> {
        let rx = Matrix4::new_rotation(Vector3::new(orbit.x, 0.0, 0.0));
        let ry = Matrix4::new_rotation(Vector3::new(0.0, orbit.y, 0.0));
        let rz = Matrix4::new_rotation(Vector3::new(0.0, 0.0, orbit.z));
        rz * ry * rx
    }

    /// Rotate the scene by `orbit` about `pivot` instead of the world origin
    pub fn orbit_about(pivot: &Point3<f32>, orbit: &Orbit) -> Matrix4<f32> {
        let to_origin = Matrix4::new_translation(&-pivot.coords);
        let back = Matrix4::new_translation(&pivot.coords);
        back * Self::rotation_matrix(orbit) * to_origin
    }

    pub fn mvp_matrix(
        model: &Matrix4<f32>,
        view: &Matrix4<f32>,
        projection: &Matrix4<f32>,
    ) -> Matrix4<f32> {
        projection * view * model
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_orbit_accumulates() {
        let mut orbit = Orbit::zero();
        orbit.rotate(0.1, 0.2, 0.3);
        orbit.rotate(0.1, 0.0, -0.3);
        assert_abs_diff_eq!(orbit.x, 0.2, epsilon = 1e-6);
        assert_abs_diff_eq!(orbit.y, 0.2, epsilon = 1e-6);
        assert_abs_diff_eq!(orbit.z, 0.0, epsilon = 1e-6);
    }

    #[test]
    fn test_identity_rotation() {
        let matrix = Transform::rotation_matrix(&Orbit::zero());
        assert!((matrix - Matrix4::identity()).norm() < 1e-6);
    }

    #[test]
    fn test_pivot_stays_fixed() {
        let pivot = Point3::new(-2.5, 1.75, -6.0);
        let model = Transform::orbit_about(&pivot, &Orbit::new(0.4, -1.2, 0.7));
        assert_abs_diff_eq!(model.transform_point(&pivot), pivot, epsilon = 1e-5);
    }
}
