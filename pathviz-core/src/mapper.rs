/// Helix mapping from progress and particle identity to world positions
///
/// Each particle sits on a ring around the path. Its radius bulges with a
/// sinusoid, its angle turns with progress, and its height slides along the
/// path and wraps at the end.
use std::f32::consts::TAU;

use nalgebra::{Point3, Vector3};

use crate::particle::Particle;
use crate::path::Path;
use crate::style::{RadiusPhase, Style};

/// Wrap into `[0, 1)`, also for negative input
pub fn wrap_unit(value: f32) -> f32 {
    let wrapped = value.rem_euclid(1.0);
    // rem_euclid rounds tiny negative inputs up to exactly 1.0
    if wrapped >= 1.0 {
        0.0
    } else {
        wrapped
    }
}

/// Radius and angle (radians) of a particle at progress `t`
pub fn polar_position(t: f32, particle: &Particle, style: &Style) -> (f32, f32) {
    let height = wrap_unit(t + particle.h_init);
    let base = style.base_radius
        + style.breathing_magnitude * (height * style.radius_period * TAU).sin();

    let phase = match style.phase {
        RadiusPhase::Time => t + particle.r_init * style.phase_shift,
        RadiusPhase::Height => particle.h_init,
        RadiusPhase::Combined => height,
    };
    let radius = base + style.curve_magnitude * (phase * style.curve_period * TAU).sin();

    let angle = wrap_unit(t * style.rotation_speed + particle.r_init) * TAU;

    (radius, angle)
}

/// Local `(x, y, h)` with `h` the wrapped fraction along the path
pub fn cylindrical_to_cartesian(t: f32, particle: &Particle, style: &Style) -> Vector3<f32> {
    let (radius, angle) = polar_position(t, particle, style);
    Vector3::new(
        radius * angle.cos(),
        radius * angle.sin(),
        wrap_unit(t + particle.h_init),
    )
}

/// World position of a particle at progress `t`.
///
/// `t` is wrapped first, so the result repeats with period 1 for any style.
pub fn map_to_path(path: &Path, t: f32, particle: &Particle, style: &Style) -> Point3<f32> {
    let t = wrap_unit(t);
    let local = cylindrical_to_cartesian(t, particle, style);
    path.to_world(&Vector3::new(local.x, local.y, local.z * path.length()))
}
