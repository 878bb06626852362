/// A path, a style and the particles arranged around it
use nalgebra::Point3;
use tracing::info;

use crate::clock;
use crate::error::{ConfigError, PathError, StyleError};
use crate::mapper::map_to_path;
use crate::particle::ParticleGrid;
use crate::path::Path;
use crate::style::{Motion, Preset, Style};
use crate::wobble::wobble_position;

/// Everything needed to place every particle for a frame.
///
/// The style is public so hosts can tweak it between frames. Grid size
/// changes are picked up by [`Scene::regenerate`].
#[derive(Debug, Clone)]
pub struct Scene {
    pub style: Style,
    path: Path,
    motion: Motion,
    grid: ParticleGrid,
}

impl Scene {
    pub fn new(path: Path, style: Style, motion: Motion) -> Result<Self, StyleError> {
        style.validate()?;
        let grid = ParticleGrid::generate(style.rows, style.cols)?;
        info!(
            particles = grid.len(),
            length = path.length(),
            ?motion,
            "scene ready"
        );
        Ok(Self {
            style,
            path,
            motion,
            grid,
        })
    }

    pub fn from_preset(preset: Preset) -> Result<Self, ConfigError> {
        Ok(Self::new(preset.path()?, preset.style(), preset.motion())?)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn set_path(&mut self, start: Point3<f32>, end: Point3<f32>) -> Result<(), PathError> {
        self.path = Path::new(start, end)?;
        Ok(())
    }

    pub fn motion(&self) -> Motion {
        self.motion
    }

    pub fn grid(&self) -> &ParticleGrid {
        &self.grid
    }

    /// Rebuild the particle grid from the style's current rows and columns
    pub fn regenerate(&mut self) -> Result<(), StyleError> {
        self.style.validate()?;
        self.grid = ParticleGrid::generate(self.style.rows, self.style.cols)?;
        Ok(())
    }

    /// Fill `out` with one world position per particle at `elapsed` seconds
    pub fn positions(&self, elapsed: f64, out: &mut Vec<Point3<f32>>) {
        out.clear();
        match self.motion {
            Motion::Helix => {
                let t = clock::progress(elapsed, &self.style);
                out.extend(
                    self.grid
                        .particles()
                        .iter()
                        .map(|particle| map_to_path(&self.path, t, particle, &self.style)),
                );
            }
            Motion::Wobble => {
                out.extend((0..self.grid.len()).map(|i| wobble_position(&self.path, elapsed, i)));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::panel::Knob;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_one_position_per_particle() {
        let mut positions = Vec::new();
        for preset in Preset::ALL {
            let scene = Scene::from_preset(preset).unwrap();
            scene.positions(3.7, &mut positions);
            assert_eq!(positions.len(), scene.grid().len());
            assert!(positions.iter().all(|p| p.iter().all(|c| c.is_finite())));
        }
    }

    #[test]
    fn test_grid_changes_wait_for_regenerate() {
        let mut scene = Scene::from_preset(Preset::Bulbs).unwrap();
        scene.style.set_knob(Knob::Rings, 10.0);
        scene.style.set_knob(Knob::RingDensity, 3.0);
        assert_eq!(scene.grid().len(), 3200);

        scene.regenerate().unwrap();
        assert_eq!(scene.grid().len(), 30);
        assert_eq!((scene.grid().rows(), scene.grid().cols()), (3, 10));
    }

    #[test]
    fn test_style_edits_apply_next_frame() {
        let mut scene = Scene::from_preset(Preset::Bulbs).unwrap();
        let mut before = Vec::new();
        let mut after = Vec::new();
        scene.positions(1.0, &mut before);
        scene.style.curve_magnitude = 0.9;
        scene.positions(1.0, &mut after);
        assert_ne!(before, after);
    }

    #[test]
    fn test_set_path_moves_particles() {
        let mut scene = Scene::from_preset(Preset::OffsetHelix).unwrap();
        scene
            .set_path(Point3::new(0.0, 0.0, 0.0), Point3::new(0.0, 5.0, 0.0))
            .unwrap();
        let mut positions = Vec::new();
        scene.positions(0.0, &mut positions);
        // first particle: r_init = 0, h = 0, radius = 0.8
        assert_abs_diff_eq!(positions[0], Point3::new(0.8, 0.0, 0.0), epsilon = 1e-5);

        let p = Point3::new(1.0, 1.0, 1.0);
        assert!(scene.set_path(p, p).is_err());
    }

    #[test]
    fn test_invalid_style_rejected() {
        let path = Preset::Bulbs.path().unwrap();
        let mut style = Style::default();
        style.rows = 0;
        assert!(matches!(
            Scene::new(path, style, Motion::Helix),
            Err(StyleError::EmptyGrid { .. })
        ));
    }
}
