/// pathviz core library - path-aligned parametric point clouds
///
/// This library provides the stateless core: path bases, the helix mapping,
/// particle grids, style presets, the settings file parser, and the camera
/// math shared by the terminal and web hosts.

pub mod basis;
pub mod clock;
pub mod config;
pub mod error;
pub mod mapper;
pub mod panel;
pub mod particle;
pub mod path;
pub mod projection;
pub mod scene;
pub mod style;
pub mod transform;
pub mod wobble;

// Re-export commonly used types
pub use basis::{compute_basis, Basis};
pub use clock::{progress, FrameLimiter};
pub use config::SceneConfig;
pub use error::{ConfigError, PathError, StyleError};
pub use mapper::{cylindrical_to_cartesian, map_to_path, polar_position};
pub use panel::Knob;
pub use particle::{Particle, ParticleGrid};
pub use path::Path;
pub use projection::{Camera, ProjectionMode, ScreenPoint};
pub use scene::Scene;
pub use style::{MAX_COLS, MAX_ROWS, Motion, Preset, RadiusPhase, Style};
pub use transform::{Orbit, Transform};
