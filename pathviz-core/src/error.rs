/// Error types for path construction, style validation and settings files
use thiserror::Error;

/// Reasons a pair of endpoints cannot carry a path basis
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PathError {
    #[error("path endpoints coincide at ({x}, {y}, {z})")]
    Degenerate { x: f32, y: f32, z: f32 },

    #[error("path endpoints must be finite")]
    NonFinite,
}

/// Reasons a style cannot drive a scene
#[derive(Debug, Clone, PartialEq, Error)]
pub enum StyleError {
    #[error("style knob `{knob}` is not finite")]
    NonFinite { knob: &'static str },

    #[error("particle grid needs at least one row and one column (got {rows}x{cols})")]
    EmptyGrid { rows: usize, cols: usize },

    #[error("particle grid {rows}x{cols} is larger than the {max_rows}x{max_cols} limit")]
    GridTooLarge {
        rows: usize,
        cols: usize,
        max_rows: usize,
        max_cols: usize,
    },
}

/// Errors raised while loading a settings file
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("line {line}: {message}")]
    Syntax { line: usize, message: String },

    #[error("line {line}: unknown setting `{key}`")]
    UnknownKey { line: usize, key: String },

    #[error("line {line}: `{key}` expects {expected}")]
    InvalidValue {
        line: usize,
        key: String,
        expected: &'static str,
    },

    #[error("unknown preset `{0}`")]
    UnknownPreset(String),

    #[error(transparent)]
    Path(#[from] PathError),

    #[error(transparent)]
    Style(#[from] StyleError),

    #[error("failed to read settings file: {0}")]
    Io(#[from] std::io::Error),
}
