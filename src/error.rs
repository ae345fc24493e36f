//! Error types
//!
//! Configuration problems are caught once at startup; grid errors only
//! come out of the checked accessors and grid deserialization.

use thiserror::Error;

/// Invalid game configuration
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("grid must have at least one row and one column (got {rows}x{cols})")]
    ZeroDimension { rows: usize, cols: usize },
    #[error("viewport must be non-empty (got {width}x{height})")]
    EmptyViewport { width: f32, height: f32 },
    #[error("wall thickness must be positive and finite (got {0})")]
    InvalidThickness(f32),
    #[error("invalid value for `{key}`: {value:?}")]
    InvalidValue { key: String, value: String },
    #[error(transparent)]
    Grid(#[from] GridError),
}

/// Grid access outside its bounds
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridError {
    #[error("grid must have at least one cell")]
    Empty,
    #[error("({row}, {col}) is out of range for a {rows}x{cols} grid")]
    OutOfRange {
        row: usize,
        col: usize,
        rows: usize,
        cols: usize,
    },
    #[error("stored grid arrays do not fit a {rows}x{cols} grid")]
    Malformed { rows: usize, cols: usize },
}

/// Render setup failures
#[derive(Error, Debug)]
pub enum RenderError {
    #[error(transparent)]
    Device(#[from] wgpu::RequestDeviceError),
    #[error("surface reports no supported texture formats")]
    NoSurfaceFormat,
}
