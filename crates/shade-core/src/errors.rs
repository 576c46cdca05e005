//! Error types for the shade pipeline.
//!
//! The stages themselves are infallible. Everything here belongs to host-side
//! setup: configuration, device acquisition, and pixel readback.

use thiserror::Error;

/// Top-level error type.
#[derive(Debug, Error)]
pub enum ShadeError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Render(#[from] RenderError),
}

/// Errors raised while validating renderer configuration.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid target dimensions {width}x{height}: each side must be in 1..={max}")]
    InvalidDimensions { width: u32, height: u32, max: u32 },

    #[error("Unsupported sample count {count}: expected 1 or 4")]
    InvalidSampleCount { count: u32 },
}

/// Errors during rendering.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("GPU initialization failed: {reason}")]
    GpuInitFailed { reason: String },

    #[error("Shader compilation failed: {reason}")]
    ShaderCompileFailed { reason: String },

    #[error("Pixel readback failed: {reason}")]
    ReadbackFailed { reason: String },

    #[error(transparent)]
    Config(#[from] ConfigError),
}
