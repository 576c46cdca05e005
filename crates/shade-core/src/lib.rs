//! Core types for the shade 2D shape pipeline.
//!
//! This crate holds everything the vertex and fragment stages agree on:
//! the vertex record, the shared transform state, the stage output record,
//! the sRGB transfer function, and the error types used by host-side setup.

pub mod color;
pub mod errors;
pub mod transform;
pub mod types;

pub use color::{linearize, linearize_channel, linearize_color};
pub use errors::{ConfigError, RenderError, ShadeError};
pub use types::{Color, TransformState, Vertex, VertexOutput};
