//! Vertex and fragment stages for rendering tessellated 2D shapes.
//!
//! Geometry arrives already triangulated, with sRGB vertex colors. The vertex
//! stage linearizes those colors and maps positions through
//! `projection * model` into clip space; the fragment stage emits the
//! interpolated linear color for blending.
//!
//! [`stage`] is a CPU reference of both stages. With the `gpu` feature, the
//! same computation runs as WGSL through [`gpu::GpuRenderer`].

pub mod blending;
pub mod config;
pub mod geometry;
pub mod logging;
pub mod stage;

#[cfg(feature = "gpu")]
pub mod gpu;

pub use blending::{BlendFactor, BlendOp, Blending};
pub use config::{ColorTarget, RendererConfig};
pub use geometry::{Mesh, ShapeVertex};
pub use logging::{init_logging, LoggingConfig};
pub use stage::{compose_transform, fragment_stage, run_vertex_stage, vertex_stage};

#[cfg(feature = "gpu")]
pub use gpu::{DrawCall, GpuRenderer};

pub use shade_core::{Color, ConfigError, RenderError, TransformState, Vertex, VertexOutput};
