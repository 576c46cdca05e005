//! GPU execution of the shape stages using wgpu.
//!
//! The WGSL in [`shaders`] is the same computation as [`crate::stage`]; the
//! pipeline binds the transform state as a uniform block at group 0,
//! binding 0, and reads vertex records from slot 0 (position) and 1 (color).

pub mod pipeline;
pub mod renderer;
pub mod shaders;

pub use pipeline::{GpuVertex, ShapePipeline, Uniforms};
pub use renderer::{DrawCall, GpuRenderer};
