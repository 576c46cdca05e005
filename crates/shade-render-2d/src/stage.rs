//! CPU reference of the vertex and fragment stages.
//!
//! These functions compute exactly what `gpu::shaders::SHADER_SOURCE` computes,
//! one invocation at a time. They hold no state, so any number of invocations
//! may run concurrently against the same [`TransformState`].

use glam::{Vec3, Vec4};
use rayon::prelude::*;
use shade_core::color::linearize_color;
use shade_core::{TransformState, Vertex, VertexOutput};

/// Map a shape-local point to clip space: `projection * model * (p, 1)`.
///
/// No clamping, culling, or perspective division happens here.
pub fn compose_transform(state: &TransformState, position: [f32; 3]) -> Vec4 {
    let local = Vec3::from_array(position).extend(1.0);
    state.projection * state.model * local
}

/// Vertex stage: linearize the color, then place the vertex in clip space.
pub fn vertex_stage(vertex: &Vertex, state: &TransformState) -> VertexOutput {
    VertexOutput {
        color: linearize_color(vertex.color),
        clip_position: compose_transform(state, vertex.position),
    }
}

/// Fragment stage: the interpolated linear color is the final pixel color.
pub fn fragment_stage(interpolated: [f32; 4]) -> [f32; 4] {
    interpolated
}

/// Run the vertex stage over a batch, one independent invocation per vertex.
///
/// Output order matches input order.
pub fn run_vertex_stage(vertices: &[Vertex], state: &TransformState) -> Vec<VertexOutput> {
    vertices
        .par_iter()
        .map(|vertex| vertex_stage(vertex, state))
        .collect()
}
