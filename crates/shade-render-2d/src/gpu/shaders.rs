//! WGSL shader sources for GPU rendering.

/// Combined vertex and fragment shader for tessellated shapes.
///
/// The vertex shader linearizes the sRGB vertex color per channel and maps the
/// position through `projection * model`. The fragment shader emits the
/// interpolated linear color for blending.
pub const SHADER_SOURCE: &str = r#"
// Transform state shared by every vertex of a draw call
struct Uniforms {
    projection: mat4x4<f32>,
    model: mat4x4<f32>,
}

@group(0) @binding(0)
var<uniform> uniforms: Uniforms;

// Vertex input: shape-local position and sRGB color
struct VertexInput {
    @location(0) position: vec3<f32>,
    @location(1) color: vec4<f32>,
}

// Vertex output / Fragment input
struct VertexOutput {
    @builtin(position) clip_position: vec4<f32>,
    @location(0) color: vec4<f32>,
}

// sRGB electro-optical transfer, selected per channel
fn srgb_to_linear(srgb: vec3<f32>) -> vec3<f32> {
    let below = srgb < vec3<f32>(0.04045);
    let lower = srgb / vec3<f32>(12.92);
    let higher = pow((srgb + vec3<f32>(0.055)) / vec3<f32>(1.055), vec3<f32>(2.4));
    return select(higher, lower, below);
}

@vertex
fn vs_main(in: VertexInput) -> VertexOutput {
    var out: VertexOutput;
    out.color = vec4<f32>(srgb_to_linear(in.color.rgb), in.color.a);
    out.clip_position = uniforms.projection * uniforms.model * vec4<f32>(in.position, 1.0);
    return out;
}

@fragment
fn fs_main(in: VertexOutput) -> @location(0) vec4<f32> {
    return in.color;
}
"#;

/// Vertex entry point in [`SHADER_SOURCE`].
pub const VERTEX_ENTRY: &str = "vs_main";
/// Fragment entry point in [`SHADER_SOURCE`].
pub const FRAGMENT_ENTRY: &str = "fs_main";

#[cfg(test)]
mod tests {
    use super::*;
    use shade_core::color::{SRGB_CUTOFF, SRGB_LINEAR_SLOPE};

    #[test]
    fn test_entry_points_present() {
        assert!(SHADER_SOURCE.contains(&format!("fn {VERTEX_ENTRY}(")));
        assert!(SHADER_SOURCE.contains(&format!("fn {FRAGMENT_ENTRY}(")));
    }

    #[test]
    fn test_transfer_constants_match_cpu() {
        assert!(SHADER_SOURCE.contains(&format!("vec3<f32>({SRGB_CUTOFF})")));
        assert!(SHADER_SOURCE.contains(&format!("vec3<f32>({SRGB_LINEAR_SLOPE})")));
        assert!(SHADER_SOURCE.contains("vec3<f32>(2.4)"));
    }

    #[test]
    fn test_model_applied_first() {
        assert!(SHADER_SOURCE.contains("uniforms.projection * uniforms.model * vec4<f32>(in.position, 1.0)"));
    }
}
