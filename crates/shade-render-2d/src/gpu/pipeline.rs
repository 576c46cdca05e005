//! Render pipeline and binding layout for the shape stages.

use std::borrow::Cow;

use shade_core::transform::to_columns;
use shade_core::{TransformState, Vertex};
use wgpu::util::DeviceExt;

use super::shaders::{FRAGMENT_ENTRY, SHADER_SOURCE, VERTEX_ENTRY};
use crate::blending::Blending;

/// Uniform block at group 0, binding 0.
///
/// Each `mat4x4<f32>` column is 16 bytes, so the block needs no padding.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Uniforms {
    pub projection: [[f32; 4]; 4],
    pub model: [[f32; 4]; 4],
}

impl From<&TransformState> for Uniforms {
    fn from(state: &TransformState) -> Self {
        Self {
            projection: to_columns(&state.projection),
            model: to_columns(&state.model),
        }
    }
}

impl Default for Uniforms {
    fn default() -> Self {
        Self::from(&TransformState::default())
    }
}

/// GPU vertex layout of [`Vertex`].
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct GpuVertex {
    pub position: [f32; 3],
    pub color: [f32; 4],
}

impl From<&Vertex> for GpuVertex {
    fn from(v: &Vertex) -> Self {
        Self {
            position: v.position,
            color: v.color,
        }
    }
}

impl GpuVertex {
    const ATTRIBUTES: [wgpu::VertexAttribute; 2] =
        wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32x4];

    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<GpuVertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRIBUTES,
        }
    }
}

/// Compiled shape pipeline plus the uniform buffer holding its transform state.
pub struct ShapePipeline {
    pipeline: wgpu::RenderPipeline,
    uniform_buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
}

impl ShapePipeline {
    /// Build the pipeline for a color target of `format`.
    ///
    /// The uniform buffer starts out holding identity matrices.
    pub fn new(
        device: &wgpu::Device,
        format: wgpu::TextureFormat,
        sample_count: u32,
        blending: Blending,
    ) -> Self {
        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Shape Shader"),
            source: wgpu::ShaderSource::Wgsl(Cow::Borrowed(SHADER_SOURCE)),
        });

        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Transform Bind Group Layout"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: wgpu::BufferSize::new(
                        std::mem::size_of::<Uniforms>() as wgpu::BufferAddress,
                    ),
                },
                count: None,
            }],
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Shape Pipeline Layout"),
            bind_group_layouts: &[&bind_group_layout],
            push_constant_ranges: &[],
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("Shape Render Pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some(VERTEX_ENTRY),
                buffers: &[GpuVertex::layout()],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some(FRAGMENT_ENTRY),
                targets: &[Some(wgpu::ColorTargetState {
                    format,
                    blend: Some(blending.into()),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: None,
                polygon_mode: wgpu::PolygonMode::Fill,
                unclipped_depth: false,
                conservative: false,
            },
            depth_stencil: None,
            multisample: wgpu::MultisampleState {
                count: sample_count,
                mask: !0,
                alpha_to_coverage_enabled: false,
            },
            multiview: None,
            cache: None,
        });

        let uniform_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Transform Uniform Buffer"),
            contents: bytemuck::cast_slice(&[Uniforms::default()]),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Transform Bind Group"),
            layout: &bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            }],
        });

        log::debug!(
            "created shape pipeline: format={:?}, samples={}, blending={:?}",
            format,
            sample_count,
            blending
        );

        Self {
            pipeline,
            uniform_buffer,
            bind_group,
        }
    }

    /// Upload a new transform state.
    ///
    /// Takes effect for work submitted after this call; in-flight draws keep
    /// the state they were submitted with.
    pub fn update(&self, queue: &wgpu::Queue, state: &TransformState) {
        let uniforms = Uniforms::from(state);
        queue.write_buffer(&self.uniform_buffer, 0, bytemuck::cast_slice(&[uniforms]));
    }

    /// Bind the pipeline and its transform state on a render pass.
    pub fn bind(&self, render_pass: &mut wgpu::RenderPass<'_>) {
        render_pass.set_pipeline(&self.pipeline);
        render_pass.set_bind_group(0, &self.bind_group, &[]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::{Mat4, Vec3};

    #[test]
    fn test_gpu_vertex_size() {
        // vec3 position + vec4 color, tightly packed
        assert_eq!(std::mem::size_of::<GpuVertex>(), 28);
        assert_eq!(GpuVertex::layout().array_stride, 28);
    }

    #[test]
    fn test_vertex_attribute_slots() {
        let layout = GpuVertex::layout();
        assert_eq!(layout.attributes[0].shader_location, 0);
        assert_eq!(layout.attributes[0].offset, 0);
        assert_eq!(layout.attributes[0].format, wgpu::VertexFormat::Float32x3);
        assert_eq!(layout.attributes[1].shader_location, 1);
        assert_eq!(layout.attributes[1].offset, 12);
        assert_eq!(layout.attributes[1].format, wgpu::VertexFormat::Float32x4);
    }

    #[test]
    fn test_uniforms_size() {
        // Two 4x4 matrices of f32 = 128 bytes
        assert_eq!(std::mem::size_of::<Uniforms>(), 128);
    }

    #[test]
    fn test_uniforms_order_and_layout() {
        let state = TransformState::new(
            Mat4::from_scale(Vec3::splat(2.0)),
            Mat4::from_translation(Vec3::new(7.0, 8.0, 9.0)),
        );
        let uniforms = Uniforms::from(&state);
        let floats: &[f32] = bytemuck::cast_slice(std::slice::from_ref(&uniforms));

        // projection first, then model; both column-major
        assert_eq!(floats[0], 2.0);
        assert_eq!(&floats[16 + 12..16 + 16], &[7.0, 8.0, 9.0, 1.0]);
    }

    #[test]
    fn test_gpu_vertex_from_vertex() {
        let v = Vertex::new([1.0, 2.0, 3.0], [0.1, 0.2, 0.3, 0.4]);
        let g = GpuVertex::from(&v);
        assert_eq!(g.position, v.position);
        assert_eq!(g.color, v.color);
    }
}
