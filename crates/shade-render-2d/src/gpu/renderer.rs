//! Headless GPU renderer using wgpu.

use shade_core::{RenderError, TransformState};
use wgpu::util::DeviceExt;

use super::pipeline::{GpuVertex, ShapePipeline};
use crate::config::{validate_dimensions, RendererConfig};
use crate::geometry::Mesh;

/// One mesh drawn with one transform state.
#[derive(Debug, Clone, Copy)]
pub struct DrawCall<'a> {
    pub mesh: &'a Mesh,
    pub transform: TransformState,
}

impl<'a> DrawCall<'a> {
    pub fn new(mesh: &'a Mesh, transform: TransformState) -> Self {
        Self { mesh, transform }
    }
}

/// GPU-accelerated offscreen renderer.
pub struct GpuRenderer {
    device: wgpu::Device,
    queue: wgpu::Queue,
    pipeline: ShapePipeline,
    config: RendererConfig,
}

impl GpuRenderer {
    /// Validate `config`, acquire a device, and build the shape pipeline.
    pub fn new(config: RendererConfig) -> Result<Self, RenderError> {
        config.validate()?;

        let (device, queue) = pollster::block_on(Self::create_device())?;

        device.push_error_scope(wgpu::ErrorFilter::Validation);
        let pipeline = ShapePipeline::new(
            &device,
            config.target.into(),
            config.sample_count,
            config.blending,
        );
        if let Some(err) = pollster::block_on(device.pop_error_scope()) {
            return Err(RenderError::ShaderCompileFailed {
                reason: err.to_string(),
            });
        }

        Ok(Self {
            device,
            queue,
            pipeline,
            config,
        })
    }

    async fn create_device() -> Result<(wgpu::Device, wgpu::Queue), RenderError> {
        let instance = wgpu::Instance::new(wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: None,
                force_fallback_adapter: false,
            })
            .await
            .ok_or_else(|| RenderError::GpuInitFailed {
                reason: "Failed to find a suitable GPU adapter".to_string(),
            })?;

        let info = adapter.get_info();
        log::info!("using adapter {} ({:?})", info.name, info.backend);

        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    label: Some("Shape Renderer Device"),
                    required_features: wgpu::Features::empty(),
                    required_limits: wgpu::Limits::default(),
                    memory_hints: wgpu::MemoryHints::default(),
                },
                None,
            )
            .await
            .map_err(|e| RenderError::GpuInitFailed {
                reason: format!("Failed to create device: {}", e),
            })?;

        Ok((device, queue))
    }

    pub fn config(&self) -> &RendererConfig {
        &self.config
    }

    /// Render draw calls in order and read back tightly packed RGBA8 rows.
    ///
    /// Each draw call gets its own submission so that its transform state is
    /// the one visible to every vertex it issues.
    pub fn render(&mut self, draws: &[DrawCall<'_>]) -> Result<Vec<u8>, RenderError> {
        let (width, height) = (self.config.width, self.config.height);
        let extent = wgpu::Extent3d {
            width,
            height,
            depth_or_array_layers: 1,
        };
        let format: wgpu::TextureFormat = self.config.target.into();

        let texture = self.device.create_texture(&wgpu::TextureDescriptor {
            label: Some("Render Target"),
            size: extent,
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT | wgpu::TextureUsages::COPY_SRC,
            view_formats: &[],
        });
        let texture_view = texture.create_view(&wgpu::TextureViewDescriptor::default());

        let multisample_view = (self.config.sample_count > 1).then(|| {
            self.device
                .create_texture(&wgpu::TextureDescriptor {
                    label: Some("Multisample Target"),
                    size: extent,
                    mip_level_count: 1,
                    sample_count: self.config.sample_count,
                    dimension: wgpu::TextureDimension::D2,
                    format,
                    usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
                    view_formats: &[],
                })
                .create_view(&wgpu::TextureViewDescriptor::default())
        });

        let clear = self.config.clear_color;
        let mut load = wgpu::LoadOp::Clear(wgpu::Color {
            r: clear.r as f64,
            g: clear.g as f64,
            b: clear.b as f64,
            a: clear.a as f64,
        });

        for draw in draws {
            if draw.mesh.is_empty() {
                log::trace!("skipping empty draw call");
                continue;
            }

            self.pipeline.update(&self.queue, &draw.transform);

            let gpu_vertices: Vec<GpuVertex> =
                draw.mesh.vertices.iter().map(GpuVertex::from).collect();

            let vertex_buffer = self
                .device
                .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                    label: Some("Vertex Buffer"),
                    contents: bytemuck::cast_slice(&gpu_vertices),
                    usage: wgpu::BufferUsages::VERTEX,
                });

            let index_buffer = self
                .device
                .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                    label: Some("Index Buffer"),
                    contents: bytemuck::cast_slice(&draw.mesh.indices),
                    usage: wgpu::BufferUsages::INDEX,
                });

            let mut encoder = self
                .device
                .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                    label: Some("Draw Encoder"),
                });
            {
                let mut render_pass = begin_pass(
                    &mut encoder,
                    &texture_view,
                    multisample_view.as_ref(),
                    load,
                );
                self.pipeline.bind(&mut render_pass);
                render_pass.set_vertex_buffer(0, vertex_buffer.slice(..));
                render_pass.set_index_buffer(index_buffer.slice(..), wgpu::IndexFormat::Uint32);
                render_pass.draw_indexed(0..draw.mesh.indices.len() as u32, 0, 0..1);
            }
            self.queue.submit(std::iter::once(encoder.finish()));

            log::debug!(
                "drew {} vertices, {} indices",
                draw.mesh.vertices.len(),
                draw.mesh.indices.len()
            );
            load = wgpu::LoadOp::Load;
        }

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Readback Encoder"),
            });

        // Nothing was drawn: the target still needs its clear.
        if matches!(load, wgpu::LoadOp::Clear(_)) {
            drop(begin_pass(
                &mut encoder,
                &texture_view,
                multisample_view.as_ref(),
                load,
            ));
        }

        let bytes_per_row = width * 4;
        let padded_bytes_per_row = bytes_per_row.div_ceil(wgpu::COPY_BYTES_PER_ROW_ALIGNMENT)
            * wgpu::COPY_BYTES_PER_ROW_ALIGNMENT;

        let staging_buffer = self.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Staging Buffer"),
            size: (padded_bytes_per_row * height) as wgpu::BufferAddress,
            usage: wgpu::BufferUsages::COPY_DST | wgpu::BufferUsages::MAP_READ,
            mapped_at_creation: false,
        });

        encoder.copy_texture_to_buffer(
            wgpu::ImageCopyTexture {
                texture: &texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            wgpu::ImageCopyBuffer {
                buffer: &staging_buffer,
                layout: wgpu::ImageDataLayout {
                    offset: 0,
                    bytes_per_row: Some(padded_bytes_per_row),
                    rows_per_image: Some(height),
                },
            },
            extent,
        );

        self.queue.submit(std::iter::once(encoder.finish()));

        let buffer_slice = staging_buffer.slice(..);
        let (sender, receiver) = std::sync::mpsc::channel();
        buffer_slice.map_async(wgpu::MapMode::Read, move |result| {
            let _ = sender.send(result);
        });

        self.device.poll(wgpu::Maintain::Wait);

        receiver
            .recv()
            .map_err(|_| RenderError::ReadbackFailed {
                reason: "Failed to receive buffer mapping result".to_string(),
            })?
            .map_err(|e| RenderError::ReadbackFailed {
                reason: format!("Failed to map buffer: {:?}", e),
            })?;

        // Strip row padding
        let data = buffer_slice.get_mapped_range();
        let mut pixels = Vec::with_capacity((bytes_per_row * height) as usize);

        for row in 0..height {
            let start = (row * padded_bytes_per_row) as usize;
            let end = start + bytes_per_row as usize;
            pixels.extend_from_slice(&data[start..end]);
        }

        drop(data);
        staging_buffer.unmap();

        Ok(pixels)
    }

    /// Change the render target size for subsequent renders.
    pub fn resize(&mut self, width: u32, height: u32) -> Result<(), RenderError> {
        validate_dimensions(width, height)?;
        self.config.width = width;
        self.config.height = height;
        log::debug!("resized render target to {}x{}", width, height);
        Ok(())
    }
}

/// Begin a pass on the target, rendering through the multisample view when present.
fn begin_pass<'e>(
    encoder: &'e mut wgpu::CommandEncoder,
    target: &wgpu::TextureView,
    multisample: Option<&wgpu::TextureView>,
    load: wgpu::LoadOp<wgpu::Color>,
) -> wgpu::RenderPass<'e> {
    let (view, resolve_target) = match multisample {
        Some(msaa) => (msaa, Some(target)),
        None => (target, None),
    };

    encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
        label: Some("Shape Render Pass"),
        color_attachments: &[Some(wgpu::RenderPassColorAttachment {
            view,
            resolve_target,
            ops: wgpu::Operations {
                load,
                store: wgpu::StoreOp::Store,
            },
        })],
        depth_stencil_attachment: None,
        timestamp_writes: None,
        occlusion_query_set: None,
    })
}
