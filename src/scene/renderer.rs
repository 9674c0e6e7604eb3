//! Three-pass scene renderer.
//!
//! 1. Ribbons into the first pass texture (depth tested, no culling)
//! 2. Particles into the same texture (depth tested, back faces culled)
//! 3. Post process blit of the first pass texture into the output target

use crate::config::{ConfigError, SceneConfig};
use crate::gpu::buffers::MeshBuffers;
use crate::gpu::context::{GpuContext, GpuError};
use crate::gpu::textures::{
    create_first_pass_sampler, ReadbackBuffer, RenderTarget, FIRST_PASS_FORMAT, OUTPUT_FORMAT,
};
use crate::gpu::uniforms::FrameUniforms;
use crate::gpu::{layouts, pipelines, shaders, target_check};
use crate::mesh;
use crate::scene::limits;
use wgpu::{BindGroup, Buffer, RenderPipeline};

/// Errors that can occur while building or rendering the scene.
#[derive(Debug, thiserror::Error)]
pub enum SceneError {
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
    #[error("GPU error: {0}")]
    Gpu(#[from] GpuError),
}

/// Renders the ribbon/particle scene offscreen and reads frames back.
pub struct SceneRenderer {
    ctx: GpuContext,
    ribbon_pipeline: RenderPipeline,
    particle_pipeline: RenderPipeline,
    post_pipeline: RenderPipeline,
    frame_bind_group: BindGroup,
    post_bind_group: BindGroup,
    uniform_buffer: Buffer,
    ribbons: MeshBuffers,
    particles: MeshBuffers,
    first_pass: RenderTarget,
    depth: RenderTarget,
    output: RenderTarget,
    readback: ReadbackBuffer,
    config: SceneConfig,
}

impl SceneRenderer {
    /// Create a renderer on a fresh headless GPU context.
    pub async fn new(config: SceneConfig) -> Result<Self, SceneError> {
        config.validate()?;
        let ctx = GpuContext::new().await?;
        Self::with_context(ctx, config)
    }

    /// Create a renderer on an existing context.
    pub fn with_context(ctx: GpuContext, config: SceneConfig) -> Result<Self, SceneError> {
        preflight(&ctx, &config, FIRST_PASS_FORMAT)?;

        let device = &ctx.device;

        // Geometry is generated and uploaded once.
        let ribbons = MeshBuffers::upload(device, "ribbons", &mesh::ribbons(&config.ribbons));
        let particles =
            MeshBuffers::upload(device, "particles", &mesh::particles(&config.particles));

        let first_pass = RenderTarget::for_scene(device, config.width, config.height);
        let depth = RenderTarget::for_depth(device, config.width, config.height);
        let output = RenderTarget::for_output(device, config.width, config.height);
        let readback = ReadbackBuffer::new(device, config.width, config.height);
        let sampler = create_first_pass_sampler(device);

        let uniform_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("frame_uniforms"),
            size: std::mem::size_of::<FrameUniforms>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let frame_layout = layouts::create_frame_layout(device);
        let post_layout = layouts::create_post_layout(device);

        let frame_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("frame_bind_group"),
            layout: &frame_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            }],
        });

        let post_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("post_bind_group"),
            layout: &post_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: uniform_buffer.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::TextureView(first_pass.view()),
                },
                wgpu::BindGroupEntry {
                    binding: 2,
                    resource: wgpu::BindingResource::Sampler(&sampler),
                },
            ],
        });

        let scene_layout =
            pipelines::create_pipeline_layout(device, "scene_pipeline_layout", &[&frame_layout]);
        let post_pipeline_layout =
            pipelines::create_pipeline_layout(device, "post_pipeline_layout", &[&post_layout]);

        let ribbon_pipeline =
            pipelines::create_ribbon_pipeline(device, &scene_layout, &shaders::ribbon(device));
        let particle_pipeline =
            pipelines::create_particle_pipeline(device, &scene_layout, &shaders::particles(device));
        let post_pipeline = pipelines::create_fullscreen_pipeline(
            device,
            "post_pipeline",
            &post_pipeline_layout,
            &shaders::post(device),
            OUTPUT_FORMAT,
        );

        log::info!(
            "Scene ready at {}x{}: {} ribbon indices, {} particle indices",
            config.width,
            config.height,
            ribbons.index_count(),
            particles.index_count()
        );

        Ok(Self {
            ctx,
            ribbon_pipeline,
            particle_pipeline,
            post_pipeline,
            frame_bind_group,
            post_bind_group,
            uniform_buffer,
            ribbons,
            particles,
            first_pass,
            depth,
            output,
            readback,
            config,
        })
    }

    /// Render one frame at `time` seconds.
    ///
    /// Returns RGBA pixel data, `width * height * 4` bytes.
    pub fn render_frame(&self, time: f32) -> Result<Vec<u8>, SceneError> {
        let uniforms = FrameUniforms::new(
            time,
            self.config.width,
            self.config.height,
            &self.config.controls,
        );
        self.ctx
            .queue
            .write_buffer(&self.uniform_buffer, 0, bytemuck::bytes_of(&uniforms));

        let mut encoder = self
            .ctx
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("scene_encoder"),
            });

        let [r, g, b] = self.config.clear_color;
        let clear = wgpu::Color {
            r: r as f64,
            g: g as f64,
            b: b as f64,
            a: 1.0,
        };

        // Pass 0: ribbons
        {
            let mut pass = self.begin_scene_pass(
                &mut encoder,
                "ribbon_pass",
                wgpu::LoadOp::Clear(clear),
                wgpu::LoadOp::Clear(1.0),
            );
            draw_strip(&mut pass, &self.ribbon_pipeline, &self.frame_bind_group, &self.ribbons);
        }

        // Pass 1: particles
        {
            let mut pass = self.begin_scene_pass(
                &mut encoder,
                "particle_pass",
                wgpu::LoadOp::Load,
                wgpu::LoadOp::Load,
            );
            draw_strip(
                &mut pass,
                &self.particle_pipeline,
                &self.frame_bind_group,
                &self.particles,
            );
        }

        // Pass 2: post processing
        {
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("post_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: self.output.view(),
                    resolve_target: None,
                    depth_slice: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color::BLACK),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
                multiview_mask: None,
            });

            pass.set_pipeline(&self.post_pipeline);
            pass.set_bind_group(0, &self.post_bind_group, &[]);
            pass.draw(0..3, 0..1);
        }

        self.readback.copy_from(&mut encoder, self.output.texture());
        self.ctx.queue.submit(std::iter::once(encoder.finish()));

        Ok(self.readback.read_pixels(&self.ctx.device)?)
    }

    fn begin_scene_pass<'e>(
        &self,
        encoder: &'e mut wgpu::CommandEncoder,
        label: &'static str,
        color_load: wgpu::LoadOp<wgpu::Color>,
        depth_load: wgpu::LoadOp<f32>,
    ) -> wgpu::RenderPass<'e> {
        encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some(label),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: self.first_pass.view(),
                resolve_target: None,
                depth_slice: None,
                ops: wgpu::Operations {
                    load: color_load,
                    store: wgpu::StoreOp::Store,
                },
            })],
            depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                view: self.depth.view(),
                depth_ops: Some(wgpu::Operations {
                    load: depth_load,
                    store: wgpu::StoreOp::Store,
                }),
                stencil_ops: None,
            }),
            timestamp_writes: None,
            occlusion_query_set: None,
            multiview_mask: None,
        })
    }

    /// Get the scene configuration.
    pub fn config(&self) -> &SceneConfig {
        &self.config
    }

    /// Get GPU adapter info.
    pub fn adapter_info(&self) -> wgpu::AdapterInfo {
        self.ctx.adapter_info()
    }

    /// Indices drawn by the ribbon pass.
    pub fn ribbon_index_count(&self) -> u32 {
        self.ribbons.index_count()
    }

    /// Indices drawn by the particle pass.
    pub fn particle_index_count(&self) -> u32 {
        self.particles.index_count()
    }
}

/// Everything that must hold before the first resource is created.
fn preflight(
    ctx: &GpuContext,
    config: &SceneConfig,
    first_pass_format: wgpu::TextureFormat,
) -> Result<(), SceneError> {
    config.validate()?;
    limits::check_device_limits(config, &ctx.limits())?;

    if config.development {
        target_check::check_first_pass_target(&ctx.adapter, first_pass_format)?;
    } else {
        log::debug!("Skipping first pass target check");
    }
    Ok(())
}

fn draw_strip(
    pass: &mut wgpu::RenderPass<'_>,
    pipeline: &RenderPipeline,
    bind_group: &BindGroup,
    mesh: &MeshBuffers,
) {
    if mesh.index_count() == 0 {
        return;
    }
    pass.set_pipeline(pipeline);
    pass.set_bind_group(0, bind_group, &[]);
    pass.set_vertex_buffer(0, mesh.vertices.slice(..));
    pass.set_index_buffer(mesh.indices.slice(..), wgpu::IndexFormat::Uint32);
    pass.draw_indexed(0..mesh.index_count(), 0, 0..1);
}
