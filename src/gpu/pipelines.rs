//! Render pipeline builders for the scene passes.

use super::buffers::MeshBuffers;
use super::textures::{DEPTH_FORMAT, FIRST_PASS_FORMAT, OUTPUT_FORMAT};
use wgpu::{
    BindGroupLayout, ColorTargetState, Device, PipelineLayout, RenderPipeline, ShaderModule,
    TextureFormat, VertexBufferLayout,
};

/// Builder for creating render pipelines with common patterns.
pub struct RenderPipelineBuilder<'a> {
    label: Option<&'static str>,
    layout: Option<&'a PipelineLayout>,
    shader: &'a ShaderModule,
    vertex_entry: &'static str,
    fragment_entry: &'static str,
    vertex_buffers: Vec<VertexBufferLayout<'static>>,
    format: TextureFormat,
    blend: Option<wgpu::BlendState>,
    topology: wgpu::PrimitiveTopology,
    cull_mode: Option<wgpu::Face>,
    depth_test: bool,
}

impl<'a> RenderPipelineBuilder<'a> {
    /// Create a new render pipeline builder for `shader`.
    pub fn new(label: &'static str, shader: &'a ShaderModule) -> Self {
        Self {
            label: Some(label),
            layout: None,
            shader,
            vertex_entry: "vs_main",
            fragment_entry: "fs_main",
            vertex_buffers: Vec::new(),
            format: OUTPUT_FORMAT,
            blend: Some(wgpu::BlendState::REPLACE),
            topology: wgpu::PrimitiveTopology::TriangleList,
            cull_mode: None,
            depth_test: false,
        }
    }

    /// Rename the pipeline.
    pub fn label(mut self, label: &'static str) -> Self {
        self.label = Some(label);
        self
    }

    /// Set the pipeline layout.
    pub fn layout(mut self, layout: &'a PipelineLayout) -> Self {
        self.layout = Some(layout);
        self
    }

    /// Set vertex buffer layouts.
    pub fn vertex_buffers(mut self, buffers: Vec<VertexBufferLayout<'static>>) -> Self {
        self.vertex_buffers = buffers;
        self
    }

    /// Set the color target format.
    pub fn format(mut self, format: TextureFormat) -> Self {
        self.format = format;
        self
    }

    /// Draw indexed `u32` triangle strips instead of triangle lists.
    pub fn triangle_strip(mut self) -> Self {
        self.topology = wgpu::PrimitiveTopology::TriangleStrip;
        self
    }

    /// Cull faces (counter-clockwise is front).
    pub fn cull(mut self, face: wgpu::Face) -> Self {
        self.cull_mode = Some(face);
        self
    }

    /// Enable depth test and depth writes against a [`DEPTH_FORMAT`] attachment.
    pub fn depth_test(mut self) -> Self {
        self.depth_test = true;
        self
    }

    /// Build the render pipeline.
    pub fn build(self, device: &Device) -> RenderPipeline {
        let strip_index_format = match self.topology {
            wgpu::PrimitiveTopology::TriangleStrip => Some(wgpu::IndexFormat::Uint32),
            _ => None,
        };

        let depth_stencil = self.depth_test.then(|| wgpu::DepthStencilState {
            format: DEPTH_FORMAT,
            depth_write_enabled: true,
            depth_compare: wgpu::CompareFunction::Less,
            stencil: wgpu::StencilState::default(),
            bias: wgpu::DepthBiasState::default(),
        });

        device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: self.label,
            layout: self.layout,
            vertex: wgpu::VertexState {
                module: self.shader,
                entry_point: Some(self.vertex_entry),
                buffers: &self.vertex_buffers,
                compilation_options: Default::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: self.shader,
                entry_point: Some(self.fragment_entry),
                targets: &[Some(ColorTargetState {
                    format: self.format,
                    blend: self.blend,
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: Default::default(),
            }),
            primitive: wgpu::PrimitiveState {
                topology: self.topology,
                strip_index_format,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: self.cull_mode,
                ..Default::default()
            },
            depth_stencil,
            multisample: wgpu::MultisampleState::default(),
            multiview_mask: None,
            cache: None,
        })
    }
}

/// Create a pipeline layout from bind group layouts.
pub fn create_pipeline_layout(
    device: &Device,
    label: &'static str,
    layouts: &[&BindGroupLayout],
) -> PipelineLayout {
    device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some(label),
        bind_group_layouts: layouts,
        immediate_size: 0,
    })
}

fn ribbon_builder<'a>(
    layout: &'a PipelineLayout,
    shader: &'a ShaderModule,
) -> RenderPipelineBuilder<'a> {
    RenderPipelineBuilder::new("ribbon_pipeline", shader)
        .layout(layout)
        .vertex_buffers(vec![MeshBuffers::vertex_layout()])
        .format(FIRST_PASS_FORMAT)
        .triangle_strip()
        .depth_test()
}

fn particle_builder<'a>(
    layout: &'a PipelineLayout,
    shader: &'a ShaderModule,
) -> RenderPipelineBuilder<'a> {
    // Opaque like the ribbons; the fragment stage discards outside the disc.
    ribbon_builder(layout, shader)
        .label("particle_pipeline")
        .cull(wgpu::Face::Back)
}

/// Pass 0: ribbons into the first pass texture, depth tested, no culling.
pub fn create_ribbon_pipeline(
    device: &Device,
    layout: &PipelineLayout,
    shader: &ShaderModule,
) -> RenderPipeline {
    ribbon_builder(layout, shader).build(device)
}

/// Pass 1: particles into the first pass texture, depth tested, back faces culled.
pub fn create_particle_pipeline(
    device: &Device,
    layout: &PipelineLayout,
    shader: &ShaderModule,
) -> RenderPipeline {
    particle_builder(layout, shader).build(device)
}

/// Create a fullscreen pipeline (no vertex buffers, draws 3 vertices).
pub fn create_fullscreen_pipeline(
    device: &Device,
    label: &'static str,
    layout: &PipelineLayout,
    shader: &ShaderModule,
    format: TextureFormat,
) -> RenderPipeline {
    RenderPipelineBuilder::new(label, shader)
        .layout(layout)
        .format(format)
        .build(device)
}
