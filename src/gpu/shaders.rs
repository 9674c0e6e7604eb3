//! Embedded WGSL programs, one per pass.

use wgpu::{Device, ShaderModule};

fn load(device: &Device, label: &'static str, source: &'static str) -> ShaderModule {
    device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some(label),
        source: wgpu::ShaderSource::Wgsl(source.into()),
    })
}

/// Pass 0 program.
pub fn ribbon(device: &Device) -> ShaderModule {
    load(device, "ribbon_shader", include_str!("shaders/ribbon.wgsl"))
}

/// Pass 1 program.
pub fn particles(device: &Device) -> ShaderModule {
    load(device, "particle_shader", include_str!("shaders/particles.wgsl"))
}

/// Pass 2 program.
pub fn post(device: &Device) -> ShaderModule {
    load(device, "post_shader", include_str!("shaders/post.wgsl"))
}
