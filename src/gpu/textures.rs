//! Texture management for GPU rendering.

use super::context::GpuError;
use wgpu::{Device, Texture, TextureFormat, TextureUsages, TextureView};

/// Format of the first pass texture. Filterable and renderable on every backend.
pub const FIRST_PASS_FORMAT: TextureFormat = TextureFormat::Rgba16Float;
/// Format of the final output.
pub const OUTPUT_FORMAT: TextureFormat = TextureFormat::Rgba8Unorm;
/// Depth format for the ribbon and particle passes.
pub const DEPTH_FORMAT: TextureFormat = TextureFormat::Depth32Float;

/// A render target that owns both texture and view.
/// The texture must outlive its view, so we keep them together.
pub struct RenderTarget {
    texture: Texture,
    view: TextureView,
}

impl RenderTarget {
    /// Create a new render target with the specified usage flags.
    pub fn new(
        device: &Device,
        label: &str,
        width: u32,
        height: u32,
        format: TextureFormat,
        usage: TextureUsages,
    ) -> Self {
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some(label),
            size: wgpu::Extent3d {
                width,
                height,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format,
            usage,
            view_formats: &[],
        });
        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        Self { texture, view }
    }

    /// First pass texture: rendered by the scene passes, sampled by the post pass.
    pub fn for_scene(device: &Device, width: u32, height: u32) -> Self {
        Self::new(
            device,
            "first_pass_texture",
            width,
            height,
            FIRST_PASS_FORMAT,
            TextureUsages::RENDER_ATTACHMENT | TextureUsages::TEXTURE_BINDING,
        )
    }

    /// Final output (can be copied to CPU).
    pub fn for_output(device: &Device, width: u32, height: u32) -> Self {
        Self::new(
            device,
            "output_texture",
            width,
            height,
            OUTPUT_FORMAT,
            TextureUsages::RENDER_ATTACHMENT | TextureUsages::COPY_SRC,
        )
    }

    /// Depth attachment shared by the ribbon and particle passes.
    pub fn for_depth(device: &Device, width: u32, height: u32) -> Self {
        Self::new(
            device,
            "scene_depth",
            width,
            height,
            DEPTH_FORMAT,
            TextureUsages::RENDER_ATTACHMENT,
        )
    }

    /// Get the texture view for rendering or sampling.
    pub fn view(&self) -> &TextureView {
        &self.view
    }

    /// Get the underlying texture (for copy operations).
    pub fn texture(&self) -> &Texture {
        &self.texture
    }
}

/// Sampler settings for reading the first pass texture: linear filtering
/// both ways, clamped at the edges.
pub fn first_pass_sampler_descriptor() -> wgpu::SamplerDescriptor<'static> {
    wgpu::SamplerDescriptor {
        label: Some("first_pass_sampler"),
        address_mode_u: wgpu::AddressMode::ClampToEdge,
        address_mode_v: wgpu::AddressMode::ClampToEdge,
        address_mode_w: wgpu::AddressMode::ClampToEdge,
        mag_filter: wgpu::FilterMode::Linear,
        min_filter: wgpu::FilterMode::Linear,
        ..Default::default()
    }
}

/// Sampler used by the post pass to read the first pass texture.
pub fn create_first_pass_sampler(device: &Device) -> wgpu::Sampler {
    device.create_sampler(&first_pass_sampler_descriptor())
}

/// Readback buffer for copying GPU texture data to CPU.
pub struct ReadbackBuffer {
    buffer: wgpu::Buffer,
    width: u32,
    height: u32,
    padded_row_bytes: u32,
    unpadded_row_bytes: u32,
}

impl ReadbackBuffer {
    /// Create a new readback buffer sized for the given dimensions.
    pub fn new(device: &Device, width: u32, height: u32) -> Self {
        let unpadded_row_bytes = width * 4;
        let padded_row_bytes = padded_bytes_per_row(width);

        let buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("readback_buffer"),
            size: (padded_row_bytes * height) as u64,
            usage: wgpu::BufferUsages::COPY_DST | wgpu::BufferUsages::MAP_READ,
            mapped_at_creation: false,
        });

        Self {
            buffer,
            width,
            height,
            padded_row_bytes,
            unpadded_row_bytes,
        }
    }

    /// Record a copy of `texture` into this buffer.
    pub fn copy_from(&self, encoder: &mut wgpu::CommandEncoder, texture: &Texture) {
        encoder.copy_texture_to_buffer(
            wgpu::TexelCopyTextureInfo {
                texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            wgpu::TexelCopyBufferInfo {
                buffer: &self.buffer,
                layout: wgpu::TexelCopyBufferLayout {
                    offset: 0,
                    bytes_per_row: Some(self.padded_row_bytes),
                    rows_per_image: Some(self.height),
                },
            },
            wgpu::Extent3d {
                width: self.width,
                height: self.height,
                depth_or_array_layers: 1,
            },
        );
    }

    /// Read pixels from the mapped buffer, removing row padding.
    pub fn read_pixels(&self, device: &Device) -> Result<Vec<u8>, GpuError> {
        let buffer_slice = self.buffer.slice(..);
        let (sender, receiver) = std::sync::mpsc::channel();
        buffer_slice.map_async(wgpu::MapMode::Read, move |result| {
            // The receiver only goes away if read_pixels already returned.
            let _ = sender.send(result);
        });
        device
            .poll(wgpu::PollType::wait_indefinitely())
            .map_err(|e| GpuError::Readback(e.to_string()))?;
        receiver
            .recv()
            .map_err(|e| GpuError::Readback(e.to_string()))?
            .map_err(|e| GpuError::Readback(e.to_string()))?;

        let mut pixels = Vec::with_capacity((self.width * self.height * 4) as usize);
        {
            let data = buffer_slice.get_mapped_range();
            for row in 0..self.height {
                let start = (row * self.padded_row_bytes) as usize;
                let end = start + self.unpadded_row_bytes as usize;
                pixels.extend_from_slice(&data[start..end]);
            }
        }
        self.buffer.unmap();
        Ok(pixels)
    }
}

/// Bytes per row rounded up to the copy alignment.
pub fn padded_bytes_per_row(width: u32) -> u32 {
    let align = wgpu::COPY_BYTES_PER_ROW_ALIGNMENT;
    (width * 4).div_ceil(align) * align
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gpu::GpuContext;

    #[test]
    fn test_padded_bytes_per_row() {
        assert_eq!(padded_bytes_per_row(64), 256);
        assert_eq!(padded_bytes_per_row(65), 512);
        assert_eq!(padded_bytes_per_row(1), 256);
    }

    #[test]
    fn test_first_pass_sampler_filters_linearly() {
        let desc = first_pass_sampler_descriptor();
        assert_eq!(desc.mag_filter, wgpu::FilterMode::Linear);
        assert_eq!(desc.min_filter, wgpu::FilterMode::Linear);
        assert_eq!(desc.address_mode_u, wgpu::AddressMode::ClampToEdge);
        assert_eq!(desc.address_mode_v, wgpu::AddressMode::ClampToEdge);
    }

    #[tokio::test]
    async fn test_render_target_creation() {
        let ctx = match GpuContext::new().await {
            Ok(ctx) => ctx,
            Err(_) => return,
        };

        let target = RenderTarget::for_scene(&ctx.device, 256, 256);
        assert_eq!(target.texture().format(), FIRST_PASS_FORMAT);
        let depth = RenderTarget::for_depth(&ctx.device, 256, 256);
        assert_eq!(depth.texture().format(), DEPTH_FORMAT);
    }

    #[tokio::test]
    async fn test_readback_buffer_creation() {
        let ctx = match GpuContext::new().await {
            Ok(ctx) => ctx,
            Err(_) => return,
        };

        let readback = ReadbackBuffer::new(&ctx.device, 100, 10);
        assert_eq!(readback.padded_row_bytes, 512);
        assert_eq!(readback.unpadded_row_bytes, 400);
        assert_eq!(readback.buffer.size(), 512 * 10);
    }
}
