//! Device limit checks run before any scene resource is created.

use crate::config::SceneConfig;
use crate::gpu::context::GpuError;
use crate::gpu::textures::padded_bytes_per_row;
use crate::mesh::SceneVertex;

const VERTEX_SIZE: u64 = std::mem::size_of::<SceneVertex>() as u64;
const INDEX_SIZE: u64 = std::mem::size_of::<u32>() as u64;

fn ensure(
    resource: &'static str,
    what: &'static str,
    requested: u64,
    limit: u64,
) -> Result<(), GpuError> {
    if requested > limit {
        return Err(GpuError::Limits {
            resource,
            what,
            requested,
            limit,
        });
    }
    Ok(())
}

fn check_mesh(
    resource: &'static str,
    vertices: u64,
    indices: u64,
    max_buffer: u64,
) -> Result<(), GpuError> {
    // Indices are u32, whatever the buffer limit allows.
    ensure(resource, "vertex count", vertices, u32::MAX as u64)?;
    ensure(resource, "index count", indices, u32::MAX as u64)?;
    ensure(
        resource,
        "vertex buffer size",
        vertices.saturating_mul(VERTEX_SIZE),
        max_buffer,
    )?;
    ensure(
        resource,
        "index buffer size",
        indices.saturating_mul(INDEX_SIZE),
        max_buffer,
    )
}

/// Reject resolutions and mesh sizes the device cannot hold.
pub(crate) fn check_device_limits(
    config: &SceneConfig,
    limits: &wgpu::Limits,
) -> Result<(), GpuError> {
    let max_dimension = limits.max_texture_dimension_2d as u64;
    ensure("Target", "width", config.width as u64, max_dimension)?;
    ensure("Target", "height", config.height as u64, max_dimension)?;

    let max_buffer = limits.max_buffer_size;
    ensure(
        "Readback",
        "buffer size",
        padded_bytes_per_row(config.width) as u64 * config.height as u64,
        max_buffer,
    )?;

    check_mesh(
        "Ribbon",
        config.ribbons.vertex_count() as u64,
        config.ribbons.index_count() as u64,
        max_buffer,
    )?;
    check_mesh(
        "Particle",
        config.particles.vertex_count() as u64,
        config.particles.index_count() as u64,
        max_buffer,
    )
}
