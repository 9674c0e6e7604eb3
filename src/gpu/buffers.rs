//! Immutable vertex/index buffers for the scene meshes.

use crate::mesh::{Mesh, SceneVertex};
use wgpu::util::DeviceExt;
use wgpu::{Buffer, BufferUsages, Device};

static VERTEX_ATTRIBUTES: [wgpu::VertexAttribute; 2] = [
    // x, y, z
    wgpu::VertexAttribute {
        offset: 0,
        shader_location: 0,
        format: wgpu::VertexFormat::Float32x3,
    },
    // u, v
    wgpu::VertexAttribute {
        offset: SceneVertex::UV_OFFSET,
        shader_location: 1,
        format: wgpu::VertexFormat::Float32x2,
    },
];

// Zero-sized buffers cannot be bound, so empty meshes upload one placeholder.
const PLACEHOLDER_VERTEX: [SceneVertex; 1] = [SceneVertex {
    position: [0.0; 3],
    uv: [0.0; 2],
}];
const PLACEHOLDER_INDEX: [u32; 1] = [0];

/// Vertex and index buffers for one mesh, uploaded once.
pub struct MeshBuffers {
    pub vertices: Buffer,
    pub indices: Buffer,
    index_count: u32,
}

impl MeshBuffers {
    /// Upload a mesh. The buffers are never written again.
    pub fn upload(device: &Device, label: &str, mesh: &Mesh) -> Self {
        let vertex_data: &[SceneVertex] = if mesh.vertices.is_empty() {
            &PLACEHOLDER_VERTEX
        } else {
            &mesh.vertices
        };
        let index_data: &[u32] = if mesh.indices.is_empty() {
            &PLACEHOLDER_INDEX
        } else {
            &mesh.indices
        };

        let vertices = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{label}_vertices")),
            contents: bytemuck::cast_slice(vertex_data),
            usage: BufferUsages::VERTEX,
        });

        let indices = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{label}_indices")),
            contents: bytemuck::cast_slice(index_data),
            usage: BufferUsages::INDEX,
        });

        log::debug!(
            "Uploaded {label}: {} vertices, {} indices",
            mesh.vertices.len(),
            mesh.indices.len()
        );

        Self {
            vertices,
            indices,
            index_count: mesh.index_count(),
        }
    }

    /// Number of indices to draw.
    pub fn index_count(&self) -> u32 {
        self.index_count
    }

    /// Interleaved layout: position at location 0, uv at location 1.
    pub fn vertex_layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<SceneVertex>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &VERTEX_ATTRIBUTES,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gpu::GpuContext;
    use crate::mesh::{particles, ParticleParams};

    #[test]
    fn test_vertex_layout_stride() {
        let layout = MeshBuffers::vertex_layout();
        assert_eq!(layout.array_stride, 20);
        assert_eq!(layout.attributes.len(), 2);
        assert_eq!(layout.attributes[1].offset, 12);
    }

    #[tokio::test]
    async fn test_upload_keeps_index_count() {
        let ctx = match GpuContext::new().await {
            Ok(ctx) => ctx,
            Err(_) => return,
        };

        let mesh = particles(&ParticleParams { count: 3 });
        let buffers = MeshBuffers::upload(&ctx.device, "particles", &mesh);
        assert_eq!(buffers.index_count(), 18);
        assert_eq!(buffers.vertices.size(), 12 * 20);
    }

    #[tokio::test]
    async fn test_upload_empty_mesh() {
        let ctx = match GpuContext::new().await {
            Ok(ctx) => ctx,
            Err(_) => return,
        };

        let buffers = MeshBuffers::upload(&ctx.device, "empty", &Mesh::default());
        assert_eq!(buffers.index_count(), 0);
    }
}
