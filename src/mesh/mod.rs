//! CPU-side geometry for the scene.
//!
//! Both meshes share one interleaved vertex format and are drawn as indexed
//! triangle strips:
//! - Ribbons: a grid of `slice_x` by `slice_y` faces per ribbon
//! - Particles: one 2x2 grid (a quad) per particle
//!
//! Rows and quads are stitched into a single strip by repeating the first and
//! last index of each row, so neighbours only ever share zero-area triangles.

mod particles;
mod ribbon;

pub use particles::{particles, ParticleParams};
pub use ribbon::{ribbons, RibbonParams};

/// Interleaved vertex shared by ribbons and particles.
///
/// `position` carries the element index (ribbon or particle) rather than a
/// world position; the vertex shaders derive the actual placement from it.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct SceneVertex {
    pub position: [f32; 3],
    pub uv: [f32; 2],
}

impl SceneVertex {
    /// Number of floats per vertex (x, y, z, u, v).
    pub const FLOATS: usize = 5;

    /// Byte offset of the uv attribute.
    pub const UV_OFFSET: u64 = 3 * std::mem::size_of::<f32>() as u64;

    /// Vertex for element `index` out of `count`.
    pub(crate) fn for_element(index: u32, count: u32, uv: [f32; 2]) -> Self {
        let i = index as f32;
        Self {
            position: [i, i / count as f32, i],
            uv,
        }
    }
}

/// Indexed triangle-strip mesh.
#[derive(Debug, Clone, Default)]
pub struct Mesh {
    pub vertices: Vec<SceneVertex>,
    pub indices: Vec<u32>,
}

impl Mesh {
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Number of indices submitted in the draw call.
    pub fn index_count(&self) -> u32 {
        self.indices.len() as u32
    }
}

/// Append the strip indices for one `columns` x `rows` vertex grid whose
/// first vertex is `base`.
///
/// Each row of faces starts and ends with a repeated index so consecutive
/// rows (and consecutive grids) join through degenerate triangles.
pub(crate) fn push_grid_strip(indices: &mut Vec<u32>, base: u32, columns: u32, rows: u32) {
    for r in 0..rows.saturating_sub(1) {
        let top = base + r * columns;
        let bottom = base + (r + 1) * columns;

        indices.push(top);
        for c in 0..columns {
            indices.push(top + c);
            indices.push(bottom + c);
        }
        indices.push(bottom + columns - 1);
    }
}
