//! Ribbon mesh generation.
//!
//! A ribbon is a `slice_x` by `slice_y` grid of faces. Vertices only carry the
//! ribbon index and grid uv; the ribbon vertex shader bends the band.

use serde::{Deserialize, Serialize};

use super::{push_grid_strip, Mesh, SceneVertex};

/// Parameters for the ribbon batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct RibbonParams {
    /// Number of ribbons.
    pub count: u32,
    /// Faces along the ribbon length.
    pub slice_x: u32,
    /// Faces across the ribbon width.
    pub slice_y: u32,
}

impl Default for RibbonParams {
    fn default() -> Self {
        Self {
            count: 1,
            slice_x: 1000,
            slice_y: 1,
        }
    }
}

impl RibbonParams {
    /// Vertices per ribbon row.
    pub fn face_x(&self) -> u32 {
        self.slice_x + 1
    }

    /// Vertex rows per ribbon.
    pub fn face_y(&self) -> u32 {
        self.slice_y + 1
    }

    /// Saturates instead of overflowing so oversized params can be rejected.
    pub fn vertex_count(&self) -> usize {
        (self.count as usize)
            .saturating_mul(self.slice_x as usize + 1)
            .saturating_mul(self.slice_y as usize + 1)
    }

    /// Indices in the stitched strip: two per column plus the two joins, per row.
    pub fn index_count(&self) -> usize {
        (self.count as usize)
            .saturating_mul(self.slice_y as usize)
            .saturating_mul(2 * (self.slice_x as usize + 1) + 2)
    }
}

/// Generate the ribbon strip.
pub fn ribbons(params: &RibbonParams) -> Mesh {
    if params.count == 0 || params.slice_x == 0 || params.slice_y == 0 {
        return Mesh::default();
    }

    let face_x = params.face_x();
    let face_y = params.face_y();
    let mut vertices = Vec::with_capacity(params.vertex_count());
    let mut indices = Vec::with_capacity(params.index_count());

    for index in 0..params.count {
        for y in 0..face_y {
            for x in 0..face_x {
                let uv = [
                    x as f32 / params.slice_x as f32,
                    y as f32 / params.slice_y as f32,
                ];
                vertices.push(SceneVertex::for_element(index, params.count, uv));
            }
        }

        push_grid_strip(&mut indices, index * face_x * face_y, face_x, face_y);
    }

    Mesh { vertices, indices }
}
