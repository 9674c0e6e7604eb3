//! Particle quad batch.
//!
//! Each particle is a 2x2 vertex grid with uv corners in [-1, 1]; the
//! particle vertex shader expands the quad around an animated center.

use serde::{Deserialize, Serialize};

use super::{push_grid_strip, Mesh, SceneVertex};

/// Corner vertices per particle.
const QUAD_VERTICES: u32 = 4;
/// Strip indices per particle, joins included.
const QUAD_INDICES: usize = 6;

/// Parameters for the particle batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct ParticleParams {
    /// Number of particles.
    pub count: u32,
}

impl Default for ParticleParams {
    fn default() -> Self {
        Self { count: 200 }
    }
}

impl ParticleParams {
    pub fn vertex_count(&self) -> usize {
        self.count as usize * QUAD_VERTICES as usize
    }

    pub fn index_count(&self) -> usize {
        self.count as usize * QUAD_INDICES
    }
}

/// Generate the particle strip.
pub fn particles(params: &ParticleParams) -> Mesh {
    let mut vertices = Vec::with_capacity(params.vertex_count());
    let mut indices = Vec::with_capacity(params.index_count());

    for index in 0..params.count {
        for y in 0..2 {
            for x in 0..2 {
                let uv = [x as f32 * 2.0 - 1.0, y as f32 * 2.0 - 1.0];
                vertices.push(SceneVertex::for_element(index, params.count, uv));
            }
        }

        push_grid_strip(&mut indices, index * QUAD_VERTICES, 2, 2);
    }

    Mesh { vertices, indices }
}
