//! Ribbon Scene
//!
//! A headless demo scene rendered with wgpu in three passes.
//!
//! # Features
//!
//! - Ribbon strips and particle quads generated once on the CPU
//! - Immutable GPU vertex/index buffers drawn as indexed triangle strips
//! - Ribbons and particles rendered into an off-screen first pass texture
//! - Post-process blit of that texture into the final image
//! - PNG sequence export

pub mod config;
pub mod gpu;
pub mod mesh;
pub mod scene;
pub mod sequence;

// Re-export commonly used types
pub use config::{ConfigError, SceneConfig};
pub use gpu::{GpuContext, GpuError};
pub use mesh::{particles, ribbons, Mesh, ParticleParams, RibbonParams, SceneVertex};
pub use scene::{SceneError, SceneRenderer};
pub use sequence::{render_sequence, SequenceError};
