//! GPU resources for the scene using wgpu.
//!
//! Provides headless rendering: device creation, create-once mesh buffers,
//! the first pass texture and output targets, and the pipelines for the
//! ribbon, particle and post passes.

pub mod buffers;
pub mod context;
pub mod layouts;
pub mod pipelines;
pub mod shaders;
pub mod target_check;
pub mod textures;
pub mod uniforms;

pub use buffers::MeshBuffers;
pub use context::{GpuContext, GpuError};
pub use textures::{ReadbackBuffer, RenderTarget};
pub use uniforms::FrameUniforms;
