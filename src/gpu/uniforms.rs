//! Float uniform block shared by every pass.

use crate::config::MAX_CONTROLS;

/// Uniform data for all three scene shaders.
///
/// Mirrors the WGSL `Frame` struct: time and resolution first, then the user
/// controls packed into vec4s.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct FrameUniforms {
    pub time: f32,
    pub resolution_width: f32,
    pub resolution_height: f32,
    pub _padding: f32,
    pub controls: [[f32; 4]; MAX_CONTROLS / 4],
}

impl FrameUniforms {
    /// Pack the frame state. Controls beyond [`MAX_CONTROLS`] are dropped.
    pub fn new(time: f32, width: u32, height: u32, controls: &[f32]) -> Self {
        let mut packed = [[0.0f32; 4]; MAX_CONTROLS / 4];
        for (i, &value) in controls.iter().take(MAX_CONTROLS).enumerate() {
            packed[i / 4][i % 4] = value;
        }

        Self {
            time,
            resolution_width: width as f32,
            resolution_height: height as f32,
            _padding: 0.0,
            controls: packed,
        }
    }

}
