//! Completeness check for the first pass render target.
//!
//! Only run in development builds, before any pass is recorded.

use super::context::GpuError;
use wgpu::{Adapter, TextureFormat, TextureFormatFeatureFlags, TextureUsages};

/// Verify that `format` can be rendered to, bound for sampling and filtered.
pub fn check_first_pass_target(adapter: &Adapter, format: TextureFormat) -> Result<(), GpuError> {
    let features = adapter.get_texture_format_features(format);

    let missing = if !features.allowed_usages.contains(TextureUsages::RENDER_ATTACHMENT) {
        Some("render attachment usage")
    } else if !features.allowed_usages.contains(TextureUsages::TEXTURE_BINDING) {
        Some("texture binding usage")
    } else if !features.flags.contains(TextureFormatFeatureFlags::FILTERABLE) {
        Some("filtering")
    } else {
        None
    };

    match missing {
        Some(missing) => {
            log::error!("First pass target is incomplete: {format:?} lacks {missing}");
            Err(GpuError::IncompleteTarget { format, missing })
        }
        None => {
            log::info!("First pass target is complete.");
            Ok(())
        }
    }
}
