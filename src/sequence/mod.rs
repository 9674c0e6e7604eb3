//! Offline export of a frame sequence to PNG files.

use crate::config::SceneConfig;
use crate::scene::{SceneError, SceneRenderer};
use std::path::{Path, PathBuf};

/// Errors that can occur while exporting a sequence.
#[derive(Debug, thiserror::Error)]
pub enum SequenceError {
    #[error("Scene error: {0}")]
    Scene(#[from] SceneError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),
    #[error("Frame buffer does not match {width}x{height}")]
    FrameSize { width: u32, height: u32 },
}

/// Path of frame `index` inside `output_dir`.
pub fn frame_path(output_dir: &Path, index: u32) -> PathBuf {
    output_dir.join(format!("frame_{index:05}.png"))
}

/// Scene time of frame `index`.
pub fn frame_time(index: u32, fps: u32) -> f32 {
    index as f32 / fps as f32
}

/// Render `frames` frames at the configured frame rate and write them as PNGs.
///
/// Returns the written paths in frame order.
pub async fn render_sequence<P: AsRef<Path>>(
    config: SceneConfig,
    frames: u32,
    output_dir: P,
    progress_callback: Option<Box<dyn Fn(f32) + Send>>,
) -> Result<Vec<PathBuf>, SequenceError> {
    let output_dir = output_dir.as_ref();
    std::fs::create_dir_all(output_dir)?;

    let renderer = SceneRenderer::new(config).await?;
    let (width, height, fps) = {
        let config = renderer.config();
        (config.width, config.height, config.fps)
    };

    log::info!(
        "Rendering {frames} frames at {width}x{height}, {fps} fps into {} on {}",
        output_dir.display(),
        renderer.adapter_info().name
    );

    let mut paths = Vec::with_capacity(frames as usize);
    for index in 0..frames {
        let pixels = renderer.render_frame(frame_time(index, fps))?;
        let image = image::RgbaImage::from_raw(width, height, pixels)
            .ok_or(SequenceError::FrameSize { width, height })?;

        let path = frame_path(output_dir, index);
        image.save(&path)?;
        log::debug!("Wrote {}", path.display());
        paths.push(path);

        if let Some(ref callback) = progress_callback {
            callback((index + 1) as f32 / frames as f32);
        }
    }

    Ok(paths)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_path_is_zero_padded() {
        let path = frame_path(Path::new("out"), 42);
        assert_eq!(path, Path::new("out").join("frame_00042.png"));
    }

    #[test]
    fn test_frame_time() {
        assert_eq!(frame_time(0, 60), 0.0);
        assert_eq!(frame_time(30, 60), 0.5);
        assert_eq!(frame_time(60, 30), 2.0);
    }
}
