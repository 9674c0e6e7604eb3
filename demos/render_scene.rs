//! Example: Render the ribbon scene to a PNG sequence.
//!
//! Run with:
//!     cargo run --example render_scene -- [config.json] [frames] [output_dir]
//!
//! Set `RUST_LOG=debug` for per-frame logging.

use anyhow::Context;
use ribbon_scene::{render_sequence, SceneConfig};
use std::path::PathBuf;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut args = std::env::args().skip(1);
    let config_path = PathBuf::from(args.next().unwrap_or_else(|| "scene.json".to_string()));
    let frames: u32 = match args.next() {
        Some(frames) => frames
            .parse()
            .with_context(|| format!("Invalid frame count: {frames}"))?,
        None => 120,
    };
    let output_dir = PathBuf::from(args.next().unwrap_or_else(|| "frames".to_string()));

    let config = SceneConfig::load_or_default(&config_path)
        .with_context(|| format!("Failed to load {}", config_path.display()))?;
    log::info!(
        "Scene: {}x{}, {} ribbon(s) of {}x{} faces, {} particles",
        config.width,
        config.height,
        config.ribbons.count,
        config.ribbons.slice_x,
        config.ribbons.slice_y,
        config.particles.count
    );

    let paths = render_sequence(
        config,
        frames,
        &output_dir,
        Some(Box::new(|progress: f32| {
            log::info!("Progress: {:.0}%", progress * 100.0);
        })),
    )
    .await
    .context("Failed to render sequence")?;

    log::info!("Wrote {} frames to {}", paths.len(), output_dir.display());
    Ok(())
}
