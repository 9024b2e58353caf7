//! Render a JSON scene description to a PNG.
//!
//! Usage: `glint <scene.json> [output.png]`

mod scene_file;

use std::env;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use glint_renderer::{render_frame, FrameBuffer};
use image::RgbaImage;

use scene_file::SceneDescription;

fn main() -> Result<()> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    let args: Vec<String> = env::args().collect();
    let Some(scene_path) = args.get(1).map(PathBuf::from) else {
        bail!("Usage: {} <scene.json> [output.png]", args[0]);
    };
    let output = args
        .get(2)
        .map(PathBuf::from)
        .unwrap_or_else(|| scene_path.with_extension("png"));

    log::info!("Starting glint: {}", scene_path.display());

    let description = SceneDescription::load(&scene_path)?;
    let base_dir = scene_path.parent().unwrap_or(Path::new("."));
    let scene = description.build_scene(base_dir)?;
    let camera = description.camera();

    let mut frame = FrameBuffer::new(camera.image_width, camera.image_height);
    let stats = render_frame(&camera, &scene, &description.render, &mut frame);

    save_png(&frame, &output)?;
    log::info!(
        "Wrote {} ({} pixels in {:.2?})",
        output.display(),
        stats.pixels_written,
        stats.elapsed
    );
    Ok(())
}

fn save_png(frame: &FrameBuffer, path: &Path) -> Result<()> {
    let image = RgbaImage::from_raw(frame.width, frame.height, frame.to_rgba())
        .context("Frame buffer size does not match its dimensions")?;
    image
        .save(path)
        .with_context(|| format!("Failed to write {}", path.display()))
}
