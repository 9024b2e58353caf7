//! Frame driver: primary rays, quincunx anti-aliasing and pixel output.

use std::time::{Duration, Instant};

use glint_core::{Colour, Scene};
use glint_math::{Interval, Vec2};
use rayon::prelude::*;

use crate::bucket::{generate_buckets, render_bucket, BucketResult, DEFAULT_BUCKET_SIZE};
use crate::camera::Camera;
use crate::config::RenderConfig;
use crate::intersect::HitFilter;
use crate::tracer::trace;

/// Sub-pixel offsets for anti-aliasing: the centre plus four half-pixel
/// neighbours.
pub const QUINCUNX: [Vec2; 5] = [
    Vec2::new(0.0, 0.0),
    Vec2::new(0.5, 0.0),
    Vec2::new(-0.5, 0.0),
    Vec2::new(0.0, 0.5),
    Vec2::new(0.0, -0.5),
];

/// Destination for resolved pixels.
pub trait PixelSink {
    /// Store a packed 0xAARRGGBB colour at (x, y).
    fn set_pixel_colour(&mut self, x: u32, y: u32, argb: u32);
}

/// Trace one primary sample through pixel (x, y) shifted by `offset`.
///
/// Returns the resolved colour, or `None` if the ray hit nothing.
pub fn sample_pixel(
    camera: &Camera,
    scene: &Scene,
    x: u32,
    y: u32,
    offset: Vec2,
    config: &RenderConfig,
) -> Option<Colour> {
    let ray = camera.pixel_ray(x, y, offset);
    let filter = HitFilter {
        exclude: None,
        cull_backfaces: config.backface_culling,
    };
    let hit = trace(
        scene,
        &ray,
        Interval::FORWARD,
        config.depth_budget(),
        config.base_ior,
        filter,
        config,
    );
    hit.is_hit().then_some(hit.colour)
}

/// Mean of the channels and brightness of `samples`, or `None` if empty.
pub fn average_samples(samples: &[Colour]) -> Option<Colour> {
    if samples.is_empty() {
        return None;
    }
    let n = samples.len() as f32;
    let (mut red, mut green, mut blue, mut brightness) = (0.0, 0.0, 0.0, 0.0);
    for s in samples {
        red += s.red as f32;
        green += s.green as f32;
        blue += s.blue as f32;
        brightness += s.brightness;
    }
    let channel = |sum: f32| (sum / n).round().clamp(0.0, 255.0) as u8;
    Some(Colour::new(channel(red), channel(green), channel(blue)).with_brightness(brightness / n))
}

/// Resolve pixel (x, y) to a packed colour, or `None` to leave it untouched.
pub fn render_pixel(
    camera: &Camera,
    scene: &Scene,
    x: u32,
    y: u32,
    config: &RenderConfig,
) -> Option<u32> {
    let colour = if config.anti_alias {
        let samples: Vec<Colour> = QUINCUNX
            .iter()
            .filter_map(|&offset| sample_pixel(camera, scene, x, y, offset, config))
            .collect();
        average_samples(&samples)?
    } else {
        sample_pixel(camera, scene, x, y, Vec2::ZERO, config)?
    };
    Some(colour.pack_with_brightness())
}

/// Timing and coverage of one rendered frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameStats {
    pub buckets: usize,
    pub pixels_written: usize,
    pub elapsed: Duration,
}

/// Render a complete frame into `sink`.
///
/// Buckets are traced in parallel; every write is applied to the sink
/// after all buckets finish.
pub fn render_frame(
    camera: &Camera,
    scene: &Scene,
    config: &RenderConfig,
    sink: &mut dyn PixelSink,
) -> FrameStats {
    let start = Instant::now();
    let buckets = generate_buckets(camera.image_width, camera.image_height, DEFAULT_BUCKET_SIZE);
    log::info!(
        "Rendering '{}': {}x{}, {} triangles, {} buckets",
        scene.name,
        camera.image_width,
        camera.image_height,
        scene.triangle_count(),
        buckets.len()
    );

    let results: Vec<BucketResult> = buckets
        .par_iter()
        .map(|bucket| render_bucket(bucket, camera, scene, config))
        .collect();

    let mut pixels_written = 0;
    for result in &results {
        for write in &result.writes {
            sink.set_pixel_colour(write.x, write.y, write.argb);
        }
        pixels_written += result.writes.len();
    }

    let stats = FrameStats {
        buckets: buckets.len(),
        pixels_written,
        elapsed: start.elapsed(),
    };
    log::info!(
        "Frame done in {:.2?}: {} of {} pixels written",
        stats.elapsed,
        stats.pixels_written,
        camera.image_width as usize * camera.image_height as usize
    );
    stats
}

/// In-memory raster of packed 0xAARRGGBB pixels.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameBuffer {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u32>,
}

impl FrameBuffer {
    /// Opaque black background.
    pub const BACKGROUND: u32 = 0xFF00_0000;

    pub fn new(width: u32, height: u32) -> Self {
        Self::filled(width, height, Self::BACKGROUND)
    }

    pub fn filled(width: u32, height: u32, argb: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![argb; width as usize * height as usize],
        }
    }

    /// Pixel at (x, y), or `None` out of bounds.
    pub fn get(&self, x: u32, y: u32) -> Option<u32> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.pixels.get((y * self.width + x) as usize).copied()
    }

    /// Convert to RGBA bytes (for display or saving).
    pub fn to_rgba(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.pixels.len() * 4);
        for &argb in &self.pixels {
            bytes.extend_from_slice(&[(argb >> 16) as u8, (argb >> 8) as u8, argb as u8, (argb >> 24) as u8]);
        }
        bytes
    }
}

impl PixelSink for FrameBuffer {
    fn set_pixel_colour(&mut self, x: u32, y: u32, argb: u32) {
        if x < self.width && y < self.height {
            self.pixels[(y * self.width + x) as usize] = argb;
        }
    }
}
