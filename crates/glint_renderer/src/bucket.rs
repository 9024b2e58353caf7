//! Bucket-based tile rendering.
//!
//! Divides the image into tiles (buckets) that are traced independently and
//! in parallel with rayon. Each bucket returns its own pixel writes, so
//! workers never share an output buffer.

use glint_core::Scene;

use crate::camera::Camera;
use crate::config::RenderConfig;
use crate::renderer::render_pixel;

/// A rectangular region of the image to render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bucket {
    /// X coordinate of bucket's top-left corner
    pub x: u32,
    /// Y coordinate of bucket's top-left corner
    pub y: u32,
    pub width: u32,
    pub height: u32,
    /// Position in the render order
    pub index: usize,
}

impl Bucket {
    pub fn new(x: u32, y: u32, width: u32, height: u32, index: usize) -> Self {
        Self {
            x,
            y,
            width,
            height,
            index,
        }
    }

    pub fn pixel_count(&self) -> u32 {
        self.width * self.height
    }

    /// Global pixel coordinates covered by this bucket, row by row.
    pub fn pixels(&self) -> impl Iterator<Item = (u32, u32)> + '_ {
        (self.y..self.y + self.height).flat_map(move |y| (self.x..self.x + self.width).map(move |x| (x, y)))
    }

    fn centre_distance_sq(&self, width: u32, height: u32) -> f32 {
        let cx = self.x as f32 + self.width as f32 / 2.0 - width as f32 / 2.0;
        let cy = self.y as f32 + self.height as f32 / 2.0 - height as f32 / 2.0;
        cx * cx + cy * cy
    }
}

/// Default bucket size in pixels.
pub const DEFAULT_BUCKET_SIZE: u32 = 32;

/// Split a `width` x `height` image into buckets, ordered from the centre
/// outward.
pub fn generate_buckets(width: u32, height: u32, bucket_size: u32) -> Vec<Bucket> {
    let size = bucket_size.max(1);
    let mut buckets = Vec::new();

    let mut y = 0;
    while y < height {
        let mut x = 0;
        while x < width {
            let bw = size.min(width - x);
            let bh = size.min(height - y);
            buckets.push(Bucket::new(x, y, bw, bh, buckets.len()));
            x += size;
        }
        y += size;
    }

    // Stable sort keeps grid order between equidistant buckets
    buckets.sort_by(|a, b| {
        a.centre_distance_sq(width, height)
            .total_cmp(&b.centre_distance_sq(width, height))
    });
    for (i, bucket) in buckets.iter_mut().enumerate() {
        bucket.index = i;
    }

    buckets
}

/// One resolved pixel: coordinates and packed 0xAARRGGBB colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelWrite {
    pub x: u32,
    pub y: u32,
    pub argb: u32,
}

/// Result of rendering a bucket.
#[derive(Debug, Clone)]
pub struct BucketResult {
    pub bucket: Bucket,
    /// Pixels that produced a colour; misses are absent
    pub writes: Vec<PixelWrite>,
}

/// Trace every pixel of `bucket`.
pub fn render_bucket(
    bucket: &Bucket,
    camera: &Camera,
    scene: &Scene,
    config: &RenderConfig,
) -> BucketResult {
    let writes = bucket
        .pixels()
        .filter_map(|(x, y)| {
            render_pixel(camera, scene, x, y, config).map(|argb| PixelWrite { x, y, argb })
        })
        .collect();
    BucketResult {
        bucket: *bucket,
        writes,
    }
}
