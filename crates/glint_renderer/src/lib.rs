//! Glint Renderer - CPU Whitted-style ray tracing.
//!
//! Brute-force recursive ray tracer over a flat triangle list:
//! - Closest-hit triangle intersection by solving the 3x3 barycentric system
//! - Hard and soft (sample-voted) shadows
//! - Diffuse, specular and ambient shading with flat/Gouraud/Phong normals,
//!   textures and bump maps
//! - Mirror reflection and Fresnel-weighted refraction with a depth budget
//! - Quincunx anti-aliasing and bucketed parallel frame rendering

mod bucket;
mod camera;
mod config;
mod intersect;
mod optics;
mod renderer;
mod shading;
mod shadow;
mod tracer;

pub use bucket::{generate_buckets, render_bucket, Bucket, BucketResult, PixelWrite, DEFAULT_BUCKET_SIZE};
pub use camera::Camera;
pub use config::{RenderConfig, ShadingMode, ShadowMode};
pub use intersect::{closest_intersection, intersect_triangle, solve_triangle, Barycentric, HitFilter, Intersection};
pub use optics::{fresnel, reflect, refract};
pub use renderer::{
    average_samples, render_frame, render_pixel, sample_pixel, FrameBuffer, FrameStats, PixelSink, QUINCUNX,
};
pub use shading::{falloff, shade, specular};
pub use shadow::{attenuate, in_shadow, penumbra};
pub use tracer::trace;

/// Re-export common math types from glint_math
pub use glint_math::{Interval, Ray, Vec2, Vec3};
