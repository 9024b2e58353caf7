//! Shadow rays: binary occlusion for hard shadows, sample voting for soft.

use glint_core::Triangle;
use glint_math::{Interval, Ray, Vec3};

use crate::config::{RenderConfig, ShadowMode};
use crate::intersect::intersect_triangle;

/// True if anything other than triangle `shaded` blocks `point` from `light`.
///
/// Only hits strictly between the point and the light count; an occluder
/// within `shadow_threshold` of the light itself is ignored.
pub fn in_shadow(
    triangles: &[Triangle],
    point: Vec3,
    light: Vec3,
    shaded: usize,
    config: &RenderConfig,
) -> bool {
    let to_light = light - point;
    let distance = to_light.length();
    if distance <= config.ray_bias + config.shadow_threshold {
        return false;
    }

    let ray = Ray::new(point, to_light);
    let ray_t = Interval::new(config.ray_bias, distance - config.shadow_threshold);

    triangles
        .iter()
        .enumerate()
        .any(|(index, triangle)| index != shaded && intersect_triangle(&ray, triangle, ray_t).is_some())
}

/// Fraction of `samples` that are occluded from `point`, in [0, 1].
pub fn penumbra(
    triangles: &[Triangle],
    point: Vec3,
    samples: &[Vec3],
    shaded: usize,
    config: &RenderConfig,
) -> f32 {
    if samples.is_empty() {
        return 0.0;
    }
    let occluded = samples
        .iter()
        .filter(|&&sample| in_shadow(triangles, point, sample, shaded, config))
        .count();
    occluded as f32 / samples.len() as f32
}

/// Apply the configured shadow policy to an already clamped brightness.
///
/// Hard shadows snap an occluded point to `shadow_floor`. Soft shadows scale
/// brightness by the unoccluded fraction, never going below `shadow_floor`
/// (and never raising a value that was already below it).
pub fn attenuate(
    brightness: f32,
    triangles: &[Triangle],
    point: Vec3,
    shaded: usize,
    light: Vec3,
    samples: &[Vec3],
    config: &RenderConfig,
) -> f32 {
    match config.shadow_mode {
        ShadowMode::Off => brightness,
        ShadowMode::Hard => {
            if in_shadow(triangles, point, light, shaded, config) {
                config.shadow_floor
            } else {
                brightness
            }
        }
        ShadowMode::Soft => {
            let samples = if samples.is_empty() {
                std::slice::from_ref(&light)
            } else {
                samples
            };
            let occluded = penumbra(triangles, point, samples, shaded, config);
            if occluded > 0.0 {
                let floor = config.shadow_floor.min(brightness);
                (brightness * (1.0 - occluded)).max(floor)
            } else {
                brightness
            }
        }
    }
}
