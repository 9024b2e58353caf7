//! Render configuration: the explicit, per-frame render context.
//!
//! Everything the tracer would otherwise read from global state lives here.
//! Build one per frame from the current input state and pass it by reference.

use serde::Deserialize;

/// How occlusion between a shaded point and the light is handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShadowMode {
    /// No shadow rays are cast.
    Off,
    /// One shadow ray to the primary light; occluded points snap to the floor.
    #[default]
    Hard,
    /// One shadow ray per light sample; brightness scales with the unoccluded fraction.
    Soft,
}

/// Normal interpolation strategy for smooth-shaded (sphere) surfaces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShadingMode {
    /// Face normal
    #[default]
    Flat,
    /// Per-vertex lighting interpolated across the face
    Gouraud,
    /// Per-vertex normals interpolated across the face
    Phong,
}

/// Render configuration.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Shadow test policy
    pub shadow_mode: ShadowMode,
    /// Interpolation used by smooth-shaded materials
    pub shading_mode: ShadingMode,
    /// Mirror reflection and the specular highlight
    pub reflective: bool,
    /// Dielectric refraction
    pub refractive: bool,
    /// Skip back-facing triangles for camera rays
    pub backface_culling: bool,
    /// Five-sample quincunx anti-aliasing
    pub anti_alias: bool,

    /// Light intensity in the inverse-square falloff numerator
    pub intensity: f32,
    /// Geometry constant k in `intensity / (k * pi * d^2)`
    pub falloff: f32,
    /// Brightness never drops below this
    pub ambience: f32,
    /// Brightness of a point in hard shadow, and lower bound under soft shadow
    pub shadow_floor: f32,
    /// Specular exponent
    pub shininess: f32,
    /// Weight of the specular term
    pub specular_strength: f32,

    /// Index of refraction of refractive triangles
    pub glass_ior: f32,
    /// Index of refraction of the medium camera rays start in
    pub base_ior: f32,
    /// Recursion budget for reflection/refraction
    pub max_depth: u32,

    /// Minimum distance for a secondary-ray hit
    pub ray_bias: f32,
    /// An occluder closer than this to the light does not cast a shadow
    pub shadow_threshold: f32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            shadow_mode: ShadowMode::Hard,
            shading_mode: ShadingMode::Flat,
            reflective: true,
            refractive: true,
            backface_culling: false,
            anti_alias: false,
            intensity: 20.0,
            falloff: 4.0,
            ambience: 0.15,
            shadow_floor: 0.15,
            shininess: 1.0,
            specular_strength: 0.2,
            glass_ior: 1.5,
            base_ior: 1.0,
            max_depth: 5,
            ray_bias: 1e-4,
            shadow_threshold: 1e-3,
        }
    }
}

impl RenderConfig {
    /// Hard cap on the recursion budget.
    pub const DEPTH_LIMIT: u32 = 5;

    /// Recursion budget after applying the hard cap.
    pub fn depth_budget(&self) -> u32 {
        self.max_depth.min(Self::DEPTH_LIMIT)
    }

    /// Clamp brightness to [ambience, 1].
    #[inline]
    pub fn clamp_brightness(&self, brightness: f32) -> f32 {
        if brightness.is_nan() {
            return self.ambience;
        }
        brightness.max(self.ambience).min(1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = RenderConfig::default();
        assert_eq!(config.max_depth, 5);
        assert_eq!(config.base_ior, 1.0);
        assert_eq!(config.shadow_floor, 0.15);
        assert_eq!(config.shininess, 1.0);
        assert_eq!(config.shadow_mode, ShadowMode::Hard);
    }

    #[test]
    fn test_depth_budget_capped() {
        let config = RenderConfig {
            max_depth: 50,
            ..Default::default()
        };
        assert_eq!(config.depth_budget(), 5);
        let shallow = RenderConfig {
            max_depth: 2,
            ..Default::default()
        };
        assert_eq!(shallow.depth_budget(), 2);
    }

    #[test]
    fn test_clamp_brightness() {
        let config = RenderConfig::default();
        assert_eq!(config.clamp_brightness(-3.0), config.ambience);
        assert_eq!(config.clamp_brightness(0.5), 0.5);
        assert_eq!(config.clamp_brightness(12.0), 1.0);
        assert_eq!(config.clamp_brightness(f32::NAN), config.ambience);
    }
}
