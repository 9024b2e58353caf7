//! Point light with an auxiliary sample set for soft shadows.

use glint_math::Vec3;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// The scene's light: one primary position used for diffuse and specular
/// lighting, plus sample positions voted over for soft shadows.
#[derive(Clone, Debug, PartialEq)]
pub struct LightRig {
    /// Primary light position
    pub position: Vec3,
    /// Soft-shadow sample positions (empty for a pure point light)
    pub samples: Vec<Vec3>,
}

impl LightRig {
    /// A point light with no area samples.
    pub fn new(position: Vec3) -> Self {
        Self {
            position,
            samples: Vec::new(),
        }
    }

    /// A square area light in the XZ plane, sampled on a regular
    /// `per_side` x `per_side` grid spanning `radius` either side of `position`.
    pub fn with_grid(position: Vec3, radius: f32, per_side: u32) -> Self {
        let radius = sanitize_radius(radius);
        let per_side = per_side.max(1);
        let mut samples = Vec::with_capacity((per_side * per_side) as usize);
        for j in 0..per_side {
            for i in 0..per_side {
                let offset = |k: u32| {
                    if per_side == 1 {
                        0.0
                    } else {
                        -radius + 2.0 * radius * k as f32 / (per_side - 1) as f32
                    }
                };
                samples.push(position + Vec3::new(offset(i), 0.0, offset(j)));
            }
        }
        Self { position, samples }
    }

    /// A square area light in the XZ plane with `count` uniformly jittered
    /// samples. The same `seed` always gives the same samples.
    pub fn with_jitter(position: Vec3, radius: f32, count: u32, seed: u64) -> Self {
        let radius = sanitize_radius(radius);
        let mut rng = StdRng::seed_from_u64(seed);
        let samples = (0..count.max(1))
            .map(|_| {
                let dx = rng.gen_range(-radius..=radius);
                let dz = rng.gen_range(-radius..=radius);
                position + Vec3::new(dx, 0.0, dz)
            })
            .collect();
        Self { position, samples }
    }

    /// Positions to test for soft shadows. Falls back to the primary light
    /// when no samples were generated.
    pub fn sample_positions(&self) -> &[Vec3] {
        if self.samples.is_empty() {
            std::slice::from_ref(&self.position)
        } else {
            &self.samples
        }
    }
}

/// Half-width of the light square: negative radii mirror to positive and
/// non-finite ones collapse the light to a point.
fn sanitize_radius(radius: f32) -> f32 {
    if radius.is_finite() {
        radius.abs()
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_light_samples_itself() {
        let rig = LightRig::new(Vec3::new(0.0, 2.0, 0.0));
        assert_eq!(rig.sample_positions(), &[Vec3::new(0.0, 2.0, 0.0)]);
    }

    #[test]
    fn test_grid_spans_radius() {
        let center = Vec3::new(1.0, 5.0, -1.0);
        let rig = LightRig::with_grid(center, 0.5, 3);
        assert_eq!(rig.samples.len(), 9);
        assert_eq!(rig.samples[0], center + Vec3::new(-0.5, 0.0, -0.5));
        assert_eq!(rig.samples[4], center);
        assert_eq!(rig.samples[8], center + Vec3::new(0.5, 0.0, 0.5));
        assert!(rig.samples.iter().all(|s| s.y == center.y));
    }

    #[test]
    fn test_jitter_is_deterministic() {
        let a = LightRig::with_jitter(Vec3::Y, 0.25, 16, 7);
        let b = LightRig::with_jitter(Vec3::Y, 0.25, 16, 7);
        assert_eq!(a, b);
        assert_eq!(a.samples.len(), 16);
        for s in &a.samples {
            assert!((s.x).abs() <= 0.25 && (s.z).abs() <= 0.25);
        }
    }

    #[test]
    fn test_negative_radius_is_mirrored() {
        let jittered = LightRig::with_jitter(Vec3::ZERO, -0.5, 8, 3);
        assert_eq!(jittered, LightRig::with_jitter(Vec3::ZERO, 0.5, 8, 3));

        let grid = LightRig::with_grid(Vec3::ZERO, -0.5, 2);
        assert_eq!(grid.samples[0], Vec3::new(-0.5, 0.0, -0.5));
        assert_eq!(grid.samples[3], Vec3::new(0.5, 0.0, 0.5));
    }

    #[test]
    fn test_non_finite_radius_is_point() {
        let rig = LightRig::with_jitter(Vec3::Y, f32::NAN, 4, 1);
        assert!(rig.samples.iter().all(|&s| s == Vec3::Y));
        let rig = LightRig::with_grid(Vec3::Y, f32::INFINITY, 2);
        assert!(rig.samples.iter().all(|&s| s == Vec3::Y));
    }
}
