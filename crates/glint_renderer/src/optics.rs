//! Mirror reflection, Snell refraction and the Fresnel split between them.
//!
//! Directions are unit vectors pointing along the ray (towards the surface
//! for incident rays). Normals are unit face normals in either orientation;
//! each function works out whether the ray is entering or leaving.

use glint_math::Vec3;

/// Reflect `d` about the plane with normal `n`: `d - 2 (d . n) n`.
#[inline]
pub fn reflect(d: Vec3, n: Vec3) -> Vec3 {
    d - 2.0 * d.dot(n) * n
}

/// Refract `d` through a boundary with normal `n` between media with
/// indices `outside_ior` (the side `n` points into) and `inside_ior`.
///
/// If the ray is leaving (travelling along `n`), the normal is flipped and
/// the ratio of indices swapped. Returns `None` on total internal reflection.
pub fn refract(d: Vec3, n: Vec3, outside_ior: f32, inside_ior: f32) -> Option<Vec3> {
    let mut cos_i = d.dot(n).clamp(-1.0, 1.0);
    let (normal, eta_i, eta_t) = if cos_i < 0.0 {
        cos_i = -cos_i;
        (n, outside_ior, inside_ior)
    } else {
        (-n, inside_ior, outside_ior)
    };

    let eta = eta_i / eta_t;
    let k = 1.0 - eta * eta * (1.0 - cos_i * cos_i);
    if k < 0.0 {
        return None;
    }
    Some((eta * d + (eta * cos_i - k.sqrt()) * normal).normalize())
}

/// Fraction of light reflected at a dielectric boundary (unpolarised
/// Fresnel equations). Returns 1.0 on total internal reflection.
pub fn fresnel(d: Vec3, n: Vec3, outside_ior: f32, inside_ior: f32) -> f32 {
    let cos_i = d.dot(n).clamp(-1.0, 1.0);
    let (eta_i, eta_t) = if cos_i > 0.0 {
        (inside_ior, outside_ior)
    } else {
        (outside_ior, inside_ior)
    };

    let sin_t = eta_i / eta_t * (1.0 - cos_i * cos_i).max(0.0).sqrt();
    if sin_t >= 1.0 {
        return 1.0;
    }

    let cos_t = (1.0 - sin_t * sin_t).max(0.0).sqrt();
    let cos_i = cos_i.abs();
    let r_s = (eta_t * cos_i - eta_i * cos_t) / (eta_t * cos_i + eta_i * cos_t);
    let r_p = (eta_i * cos_i - eta_t * cos_t) / (eta_i * cos_i + eta_t * cos_t);
    ((r_s * r_s + r_p * r_p) / 2.0).clamp(0.0, 1.0)
}
