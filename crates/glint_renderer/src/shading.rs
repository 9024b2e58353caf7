//! Local shading model: inverse-square diffuse lighting, optional specular
//! highlight, ambient floor, shadow attenuation and the per-material colour
//! source.

use std::f32::consts::PI;

use glint_core::{Colour, MaterialKind, Scene, Triangle};
use glint_math::Vec3;

use crate::config::{RenderConfig, ShadingMode};
use crate::intersect::Intersection;
use crate::optics::reflect;
use crate::shadow;

/// Surface normal and diffuse factor at a hit, for one material path.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Lighting {
    /// Normal used for the specular term
    normal: Vec3,
    /// Cosine term in [0, 1]
    diffuse: f32,
}

/// Inverse-square falloff: `intensity / (k * pi * d^2)`.
#[inline]
pub fn falloff(distance: f32, config: &RenderConfig) -> f32 {
    config.intensity / (config.falloff * PI * distance * distance)
}

/// Shade a hit as seen along `ray_dir`, returning the surface colour with
/// its final brightness in [ambience, 1].
pub fn shade(scene: &Scene, hit: &Intersection, ray_dir: Vec3, config: &RenderConfig) -> Colour {
    let Some(triangle) = hit.triangle else {
        return Colour::BLACK;
    };
    let light = scene.lights.position;

    let to_light = light - hit.point;
    let distance = to_light.length();
    let light_dir = to_light.normalize_or_zero();

    let lighting = lighting(scene, triangle, hit, ray_dir, light, light_dir, config);

    let mut brightness = falloff(distance, config) * lighting.diffuse;

    if config.reflective {
        brightness += specular(lighting.normal, light_dir, ray_dir, config);
    }

    brightness = config.clamp_brightness(brightness);

    brightness = shadow::attenuate(
        brightness,
        &scene.triangles,
        hit.point,
        hit.triangle_index,
        light,
        scene.lights.sample_positions(),
        config,
    );

    surface_colour(scene, triangle, hit).with_brightness(brightness.min(1.0))
}

/// Specular term `strength * max(0, -d . r)^shininess`, with `r` the light
/// direction reflected about the normal.
#[inline]
pub fn specular(normal: Vec3, light_dir: Vec3, ray_dir: Vec3, config: &RenderConfig) -> f32 {
    let reflected = reflect(-light_dir, normal);
    let alignment = (-ray_dir).dot(reflected).max(0.0);
    config.specular_strength * alignment.powf(config.shininess)
}

/// Flip `n` to face against the incoming ray.
#[inline]
fn face_forward(n: Vec3, ray_dir: Vec3) -> Vec3 {
    if n.dot(ray_dir) > 0.0 {
        -n
    } else {
        n
    }
}

fn lighting(
    scene: &Scene,
    triangle: &Triangle,
    hit: &Intersection,
    ray_dir: Vec3,
    light: Vec3,
    light_dir: Vec3,
    config: &RenderConfig,
) -> Lighting {
    let face = triangle.face_normal();
    // +1 if the stored winding already faces the viewer
    let side = if face.dot(ray_dir) > 0.0 { -1.0 } else { 1.0 };
    let flat = Lighting {
        normal: face * side,
        diffuse: (face * side).dot(light_dir).max(0.0),
    };

    match triangle.material {
        MaterialKind::Cornell | MaterialKind::Checker | MaterialKind::Hackspace => flat,
        MaterialKind::Sphere => match config.shading_mode {
            ShadingMode::Flat => flat,
            ShadingMode::Gouraud => gouraud(triangle, hit, side, light),
            ShadingMode::Phong => {
                let normal = triangle.smooth_normal_at(hit.u, hit.v) * side;
                Lighting {
                    normal,
                    diffuse: normal.dot(light_dir).max(0.0),
                }
            }
        },
        MaterialKind::Bump => {
            let tc = triangle.tex_coord_at(hit.u, hit.v);
            match scene.textures.bump.as_ref().and_then(|map| map.normal_at(tc)) {
                Some(bumped) => {
                    let normal = face_forward(bumped, ray_dir);
                    Lighting {
                        normal,
                        diffuse: normal.dot(light_dir).max(0.0),
                    }
                }
                None => flat,
            }
        }
    }
}

/// Per-vertex cosine terms interpolated with the hit's barycentric weights.
fn gouraud(triangle: &Triangle, hit: &Intersection, side: f32, light: Vec3) -> Lighting {
    let weights = [1.0 - hit.u - hit.v, hit.u, hit.v];
    let mut diffuse = 0.0;
    for (i, weight) in weights.into_iter().enumerate() {
        let normal = triangle.vertex_normal(i) * side;
        let to_light = (light - triangle.vertices[i]).normalize_or_zero();
        diffuse += weight * normal.dot(to_light).max(0.0);
    }
    Lighting {
        normal: triangle.smooth_normal_at(hit.u, hit.v) * side,
        diffuse: diffuse.clamp(0.0, 1.0),
    }
}

/// Base colour, or the texel for textured materials when one is available.
fn surface_colour(scene: &Scene, triangle: &Triangle, hit: &Intersection) -> Colour {
    if !triangle.material.is_textured() {
        return triangle.colour;
    }
    let tc = triangle.tex_coord_at(hit.u, hit.v);
    scene
        .textures
        .colour_texture(triangle.material)
        .and_then(|texture| texture.colour_at(tc))
        .unwrap_or(triangle.colour)
}
