//! Recursive Whitted tracing: closest hit, then either local shading, a
//! mirror bounce, or a Fresnel-weighted reflection/refraction split.

use glint_core::{Colour, Scene, Triangle};
use glint_math::{Interval, Ray, Vec3};

use crate::config::RenderConfig;
use crate::intersect::{closest_intersection, HitFilter, Intersection};
use crate::optics::{fresnel, reflect, refract};
use crate::shading::shade;

/// Trace `ray` through `scene` and resolve the colour at its closest hit.
///
/// `depth` is the remaining bounce budget and `ior` the index of refraction
/// of the medium the ray is travelling through. A miss returns the sentinel
/// intersection with a black colour.
pub fn trace<'a>(
    scene: &'a Scene,
    ray: &Ray,
    ray_t: Interval,
    depth: u32,
    ior: f32,
    filter: HitFilter,
    config: &RenderConfig,
) -> Intersection<'a> {
    let mut hit = closest_intersection(&scene.triangles, ray, ray_t, filter);
    let Some(triangle) = hit.triangle else {
        return hit;
    };

    hit.colour = if config.refractive && triangle.refractive {
        dielectric_colour(scene, ray, &hit, triangle, depth, ior, config)
    } else if config.reflective && triangle.reflective {
        mirror_colour(scene, ray, &hit, triangle, depth, ior, config)
    } else {
        shade(scene, &hit, ray.direction(), config)
    };
    hit
}

/// Trace a secondary ray leaving the surface of `hit`.
fn bounce(
    scene: &Scene,
    hit: &Intersection,
    direction: Vec3,
    depth: u32,
    ior: f32,
    config: &RenderConfig,
) -> Colour {
    let ray = Ray::new(hit.point, direction);
    let ray_t = Interval::new(config.ray_bias, f32::INFINITY);
    trace(
        scene,
        &ray,
        ray_t,
        depth,
        ior,
        HitFilter::excluding(hit.triangle_index),
        config,
    )
    .colour
}

fn mirror_colour(
    scene: &Scene,
    ray: &Ray,
    hit: &Intersection,
    triangle: &Triangle,
    depth: u32,
    ior: f32,
    config: &RenderConfig,
) -> Colour {
    if depth == 0 {
        return Colour::BLACK;
    }
    let direction = reflect(ray.direction(), triangle.face_normal());
    bounce(scene, hit, direction, depth - 1, ior, config)
}

fn dielectric_colour(
    scene: &Scene,
    ray: &Ray,
    hit: &Intersection,
    triangle: &Triangle,
    depth: u32,
    ior: f32,
    config: &RenderConfig,
) -> Colour {
    if depth == 0 {
        return Colour::BLACK;
    }
    let d = ray.direction();
    let n = triangle.face_normal();

    // Against the normal: entering glass from the current medium. Along it:
    // leaving glass for the base medium, with the index ratio swapped by
    // `refract`/`fresnel`.
    let entering = d.dot(n) < 0.0;
    let (outside_ior, next_ior) = if entering {
        (ior, config.glass_ior)
    } else {
        (config.base_ior, config.base_ior)
    };
    let inside_ior = config.glass_ior;

    let reflected = bounce(scene, hit, reflect(d, n), depth - 1, ior, config);

    let (kr, refracted) = match refract(d, n, outside_ior, inside_ior) {
        Some(direction) => (
            fresnel(d, n, outside_ior, inside_ior),
            bounce(scene, hit, direction, depth - 1, next_ior, config),
        ),
        None => (1.0, Colour::BLACK),
    };

    Colour::from_linear(reflected.to_linear() * kr + refracted.to_linear() * (1.0 - kr))
}
