//! Ray/triangle intersection and the closest-hit search.
//!
//! Each test solves the 3x3 system `[-d | e0 | e1] * (t, u, v) = o - v0`,
//! giving the distance `t` along the ray and the barycentric edge
//! coefficients `(u, v)` of the hit. The closest-hit search is a linear scan
//! over the whole triangle set.

use glint_core::{Colour, Triangle};
use glint_math::{solve3, Interval, Mat3, Ray, Vec3};

/// Raw solution of the ray/triangle system.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Barycentric {
    /// Distance along the ray
    pub t: f32,
    /// Weight of edge v1 - v0
    pub u: f32,
    /// Weight of edge v2 - v0
    pub v: f32,
}

impl Barycentric {
    /// True if (u, v) lies inside the triangle, edges included, and `t`
    /// lies strictly inside `ray_t`.
    #[inline]
    pub fn is_valid(&self, ray_t: Interval) -> bool {
        Interval::UNIT.contains(self.u)
            && Interval::UNIT.contains(self.v)
            && self.u + self.v <= 1.0
            && ray_t.surrounds(self.t)
    }
}

/// Solve the intersection system for a ray and a triangle.
///
/// Returns `None` when the ray is parallel to the triangle's plane (singular
/// system). The solution is returned whether or not it lies inside the
/// triangle; see [`Barycentric::is_valid`].
#[inline]
pub fn solve_triangle(ray: &Ray, triangle: &Triangle) -> Option<Barycentric> {
    let (e0, e1) = triangle.edges();
    let system = Mat3::from_cols(-ray.direction(), e0, e1);
    let solution = solve3(system, ray.origin() - triangle.vertices[0])?;
    Some(Barycentric {
        t: solution.x,
        u: solution.y,
        v: solution.z,
    })
}

/// Intersect a ray with one triangle, keeping only valid hits within `ray_t`.
#[inline]
pub fn intersect_triangle(ray: &Ray, triangle: &Triangle, ray_t: Interval) -> Option<Barycentric> {
    solve_triangle(ray, triangle).filter(|hit| hit.is_valid(ray_t))
}

/// Result of a closest-hit query.
///
/// A miss is the sentinel state with an infinite `distance` and no
/// triangle; check [`Intersection::is_hit`] before using the other fields.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Intersection<'a> {
    /// World-space hit point
    pub point: Vec3,
    /// Distance from the ray origin
    pub distance: f32,
    /// Barycentric edge coefficients of the hit
    pub u: f32,
    pub v: f32,
    /// Index of the hit triangle in the scene's triangle set
    pub triangle_index: usize,
    /// The hit triangle
    pub triangle: Option<&'a Triangle>,
    /// Resolved colour and brightness (filled in by shading)
    pub colour: Colour,
}

impl<'a> Intersection<'a> {
    /// The "no hit" sentinel.
    pub fn miss() -> Self {
        Self {
            point: Vec3::ZERO,
            distance: f32::INFINITY,
            u: 0.0,
            v: 0.0,
            triangle_index: usize::MAX,
            triangle: None,
            colour: Colour::BLACK,
        }
    }

    /// True if this records a hit.
    #[inline]
    pub fn is_hit(&self) -> bool {
        self.distance.is_finite() && self.triangle.is_some()
    }
}

impl Default for Intersection<'_> {
    fn default() -> Self {
        Self::miss()
    }
}

/// Which triangles a query may hit.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct HitFilter {
    /// Triangle to skip (the surface a secondary ray leaves from)
    pub exclude: Option<usize>,
    /// Skip triangles whose face normal points away from the ray
    pub cull_backfaces: bool,
}

impl HitFilter {
    /// Filter for rays leaving the surface of triangle `index`.
    pub fn excluding(index: usize) -> Self {
        Self {
            exclude: Some(index),
            cull_backfaces: false,
        }
    }

    #[inline]
    fn skips(&self, index: usize, triangle: &Triangle, ray: &Ray) -> bool {
        if self.exclude == Some(index) {
            return true;
        }
        self.cull_backfaces && triangle.face_normal().dot(ray.direction()) > 0.0
    }
}

/// Find the closest valid hit of `ray` against `triangles`.
///
/// Scans every triangle, keeping the minimum `t` inside `ray_t`. The
/// returned colour is the hit triangle's base colour; shading resolves it.
pub fn closest_intersection<'a>(
    triangles: &'a [Triangle],
    ray: &Ray,
    ray_t: Interval,
    filter: HitFilter,
) -> Intersection<'a> {
    let mut result = Intersection::miss();

    for (index, triangle) in triangles.iter().enumerate() {
        if filter.skips(index, triangle, ray) {
            continue;
        }
        let Some(hit) = intersect_triangle(ray, triangle, ray_t.with_max(result.distance)) else {
            continue;
        };
        result = Intersection {
            point: triangle.point_at(hit.u, hit.v),
            distance: hit.t,
            u: hit.u,
            v: hit.v,
            triangle_index: index,
            triangle: Some(triangle),
            colour: triangle.colour,
        };
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Right triangle in the plane z = -1, legs along +X and +Y.
    fn facing_triangle() -> Triangle {
        Triangle::new(
            Vec3::new(0.0, 0.0, -1.0),
            Vec3::new(1.0, 0.0, -1.0),
            Vec3::new(0.0, 1.0, -1.0),
            Colour::new(200, 100, 50),
        )
    }

    fn down_z(x: f32, y: f32) -> Ray {
        Ray::new(Vec3::new(x, y, 0.0), Vec3::NEG_Z)
    }

    #[test]
    fn test_triangle_hit() {
        let hit = intersect_triangle(&down_z(0.25, 0.25), &facing_triangle(), Interval::FORWARD)
            .unwrap();
        assert!((hit.t - 1.0).abs() < 1e-6);
        assert!((hit.u - 0.25).abs() < 1e-6);
        assert!((hit.v - 0.25).abs() < 1e-6);
    }

    #[test]
    fn test_hit_point_reconstructs() {
        let tri = Triangle::new(
            Vec3::new(-1.0, -0.5, -3.0),
            Vec3::new(2.0, 0.0, -4.0),
            Vec3::new(0.5, 2.0, -2.5),
            Colour::WHITE,
        );
        let ray = Ray::new(Vec3::new(0.1, 0.2, 0.3), Vec3::new(0.05, 0.1, -1.0));
        let hit = solve_triangle(&ray, &tri).unwrap();
        let (e0, e1) = tri.edges();
        let on_plane = tri.vertices[0] + hit.u * e0 + hit.v * e1;
        assert!((on_plane - ray.at(hit.t)).length() < 1e-4);
        assert!(hit.is_valid(Interval::FORWARD));
    }

    #[test]
    fn test_triangle_miss() {
        // Outside the hypotenuse
        assert!(intersect_triangle(&down_z(0.75, 0.75), &facing_triangle(), Interval::FORWARD)
            .is_none());
        // Pointing away
        let away = Ray::new(Vec3::new(0.25, 0.25, 0.0), Vec3::Z);
        assert!(intersect_triangle(&away, &facing_triangle(), Interval::FORWARD).is_none());
    }

    #[test]
    fn test_edges_are_inclusive() {
        let tri = facing_triangle();
        // u = 0 edge
        let hit = intersect_triangle(&down_z(0.0, 0.5), &tri, Interval::FORWARD).unwrap();
        assert_eq!(hit.u, 0.0);
        // v = 0 edge
        let hit = intersect_triangle(&down_z(0.5, 0.0), &tri, Interval::FORWARD).unwrap();
        assert_eq!(hit.v, 0.0);
        // u + v = 1 edge
        let hit = intersect_triangle(&down_z(0.5, 0.5), &tri, Interval::FORWARD).unwrap();
        assert_eq!(hit.u + hit.v, 1.0);
    }

    #[test]
    fn test_parallel_ray_is_miss() {
        let grazing = Ray::new(Vec3::new(-1.0, 0.25, -1.0), Vec3::X);
        assert!(solve_triangle(&grazing, &facing_triangle()).is_none());
        let tris = [facing_triangle()];
        let hit = closest_intersection(&tris, &grazing, Interval::FORWARD, HitFilter::default());
        assert!(!hit.is_hit());
    }

    #[test]
    fn test_closest_of_many() {
        let near = facing_triangle();
        let mut far = facing_triangle();
        for v in &mut far.vertices {
            v.z = -3.0;
        }
        far.colour = Colour::new(1, 2, 3);
        let tris = vec![far, near];

        let hit = closest_intersection(&tris, &down_z(0.2, 0.2), Interval::FORWARD, HitFilter::default());
        assert!(hit.is_hit());
        assert_eq!(hit.triangle_index, 1);
        assert!((hit.distance - 1.0).abs() < 1e-6);
        assert!((hit.point - Vec3::new(0.2, 0.2, -1.0)).length() < 1e-6);
        assert_eq!(hit.colour, Colour::new(200, 100, 50));

        let hit = closest_intersection(&tris, &down_z(0.2, 0.2), Interval::FORWARD, HitFilter::excluding(1));
        assert_eq!(hit.triangle_index, 0);
        assert!((hit.distance - 3.0).abs() < 1e-6);
    }

    #[test]
    fn test_miss_sentinel() {
        let tris = [facing_triangle()];
        let hit = closest_intersection(&tris, &down_z(5.0, 5.0), Interval::FORWARD, HitFilter::default());
        assert!(!hit.is_hit());
        assert_eq!(hit.distance, f32::INFINITY);
        assert!(hit.triangle.is_none());
    }

    #[test]
    fn test_behind_origin_is_miss() {
        let behind = Ray::new(Vec3::new(0.25, 0.25, -2.0), Vec3::NEG_Z);
        let tris = [facing_triangle()];
        let hit = closest_intersection(&tris, &behind, Interval::FORWARD, HitFilter::default());
        assert!(!hit.is_hit());
    }

    #[test]
    fn test_backface_culling() {
        // Face normal of facing_triangle is +Z, towards the ray origin
        let tri = facing_triangle();
        let culled = HitFilter {
            exclude: None,
            cull_backfaces: true,
        };
        let tris = [tri];
        assert!(closest_intersection(&tris, &down_z(0.2, 0.2), Interval::FORWARD, culled).is_hit());

        let from_behind = Ray::new(Vec3::new(0.2, 0.2, -2.0), Vec3::Z);
        assert!(!closest_intersection(&tris, &from_behind, Interval::FORWARD, culled).is_hit());
        assert!(closest_intersection(&tris, &from_behind, Interval::FORWARD, HitFilter::default()).is_hit());
    }
}
