//! Triangle records supplied to the renderer.

use glint_math::{Vec2, Vec3};

use crate::{Colour, MaterialKind};

/// Cross-product length below which a triangle is considered degenerate.
const DEGENERATE_EPSILON: f32 = 1e-12;

/// A single triangle of the scene.
///
/// Immutable during a render. `vertex_normals` is filled either from the
/// model file or by [`crate::smooth_vertex_normals`] before tracing starts.
#[derive(Debug, Clone, PartialEq)]
pub struct Triangle {
    /// Vertex positions
    pub vertices: [Vec3; 3],
    /// Per-vertex normals (optional)
    pub vertex_normals: Option<[Vec3; 3]>,
    /// Per-vertex texture coordinates
    pub tex_coords: [Vec2; 3],
    /// Base colour
    pub colour: Colour,
    /// Shading path
    pub material: MaterialKind,
    /// Mirror surface
    pub reflective: bool,
    /// Dielectric (glass) surface
    pub refractive: bool,
}

impl Triangle {
    /// Create a plain `cornell` triangle with the given base colour.
    pub fn new(v0: Vec3, v1: Vec3, v2: Vec3, colour: Colour) -> Self {
        Self {
            vertices: [v0, v1, v2],
            vertex_normals: None,
            tex_coords: [Vec2::ZERO; 3],
            colour,
            material: MaterialKind::Cornell,
            reflective: false,
            refractive: false,
        }
    }

    pub fn with_material(mut self, material: MaterialKind) -> Self {
        self.material = material;
        self
    }

    pub fn with_tex_coords(mut self, tex_coords: [Vec2; 3]) -> Self {
        self.tex_coords = tex_coords;
        self
    }

    pub fn with_vertex_normals(mut self, normals: [Vec3; 3]) -> Self {
        self.vertex_normals = Some(normals.map(|n| n.normalize_or_zero()));
        self
    }

    pub fn with_reflective(mut self, reflective: bool) -> Self {
        self.reflective = reflective;
        self
    }

    pub fn with_refractive(mut self, refractive: bool) -> Self {
        self.refractive = refractive;
        self
    }

    /// Edge vectors from vertex 0: (v1 - v0, v2 - v0).
    #[inline]
    pub fn edges(&self) -> (Vec3, Vec3) {
        (
            self.vertices[1] - self.vertices[0],
            self.vertices[2] - self.vertices[0],
        )
    }

    /// Unit face normal, `normalize(e0 x e1)`. Zero for a degenerate triangle.
    #[inline]
    pub fn face_normal(&self) -> Vec3 {
        let (e0, e1) = self.edges();
        e0.cross(e1).normalize_or_zero()
    }

    /// True if the vertices are (nearly) collinear.
    pub fn is_degenerate(&self) -> bool {
        let (e0, e1) = self.edges();
        e0.cross(e1).length_squared() < DEGENERATE_EPSILON
    }

    /// Normal at vertex `i`, falling back to the face normal.
    pub fn vertex_normal(&self, i: usize) -> Vec3 {
        match &self.vertex_normals {
            Some(normals) => normals[i],
            None => self.face_normal(),
        }
    }

    /// Point at barycentric edge coefficients (u, v): v0 + u*e0 + v*e1.
    #[inline]
    pub fn point_at(&self, u: f32, v: f32) -> Vec3 {
        let (e0, e1) = self.edges();
        self.vertices[0] + u * e0 + v * e1
    }

    /// Texture coordinate at (u, v), interpolated with the same weights as the hit.
    pub fn tex_coord_at(&self, u: f32, v: f32) -> Vec2 {
        let w = 1.0 - u - v;
        w * self.tex_coords[0] + u * self.tex_coords[1] + v * self.tex_coords[2]
    }

    /// Interpolated vertex normal at (u, v), renormalized.
    pub fn smooth_normal_at(&self, u: f32, v: f32) -> Vec3 {
        let w = 1.0 - u - v;
        let n = w * self.vertex_normal(0) + u * self.vertex_normal(1) + v * self.vertex_normal(2);
        let n = n.normalize_or_zero();
        if n == Vec3::ZERO {
            self.face_normal()
        } else {
            n
        }
    }
}
