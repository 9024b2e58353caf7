//! The fully loaded, immutable scene handed to the renderer.

use crate::{smooth_vertex_normals, LightRig, TextureSet, Triangle};

/// Everything the ray tracer reads during a frame.
///
/// Built once by the loaders; the renderer only ever borrows it immutably,
/// so one `Scene` can be shared across all worker threads.
#[derive(Clone, Debug)]
pub struct Scene {
    /// Scene name (usually the description file stem)
    pub name: String,

    /// Ordered triangle set; indices are stable for the life of the scene
    pub triangles: Vec<Triangle>,

    /// Texture and normal-map buffers
    pub textures: TextureSet,

    /// Light position and soft-shadow samples
    pub lights: LightRig,
}

impl Scene {
    /// Create an empty scene.
    pub fn new(name: impl Into<String>, lights: LightRig) -> Self {
        Self {
            name: name.into(),
            triangles: Vec::new(),
            textures: TextureSet::default(),
            lights,
        }
    }

    /// Append triangles, dropping degenerate ones.
    pub fn add_triangles(&mut self, triangles: impl IntoIterator<Item = Triangle>) {
        let before = self.triangles.len();
        let mut dropped = 0usize;
        for tri in triangles {
            if tri.is_degenerate() {
                dropped += 1;
            } else {
                self.triangles.push(tri);
            }
        }
        if dropped > 0 {
            log::warn!("Dropped {} degenerate triangles", dropped);
        }
        log::debug!(
            "Scene '{}': added {} triangles ({} total)",
            self.name,
            self.triangles.len() - before,
            self.triangles.len()
        );
    }

    /// Run the vertex-normal smoothing pass over every triangle.
    pub fn smooth_normals(&mut self, overwrite: bool) {
        smooth_vertex_normals(&mut self.triangles, overwrite);
    }

    /// Get the number of triangles.
    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }

    /// Number of mirror triangles.
    pub fn reflective_count(&self) -> usize {
        self.triangles.iter().filter(|t| t.reflective).count()
    }

    /// Number of glass triangles.
    pub fn refractive_count(&self) -> usize {
        self.triangles.iter().filter(|t| t.refractive).count()
    }
}
