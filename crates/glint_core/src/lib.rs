//! Glint Core - scene data for the glint software renderer.
//!
//! This crate provides:
//!
//! - **Scene types**: `Triangle`, `Colour`, `MaterialKind`, `LightRig`, `Scene`
//! - **Asset loading**: OBJ/MTL meshes (via `tobj`) and textures (via `image`)
//! - **Preprocessing**: the vertex-normal smoothing pass run before tracing
//!
//! # Example
//!
//! ```ignore
//! use glint_core::{load_obj, ModelOptions, MaterialKind, Scene, LightRig};
//!
//! let mut scene = Scene::new("cornell", LightRig::new(Vec3::new(0.0, 1.2, -0.6)));
//! scene.add_triangles(load_obj("cornell-box.obj", &ModelOptions::new(MaterialKind::Cornell))?);
//! scene.smooth_normals(false);
//! ```

pub mod colour;
pub mod light;
pub mod loader;
pub mod material;
pub mod mesh;
pub mod scene;
pub mod texture;
pub mod triangle;

// Re-export commonly used types
pub use colour::Colour;
pub use light::LightRig;
pub use loader::{load_obj, LoadError, LoadResult, ModelOptions};
pub use material::MaterialKind;
pub use mesh::smooth_vertex_normals;
pub use scene::Scene;
pub use texture::{NormalMap, Texture, TextureError, TextureResult, TextureSet};
pub use triangle::Triangle;
