//! OBJ/MTL model loading.
//!
//! Models are loaded with `tobj` (triangulated, single index) and flattened
//! into independent [`Triangle`] records carrying colour, texture
//! coordinates, optional file normals and the material tag of the model.

use std::path::Path;

use glint_math::{Vec2, Vec3};
use thiserror::Error;

use crate::material::UnknownMaterial;
use crate::{Colour, MaterialKind, Triangle};

/// Errors that can occur during scene loading.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("OBJ parse error: {0}")]
    Obj(#[from] tobj::LoadError),

    #[error(transparent)]
    Material(#[from] UnknownMaterial),

    #[error("No geometry found in {0}")]
    NoGeometry(String),
}

/// Result type for loading operations.
pub type LoadResult<T> = Result<T, LoadError>;

/// MTL `illum` models that request ray-traced reflection.
const ILLUM_REFLECTIVE: &[u8] = &[3];
/// MTL `illum` models that request refraction (glass).
const ILLUM_REFRACTIVE: &[u8] = &[4, 6, 7, 9];

/// Per-model import settings.
#[derive(Clone, Debug, PartialEq)]
pub struct ModelOptions {
    /// Material tag given to every triangle of the model
    pub material: MaterialKind,
    /// Uniform scale applied to positions
    pub scale: f32,
    /// Translation applied after scaling
    pub offset: Vec3,
    /// Forces the reflective flag, overriding the MTL `illum` value
    pub reflective: Option<bool>,
    /// Forces the refractive flag, overriding the MTL `illum` value
    pub refractive: Option<bool>,
    /// Colour for faces without a usable material
    pub fallback_colour: Colour,
}

impl ModelOptions {
    pub fn new(material: MaterialKind) -> Self {
        Self {
            material,
            scale: 1.0,
            offset: Vec3::ZERO,
            reflective: None,
            refractive: None,
            fallback_colour: Colour::WHITE,
        }
    }

    /// Options for a model whose material is named by a scene-file tag.
    pub fn from_tag(tag: &str) -> LoadResult<Self> {
        Ok(Self::new(tag.parse()?))
    }
}

impl Default for ModelOptions {
    fn default() -> Self {
        Self::new(MaterialKind::default())
    }
}

/// Surface properties taken from an MTL material.
#[derive(Clone, Copy, Debug)]
struct Surface {
    colour: Colour,
    reflective: bool,
    refractive: bool,
}

impl Surface {
    fn from_mtl(material: &tobj::Material, fallback: Colour) -> Self {
        let illum = material.illumination_model.unwrap_or(0);
        Self {
            colour: material
                .diffuse
                .map(Colour::from_unit_rgb)
                .unwrap_or(fallback),
            reflective: ILLUM_REFLECTIVE.contains(&illum),
            refractive: ILLUM_REFRACTIVE.contains(&illum),
        }
    }
}

/// Load an OBJ file (and the MTL it references) into triangles.
pub fn load_obj<P: AsRef<Path>>(path: P, options: &ModelOptions) -> LoadResult<Vec<Triangle>> {
    let path = path.as_ref();
    let (models, materials) = tobj::load_obj(
        path,
        &tobj::LoadOptions {
            single_index: true,
            triangulate: true,
            ..Default::default()
        },
    )?;

    let materials = match materials {
        Ok(materials) => materials,
        Err(e) => {
            log::warn!(
                "No materials for {} ({}), using fallback colour",
                path.display(),
                e
            );
            Vec::new()
        }
    };

    let fallback = Surface {
        colour: options.fallback_colour,
        reflective: false,
        refractive: false,
    };
    let surfaces: Vec<Surface> = materials
        .iter()
        .map(|m| Surface::from_mtl(m, options.fallback_colour))
        .collect();

    let mut triangles = Vec::new();
    for model in &models {
        let surface = model
            .mesh
            .material_id
            .and_then(|id| surfaces.get(id).copied())
            .unwrap_or(fallback);
        let before = triangles.len();
        append_mesh(&model.mesh, surface, options, &mut triangles);
        log::debug!(
            "Model '{}': {} triangles, colour {:?}",
            model.name,
            triangles.len() - before,
            surface.colour
        );
    }

    if triangles.is_empty() {
        return Err(LoadError::NoGeometry(path.display().to_string()));
    }

    log::info!(
        "Loaded {} triangles from {} ({} models, {} materials) as '{}'",
        triangles.len(),
        path.display(),
        models.len(),
        materials.len(),
        options.material
    );

    Ok(triangles)
}

fn append_mesh(
    mesh: &tobj::Mesh,
    surface: Surface,
    options: &ModelOptions,
    out: &mut Vec<Triangle>,
) {
    let vertex_count = mesh.positions.len() / 3;
    let has_normals = mesh.normals.len() == mesh.positions.len();
    let has_tex_coords = mesh.texcoords.len() / 2 == vertex_count;

    let position = |i: usize| {
        Vec3::from_slice(&mesh.positions[i * 3..i * 3 + 3]) * options.scale + options.offset
    };
    let normal = |i: usize| Vec3::from_slice(&mesh.normals[i * 3..i * 3 + 3]);
    let tex_coord = |i: usize| Vec2::from_slice(&mesh.texcoords[i * 2..i * 2 + 2]);

    for face in mesh.indices.chunks_exact(3) {
        let idx = [face[0] as usize, face[1] as usize, face[2] as usize];

        // Bounds check
        if idx.iter().any(|&i| i >= vertex_count) {
            log::warn!(
                "Invalid triangle indices: {:?}, vertex count: {}",
                idx,
                vertex_count
            );
            continue;
        }

        let mut tri = Triangle::new(position(idx[0]), position(idx[1]), position(idx[2]), surface.colour)
            .with_material(options.material)
            .with_reflective(options.reflective.unwrap_or(surface.reflective))
            .with_refractive(options.refractive.unwrap_or(surface.refractive));

        if has_tex_coords {
            tri = tri.with_tex_coords(idx.map(tex_coord));
        }
        if has_normals {
            tri = tri.with_vertex_normals(idx.map(normal));
        }

        out.push(tri);
    }
}
