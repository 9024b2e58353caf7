//! JSON scene description: what to load, where to look from, how to render.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{ensure, Context, Result};
use glint_core::{Colour, LightRig, ModelOptions, NormalMap, Scene, Texture, MaterialKind};
use glint_math::Vec3;
use glint_renderer::{Camera, RenderConfig};
use serde::Deserialize;

/// Checker cells and colours used when no checker image is given.
const CHECKER_SIZE: u32 = 256;
const CHECKER_CELLS: u32 = 8;
const CHECKER_DARK: Colour = Colour::new(40, 40, 40);

/// Top-level scene file.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SceneDescription {
    pub name: String,
    pub width: u32,
    pub height: u32,
    pub camera: CameraDescription,
    pub light: LightDescription,
    pub models: Vec<ModelDescription>,
    pub textures: TextureDescription,
    /// Run the vertex-normal smoothing pass after loading
    pub smooth_normals: bool,
    /// Replace normals read from the files while smoothing
    pub force_smoothing: bool,
    pub render: RenderConfig,
}

impl Default for SceneDescription {
    fn default() -> Self {
        Self {
            name: "scene".to_string(),
            width: 640,
            height: 480,
            camera: CameraDescription::default(),
            light: LightDescription::default(),
            models: Vec::new(),
            textures: TextureDescription::default(),
            smooth_normals: true,
            force_smoothing: false,
            render: RenderConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CameraDescription {
    pub position: [f32; 3],
    /// Point to face; the camera looks down -Z when absent
    pub look_at: Option<[f32; 3]>,
    /// Vertical field of view in degrees
    pub vfov: f32,
    /// Degrees to orbit about the look-at target
    pub orbit: f32,
    /// Degrees to tilt about the camera's X axis, applied after aiming
    pub pitch: f32,
    /// Degrees to pan about the world Y axis, applied after aiming
    pub yaw: f32,
}

impl Default for CameraDescription {
    fn default() -> Self {
        Self {
            position: [0.0, 0.0, 4.0],
            look_at: None,
            vfov: 60.0,
            orbit: 0.0,
            pitch: 0.0,
            yaw: 0.0,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct LightDescription {
    pub position: [f32; 3],
    /// Half-size of the square area light used for soft shadows
    pub radius: f32,
    /// Number of soft-shadow samples (0 for a point light)
    pub samples: u32,
    /// Jitter samples with this seed instead of placing them on a grid
    pub seed: Option<u64>,
}

impl LightDescription {
    pub fn rig(&self) -> LightRig {
        let position = Vec3::from_array(self.position);
        if self.samples == 0 {
            return LightRig::new(position);
        }
        match self.seed {
            Some(seed) => LightRig::with_jitter(position, self.radius, self.samples, seed),
            None => {
                let per_side = (self.samples as f32).sqrt().round().max(1.0) as u32;
                LightRig::with_grid(position, self.radius, per_side)
            }
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ModelDescription {
    pub path: PathBuf,
    /// Material tag: cornell, checker, hackspace, sphere or bump
    pub material: MaterialKind,
    pub scale: f32,
    pub offset: [f32; 3],
    pub reflective: Option<bool>,
    pub refractive: Option<bool>,
    /// Colour for faces without an MTL diffuse colour
    pub colour: Option<[u8; 3]>,
}

impl Default for ModelDescription {
    fn default() -> Self {
        Self {
            path: PathBuf::new(),
            material: MaterialKind::default(),
            scale: 1.0,
            offset: [0.0; 3],
            reflective: None,
            refractive: None,
            colour: None,
        }
    }
}

impl ModelDescription {
    pub fn options(&self) -> ModelOptions {
        let mut options = ModelOptions::new(self.material);
        options.scale = self.scale;
        options.offset = Vec3::from_array(self.offset);
        options.reflective = self.reflective;
        options.refractive = self.refractive;
        if let Some([r, g, b]) = self.colour {
            options.fallback_colour = Colour::new(r, g, b);
        }
        options
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct TextureDescription {
    pub checker: Option<PathBuf>,
    pub hackspace: Option<PathBuf>,
    /// RGB-encoded normal map for the bump material
    pub bump: Option<PathBuf>,
}

impl SceneDescription {
    /// Parse a scene description from JSON text.
    pub fn from_json(json: &str) -> Result<Self> {
        let description: Self = serde_json::from_str(json).context("Invalid scene description")?;
        ensure!(
            description.width > 0 && description.height > 0,
            "Image size must be non-zero, got {}x{}",
            description.width,
            description.height
        );
        Ok(description)
    }

    /// Read and parse a scene file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let json = fs::read_to_string(path)
            .with_context(|| format!("Failed to read scene file {}", path.display()))?;
        Self::from_json(&json).with_context(|| format!("Failed to parse {}", path.display()))
    }

    /// Camera framed as described, at the output resolution.
    pub fn camera(&self) -> Camera {
        let mut camera = Camera::new()
            .with_resolution(self.width, self.height)
            .with_position(Vec3::from_array(self.camera.position))
            .with_vfov(self.camera.vfov);
        if let Some(target) = self.camera.look_at.map(Vec3::from_array) {
            if self.camera.orbit != 0.0 {
                camera.orbit(target, self.camera.orbit);
            } else {
                camera.look_at(target);
            }
        }
        if self.camera.yaw != 0.0 {
            camera.rotate_y(self.camera.yaw);
        }
        if self.camera.pitch != 0.0 {
            camera.rotate_x(self.camera.pitch);
        }
        camera
    }

    /// Load every model and texture. Relative paths resolve against `base_dir`.
    pub fn build_scene(&self, base_dir: &Path) -> Result<Scene> {
        let mut scene = Scene::new(self.name.clone(), self.light.rig());

        for model in &self.models {
            let path = base_dir.join(&model.path);
            let triangles = glint_core::load_obj(&path, &model.options())
                .with_context(|| format!("Failed to load model {}", path.display()))?;
            scene.add_triangles(triangles);
        }
        ensure!(scene.triangle_count() > 0, "Scene '{}' has no triangles", self.name);

        if let Some(path) = &self.textures.checker {
            scene.textures.checker = Some(load_texture(base_dir, path)?);
        } else if self.uses(MaterialKind::Checker) {
            log::info!("No checker texture given, using a procedural checkerboard");
            scene.textures.checker = Some(Texture::checkerboard(
                CHECKER_SIZE,
                CHECKER_SIZE,
                CHECKER_CELLS,
                Colour::WHITE,
                CHECKER_DARK,
            ));
        }
        if let Some(path) = &self.textures.hackspace {
            scene.textures.hackspace = Some(load_texture(base_dir, path)?);
        }
        if let Some(path) = &self.textures.bump {
            let path = base_dir.join(path);
            let map = NormalMap::load(&path)
                .with_context(|| format!("Failed to load normal map {}", path.display()))?;
            log::info!("Loaded normal map {} ({}x{})", path.display(), map.width, map.height);
            scene.textures.bump = Some(map);
        }

        if self.smooth_normals {
            scene.smooth_normals(self.force_smoothing);
        }

        log::info!(
            "Scene '{}': {} triangles ({} reflective, {} refractive), {} light samples",
            scene.name,
            scene.triangle_count(),
            scene.reflective_count(),
            scene.refractive_count(),
            scene.lights.samples.len()
        );
        Ok(scene)
    }

    fn uses(&self, material: MaterialKind) -> bool {
        self.models
            .iter()
            .any(|m| m.material == material)
    }
}

fn load_texture(base_dir: &Path, path: &Path) -> Result<Texture> {
    let path = base_dir.join(path);
    let texture =
        Texture::load(&path).with_context(|| format!("Failed to load texture {}", path.display()))?;
    log::info!("Loaded texture {} ({}x{})", path.display(), texture.width, texture.height);
    Ok(texture)
}

#[cfg(test)]
mod tests {
    use super::*;
    use glint_renderer::{ShadingMode, ShadowMode};

    fn temp_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("glint_cli_{}_{}", name, std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    const TRIANGLE_OBJ: &str = "v -1 -1 0\nv 1 -1 0\nv 0 1 0\nf 1 2 3\n";

    #[test]
    fn test_empty_object_gives_defaults() {
        let description = SceneDescription::from_json("{}").unwrap();
        assert_eq!((description.width, description.height), (640, 480));
        assert!(description.models.is_empty());
        assert!(description.smooth_normals);
        assert_eq!(description.render.max_depth, 5);
        assert_eq!(description.render.shadow_mode, ShadowMode::Hard);
    }

    #[test]
    fn test_full_description() {
        let json = r#"{
            "name": "cornell",
            "width": 320,
            "height": 240,
            "camera": { "position": [0, 1, 3], "look_at": [0, 1, 0], "vfov": 45 },
            "light": { "position": [0, 2, 0], "radius": 0.2, "samples": 9 },
            "models": [
                { "path": "box.obj", "material": "checker", "scale": 0.5, "refractive": true }
            ],
            "textures": { "bump": "normal.png" },
            "render": { "shadow_mode": "soft", "shading_mode": "phong", "anti_alias": true }
        }"#;
        let description = SceneDescription::from_json(json).unwrap();
        assert_eq!(description.name, "cornell");
        assert_eq!(description.camera.look_at, Some([0.0, 1.0, 0.0]));
        assert_eq!(description.light.rig().samples.len(), 9);

        let options = description.models[0].options();
        assert_eq!(options.material, MaterialKind::Checker);
        assert_eq!(options.scale, 0.5);
        assert_eq!(options.refractive, Some(true));
        assert_eq!(options.reflective, None);

        assert_eq!(description.textures.bump, Some(PathBuf::from("normal.png")));
        assert_eq!(description.render.shadow_mode, ShadowMode::Soft);
        assert_eq!(description.render.shading_mode, ShadingMode::Phong);
        assert!(description.render.anti_alias);
        // Untouched render settings keep their defaults
        assert_eq!(description.render.ambience, 0.15);
    }

    #[test]
    fn test_rejects_bad_input() {
        assert!(SceneDescription::from_json("not json").is_err());
        assert!(SceneDescription::from_json(r#"{ "width": 0 }"#).is_err());
        assert!(SceneDescription::from_json(r#"{ "render": { "shadow_mode": "fuzzy" } }"#).is_err());
        assert!(
            SceneDescription::from_json(r#"{ "models": [{ "path": "a.obj", "material": "marble" }] }"#)
                .is_err()
        );
    }

    #[test]
    fn test_model_defaults() {
        let description =
            SceneDescription::from_json(r#"{ "models": [{ "path": "a.obj" }] }"#).unwrap();
        let options = description.models[0].options();
        assert_eq!(options.material, MaterialKind::Cornell);
        assert_eq!(options.scale, 1.0);
        assert_eq!(options.fallback_colour, Colour::WHITE);
    }

    #[test]
    fn test_light_rigs() {
        let point = LightDescription {
            position: [1.0, 2.0, 3.0],
            ..Default::default()
        };
        let rig = point.rig();
        assert_eq!(rig.position, Vec3::new(1.0, 2.0, 3.0));
        assert!(rig.samples.is_empty());

        let jittered = LightDescription {
            radius: 0.5,
            samples: 7,
            seed: Some(3),
            ..point
        };
        assert_eq!(jittered.rig().samples.len(), 7);
        assert_eq!(jittered.rig(), jittered.rig());

        let mirrored = LightDescription {
            radius: -0.5,
            ..jittered.clone()
        };
        assert_eq!(mirrored.rig(), jittered.rig());
    }

    #[test]
    fn test_negative_radius_from_json() {
        let description = SceneDescription::from_json(
            r#"{ "light": { "position": [0, 2, 0], "radius": -0.25, "samples": 4 } }"#,
        )
        .unwrap();
        let rig = description.light.rig();
        assert_eq!(rig.samples.len(), 4);
        assert_eq!(rig.samples[0], Vec3::new(-0.25, 2.0, -0.25));
        assert_eq!(rig.samples[3], Vec3::new(0.25, 2.0, 0.25));
    }

    #[test]
    fn test_camera_faces_target() {
        let description = SceneDescription::from_json(
            r#"{ "width": 100, "height": 100, "camera": { "position": [3, 0, 3], "look_at": [0, 0, 0] } }"#,
        )
        .unwrap();
        let camera = description.camera();
        let forward = camera.ray_direction(50.0, 50.0);
        let expected = Vec3::new(-1.0, 0.0, -1.0).normalize();
        assert!((forward - expected).length() < 1e-4);
    }

    #[test]
    fn test_camera_pitch_and_yaw() {
        let description = SceneDescription::from_json(
            r#"{ "width": 100, "height": 100, "camera": { "position": [0, 0, 0], "yaw": 90, "pitch": 30 } }"#,
        )
        .unwrap();
        let camera = description.camera();
        let forward = camera.ray_direction(50.0, 50.0);
        // Yaw turns -Z to -X, pitch then tilts the view upwards
        let (sin, cos) = 30f32.to_radians().sin_cos();
        let expected = Vec3::new(-cos, sin, 0.0);
        assert!((forward - expected).length() < 1e-4);
    }

    #[test]
    fn test_build_scene_from_files() {
        let dir = temp_dir("build");
        fs::write(dir.join("tri.obj"), TRIANGLE_OBJ).unwrap();
        let description = SceneDescription::from_json(
            r#"{
                "light": { "position": [0, 0, 2] },
                "models": [{ "path": "tri.obj", "material": "checker", "colour": [10, 20, 30] }]
            }"#,
        )
        .unwrap();

        let scene = description.build_scene(&dir).unwrap();
        assert_eq!(scene.triangle_count(), 1);
        assert_eq!(scene.triangles[0].material, MaterialKind::Checker);
        assert_eq!(scene.triangles[0].colour, Colour::new(10, 20, 30));
        // Checker material without an image gets the procedural board
        assert!(scene.textures.checker.is_some());
        assert!(scene.textures.hackspace.is_none());
        // Smoothing fills in vertex normals
        assert!(scene.triangles[0].vertex_normals.is_some());
    }

    #[test]
    fn test_build_scene_errors() {
        let dir = temp_dir("errors");
        let missing = SceneDescription::from_json(r#"{ "models": [{ "path": "nope.obj" }] }"#).unwrap();
        assert!(missing.build_scene(&dir).is_err());

        let empty = SceneDescription::default();
        assert!(empty.build_scene(&dir).is_err());
    }
}
