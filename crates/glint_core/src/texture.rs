//! Texture and normal-map buffers for textured and bump-mapped materials.
//!
//! Textures are stored as flat buffers indexed by `x + y * width`, the layout
//! the renderer's texel lookups expect. Images are decoded with the `image`
//! crate; nothing here is sampled with filtering.

use std::path::Path;

use glint_math::{Vec2, Vec3};
use thiserror::Error;

use crate::{Colour, MaterialKind};

/// Errors that can occur during texture loading.
#[derive(Error, Debug)]
pub enum TextureError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image decoding error: {0}")]
    ImageError(#[from] image::ImageError),

    #[error("Pixel buffer has {actual} entries, expected {expected} for {width}x{height}")]
    SizeMismatch {
        width: u32,
        height: u32,
        expected: usize,
        actual: usize,
    },

    #[error("Texture has zero size")]
    Empty,
}

pub type TextureResult<T> = Result<T, TextureError>;

/// Map texture coordinates to an integer pixel position.
///
/// `u` runs left to right and `v` bottom to top (OBJ convention), so the row
/// is flipped. Coordinates outside [0, 1] give `None`.
fn texel_position(width: u32, height: u32, tc: Vec2) -> Option<(u32, u32)> {
    if !tc.is_finite() || !(0.0..=1.0).contains(&tc.x) || !(0.0..=1.0).contains(&tc.y) {
        return None;
    }
    let x = (tc.x * (width - 1) as f32).round() as u32;
    let y = ((1.0 - tc.y) * (height - 1) as f32).round() as u32;
    (x < width && y < height).then_some((x, y))
}

fn check_size(width: u32, height: u32, actual: usize) -> TextureResult<()> {
    if width == 0 || height == 0 {
        return Err(TextureError::Empty);
    }
    let expected = width as usize * height as usize;
    if actual != expected {
        return Err(TextureError::SizeMismatch {
            width,
            height,
            expected,
            actual,
        });
    }
    Ok(())
}

/// A colour texture of packed 0xAARRGGBB pixels.
#[derive(Clone, Debug)]
pub struct Texture {
    /// Texture width in pixels
    pub width: u32,

    /// Texture height in pixels
    pub height: u32,

    /// Packed pixels, row-major, indexed by `x + y * width`
    pub pixels: Vec<u32>,

    /// Original file path (for debugging)
    pub path: String,
}

impl Texture {
    /// Create a new texture from packed pixel data.
    pub fn new(
        width: u32,
        height: u32,
        pixels: Vec<u32>,
        path: impl Into<String>,
    ) -> TextureResult<Self> {
        check_size(width, height, pixels.len())?;
        Ok(Self {
            width,
            height,
            pixels,
            path: path.into(),
        })
    }

    /// Procedural checkerboard of `cells` x `cells` squares.
    pub fn checkerboard(width: u32, height: u32, cells: u32, a: Colour, b: Colour) -> Self {
        let width = width.max(1);
        let height = height.max(1);
        let cells = cells.max(1);
        let (a, b) = (a.pack(), b.pack());
        let pixels = (0..height)
            .flat_map(|y| {
                (0..width).map(move |x| {
                    let cx = x * cells / width;
                    let cy = y * cells / height;
                    if (cx + cy) % 2 == 0 {
                        a
                    } else {
                        b
                    }
                })
            })
            .collect();
        Self {
            width,
            height,
            pixels,
            path: "<checkerboard>".to_string(),
        }
    }

    /// Load a texture from an image file.
    pub fn load<P: AsRef<Path>>(path: P) -> TextureResult<Self> {
        let path = path.as_ref();
        let rgba = image::open(path)?.to_rgba8();
        let (width, height) = rgba.dimensions();
        let pixels = rgba
            .pixels()
            .map(|p| crate::colour::pack_argb(p[0], p[1], p[2]))
            .collect();

        let texture = Self::new(width, height, pixels, path.to_string_lossy())?;
        log::debug!(
            "Loaded texture: {} ({}x{})",
            texture.path,
            texture.width,
            texture.height
        );
        Ok(texture)
    }

    /// Get the packed pixel at integer coordinates, or `None` out of bounds.
    pub fn texel(&self, x: u32, y: u32) -> Option<u32> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.pixels.get((x + y * self.width) as usize).copied()
    }

    /// Look up the colour at texture coordinates, or `None` if out of range.
    pub fn colour_at(&self, tc: Vec2) -> Option<Colour> {
        let (x, y) = texel_position(self.width, self.height, tc)?;
        self.texel(x, y).map(Colour::from_packed)
    }
}

/// A precomputed normal buffer for bump mapping.
///
/// Texels decode to world-space normals; there is no tangent frame.
#[derive(Clone, Debug)]
pub struct NormalMap {
    pub width: u32,
    pub height: u32,
    /// Unit normals, row-major, indexed by `x + y * width`
    pub normals: Vec<Vec3>,
}

impl NormalMap {
    /// Create a normal map from raw normals (normalized on the way in).
    pub fn new(width: u32, height: u32, normals: Vec<Vec3>) -> TextureResult<Self> {
        check_size(width, height, normals.len())?;
        Ok(Self {
            width,
            height,
            normals: normals.into_iter().map(|n| n.normalize_or_zero()).collect(),
        })
    }

    /// Decode an RGB normal-map texture: each channel maps 0..255 to -1..1.
    pub fn from_texture(texture: &Texture) -> Self {
        let normals = texture
            .pixels
            .iter()
            .map(|&argb| {
                let c = Colour::from_packed(argb);
                let n = Vec3::new(c.red as f32, c.green as f32, c.blue as f32) * (2.0 / 255.0)
                    - Vec3::ONE;
                n.normalize_or_zero()
            })
            .collect();
        Self {
            width: texture.width,
            height: texture.height,
            normals,
        }
    }

    /// Load and decode a normal-map image.
    pub fn load<P: AsRef<Path>>(path: P) -> TextureResult<Self> {
        Ok(Self::from_texture(&Texture::load(path)?))
    }

    /// Look up the normal at texture coordinates, or `None` if out of range
    /// or if the stored normal is degenerate.
    pub fn normal_at(&self, tc: Vec2) -> Option<Vec3> {
        let (x, y) = texel_position(self.width, self.height, tc)?;
        self.normals
            .get((x + y * self.width) as usize)
            .copied()
            .filter(|n| *n != Vec3::ZERO)
    }
}

/// The texture buffers available to textured and bump materials.
#[derive(Clone, Debug, Default)]
pub struct TextureSet {
    pub checker: Option<Texture>,
    pub hackspace: Option<Texture>,
    pub bump: Option<NormalMap>,
}

impl TextureSet {
    /// Colour texture used by a material, if it has one.
    pub fn colour_texture(&self, material: MaterialKind) -> Option<&Texture> {
        match material {
            MaterialKind::Checker => self.checker.as_ref(),
            MaterialKind::Hackspace => self.hackspace.as_ref(),
            _ => None,
        }
    }
}
