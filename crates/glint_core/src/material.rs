//! Material tags that select a shading path.

use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

/// The shading path a triangle takes.
///
/// Resolved once when a model is loaded; the renderer dispatches on the
/// variant instead of comparing names per intersection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MaterialKind {
    /// Plain diffuse surface using its base colour and face normal.
    #[default]
    Cornell,
    /// Colour fetched from the checker texture.
    Checker,
    /// Colour fetched from the hackspace logo texture.
    Hackspace,
    /// Base colour with interpolated (Gouraud/Phong) normals.
    Sphere,
    /// Base colour with normals perturbed by the bump normal map.
    Bump,
}

impl MaterialKind {
    pub const ALL: [MaterialKind; 5] = [
        MaterialKind::Cornell,
        MaterialKind::Checker,
        MaterialKind::Hackspace,
        MaterialKind::Sphere,
        MaterialKind::Bump,
    ];

    /// Tag used in scene files.
    pub fn as_str(&self) -> &'static str {
        match self {
            MaterialKind::Cornell => "cornell",
            MaterialKind::Checker => "checker",
            MaterialKind::Hackspace => "hackspace",
            MaterialKind::Sphere => "sphere",
            MaterialKind::Bump => "bump",
        }
    }

    /// True if surface colour comes from a texture rather than the base colour.
    pub fn is_textured(&self) -> bool {
        matches!(self, MaterialKind::Checker | MaterialKind::Hackspace)
    }
}

impl fmt::Display for MaterialKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a material tag is not recognised.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown material tag: {0}")]
pub struct UnknownMaterial(pub String);

impl FromStr for MaterialKind {
    type Err = UnknownMaterial;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let tag = s.trim().to_ascii_lowercase();
        MaterialKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == tag)
            .ok_or_else(|| UnknownMaterial(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_tags() {
        assert_eq!("cornell".parse::<MaterialKind>(), Ok(MaterialKind::Cornell));
        assert_eq!(" Checker ".parse::<MaterialKind>(), Ok(MaterialKind::Checker));
        assert_eq!("BUMP".parse::<MaterialKind>(), Ok(MaterialKind::Bump));
        assert!("marble".parse::<MaterialKind>().is_err());
    }

    #[test]
    fn test_round_trip_display() {
        for kind in MaterialKind::ALL {
            assert_eq!(kind.to_string().parse::<MaterialKind>(), Ok(kind));
        }
    }

    #[test]
    fn test_textured() {
        assert!(MaterialKind::Checker.is_textured());
        assert!(MaterialKind::Hackspace.is_textured());
        assert!(!MaterialKind::Bump.is_textured());
        assert!(!MaterialKind::Sphere.is_textured());
    }
}
