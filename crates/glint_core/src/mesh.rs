//! Vertex-normal smoothing pass.
//!
//! Triangles arrive as independent records, so shared vertices are found by
//! exact position match. Run once after loading and before tracing.

use std::collections::HashMap;

use glint_math::Vec3;

use crate::Triangle;

/// Hashable key for an exact vertex position.
fn position_key(p: Vec3) -> [u32; 3] {
    // Fold -0.0 into 0.0 so both hash the same
    [p.x + 0.0, p.y + 0.0, p.z + 0.0].map(f32::to_bits)
}

/// Compute smooth vertex normals by averaging face normals.
///
/// Each vertex normal becomes the normalized average of the face normals of
/// every triangle sharing that vertex position. Triangles that already carry
/// normals (for example from the model file) keep them unless `overwrite`.
/// Degenerate triangles contribute nothing and receive their own (zero) face
/// normal fallback at shading time.
pub fn smooth_vertex_normals(triangles: &mut [Triangle], overwrite: bool) {
    let mut accumulated: HashMap<[u32; 3], Vec3> = HashMap::new();
    let mut skipped = 0usize;

    // Accumulate face normals at each shared position
    for tri in triangles.iter() {
        if tri.is_degenerate() {
            skipped += 1;
            continue;
        }
        let face_normal = tri.face_normal();
        for vertex in tri.vertices {
            *accumulated.entry(position_key(vertex)).or_insert(Vec3::ZERO) += face_normal;
        }
    }

    if skipped > 0 {
        log::debug!("Smoothing skipped {} degenerate triangles", skipped);
    }

    let mut updated = 0usize;
    for tri in triangles.iter_mut() {
        if tri.vertex_normals.is_some() && !overwrite {
            continue;
        }
        if tri.is_degenerate() {
            continue;
        }
        let face_normal = tri.face_normal();
        let normals = tri.vertices.map(|vertex| {
            accumulated
                .get(&position_key(vertex))
                .map(|sum| sum.normalize_or_zero())
                .filter(|n| *n != Vec3::ZERO)
                .unwrap_or(face_normal)
        });
        tri.vertex_normals = Some(normals);
        updated += 1;
    }

    log::debug!(
        "Smoothed vertex normals for {} of {} triangles ({} shared positions)",
        updated,
        triangles.len(),
        accumulated.len()
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Colour;

    /// Two triangles folded 90 degrees along the shared edge x = 0.
    fn folded_pair() -> Vec<Triangle> {
        vec![
            // Floor, normal +Y
            Triangle::new(
                Vec3::new(0.0, 0.0, 0.0),
                Vec3::new(0.0, 0.0, 1.0),
                Vec3::new(1.0, 0.0, 0.0),
                Colour::WHITE,
            ),
            // Wall, normal +X
            Triangle::new(
                Vec3::new(0.0, 0.0, 0.0),
                Vec3::new(0.0, 1.0, 0.0),
                Vec3::new(0.0, 0.0, 1.0),
                Colour::WHITE,
            ),
        ]
    }

    #[test]
    fn test_shared_vertices_are_averaged() {
        let mut tris = folded_pair();
        assert_eq!(tris[0].face_normal(), Vec3::Y);
        assert_eq!(tris[1].face_normal(), Vec3::X);

        smooth_vertex_normals(&mut tris, false);

        let expected = Vec3::new(1.0, 1.0, 0.0).normalize();
        let floor = tris[0].vertex_normals.unwrap();
        // Shared vertices (origin and +Z) are averaged
        assert!((floor[0] - expected).length() < 1e-6);
        assert!((floor[1] - expected).length() < 1e-6);
        // Unshared vertex keeps the face normal
        assert!((floor[2] - Vec3::Y).length() < 1e-6);

        let wall = tris[1].vertex_normals.unwrap();
        assert!((wall[0] - expected).length() < 1e-6);
        assert!((wall[1] - Vec3::X).length() < 1e-6);
    }

    #[test]
    fn test_existing_normals_kept() {
        let mut tris = folded_pair();
        tris[0] = tris[0].clone().with_vertex_normals([Vec3::Z; 3]);

        smooth_vertex_normals(&mut tris, false);
        assert_eq!(tris[0].vertex_normals, Some([Vec3::Z; 3]));

        smooth_vertex_normals(&mut tris, true);
        assert_ne!(tris[0].vertex_normals, Some([Vec3::Z; 3]));
    }

    #[test]
    fn test_negative_zero_matches_zero() {
        assert_eq!(
            position_key(Vec3::new(-0.0, 1.0, 0.0)),
            position_key(Vec3::new(0.0, 1.0, -0.0))
        );
    }
}
