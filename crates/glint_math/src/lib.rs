// Re-export glam for convenience
pub use glam::*;

// Glint math types
mod interval;
mod ray;
pub use interval::Interval;
pub use ray::Ray;

/// Tolerance below which a 3x3 determinant is treated as singular.
pub const SINGULAR_EPSILON: f32 = 1e-8;

/// Solve `m * x = rhs` for a 3x3 system.
///
/// Returns `None` when the matrix is singular or close enough to it that the
/// inverse would be dominated by rounding error.
pub fn solve3(m: Mat3, rhs: Vec3) -> Option<Vec3> {
    let det = m.determinant();
    if !det.is_finite() || det.abs() < SINGULAR_EPSILON {
        return None;
    }
    let x = m.inverse() * rhs;
    x.is_finite().then_some(x)
}
