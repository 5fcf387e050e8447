use crate::models::Vec2;
use crate::utils::{normalize_pow, MIN_DISTANCE_SQR};

/// Softened inverse-square field of a point mass, pointing from the query toward the source.
#[inline]
pub fn inverse_square(displacement: Vec2, mass: f32, softening: f32) -> Vec2 {
    normalize_pow(displacement, -2.0, softening) * mass
}

/// Softened velocity induced at the query by a point vortex of circulation `circulation`.
///
/// Positive circulation turns counter-clockwise around the source. The `1 / 2π` factor is
/// folded into the circulation.
#[inline]
pub fn point_vortex(displacement: Vec2, circulation: f32, softening: f32) -> Vec2 {
    normalize_pow(-displacement, -1.0, softening).perp() * circulation
}

/// Directional derivative of [`inverse_square`] along `dipole`, per unit mass.
///
/// `p / r³ - 3 d (d·p) / r⁵` with `r² = |d|² + softening`.
#[inline]
pub fn inverse_square_dipole(displacement: Vec2, dipole: Vec2, softening: f32) -> Vec2 {
    let r2 = (displacement.norm_sqr() + softening).max(MIN_DISTANCE_SQR);
    let inv_r3 = r2.powf(-1.5);
    dipole * inv_r3 - displacement * (3.0 * displacement.dot(dipole) * inv_r3 / r2)
}

/// Directional derivative of [`point_vortex`] along `dipole`, per unit circulation.
///
/// `-perp(p) / r² + 2 (d·p) perp(d) / r⁴` with `r² = |d|² + softening`.
#[inline]
pub fn point_vortex_dipole(displacement: Vec2, dipole: Vec2, softening: f32) -> Vec2 {
    let r2 = (displacement.norm_sqr() + softening).max(MIN_DISTANCE_SQR);
    let inv_r2 = 1.0 / r2;
    displacement.perp() * (2.0 * displacement.dot(dipole) * inv_r2 * inv_r2) - dipole.perp() * inv_r2
}
