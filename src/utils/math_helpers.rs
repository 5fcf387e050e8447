use crate::models::Vec2;
use crate::utils::MIN_DISTANCE_SQR;

/// Scales `v` by `(|v|² + eps)^((exponent - 1) / 2)`.
///
/// With `exponent = -2` this is the softened inverse-square direction `v / (|v|² + eps)^1.5`;
/// with `exponent = -1` it is the softened inverse-distance direction `v / (|v|² + eps)`.
/// The softened squared length is floored at [`MIN_DISTANCE_SQR`], so the result stays
/// finite even for `eps = 0` and vanishingly small `v`.
///
/// # Examples
///
/// ```
/// use rs_treecode::models::Vec2;
/// use rs_treecode::utils::normalize_pow;
///
/// let v = normalize_pow(Vec2::new(2.0, 0.0), -2.0, 0.0);
/// assert!((v.x - 0.25).abs() < 1e-6);
///
/// let at_origin = normalize_pow(Vec2::ZERO, -2.0, 1e-3);
/// assert_eq!(at_origin, Vec2::ZERO);
/// ```
#[inline]
pub fn normalize_pow(v: Vec2, exponent: f32, eps: f32) -> Vec2 {
    let r2 = (v.norm_sqr() + eps).max(MIN_DISTANCE_SQR);
    v * r2.powf((exponent - 1.0) * 0.5)
}

/// Mirrors a body that left `[lo, hi)` back inside and flips the matching velocity component.
///
/// ```
/// use rs_treecode::models::Vec2;
/// use rs_treecode::utils::reflect_into_domain;
///
/// let (p, v) = reflect_into_domain(Vec2::new(-0.25, 0.5), Vec2::new(-1.0, 0.0), 0.0, 1.0);
/// assert_eq!(p, Vec2::new(0.25, 0.5));
/// assert_eq!(v, Vec2::new(1.0, 0.0));
/// ```
#[inline]
pub fn reflect_into_domain(position: Vec2, velocity: Vec2, lo: f32, hi: f32) -> (Vec2, Vec2) {
    let (x, vx) = reflect_axis(position.x, velocity.x, lo, hi);
    let (y, vy) = reflect_axis(position.y, velocity.y, lo, hi);
    (Vec2::new(x, y), Vec2::new(vx, vy))
}

#[inline]
fn reflect_axis(p: f32, v: f32, lo: f32, hi: f32) -> (f32, f32) {
    // Upper bound is exclusive, so the largest admissible coordinate sits just below `hi`.
    let top = hi - (hi - lo) * f32::EPSILON;
    if p < lo {
        ((2.0 * lo - p).clamp(lo, top), v.abs())
    } else if p >= hi {
        ((2.0 * hi - p).clamp(lo, top), -v.abs())
    } else {
        (p, v)
    }
}

/// Mass-weighted centroid of `(position, mass)` pairs, or `None` when the masses sum to zero.
pub fn weighted_centroid<I>(samples: I) -> Option<Vec2>
where
    I: IntoIterator<Item = (Vec2, f32)>,
{
    let (weighted, mass) = samples
        .into_iter()
        .fold((Vec2::ZERO, 0.0_f32), |(w, m), (p, mass)| (w + p * mass, m + mass));
    if mass == 0.0 {
        None
    } else {
        Some(weighted / mass)
    }
}
