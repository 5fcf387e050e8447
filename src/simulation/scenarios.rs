//! Initial conditions for the simulator. Every builder sizes its [`PointSet`] from
//! `config.max_particles` so that more bodies can be added interactively afterwards.
use std::ops::Range;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use crate::models::Vec2;
use crate::particles::PointSet;
use crate::utils::{TreeCodeError, TreeConfig};

/// `n` bodies placed uniformly in the box `[lo, hi)` with masses drawn from `mass_range`.
///
/// The same `seed` always yields the same cloud. Degenerate ranges (`start == end`)
/// produce that single value.
///
/// # Errors
///
/// * `TreeCodeError::InvalidConfiguration` if a range is reversed.
/// * `TreeCodeError::CapacityExceeded` if `n > config.max_particles`.
///
/// # Examples
///
/// ```
/// use rs_treecode::models::Vec2;
/// use rs_treecode::simulation::random_cloud;
/// use rs_treecode::utils::TreeConfig;
///
/// let config = TreeConfig::default();
/// let cloud = random_cloud(&config, 100, Vec2::splat(0.25), Vec2::splat(0.75), 0.0..1.0, 7).unwrap();
/// assert_eq!(cloud.count(), 100);
/// assert!(cloud.iter().all(|b| b.position.x >= 0.25 && b.position.x < 0.75));
/// ```
pub fn random_cloud(
    config: &TreeConfig,
    n: usize,
    lo: Vec2,
    hi: Vec2,
    mass_range: Range<f32>,
    seed: u64,
) -> Result<PointSet, TreeCodeError> {
    if n > config.max_particles {
        return Err(TreeCodeError::CapacityExceeded { capacity: config.max_particles });
    }
    let mut rng = StdRng::seed_from_u64(seed);
    let mut bodies = PointSet::with_config(config);
    for _ in 0..n {
        let position = Vec2::new(sample(&mut rng, lo.x, hi.x)?, sample(&mut rng, lo.y, hi.y)?);
        let mass = sample(&mut rng, mass_range.start, mass_range.end)?;
        bodies.append_at_rest(position, mass)?;
    }
    Ok(bodies)
}

fn sample(rng: &mut StdRng, lo: f32, hi: f32) -> Result<f32, TreeCodeError> {
    if lo < hi {
        Ok(rng.random_range(lo..hi))
    } else if lo == hi {
        Ok(lo)
    } else {
        Err(TreeCodeError::InvalidConfiguration(format!("empty range {}..{}", lo, hi)))
    }
}

/// A counter-rotating vortex pair straddling the domain center, circulations ±500.
pub fn vortex_pair(config: &TreeConfig) -> Result<PointSet, TreeCodeError> {
    let mut bodies = PointSet::with_config(config);
    bodies.append_at_rest(Vec2::new(0.499, 0.5), 500.0)?;
    bodies.append_at_rest(Vec2::new(0.501, 0.5), -500.0)?;
    Ok(bodies)
}

/// A close binary plus a slow third body, all of unit mass.
pub fn three_body(config: &TreeConfig) -> Result<PointSet, TreeCodeError> {
    let mut bodies = PointSet::with_config(config);
    bodies.append(Vec2::new(0.4, 0.34), 1.0, Vec2::new(-1.0, 0.0))?;
    bodies.append(Vec2::new(0.4, 0.38), 1.0, Vec2::new(1.0, 0.0))?;
    bodies.append(Vec2::new(0.71, 0.6), 1.0, Vec2::new(-0.1, -0.3))?;
    Ok(bodies)
}

/// One body of `mass` at the center of each quadrant of the unit square.
pub fn quadrant_square(config: &TreeConfig, mass: f32) -> Result<PointSet, TreeCodeError> {
    let mut bodies = PointSet::with_config(config);
    for (x, y) in [(0.25, 0.25), (0.75, 0.25), (0.25, 0.75), (0.75, 0.75)] {
        bodies.append_at_rest(Vec2::new(x, y), mass)?;
    }
    Ok(bodies)
}
