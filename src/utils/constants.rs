use crate::forces::Expansion;
use crate::utils::TreeConfig;

/// Maximum number of bodies a point set holds by default.
pub const MAX_PARTICLES: usize = 256;
/// Node arena size; four nodes per body leaves headroom for clustered inputs.
pub const MAX_NODES: usize = 4 * MAX_PARTICLES;
/// Opening angle. A node is approximated when `size < THETA * distance`.
pub const THETA: f32 = 1.0;
/// Added to the squared distance inside the interaction kernels.
pub const SOFTENING_EPSILON: f32 = 1e-3;
/// Softening of the point-vortex kernel.
pub const VORTEX_SOFTENING_EPSILON: f32 = 1e-5;
/// Floor on the softened squared distance, keeps `r2^-1.5` inside the f32 range.
pub const MIN_DISTANCE_SQR: f32 = 1e-12;
/// Deepest subdivision level; a root cell of side 1 shrinks to 2^-MAX_DEPTH.
pub const MAX_DEPTH: u32 = 16;
/// Largest accepted `max_depth`; f32 coordinates cannot separate bodies much further down.
pub const MAX_DEPTH_LIMIT: u32 = 64;
/// Bodies kept with identity in a single max-depth leaf.
pub const BUCKET_CAPACITY: usize = 8;
/// Side length of the square simulation domain `[0, side)²`.
pub const DOMAIN_SIDE: f32 = 1.0;

pub const DEFAULT_TREE_CONFIG: TreeConfig = TreeConfig {
    max_particles: MAX_PARTICLES,
    max_nodes: MAX_NODES,
    theta: THETA,
    softening: SOFTENING_EPSILON,
    max_depth: MAX_DEPTH,
    bucket_capacity: BUCKET_CAPACITY,
    domain_side: DOMAIN_SIDE,
    expansion: Expansion::Monopole,
};
