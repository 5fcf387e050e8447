//! Conserved quantities for checking integrators. All pairwise sums are direct, O(N²).
use crate::particles::PointSet;

/// `Σ ½ m |v|²`.
pub fn kinetic_energy(bodies: &PointSet) -> f32 {
    bodies.iter().map(|b| b.kinetic_energy()).sum()
}

/// Softened pairwise potential `-coupling · Σ_{i<j} m_i m_j / sqrt(r² + softening)`.
pub fn gravitational_energy(bodies: &PointSet, coupling: f32, softening: f32) -> f32 {
    let bodies = bodies.as_slice();
    let mut energy = 0.0;
    for (i, a) in bodies.iter().enumerate() {
        for b in &bodies[i + 1..] {
            let r2 = (b.position - a.position).norm_sqr();
            energy -= a.mass * b.mass / (r2 + softening).sqrt();
        }
    }
    coupling * energy
}

/// Kinetic plus gravitational energy.
pub fn total_energy(bodies: &PointSet, coupling: f32, softening: f32) -> f32 {
    kinetic_energy(bodies) + gravitational_energy(bodies, coupling, softening)
}

/// Point-vortex interaction energy `Σ_{i<j} Γ_i Γ_j · ½ ln(r² + softening)`.
///
/// Up to sign and a constant factor this is the Kirchhoff Hamiltonian; it is conserved
/// by exact vortex dynamics.
pub fn vortex_energy(bodies: &PointSet, softening: f32) -> f32 {
    let bodies = bodies.as_slice();
    let mut energy = 0.0;
    for (i, a) in bodies.iter().enumerate() {
        for b in &bodies[i + 1..] {
            let r2 = (b.position - a.position).norm_sqr();
            energy += a.mass * b.mass * 0.5 * (r2 + softening).ln();
        }
    }
    energy
}
