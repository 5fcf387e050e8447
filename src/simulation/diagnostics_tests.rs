use approx::assert_relative_eq;
use crate::models::Vec2;
use crate::particles::PointSet;
use crate::assert_float_eq;
use crate::simulation::{gravitational_energy, kinetic_energy, total_energy, vortex_energy};

fn pair(m0: f32, m1: f32) -> PointSet {
    let mut bodies = PointSet::new(2);
    bodies.append(Vec2::new(0.2, 0.5), m0, Vec2::new(1.0, 0.0)).unwrap();
    bodies.append(Vec2::new(0.8, 0.5), m1, Vec2::new(0.0, -2.0)).unwrap();
    bodies
}

#[test]
fn test_kinetic_energy() {
    let bodies = pair(2.0, 1.0);
    // ½·2·1 + ½·1·4
    assert_float_eq(kinetic_energy(&bodies), 3.0, 1e-6, Some("Kinetic energy of the pair"));
}

#[test]
fn test_gravitational_energy_of_a_pair() {
    let bodies = pair(2.0, 3.0);
    let expected = -0.5 * 6.0 / (0.36_f32 + 1e-3).sqrt();
    assert_relative_eq!(gravitational_energy(&bodies, 0.5, 1e-3), expected, max_relative = 1e-6);
    assert_relative_eq!(
        total_energy(&bodies, 0.5, 1e-3),
        kinetic_energy(&bodies) + expected,
        max_relative = 1e-6
    );
}

#[test]
fn test_energies_of_a_single_body_have_no_pair_terms() {
    let mut bodies = PointSet::new(1);
    bodies.append_at_rest(Vec2::new(0.5, 0.5), 4.0).unwrap();
    assert_eq!(gravitational_energy(&bodies, 1.0, 1e-3), 0.0);
    assert_eq!(vortex_energy(&bodies, 1e-5), 0.0);
}

#[test]
fn test_vortex_energy_of_a_pair() {
    let bodies = pair(1.0, -1.0);
    let expected = -0.5 * (0.36_f32 + 1e-5).ln();
    assert_relative_eq!(vortex_energy(&bodies, 1e-5), expected, max_relative = 1e-6);
}
