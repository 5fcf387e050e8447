pub mod utils;
pub mod errors;
pub mod models;
pub mod particles;
pub mod tree;
pub mod forces;
#[cfg(feature = "simulation")]
pub mod simulation;

/// Test helper: asserts `|a - b| < epsilon`, naming `context` in the failure message.
#[cfg(test)]
pub(crate) fn assert_float_eq(a: f32, b: f32, epsilon: f32, context: Option<&str>) {
    let diff = (a - b).abs();
    assert!(
        diff < epsilon,
        "{}: {} and {} differ by {} (epsilon {})",
        context.unwrap_or("values"), a, b, diff, epsilon
    );
}

/// Vector form of [`assert_float_eq`]: the distance between `a` and `b` is below `epsilon`.
#[cfg(test)]
pub(crate) fn assert_vec2_eq(a: models::Vec2, b: models::Vec2, epsilon: f32, context: Option<&str>) {
    let diff = (a - b).norm();
    assert!(
        diff < epsilon,
        "{}: {:?} and {:?} are {} apart (epsilon {})",
        context.unwrap_or("vectors"), a, b, diff, epsilon
    );
}
