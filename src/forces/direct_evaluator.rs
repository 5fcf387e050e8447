use rayon::prelude::*;
use crate::forces::PairwiseKernel;
use crate::models::{Body, Vec2};
use crate::particles::PointSet;

/// Brute-force O(N) per query summation over every body.
///
/// Used for small body counts and as the reference the tree evaluator is checked against.
pub struct DirectEvaluator;

impl DirectEvaluator {
    /// Sums `kernel` over `bodies` in index order, skipping `exclude`.
    ///
    /// # Examples
    ///
    /// ```
    /// use rs_treecode::forces::{DirectEvaluator, Interaction};
    /// use rs_treecode::models::{Body, Vec2};
    ///
    /// let bodies = [Body::at_rest(Vec2::new(1.0, 0.0), 1.0).unwrap()];
    /// let gravity = Interaction::InverseSquare { softening: 0.0 };
    /// let a = DirectEvaluator::evaluate(Vec2::ZERO, &bodies, None, &gravity);
    /// assert!((a.x - 1.0).abs() < 1e-6);
    ///
    /// // The only body is excluded.
    /// assert_eq!(DirectEvaluator::evaluate(Vec2::ZERO, &bodies, Some(0), &gravity), Vec2::ZERO);
    /// ```
    pub fn evaluate<K>(query: Vec2, bodies: &[Body], exclude: Option<usize>, kernel: &K) -> Vec2
    where
        K: PairwiseKernel + ?Sized,
    {
        bodies
            .iter()
            .enumerate()
            .filter(|(i, _)| Some(*i) != exclude)
            .fold(Vec2::ZERO, |acc, (_, b)| acc + kernel.interact(b.position - query, b.mass))
    }

    pub fn evaluate_batch<K>(queries: &[Vec2], bodies: &[Body], kernel: &K) -> Vec<Vec2>
    where
        K: PairwiseKernel + ?Sized,
    {
        queries
            .par_iter()
            .map(|&q| DirectEvaluator::evaluate(q, bodies, None, kernel))
            .collect()
    }

    /// Field at every body, each excluding itself. O(N²).
    pub fn evaluate_bodies<K>(bodies: &PointSet, kernel: &K) -> Vec<Vec2>
    where
        K: PairwiseKernel + ?Sized,
    {
        let slice = bodies.as_slice();
        slice
            .par_iter()
            .enumerate()
            .map(|(i, b)| DirectEvaluator::evaluate(b.position, slice, Some(i), kernel))
            .collect()
    }
}
