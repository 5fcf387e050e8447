use rayon::prelude::*;
use crate::forces::PairwiseKernel;
use crate::models::Vec2;
use crate::particles::PointSet;
use crate::tree::{Node, NodeId, Occupant, SpatialTree};
use crate::utils::TreeConfig;

/// How an accepted far cell is summarised.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Expansion {
    /// One point mass at the center of mass. Cells whose masses cancel are always opened.
    #[default]
    Monopole,
    /// Total mass plus first moment, both about the cell's geometric center. Cells whose
    /// masses cancel are still approximated, which suits signed circulations. Kernels
    /// without [`PairwiseKernel::dipole`] fall back to the monopole.
    Dipole,
}

/// Barnes–Hut evaluation over a built [`SpatialTree`].
///
/// An internal node is replaced by its far-field [`Expansion`] when
/// `size < theta * distance`. Leaves and bucket members are always summed exactly.
/// `theta = 0` never approximates and reproduces the direct sum.
///
/// The evaluator only borrows the tree, so any number of queries may run in parallel
/// once the build is finished.
///
/// # Examples
///
/// ```
/// use rs_treecode::forces::{ForceEvaluator, Interaction};
/// use rs_treecode::models::Vec2;
/// use rs_treecode::particles::PointSet;
/// use rs_treecode::tree::SpatialTree;
/// use rs_treecode::utils::TreeConfig;
///
/// let config = TreeConfig::default();
/// let mut bodies = PointSet::with_config(&config);
/// bodies.append_at_rest(Vec2::new(0.2, 0.5), 1.0).unwrap();
/// bodies.append_at_rest(Vec2::new(0.8, 0.5), 1.0).unwrap();
///
/// let mut tree = SpatialTree::new(&config);
/// tree.rebuild(&bodies).unwrap();
///
/// let gravity = Interaction::InverseSquare { softening: config.softening };
/// let evaluator = ForceEvaluator::from_config(&tree, &config);
///
/// // The pulls from both bodies cancel at the midpoint.
/// let a = evaluator.evaluate(Vec2::new(0.5, 0.5), None, &gravity);
/// assert!(a.x.abs() < 1e-4);
/// ```
#[derive(Clone, Copy)]
pub struct ForceEvaluator<'t> {
    tree: &'t SpatialTree,
    theta: f32,
    expansion: Expansion,
}

impl<'t> ForceEvaluator<'t> {
    pub fn new(tree: &'t SpatialTree, theta: f32) -> Self {
        ForceEvaluator { tree, theta, expansion: Expansion::Monopole }
    }

    pub fn from_config(tree: &'t SpatialTree, config: &TreeConfig) -> Self {
        ForceEvaluator::new(tree, config.theta).with_expansion(config.expansion)
    }

    pub fn with_expansion(mut self, expansion: Expansion) -> Self {
        self.expansion = expansion;
        self
    }

    pub fn theta(&self) -> f32 {
        self.theta
    }

    pub fn expansion(&self) -> Expansion {
        self.expansion
    }

    /// Field at `query`, skipping the body with index `exclude` if it sits in a leaf or bucket.
    ///
    /// A node whose region contains the query is always opened, so the excluded body is
    /// never folded into an approximated cluster. Bodies merged into a bucket's overflow
    /// have no identity left and cannot be excluded.
    pub fn evaluate<K>(&self, query: Vec2, exclude: Option<usize>, kernel: &K) -> Vec2
    where
        K: PairwiseKernel + ?Sized,
    {
        let tree = self.tree;
        let theta_sqr = self.theta * self.theta;
        let mut acc = Vec2::ZERO;
        let mut stack: Vec<NodeId> = Vec::with_capacity(3 * tree.stats().max_depth_reached as usize + 4);
        stack.push(NodeId::ROOT);

        while let Some(id) = stack.pop() {
            let node = &tree[id];
            match node.occupant {
                Occupant::Empty => {}
                Occupant::Leaf(body) => {
                    if Some(body.index) != exclude {
                        acc += kernel.interact(body.position - query, body.mass);
                    }
                }
                Occupant::Bucket(bucket_id) => {
                    if let Some(bucket) = tree.bucket(bucket_id) {
                        for body in bucket.members.iter().filter(|b| Some(b.index) != exclude) {
                            acc += kernel.interact(body.position - query, body.mass);
                        }
                        if let Some(com) = bucket.overflow_center_of_mass() {
                            acc += kernel.interact(com - query, bucket.overflow_mass);
                        }
                    }
                }
                Occupant::Internal => match self.far_field(node, query, theta_sqr, kernel) {
                    Some(f) => acc += f,
                    None => stack.extend(node.child_ids()),
                },
            }
        }
        acc
    }

    /// The approximated contribution of `node` at `query`, or `None` if it must be opened.
    fn far_field<K>(&self, node: &Node, query: Vec2, theta_sqr: f32, kernel: &K) -> Option<Vec2>
    where
        K: PairwiseKernel + ?Sized,
    {
        if node.quad.contains_point(query) {
            return None;
        }
        let size = node.quad.size();
        if self.expansion == Expansion::Dipole {
            let d = node.quad.center() - query;
            if size * size >= theta_sqr * d.norm_sqr() {
                return None;
            }
            if let Some(correction) = kernel.dipole(d, node.first_moment()) {
                return Some(kernel.interact(d, node.total_mass) + correction);
            }
        }
        let d = node.center_of_mass()? - query;
        (size * size < theta_sqr * d.norm_sqr()).then(|| kernel.interact(d, node.total_mass))
    }

    /// Evaluates every query in parallel, without exclusions.
    pub fn evaluate_batch<K>(&self, queries: &[Vec2], kernel: &K) -> Vec<Vec2>
    where
        K: PairwiseKernel + ?Sized,
    {
        queries
            .par_iter()
            .map(|&q| self.evaluate(q, None, kernel))
            .collect()
    }

    /// Field at every body of `bodies`, each excluding itself.
    pub fn evaluate_bodies<K>(&self, bodies: &PointSet, kernel: &K) -> Vec<Vec2>
    where
        K: PairwiseKernel + ?Sized,
    {
        let mut out = vec![Vec2::ZERO; bodies.count()];
        self.evaluate_bodies_into(bodies, kernel, &mut out);
        out
    }

    /// Like [`ForceEvaluator::evaluate_bodies`], writing into a caller-owned buffer.
    ///
    /// Only the first `min(out.len(), bodies.count())` entries are written.
    pub fn evaluate_bodies_into<K>(&self, bodies: &PointSet, kernel: &K, out: &mut [Vec2])
    where
        K: PairwiseKernel + ?Sized,
    {
        out.par_iter_mut()
            .zip(bodies.as_slice().par_iter())
            .enumerate()
            .for_each(|(i, (slot, body))| *slot = self.evaluate(body.position, Some(i), kernel));
    }
}
