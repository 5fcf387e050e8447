//! Arena-backed Barnes–Hut quadtree over the square domain `[0, side)²`.
//!
//! The tree is rebuilt from scratch every simulation step: [`SpatialTree::reset`] drops
//! every node but the root, then each body is inserted in index order. Aggregates
//! (`total_mass`, `weighted_position`) are accumulated on the way down, so every node
//! summarises its subtree as soon as the last insertion returns.
//!
//! Two bodies that keep landing in the same quadrant are split until they separate or
//! the configured maximum depth is reached. At that depth the cell becomes a
//! [`Bucket`] instead of splitting again, so coincident bodies never recurse without bound.
//!
//! # Example
//!
//! ```
//! use rs_treecode::models::Vec2;
//! use rs_treecode::particles::PointSet;
//! use rs_treecode::tree::SpatialTree;
//! use rs_treecode::utils::TreeConfig;
//!
//! let config = TreeConfig::default();
//! let mut bodies = PointSet::with_config(&config);
//! bodies.append_at_rest(Vec2::new(0.25, 0.25), 1.0).unwrap();
//! bodies.append_at_rest(Vec2::new(0.75, 0.75), 1.0).unwrap();
//!
//! let mut tree = SpatialTree::new(&config);
//! tree.rebuild(&bodies).unwrap();
//!
//! assert_eq!(tree.root().total_mass, 2.0);
//! assert_eq!(tree.root().center_of_mass(), Some(Vec2::new(0.5, 0.5)));
//! ```
use std::ops::Index;
use log::{debug, warn};
use crate::models::Vec2;
use crate::particles::PointSet;
use crate::tree::{Bucket, BucketId, LeafBody, Node, NodeId, Occupant, Quad};
use crate::utils::{TreeCodeError, TreeConfig};

/// Counters describing the shape of the last build.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TreeStats {
    pub node_count: usize,
    pub max_depth_reached: u32,
    pub bucket_count: usize,
    pub overflow_merges: usize,
}

pub struct SpatialTree {
    nodes: Vec<Node>,
    buckets: Vec<Bucket>,
    max_nodes: usize,
    max_depth: u32,
    bucket_capacity: usize,
    domain_side: f32,
    max_depth_reached: u32,
    overflow_merges: usize,
    depth_cap_warned: bool,
}

impl SpatialTree {
    /// Creates a tree holding only an empty root over `[0, config.domain_side)²`.
    pub fn new(config: &TreeConfig) -> Self {
        let mut tree = SpatialTree {
            nodes: Vec::with_capacity(config.max_nodes),
            buckets: Vec::new(),
            max_nodes: config.max_nodes.max(1),
            max_depth: config.max_depth,
            bucket_capacity: config.bucket_capacity.max(2),
            domain_side: config.domain_side,
            max_depth_reached: 0,
            overflow_merges: 0,
            depth_cap_warned: false,
        };
        tree.reset(config.domain_side);
        tree
    }

    /// Drops every node except an empty root spanning `[0, domain_side)²`.
    pub fn reset(&mut self, domain_side: f32) {
        self.nodes.clear();
        self.buckets.clear();
        self.domain_side = domain_side;
        self.nodes.push(Node::new(Quad::from_side(domain_side), 0));
        self.max_depth_reached = 0;
        self.overflow_merges = 0;
        self.depth_cap_warned = false;
    }

    /// `reset` with the current domain side.
    pub fn clear(&mut self) {
        self.reset(self.domain_side);
    }

    /// Inserts one body and returns the node it landed in.
    ///
    /// The insertion is atomic: when the arena cannot hold every node the descent would
    /// allocate, the tree is left untouched and `NodeCapacityExceeded` is returned.
    ///
    /// # Errors
    ///
    /// * `TreeCodeError::InvalidBody` for a non-finite position or mass.
    /// * `TreeCodeError::NodeCapacityExceeded` when the arena is full.
    ///
    /// # Examples
    ///
    /// ```
    /// use rs_treecode::models::Vec2;
    /// use rs_treecode::tree::{NodeId, Occupant, SpatialTree};
    /// use rs_treecode::utils::TreeConfig;
    ///
    /// let mut tree = SpatialTree::new(&TreeConfig::default());
    /// let first = tree.insert(0, Vec2::new(0.1, 0.1), 1.0).unwrap();
    /// assert_eq!(first, NodeId::ROOT);
    ///
    /// // A second body splits the root and re-homes the first one a level deeper.
    /// tree.insert(1, Vec2::new(0.9, 0.9), 1.0).unwrap();
    /// assert_eq!(tree.root().occupant, Occupant::Internal);
    /// assert_eq!(tree.node_count(), 3);
    /// ```
    pub fn insert(&mut self, body_index: usize, position: Vec2, mass: f32) -> Result<NodeId, TreeCodeError> {
        if !position.is_finite() || !mass.is_finite() {
            return Err(TreeCodeError::InvalidBody(format!(
                "body {} has position {:?} and mass {}", body_index, position, mass
            )));
        }

        let needed = self.allocations_needed(position);
        if self.nodes.len() + needed > self.max_nodes {
            warn!(
                "Tree arena full: body {} needs {} more nodes, {} of {} in use",
                body_index, needed, self.nodes.len(), self.max_nodes
            );
            return Err(TreeCodeError::NodeCapacityExceeded { capacity: self.max_nodes });
        }

        let body = LeafBody { index: body_index, position, mass };
        let mut current = NodeId::ROOT;
        loop {
            let (occupant, depth) = {
                let node = &self.nodes[current.index()];
                (node.occupant, node.depth)
            };
            match occupant {
                Occupant::Empty => {
                    let node = &mut self.nodes[current.index()];
                    node.occupant = Occupant::Leaf(body);
                    node.accumulate(position, mass);
                    self.max_depth_reached = self.max_depth_reached.max(depth);
                    return Ok(current);
                }
                Occupant::Leaf(other) if depth >= self.max_depth => {
                    self.warn_depth_cap(depth);
                    let bucket = self.alloc_bucket(other, body);
                    let node = &mut self.nodes[current.index()];
                    node.occupant = Occupant::Bucket(bucket);
                    node.accumulate(position, mass);
                    return Ok(current);
                }
                Occupant::Bucket(bucket) => {
                    self.push_into_bucket(bucket, body);
                    self.nodes[current.index()].accumulate(position, mass);
                    return Ok(current);
                }
                Occupant::Leaf(other) => {
                    // `other` is already part of this node's aggregates; only its marker moves down.
                    let quadrant = self.nodes[current.index()].quad.quadrant_of(other.position);
                    let child = self.child_or_alloc(current, quadrant)?;
                    let child_node = &mut self.nodes[child.index()];
                    child_node.occupant = Occupant::Leaf(other);
                    child_node.accumulate(other.position, other.mass);
                    self.max_depth_reached = self.max_depth_reached.max(depth + 1);
                    self.nodes[current.index()].occupant = Occupant::Internal;
                }
                Occupant::Internal => {}
            }

            let node = &mut self.nodes[current.index()];
            node.accumulate(position, mass);
            let quadrant = node.quad.quadrant_of(position);
            current = self.child_or_alloc(current, quadrant)?;
        }
    }

    /// Inserts every body of `bodies` in index order.
    pub fn insert_all(&mut self, bodies: &PointSet) -> Result<(), TreeCodeError> {
        for (i, body) in bodies.iter().enumerate() {
            self.insert(i, body.position, body.mass)?;
        }
        Ok(())
    }

    /// Resets the tree and inserts every body; the per-step entry point.
    pub fn rebuild(&mut self, bodies: &PointSet) -> Result<(), TreeCodeError> {
        self.clear();
        self.insert_all(bodies)?;
        debug!("Rebuilt tree over {} bodies: {:?}", bodies.count(), self.stats());
        Ok(())
    }

    pub fn root(&self) -> &Node {
        &self.nodes[NodeId::ROOT.index()]
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.index())
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn bucket(&self, id: BucketId) -> Option<&Bucket> {
        self.buckets.get(id.index())
    }

    pub fn buckets(&self) -> &[Bucket] {
        &self.buckets
    }

    /// Region covered by `id`, cached when the node was allocated.
    pub fn node_region(&self, id: NodeId) -> Option<Quad> {
        self.node(id).map(|n| n.quad)
    }

    pub fn domain_side(&self) -> f32 {
        self.domain_side
    }

    pub fn max_depth(&self) -> u32 {
        self.max_depth
    }

    /// Depth-first walk over every allocated node, root first, children in quadrant order.
    ///
    /// Renderers use this to outline the cells of the current build.
    pub fn cells(&self) -> Cells<'_> {
        Cells { tree: self, stack: vec![NodeId::ROOT] }
    }

    pub fn stats(&self) -> TreeStats {
        TreeStats {
            node_count: self.nodes.len(),
            max_depth_reached: self.max_depth_reached,
            bucket_count: self.buckets.len(),
            overflow_merges: self.overflow_merges,
        }
    }

    /// Counts the nodes an insertion at `position` would allocate, without touching the tree.
    ///
    /// Stops counting once the count exceeds the free arena slots, so the walk is bounded
    /// by `max_nodes` whatever `max_depth` is.
    fn allocations_needed(&self, position: Vec2) -> usize {
        let free = self.max_nodes.saturating_sub(self.nodes.len());
        let mut current = NodeId::ROOT;
        loop {
            let node = &self.nodes[current.index()];
            match node.occupant {
                Occupant::Empty | Occupant::Bucket(_) => return 0,
                Occupant::Leaf(_) if node.depth >= self.max_depth => return 0,
                Occupant::Leaf(other) => {
                    let mut quad = node.quad;
                    let mut depth = node.depth;
                    let mut needed = 0;
                    loop {
                        let a = quad.quadrant_of(other.position);
                        let b = quad.quadrant_of(position);
                        if a != b {
                            return needed + 2;
                        }
                        needed += 1;
                        depth += 1;
                        if depth >= self.max_depth || needed > free {
                            return needed;
                        }
                        quad = quad.child(a);
                    }
                }
                Occupant::Internal => match node.children[node.quad.quadrant_of(position)] {
                    Some(child) => current = child,
                    None => return 1,
                },
            }
        }
    }

    fn child_or_alloc(&mut self, parent: NodeId, quadrant: usize) -> Result<NodeId, TreeCodeError> {
        if let Some(child) = self.nodes[parent.index()].children[quadrant] {
            return Ok(child);
        }
        let (quad, depth) = {
            let p = &self.nodes[parent.index()];
            (p.quad.child(quadrant), p.depth + 1)
        };
        let child = self.alloc_node(quad, depth)?;
        self.nodes[parent.index()].children[quadrant] = Some(child);
        Ok(child)
    }

    fn alloc_node(&mut self, quad: Quad, depth: u32) -> Result<NodeId, TreeCodeError> {
        if self.nodes.len() >= self.max_nodes {
            return Err(TreeCodeError::NodeCapacityExceeded { capacity: self.max_nodes });
        }
        self.nodes.push(Node::new(quad, depth));
        Ok(NodeId::from_index(self.nodes.len() - 1))
    }

    fn alloc_bucket(&mut self, first: LeafBody, second: LeafBody) -> BucketId {
        let mut bucket = Bucket::new(self.bucket_capacity);
        bucket.members.push(first);
        bucket.members.push(second);
        self.buckets.push(bucket);
        BucketId::from_index(self.buckets.len() - 1)
    }

    fn push_into_bucket(&mut self, id: BucketId, body: LeafBody) {
        let capacity = self.bucket_capacity;
        let bucket = &mut self.buckets[id.index()];
        if bucket.members.len() < capacity {
            bucket.members.push(body);
            return;
        }
        if self.overflow_merges == 0 {
            warn!(
                "Bucket {:?} is full ({} bodies); merging body {} by mass",
                id, capacity, body.index
            );
        }
        bucket.overflow_weighted_position += body.position * body.mass;
        bucket.overflow_mass += body.mass;
        bucket.overflow_count += 1;
        self.overflow_merges += 1;
    }

    fn warn_depth_cap(&mut self, depth: u32) {
        if !self.depth_cap_warned {
            warn!("Depth cap {} reached; co-located bodies share a bucket", depth);
            self.depth_cap_warned = true;
        }
        self.max_depth_reached = self.max_depth_reached.max(depth);
    }
}

impl Index<NodeId> for SpatialTree {
    type Output = Node;

    fn index(&self, id: NodeId) -> &Node {
        &self.nodes[id.index()]
    }
}

/// Iterator returned by [`SpatialTree::cells`].
pub struct Cells<'a> {
    tree: &'a SpatialTree,
    stack: Vec<NodeId>,
}

impl<'a> Iterator for Cells<'a> {
    type Item = (NodeId, &'a Node);

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.stack.pop()?;
        let node = &self.tree.nodes[id.index()];
        self.stack.extend(node.children.iter().rev().flatten().copied());
        Some((id, node))
    }
}
