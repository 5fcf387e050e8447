use crate::models::Vec2;
use crate::tree::Quad;

/// Typed index of a node in the tree arena. Valid until the next `reset`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u32);

impl NodeId {
    /// The root always occupies slot 0.
    pub const ROOT: NodeId = NodeId(0);

    pub(crate) fn from_index(index: usize) -> Self {
        NodeId(index as u32)
    }

    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Typed index of a max-depth bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BucketId(u32);

impl BucketId {
    pub(crate) fn from_index(index: usize) -> Self {
        BucketId(index as u32)
    }

    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// A body as the tree saw it at insertion time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LeafBody {
    pub index: usize,
    pub position: Vec2,
    pub mass: f32,
}

/// What sits directly at a node.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Occupant {
    /// No body and no children.
    Empty,
    /// Exactly one body; the node is a true leaf.
    Leaf(LeafBody),
    /// Several co-located bodies at the maximum depth.
    Bucket(BucketId),
    /// Split into up to four children.
    Internal,
}

/// One square cell of the quadtree with the aggregates of its subtree.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub total_mass: f32,
    /// Sum of `mass * position` over the subtree.
    pub weighted_position: Vec2,
    pub occupant: Occupant,
    pub children: [Option<NodeId>; 4],
    pub quad: Quad,
    pub depth: u32,
}

impl Node {
    pub fn new(quad: Quad, depth: u32) -> Self {
        Node {
            total_mass: 0.0,
            weighted_position: Vec2::ZERO,
            occupant: Occupant::Empty,
            children: [None; 4],
            quad,
            depth,
        }
    }

    /// Center of mass of the subtree, `None` when the masses cancel or the node is empty.
    pub fn center_of_mass(&self) -> Option<Vec2> {
        if self.total_mass == 0.0 {
            None
        } else {
            Some(self.weighted_position / self.total_mass)
        }
    }

    /// First moment `Σ m (x - center)` of the subtree about the center of this node's square.
    ///
    /// Defined even when the masses cancel, which is what makes signed-mass clusters
    /// approximable.
    pub fn first_moment(&self) -> Vec2 {
        self.weighted_position - self.quad.center() * self.total_mass
    }

    #[inline]
    pub(crate) fn accumulate(&mut self, position: Vec2, mass: f32) {
        self.weighted_position += position * mass;
        self.total_mass += mass;
    }

    pub fn is_empty(&self) -> bool {
        matches!(self.occupant, Occupant::Empty)
    }

    pub fn is_internal(&self) -> bool {
        matches!(self.occupant, Occupant::Internal)
    }

    pub fn child_ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.children.iter().flatten().copied()
    }
}

/// Bodies sharing one cell at the maximum depth.
///
/// The first `capacity` bodies keep their identity; later ones are merged by mass into
/// the overflow aggregates and can no longer be excluded individually during evaluation.
#[derive(Debug, Clone, PartialEq)]
pub struct Bucket {
    pub members: Vec<LeafBody>,
    pub overflow_mass: f32,
    pub overflow_weighted_position: Vec2,
    pub overflow_count: usize,
}

impl Bucket {
    pub(crate) fn new(capacity: usize) -> Self {
        Bucket {
            members: Vec::with_capacity(capacity),
            overflow_mass: 0.0,
            overflow_weighted_position: Vec2::ZERO,
            overflow_count: 0,
        }
    }

    pub fn overflow_center_of_mass(&self) -> Option<Vec2> {
        if self.overflow_mass == 0.0 {
            None
        } else {
            Some(self.overflow_weighted_position / self.overflow_mass)
        }
    }

    /// Number of bodies held, merged ones included.
    pub fn len(&self) -> usize {
        self.members.len() + self.overflow_count
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
