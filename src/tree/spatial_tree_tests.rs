use approx::assert_relative_eq;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use crate::models::Vec2;
use crate::particles::PointSet;
use crate::tree::{NodeId, Occupant, Quad, SpatialTree};
use crate::utils::{TreeCodeError, TreeConfig};

fn random_bodies(n: usize, seed: u64) -> PointSet {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut bodies = PointSet::new(n);
    for _ in 0..n {
        let p = Vec2::new(rng.random_range(0.0..1.0), rng.random_range(0.0..1.0));
        bodies.append_at_rest(p, rng.random_range(0.1..2.0)).unwrap();
    }
    bodies
}

fn build(bodies: &PointSet, config: &TreeConfig) -> SpatialTree {
    let mut tree = SpatialTree::new(config);
    tree.rebuild(bodies).expect("Failed to build tree");
    tree
}

/// Checks occupancy tags and that every node's aggregates equal those of its children or occupants.
fn check_aggregates(tree: &SpatialTree) {
    for (id, node) in tree.cells() {
        let has_children = node.children.iter().any(|c| c.is_some());
        assert_eq!(node.is_internal(), has_children, "Node {:?} occupancy disagrees with children", id);

        let (mass, weighted) = match node.occupant {
            Occupant::Empty => (0.0, Vec2::ZERO),
            Occupant::Leaf(b) => (b.mass, b.position * b.mass),
            Occupant::Bucket(bucket_id) => {
                let bucket = tree.bucket(bucket_id).expect("Dangling bucket id");
                bucket.members.iter().fold(
                    (bucket.overflow_mass, bucket.overflow_weighted_position),
                    |(m, w), b| (m + b.mass, w + b.position * b.mass),
                )
            }
            Occupant::Internal => node.child_ids().fold((0.0_f32, Vec2::ZERO), |(m, w), c| {
                (m + tree[c].total_mass, w + tree[c].weighted_position)
            }),
        };
        assert_relative_eq!(node.total_mass, mass, max_relative = 1e-4, epsilon = 1e-5);
        assert_relative_eq!(node.weighted_position.x, weighted.x, max_relative = 1e-4, epsilon = 1e-5);
        assert_relative_eq!(node.weighted_position.y, weighted.y, max_relative = 1e-4, epsilon = 1e-5);
    }
}

#[test]
fn test_new_tree_has_empty_root() {
    let tree = SpatialTree::new(&TreeConfig::default());
    assert_eq!(tree.node_count(), 1);
    assert!(tree.root().is_empty());
    assert_eq!(tree.root().total_mass, 0.0);
    assert_eq!(tree.root().center_of_mass(), None);
    assert_eq!(tree.root().quad, Quad::unit());
}

#[test]
fn test_single_body_is_root_leaf() {
    let mut tree = SpatialTree::new(&TreeConfig::default());
    let leaf = tree.insert(7, Vec2::new(0.3, 0.6), 2.5).unwrap();
    assert_eq!(leaf, NodeId::ROOT);
    match tree.root().occupant {
        Occupant::Leaf(b) => assert_eq!(b.index, 7),
        other => panic!("Expected a leaf root, got {:?}", other),
    }
    assert_eq!(tree.root().total_mass, 2.5);
}

#[test]
fn test_one_body_per_quadrant() {
    let m = 2.0;
    let mut bodies = PointSet::new(4);
    for (x, y) in [(0.25, 0.25), (0.75, 0.25), (0.25, 0.75), (0.75, 0.75)] {
        bodies.append_at_rest(Vec2::new(x, y), m).unwrap();
    }
    let tree = build(&bodies, &TreeConfig::default());

    assert_eq!(tree.node_count(), 5);
    assert_eq!(tree.root().total_mass, 4.0 * m);
    assert_eq!(tree.root().center_of_mass(), Some(Vec2::new(0.5, 0.5)));
    for (quadrant, child) in tree.root().children.iter().enumerate() {
        let child = child.expect("Every quadrant should be allocated");
        match tree[child].occupant {
            Occupant::Leaf(b) => assert_eq!(b.index, quadrant),
            other => panic!("Expected a leaf in quadrant {}, got {:?}", quadrant, other),
        }
    }
    check_aggregates(&tree);
}

#[test]
fn test_mass_conservation_random() {
    let bodies = random_bodies(200, 7);
    let config = TreeConfig::default().with_capacity(200);
    let tree = build(&bodies, &config);
    assert_relative_eq!(tree.root().total_mass, bodies.total_mass(), max_relative = 1e-5);
    check_aggregates(&tree);
}

#[test]
fn test_center_of_mass_matches_bodies_in_region() {
    let bodies = random_bodies(150, 11);
    let config = TreeConfig::default().with_capacity(150);
    let tree = build(&bodies, &config);

    for (id, node) in tree.cells() {
        let inside: Vec<_> = bodies.iter().filter(|b| node.quad.contains_point(b.position)).collect();
        if inside.is_empty() {
            assert!(node.center_of_mass().is_none(), "Node {:?} has mass but no bodies", id);
            continue;
        }
        let mass: f32 = inside.iter().map(|b| b.mass).sum();
        let weighted = inside.iter().fold(Vec2::ZERO, |w, b| w + b.position * b.mass);
        let expected = weighted / mass;
        let com = node.center_of_mass().expect("Non-empty node without center of mass");
        assert_relative_eq!(com.x, expected.x, max_relative = 1e-4);
        assert_relative_eq!(com.y, expected.y, max_relative = 1e-4);
    }
}

#[test]
fn test_children_cover_half_size_regions() {
    let bodies = random_bodies(64, 3);
    let tree = build(&bodies, &TreeConfig::default().with_capacity(64));
    for (_, node) in tree.cells() {
        for (quadrant, child) in node.children.iter().enumerate() {
            if let Some(child) = child {
                let region = tree.node_region(*child).unwrap();
                assert_eq!(region, node.quad.child(quadrant));
                assert_eq!(region.size() * 2.0, node.quad.size());
                assert_eq!(tree[*child].depth, node.depth + 1);
            }
        }
    }
}

#[test]
fn test_rebuild_is_idempotent() {
    let bodies = random_bodies(100, 5);
    let mut tree = SpatialTree::new(&TreeConfig::default().with_capacity(100));
    tree.rebuild(&bodies).unwrap();
    let first = tree.nodes().to_vec();
    tree.rebuild(&bodies).unwrap();
    assert_eq!(first, tree.nodes());
}

#[test]
fn test_insertion_order_does_not_change_aggregates() {
    let bodies = random_bodies(80, 21);
    let config = TreeConfig::default().with_capacity(80);
    let forward = build(&bodies, &config);

    let mut reversed = SpatialTree::new(&config);
    for (i, b) in bodies.iter().enumerate().rev() {
        reversed.insert(i, b.position, b.mass).unwrap();
    }

    assert_eq!(forward.node_count(), reversed.node_count());
    let a = forward.root().center_of_mass().unwrap();
    let b = reversed.root().center_of_mass().unwrap();
    assert_relative_eq!(forward.root().total_mass, reversed.root().total_mass, max_relative = 1e-5);
    assert_relative_eq!(a.x, b.x, max_relative = 1e-5);
    assert_relative_eq!(a.y, b.y, max_relative = 1e-5);
}

#[test]
fn test_vortex_pair_separates_at_first_level() {
    let mut tree = SpatialTree::new(&TreeConfig::default());
    tree.insert(0, Vec2::new(0.499, 0.5), 500.0).unwrap();
    tree.insert(1, Vec2::new(0.501, 0.5), -500.0).unwrap();

    assert_eq!(tree.root().total_mass, 0.0);
    assert!(tree.root().center_of_mass().is_none());
    assert_eq!(tree.root().children[2].map(|c| tree[c].total_mass), Some(500.0));
    assert_eq!(tree.root().children[3].map(|c| tree[c].total_mass), Some(-500.0));
    check_aggregates(&tree);
}

#[test]
fn test_near_coincident_bodies_split_deep() {
    let config = TreeConfig::new(None, None, None, None, Some(28), None);
    let mut tree = SpatialTree::new(&config);
    tree.insert(0, Vec2::new(0.3, 0.3), 1.0).unwrap();
    tree.insert(1, Vec2::new(0.3 + 1e-7, 0.3), 1.0).unwrap();

    let stats = tree.stats();
    assert_eq!(stats.bucket_count, 0);
    assert!(stats.max_depth_reached > 16, "Expected a deep split, got {:?}", stats);
    let leaves = tree.cells().filter(|(_, n)| matches!(n.occupant, Occupant::Leaf(_))).count();
    assert_eq!(leaves, 2);
    check_aggregates(&tree);
}

#[test]
fn test_coincident_bodies_share_bucket_at_depth_cap() {
    let config = TreeConfig::default();
    let mut tree = SpatialTree::new(&config);
    let p = Vec2::new(0.3, 0.3);
    tree.insert(0, p, 1.0).unwrap();
    let landed = tree.insert(1, p, 2.0).unwrap();

    assert_eq!(tree[landed].depth, config.max_depth);
    assert_eq!(tree.node_count(), config.max_depth as usize + 1);
    match tree[landed].occupant {
        Occupant::Bucket(id) => {
            let bucket = tree.bucket(id).unwrap();
            let indices: Vec<usize> = bucket.members.iter().map(|b| b.index).collect();
            assert_eq!(indices, vec![0, 1]);
        }
        other => panic!("Expected a bucket, got {:?}", other),
    }
    assert_eq!(tree.root().total_mass, 3.0);
    check_aggregates(&tree);
}

#[test]
fn test_full_bucket_merges_by_mass() {
    let config = TreeConfig::new(None, None, None, None, Some(4), Some(2));
    let mut tree = SpatialTree::new(&config);
    let p = Vec2::new(0.625, 0.125);
    for i in 0..5 {
        tree.insert(i, p, 1.0).unwrap();
    }
    let stats = tree.stats();
    assert_eq!(stats.bucket_count, 1);
    assert_eq!(stats.overflow_merges, 3);

    let bucket = &tree.buckets()[0];
    assert_eq!(bucket.members.len(), 2);
    assert_eq!(bucket.len(), 5);
    assert_eq!(bucket.overflow_mass, 3.0);
    assert_eq!(bucket.overflow_center_of_mass(), Some(p));
    assert_eq!(tree.root().total_mass, 5.0);
    check_aggregates(&tree);
}

#[test]
fn test_node_capacity_exceeded_leaves_tree_untouched() {
    let config = TreeConfig::new(None, Some(3), None, None, None, None);
    let mut tree = SpatialTree::new(&config);
    tree.insert(0, Vec2::new(0.1, 0.1), 1.0).unwrap();
    tree.insert(1, Vec2::new(0.9, 0.9), 1.0).unwrap();
    assert_eq!(tree.node_count(), 3);

    let before = tree.nodes().to_vec();
    let result = tree.insert(2, Vec2::new(0.15, 0.15), 1.0);
    assert_eq!(result, Err(TreeCodeError::NodeCapacityExceeded { capacity: 3 }));
    assert_eq!(tree.nodes(), &before[..]);

    let result = tree.insert(2, Vec2::new(0.9, 0.1), 1.0);
    assert!(result.is_err());
    assert_eq!(tree.root().total_mass, 2.0);
}

#[test]
fn test_unbounded_depth_cap_fails_fast_on_coincident_bodies() {
    // Never validated, so the arena is the only bound on the split chain.
    let config = TreeConfig::new(None, Some(64), None, None, Some(u32::MAX), None);
    let mut tree = SpatialTree::new(&config);
    let p = Vec2::new(0.3, 0.3);
    tree.insert(0, p, 1.0).unwrap();

    let result = tree.insert(1, p, 1.0);
    assert_eq!(result, Err(TreeCodeError::NodeCapacityExceeded { capacity: 64 }));
    assert_eq!(tree.node_count(), 1);
    assert!(matches!(tree.root().occupant, Occupant::Leaf(b) if b.index == 0));
    assert_eq!(tree.root().total_mass, 1.0);
}

#[test]
fn test_insert_rejects_non_finite() {
    let mut tree = SpatialTree::new(&TreeConfig::default());
    match tree.insert(0, Vec2::new(f32::NAN, 0.5), 1.0) {
        Err(TreeCodeError::InvalidBody(_)) => (),
        other => panic!("Expected InvalidBody, got {:?}", other),
    }
    assert!(tree.insert(0, Vec2::new(0.5, 0.5), f32::INFINITY).is_err());
    assert!(tree.root().is_empty());
}

#[test]
fn test_cells_visit_every_node_once() {
    let bodies = random_bodies(50, 9);
    let tree = build(&bodies, &TreeConfig::default().with_capacity(50));
    let mut visited: Vec<NodeId> = tree.cells().map(|(id, _)| id).collect();
    assert_eq!(visited[0], NodeId::ROOT);
    visited.sort();
    visited.dedup();
    assert_eq!(visited.len(), tree.node_count());
}

#[test]
fn test_reset_with_new_domain() {
    let bodies = random_bodies(10, 1);
    let mut tree = build(&bodies, &TreeConfig::default());
    assert!(tree.node_count() > 1);

    tree.reset(2.0);
    assert_eq!(tree.node_count(), 1);
    assert_eq!(tree.root().quad.center(), Vec2::new(1.0, 1.0));
    assert_eq!(tree.stats().max_depth_reached, 0);

    tree.insert(0, Vec2::new(1.5, 0.5), 1.0).unwrap();
    tree.insert(1, Vec2::new(0.5, 1.5), 1.0).unwrap();
    assert!(tree.root().children[1].is_some());
    assert!(tree.root().children[2].is_some());
}
