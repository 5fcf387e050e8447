use crate::models::Vec2;
use crate::tree::Quad;

#[test]
fn test_quad_contains() {
    let quad = Quad::unit();

    // Points inside the quad
    assert!(quad.contains(0.0, 0.0));
    assert!(quad.contains(0.5, 0.5));
    assert!(quad.contains(0.99, 0.99));

    // Points outside the quad
    assert!(!quad.contains(1.0, 0.0));
    assert!(!quad.contains(0.0, 1.0));
    assert!(!quad.contains(-0.1, 0.5));
}

#[test]
fn test_from_side() {
    let quad = Quad::from_side(4.0);
    assert_eq!(quad.center(), Vec2::new(2.0, 2.0));
    assert_eq!(quad.size(), 4.0);
}

#[test]
fn test_children_partition_parent() {
    let parent = Quad { cx: 0.375, cy: 0.625, half_size: 0.125 };
    let children = parent.subdivide();
    let steps = 16;
    for i in 0..steps {
        for j in 0..steps {
            let p = Vec2::new(
                parent.cx - parent.half_size + parent.size() * (i as f32 + 0.5) / steps as f32,
                parent.cy - parent.half_size + parent.size() * (j as f32 + 0.5) / steps as f32,
            );
            assert!(parent.contains_point(p));
            let owners: Vec<usize> = (0..4).filter(|&k| children[k].contains_point(p)).collect();
            assert_eq!(owners.len(), 1, "Point {:?} covered by {:?}", p, owners);
            assert_eq!(owners[0], parent.quadrant_of(p), "Quadrant formula disagrees for {:?}", p);
        }
    }
}

#[test]
fn test_midlines_belong_to_upper_quadrants() {
    let quad = Quad::unit();
    assert_eq!(quad.quadrant_of(Vec2::new(0.5, 0.25)), 1);
    assert_eq!(quad.quadrant_of(Vec2::new(0.25, 0.5)), 2);
    let [_, br, tl, _] = quad.subdivide();
    assert!(br.contains(0.5, 0.25));
    assert!(tl.contains(0.25, 0.5));
}

#[test]
fn test_child_areas_sum_to_parent() {
    let parent = Quad::unit();
    let area: f32 = parent.subdivide().iter().map(|q| q.size() * q.size()).sum();
    assert_eq!(area, parent.size() * parent.size());
}
