use stitchkit_core::data::{signed_area, to_points};
use stitchkit_designer::{
    derive_linked_circle, offset_closed_path, offset_open_path, place_stitches, sample_outline,
    world_outline, ArcTable, CavalierClipper, EdgeRange, HolsterTransform, Node, OutlineMode,
    Point, RangeKind, SamplingOptions, DEFAULT_SCALE,
};

fn unit_square() -> Vec<Point> {
    vec![
        Point::new(0.0, 0.0),
        Point::new(10.0, 0.0),
        Point::new(10.0, 10.0),
        Point::new(0.0, 10.0),
    ]
}

#[test]
fn test_square_offset_inward_by_two() {
    let clipper = CavalierClipper::default();
    let out = offset_closed_path(&unit_square(), -2.0, DEFAULT_SCALE, &clipper);
    assert!(!out.is_empty());
    assert!((signed_area(&out) - 36.0).abs() < 0.05);
    for p in &out {
        assert!(p.x >= 1.99 && p.x <= 8.01);
        assert!(p.y >= 1.99 && p.y <= 8.01);
    }
}

#[test]
fn test_clockwise_square_keeps_winding() {
    let clipper = CavalierClipper::default();
    let mut cw = unit_square();
    cw.reverse();
    let out = offset_closed_path(&cw, -2.0, DEFAULT_SCALE, &clipper);
    assert!((signed_area(&out) + 36.0).abs() < 0.05);
}

#[test]
fn test_two_node_half_outline_mirrors_to_symmetric_path() {
    let nodes = vec![Node::corner(0.0, -100.0), Node::corner(50.0, 0.0)];
    let half = sample_outline(&nodes, OutlineMode::HalfOpen, &SamplingOptions::default());
    let full = world_outline(&half, OutlineMode::HalfOpen, &HolsterTransform::default());

    let points = to_points(&full);
    assert!((signed_area(&points) - 5000.0).abs() < 1e-6);
    for p in &points {
        assert!(points.iter().any(|q| q.fuzzy_eq(&Point::new(-p.x, p.y), 1e-9)));
    }
}

#[test]
fn test_full_range_on_100mm_path() {
    let table = ArcTable::build(&[Point::new(0.0, 0.0), Point::new(100.0, 0.0)], false);
    let stitches = place_stitches(&table, &EdgeRange::full(RangeKind::Outline), 4.0);
    assert_eq!(stitches.len(), 26);
}

#[test]
fn test_linked_circle_radius_from_length() {
    let path = vec![Point::new(0.0, 0.0), Point::new(31.415, 0.0), Point::new(62.83, 0.0)];
    let ranges = vec![EdgeRange::full(RangeKind::Outline)];
    let circle = derive_linked_circle(&ranges, 0, &path, false, Point::zero(), 16, 72).unwrap();
    assert!((circle.radius - 10.0).abs() < 1e-3);
}

#[test]
fn test_single_point_offsets_unchanged() {
    let single = vec![Point::new(4.0, 2.0)];
    let clipper = CavalierClipper::default();
    assert_eq!(offset_open_path(&single, -2.0, Point::zero()), single);
    assert_eq!(offset_closed_path(&single, -2.0, DEFAULT_SCALE, &clipper), single);
}
