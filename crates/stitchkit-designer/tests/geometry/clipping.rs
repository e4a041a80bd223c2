use stitchkit_core::data::{signed_area, to_points};
use stitchkit_designer::clipping::int_area;
use stitchkit_designer::{
    merge_extensions, CavalierClipper, IntPoint, Node, PatternConfig, PatternShape, Point,
    PolygonClipper, SampledPoint, ShapeKind, Transform2D,
};

fn square(x0: i64, y0: i64, size: i64) -> Vec<IntPoint> {
    vec![
        IntPoint::new(x0, y0),
        IntPoint::new(x0 + size, y0),
        IntPoint::new(x0 + size, y0 + size),
        IntPoint::new(x0, y0 + size),
    ]
}

fn base_square() -> Vec<SampledPoint> {
    [(0.0, 0.0), (10.0, 0.0), (10.0, 10.0), (0.0, 10.0)]
        .into_iter()
        .map(|p| SampledPoint::on_segment(Point::from(p), 0))
        .collect()
}

fn square_extension(center: Point, size: f64) -> PatternShape {
    let h = size / 2.0;
    PatternShape::extension(
        vec![
            Node::corner(-h, -h),
            Node::corner(h, -h),
            Node::corner(h, h),
            Node::corner(-h, h),
        ],
        Transform2D::translation(center.x, center.y),
    )
}

#[test]
fn test_union_of_overlapping_squares() {
    let clipper = CavalierClipper::default();
    let result = clipper
        .union(&[square(0, 0, 1000)], &[square(500, 500, 1000)])
        .unwrap();
    assert_eq!(result.len(), 1);
    assert!((int_area(&result[0]).abs() - 1_750_000.0).abs() < 1.0);
}

#[test]
fn test_union_of_disjoint_squares_keeps_both() {
    let clipper = CavalierClipper::default();
    let result = clipper
        .union(&[square(0, 0, 100)], &[square(1000, 1000, 50)])
        .unwrap();
    assert_eq!(result.len(), 2);
}

#[test]
fn test_offset_collapse_is_empty() {
    let clipper = CavalierClipper::default();
    let result = clipper.offset(&square(0, 0, 100), -80.0).unwrap();
    assert!(result.is_empty());
}

#[test]
fn test_offset_rejects_degenerate_polygon() {
    let clipper = CavalierClipper::default();
    let line = vec![IntPoint::new(0, 0), IntPoint::new(10, 0), IntPoint::new(20, 0)];
    assert!(clipper.offset(&line, -1.0).is_err());
}

#[test]
fn test_overlapping_extension_grows_outline() {
    let ext = square_extension(Point::new(10.0, 5.0), 4.0);
    let merged = merge_extensions(
        &base_square(),
        &[ext],
        &PatternConfig::default(),
        &CavalierClipper::default(),
    );
    let area = signed_area(&to_points(&merged));
    assert!((area - 108.0).abs() < 0.01);
    assert!(merged.iter().all(|s| s.seg_idx.is_none()));
}

#[test]
fn test_disjoint_extension_leaves_area_unchanged() {
    let ext = square_extension(Point::new(100.0, 100.0), 4.0);
    let merged = merge_extensions(
        &base_square(),
        &[ext],
        &PatternConfig::default(),
        &CavalierClipper::default(),
    );
    let area = signed_area(&to_points(&merged));
    assert!((area - 100.0).abs() < 1e-9);
}

#[test]
fn test_non_extension_shapes_are_not_merged() {
    let hole = PatternShape::new(ShapeKind::Circle { radius: 3.0 }, Transform2D::translation(10.0, 5.0));
    let merged = merge_extensions(
        &base_square(),
        &[hole],
        &PatternConfig::default(),
        &CavalierClipper::default(),
    );
    assert_eq!(merged, base_square());
}
