use stitchkit_core::data::{signed_area, to_points};
use stitchkit_designer::{
    stitch_count, EdgeRange, FoldSnap, Node, OutlineMode, PatternConfig, PatternDocument,
    PatternEngine, PatternShape, Point, RangeHandle, RangeKind, Transform2D,
};

/// 80 x 100 rectangle centred on the holster at (100, 100).
fn half_rectangle() -> PatternDocument {
    PatternDocument::new("holster", OutlineMode::HalfOpen)
        .with_nodes(vec![
            Node::corner(0.0, -50.0),
            Node::corner(40.0, -50.0),
            Node::corner(40.0, 50.0),
            Node::corner(0.0, 50.0),
        ])
        .with_holster(Transform2D::translation(100.0, 100.0))
}

fn engine() -> PatternEngine {
    PatternEngine::new(half_rectangle(), PatternConfig::default())
}

fn right_extension() -> PatternShape {
    PatternShape::extension(
        vec![
            Node::corner(-10.0, -10.0),
            Node::corner(10.0, -10.0),
            Node::corner(10.0, 10.0),
            Node::corner(-10.0, 10.0),
        ],
        Transform2D::translation(140.0, 100.0),
    )
}

#[test]
fn test_base_outline_area() {
    let engine = engine();
    let area = signed_area(&to_points(&engine.base_outline()));
    assert!((area - 8000.0).abs() < 1e-6);
}

#[test]
fn test_outline_stitches_mirror_across_fold() {
    let mut engine = engine();
    engine
        .document_mut()
        .add_range(EdgeRange::full(RangeKind::Outline))
        .unwrap();

    let stitches = engine.range_stitches(0).unwrap();
    assert!(!stitches.points.is_empty());
    assert_eq!(stitches.points.len(), stitches.mirrored.len());
    for (p, m) in stitches.points.iter().zip(&stitches.mirrored) {
        assert!((p.x - 100.0 + (m.x - 100.0)).abs() < 1e-9);
        assert!((p.y - m.y).abs() < 1e-9);
    }
    for p in stitches.all_points() {
        assert!((p.x - 100.0).abs() < 40.0);
        assert!((p.y - 100.0).abs() < 50.0);
    }
}

#[test]
fn test_perimeter_stitches_follow_inset_rectangle() {
    let mut engine = engine();
    engine
        .document_mut()
        .add_range(EdgeRange::full(RangeKind::Perimeter))
        .unwrap();

    let stitches = engine.range_stitches(0).unwrap();
    assert!(stitches.mirrored.is_empty());
    // Inset by 4 mm: 72 x 92, perimeter 328.
    let expected = stitch_count(328.0, 4.0) as i64;
    assert!((stitches.points.len() as i64 - expected).abs() <= 1);
}

#[test]
fn test_closed_mode_never_mirrors() {
    let doc = PatternDocument::new("flat", OutlineMode::Closed).with_nodes(vec![
        Node::corner(0.0, 0.0),
        Node::corner(60.0, 0.0),
        Node::corner(60.0, 30.0),
        Node::corner(0.0, 30.0),
    ]);
    let mut engine = PatternEngine::new(doc, PatternConfig::default());
    engine
        .document_mut()
        .add_range(EdgeRange::full(RangeKind::Outline))
        .unwrap();

    let stitches = engine.range_stitches(0).unwrap();
    assert!(stitches.mirrored.is_empty());
    assert!(engine.range_path(RangeKind::Outline).closed);
}

#[test]
fn test_extension_merges_into_perimeter() {
    let mut engine = engine();
    engine.document_mut().add_shape(right_extension());

    let merged = engine.merged_outline();
    let area = signed_area(&to_points(&merged));
    assert!((area - 8200.0).abs() < 0.5);
    assert_eq!(engine.segment_at_fraction(RangeKind::Perimeter, 0.3), None);
}

#[test]
fn test_merged_outline_is_cached_until_edit() {
    let mut engine = engine();
    engine.document_mut().add_shape(right_extension());

    let first = engine.merged_outline();
    let second = engine.merged_outline();
    assert_eq!(first, second);
    assert!(engine.cache_stats().hits >= 1);

    engine
        .document_mut()
        .move_node(1, Point::new(45.0, -50.0), FoldSnap::OFF)
        .unwrap();
    let third = engine.merged_outline();
    assert_ne!(first, third);
}

#[test]
fn test_drag_end_handle_to_midpoint() {
    let mut engine = engine();
    engine
        .document_mut()
        .add_range(EdgeRange::full(RangeKind::Outline))
        .unwrap();
    let version = engine.document().geometry_version();

    let range = engine
        .drag_range_handle(0, RangeHandle::End, Point::new(140.0, 100.0))
        .unwrap();
    assert!((range.end - 0.5).abs() < 0.02);
    assert_eq!(range.start, 0.0);
    assert_eq!(engine.document().ranges()[0], range);
    assert!(engine.document().geometry_version() > version);

    let (_, end) = engine.range_handles(0).unwrap();
    assert!((end.y - 100.0).abs() < 2.0);
}

#[test]
fn test_drag_cannot_cross_start() {
    let mut engine = engine();
    engine
        .document_mut()
        .add_range(EdgeRange::new(0.4, 0.9, RangeKind::Outline).unwrap())
        .unwrap();
    let range = engine
        .drag_range_handle(0, RangeHandle::End, Point::new(100.0, 50.0))
        .unwrap();
    assert!(range.end > range.start);
    assert!((range.end - range.start - 0.01).abs() < 1e-9);
}

#[test]
fn test_drag_missing_range_is_rejected() {
    let mut engine = engine();
    assert!(engine
        .drag_range_handle(3, RangeHandle::Start, Point::zero())
        .is_err());
}

#[test]
fn test_linked_circle_matches_outline_length() {
    let mut engine = engine();
    engine
        .document_mut()
        .add_range(EdgeRange::full(RangeKind::Outline))
        .unwrap();
    engine
        .document_mut()
        .add_shape(PatternShape::linked_circle(Point::new(250.0, 100.0), 0));

    let circle = engine.linked_circle(0).unwrap();
    assert!((circle.circumference() - 180.0).abs() < 1e-9);
    assert_eq!(circle.points.len(), 72);

    // One side of the mirrored range is sewn to the circle.
    let source = engine.range_stitches(0).unwrap();
    assert_eq!(circle.stitch_count, source.points.len());
    assert_eq!(circle.stitch_points().len(), source.points.len());
    assert_eq!(source.count(), 2 * circle.stitch_count);

    let report = engine.stitch_report();
    assert_eq!(report.linked_circles[0].stitch_count, source.points.len());

    let cavity = engine.offset_shape(0, -2.0).unwrap();
    let inner_area = signed_area(&cavity).abs();
    let outer_area = signed_area(&circle.points).abs();
    assert!(inner_area < outer_area);
}

#[test]
fn test_linked_circle_with_deleted_range() {
    let mut engine = engine();
    engine
        .document_mut()
        .add_shape(PatternShape::linked_circle(Point::zero(), 4));
    assert!(engine.linked_circle(0).is_none());
    assert!(engine.offset_shape(0, -1.0).is_none());
}

#[test]
fn test_report_flags_joined_mismatch_once() {
    let mut engine = engine();
    let doc = engine.document_mut();
    doc.add_range(EdgeRange::full(RangeKind::Outline).joined_with(1))
        .unwrap();
    doc.add_range(
        EdgeRange::new(0.0, 0.5, RangeKind::Outline)
            .unwrap()
            .joined_with(0),
    )
    .unwrap();

    let report = engine.stitch_report();
    assert_eq!(report.ranges.len(), 2);
    assert_eq!(report.mismatches.len(), 1);
    let mismatch = &report.mismatches[0];
    assert_eq!(mismatch.range, 0);
    assert_eq!(mismatch.joined_with, 1);
    assert_ne!(mismatch.count, mismatch.joined_count);
    assert_eq!(
        report.total_stitches,
        report.ranges.iter().map(|r| r.stitch_count).sum::<usize>()
    );
}

#[test]
fn test_report_ignores_dangling_join() {
    let mut engine = engine();
    engine
        .document_mut()
        .add_range(EdgeRange::full(RangeKind::Outline).joined_with(9))
        .unwrap();
    let report = engine.stitch_report();
    assert!(!report.has_mismatches());
    assert!((report.ranges[0].length - 180.0).abs() < 1e-9);
}

#[test]
fn test_linked_circle_follows_partial_perimeter_range() {
    let mut engine = engine();
    let doc = engine.document_mut();
    doc.add_range(EdgeRange::new(0.2, 0.7, RangeKind::Perimeter).unwrap())
        .unwrap();
    doc.add_shape(PatternShape::linked_circle(Point::new(250.0, 100.0), 0));

    let circle = engine.linked_circle(0).unwrap();
    let source = engine.range_stitches(0).unwrap();
    assert!(source.mirrored.is_empty());
    assert_eq!(circle.stitch_count, source.points.len());
}

#[test]
fn test_mode_change_invalidates_cached_paths() {
    let mut engine = engine();
    let before = engine.stitch_path(RangeKind::Outline);
    assert!(!before.closed);

    engine.document_mut().set_mode(OutlineMode::Closed);
    let after = engine.stitch_path(RangeKind::Outline);
    assert!(after.closed);

    let fresh = PatternEngine::new(engine.document().clone(), PatternConfig::default());
    assert_eq!(after, fresh.stitch_path(RangeKind::Outline));
}
