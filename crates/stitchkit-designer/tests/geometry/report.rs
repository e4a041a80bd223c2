use stitchkit_core::MeasurementSystem;
use stitchkit_designer::{
    EdgeRange, Node, OutlineMode, PatternConfig, PatternDocument, PatternEngine, PatternShape,
    Point, RangeKind, Transform2D,
};
use tempfile::TempDir;

fn pattern() -> PatternDocument {
    let mut doc = PatternDocument::new("card wallet", OutlineMode::HalfOpen)
        .with_nodes(vec![
            Node::corner(0.0, -45.0),
            Node::corner(55.0, -45.0),
            Node::corner(55.0, 45.0),
            Node::corner(0.0, 45.0),
        ])
        .with_holster(Transform2D::translation(80.0, 60.0));
    doc.add_range(EdgeRange::full(RangeKind::Outline)).unwrap();
    doc.add_range(EdgeRange::full(RangeKind::Perimeter).joined_with(0))
        .unwrap();
    doc.add_shape(PatternShape::linked_circle(Point::new(220.0, 60.0), 0));
    doc
}

#[test]
fn test_report_from_saved_pattern() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("wallet.json");
    pattern().save_to_file(&path).unwrap();

    let document = PatternDocument::load_from_file(&path).unwrap();
    let engine = PatternEngine::new(document, PatternConfig::default());
    let report = engine.stitch_report();

    assert_eq!(report.pattern, "card wallet");
    assert_eq!(report.ranges.len(), 2);
    assert!(report.ranges[0].mirrored);
    assert!(!report.ranges[1].mirrored);
    assert_eq!(report.linked_circles.len(), 1);
    assert!((report.linked_circles[0].circumference - 200.0).abs() < 1e-9);
    assert_eq!(
        report.linked_circles[0].stitch_count,
        engine.range_stitches(0).unwrap().points.len()
    );

    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["ranges"][1]["kind"], "perimeter");
}

#[test]
fn test_report_in_inches() {
    let engine = PatternEngine::new(pattern(), PatternConfig::default());
    let metric = engine.stitch_report();
    let imperial = metric.in_units(MeasurementSystem::Imperial);

    assert_eq!(imperial.units, MeasurementSystem::Imperial);
    assert!((imperial.ranges[0].length * 25.4 - metric.ranges[0].length).abs() < 1e-9);
    assert_eq!(imperial.total_stitches, metric.total_stitches);
}
