use stitchkit_designer::{
    EdgeRange, Node, OutlineMode, PatternDocument, PatternShape, Point, RangeKind, ShapeKind,
    Transform2D,
};
use tempfile::TempDir;

fn sample_document() -> PatternDocument {
    let mut doc = PatternDocument::new("Pancake holster", OutlineMode::HalfOpen)
        .with_nodes(vec![
            Node::corner(0.0, -90.0),
            Node::with_handles(45.0, -60.0, Point::new(-10.0, 0.0), Point::new(0.0, 15.0)),
            Node::corner(30.0, 40.0),
        ])
        .with_holster(Transform2D::translation(150.0, 120.0).with_rotation(15.0));
    doc.add_shape(
        PatternShape::new(
            ShapeKind::Pill {
                width: 12.0,
                height: 4.0,
            },
            Transform2D::translation(150.0, 60.0),
        )
        .with_label("belt slot"),
    );
    doc.add_shape(PatternShape::linked_circle(Point::new(300.0, 100.0), 0));
    doc.add_range(EdgeRange::new(0.1, 0.9, RangeKind::Outline).unwrap())
        .unwrap();
    doc
}

#[test]
fn test_document_save_and_load() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("patterns").join("holster.json");

    let doc = sample_document();
    doc.save_to_file(&path).unwrap();
    let loaded = PatternDocument::load_from_file(&path).unwrap();

    assert_eq!(loaded.name, doc.name);
    assert_eq!(loaded.mode(), doc.mode());
    assert_eq!(loaded.nodes(), doc.nodes());
    assert_eq!(loaded.holster(), doc.holster());
    assert_eq!(loaded.shapes(), doc.shapes());
    assert_eq!(loaded.ranges(), doc.ranges());
    assert_eq!(loaded.geometry_version(), 0);
}

#[test]
fn test_minimal_document_json() {
    let json = r#"{
        "name": "minimal",
        "nodes": [{"x": 0.0, "y": -10.0}, {"x": 5.0, "y": 0.0}]
    }"#;
    let doc: PatternDocument = serde_json::from_str(json).unwrap();
    assert_eq!(doc.mode(), OutlineMode::HalfOpen);
    assert!(doc.shapes().is_empty());
    assert_eq!(doc.holster().transform, Transform2D::default());
    assert!(!doc.holster().locked);
}

#[test]
fn test_load_missing_file_fails() {
    let dir = TempDir::new().unwrap();
    let result = PatternDocument::load_from_file(&dir.path().join("absent.json"));
    assert!(result.is_err());
}

#[test]
fn test_load_rejects_invalid_ranges() {
    let dir = TempDir::new().unwrap();
    let nodes = r#""nodes": [{"x": 0.0, "y": -50.0}, {"x": 40.0, "y": -50.0}, {"x": 40.0, "y": 50.0}]"#;

    for ranges in [
        r#"[{"start": 0.9, "end": 0.1}]"#,
        r#"[{"start": 0.0, "end": 1.0}, {"start": -3.0, "end": 7.0}]"#,
    ] {
        let path = dir.path().join("bad.json");
        let json = format!(r#"{{"name": "bad", {}, "ranges": {}}}"#, nodes, ranges);
        std::fs::write(&path, json).unwrap();

        let err = PatternDocument::load_from_file(&path).unwrap_err();
        assert!(err.is_document_error());
        assert!(err.to_string().starts_with("Invalid edge range"));
    }
}

#[test]
fn test_load_accepts_valid_ranges() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("good.json");
    let json = r#"{
        "name": "good",
        "nodes": [{"x": 0.0, "y": -50.0}, {"x": 40.0, "y": 0.0}],
        "ranges": [{"start": 0.0, "end": 1.0}, {"start": 0.25, "end": 0.75, "kind": "perimeter"}]
    }"#;
    std::fs::write(&path, json).unwrap();

    let doc = PatternDocument::load_from_file(&path).unwrap();
    assert_eq!(doc.ranges().len(), 2);
    assert_eq!(doc.ranges()[1].kind, RangeKind::Perimeter);
}
