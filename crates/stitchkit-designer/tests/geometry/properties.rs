use proptest::prelude::*;
use stitchkit_core::data::{signed_area, to_points};
use stitchkit_designer::{
    mirror_outline, offset_closed_path, place_stitches, sample_outline, stitch_count, ArcTable,
    CavalierClipper, EdgeRange, HolsterTransform, Node, OutlineMode, PatternConfig,
    PatternDocument, PatternEngine, PatternShape, Point, RangeKind, SamplingOptions, Transform2D,
    DEFAULT_SCALE,
};

fn rectangle(w: f64, h: f64) -> Vec<Point> {
    vec![
        Point::new(0.0, 0.0),
        Point::new(w, 0.0),
        Point::new(w, h),
        Point::new(0.0, h),
    ]
}

proptest! {
    #[test]
    fn stitch_count_matches_formula(len in 1.0f64..1000.0, spacing in 0.1f64..50.0) {
        let ratio = len / spacing;
        prop_assume!((ratio - ratio.round()).abs() > 1e-6);

        let table = ArcTable::build(&[Point::new(0.0, 0.0), Point::new(len, 0.0)], false);
        let stitches = place_stitches(&table, &EdgeRange::full(RangeKind::Perimeter), spacing);
        let expected = ratio.floor() as usize + 1;
        prop_assert_eq!(stitches.len(), expected);
        prop_assert_eq!(stitch_count(len, spacing), expected);
    }

    #[test]
    fn mirrored_outline_is_symmetric(
        anchors in prop::collection::vec((1.0f64..80.0, -80.0f64..80.0), 2..6),
        handle in -10.0f64..10.0,
    ) {
        let nodes: Vec<Node> = anchors
            .iter()
            .map(|&(x, y)| Node::with_handles(x, y, Point::new(0.0, -handle), Point::new(0.0, handle)))
            .collect();
        let half = sample_outline(&nodes, OutlineMode::HalfOpen, &SamplingOptions::default());
        let full = to_points(&mirror_outline(&half, &HolsterTransform::default()));

        prop_assert_eq!(full.len(), 2 * half.len());
        for p in &full {
            let twin = Point::new(-p.x, p.y);
            prop_assert!(full.iter().any(|q| q.fuzzy_eq(&twin, 1e-9)));
        }
    }

    #[test]
    fn inward_offset_shrinks_monotonically(
        w in 20.0f64..120.0,
        h in 20.0f64..120.0,
        d1 in 0.5f64..4.0,
        extra in 0.5f64..4.0,
    ) {
        let clipper = CavalierClipper::default();
        let rect = rectangle(w, h);
        let area0 = signed_area(&rect);
        let a1 = signed_area(&offset_closed_path(&rect, -d1, DEFAULT_SCALE, &clipper));
        let a2 = signed_area(&offset_closed_path(&rect, -(d1 + extra), DEFAULT_SCALE, &clipper));
        prop_assert!(a1 < area0);
        prop_assert!(a2 < a1);
    }

    #[test]
    fn projection_round_trips_distance(
        steps in prop::collection::vec((0.5f64..10.0, -10.0f64..10.0), 2..30),
        t in 0.0f64..1.0,
    ) {
        let mut x = 0.0;
        let mut path = vec![Point::new(0.0, 0.0)];
        for (dx, y) in steps {
            x += dx;
            path.push(Point::new(x, y));
        }
        let table = ArcTable::build(&path, false);
        let d = t * table.total();
        let p = table.point_at_distance(d).unwrap();
        let fraction = table.project_to_fraction(p).unwrap();
        prop_assert!((fraction * table.total() - d).abs() < 1e-6);
    }

    #[test]
    fn linked_circle_matches_placed_source_stitches(
        width in 20.0f64..150.0,
        height in 20.0f64..200.0,
        start in 0.0f64..0.4,
        end in 0.6f64..1.0,
        spacing in 1.0f64..8.0,
        perimeter in any::<bool>(),
    ) {
        let kind = if perimeter { RangeKind::Perimeter } else { RangeKind::Outline };
        let doc = PatternDocument::new("prop", OutlineMode::HalfOpen)
            .with_nodes(vec![
                Node::corner(0.0, -height / 2.0),
                Node::corner(width / 2.0, -height / 2.0),
                Node::corner(width / 2.0, height / 2.0),
                Node::corner(0.0, height / 2.0),
            ])
            .with_holster(Transform2D::translation(200.0, 200.0));
        let config = PatternConfig { stitch_spacing: spacing, ..PatternConfig::default() };
        let mut engine = PatternEngine::new(doc, config);
        engine.document_mut().add_range(EdgeRange::new(start, end, kind).unwrap()).unwrap();
        engine.document_mut().add_shape(PatternShape::linked_circle(Point::zero(), 0));

        let circle = engine.linked_circle(0).unwrap();
        let source = engine.range_stitches(0).unwrap();
        let source_length = engine.range_path(kind).table().total() * (end - start);

        prop_assert!((circle.circumference() - source_length).abs() < 1e-9 * source_length.max(1.0));
        prop_assert_eq!(circle.stitch_count, source.points.len());
        prop_assert_eq!(circle.stitch_points().len(), source.points.len());
    }
}
