//! Circles whose circumference matches the length of an edge range.
//!
//! Used for round parts (bottoms, caps) sewn onto a pattern edge: the
//! circle carries exactly as many holes as were placed on the edge it joins,
//! spread evenly around its circumference.

use serde::Serialize;
use std::f64::consts::TAU;
use stitchkit_core::{GeometryError, Point};
use tracing::{debug, warn};

use crate::arc_length::ArcTable;
use crate::shapes::ellipse_points;
use crate::stitching::EdgeRange;

/// Derived geometry of a linked circle.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LinkedCircle {
    pub source_range: usize,
    pub center: Point,
    pub radius: f64,
    /// Real length of the source range on its unoffset reference path
    pub source_length: f64,
    /// Polygon approximation for rendering
    pub points: Vec<Point>,
    /// Stitch positions as fractions of the circumference
    pub stitch_fractions: Vec<f64>,
    pub stitch_count: usize,
}

impl LinkedCircle {
    pub fn circumference(&self) -> f64 {
        TAU * self.radius
    }

    /// World positions of the stitch holes, starting at angle zero and
    /// running counter clockwise.
    pub fn stitch_points(&self) -> Vec<Point> {
        self.stitch_fractions
            .iter()
            .map(|f| {
                let angle = TAU * f;
                Point::new(
                    self.center.x + self.radius * angle.cos(),
                    self.center.y + self.radius * angle.sin(),
                )
            })
            .collect()
    }
}

/// Builds the circle linked to `ranges[source_index]`.
///
/// `reference` is the unoffset path the range is measured on and sets the
/// radius. `source_stitches` is the number of holes placed on one side of
/// the source range; the circle gets the same number. Returns `None` when
/// the range no longer exists, the path has fewer than 3 points, or the
/// range has no length.
pub fn derive_linked_circle(
    ranges: &[EdgeRange],
    source_index: usize,
    reference: &[Point],
    closed: bool,
    center: Point,
    source_stitches: usize,
    segments: usize,
) -> Option<LinkedCircle> {
    let Some(range) = ranges.get(source_index) else {
        let err = GeometryError::MissingReference {
            kind: "edge range",
            index: source_index,
        };
        warn!("Linked circle skipped: {}", err);
        return None;
    };
    if reference.len() < 3 {
        debug!("Linked circle reference path has {} points", reference.len());
        return None;
    }

    let table = ArcTable::build(reference, closed);
    let length = table.total() * range.span();
    if !(length > 0.0) {
        let err = GeometryError::DegenerateLength {
            operation: "linked circle",
        };
        debug!("Source range {}: {}", source_index, err);
        return None;
    }

    let radius = length / TAU;
    let count = source_stitches;
    let stitch_fractions = (0..count).map(|k| k as f64 / count as f64).collect();

    let points = ellipse_points(radius, radius, segments.max(3))
        .into_iter()
        .map(|p| p + center)
        .collect();

    Some(LinkedCircle {
        source_range: source_index,
        center,
        radius,
        source_length: length,
        points,
        stitch_fractions,
        stitch_count: count,
    })
}
