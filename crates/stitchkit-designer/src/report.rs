//! Stitch count reporting.
//!
//! Summarises every range and linked circle, and flags joined ranges whose
//! stitch counts differ so the two layers would not line up when sewn.

use serde::Serialize;
use std::f64::consts::TAU;
use stitchkit_core::units::{convert_length, inch_to_mm};
use stitchkit_core::MeasurementSystem;
use tracing::warn;

use crate::engine::PatternEngine;
use crate::shapes::ShapeKind;
use crate::stitching::RangeKind;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RangeReport {
    pub index: usize,
    pub kind: RangeKind,
    pub start: f64,
    pub end: f64,
    /// Length of the range on its unoffset path
    pub length: f64,
    pub stitch_count: usize,
    pub mirrored: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LinkedCircleReport {
    pub shape_index: usize,
    pub source_range: usize,
    pub radius: f64,
    pub circumference: f64,
    pub stitch_count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StitchMismatch {
    pub range: usize,
    pub joined_with: usize,
    pub count: usize,
    pub joined_count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StitchReport {
    pub pattern: String,
    pub units: MeasurementSystem,
    pub ranges: Vec<RangeReport>,
    pub linked_circles: Vec<LinkedCircleReport>,
    pub mismatches: Vec<StitchMismatch>,
    pub total_stitches: usize,
}

impl StitchReport {
    pub fn build(engine: &PatternEngine) -> Self {
        let document = engine.document();
        let ranges_doc = document.ranges();

        let mut ranges = Vec::with_capacity(ranges_doc.len());
        for (index, range) in ranges_doc.iter().enumerate() {
            let Some(stitches) = engine.range_stitches(index) else {
                continue;
            };
            let total = engine.range_path(range.kind).table().total();
            ranges.push(RangeReport {
                index,
                kind: range.kind,
                start: range.start,
                end: range.end,
                length: total * range.span(),
                stitch_count: stitches.count(),
                mirrored: !stitches.mirrored.is_empty(),
            });
        }

        let linked_circles = document
            .shapes()
            .iter()
            .enumerate()
            .filter(|(_, shape)| matches!(shape.kind, ShapeKind::LinkedCircle { .. }))
            .filter_map(|(shape_index, _)| {
                let circle = engine.linked_circle(shape_index)?;
                Some(LinkedCircleReport {
                    shape_index,
                    source_range: circle.source_range,
                    radius: circle.radius,
                    circumference: circle.circumference(),
                    stitch_count: circle.stitch_count,
                })
            })
            .collect();

        let count_of = |index: usize| {
            ranges
                .iter()
                .find(|r: &&RangeReport| r.index == index)
                .map(|r| r.stitch_count)
        };

        let mut mismatches = Vec::new();
        for (index, range) in ranges_doc.iter().enumerate() {
            let Some(other) = range.joined_with else {
                continue;
            };
            let Some(other_range) = ranges_doc.get(other) else {
                warn!("Range {} is joined to missing range {}", index, other);
                continue;
            };
            // Report a mutually joined pair once.
            if other < index && other_range.joined_with == Some(index) {
                continue;
            }
            if let (Some(count), Some(joined_count)) = (count_of(index), count_of(other)) {
                if count != joined_count {
                    mismatches.push(StitchMismatch {
                        range: index,
                        joined_with: other,
                        count,
                        joined_count,
                    });
                }
            }
        }

        let total_stitches = ranges.iter().map(|r| r.stitch_count).sum();

        Self {
            pattern: document.name.clone(),
            units: MeasurementSystem::Metric,
            ranges,
            linked_circles,
            mismatches,
            total_stitches,
        }
    }

    pub fn has_mismatches(&self) -> bool {
        !self.mismatches.is_empty()
    }

    /// Copy of the report with every length expressed in `system`.
    pub fn in_units(&self, system: MeasurementSystem) -> Self {
        let mut out = self.clone();
        if self.units == system {
            return out;
        }
        let from = self.units;
        let convert = |value: f64| {
            let mm = match from {
                MeasurementSystem::Metric => value,
                MeasurementSystem::Imperial => inch_to_mm(value),
            };
            convert_length(mm, system)
        };
        for r in &mut out.ranges {
            r.length = convert(r.length);
        }
        for c in &mut out.linked_circles {
            c.radius = convert(c.radius);
            c.circumference = TAU * c.radius;
        }
        out.units = system;
        out
    }
}
