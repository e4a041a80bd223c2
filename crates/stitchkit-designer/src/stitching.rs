//! Edge ranges and stitch hole placement.

use serde::{Deserialize, Serialize};
use stitchkit_core::{DocumentError, Point};

use crate::arc_length::ArcTable;
use crate::transform::HolsterTransform;

const COUNT_EPS: f64 = 1e-9;

/// Path an edge range is measured along.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RangeKind {
    /// The right-half outline (or the full outline in closed mode).
    #[default]
    Outline,
    /// The closed perimeter after extension shapes are merged in.
    Perimeter,
}

/// Which end of an edge range a handle controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RangeHandle {
    Start,
    End,
}

/// A fractional sub-interval of a path's length.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EdgeRange {
    pub start: f64,
    pub end: f64,
    #[serde(default)]
    pub kind: RangeKind,
    /// Place matching holes on the mirrored side of the fold
    #[serde(default = "default_mirror")]
    pub mirror: bool,
    /// Range on another layer that is sewn to this one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub joined_with: Option<usize>,
}

fn default_mirror() -> bool {
    true
}

impl EdgeRange {
    pub fn new(start: f64, end: f64, kind: RangeKind) -> Result<Self, DocumentError> {
        let range = Self {
            start,
            end,
            kind,
            mirror: kind == RangeKind::Outline,
            joined_with: None,
        };
        range.validate()?;
        Ok(range)
    }

    pub fn full(kind: RangeKind) -> Self {
        Self {
            start: 0.0,
            end: 1.0,
            kind,
            mirror: kind == RangeKind::Outline,
            joined_with: None,
        }
    }

    pub fn with_mirror(mut self, mirror: bool) -> Self {
        self.mirror = mirror;
        self
    }

    pub fn joined_with(mut self, other: usize) -> Self {
        self.joined_with = Some(other);
        self
    }

    /// `0 <= start < end <= 1`
    pub fn validate(&self) -> Result<(), DocumentError> {
        if self.start >= 0.0 && self.start < self.end && self.end <= 1.0 {
            Ok(())
        } else {
            Err(DocumentError::InvalidRange {
                start: self.start,
                end: self.end,
            })
        }
    }

    pub fn span(&self) -> f64 {
        self.end - self.start
    }

    /// Start and end distances on a path of length `total`.
    pub fn distances(&self, total: f64) -> (f64, f64) {
        (total * self.start, total * self.end)
    }

    /// Moves one end to `fraction`, keeping at least `min_separation`
    /// between start and end.
    pub fn dragged(&self, handle: RangeHandle, fraction: f64, min_separation: f64) -> Self {
        let mut out = *self;
        match handle {
            RangeHandle::Start => {
                let hi = (self.end - min_separation).max(0.0);
                out.start = fraction.clamp(0.0, hi);
            }
            RangeHandle::End => {
                let lo = (self.start + min_separation).min(1.0);
                out.end = fraction.clamp(lo, 1.0);
            }
        }
        out
    }
}

/// Holes in a run of arc length `len` at `spacing`: `floor(len / spacing) + 1`.
///
/// Zero for a non-positive spacing or negative length.
pub fn stitch_count(len: f64, spacing: f64) -> usize {
    if !(spacing > 0.0) || !(len >= 0.0) {
        return 0;
    }
    (len / spacing + COUNT_EPS).floor() as usize + 1
}

/// Stitch positions for `range` along the path indexed by `table`.
///
/// Holes sit at `sd + k * spacing` for every `k` that stays within `ed`.
pub fn place_stitches(table: &ArcTable, range: &EdgeRange, spacing: f64) -> Vec<Point> {
    if !table.is_usable() {
        return Vec::new();
    }
    let (sd, ed) = range.distances(table.total());
    let count = stitch_count(ed - sd, spacing);
    (0..count)
        .filter_map(|k| table.point_at_distance(sd + k as f64 * spacing))
        .collect()
}

/// Reflects stitch positions across the world fold axis.
pub fn mirror_stitches(points: &[Point], holster: &HolsterTransform) -> Vec<Point> {
    points.iter().map(|p| holster.mirror_world_point(*p)).collect()
}

/// World positions of a range's start and end handles.
pub fn handle_positions(table: &ArcTable, range: &EdgeRange) -> Option<(Point, Point)> {
    let (sd, ed) = range.distances(table.total());
    Some((table.point_at_distance(sd)?, table.point_at_distance(ed)?))
}

/// Stitch holes placed for one edge range.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RangeStitches {
    pub range_index: usize,
    pub kind: RangeKind,
    pub points: Vec<Point>,
    /// Matching holes across the fold; empty when mirroring is off
    pub mirrored: Vec<Point>,
}

impl RangeStitches {
    pub fn count(&self) -> usize {
        self.points.len() + self.mirrored.len()
    }

    pub fn all_points(&self) -> impl Iterator<Item = &Point> {
        self.points.iter().chain(self.mirrored.iter())
    }
}
