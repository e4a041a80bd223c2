//! Planar data model
//!
//! All coordinates are millimetres in a single 2D plane. `Point` doubles as a
//! vector for the handful of operations the geometry engine needs.

use serde::{Deserialize, Serialize};
use std::ops::{Add, Mul, Neg, Sub};

/// Represents a 2D point with X and Y coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    /// Creates a new point with the given X and Y coordinates.
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub const fn zero() -> Self {
        Self { x: 0.0, y: 0.0 }
    }

    /// Calculates the distance to another point.
    pub fn distance_to(&self, other: &Point) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }

    pub fn distance_squared_to(&self, other: &Point) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        dx * dx + dy * dy
    }

    /// Length when the point is read as a vector.
    pub fn length(&self) -> f64 {
        (self.x * self.x + self.y * self.y).sqrt()
    }

    pub fn dot(&self, other: &Point) -> f64 {
        self.x * other.x + self.y * other.y
    }

    /// Unit vector in the same direction, or `None` for a zero-length vector.
    pub fn normalized(&self) -> Option<Point> {
        let len = self.length();
        if len <= f64::EPSILON {
            return None;
        }
        Some(Point::new(self.x / len, self.y / len))
    }

    /// Linear interpolation towards `other`.
    pub fn lerp(&self, other: &Point, t: f64) -> Point {
        Point::new(
            self.x + (other.x - self.x) * t,
            self.y + (other.y - self.y) * t,
        )
    }

    /// Point reflected across the local fold axis (`x = 0`).
    pub fn mirrored_x(&self) -> Point {
        Point::new(-self.x, self.y)
    }

    pub fn fuzzy_eq(&self, other: &Point, eps: f64) -> bool {
        (self.x - other.x).abs() <= eps && (self.y - other.y).abs() <= eps
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f64> for Point {
    type Output = Point;

    fn mul(self, rhs: f64) -> Point {
        Point::new(self.x * rhs, self.y * rhs)
    }
}

impl Neg for Point {
    type Output = Point;

    fn neg(self) -> Point {
        Point::new(-self.x, -self.y)
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Point::new(x, y)
    }
}

/// An editable outline node: an anchor plus two control-handle offsets.
///
/// `h1` shapes the curve arriving at the anchor and `h2` the curve leaving
/// it. Both are stored relative to the anchor.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Node {
    pub x: f64,
    pub y: f64,
    #[serde(default)]
    pub h1: Point,
    #[serde(default)]
    pub h2: Point,
}

impl Node {
    /// A corner node with zero-length handles.
    pub fn corner(x: f64, y: f64) -> Self {
        Self {
            x,
            y,
            h1: Point::zero(),
            h2: Point::zero(),
        }
    }

    pub fn with_handles(x: f64, y: f64, h1: Point, h2: Point) -> Self {
        Self { x, y, h1, h2 }
    }

    pub fn anchor(&self) -> Point {
        Point::new(self.x, self.y)
    }

    /// Absolute position of the incoming control handle.
    pub fn in_control(&self) -> Point {
        self.anchor() + self.h1
    }

    /// Absolute position of the outgoing control handle.
    pub fn out_control(&self) -> Point {
        self.anchor() + self.h2
    }

    /// Node reflected across the fold axis. Handles swap roles because the
    /// mirrored outline is traversed in the opposite direction.
    pub fn mirrored_x(&self) -> Node {
        Node {
            x: -self.x,
            y: self.y,
            h1: self.h2.mirrored_x(),
            h2: self.h1.mirrored_x(),
        }
    }
}

/// A point produced by bezier sampling.
///
/// `seg_idx` names the outline segment that produced the point, or is `None`
/// for synthetic points (fold stubs, union results) that no longer map back
/// to an editable segment.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SampledPoint {
    pub x: f64,
    pub y: f64,
    pub seg_idx: Option<usize>,
}

impl SampledPoint {
    pub fn new(x: f64, y: f64, seg_idx: Option<usize>) -> Self {
        Self { x, y, seg_idx }
    }

    pub fn synthetic(p: Point) -> Self {
        Self::new(p.x, p.y, None)
    }

    pub fn on_segment(p: Point, seg_idx: usize) -> Self {
        Self::new(p.x, p.y, Some(seg_idx))
    }

    pub fn point(&self) -> Point {
        Point::new(self.x, self.y)
    }
}

/// Strips segment tags from a sampled path.
pub fn to_points(samples: &[SampledPoint]) -> Vec<Point> {
    samples.iter().map(SampledPoint::point).collect()
}

/// Signed area of a closed polygon (shoelace). Counter clockwise is positive.
pub fn signed_area(points: &[Point]) -> f64 {
    if points.len() < 3 {
        return 0.0;
    }
    let mut double_area = 0.0;
    for (i, p1) in points.iter().enumerate() {
        let p2 = points[(i + 1) % points.len()];
        double_area += p1.x * p2.y - p2.x * p1.y;
    }
    double_area / 2.0
}

/// Axis-aligned bounds as `(min_x, min_y, max_x, max_y)`.
pub fn bounding_box(points: &[Point]) -> Option<(f64, f64, f64, f64)> {
    let first = points.first()?;
    let mut bounds = (first.x, first.y, first.x, first.y);
    for p in points.iter().skip(1) {
        bounds.0 = bounds.0.min(p.x);
        bounds.1 = bounds.1.min(p.y);
        bounds.2 = bounds.2.max(p.x);
        bounds.3 = bounds.3.max(p.y);
    }
    Some(bounds)
}
