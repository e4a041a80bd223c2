//! Auxiliary pattern shapes: holes, cutouts, linked circles and extensions.
//!
//! Each variant carries only the fields it needs. Local outlines are centred
//! on the shape origin and wound counter clockwise; the shape transform puts
//! them in world space.

use serde::{Deserialize, Serialize};
use std::f64::consts::{FRAC_PI_2, PI, TAU};
use stitchkit_core::{Node, Point};

use crate::bezier::sample_closed;
use crate::config::PatternConfig;
use crate::transform::Transform2D;

/// Types of shapes that can be placed on a pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShapeType {
    Circle,
    Ellipse,
    Pill,
    Rectangle,
    CustomPolygon,
    LinkedCircle,
    Extension,
}

/// Geometry of a pattern shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ShapeKind {
    Circle {
        radius: f64,
    },
    Ellipse {
        rx: f64,
        ry: f64,
    },
    /// Stadium: a rectangle with fully rounded short ends.
    Pill {
        width: f64,
        height: f64,
    },
    Rectangle {
        width: f64,
        height: f64,
        #[serde(default)]
        corner_radius: f64,
    },
    CustomPolygon {
        nodes: Vec<Node>,
    },
    /// Circle sized to match the length of an edge range.
    LinkedCircle {
        source_range: usize,
    },
    /// Closed outline unioned into the base pattern boundary.
    Extension {
        nodes: Vec<Node>,
    },
}

/// A shape with its placement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatternShape {
    #[serde(default)]
    pub transform: Transform2D,
    pub kind: ShapeKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl PatternShape {
    pub fn new(kind: ShapeKind, transform: Transform2D) -> Self {
        Self {
            transform,
            kind,
            label: None,
        }
    }

    pub fn circle(center: Point, radius: f64) -> Self {
        Self::new(
            ShapeKind::Circle { radius },
            Transform2D::translation(center.x, center.y),
        )
    }

    pub fn extension(nodes: Vec<Node>, transform: Transform2D) -> Self {
        Self::new(ShapeKind::Extension { nodes }, transform)
    }

    pub fn linked_circle(center: Point, source_range: usize) -> Self {
        Self::new(
            ShapeKind::LinkedCircle { source_range },
            Transform2D::translation(center.x, center.y),
        )
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn shape_type(&self) -> ShapeType {
        match self.kind {
            ShapeKind::Circle { .. } => ShapeType::Circle,
            ShapeKind::Ellipse { .. } => ShapeType::Ellipse,
            ShapeKind::Pill { .. } => ShapeType::Pill,
            ShapeKind::Rectangle { .. } => ShapeType::Rectangle,
            ShapeKind::CustomPolygon { .. } => ShapeType::CustomPolygon,
            ShapeKind::LinkedCircle { .. } => ShapeType::LinkedCircle,
            ShapeKind::Extension { .. } => ShapeType::Extension,
        }
    }

    pub fn is_extension(&self) -> bool {
        matches!(self.kind, ShapeKind::Extension { .. })
    }

    /// Closed outline in shape-local space.
    ///
    /// Linked circles have no intrinsic geometry; their outline comes from
    /// the linked circle matcher, so this returns an empty path for them.
    pub fn local_outline(&self, config: &PatternConfig) -> Vec<Point> {
        let segments = config.circle_segments.max(3);
        match &self.kind {
            ShapeKind::Circle { radius } => ellipse_points(*radius, *radius, segments),
            ShapeKind::Ellipse { rx, ry } => ellipse_points(*rx, *ry, segments),
            ShapeKind::Pill { width, height } => pill_points(*width, *height, segments),
            ShapeKind::Rectangle {
                width,
                height,
                corner_radius,
            } => rectangle_points(*width, *height, *corner_radius, segments),
            ShapeKind::CustomPolygon { nodes } | ShapeKind::Extension { nodes } => {
                sample_closed(nodes, &config.sampling_options())
            }
            ShapeKind::LinkedCircle { .. } => Vec::new(),
        }
    }

    /// Closed outline in world space.
    pub fn world_outline(&self, config: &PatternConfig) -> Vec<Point> {
        self.transform.apply_all(&self.local_outline(config))
    }
}

/// Regular polygon approximation of an axis-aligned ellipse.
pub fn ellipse_points(rx: f64, ry: f64, segments: usize) -> Vec<Point> {
    (0..segments)
        .map(|i| {
            let angle = TAU * i as f64 / segments as f64;
            Point::new(rx * angle.cos(), ry * angle.sin())
        })
        .collect()
}

fn arc_points(center: Point, radius: f64, start: f64, sweep: f64, steps: usize, out: &mut Vec<Point>) {
    for k in 0..=steps {
        let angle = start + sweep * k as f64 / steps as f64;
        out.push(Point::new(
            center.x + radius * angle.cos(),
            center.y + radius * angle.sin(),
        ));
    }
}

fn pill_points(width: f64, height: f64, segments: usize) -> Vec<Point> {
    let (long, short) = (width.max(height), width.min(height));
    let radius = short / 2.0;
    let half_straight = (long - short) / 2.0;
    let cap_steps = (segments / 2).max(2);

    let mut points = Vec::with_capacity(2 * (cap_steps + 1));
    arc_points(Point::new(half_straight, 0.0), radius, -FRAC_PI_2, PI, cap_steps, &mut points);
    arc_points(Point::new(-half_straight, 0.0), radius, FRAC_PI_2, PI, cap_steps, &mut points);

    if height > width {
        // Rotate a quarter turn so the long axis is vertical.
        points = points.into_iter().map(|p| Point::new(-p.y, p.x)).collect();
    }
    points
}

fn rectangle_points(width: f64, height: f64, corner_radius: f64, segments: usize) -> Vec<Point> {
    let hw = width / 2.0;
    let hh = height / 2.0;
    let r = corner_radius.clamp(0.0, hw.min(hh));
    if r <= 0.0 {
        return vec![
            Point::new(-hw, -hh),
            Point::new(hw, -hh),
            Point::new(hw, hh),
            Point::new(-hw, hh),
        ];
    }

    let steps = (segments / 4).max(1);
    let mut points = Vec::with_capacity(4 * (steps + 1));
    arc_points(Point::new(hw - r, -hh + r), r, -FRAC_PI_2, FRAC_PI_2, steps, &mut points);
    arc_points(Point::new(hw - r, hh - r), r, 0.0, FRAC_PI_2, steps, &mut points);
    arc_points(Point::new(-hw + r, hh - r), r, FRAC_PI_2, FRAC_PI_2, steps, &mut points);
    arc_points(Point::new(-hw + r, -hh + r), r, PI, FRAC_PI_2, steps, &mut points);
    points
}
