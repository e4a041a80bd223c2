//! Local-to-world mapping and outline mirroring.
//!
//! Symmetric geometry lives in holster-local space where the fold axis is
//! `x = 0`. A [`HolsterTransform`] maps it to world space: scale, then
//! rotate, then translate. Asymmetric geometry is stored in world space
//! directly.

use serde::{Deserialize, Serialize};
use stitchkit_core::data::signed_area;
use stitchkit_core::{Point, SampledPoint};

use crate::bezier::OutlineMode;

/// Scale, rotation (degrees) and translation applied in that order.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform2D {
    pub x: f64,
    pub y: f64,
    #[serde(default)]
    pub rotation: f64,
    #[serde(default = "unit_scale")]
    pub scale_x: f64,
    #[serde(default = "unit_scale")]
    pub scale_y: f64,
}

fn unit_scale() -> f64 {
    1.0
}

impl Default for Transform2D {
    fn default() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            rotation: 0.0,
            scale_x: 1.0,
            scale_y: 1.0,
        }
    }
}

impl Transform2D {
    pub fn translation(x: f64, y: f64) -> Self {
        Self {
            x,
            y,
            ..Self::default()
        }
    }

    pub fn with_rotation(mut self, degrees: f64) -> Self {
        self.rotation = degrees;
        self
    }

    pub fn with_scale(mut self, scale_x: f64, scale_y: f64) -> Self {
        self.scale_x = scale_x;
        self.scale_y = scale_y;
        self
    }

    /// World position of the local origin.
    pub fn origin(&self) -> Point {
        Point::new(self.x, self.y)
    }

    pub fn apply(&self, p: Point) -> Point {
        let sx = p.x * self.scale_x;
        let sy = p.y * self.scale_y;
        let (sin_a, cos_a) = self.rotation.to_radians().sin_cos();
        Point::new(
            self.x + sx * cos_a - sy * sin_a,
            self.y + sx * sin_a + sy * cos_a,
        )
    }

    /// Inverse mapping. `None` when either scale factor is zero.
    pub fn invert(&self, p: Point) -> Option<Point> {
        if self.scale_x.abs() <= f64::EPSILON || self.scale_y.abs() <= f64::EPSILON {
            return None;
        }
        let dx = p.x - self.x;
        let dy = p.y - self.y;
        let (sin_a, cos_a) = self.rotation.to_radians().sin_cos();
        let rx = dx * cos_a + dy * sin_a;
        let ry = -dx * sin_a + dy * cos_a;
        Some(Point::new(rx / self.scale_x, ry / self.scale_y))
    }

    pub fn apply_all(&self, points: &[Point]) -> Vec<Point> {
        points.iter().map(|p| self.apply(*p)).collect()
    }

    /// Negative determinant means the mapping flips winding.
    pub fn flips_winding(&self) -> bool {
        self.scale_x * self.scale_y < 0.0
    }
}

/// Placement of the pattern in world space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct HolsterTransform {
    #[serde(flatten)]
    pub transform: Transform2D,
    #[serde(default)]
    pub locked: bool,
}

impl HolsterTransform {
    pub fn new(transform: Transform2D) -> Self {
        Self {
            transform,
            locked: false,
        }
    }

    /// World anchor of the pattern; the reference centre for open-path
    /// offsetting.
    pub fn anchor(&self) -> Point {
        self.transform.origin()
    }

    pub fn to_world(&self, p: Point) -> Point {
        self.transform.apply(p)
    }

    pub fn to_local(&self, p: Point) -> Option<Point> {
        self.transform.invert(p)
    }

    pub fn samples_to_world(&self, samples: &[SampledPoint]) -> Vec<SampledPoint> {
        samples
            .iter()
            .map(|s| {
                let w = self.to_world(s.point());
                SampledPoint::new(w.x, w.y, s.seg_idx)
            })
            .collect()
    }

    /// Reflects a world point across the world image of the fold axis.
    ///
    /// For an unrotated holster with positive scale this is
    /// `x' = 2 * holster.x - x`.
    pub fn mirror_world_point(&self, p: Point) -> Point {
        match self.to_local(p) {
            Some(local) => self.to_world(local.mirrored_x()),
            None => Point::new(2.0 * self.transform.x - p.x, p.y),
        }
    }
}

/// Builds the full world outline from a local open half path.
///
/// The half path is mapped forward, then its x-negated copy is mapped in
/// reverse order, so the seam at the fold never crosses itself.
pub fn mirror_outline(half: &[SampledPoint], holster: &HolsterTransform) -> Vec<SampledPoint> {
    let mut out = holster.samples_to_world(half);
    out.reserve(half.len());
    for s in half.iter().rev() {
        let w = holster.to_world(s.point().mirrored_x());
        out.push(SampledPoint::new(w.x, w.y, s.seg_idx));
    }
    out
}

/// World outline for either outline mode, wound counter clockwise.
pub fn world_outline(
    local: &[SampledPoint],
    mode: OutlineMode,
    holster: &HolsterTransform,
) -> Vec<SampledPoint> {
    let mut out = match mode {
        OutlineMode::HalfOpen => mirror_outline(local, holster),
        OutlineMode::Closed => holster.samples_to_world(local),
    };
    ensure_counter_clockwise(&mut out);
    out
}

/// Reverses a closed sample loop in place when it winds clockwise.
pub fn ensure_counter_clockwise(samples: &mut [SampledPoint]) {
    let points: Vec<Point> = samples.iter().map(SampledPoint::point).collect();
    if signed_area(&points) < 0.0 {
        samples.reverse();
    }
}

/// Pulls a local point onto the fold axis when it lies within `threshold`.
pub fn snap_to_fold(p: Point, threshold: f64) -> Point {
    if p.x.abs() <= threshold {
        Point::new(0.0, p.y)
    } else {
        p
    }
}
