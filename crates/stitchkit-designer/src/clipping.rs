//! Fixed-point polygon clipping backend.
//!
//! Boolean union and closed-path offsetting run on integer coordinates
//! (`mm * scale`, nominally 100 units per millimetre) so the polygon library
//! never sees accumulated floating-point noise from interactive edits.
//! [`PolygonClipper`] is the seam; [`CavalierClipper`] implements it on top
//! of `cavalier_contours`.

use cavalier_contours::polyline::{BooleanOp, PlineSource, PlineSourceMut, PlineVertex, Polyline};
use std::panic;
use stitchkit_core::{GeometryError, Point};
use tracing::{debug, warn};

/// Nominal fixed-point resolution: units per millimetre.
pub const DEFAULT_SCALE: f64 = 100.0;

/// A point in fixed-point space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct IntPoint {
    pub x: i64,
    pub y: i64,
}

impl IntPoint {
    pub fn new(x: i64, y: i64) -> Self {
        Self { x, y }
    }
}

pub type IntPath = Vec<IntPoint>;

/// Converts millimetre points into fixed-point space.
pub fn to_fixed(points: &[Point], scale: f64) -> IntPath {
    points
        .iter()
        .map(|p| IntPoint::new((p.x * scale).round() as i64, (p.y * scale).round() as i64))
        .collect()
}

/// Converts a fixed-point path back into millimetres.
pub fn from_fixed(path: &[IntPoint], scale: f64) -> Vec<Point> {
    path.iter()
        .map(|p| Point::new(p.x as f64 / scale, p.y as f64 / scale))
        .collect()
}

/// Signed area of a fixed-point polygon in squared units. Counter clockwise
/// is positive.
pub fn int_area(path: &[IntPoint]) -> f64 {
    if path.len() < 3 {
        return 0.0;
    }
    let mut double_area: i128 = 0;
    for (i, p1) in path.iter().enumerate() {
        let p2 = path[(i + 1) % path.len()];
        double_area += p1.x as i128 * p2.y as i128 - p2.x as i128 * p1.y as i128;
    }
    double_area as f64 / 2.0
}

/// Boolean and offset operations over fixed-point polygons.
pub trait PolygonClipper {
    /// Non-zero union of all subject and clip polygons. Disjoint inputs come
    /// back as separate paths; holes are not reported.
    fn union(&self, subjects: &[IntPath], clips: &[IntPath]) -> Result<Vec<IntPath>, GeometryError>;

    /// Offsets a closed polygon with round joins. Negative `delta` shrinks
    /// the polygon regardless of its winding. An empty result means the
    /// polygon collapsed.
    fn offset(&self, path: &[IntPoint], delta: f64) -> Result<Vec<IntPath>, GeometryError>;
}

/// [`PolygonClipper`] backed by `cavalier_contours` polylines.
#[derive(Debug, Clone, Copy)]
pub struct CavalierClipper {
    /// Maximum deviation, in fixed-point units, when flattening the arcs
    /// produced by round joins.
    pub arc_tolerance: f64,
}

impl Default for CavalierClipper {
    fn default() -> Self {
        Self {
            arc_tolerance: 0.05 * DEFAULT_SCALE,
        }
    }
}

impl CavalierClipper {
    pub fn new(arc_tolerance: f64) -> Self {
        Self { arc_tolerance }
    }

    /// Builds a closed polyline, dropping repeated vertexes and forcing the
    /// requested winding. `None` when fewer than 3 distinct vertexes remain.
    fn prepare_polyline(path: &[IntPoint], clockwise: bool) -> Option<Polyline<f64>> {
        let mut clean: Vec<IntPoint> = Vec::with_capacity(path.len());
        for p in path {
            if clean.last() != Some(p) {
                clean.push(*p);
            }
        }
        while clean.len() > 1 && clean.first() == clean.last() {
            clean.pop();
        }
        if clean.len() < 3 {
            return None;
        }

        let area = int_area(&clean);
        if area == 0.0 {
            return None;
        }
        if (area < 0.0) != clockwise {
            clean.reverse();
        }

        let mut polyline = Polyline::new();
        for p in clean {
            polyline.add_vertex(PlineVertex::new(p.x as f64, p.y as f64, 0.0));
        }
        polyline.set_is_closed(true);
        Some(polyline)
    }

    fn polyline_to_path(&self, pline: &Polyline<f64>) -> IntPath {
        let has_arcs = pline.vertex_data.iter().any(|v| !v.bulge_is_zero());
        let flattened = if has_arcs {
            pline.arcs_to_approx_lines(self.arc_tolerance)
        } else {
            None
        };
        let source = flattened.as_ref().unwrap_or(pline);

        let mut path: IntPath = Vec::with_capacity(source.vertex_data.len());
        for v in &source.vertex_data {
            let p = IntPoint::new(v.x.round() as i64, v.y.round() as i64);
            if path.last() != Some(&p) {
                path.push(p);
            }
        }
        while path.len() > 1 && path.first() == path.last() {
            path.pop();
        }
        path
    }
}

/// Runs a polygon library call, turning a panic into a backend error.
fn guarded<T>(operation: &str, f: impl FnOnce() -> T) -> Result<T, GeometryError> {
    panic::catch_unwind(panic::AssertUnwindSafe(f)).map_err(|_| {
        warn!("Panic during {}", operation);
        GeometryError::Backend(format!("{} panicked", operation))
    })
}

impl PolygonClipper for CavalierClipper {
    fn union(&self, subjects: &[IntPath], clips: &[IntPath]) -> Result<Vec<IntPath>, GeometryError> {
        let mut regions: Vec<Polyline<f64>> = subjects
            .iter()
            .filter_map(|s| Self::prepare_polyline(s, false))
            .collect();

        for clip in clips {
            let Some(mut merged) = Self::prepare_polyline(clip, false) else {
                debug!("Skipping degenerate clip polygon ({} points)", clip.len());
                continue;
            };

            let mut untouched = Vec::with_capacity(regions.len());
            for region in regions.drain(..) {
                let result = guarded("polyline union", || region.boolean(&merged, BooleanOp::Or))?;
                // A single positive result means the two overlapped or one
                // contained the other; otherwise they are disjoint.
                if result.pos_plines.len() == 1 {
                    if let Some(joined) = result.pos_plines.into_iter().next() {
                        merged = joined.pline;
                    }
                } else {
                    untouched.push(region);
                }
            }
            untouched.push(merged);
            regions = untouched;
        }

        Ok(regions
            .iter()
            .map(|r| self.polyline_to_path(r))
            .filter(|p| p.len() >= 3)
            .collect())
    }

    fn offset(&self, path: &[IntPoint], delta: f64) -> Result<Vec<IntPath>, GeometryError> {
        // Clockwise winding puts the interior on the right, which is where
        // cavalier offsets negative distances.
        let polyline = Self::prepare_polyline(path, true).ok_or(
            GeometryError::InsufficientGeometry {
                operation: "closed offset",
                required: 3,
                actual: path.len(),
            },
        )?;

        let offsets = guarded("parallel offset", || polyline.parallel_offset(delta))?;
        Ok(offsets
            .iter()
            .map(|p| self.polyline_to_path(p))
            .filter(|p| p.len() >= 3)
            .collect())
    }
}
