//! Inward path offsetting.
//!
//! Open half outlines use a per-point normal offset whose direction is
//! decided against a fixed reference centre. Closed paths go through the
//! fixed-point [`PolygonClipper`].

use stitchkit_core::data::signed_area;
use stitchkit_core::Point;
use tracing::{debug, trace, warn};

use crate::clipping::{from_fixed, int_area, to_fixed, PolygonClipper};

/// Offsets an open path point by point.
///
/// The tangent at each point is a forward difference at the first point, a
/// backward difference at the last and a central difference elsewhere. Of
/// the two unit normals, the one that carries the point further from
/// `reference_center` is taken (ties go to the left-hand normal), and the
/// point moves by `normal * delta`; a negative `delta` therefore moves the
/// point towards the pattern interior. No corner joining is done.
///
/// This is an approximation that holds at the sampling density of the
/// outline builder; on strongly non-convex curves the chosen normal can
/// point the wrong way locally.
///
/// Paths with fewer than 2 points are returned unchanged.
pub fn offset_open_path(points: &[Point], delta: f64, reference_center: Point) -> Vec<Point> {
    if points.len() < 2 {
        trace!("Open offset skipped: {} points", points.len());
        return points.to_vec();
    }

    let last = points.len() - 1;
    points
        .iter()
        .enumerate()
        .map(|(i, &p)| {
            let tangent = if i == 0 {
                points[1] - points[0]
            } else if i == last {
                points[last] - points[last - 1]
            } else {
                points[i + 1] - points[i - 1]
            };
            let Some(t) = tangent.normalized() else {
                return p;
            };

            let left = Point::new(-t.y, t.x);
            let right = Point::new(t.y, -t.x);
            let normal = if (p + left).distance_squared_to(&reference_center)
                >= (p + right).distance_squared_to(&reference_center)
            {
                left
            } else {
                right
            };
            p + normal * delta
        })
        .collect()
}

/// Offsets a closed polygon through the clipper in fixed-point space.
///
/// Returns the largest resulting path, an empty path when the polygon
/// collapses, and the input unchanged when it has fewer than 3 points or the
/// backend fails.
pub fn offset_closed_path(
    points: &[Point],
    delta: f64,
    scale: f64,
    clipper: &dyn PolygonClipper,
) -> Vec<Point> {
    if points.len() < 3 {
        trace!("Closed offset skipped: {} points", points.len());
        return points.to_vec();
    }
    if delta == 0.0 {
        return points.to_vec();
    }

    let fixed = to_fixed(points, scale);
    let results = match clipper.offset(&fixed, delta * scale) {
        Ok(results) => results,
        Err(err) => {
            warn!("Closed offset failed, keeping original path: {}", err);
            return points.to_vec();
        }
    };

    let Some(best) = results
        .iter()
        .max_by(|a, b| int_area(a).abs().total_cmp(&int_area(b).abs()))
    else {
        debug!("Closed offset by {} collapsed the path", delta);
        return Vec::new();
    };

    let mut out = from_fixed(best, scale);
    // Keep the caller's winding so fractions along the path run the same way.
    if (signed_area(&out) < 0.0) != (signed_area(points) < 0.0) {
        out.reverse();
    }
    out
}
