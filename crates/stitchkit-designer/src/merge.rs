//! Boolean union of the base outline with extension shapes.

use stitchkit_core::data::to_points;
use stitchkit_core::SampledPoint;
use tracing::{debug, trace, warn};

use crate::clipping::{from_fixed, int_area, to_fixed, IntPath, PolygonClipper};
use crate::config::PatternConfig;
use crate::shapes::PatternShape;
use crate::transform::ensure_counter_clockwise;

/// Unions `base` with every extension shape in `shapes`.
///
/// The base is the subject polygon and each extension a clip polygon. Of
/// the resulting paths only the one with the greatest area is kept, so an
/// extension that does not touch the base is dropped. The result is wound
/// counter clockwise and every point is synthetic.
///
/// Returns `base` unchanged when there is nothing to merge, when the base
/// has fewer than 3 points, or when the union fails or comes back empty.
pub fn merge_extensions(
    base: &[SampledPoint],
    shapes: &[PatternShape],
    config: &PatternConfig,
    clipper: &dyn PolygonClipper,
) -> Vec<SampledPoint> {
    let extensions: Vec<&PatternShape> = shapes.iter().filter(|s| s.is_extension()).collect();
    if extensions.is_empty() {
        return base.to_vec();
    }
    if base.len() < 3 {
        trace!("Merge skipped: base outline has {} points", base.len());
        return base.to_vec();
    }

    let scale = config.fixed_point_scale;
    let subject = to_fixed(&to_points(base), scale);
    let clips: Vec<IntPath> = extensions
        .iter()
        .map(|shape| to_fixed(&shape.world_outline(config), scale))
        .filter(|path| path.len() >= 3)
        .collect();
    if clips.is_empty() {
        return base.to_vec();
    }

    let results = match clipper.union(&[subject], &clips) {
        Ok(results) => results,
        Err(err) => {
            warn!("Extension union failed, using base outline: {}", err);
            return base.to_vec();
        }
    };

    let Some(outer) = results
        .iter()
        .max_by(|a, b| int_area(a).abs().total_cmp(&int_area(b).abs()))
    else {
        debug!("Extension union produced no paths");
        return base.to_vec();
    };

    debug!(
        "Merged {} extensions into base outline ({} result paths)",
        clips.len(),
        results.len()
    );

    let mut merged: Vec<SampledPoint> = from_fixed(outer, scale)
        .into_iter()
        .map(SampledPoint::synthetic)
        .collect();
    ensure_counter_clockwise(&mut merged);
    merged
}
