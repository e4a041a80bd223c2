//! Pattern engine controller.
//!
//! [`PatternEngine`] owns the document and answers every geometry query
//! against it. Queries never fail: missing references give `None`,
//! degenerate input gives empty or unchanged paths, and the reason is
//! logged.

use stitchkit_core::data::to_points;
use stitchkit_core::{DocumentError, GeometryError, Point, SampledPoint};
use tracing::{debug, warn};

use crate::arc_length::ArcTable;
use crate::bezier::{sample_outline, OutlineMode};
use crate::cache::{CacheStats, GeometryCache};
use crate::clipping::{CavalierClipper, PolygonClipper};
use crate::config::PatternConfig;
use crate::document::PatternDocument;
use crate::linked_circle::{derive_linked_circle, LinkedCircle};
use crate::merge::merge_extensions;
use crate::offset::{offset_closed_path, offset_open_path};
use crate::report::StitchReport;
use crate::shapes::{PatternShape, ShapeKind};
use crate::stitching::{
    handle_positions, mirror_stitches, place_stitches, EdgeRange, RangeHandle, RangeKind,
    RangeStitches,
};
use crate::transform::world_outline;

/// A world-space path that edge ranges are measured along.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RangePath {
    pub samples: Vec<SampledPoint>,
    pub closed: bool,
}

impl RangePath {
    pub fn open(samples: Vec<SampledPoint>) -> Self {
        Self {
            samples,
            closed: false,
        }
    }

    pub fn closed(samples: Vec<SampledPoint>) -> Self {
        Self {
            samples,
            closed: true,
        }
    }

    fn from_points(points: Vec<Point>, closed: bool) -> Self {
        Self {
            samples: points.into_iter().map(SampledPoint::synthetic).collect(),
            closed,
        }
    }

    pub fn points(&self) -> Vec<Point> {
        to_points(&self.samples)
    }

    pub fn table(&self) -> ArcTable {
        ArcTable::from_samples(&self.samples, self.closed)
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}

/// Geometry engine over one pattern document.
pub struct PatternEngine {
    document: PatternDocument,
    config: PatternConfig,
    clipper: Box<dyn PolygonClipper>,
    cache: GeometryCache,
}

impl PatternEngine {
    /// Engine with the default `cavalier_contours` backend.
    pub fn new(document: PatternDocument, config: PatternConfig) -> Self {
        let clipper = CavalierClipper::new(config.scaled_arc_tolerance());
        Self::with_clipper(document, config, Box::new(clipper))
    }

    pub fn with_clipper(
        document: PatternDocument,
        config: PatternConfig,
        clipper: Box<dyn PolygonClipper>,
    ) -> Self {
        Self {
            document,
            config,
            clipper,
            cache: GeometryCache::new(),
        }
    }

    pub fn document(&self) -> &PatternDocument {
        &self.document
    }

    /// Mutable access for edits. Document edit methods bump the geometry
    /// version, which invalidates cached geometry on the next query.
    pub fn document_mut(&mut self) -> &mut PatternDocument {
        &mut self.document
    }

    pub fn into_document(self) -> PatternDocument {
        self.document
    }

    pub fn config(&self) -> &PatternConfig {
        &self.config
    }

    /// Replaces the configuration. The polygon backend keeps the arc
    /// tolerance it was built with.
    pub fn set_config(&mut self, config: PatternConfig) {
        self.config = config;
    }

    pub fn cache_stats(&self) -> CacheStats {
        self.cache.stats()
    }

    fn sync_cache(&self) {
        self.cache
            .sync(self.document.geometry_version(), &self.config);
    }

    fn has_outline(&self) -> bool {
        self.document.nodes().len() >= self.document.mode().min_nodes()
    }

    // ---- outlines ----

    /// Sampled outline in local space: the right half with fold stubs, or
    /// the full perimeter in closed mode.
    pub fn local_outline(&self) -> Vec<SampledPoint> {
        sample_outline(
            self.document.nodes(),
            self.document.mode(),
            &self.config.sampling_options(),
        )
    }

    /// The local outline mapped to world space without mirroring.
    pub fn half_outline_world(&self) -> Vec<SampledPoint> {
        self.document
            .holster()
            .samples_to_world(&self.local_outline())
    }

    /// Full closed world outline before extensions are merged, wound counter
    /// clockwise. Empty when there are too few nodes.
    pub fn base_outline(&self) -> Vec<SampledPoint> {
        if !self.has_outline() {
            return Vec::new();
        }
        world_outline(
            &self.local_outline(),
            self.document.mode(),
            self.document.holster(),
        )
    }

    /// Base outline unioned with every extension shape.
    pub fn merged_outline(&self) -> Vec<SampledPoint> {
        self.sync_cache();
        self.cache.merged_or_insert_with(|| {
            merge_extensions(
                &self.base_outline(),
                self.document.shapes(),
                &self.config,
                self.clipper.as_ref(),
            )
        })
    }

    // ---- range paths ----

    /// Unoffset path that ranges of `kind` are measured on.
    ///
    /// Outline ranges run over the open right half in symmetric mode and the
    /// full outline otherwise; perimeter ranges run over the merged outline.
    pub fn range_path(&self, kind: RangeKind) -> RangePath {
        match (kind, self.document.mode()) {
            (RangeKind::Outline, OutlineMode::HalfOpen) => RangePath::open(self.half_outline_world()),
            (RangeKind::Outline, OutlineMode::Closed) => RangePath::closed(self.base_outline()),
            (RangeKind::Perimeter, _) => RangePath::closed(self.merged_outline()),
        }
    }

    /// The range path moved inward by the stitch margin.
    pub fn stitch_path(&self, kind: RangeKind) -> RangePath {
        self.sync_cache();
        self.cache.stitch_path_or_insert_with(kind, || {
            let reference = self.range_path(kind);
            let delta = -self.config.stitch_margin;
            let points = reference.points();
            let offset = if reference.closed {
                offset_closed_path(
                    &points,
                    delta,
                    self.config.fixed_point_scale,
                    self.clipper.as_ref(),
                )
            } else {
                offset_open_path(&points, delta, self.document.holster().anchor())
            };
            RangePath::from_points(offset, reference.closed)
        })
    }

    fn range(&self, index: usize) -> Option<&EdgeRange> {
        let range = self.document.ranges().get(index);
        if range.is_none() {
            warn!("{}", GeometryError::MissingReference { kind: "edge range", index });
        }
        range
    }

    fn mirrors(&self, range: &EdgeRange) -> bool {
        range.mirror && range.kind == RangeKind::Outline && self.document.is_symmetric()
    }

    // ---- stitches ----

    /// Stitch holes for one range, including the mirrored side when enabled.
    pub fn range_stitches(&self, index: usize) -> Option<RangeStitches> {
        let range = *self.range(index)?;
        let table = self.stitch_path(range.kind).table();
        let points = place_stitches(&table, &range, self.config.stitch_spacing);
        let mirrored = if self.mirrors(&range) {
            mirror_stitches(&points, self.document.holster())
        } else {
            Vec::new()
        };
        debug!(
            "Range {}: {} stitches ({} mirrored)",
            index,
            points.len(),
            mirrored.len()
        );
        Some(RangeStitches {
            range_index: index,
            kind: range.kind,
            points,
            mirrored,
        })
    }

    pub fn all_stitches(&self) -> Vec<RangeStitches> {
        (0..self.document.ranges().len())
            .filter_map(|i| self.range_stitches(i))
            .collect()
    }

    /// World positions of a range's start and end handles on its stitch
    /// path.
    pub fn range_handles(&self, index: usize) -> Option<(Point, Point)> {
        let range = *self.range(index)?;
        handle_positions(&self.stitch_path(range.kind).table(), &range)
    }

    /// Moves a range handle to the stitch path position nearest `world`.
    ///
    /// The range keeps at least `min_range_separation` between its ends. On a
    /// degenerate path the range is returned unchanged.
    pub fn drag_range_handle(
        &mut self,
        index: usize,
        handle: RangeHandle,
        world: Point,
    ) -> Result<EdgeRange, DocumentError> {
        let count = self.document.ranges().len();
        let range = *self
            .document
            .ranges()
            .get(index)
            .ok_or(DocumentError::RangeIndexOutOfRange { index, count })?;

        let table = self.stitch_path(range.kind).table();
        let Some(fraction) = table.project_to_fraction(world) else {
            debug!("Range {} drag ignored: stitch path is degenerate", index);
            return Ok(range);
        };

        let dragged = range.dragged(handle, fraction, self.config.min_range_separation);
        self.document.set_range(index, dragged)?;
        Ok(dragged)
    }

    // ---- shapes ----

    fn shape(&self, index: usize) -> Option<&PatternShape> {
        let shape = self.document.shapes().get(index);
        if shape.is_none() {
            warn!("{}", GeometryError::MissingReference { kind: "shape", index });
        }
        shape
    }

    /// Geometry of the linked circle at `shape_index`.
    ///
    /// The circle is sized from the source range's unoffset length and gets
    /// as many holes as are placed on one side of that range. `None` when
    /// the shape is missing, is not a linked circle, or its source range
    /// cannot produce a circle.
    pub fn linked_circle(&self, shape_index: usize) -> Option<LinkedCircle> {
        let shape = self.shape(shape_index)?;
        let ShapeKind::LinkedCircle { source_range } = shape.kind else {
            return None;
        };
        let source = self.range_stitches(source_range)?;
        let reference = self.range_path(source.kind);
        derive_linked_circle(
            self.document.ranges(),
            source_range,
            &reference.points(),
            reference.closed,
            shape.transform.origin(),
            source.points.len(),
            self.config.circle_segments,
        )
    }

    /// Closed offset of a shape's world outline, for interior cavities.
    pub fn offset_shape(&self, index: usize, delta: f64) -> Option<Vec<Point>> {
        let shape = self.shape(index)?;
        let outline = match shape.kind {
            ShapeKind::LinkedCircle { .. } => self.linked_circle(index)?.points,
            _ => shape.world_outline(&self.config),
        };
        Some(offset_closed_path(
            &outline,
            delta,
            self.config.fixed_point_scale,
            self.clipper.as_ref(),
        ))
    }

    /// Editable bezier segment at `fraction` of the range path of `kind`.
    ///
    /// `None` on fold stubs, on merged outline points, and on degenerate
    /// paths.
    pub fn segment_at_fraction(&self, kind: RangeKind, fraction: f64) -> Option<usize> {
        let path = self.range_path(kind);
        let table = path.table();
        let index = table.index_at_distance(fraction * table.total())?;
        path.samples.get(index)?.seg_idx
    }

    pub fn stitch_report(&self) -> StitchReport {
        StitchReport::build(self)
    }
}
