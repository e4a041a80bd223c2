//! # StitchKit Designer
//!
//! The pattern geometry and stitch layout engine. It turns a handful of
//! editable bezier nodes, a holster transform, and auxiliary shapes into
//! world-space outlines, stitch lines, and stitch hole positions.
//!
//! ## Pipeline
//!
//! ```text
//! Nodes ──► bezier (sampled outline, fold stubs)
//!             └─► transform (holster mapping, mirroring)
//!                   └─► merge (union with extension shapes)
//!                         └─► offset (stitch margin)
//!                               └─► arc_length (distance tables)
//!                                     ├─► stitching (ranges, holes)
//!                                     └─► linked_circle (length matching)
//! ```
//!
//! Every stage is a pure function of its inputs. [`PatternEngine`] ties them
//! together over a [`PatternDocument`] and memoises the expensive stages in
//! a [`GeometryCache`] keyed by the document's geometry version.
//!
//! Boolean union and closed offsets run in fixed-point space through the
//! [`PolygonClipper`] trait; [`CavalierClipper`] is the default backend.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use stitchkit_designer::{EdgeRange, PatternConfig, PatternDocument, PatternEngine, RangeKind};
//!
//! let mut engine = PatternEngine::new(document, PatternConfig::default());
//! engine.document_mut().add_range(EdgeRange::full(RangeKind::Outline))?;
//! let stitches = engine.all_stitches();
//! ```

pub mod arc_length;
pub mod bezier;
pub mod cache;
pub mod clipping;
pub mod config;
pub mod document;
pub mod engine;
pub mod linked_circle;
pub mod merge;
pub mod offset;
pub mod report;
pub mod shapes;
pub mod stitching;
pub mod transform;

pub use arc_length::{ArcEntry, ArcTable, Projection};
pub use bezier::{
    insert_node_on_segment, sample_closed, sample_outline, OutlineMode, SamplingOptions,
    FOLD_STUB_SPACING, SAMPLES_PER_SEGMENT,
};
pub use cache::{CacheStats, GeometryCache};
pub use clipping::{CavalierClipper, IntPath, IntPoint, PolygonClipper, DEFAULT_SCALE};
pub use config::PatternConfig;
pub use document::{FoldSnap, PatternDocument};
pub use engine::{PatternEngine, RangePath};
pub use linked_circle::{derive_linked_circle, LinkedCircle};
pub use merge::merge_extensions;
pub use offset::{offset_closed_path, offset_open_path};
pub use report::{LinkedCircleReport, RangeReport, StitchMismatch, StitchReport};
pub use shapes::{PatternShape, ShapeKind, ShapeType};
pub use stitching::{
    mirror_stitches, place_stitches, stitch_count, EdgeRange, RangeHandle, RangeKind,
    RangeStitches,
};
pub use transform::{mirror_outline, world_outline, HolsterTransform, Transform2D};

// Shared data types, re-exported for convenience
pub use stitchkit_core::{Node, Point, SampledPoint};
