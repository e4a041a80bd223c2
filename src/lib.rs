//! # StitchKit
//!
//! Geometry and stitch layout engine for leather pattern design.
//!
//! ## Architecture
//!
//! StitchKit is organized as a workspace with multiple crates:
//!
//! 1. **stitchkit-core** - Points, bezier nodes, units, error taxonomy
//! 2. **stitchkit-designer** - Outline sampling, mirroring, union, offsetting,
//!    arc-length tables, stitch placement, linked circles
//! 3. **stitchkit-settings** - Configuration and its persistence
//! 4. **stitchkit** - Re-exports, logging setup, and the command-line report tool

pub use stitchkit_core::data;
pub use stitchkit_designer as designer;

pub use stitchkit_core::{
    DocumentError, Error, GeometryError, MeasurementSystem, Node, Point, Result, SampledPoint,
};

pub use stitchkit_designer::{
    ArcTable, CavalierClipper, EdgeRange, LinkedCircle, OutlineMode, PatternConfig,
    PatternDocument, PatternEngine, PatternShape, PolygonClipper, RangeHandle, RangeKind,
    ShapeKind, StitchReport, Transform2D,
};

pub use stitchkit_settings::{Config, DisplaySettings, SettingsError, SnapSettings};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build date (set at compile time)
pub const BUILD_DATE: &str = env!("BUILD_DATE");

/// Initialize logging with the default configuration
///
/// Sets up structured logging with:
/// - Pretty formatting on stderr, leaving stdout for command output
/// - RUST_LOG environment variable support
pub fn init_logging() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter = EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into());

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_level(true)
        .with_line_number(true)
        .pretty();

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()?;

    Ok(())
}
