//! Numeric configuration consumed by the geometry engine.

use serde::{Deserialize, Serialize};
use stitchkit_core::{Error, Result};

use crate::bezier::{SamplingOptions, FOLD_STUB_SPACING, SAMPLES_PER_SEGMENT};
use crate::clipping::DEFAULT_SCALE;

/// Engine configuration. All lengths are millimetres.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PatternConfig {
    /// Distance of the stitch line inside the cut edge
    pub stitch_margin: f64,
    /// Distance between consecutive stitch holes
    pub stitch_spacing: f64,
    /// Diameter of a stitch hole
    pub hole_size: f64,
    /// Fixed-point units per millimetre for boolean and offset operations
    pub fixed_point_scale: f64,
    /// Bezier samples per outline segment
    pub samples_per_segment: usize,
    /// Spacing of the synthetic fold stub samples
    pub fold_stub_spacing: f64,
    /// Vertex count of circle approximations
    pub circle_segments: usize,
    /// Smallest allowed `end - start` when dragging range handles
    pub min_range_separation: f64,
    /// Maximum deviation when flattening round offset joins
    pub arc_tolerance: f64,
}

impl Default for PatternConfig {
    fn default() -> Self {
        Self {
            stitch_margin: 4.0,
            stitch_spacing: 4.0,
            hole_size: 1.0,
            fixed_point_scale: DEFAULT_SCALE,
            samples_per_segment: SAMPLES_PER_SEGMENT,
            fold_stub_spacing: FOLD_STUB_SPACING,
            circle_segments: 72,
            min_range_separation: 0.01,
            arc_tolerance: 0.05,
        }
    }
}

impl PatternConfig {
    pub fn sampling_options(&self) -> SamplingOptions {
        SamplingOptions {
            steps: self.samples_per_segment,
            stub_spacing: self.fold_stub_spacing,
        }
    }

    /// Arc tolerance expressed in fixed-point units.
    pub fn scaled_arc_tolerance(&self) -> f64 {
        self.arc_tolerance * self.fixed_point_scale
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if !(self.stitch_margin >= 0.0) {
            return Err(Error::other("Stitch margin must be >= 0"));
        }
        if !(self.stitch_spacing > 0.0) {
            return Err(Error::other("Stitch spacing must be > 0"));
        }
        if !(self.hole_size > 0.0) {
            return Err(Error::other("Hole size must be > 0"));
        }
        if !(self.fixed_point_scale >= 1.0) {
            return Err(Error::other("Fixed-point scale must be >= 1"));
        }
        if self.samples_per_segment == 0 {
            return Err(Error::other("Samples per segment must be > 0"));
        }
        if !(self.fold_stub_spacing > 0.0) {
            return Err(Error::other("Fold stub spacing must be > 0"));
        }
        if self.circle_segments < 3 {
            return Err(Error::other("Circle segments must be >= 3"));
        }
        if !(self.min_range_separation > 0.0 && self.min_range_separation < 0.5) {
            return Err(Error::other(
                "Minimum range separation must be between 0 and 0.5",
            ));
        }
        if !(self.arc_tolerance > 0.0) {
            return Err(Error::other("Arc tolerance must be > 0"));
        }
        Ok(())
    }
}
