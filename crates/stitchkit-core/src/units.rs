//! Unit conversion utilities
//!
//! The engine works in millimetres throughout. These helpers convert lengths
//! for display in either the metric or imperial system.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub const MM_PER_INCH: f64 = 25.4;

/// Measurement system
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MeasurementSystem {
    /// Metric system (mm)
    #[default]
    Metric,
    /// Imperial system (inches)
    Imperial,
}

impl fmt::Display for MeasurementSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Metric => write!(f, "Metric"),
            Self::Imperial => write!(f, "Imperial"),
        }
    }
}

impl FromStr for MeasurementSystem {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "metric" | "mm" => Ok(Self::Metric),
            "imperial" | "inch" | "in" => Ok(Self::Imperial),
            _ => Err(format!("Unknown measurement system: {}", s)),
        }
    }
}

pub fn mm_to_inch(value_mm: f64) -> f64 {
    value_mm / MM_PER_INCH
}

pub fn inch_to_mm(value_in: f64) -> f64 {
    value_in * MM_PER_INCH
}

/// Converts a millimetre length into the given system.
pub fn convert_length(value_mm: f64, system: MeasurementSystem) -> f64 {
    match system {
        MeasurementSystem::Metric => value_mm,
        MeasurementSystem::Imperial => mm_to_inch(value_mm),
    }
}

/// Format length value for display
///
/// * `value_mm` - Value in millimeters
/// * `system` - Target measurement system
pub fn format_length(value_mm: f64, system: MeasurementSystem) -> String {
    format!(
        "{:.3} {}",
        convert_length(value_mm, system),
        unit_label(system)
    )
}

/// Get the unit label for the given system ("mm" or "in")
pub fn unit_label(system: MeasurementSystem) -> &'static str {
    match system {
        MeasurementSystem::Metric => "mm",
        MeasurementSystem::Imperial => "in",
    }
}
