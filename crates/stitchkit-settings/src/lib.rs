//! StitchKit Settings Crate
//!
//! Handles engine configuration and its persistence.

pub mod config;
pub mod error;

pub use config::{Config, DisplaySettings, MeasurementSystem, SnapSettings};
pub use error::{ConfigError, ConfigResult, SettingsError, SettingsResult};
