//! Configuration and settings management for StitchKit
//!
//! Provides configuration file handling and validation. Supports JSON and
//! TOML file formats; the default file lives in the platform config
//! directory.
//!
//! Configuration is organized into logical sections:
//! - Pattern engine settings (margins, spacing, precision, sampling)
//! - Fold snapping used while editing nodes
//! - Display preferences (measurement system)

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use stitchkit_designer::{FoldSnap, PatternConfig};
use tracing::{debug, info};

pub use stitchkit_core::units::MeasurementSystem;

use crate::error::{ConfigError, SettingsError, SettingsResult};

/// Fold snapping while nodes are dragged
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SnapSettings {
    /// Pull nodes near the fold onto it
    pub fold_snap: bool,
    /// Snap distance from the fold in millimetres
    pub fold_snap_threshold: f64,
    /// Keep handles of a node on the fold perpendicular to it
    pub snap_stub_endpoints: bool,
}

impl Default for SnapSettings {
    fn default() -> Self {
        Self {
            fold_snap: true,
            fold_snap_threshold: 2.0,
            snap_stub_endpoints: true,
        }
    }
}

impl SnapSettings {
    pub fn fold_snap(&self) -> FoldSnap {
        FoldSnap {
            threshold: self.fold_snap.then_some(self.fold_snap_threshold),
            perpendicular_handles: self.snap_stub_endpoints,
        }
    }
}

/// Display preferences
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplaySettings {
    /// Units used when reporting lengths
    pub measurement_system: MeasurementSystem,
}

/// Complete application configuration
///
/// Aggregates all settings sections and provides file I/O operations.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Pattern engine settings
    pub pattern: PatternConfig,
    /// Fold snapping
    pub snapping: SnapSettings,
    /// Display preferences
    pub display: DisplaySettings,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Format {
    Json,
    Toml,
}

fn format_of(path: &Path) -> SettingsResult<Format> {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some("json") => Ok(Format::Json),
        Some("toml") => Ok(Format::Toml),
        other => Err(ConfigError::UnsupportedFormat(other.unwrap_or("none").to_string()).into()),
    }
}

impl Config {
    /// Create new config with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// `<config_dir>/stitchkit/config.toml`
    pub fn default_path() -> SettingsResult<PathBuf> {
        let dir = dirs::config_dir().ok_or_else(|| {
            ConfigError::UnsupportedPlatform(std::env::consts::OS.to_string())
        })?;
        Ok(dir.join("stitchkit").join("config.toml"))
    }

    /// Load config from file (JSON or TOML)
    pub fn load_from_file(path: &Path) -> SettingsResult<Self> {
        let format = format_of(path)?;
        let content = std::fs::read_to_string(path)
            .map_err(|e| SettingsError::LoadError(format!("{}: {}", path.display(), e)))?;

        let config: Self = match format {
            Format::Json => serde_json::from_str(&content)?,
            Format::Toml => toml::from_str(&content)?,
        };

        config.validate()?;
        debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Load config from file, falling back to defaults when it does not exist
    pub fn load_or_default(path: &Path) -> SettingsResult<Self> {
        if !path.exists() {
            info!("No config at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        Self::load_from_file(path)
    }

    /// Save config to file (JSON or TOML)
    pub fn save_to_file(&self, path: &Path) -> SettingsResult<()> {
        self.validate()?;

        let content = match format_of(path)? {
            Format::Json => serde_json::to_string_pretty(self)?,
            Format::Toml => toml::to_string_pretty(self)?,
        };

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| SettingsError::ConfigDirectory(format!("{}: {}", parent.display(), e)))?;
        }
        std::fs::write(path, content)
            .map_err(|e| SettingsError::SaveError(format!("{}: {}", path.display(), e)))?;

        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> SettingsResult<()> {
        self.pattern
            .validate()
            .map_err(|e| SettingsError::invalid("pattern", e.to_string()))?;

        if !(self.snapping.fold_snap_threshold >= 0.0) {
            return Err(ConfigError::ValueOutOfRange {
                key: "snapping.fold_snap_threshold".to_string(),
                value: self.snapping.fold_snap_threshold.to_string(),
            }
            .into());
        }

        Ok(())
    }
}
