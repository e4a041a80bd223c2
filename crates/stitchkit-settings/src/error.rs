//! Errors raised while reading, writing, or checking `config.toml`.
//!
//! [`SettingsError`] covers file access and parsing. [`ConfigError`] covers
//! values that parse but make no sense for the pattern engine, along with
//! paths whose extension is neither `.toml` nor `.json`.

use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SettingsError {
    /// Reading the settings file failed; carries the path and OS message.
    #[error("Failed to load settings: {0}")]
    LoadError(String),

    /// Writing the settings file failed.
    #[error("Failed to save settings: {0}")]
    SaveError(String),

    /// A pattern engine value rejected by `PatternConfig::validate`.
    #[error("Invalid setting '{key}': {reason}")]
    InvalidSetting { key: String, reason: String },

    /// The parent directory of the settings file could not be created.
    #[error("Config directory error: {0}")]
    ConfigDirectory(String),

    #[error("I/O error: {0}")]
    IoError(#[from] io::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Malformed TOML, or a field with the wrong type.
    #[error("TOML error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("TOML error: {0}")]
    TomlSerError(#[from] toml::ser::Error),

    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
}

impl SettingsError {
    /// Wraps a validation message for the settings section `key`.
    pub fn invalid(key: impl Into<String>, reason: impl Into<String>) -> Self {
        SettingsError::InvalidSetting {
            key: key.into(),
            reason: reason.into(),
        }
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    /// File extension other than `toml` or `json`.
    #[error("Unsupported config format: {0}")]
    UnsupportedFormat(String),

    /// A snapping or display value outside what the editor accepts.
    #[error("Value out of range for '{key}': {value}")]
    ValueOutOfRange { key: String, value: String },

    /// `dirs::config_dir` has no answer on this OS.
    #[error("Unsupported platform: {0}")]
    UnsupportedPlatform(String),
}

pub type SettingsResult<T> = Result<T, SettingsError>;

pub type ConfigResult<T> = Result<T, ConfigError>;
