#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::unwrap_used)]

//! mimelaunch settings
//!
//! This crate provides the optional `config.toml` that sits next to the
//! preference file in the mimelaunch config directory. It controls:
//! - Which file holds the associations and whether it is locked while in use
//! - Whether launched programs are detached by default
//! - Logging level and destination
//!
//! Every field has a default, so a missing file or a partial file is fine.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

/// Name of the settings file inside the config directory.
pub const SETTINGS_FILE_NAME: &str = "config.toml";

/// Default name of the preference (associations) file.
pub const DEFAULT_STORE_FILE_NAME: &str = "associations";

/// Errors that can occur when loading or saving settings
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read or write the settings file
    #[error("Failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),
    /// Failed to parse the TOML settings file
    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
    /// Failed to serialize settings to TOML format
    #[error("Failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// Main settings structure
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Preference file settings
    pub store: StoreSettings,
    /// Process launch settings
    pub launch: LaunchSettings,
    /// Logging configuration
    pub logging: LoggingSettings,
}

/// Preference file settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreSettings {
    /// File name of the preference file inside the config directory
    pub file_name: String,
    /// Hold an exclusive advisory lock while reading, resolving and writing
    pub lock: bool,
}

/// Process launch settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LaunchSettings {
    /// Detach launched programs from the terminal instead of waiting for them
    pub detach: bool,
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// Log filter used when `RUST_LOG` is unset (error, warn, info, debug, trace)
    pub level: String,
    /// Log file path (optional, stderr otherwise)
    pub file: Option<PathBuf>,
}

impl Default for StoreSettings {
    fn default() -> Self { Self { file_name: DEFAULT_STORE_FILE_NAME.to_string(), lock: true } }
}

impl Default for LaunchSettings {
    fn default() -> Self { Self { detach: true } }
}

impl Default for LoggingSettings {
    fn default() -> Self { Self { level: "warn".to_string(), file: None } }
}

impl Settings {
    /// Load settings from a TOML file at `path`
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path.as_ref())?;
        let settings = toml::from_str(&contents)?;
        Ok(settings)
    }

    /// Load settings from `path`, falling back to defaults when the file does not exist
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        match Self::from_file(path.as_ref()) {
            Err(ConfigError::FileRead(err)) if err.kind() == ErrorKind::NotFound => {
                debug!(path = %path.as_ref().display(), "no settings file, using defaults");
                Ok(Self::default())
            }
            other => other,
        }
    }

    /// Save these settings as a pretty-printed TOML file at `path`
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let contents = toml::to_string_pretty(self)?;
        std::fs::write(path, contents)?;
        Ok(())
    }
}
