//! Configuration loading from disk.

use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::config::schema::LoggerSettings;

/// Error type for configuration loading.
///
/// Only the file itself can be wrong: any well-formed TOML yields settings,
/// with unusable logging values falling back to `Disabled`.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),
}

impl LoggerSettings {
    /// Parse settings from TOML text.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }
}

/// Load settings from a TOML file.
pub fn load_settings(path: &Path) -> Result<LoggerSettings, ConfigError> {
    let content = fs::read_to_string(path)?;
    let settings = LoggerSettings::from_toml_str(&content)?;

    tracing::debug!(
        path = %path.display(),
        logging = ?settings.logging,
        markers = ?settings.markers,
        "Logger settings loaded"
    );

    Ok(settings)
}
