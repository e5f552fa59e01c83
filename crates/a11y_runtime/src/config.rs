//! Runtime configuration loaded from TOML.

use std::{fs, path::Path};

use serde::Deserialize;
use thiserror::Error;

use crate::model::DEFAULT_STORAGE_KEY;

#[derive(Debug, Error)]
/// Failures while loading an [`A11yConfig`].
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse accessibility config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("storage_key must not be empty")]
    EmptyStorageKey,
}

/// Persistence settings for the accessibility runtime.
///
/// ```toml
/// storage_key = "accessibilitySettings"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct A11yConfig {
    /// Key under which the preference snapshot is stored.
    pub storage_key: String,
}

impl Default for A11yConfig {
    fn default() -> Self {
        Self {
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
        }
    }
}

impl A11yConfig {
    /// Parses and validates config text. Missing fields take their defaults.
    pub fn from_toml_str(body: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(body)?;
        config.validate()
    }

    /// Reads, parses, and validates a config file.
    pub fn load_from_path(path: &Path) -> Result<Self, ConfigError> {
        let body = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&body)
    }

    fn validate(self) -> Result<Self, ConfigError> {
        if self.storage_key.trim().is_empty() {
            return Err(ConfigError::EmptyStorageKey);
        }
        Ok(self)
    }
}
