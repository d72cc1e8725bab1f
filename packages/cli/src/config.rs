//! Dashboard configuration.
//!
//! The built-in defaults live in `config/default.toml`. A user file is
//! merged over them table by table, so it only needs the keys it changes.

use std::path::{Path, PathBuf};
use std::time::Duration;

use incident_map_source::{FetchOptions, SourceConfig};
use serde::{Deserialize, Serialize};

const DEFAULT_CONFIG: &str = include_str!("../config/default.toml");

/// Errors from reading or parsing a configuration file.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("failed to read config {path}: {source}")]
    Io {
        /// Path that was read.
        path: PathBuf,
        /// Underlying error.
        source: std::io::Error,
    },

    /// The file is not valid TOML or does not match the schema.
    #[error("invalid config: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Remote request behaviour.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FetchConfig {
    /// Retries for transient failures; 0 disables retrying.
    #[serde(default)]
    pub retries: u32,
    /// Per-request timeout in seconds.
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

impl FetchConfig {
    /// Converts to the loader's options.
    #[must_use]
    pub fn options(&self) -> FetchOptions {
        FetchOptions {
            retries: self.retries,
            timeout: self.timeout_secs.map(Duration::from_secs),
        }
    }
}

/// Where and how the page is written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Output HTML file.
    pub path: PathBuf,
    /// Canvas width in pixels; height follows at 4/6.
    pub width: u32,
    /// Page title.
    pub title: String,
}

/// The full configuration file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardConfig {
    pub sources: SourceConfig,
    pub fetch: FetchConfig,
    pub output: OutputConfig,
}

impl DashboardConfig {
    /// The embedded defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Toml`] if the embedded file is malformed.
    pub fn builtin() -> Result<Self, ConfigError> {
        Self::from_toml(DEFAULT_CONFIG, None)
    }

    /// Loads the defaults, merging `path` over them when given.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the file cannot be read or parsed.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let Some(path) = path else {
            return Self::builtin();
        };

        log::debug!("Reading config {}", path.display());
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        Self::from_toml(DEFAULT_CONFIG, Some(&content))
    }

    fn from_toml(defaults: &str, overrides: Option<&str>) -> Result<Self, ConfigError> {
        let mut table: toml::Table = toml::from_str(defaults)?;
        if let Some(overrides) = overrides {
            let overrides: toml::Table = toml::from_str(overrides)?;
            merge(&mut table, overrides);
        }
        Ok(toml::Value::Table(table).try_into()?)
    }
}

/// Recursively merges `overrides` into `base`. Nested tables merge key by
/// key; any other value replaces the base value.
fn merge(base: &mut toml::Table, overrides: toml::Table) {
    for (key, value) in overrides {
        match value {
            toml::Value::Table(incoming) => {
                if let Some(toml::Value::Table(existing)) = base.get_mut(&key) {
                    merge(existing, incoming);
                } else {
                    base.insert(key, toml::Value::Table(incoming));
                }
            }
            value => {
                base.insert(key, value);
            }
        }
    }
}
