//! Configuration management
//!
//! Formatting defaults shared by the string helpers, loadable from the
//! environment (`COMMON_` prefix) or a JSON/YAML file.
//!
//! # Example
//!
//! ```rust,ignore
//! use common::config::{ConfigBuilder, FormatConfig, ENV_PREFIX};
//!
//! // COMMON_DELIMITER=" | " COMMON_UTC_TIMESTAMPS=1
//! let config = FormatConfig::from_env_with_defaults(ENV_PREFIX)?;
//! let config = FormatConfig::from_file("format.yaml")?;
//! ```

mod builder;
mod env;
mod file;

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::{CommonError, Result};

pub use builder::ConfigBuilder;
pub use env::{build_env_key, get_env_bool, get_env_or};
pub use file::{load_config_file, load_json_config, load_yaml_config};

/// Delimiter used by `join` callers and flag rendering unless configured
pub const DEFAULT_DELIMITER: &str = ", ";

/// Appended by flag rendering when bits are left unclaimed
pub const DEFAULT_UNREPRESENTED_MARKER: &str = "[...]";

/// Environment variable prefix for [`FormatConfig`]
pub const ENV_PREFIX: &str = "COMMON_";

/// Formatting defaults
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormatConfig {
    /// Separator between rendered list entries
    pub delimiter: String,
    /// Marker for flag bits without a definition
    pub unrepresented_marker: String,
    /// Render FILETIMEs in UTC instead of the local zone
    pub utc_timestamps: bool,
}

impl Default for FormatConfig {
    fn default() -> Self {
        Self {
            delimiter: DEFAULT_DELIMITER.to_string(),
            unrepresented_marker: DEFAULT_UNREPRESENTED_MARKER.to_string(),
            utc_timestamps: false,
        }
    }
}

impl FormatConfig {
    /// Create the default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the list delimiter
    pub fn with_delimiter(mut self, delimiter: impl Into<String>) -> Self {
        self.delimiter = delimiter.into();
        self
    }

    /// Set the unrepresented-bits marker
    pub fn with_unrepresented_marker(mut self, marker: impl Into<String>) -> Self {
        self.unrepresented_marker = marker.into();
        self
    }

    /// Render timestamps in UTC
    pub fn with_utc_timestamps(mut self, utc: bool) -> Self {
        self.utc_timestamps = utc;
        self
    }

    /// Load from a JSON or YAML file and validate
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let config: Self = load_config_file(path)?;
        config.validate()?;
        Ok(config)
    }
}

impl ConfigBuilder for FormatConfig {
    fn validate(&self) -> Result<()> {
        if self.unrepresented_marker.is_empty() {
            return Err(CommonError::Config(
                "Unrepresented marker must not be empty".to_string(),
            ));
        }
        Ok(())
    }

    fn from_env(prefix: &str) -> Result<Self> {
        let defaults = Self::default();

        Ok(Self {
            delimiter: get_env_or(&build_env_key(prefix, "delimiter"), defaults.delimiter)?,
            unrepresented_marker: get_env_or(
                &build_env_key(prefix, "unrepresented_marker"),
                defaults.unrepresented_marker,
            )?,
            utc_timestamps: get_env_bool(&build_env_key(prefix, "utc_timestamps"))?
                .unwrap_or(defaults.utc_timestamps),
        })
    }

    fn merge(&mut self, other: Self) -> &mut Self {
        let defaults = Self::default();

        if other.delimiter != defaults.delimiter {
            self.delimiter = other.delimiter;
        }
        if other.unrepresented_marker != defaults.unrepresented_marker {
            self.unrepresented_marker = other.unrepresented_marker;
        }
        if other.utc_timestamps != defaults.utc_timestamps {
            self.utc_timestamps = other.utc_timestamps;
        }
        self
    }
}
