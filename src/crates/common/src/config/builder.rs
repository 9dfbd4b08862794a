//! Configuration builder trait

use crate::Result;

/// Trait for configuration structures that support validation, environment
/// loading and merging
///
/// # Example
///
/// ```rust
/// use common::config::{build_env_key, get_env_or, ConfigBuilder};
///
/// #[derive(Clone, Default)]
/// struct SinkConfig {
///     target: String,
/// }
///
/// impl ConfigBuilder for SinkConfig {
///     fn from_env(prefix: &str) -> common::Result<Self> {
///         Ok(Self {
///             target: get_env_or(&build_env_key(prefix, "target"), "")?,
///         })
///     }
///
///     fn merge(&mut self, other: Self) -> &mut Self {
///         if !other.target.is_empty() {
///             self.target = other.target;
///         }
///         self
///     }
/// }
///
/// let config = SinkConfig::build().unwrap();
/// assert!(config.target.is_empty());
/// ```
pub trait ConfigBuilder: Default + Clone {
    /// Validate the configuration
    ///
    /// Returns an error if the configuration is invalid.
    fn validate(&self) -> Result<()> {
        Ok(())
    }

    /// Load configuration from environment variables
    ///
    /// Variables follow the pattern `{PREFIX}{FIELD_NAME}` where FIELD_NAME is
    /// the uppercased field name. Unset variables leave the default value.
    fn from_env(prefix: &str) -> Result<Self>;

    /// Merge another configuration into this one
    ///
    /// Values explicitly set in `other` overwrite the ones in `self`.
    /// Returns self for chaining.
    fn merge(&mut self, other: Self) -> &mut Self;

    /// Create, validate, and return the default configuration
    fn build() -> Result<Self> {
        let config = Self::default();
        config.validate()?;
        Ok(config)
    }

    /// Start from defaults, overlay the environment, and validate
    fn from_env_with_defaults(prefix: &str) -> Result<Self> {
        let mut config = Self::default();
        config.merge(Self::from_env(prefix)?);
        config.validate()?;
        Ok(config)
    }
}
