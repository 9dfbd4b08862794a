//! Environment lookups for [`FormatConfig`](super::FormatConfig)

use std::env::{self, VarError};

use crate::{string, CommonError, Result};

/// Build the variable name for a config field, e.g. `COMMON_DELIMITER`
///
/// ```rust
/// use common::config::build_env_key;
///
/// assert_eq!(build_env_key("COMMON_", "delimiter"), "COMMON_DELIMITER");
/// ```
pub fn build_env_key(prefix: &str, field: &str) -> String {
    format!("{}{}", prefix, field.to_uppercase())
}

fn read_var(key: &str) -> Result<Option<String>> {
    match env::var(key) {
        Ok(value) => Ok(Some(value)),
        Err(VarError::NotPresent) => Ok(None),
        Err(VarError::NotUnicode(_)) => Err(CommonError::Config(format!(
            "{} is not valid UTF-8",
            key
        ))),
    }
}

/// Text field from `key`, or `default` when unset
///
/// An empty value counts as set: `COMMON_DELIMITER=` selects an empty
/// delimiter.
pub fn get_env_or(key: &str, default: impl Into<String>) -> Result<String> {
    Ok(read_var(key)?.unwrap_or_else(|| default.into()))
}

/// Switch field from `key`
///
/// Accepts `true`/`1`/`yes`/`on` and `false`/`0`/`no`/`off` in any case.
/// Anything else is a [`CommonError::Config`].
pub fn get_env_bool(key: &str) -> Result<Option<bool>> {
    let Some(value) = read_var(key)? else {
        return Ok(None);
    };

    match string::lower(value.trim()).as_str() {
        "true" | "1" | "yes" | "on" => Ok(Some(true)),
        "false" | "0" | "no" | "off" => Ok(Some(false)),
        _ => Err(CommonError::Config(format!(
            "{} must be a boolean switch, got {:?}",
            key, value
        ))),
    }
}
