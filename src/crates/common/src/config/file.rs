//! Configuration file loading

use serde::de::DeserializeOwned;
use std::path::Path;
use tracing::debug;

use crate::{CommonError, Result};

/// Load a YAML configuration file
pub fn load_yaml_config<T: DeserializeOwned>(path: impl AsRef<Path>) -> Result<T> {
    let content = std::fs::read_to_string(path.as_ref())?;
    serde_yaml::from_str(&content).map_err(|e| {
        CommonError::Config(format!(
            "Failed to parse YAML config from {:?}: {}",
            path.as_ref(),
            e
        ))
    })
}

/// Load a JSON configuration file
pub fn load_json_config<T: DeserializeOwned>(path: impl AsRef<Path>) -> Result<T> {
    let content = std::fs::read_to_string(path.as_ref())?;
    serde_json::from_str(&content).map_err(|e| {
        CommonError::Config(format!(
            "Failed to parse JSON config from {:?}: {}",
            path.as_ref(),
            e
        ))
    })
}

/// Load a configuration file, picking the format from its extension
///
/// `.yaml`/`.yml` and `.json` are supported.
pub fn load_config_file<T: DeserializeOwned>(path: impl AsRef<Path>) -> Result<T> {
    let path = path.as_ref();
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .ok_or_else(|| {
            CommonError::Config(format!("Unable to determine file extension for {:?}", path))
        })?;

    debug!("Loading configuration from {:?}", path);

    match crate::string::lower(extension).as_str() {
        "yaml" | "yml" => load_yaml_config(path),
        "json" => load_json_config(path),
        _ => Err(CommonError::Config(format!(
            "Unsupported config file extension: {}",
            extension
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use std::io::Write;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Sample {
        name: String,
        depth: u32,
    }

    fn write_temp(suffix: &str, content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_load_json_config() {
        let file = write_temp(".json", r#"{"name": "chain", "depth": 3}"#);
        let sample: Sample = load_config_file(file.path()).unwrap();
        assert_eq!(
            sample,
            Sample {
                name: "chain".to_string(),
                depth: 3
            }
        );
    }

    #[test]
    fn test_load_yaml_config() {
        let file = write_temp(".YML", "name: chain\ndepth: 4\n");
        let sample: Sample = load_config_file(file.path()).unwrap();
        assert_eq!(sample.depth, 4);
    }

    #[test]
    fn test_unsupported_extension() {
        let file = write_temp(".toml", "name = 'chain'");
        let result: Result<Sample> = load_config_file(file.path());
        assert!(matches!(result, Err(CommonError::Config(_))));
    }

    #[test]
    fn test_invalid_json() {
        let file = write_temp(".json", "{ not json");
        let result: Result<Sample> = load_json_config(file.path());
        assert!(matches!(result, Err(CommonError::Config(_))));
    }

    #[test]
    fn test_missing_file() {
        let result: Result<Sample> = load_json_config("/nonexistent/common-config.json");
        assert!(matches!(result, Err(CommonError::Io(_))));
    }
}
