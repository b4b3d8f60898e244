use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{FlareError, Result};
use crate::frame::SampleFilter;
use crate::parameter::FlareParams;

pub const CONFIG_VERSION: u32 = 1;

/// On-disk flare preset.
///
/// Every field has a default, so a partial file such as
/// `{"params": {"threshold": 1.2}}` is valid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FlareConfig {
    pub version: u32,
    pub params: FlareParams,
    pub filter: SampleFilter,
}

impl Default for FlareConfig {
    fn default() -> Self {
        Self {
            version: CONFIG_VERSION,
            params: FlareParams::default(),
            filter: SampleFilter::default(),
        }
    }
}

impl FlareConfig {
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: FlareConfig = serde_json::from_str(json)?;
        if config.version > CONFIG_VERSION {
            return Err(FlareError::UnsupportedVersion {
                found: config.version,
                supported: CONFIG_VERSION,
            });
        }
        Ok(config)
    }

    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Load a preset file from disk.
pub fn load_config(path: &Path) -> Result<FlareConfig> {
    let json = std::fs::read_to_string(path)?;
    FlareConfig::from_json_str(&json)
}

/// Save a preset file to disk as JSON.
pub fn save_config(path: &Path, config: &FlareConfig) -> Result<()> {
    let json = config.to_json_string()?;
    std::fs::write(path, json)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_config_uses_defaults() {
        let config = FlareConfig::from_json_str(r#"{"params": {"threshold": 1.2}}"#).unwrap();
        assert_eq!(config.version, CONFIG_VERSION);
        assert_eq!(config.params.threshold, 1.2);
        assert_eq!(config.params.scale, FlareParams::default().scale);
        assert_eq!(config.filter, SampleFilter::Linear);
    }

    #[test]
    fn test_filter_is_snake_case() {
        let config = FlareConfig::from_json_str(r#"{"filter": "nearest"}"#).unwrap();
        assert_eq!(config.filter, SampleFilter::Nearest);
    }

    #[test]
    fn test_newer_version_rejected() {
        let err = FlareConfig::from_json_str(r#"{"version": 99}"#).unwrap_err();
        assert!(matches!(err, FlareError::UnsupportedVersion { found: 99, .. }));
    }

    #[test]
    fn test_malformed_json_is_json_error() {
        let err = FlareConfig::from_json_str("{ params: ").unwrap_err();
        assert!(matches!(err, FlareError::Json(_)));
    }

    #[test]
    fn test_save_and_load_file() {
        let path = std::env::temp_dir().join(format!("flare-config-{}.json", std::process::id()));
        let config = FlareConfig {
            params: FlareParams { threshold: 0.4, scale: 1.5, spread: 0.008, intensity: 2.5 },
            filter: SampleFilter::Nearest,
            ..Default::default()
        };
        save_config(&path, &config).unwrap();
        let loaded = load_config(&path).unwrap();
        std::fs::remove_file(&path).ok();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = load_config(Path::new("/nonexistent/flare.json")).unwrap_err();
        assert!(matches!(err, FlareError::Io(_)));
    }
}
