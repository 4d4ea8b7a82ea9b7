//! Front-end settings read from an optional YAML file.

use crate::error::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Filter used when `RUST_LOG` is not set, e.g. `info` or `dcd_app=debug`.
    pub log_level: String,
    /// Indent JSON documents when writing them.
    pub pretty_json: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            pretty_json: true,
        }
    }
}

impl Settings {
    pub fn from_yaml(content: &str) -> AppResult<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(content)?)
    }

    /// Load `path` if given and present; anything else yields the defaults.
    pub fn load(path: Option<&Path>) -> AppResult<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path).map_err(|e| AppError::SettingsRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::from_yaml(&content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_file_keeps_other_defaults() {
        let settings = Settings::from_yaml("log_level: debug\n").unwrap();
        assert_eq!(settings.log_level, "debug");
        assert!(settings.pretty_json);
    }

    #[test]
    fn empty_or_missing_file_gives_defaults() {
        assert_eq!(Settings::from_yaml("").unwrap(), Settings::default());
        let missing = std::env::temp_dir().join("dcd_settings_missing.yaml");
        let _ = std::fs::remove_file(&missing);
        assert_eq!(Settings::load(Some(&missing)).unwrap(), Settings::default());
        assert_eq!(Settings::load(None).unwrap(), Settings::default());
    }

    #[test]
    fn malformed_file_is_an_error() {
        assert!(matches!(
            Settings::from_yaml("pretty_json: [1, 2"),
            Err(AppError::Settings(_))
        ));
    }
}
