//! Viewer configuration loaded from a RON file.

use crate::viewport::{MAX_SCALE, MIN_SCALE, ZoomLimits};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

const CONFIG_FILE_NAME: &str = "config.ron";
const APP_DIR_NAME: &str = "xray-viewer";

/// Errors that can occur when loading the viewer configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config '{path}': {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse config: {0}")]
    Parse(#[from] ron::de::SpannedError),
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Zoom limits and gesture increments.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    /// Smallest reachable scale
    pub min_scale: f32,
    /// Largest reachable scale
    pub max_scale: f32,
    /// Scale change for the zoom buttons and keyboard shortcuts
    pub button_step: f32,
    /// Scale change per mouse wheel notch
    pub wheel_step: f32,
    /// Whether `+`, `-` and `0` control the zoom
    pub keyboard_zoom: bool,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            min_scale: MIN_SCALE,
            max_scale: MAX_SCALE,
            button_step: 0.25,
            wheel_step: 0.1,
            keyboard_zoom: true,
        }
    }
}

impl ViewerConfig {
    /// Parses and validates a RON document.
    pub fn from_ron(source: &str) -> Result<Self, ConfigError> {
        let config: Self = ron::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads and validates the config file at `path`.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let source = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_ron(&source)
    }

    /// Loads `path` if given, otherwise the per-user default location.
    ///
    /// A missing default file is not an error; the defaults are used instead.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = path {
            return Self::load(path);
        }

        match Self::default_path() {
            Some(path) if path.exists() => Self::load(&path),
            _ => Ok(Self::default()),
        }
    }

    /// `<config dir>/xray-viewer/config.ron`
    pub fn default_path() -> Option<PathBuf> {
        Some(dirs::config_dir()?.join(APP_DIR_NAME).join(CONFIG_FILE_NAME))
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if ZoomLimits::new(self.min_scale, self.max_scale).is_none() {
            return Err(ConfigError::Invalid(format!(
                "scale range {}..={} must be positive, finite and include 1.0",
                self.min_scale, self.max_scale
            )));
        }

        for (name, step) in [("button_step", self.button_step), ("wheel_step", self.wheel_step)] {
            if !step.is_finite() || step <= 0.0 {
                return Err(ConfigError::Invalid(format!(
                    "{name} must be a positive number, got {step}"
                )));
            }
        }

        Ok(())
    }

    pub fn limits(&self) -> ZoomLimits {
        ZoomLimits::new(self.min_scale, self.max_scale).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_viewer_behavior() {
        let config = ViewerConfig::default();
        assert_eq!(config.min_scale, 0.5);
        assert_eq!(config.max_scale, 3.0);
        assert_eq!(config.button_step, 0.25);
        assert_eq!(config.wheel_step, 0.1);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn partial_documents_fill_in_defaults() {
        let config = ViewerConfig::from_ron("(max_scale: 4.0)").unwrap();
        assert_eq!(config.max_scale, 4.0);
        assert_eq!(config.min_scale, 0.5);
        assert!(config.keyboard_zoom);
    }

    #[test]
    fn rejects_inverted_range() {
        let err = ViewerConfig::from_ron("(min_scale: 2.0, max_scale: 1.5)").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn rejects_non_positive_step() {
        let err = ViewerConfig::from_ron("(wheel_step: 0.0)").unwrap_err();
        assert!(err.to_string().contains("wheel_step"));
    }

    #[test]
    fn reports_parse_errors() {
        let err = ViewerConfig::from_ron("(min_scale: \"small\")").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }
}
