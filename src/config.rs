use std::path::Path;
use std::time::Duration;

use layout::Viewport;
use runtime_measure::DEFAULT_FLIP_ATTRIBUTE;
use serde::Deserialize;

use crate::error::ConfigError;

/// Host settings, read from a TOML file. Every key is optional.
///
/// ```toml
/// viewport_width = 1024
/// viewport_height = 768
/// frame_interval_ms = 16
/// attribute = "data-elm-flip-id"
/// ```
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HostConfig {
    pub viewport_width: f32,
    pub viewport_height: f32,
    pub frame_interval_ms: u64,
    pub attribute: String,
}

impl Default for HostConfig {
    fn default() -> Self {
        let viewport = Viewport::default();
        Self {
            viewport_width: viewport.width,
            viewport_height: viewport.height,
            frame_interval_ms: 16, // ~60Hz
            attribute: DEFAULT_FLIP_ATTRIBUTE.to_string(),
        }
    }
}

impl HostConfig {
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: HostConfig = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.viewport_width.is_finite() && self.viewport_width >= 0.0) {
            return Err(ConfigError::Invalid(format!(
                "viewport_width must be a non-negative number, got {}",
                self.viewport_width
            )));
        }
        if !(self.viewport_height.is_finite() && self.viewport_height >= 0.0) {
            return Err(ConfigError::Invalid(format!(
                "viewport_height must be a non-negative number, got {}",
                self.viewport_height
            )));
        }
        if self.frame_interval_ms == 0 {
            return Err(ConfigError::Invalid("frame_interval_ms must be > 0".into()));
        }
        if self.attribute.trim().is_empty() {
            return Err(ConfigError::Invalid("attribute must not be empty".into()));
        }
        Ok(())
    }

    pub fn viewport(&self) -> Viewport {
        Viewport {
            width: self.viewport_width,
            height: self.viewport_height,
        }
    }

    pub fn frame_interval(&self) -> Duration {
        Duration::from_millis(self.frame_interval_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_gives_defaults() {
        let config = HostConfig::from_toml_str("").unwrap();
        assert_eq!(config, HostConfig::default());
        assert_eq!(config.attribute, "data-elm-flip-id");
        assert_eq!(config.frame_interval(), Duration::from_millis(16));
    }

    #[test]
    fn keys_override_defaults() {
        let config = HostConfig::from_toml_str(
            "viewport_width = 320\nframe_interval_ms = 5\nattribute = \"data-key\"\n",
        )
        .unwrap();
        assert_eq!(config.viewport().width, 320.0);
        assert_eq!(config.viewport().height, 600.0);
        assert_eq!(config.frame_interval_ms, 5);
        assert_eq!(config.attribute, "data-key");
    }

    #[test]
    fn unknown_keys_and_bad_values_are_rejected() {
        assert!(matches!(
            HostConfig::from_toml_str("viewport = 3"),
            Err(ConfigError::Parse(_))
        ));
        assert!(matches!(
            HostConfig::from_toml_str("frame_interval_ms = 0"),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            HostConfig::from_toml_str("attribute = \" \""),
            Err(ConfigError::Invalid(_))
        ));
    }

    #[test]
    fn missing_file_reports_path() {
        let err = HostConfig::load(Path::new("/nonexistent/flipprobe.toml")).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/flipprobe.toml"));
    }
}
