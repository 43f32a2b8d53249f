//! Configuration for FingerPoint.

use crate::core::classifier::GestureThresholds;
use crate::pointer::Viewport;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Main configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Gesture classification thresholds
    #[serde(default)]
    pub thresholds: GestureThresholds,

    /// Host viewport used to map events to pixels
    #[serde(default)]
    pub viewport: Viewport,

    /// Path for exporting emitted event streams
    pub export_path: PathBuf,

    /// Path for storing session statistics
    pub data_path: PathBuf,

    /// Whether gesture control is switched on
    pub enabled: bool,
}

impl Default for Config {
    fn default() -> Self {
        let data_dir = dirs::data_local_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("fingerpoint");

        Self {
            thresholds: GestureThresholds::default(),
            viewport: Viewport::default(),
            export_path: data_dir.join("exports"),
            data_path: data_dir,
            // No camera is involved in replay, so there is nothing to opt in to.
            enabled: true,
        }
    }
}

impl Config {
    /// Load configuration from the default location.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::config_path())
    }

    /// Load and validate configuration from `path`, or the defaults if it is missing.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content =
            std::fs::read_to_string(path).map_err(|e| ConfigError::IoError(e.to_string()))?;
        let config: Config =
            serde_json::from_str(&content).map_err(|e| ConfigError::ParseError(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to the default location.
    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(&Self::config_path())
    }

    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| ConfigError::IoError(e.to_string()))?;
        }

        let content = serde_json::to_string_pretty(self)
            .map_err(|e| ConfigError::SerializeError(e.to_string()))?;

        std::fs::write(path, content).map_err(|e| ConfigError::IoError(e.to_string()))?;

        Ok(())
    }

    /// Flip the `enabled` flag in the file at `path`, keeping every other
    /// setting. A file that fails to load is left untouched.
    pub fn set_enabled_at(path: &Path, enabled: bool) -> Result<Self, ConfigError> {
        let mut config = Self::load_from(path)?;
        config.enabled = enabled;
        config.save_to(path)?;
        Ok(config)
    }

    /// Get the path to the configuration file.
    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("fingerpoint")
            .join("config.json")
    }

    /// Ensure all required directories exist.
    pub fn ensure_directories(&self) -> Result<(), ConfigError> {
        std::fs::create_dir_all(&self.export_path)
            .map_err(|e| ConfigError::IoError(e.to_string()))?;
        std::fs::create_dir_all(&self.data_path)
            .map_err(|e| ConfigError::IoError(e.to_string()))?;
        Ok(())
    }

    /// Reject thresholds and viewport sizes that cannot classify anything.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let t = &self.thresholds;
        if !(t.touch_radius.is_finite() && t.touch_radius > 0.0) {
            return Err(ConfigError::Invalid(
                "touch_radius must be positive".to_string(),
            ));
        }
        if !(t.straight_ratio.is_finite() && t.straight_ratio > 0.0) {
            return Err(ConfigError::Invalid(
                "straight_ratio must be positive".to_string(),
            ));
        }
        if !(t.scroll_delta_threshold.is_finite() && t.scroll_delta_threshold >= 0.0) {
            return Err(ConfigError::Invalid(
                "scroll_delta_threshold must not be negative".to_string(),
            ));
        }
        if !(self.viewport.width > 0.0 && self.viewport.height > 0.0) {
            return Err(ConfigError::Invalid(
                "viewport must have a non-zero size".to_string(),
            ));
        }
        Ok(())
    }
}

/// Configuration errors.
#[derive(Debug)]
pub enum ConfigError {
    IoError(String),
    ParseError(String),
    SerializeError(String),
    Invalid(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::IoError(e) => write!(f, "IO error: {e}"),
            ConfigError::ParseError(e) => write!(f, "Parse error: {e}"),
            ConfigError::SerializeError(e) => write!(f, "Serialize error: {e}"),
            ConfigError::Invalid(e) => write!(f, "Invalid configuration: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Serde support for Duration as whole milliseconds.
pub(crate) mod duration_ms_serde {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        (duration.as_millis() as u64).serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let millis = u64::deserialize(deserializer)?;
        Ok(Duration::from_millis(millis))
    }
}
