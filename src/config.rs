//! Configuration parsing and management for Handcursor

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{ConfigError, HandcursorError};

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub tracker: TrackerConfig,
    pub gesture: GestureConfig,
    pub http: HttpConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tracker: TrackerConfig::default(),
            gesture: GestureConfig::default(),
            http: HttpConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, HandcursorError> {
        let contents = std::fs::read_to_string(path.as_ref()).map_err(|e| {
            ConfigError::ReadFile(format!("{}: {}", path.as_ref().display(), e))
        })?;

        Self::from_str(&contents)
    }

    /// Parse configuration from a TOML string
    pub fn from_str(s: &str) -> Result<Self, HandcursorError> {
        toml::from_str(s).map_err(|e| ConfigError::Parse(e.to_string()).into())
    }

    /// Load configuration from default paths
    pub fn load() -> Result<Self, HandcursorError> {
        // Try config paths in order
        let paths = [
            PathBuf::from("config.toml"),
            PathBuf::from("config/default.toml"),
            dirs_path().join("config.toml"),
        ];

        for path in &paths {
            if path.exists() {
                tracing::info!("Loading config from: {}", path.display());
                return Self::from_file(path);
            }
        }

        tracing::info!("No config file found, using defaults");
        Ok(Self::default())
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), HandcursorError> {
        self.gesture.validate()?;

        if self.tracker.max_hands == 0 {
            return Err(ConfigError::InvalidValue {
                field: "tracker.max_hands".to_string(),
                message: "At least one hand must be tracked".to_string(),
            }
            .into());
        }

        if !(0.0..=1.0).contains(&self.tracker.detection_threshold) {
            return Err(ConfigError::InvalidValue {
                field: "tracker.detection_threshold".to_string(),
                message: "Threshold must be between 0.0 and 1.0".to_string(),
            }
            .into());
        }

        if !(0.0..=1.0).contains(&self.tracker.tracking_threshold) {
            return Err(ConfigError::InvalidValue {
                field: "tracker.tracking_threshold".to_string(),
                message: "Threshold must be between 0.0 and 1.0".to_string(),
            }
            .into());
        }

        if self.tracker.auto_launch {
            let path = std::path::Path::new(&self.tracker.tracker_script);
            if !path.exists() {
                tracing::warn!(
                    "Tracker auto_launch enabled but tracker script not found at: {}",
                    self.tracker.tracker_script
                );
            }
        }

        if self.http.enabled && self.http.port == 0 {
            return Err(ConfigError::InvalidValue {
                field: "http.port".to_string(),
                message: "Port must be greater than 0".to_string(),
            }
            .into());
        }

        Ok(())
    }
}

/// Hand tracker collaborator configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackerConfig {
    /// Enable the hand tracker receiver
    pub enabled: bool,
    /// UDP port to receive hand packets on
    pub port: u16,
    /// Listen address for UDP socket
    pub listen_address: String,
    /// Auto-launch the Python tracker subprocess
    pub auto_launch: bool,
    /// Path to hand_tracker.py script
    pub tracker_script: String,
    /// Camera device index
    pub camera_device: u32,
    /// Camera capture width
    pub capture_width: u32,
    /// Camera capture height
    pub capture_height: u32,
    /// Camera capture FPS
    pub capture_fps: u32,
    /// Maximum number of hands to track
    pub max_hands: u32,
    /// Minimum model confidence for detecting a hand
    pub detection_threshold: f32,
    /// Minimum model confidence for tracking across frames
    pub tracking_threshold: f32,
    /// Directory to store/cache the hand landmark model file
    pub model_dir: String,
    /// Auto-restart subprocess on crash
    pub auto_restart: bool,
    /// Delay before restarting crashed subprocess (seconds)
    pub restart_delay_secs: u64,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            port: 12347,
            listen_address: "127.0.0.1".to_string(),
            auto_launch: true,
            tracker_script: "scripts/hand_tracker.py".to_string(),
            camera_device: 0,
            capture_width: 1280,
            capture_height: 720,
            capture_fps: 30,
            max_hands: 1,
            detection_threshold: 0.5,
            tracking_threshold: 0.5,
            model_dir: ".".to_string(),
            auto_restart: true,
            restart_delay_secs: 3,
        }
    }
}

/// Gesture interpretation configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GestureConfig {
    /// Thumb-tip/index-tip distance below which the hand counts as pinched
    /// (normalized image coordinates)
    pub pinch_distance: f32,
    /// How long the visual click indication stays on after a pinch (ms)
    pub click_hold_ms: u64,
    /// Target coordinate space width in pixels
    pub target_width: f32,
    /// Target coordinate space height in pixels
    pub target_height: f32,
    /// Pointer smoothing: "none" or "ema"
    pub smoothing: String,
    /// EMA smoothing factor (0.0 - 1.0, higher follows the raw signal faster)
    pub smoothing_alpha: f32,
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            pinch_distance: 0.05,
            click_hold_ms: 200,
            target_width: 1280.0,
            target_height: 720.0,
            smoothing: "none".to_string(),
            smoothing_alpha: 0.4,
        }
    }
}

impl GestureConfig {
    /// Validate gesture parameters, failing fast before any frame is processed
    pub fn validate(&self) -> Result<(), HandcursorError> {
        if !(self.pinch_distance > 0.0 && self.pinch_distance < 1.0) {
            return Err(ConfigError::InvalidValue {
                field: "gesture.pinch_distance".to_string(),
                message: "Pinch distance must be between 0.0 and 1.0 exclusive".to_string(),
            }
            .into());
        }

        if self.target_width <= 0.0 || self.target_height <= 0.0 {
            return Err(ConfigError::InvalidValue {
                field: "gesture.target_width/target_height".to_string(),
                message: "Target dimensions must be positive".to_string(),
            }
            .into());
        }

        if !(0.0..=1.0).contains(&self.smoothing_alpha) {
            return Err(ConfigError::InvalidValue {
                field: "gesture.smoothing_alpha".to_string(),
                message: "Smoothing factor must be between 0.0 and 1.0".to_string(),
            }
            .into());
        }

        Ok(())
    }
}

/// HTTP overlay server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    /// Enable HTTP server
    pub enabled: bool,
    /// HTTP server host
    pub host: String,
    /// HTTP server port
    pub port: u16,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            host: "127.0.0.1".to_string(),
            port: 8090,
        }
    }
}

/// Get the platform-specific configuration directory
fn dirs_path() -> PathBuf {
    #[cfg(target_os = "linux")]
    {
        if let Some(config_dir) = std::env::var_os("XDG_CONFIG_HOME") {
            return PathBuf::from(config_dir).join("handcursor");
        }
        if let Some(home) = std::env::var_os("HOME") {
            return PathBuf::from(home).join(".config/handcursor");
        }
    }

    #[cfg(target_os = "macos")]
    {
        if let Some(home) = std::env::var_os("HOME") {
            return PathBuf::from(home).join("Library/Application Support/handcursor");
        }
    }

    #[cfg(target_os = "windows")]
    {
        if let Some(appdata) = std::env::var_os("APPDATA") {
            return PathBuf::from(appdata).join("handcursor");
        }
    }

    PathBuf::from(".")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.tracker.port, 12347);
        assert_eq!(config.tracker.max_hands, 1);
        assert_eq!(config.gesture.pinch_distance, 0.05);
        assert_eq!(config.gesture.target_width, 1280.0);
        assert!(config.http.enabled);
    }

    #[test]
    fn test_config_validation() {
        let config = Config::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_invalid_pinch_distance() {
        let mut config = Config::default();
        config.gesture.pinch_distance = -0.05;
        assert!(config.validate().is_err());

        config.gesture.pinch_distance = 0.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_target_dimensions() {
        let mut config = Config::default();
        config.gesture.target_width = 0.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_max_hands() {
        let mut config = Config::default();
        config.tracker.max_hands = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_parse_toml() {
        let toml = r#"
            [tracker]
            port = 23456
            max_hands = 2

            [gesture]
            pinch_distance = 0.08
            target_width = 1920.0
            target_height = 1080.0
        "#;

        let config = Config::from_str(toml).unwrap();
        assert_eq!(config.tracker.port, 23456);
        assert_eq!(config.tracker.max_hands, 2);
        assert_eq!(config.gesture.pinch_distance, 0.08);
        assert_eq!(config.gesture.target_width, 1920.0);
        // Unspecified sections fall back to defaults
        assert_eq!(config.http.port, 8090);
    }
}
