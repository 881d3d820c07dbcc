//! Error types for Handcursor

use thiserror::Error;

/// Main error type for Handcursor
#[derive(Error, Debug)]
pub enum HandcursorError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Tracking error: {0}")]
    Tracking(#[from] TrackingError),

    #[error("Output error: {0}")]
    Output(#[from] OutputError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-related errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadFile(String),

    #[error("Failed to parse config: {0}")]
    Parse(String),

    #[error("Invalid configuration value: {field} - {message}")]
    InvalidValue { field: String, message: String },
}

/// Tracking-related errors (hand tracker collaborator)
///
/// Malformed per-frame detections are NOT errors: the adapter drops them
/// silently, since detection noise is expected on every frame. These
/// variants cover the collaborator itself being unavailable or broken.
#[derive(Error, Debug)]
pub enum TrackingError {
    #[error("Hand receiver error: {0}")]
    Receiver(String),

    #[error("Hand packet parse error: {0}")]
    Parse(String),

    #[error("Tracker subprocess error: {0}")]
    Subprocess(String),
}

/// Output-related errors
#[derive(Error, Debug)]
pub enum OutputError {
    #[error("Failed to bind to address: {0}")]
    Bind(String),

    #[error("Overlay server error: {0}")]
    OverlayServer(String),
}

/// Result type alias for Handcursor operations
pub type Result<T> = std::result::Result<T, HandcursorError>;
