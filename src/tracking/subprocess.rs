//! Tracker subprocess manager
//!
//! Launches and manages the Python hand tracker as a child process with
//! automatic cleanup on drop.

use tokio::process::{Child, Command};

use crate::config::TrackerConfig;
use crate::error::{HandcursorError, TrackingError};

/// Manages a hand tracker subprocess (scripts/hand_tracker.py)
pub struct TrackerSubprocess {
    child: Option<Child>,
    config: TrackerConfig,
}

impl TrackerSubprocess {
    /// Create a new subprocess manager (does not start the process)
    pub fn new(config: &TrackerConfig) -> Self {
        Self {
            child: None,
            config: config.clone(),
        }
    }

    /// Launch the hand tracker subprocess.
    pub fn start(&mut self) -> Result<(), HandcursorError> {
        if self.is_running() {
            return Ok(());
        }

        let child = Command::new("python3")
            .arg(&self.config.tracker_script)
            .args(["--ip", &self.config.listen_address])
            .args(["--port", &self.config.port.to_string()])
            .args(["--capture", &self.config.camera_device.to_string()])
            .args(["--width", &self.config.capture_width.to_string()])
            .args(["--height", &self.config.capture_height.to_string()])
            .args(["--fps", &self.config.capture_fps.to_string()])
            .args(["--max-hands", &self.config.max_hands.to_string()])
            .args([
                "--detection-threshold",
                &self.config.detection_threshold.to_string(),
            ])
            .args([
                "--tracking-threshold",
                &self.config.tracking_threshold.to_string(),
            ])
            .args(["--model-dir", &self.config.model_dir])
            .kill_on_drop(true)
            .stdout(std::process::Stdio::null())
            .stderr(std::process::Stdio::piped())
            .spawn()
            .map_err(|e| {
                TrackingError::Subprocess(format!(
                    "Failed to launch hand tracker at '{}': {}",
                    self.config.tracker_script, e
                ))
            })?;

        tracing::info!(
            "Hand tracker subprocess started (pid: {:?}, camera: {}, port: {})",
            child.id(),
            self.config.camera_device,
            self.config.port,
        );

        self.child = Some(child);
        Ok(())
    }

    /// Check if the subprocess is still running (non-blocking)
    pub fn is_running(&mut self) -> bool {
        match &mut self.child {
            Some(child) => match child.try_wait() {
                Ok(None) => true,
                Ok(Some(status)) => {
                    tracing::warn!("Hand tracker subprocess exited with: {}", status);
                    self.child = None;
                    false
                }
                Err(e) => {
                    tracing::error!("Failed to check hand tracker subprocess status: {}", e);
                    false
                }
            },
            None => false,
        }
    }

    /// Stop the subprocess by killing it
    pub async fn stop(&mut self) {
        if let Some(mut child) = self.child.take() {
            tracing::info!("Stopping hand tracker subprocess (pid: {:?})", child.id());
            let _ = child.kill().await;
            let _ = child.wait().await;
        }
    }
}

/// Check if the `mediapipe` Python package is available.
///
/// Runs `python3 -c "import mediapipe"` and returns true if it succeeds.
pub fn check_mediapipe_available() -> bool {
    match std::process::Command::new("python3")
        .args(["-c", "import mediapipe"])
        .stdout(std::process::Stdio::null())
        .stderr(std::process::Stdio::null())
        .status()
    {
        Ok(status) => status.success(),
        Err(_) => false,
    }
}
