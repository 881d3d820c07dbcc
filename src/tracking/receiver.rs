//! Hand tracker receiver
//!
//! Receives JSON-over-UDP packets from the `scripts/hand_tracker.py` Python
//! helper, one packet per camera frame. The receiver only parses the wire
//! format; landmark validation happens in the adapter.

use serde::Deserialize;
use std::net::UdpSocket;
use std::time::Duration;

use crate::config::TrackerConfig;
use crate::error::{HandcursorError, TrackingError};
use crate::hand::{Landmark, RawDetection};

/// A single JSON packet from the hand tracker
#[derive(Debug, Clone, Deserialize)]
pub struct HandPacket {
    /// Whether any hand was detected this frame
    pub hand_detected: bool,
    /// One landmark list per detected hand, in detection order
    #[serde(default)]
    pub hands: Vec<Vec<Landmark>>,
}

impl HandPacket {
    /// Convert to the adapter's input form. The landmark lists are passed
    /// through unvalidated; `hand::adapt` drops malformed ones.
    pub fn to_detection(&self) -> RawDetection {
        if !self.hand_detected {
            return RawDetection::empty();
        }
        RawDetection::new(self.hands.clone())
    }
}

/// Hand tracker JSON-over-UDP receiver
pub struct HandReceiver {
    config: TrackerConfig,
    socket: Option<UdpSocket>,
}

impl HandReceiver {
    /// Create a new receiver (does not bind yet)
    pub fn new(config: &TrackerConfig) -> Self {
        Self {
            config: config.clone(),
            socket: None,
        }
    }

    /// Bind the UDP socket and start receiving.
    ///
    /// A bind failure means the collaborator boundary cannot be
    /// established and is surfaced to the caller.
    pub fn start(&mut self) -> Result<(), HandcursorError> {
        let addr = format!("{}:{}", self.config.listen_address, self.config.port);

        let socket = UdpSocket::bind(&addr).map_err(|e| {
            TrackingError::Receiver(format!("Failed to bind to {}: {}", addr, e))
        })?;

        socket.set_nonblocking(true).map_err(|e| {
            TrackingError::Receiver(format!("Failed to set non-blocking: {}", e))
        })?;

        socket
            .set_read_timeout(Some(Duration::from_millis(100)))
            .ok();

        tracing::info!("Hand tracker receiver listening on {}", addr);
        self.socket = Some(socket);

        Ok(())
    }

    /// Poll for the next packet (non-blocking).
    ///
    /// Returns `Ok(None)` when no fresh packet has arrived or the receiver
    /// has not been started.
    pub fn poll(&self) -> Result<Option<HandPacket>, HandcursorError> {
        let socket = match &self.socket {
            Some(s) => s,
            None => return Ok(None),
        };

        let mut buf = [0u8; 65536];

        match socket.recv(&mut buf) {
            Ok(size) if size > 0 => {
                let packet: HandPacket = serde_json::from_slice(&buf[..size])
                    .map_err(|e| TrackingError::Parse(format!("JSON parse error: {}", e)))?;
                Ok(Some(packet))
            }
            Ok(_) => Ok(None),
            Err(e) if e.kind() == std::io::ErrorKind::WouldBlock => {
                // No data available
                Ok(None)
            }
            Err(e) => Err(TrackingError::Receiver(format!("Receive error: {}", e)).into()),
        }
    }

    /// Stop the receiver
    pub fn stop(&mut self) {
        self.socket = None;
        tracing::info!("Hand tracker receiver stopped");
    }
}
