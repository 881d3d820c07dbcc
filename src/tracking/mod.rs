//! Tracking module
//!
//! Input boundary with the hand-detection collaborator:
//! - JSON-over-UDP receiver for per-frame hand landmark packets
//! - Subprocess manager for the bundled Python tracker

pub mod receiver;
pub mod subprocess;

pub use receiver::{HandPacket, HandReceiver};
pub use subprocess::{check_mediapipe_available, TrackerSubprocess};
