//! Gesture interpretation module
//!
//! Per-frame computations over validated hand frames:
//! - Pointer mapping from the index-finger tip to target pixel space
//! - Pinch detection with edge-triggered click events
//! - Optional pointer smoothing

pub mod pinch;
pub mod pointer;
pub mod smoothing;

pub use pinch::{ClickPhase, PinchDetector};
pub use pointer::{map_pointer, PointerMapper, PointerState};
pub use smoothing::{EmaFilter, SmoothingMode};

use serde::Serialize;

/// Discrete events produced by the gesture pipeline
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GestureEvent {
    /// The pointer moved to a new target coordinate.
    /// Fired every frame a hand is detected.
    PointerMove { x: f32, y: f32 },
    /// A pinch closed. Fired exactly once per pinch-in edge.
    Click,
}
