//! Cursor output state
//!
//! The rendering-facing merge of the gesture pipeline's outputs: pointer
//! position, click indication and hand visibility. Broadcast to output
//! sinks whenever it changes.

use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};

/// Output-facing cursor state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CursorState {
    /// Mapped x coordinate in target pixel space
    x: f32,
    /// Mapped y coordinate in target pixel space
    y: f32,
    /// Whether the click indication is currently shown
    pressed: bool,
    /// Whether a hand was detected on the most recent frame
    hand_visible: bool,
    /// Timestamp of last press/visibility change (not serialized)
    #[serde(skip)]
    last_change: Option<Instant>,
}

impl Default for CursorState {
    fn default() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            pressed: false,
            hand_visible: false,
            last_change: Some(Instant::now()),
        }
    }
}

impl CursorState {
    pub fn x(&self) -> f32 {
        self.x
    }

    pub fn y(&self) -> f32 {
        self.y
    }

    pub fn is_pressed(&self) -> bool {
        self.pressed
    }

    pub fn hand_visible(&self) -> bool {
        self.hand_visible
    }

    /// Duration since the last press/visibility change
    pub fn time_since_change(&self) -> Duration {
        self.last_change
            .map(|t| t.elapsed())
            .unwrap_or(Duration::ZERO)
    }

    /// Create a new state with the pointer position changed
    pub fn with_position(mut self, x: f32, y: f32) -> Self {
        self.x = x;
        self.y = y;
        self
    }

    /// Create a new state with the press indication changed
    pub fn with_pressed(mut self, pressed: bool) -> Self {
        if pressed != self.pressed {
            self.pressed = pressed;
            self.last_change = Some(Instant::now());
        }
        self
    }

    /// Create a new state with hand visibility changed
    pub fn with_hand_visible(mut self, visible: bool) -> Self {
        if visible != self.hand_visible {
            self.hand_visible = visible;
            self.last_change = Some(Instant::now());
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_state() {
        let state = CursorState::default();
        assert_eq!(state.x(), 0.0);
        assert_eq!(state.y(), 0.0);
        assert!(!state.is_pressed());
        assert!(!state.hand_visible());
    }

    #[test]
    fn test_with_position() {
        let state = CursorState::default().with_position(640.0, 360.0);
        assert_eq!(state.x(), 640.0);
        assert_eq!(state.y(), 360.0);
    }

    #[test]
    fn test_press_transitions() {
        let state = CursorState::default().with_pressed(true);
        assert!(state.is_pressed());

        let state = state.with_pressed(false);
        assert!(!state.is_pressed());
    }

    #[test]
    fn test_unchanged_press_preserves_timestamp() {
        let state = CursorState::default();
        let before = state.last_change;
        let state = state.with_pressed(false);
        assert_eq!(state.last_change, before);
    }

    #[test]
    fn test_serializes_without_timestamp() {
        let state = CursorState::default().with_position(100.0, 200.0);
        let json = serde_json::to_value(&state).unwrap();
        assert_eq!(json["x"], 100.0);
        assert_eq!(json["y"], 200.0);
        assert_eq!(json["pressed"], false);
        assert!(json.get("last_change").is_none());
    }
}
