//! Pinch detection and click debouncing
//!
//! Computes the thumb-tip/index-tip distance per frame and turns it into
//! edge-triggered click events: one click per pinch-in transition, nothing
//! while the pinch is held. A sustained pinch therefore fires a single
//! click, not one per frame.

use std::time::{Duration, Instant};

use crate::config::GestureConfig;
use crate::hand::HandFrame;

/// Phase of the pinch state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ClickPhase {
    /// Tips apart, ready to fire on the next pinch-in edge
    #[default]
    Idle,
    /// Tips together; the click for this pinch has already fired
    Active,
}

/// Edge-triggered pinch/click detector.
///
/// Transitions: `Idle -> Active` when the distance drops strictly below the
/// threshold (emitting one click), `Active -> Idle` when it rises back to or
/// above it (emitting nothing). Frames without a hand leave the state
/// untouched, so a dropped detection mid-pinch neither cancels the pinch nor
/// re-arms the edge.
pub struct PinchDetector {
    phase: ClickPhase,
    /// Pinch-in threshold in normalized coordinates; `d < threshold` counts
    /// as pinched, exactly equal does not.
    threshold: f32,
    /// How long the visual click indication stays on after a press edge
    hold: Duration,
    /// Timestamp of the last pinch-in edge
    last_click: Option<Instant>,
}

impl PinchDetector {
    pub fn new(config: &GestureConfig) -> Self {
        Self {
            phase: ClickPhase::Idle,
            threshold: config.pinch_distance,
            hold: Duration::from_millis(config.click_hold_ms),
            last_click: None,
        }
    }

    /// Feed one validated hand frame. Returns `true` exactly on the
    /// Idle -> Active edge.
    pub fn update(&mut self, frame: &HandFrame) -> bool {
        let pinched = frame.pinch_distance() < self.threshold;

        match (self.phase, pinched) {
            (ClickPhase::Idle, true) => {
                self.phase = ClickPhase::Active;
                self.last_click = Some(Instant::now());
                true
            }
            (ClickPhase::Active, false) => {
                self.phase = ClickPhase::Idle;
                false
            }
            _ => false,
        }
    }

    pub fn phase(&self) -> ClickPhase {
        self.phase
    }

    /// Whether the visual click indication should currently be shown.
    ///
    /// Holds for the configured window after each pinch-in edge. Purely
    /// cosmetic: detection is not gated by this window.
    pub fn indicator_active(&self) -> bool {
        self.last_click
            .map(|t| t.elapsed() < self.hold)
            .unwrap_or(false)
    }

    /// Reset to the default idle state
    pub fn reset(&mut self) {
        self.phase = ClickPhase::Idle;
        self.last_click = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hand::{index, Landmark, LANDMARK_COUNT};

    /// Build a hand whose thumb-tip/index-tip distance is exactly `d`
    fn frame_with_pinch_distance(d: f32) -> HandFrame {
        let mut landmarks = vec![Landmark::new(0.5, 0.5); LANDMARK_COUNT];
        landmarks[index::THUMB_TIP] = Landmark::new(0.5, 0.5);
        landmarks[index::INDEX_TIP] = Landmark::new(0.5 + d, 0.5);
        HandFrame::from_landmarks(&landmarks).unwrap()
    }

    fn detector() -> PinchDetector {
        PinchDetector::new(&GestureConfig::default())
    }

    #[test]
    fn test_single_click_per_pinch() {
        let mut det = detector();

        let clicks: usize = [0.10, 0.03, 0.02, 0.01, 0.02, 0.10]
            .iter()
            .map(|&d| det.update(&frame_with_pinch_distance(d)) as usize)
            .sum();

        assert_eq!(clicks, 1);
    }

    #[test]
    fn test_click_fires_on_first_subthreshold_frame() {
        let mut det = detector();
        assert!(!det.update(&frame_with_pinch_distance(0.10)));
        assert!(det.update(&frame_with_pinch_distance(0.03)));
        assert!(!det.update(&frame_with_pinch_distance(0.02)));
    }

    #[test]
    fn test_threshold_is_strict() {
        let mut det = detector();
        assert!(!det.update(&frame_with_pinch_distance(0.05)));
        assert_eq!(det.phase(), ClickPhase::Idle);

        assert!(det.update(&frame_with_pinch_distance(0.049)));
        assert_eq!(det.phase(), ClickPhase::Active);
    }

    #[test]
    fn test_release_rearms_edge() {
        let mut det = detector();
        assert!(det.update(&frame_with_pinch_distance(0.01)));
        assert!(!det.update(&frame_with_pinch_distance(0.10)));
        assert!(det.update(&frame_with_pinch_distance(0.01)));
    }

    #[test]
    fn test_state_survives_dropped_frames() {
        let mut det = detector();
        assert!(det.update(&frame_with_pinch_distance(0.03)));

        // A malformed detection never reaches the detector; its state must
        // carry across the gap so the continued pinch fires nothing.
        assert!(!det.update(&frame_with_pinch_distance(0.03)));
        assert_eq!(det.phase(), ClickPhase::Active);
    }

    #[test]
    fn test_indicator_follows_click() {
        let mut det = detector();
        assert!(!det.indicator_active());

        det.update(&frame_with_pinch_distance(0.01));
        assert!(det.indicator_active());
    }

    #[test]
    fn test_indicator_expires() {
        let config = GestureConfig {
            click_hold_ms: 0,
            ..GestureConfig::default()
        };
        let mut det = PinchDetector::new(&config);
        det.update(&frame_with_pinch_distance(0.01));
        assert!(!det.indicator_active());
    }

    #[test]
    fn test_reset() {
        let mut det = detector();
        det.update(&frame_with_pinch_distance(0.01));
        det.reset();
        assert_eq!(det.phase(), ClickPhase::Idle);
        assert!(!det.indicator_active());
    }
}
