//! Pointer mapping
//!
//! Maps the index-finger-tip landmark of the controlling hand to the target
//! coordinate space. The mapping itself is a pure linear scale; no filtering
//! is applied unless an optional smoothing stage is configured.

use crate::config::GestureConfig;
use crate::gesture::smoothing::{EmaFilter, SmoothingMode};
use crate::hand::{HandFrame, Landmark};

/// The current mapped pointer coordinate.
///
/// Recomputed every frame a hand is present; frozen at its last value when
/// no hand is detected.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PointerState {
    pub x: f32,
    pub y: f32,
}

/// Map a normalized landmark coordinate linearly into target pixel space.
///
/// Pure function of its inputs: same landmark and dimensions always produce
/// the same output.
pub fn map_pointer(landmark: &Landmark, target_width: f32, target_height: f32) -> (f32, f32) {
    (landmark.x * target_width, landmark.y * target_height)
}

/// Tracks the pointer position across frames
pub struct PointerMapper {
    state: PointerState,
    target_width: f32,
    target_height: f32,
    /// Smoothing filters for the normalized x/y channels, if enabled
    smoothers: Option<(EmaFilter, EmaFilter)>,
}

impl PointerMapper {
    pub fn new(config: &GestureConfig) -> Self {
        let smoothers = match SmoothingMode::from_str(&config.smoothing) {
            SmoothingMode::Ema => Some((
                EmaFilter::new(config.smoothing_alpha),
                EmaFilter::new(config.smoothing_alpha),
            )),
            SmoothingMode::None => None,
        };

        Self {
            state: PointerState::default(),
            target_width: config.target_width,
            target_height: config.target_height,
            smoothers,
        }
    }

    /// Map one frame's index-finger tip to the target space, updating and
    /// returning the pointer state.
    pub fn map(&mut self, frame: &HandFrame) -> PointerState {
        let tip = frame.index_tip();

        let (nx, ny) = match &mut self.smoothers {
            Some((fx, fy)) => (fx.filter(tip.x), fy.filter(tip.y)),
            None => (tip.x, tip.y),
        };

        let (x, y) = map_pointer(
            &Landmark::new(nx, ny),
            self.target_width,
            self.target_height,
        );
        self.state = PointerState { x, y };
        self.state
    }

    pub fn state(&self) -> PointerState {
        self.state
    }

    /// Reset the pointer to the default position and clear filter history
    pub fn reset(&mut self) {
        self.state = PointerState::default();
        if let Some((fx, fy)) = &mut self.smoothers {
            fx.reset();
            fy.reset();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hand::{index, LANDMARK_COUNT};

    fn frame_with_index_tip(x: f32, y: f32) -> HandFrame {
        let mut landmarks = vec![Landmark::new(0.5, 0.5); LANDMARK_COUNT];
        landmarks[index::INDEX_TIP] = Landmark::new(x, y);
        HandFrame::from_landmarks(&landmarks).unwrap()
    }

    #[test]
    fn test_map_pointer_linear() {
        let lm = Landmark::new(0.5, 0.5);
        assert_eq!(map_pointer(&lm, 1280.0, 720.0), (640.0, 360.0));

        let lm = Landmark::new(0.0, 1.0);
        assert_eq!(map_pointer(&lm, 1280.0, 720.0), (0.0, 720.0));
    }

    #[test]
    fn test_map_pointer_deterministic() {
        let lm = Landmark::new(0.123, 0.456);
        let first = map_pointer(&lm, 1920.0, 1080.0);
        let second = map_pointer(&lm, 1920.0, 1080.0);
        assert_eq!(first, second);
    }

    #[test]
    fn test_mapper_updates_state() {
        let mut mapper = PointerMapper::new(&GestureConfig::default());
        let state = mapper.map(&frame_with_index_tip(0.5, 0.5));
        assert_eq!(state, PointerState { x: 640.0, y: 360.0 });
        assert_eq!(mapper.state(), state);
    }

    #[test]
    fn test_mapper_no_smoothing_passes_noise_through() {
        let mut mapper = PointerMapper::new(&GestureConfig::default());
        mapper.map(&frame_with_index_tip(0.5, 0.5));
        let state = mapper.map(&frame_with_index_tip(0.9, 0.1));
        // Raw pass-through: the second frame fully determines the output
        assert_eq!(state, PointerState { x: 1152.0, y: 72.0 });
    }

    #[test]
    fn test_mapper_ema_smoothing() {
        let config = GestureConfig {
            smoothing: "ema".to_string(),
            smoothing_alpha: 0.5,
            ..GestureConfig::default()
        };
        let mut mapper = PointerMapper::new(&config);

        mapper.map(&frame_with_index_tip(0.0, 0.0));
        let state = mapper.map(&frame_with_index_tip(1.0, 1.0));
        // Halfway between the two samples at alpha = 0.5
        assert!((state.x - 640.0).abs() < 1e-3);
        assert!((state.y - 360.0).abs() < 1e-3);
    }

    #[test]
    fn test_reset_returns_to_default() {
        let mut mapper = PointerMapper::new(&GestureConfig::default());
        mapper.map(&frame_with_index_tip(0.7, 0.7));
        mapper.reset();
        assert_eq!(mapper.state(), PointerState::default());
    }
}
