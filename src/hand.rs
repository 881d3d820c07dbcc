//! Hand landmark schema and per-frame adapter
//!
//! Normalizes whatever the vision collaborator emits for one frame into
//! validated [`HandFrame`]s of exactly 21 named landmarks. Hands with a
//! malformed landmark count are dropped, not errored: detection noise is
//! expected on every frame.

use serde::{Deserialize, Serialize};

/// Number of landmarks in a valid hand detection
pub const LANDMARK_COUNT: usize = 21;

/// Landmark indices, fixed anatomical naming.
///
/// Index `i` refers to the same anatomical point on every frame.
pub mod index {
    pub const WRIST: usize = 0;
    pub const THUMB_CMC: usize = 1;
    pub const THUMB_MCP: usize = 2;
    pub const THUMB_IP: usize = 3;
    pub const THUMB_TIP: usize = 4;
    pub const INDEX_MCP: usize = 5;
    pub const INDEX_PIP: usize = 6;
    pub const INDEX_DIP: usize = 7;
    pub const INDEX_TIP: usize = 8;
    pub const MIDDLE_MCP: usize = 9;
    pub const MIDDLE_PIP: usize = 10;
    pub const MIDDLE_DIP: usize = 11;
    pub const MIDDLE_TIP: usize = 12;
    pub const RING_MCP: usize = 13;
    pub const RING_PIP: usize = 14;
    pub const RING_DIP: usize = 15;
    pub const RING_TIP: usize = 16;
    pub const PINKY_MCP: usize = 17;
    pub const PINKY_PIP: usize = 18;
    pub const PINKY_DIP: usize = 19;
    pub const PINKY_TIP: usize = 20;
}

/// A single tracked point on a hand, in normalized image coordinates.
///
/// `x` and `y` are in [0, 1] within the camera frame. `z` is relative depth
/// and defaults to 0 when the collaborator omits it.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Landmark {
    pub x: f32,
    pub y: f32,
    #[serde(default)]
    pub z: f32,
}

impl Landmark {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y, z: 0.0 }
    }

    /// Euclidean distance to another landmark in the normalized image
    /// plane. Depth is ignored: the pinch gesture is defined on the 2D
    /// projection.
    pub fn distance(&self, other: &Landmark) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}

/// An ordered set of exactly 21 landmarks for one detected hand
#[derive(Debug, Clone, PartialEq)]
pub struct HandFrame {
    landmarks: [Landmark; LANDMARK_COUNT],
}

impl HandFrame {
    /// Build a frame from a raw landmark list.
    ///
    /// Returns `None` for any count other than 21; the frame is dropped
    /// rather than surfaced as an error.
    pub fn from_landmarks(landmarks: &[Landmark]) -> Option<Self> {
        let landmarks: [Landmark; LANDMARK_COUNT] = landmarks.try_into().ok()?;
        Some(Self { landmarks })
    }

    /// Get the landmark at an anatomical index (see [`index`])
    pub fn landmark(&self, idx: usize) -> &Landmark {
        &self.landmarks[idx]
    }

    pub fn landmarks(&self) -> &[Landmark; LANDMARK_COUNT] {
        &self.landmarks
    }

    pub fn thumb_tip(&self) -> &Landmark {
        &self.landmarks[index::THUMB_TIP]
    }

    pub fn index_tip(&self) -> &Landmark {
        &self.landmarks[index::INDEX_TIP]
    }

    /// Thumb-tip to index-tip distance, the pinch metric
    pub fn pinch_distance(&self) -> f32 {
        self.thumb_tip().distance(self.index_tip())
    }
}

/// One camera frame's worth of raw hand detections.
///
/// This is what the vision collaborator delivers per frame: zero or more
/// candidate landmark lists, not yet validated. The raw source image never
/// crosses this boundary; it is consumed by the rendering collaborator only.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawDetection {
    pub hands: Vec<Vec<Landmark>>,
}

impl RawDetection {
    pub fn new(hands: Vec<Vec<Landmark>>) -> Self {
        Self { hands }
    }

    /// A frame with no hands detected
    pub fn empty() -> Self {
        Self { hands: Vec::new() }
    }
}

/// Normalize a raw detection into validated hand frames.
///
/// Malformed hands (landmark count != 21) are filtered out. Detection order
/// is preserved: the first returned frame is the first detected hand.
pub fn adapt(raw: &RawDetection) -> Vec<HandFrame> {
    raw.hands
        .iter()
        .filter_map(|landmarks| HandFrame::from_landmarks(landmarks))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn uniform_hand(x: f32, y: f32) -> Vec<Landmark> {
        vec![Landmark::new(x, y); LANDMARK_COUNT]
    }

    #[test]
    fn test_landmark_distance() {
        let a = Landmark::new(0.0, 0.0);
        let b = Landmark::new(0.3, 0.4);
        assert!((a.distance(&b) - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_distance_ignores_depth() {
        let a = Landmark { x: 0.1, y: 0.1, z: 0.0 };
        let b = Landmark { x: 0.1, y: 0.1, z: 0.9 };
        assert_eq!(a.distance(&b), 0.0);
    }

    #[test]
    fn test_frame_requires_21_landmarks() {
        assert!(HandFrame::from_landmarks(&uniform_hand(0.5, 0.5)).is_some());
        assert!(HandFrame::from_landmarks(&vec![Landmark::default(); 20]).is_none());
        assert!(HandFrame::from_landmarks(&vec![Landmark::default(); 22]).is_none());
        assert!(HandFrame::from_landmarks(&[]).is_none());
    }

    #[test]
    fn test_adapt_drops_malformed_hands() {
        let raw = RawDetection::new(vec![
            uniform_hand(0.2, 0.2),
            vec![Landmark::default(); 5],
            uniform_hand(0.8, 0.8),
        ]);

        let frames = adapt(&raw);
        assert_eq!(frames.len(), 2);
        // Detection order preserved
        assert_eq!(frames[0].index_tip().x, 0.2);
        assert_eq!(frames[1].index_tip().x, 0.8);
    }

    #[test]
    fn test_adapt_empty_frame() {
        assert!(adapt(&RawDetection::empty()).is_empty());
    }

    #[test]
    fn test_pinch_distance() {
        let mut landmarks = uniform_hand(0.5, 0.5);
        landmarks[index::THUMB_TIP] = Landmark::new(0.40, 0.50);
        landmarks[index::INDEX_TIP] = Landmark::new(0.43, 0.54);

        let frame = HandFrame::from_landmarks(&landmarks).unwrap();
        assert!((frame.pinch_distance() - 0.05).abs() < 1e-6);
    }

    #[test]
    fn test_parse_landmark_without_depth() {
        let lm: Landmark = serde_json::from_str(r#"{"x":0.25,"y":0.75}"#).unwrap();
        assert_eq!(lm.x, 0.25);
        assert_eq!(lm.y, 0.75);
        assert_eq!(lm.z, 0.0);
    }
}
