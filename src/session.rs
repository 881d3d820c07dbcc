//! Gesture session controller
//!
//! Owns the per-frame pipeline: adapter, pointer mapper and pinch detector.
//! Each incoming frame is normalized, mapped and classified, and the
//! resulting events are dispatched to every registered sink. The session is
//! an explicit object owned by the caller; several independent sessions can
//! coexist.

use tokio::sync::broadcast;
use tracing::{debug, info};

use crate::config::GestureConfig;
use crate::error::Result;
use crate::gesture::{GestureEvent, PinchDetector, PointerMapper, PointerState};
use crate::hand::{self, RawDetection};

/// Capability set for gesture event consumers.
///
/// One sink per output concern (cursor renderer, click simulator, event
/// bridge); the session fans every event out to all of them.
pub trait GestureSink: Send {
    /// The pointer moved to a new target coordinate
    fn on_pointer_move(&mut self, x: f32, y: f32);
    /// A pinch-in edge fired a click
    fn on_click(&mut self);
}

/// Sink that forwards events onto a tokio broadcast channel.
///
/// Send failures mean no receiver is currently subscribed and are ignored.
pub struct BroadcastSink {
    tx: broadcast::Sender<GestureEvent>,
}

impl BroadcastSink {
    pub fn new(tx: broadcast::Sender<GestureEvent>) -> Self {
        Self { tx }
    }
}

impl GestureSink for BroadcastSink {
    fn on_pointer_move(&mut self, x: f32, y: f32) {
        let _ = self.tx.send(GestureEvent::PointerMove { x, y });
    }

    fn on_click(&mut self) {
        let _ = self.tx.send(GestureEvent::Click);
    }
}

/// Per-frame orchestration and lifecycle for one gesture pipeline
pub struct GestureSession {
    config: GestureConfig,
    mapper: PointerMapper,
    pinch: PinchDetector,
    sinks: Vec<Box<dyn GestureSink>>,
    running: bool,
    hand_visible: bool,
}

impl GestureSession {
    pub fn new(config: &GestureConfig) -> Self {
        Self {
            config: config.clone(),
            mapper: PointerMapper::new(config),
            pinch: PinchDetector::new(config),
            sinks: Vec::new(),
            running: false,
            hand_visible: false,
        }
    }

    /// Register an output sink. Sinks registered while running receive
    /// events starting with the next frame.
    pub fn add_sink(&mut self, sink: Box<dyn GestureSink>) {
        self.sinks.push(sink);
    }

    /// Start processing frames.
    ///
    /// Validates the gesture configuration before any frame is processed
    /// and resets pointer and click state to defaults. A no-op when the
    /// session is already running.
    pub fn start(&mut self) -> Result<()> {
        if self.running {
            return Ok(());
        }

        self.config.validate()?;

        self.mapper.reset();
        self.pinch.reset();
        self.hand_visible = false;
        self.running = true;

        info!(
            "Gesture session started (pinch_distance: {}, target: {}x{})",
            self.config.pinch_distance, self.config.target_width, self.config.target_height
        );
        Ok(())
    }

    /// Stop processing and reset state to defaults.
    ///
    /// Safe to call when never started or already stopped. Frames arriving
    /// after `stop()` are ignored until the next `start()`.
    pub fn stop(&mut self) {
        if self.running {
            info!("Gesture session stopped");
        }
        self.running = false;
        self.mapper.reset();
        self.pinch.reset();
        self.hand_visible = false;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Process one frame of raw detections.
    ///
    /// Runs adapter, pointer mapper and pinch detector, dispatches the
    /// resulting events to every sink and returns them. Frames with no
    /// valid hand leave all carried state untouched; frames arriving while
    /// stopped are ignored entirely.
    pub fn on_frame(&mut self, raw: &RawDetection) -> Vec<GestureEvent> {
        if !self.running {
            debug!("Dropping frame received while session is stopped");
            return Vec::new();
        }

        let frames = hand::adapt(raw);

        // Only the first hand in detection order controls the pointer;
        // further hands are ignored.
        let frame = match frames.first() {
            Some(f) => f,
            None => {
                self.hand_visible = false;
                return Vec::new();
            }
        };
        self.hand_visible = true;

        let mut events = Vec::with_capacity(2);

        let pointer = self.mapper.map(frame);
        events.push(GestureEvent::PointerMove {
            x: pointer.x,
            y: pointer.y,
        });

        if self.pinch.update(frame) {
            events.push(GestureEvent::Click);
        }

        self.dispatch(&events);
        events
    }

    fn dispatch(&mut self, events: &[GestureEvent]) {
        for event in events {
            for sink in &mut self.sinks {
                match *event {
                    GestureEvent::PointerMove { x, y } => sink.on_pointer_move(x, y),
                    GestureEvent::Click => sink.on_click(),
                }
            }
        }
    }

    /// Current pointer position (frozen while no hand is visible)
    pub fn pointer(&self) -> PointerState {
        self.mapper.state()
    }

    /// Whether the visual click indication is currently active
    pub fn click_indicator(&self) -> bool {
        self.pinch.indicator_active()
    }

    /// Whether the most recent frame contained a valid hand
    pub fn hand_visible(&self) -> bool {
        self.hand_visible
    }
}
