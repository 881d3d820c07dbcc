//! Handcursor - Headless Hand-Gesture Cursor Service
//!
//! A modular Rust service that turns hand-landmark detections into cursor
//! control:
//! - Receives per-frame hand landmarks from a MediaPipe tracker (JSON over UDP)
//! - Maps the index-finger tip to pointer movement in a target pixel space
//! - Debounces thumb/index pinches into edge-triggered click events
//! - Outputs to a browser overlay (HTTP/SSE) and raw event streams

pub mod config;
pub mod cursor;
pub mod error;
pub mod gesture;
pub mod hand;
pub mod output;
pub mod session;
pub mod tracking;

pub use config::Config;
pub use error::{HandcursorError, Result};

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::{broadcast, RwLock};

use cursor::CursorState;
use gesture::GestureEvent;

/// Application state shared across all components
#[derive(Debug)]
pub struct AppState {
    /// Current configuration
    pub config: RwLock<Config>,
    /// Current cursor state
    pub cursor: RwLock<CursorState>,
    /// Channel for cursor state updates
    pub cursor_tx: broadcast::Sender<CursorState>,
    /// Channel for raw gesture events
    pub event_tx: broadcast::Sender<GestureEvent>,
    /// Shutdown signal
    pub shutdown_tx: broadcast::Sender<()>,
    /// Tracker collaborator connection status
    pub tracker_connected: AtomicBool,
}

impl AppState {
    /// Create a new application state with the given configuration
    pub fn new(config: Config) -> Arc<Self> {
        let (cursor_tx, _) = broadcast::channel(64);
        let (event_tx, _) = broadcast::channel(256);
        let (shutdown_tx, _) = broadcast::channel(1);

        Arc::new(Self {
            config: RwLock::new(config),
            cursor: RwLock::new(CursorState::default()),
            cursor_tx,
            event_tx,
            shutdown_tx,
            tracker_connected: AtomicBool::new(false),
        })
    }

    /// Update the cursor state and broadcast the change
    pub async fn update_cursor(&self, state: CursorState) {
        let mut current = self.cursor.write().await;
        *current = state.clone();
        let _ = self.cursor_tx.send(state);
    }

    /// Get the current cursor state
    pub async fn get_cursor(&self) -> CursorState {
        self.cursor.read().await.clone()
    }

    /// Subscribe to cursor state changes
    pub fn subscribe_cursor(&self) -> broadcast::Receiver<CursorState> {
        self.cursor_tx.subscribe()
    }

    /// Subscribe to raw gesture events
    pub fn subscribe_events(&self) -> broadcast::Receiver<GestureEvent> {
        self.event_tx.subscribe()
    }

    /// Subscribe to shutdown signal
    pub fn subscribe_shutdown(&self) -> broadcast::Receiver<()> {
        self.shutdown_tx.subscribe()
    }

    /// Signal shutdown
    pub fn shutdown(&self) {
        let _ = self.shutdown_tx.send(());
    }

    /// Set tracker connection status
    pub fn set_tracker_connected(&self, connected: bool) {
        self.tracker_connected.store(connected, Ordering::Relaxed);
    }

    /// Check tracker connection status
    pub fn is_tracker_connected(&self) -> bool {
        self.tracker_connected.load(Ordering::Relaxed)
    }
}

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
