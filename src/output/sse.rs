//! Server-Sent Events for real-time cursor updates

use axum::response::sse::{Event, KeepAlive, Sse};
use futures::stream::Stream;
use std::convert::Infallible;
use std::sync::Arc;
use std::time::Duration;
use tokio_stream::wrappers::BroadcastStream;
use tokio_stream::StreamExt;

use crate::cursor::CursorState;
use crate::AppState;

/// Create an SSE stream of cursor state updates
pub fn create_cursor_stream(
    app_state: Arc<AppState>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let rx = app_state.subscribe_cursor();

    // Convert broadcast receiver to a stream
    let stream = BroadcastStream::new(rx).filter_map(|result| match result {
        Ok(state) => Some(Ok(cursor_to_event(&state))),
        Err(_) => None, // Skip lagged messages
    });

    Sse::new(stream).keep_alive(
        KeepAlive::new()
            .interval(Duration::from_secs(15))
            .text("keep-alive"),
    )
}

/// Convert cursor state to an SSE event
fn cursor_to_event(state: &CursorState) -> Event {
    let data = serde_json::json!({
        "x": state.x(),
        "y": state.y(),
        "pressed": state.is_pressed(),
        "hand_visible": state.hand_visible(),
    });

    Event::default().event("cursor").data(data.to_string())
}

/// Create an SSE stream of raw gesture events.
///
/// Integrating applications consume this to drive their own cursor or
/// click dispatch; the overlay page only needs the cursor stream.
pub fn create_event_stream(
    app_state: Arc<AppState>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let rx = app_state.subscribe_events();

    let stream = BroadcastStream::new(rx).filter_map(|result| match result {
        Ok(event) => {
            let data = serde_json::to_string(&event).ok()?;
            Some(Ok(Event::default().event("gesture").data(data)))
        }
        Err(_) => None,
    });

    Sse::new(stream).keep_alive(
        KeepAlive::new()
            .interval(Duration::from_secs(15))
            .text("keep-alive"),
    )
}
