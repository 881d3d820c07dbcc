//! Cursor overlay HTTP server
//!
//! Serves a fullscreen overlay page with a rendered cursor dot that follows
//! pointer updates over SSE and flashes while a click is indicated. Suitable
//! as an OBS browser source or a plain browser tab layered over the
//! controlled application.

use axum::{
    extract::State,
    response::{Html, IntoResponse},
    routing::get,
    Router,
};
use std::sync::Arc;

use crate::output::sse;
use crate::AppState;

/// Cursor overlay server state
pub struct OverlayServer {
    app_state: Arc<AppState>,
}

impl OverlayServer {
    /// Create a new overlay server
    pub fn new(app_state: Arc<AppState>) -> Self {
        Self { app_state }
    }

    /// Create the router for overlay endpoints
    pub fn router(self) -> Router {
        let shared_state = Arc::new(self);

        Router::new()
            .route("/cursor", get(overlay_page))
            .route("/cursor/stream", get(cursor_stream))
            .route("/cursor/events", get(event_stream))
            .route("/cursor/state", get(cursor_state))
            .route("/api/status", get(status))
            .with_state(shared_state)
    }
}

/// Overlay server state (shared)
type OverlayState = Arc<OverlayServer>;

/// Render the cursor overlay page
async fn overlay_page(State(state): State<OverlayState>) -> Html<String> {
    let current = state.app_state.get_cursor().await;

    let html = format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Handcursor Overlay</title>
    <style>
        * {{
            margin: 0;
            padding: 0;
            box-sizing: border-box;
        }}
        body {{
            background: transparent;
            overflow: hidden;
            width: 100vw;
            height: 100vh;
        }}
        #hand-cursor {{
            position: absolute;
            width: 20px;
            height: 20px;
            background-color: black;
            border: 2px solid white;
            border-radius: 50%;
            transform: translate(-50%, -50%);
            pointer-events: none;
            transition: opacity 0.2s ease-in-out;
        }}
        #hand-cursor.pressed {{
            background-color: red;
        }}
        #hand-cursor.hidden {{
            opacity: 0;
        }}
    </style>
</head>
<body>
    <div id="hand-cursor" class="{hidden}" style="left: {x}px; top: {y}px;"></div>

    <script>
        // SSE connection for real-time cursor updates
        const evtSource = new EventSource('/cursor/stream');
        const cursor = document.getElementById('hand-cursor');

        evtSource.addEventListener('cursor', function(event) {{
            const data = JSON.parse(event.data);
            cursor.style.left = data.x + 'px';
            cursor.style.top = data.y + 'px';
            cursor.classList.toggle('pressed', data.pressed);
            cursor.classList.toggle('hidden', !data.hand_visible);
        }});

        evtSource.onerror = function(err) {{
            console.error('SSE error:', err);
            // Attempt to reconnect after 5 seconds
            setTimeout(function() {{
                window.location.reload();
            }}, 5000);
        }};
    </script>
</body>
</html>"#,
        hidden = if current.hand_visible() { "" } else { "hidden" },
        x = current.x(),
        y = current.y(),
    );

    Html(html)
}

/// SSE endpoint for cursor state updates
async fn cursor_stream(State(state): State<OverlayState>) -> impl IntoResponse {
    sse::create_cursor_stream(Arc::clone(&state.app_state))
}

/// SSE endpoint for raw gesture events
async fn event_stream(State(state): State<OverlayState>) -> impl IntoResponse {
    sse::create_event_stream(Arc::clone(&state.app_state))
}

/// Get current cursor state as JSON
async fn cursor_state(State(state): State<OverlayState>) -> impl IntoResponse {
    let current = state.app_state.get_cursor().await;
    axum::Json(current)
}

/// Get service status as JSON
async fn status(State(state): State<OverlayState>) -> impl IntoResponse {
    let cursor = state.app_state.get_cursor().await;
    let tracker_connected = state.app_state.is_tracker_connected();

    axum::Json(serde_json::json!({
        "version": crate::VERSION,
        "tracker_connected": tracker_connected,
        "hand_visible": cursor.hand_visible(),
        "pressed": cursor.is_pressed(),
    }))
}
