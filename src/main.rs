//! Handcursor - Headless Hand-Gesture Cursor Service
//!
//! Main entry point for the CLI application.

use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{error, info, warn, Level};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use handcursor::{
    config::Config,
    output::browser::OverlayServer,
    session::{BroadcastSink, GestureSession},
    tracking::{check_mediapipe_available, HandReceiver, TrackerSubprocess},
    AppState,
};

/// Handcursor - Headless Hand-Gesture Cursor Service
#[derive(Parser, Debug)]
#[command(name = "handcursor", version, about, long_about = None)]
struct Args {
    /// Configuration file path
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Camera device index (overrides config)
    #[arg(long)]
    camera: Option<u32>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Disable HTTP overlay server
    #[arg(long)]
    no_http: bool,

    /// Do not auto-launch the tracker subprocess
    #[arg(long)]
    no_launch: bool,

    /// HTTP server port (overrides config)
    #[arg(short, long)]
    port: Option<u16>,

    /// Check whether the MediaPipe tracker is available and exit
    #[arg(long)]
    check_tracker: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Initialize logging
    let log_level = if args.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(
            EnvFilter::builder()
                .with_default_directive(log_level.into())
                .from_env_lossy(),
        )
        .init();

    info!("Starting {} v{}", handcursor::NAME, handcursor::VERSION);

    // Handle check-tracker mode
    if args.check_tracker {
        if check_mediapipe_available() {
            println!("mediapipe Python package: available");
        } else {
            println!("mediapipe Python package: NOT available");
        }
        return Ok(());
    }

    let state = setup_and_spawn_services(&args).await?;

    // Wait for Ctrl+C / SIGTERM
    shutdown_signal().await;
    info!("Shutdown signal received");
    state.shutdown();

    // Give tasks a moment to clean up
    tokio::time::sleep(tokio::time::Duration::from_millis(500)).await;

    info!("Handcursor stopped");
    Ok(())
}

/// Setup config, create AppState, and spawn all background services.
async fn setup_and_spawn_services(args: &Args) -> anyhow::Result<Arc<AppState>> {
    // Load configuration
    let mut config = if let Some(ref path) = args.config {
        Config::from_file(path)?
    } else {
        Config::load()?
    };

    // Apply CLI overrides
    if let Some(camera) = args.camera {
        config.tracker.camera_device = camera;
    }
    if args.no_http {
        config.http.enabled = false;
    }
    if args.no_launch {
        config.tracker.auto_launch = false;
    }
    if let Some(port) = args.port {
        config.http.port = port;
    }

    // Validate configuration
    config.validate()?;

    info!("Camera device: {}", config.tracker.camera_device);
    info!("Pinch distance: {}", config.gesture.pinch_distance);
    info!(
        "Target space: {}x{}",
        config.gesture.target_width, config.gesture.target_height
    );
    info!("HTTP server: {}", config.http.enabled);

    // Create shared application state
    let state = AppState::new(config.clone());

    // Start hand tracking
    if config.tracker.enabled {
        let tracking_state = Arc::clone(&state);
        tokio::spawn(async move {
            if let Err(e) = run_tracking(tracking_state).await {
                error!("Hand tracking error: {}", e);
            }
        });
    } else {
        info!("Hand tracking disabled");
    }

    // Start HTTP server if enabled
    if config.http.enabled {
        let http_state = Arc::clone(&state);
        tokio::spawn(async move {
            if let Err(e) = run_http_server(http_state).await {
                error!("HTTP server error: {}", e);
            }
        });
    }

    Ok(state)
}

async fn run_tracking(state: Arc<AppState>) -> anyhow::Result<()> {
    let config = state.config.read().await;
    let tracker_config = config.tracker.clone();
    let gesture_config = config.gesture.clone();
    drop(config);

    let mut shutdown_rx = state.subscribe_shutdown();

    // Optionally launch the subprocess
    let mut subprocess = if tracker_config.auto_launch {
        if !check_mediapipe_available() {
            warn!("mediapipe Python package not found; the tracker may fail to start");
        }
        let mut sp = TrackerSubprocess::new(&tracker_config);
        if let Err(e) = sp.start() {
            error!("Failed to auto-launch hand tracker: {}", e);
            // Continue anyway, the user may have it running externally
        }
        // Give the tracker a moment to start sending
        tokio::time::sleep(tokio::time::Duration::from_secs(2)).await;
        Some(sp)
    } else {
        None
    };

    // Start the receiver; without the collaborator boundary the session
    // cannot proceed, so bind failures surface to the spawner.
    let mut receiver = HandReceiver::new(&tracker_config);
    receiver.start()?;

    // The gesture session validates its configuration before the first frame
    let mut session = GestureSession::new(&gesture_config);
    session.add_sink(Box::new(BroadcastSink::new(state.event_tx.clone())));
    session.start()?;

    info!(
        "Hand tracking started (port: {}, max_hands: {})",
        tracker_config.port, tracker_config.max_hands
    );

    loop {
        tokio::select! {
            _ = tokio::time::sleep(tokio::time::Duration::from_millis(5)) => {
                match receiver.poll() {
                    Ok(Some(packet)) => {
                        state.set_tracker_connected(true);

                        session.on_frame(&packet.to_detection());

                        let current = state.get_cursor().await;
                        let pointer = session.pointer();
                        let new_state = current
                            .clone()
                            .with_position(pointer.x, pointer.y)
                            .with_pressed(session.click_indicator())
                            .with_hand_visible(session.hand_visible());
                        if new_state != current {
                            state.update_cursor(new_state).await;
                        }
                    }
                    Ok(None) => {
                        // No fresh frame; the click indication may still
                        // need to revert once its hold window elapses.
                        let current = state.get_cursor().await;
                        let new_state = current.clone().with_pressed(session.click_indicator());
                        if new_state != current {
                            state.update_cursor(new_state).await;
                        }
                    }
                    Err(e) => {
                        // Bad frame from the collaborator: log and skip,
                        // session state persists unchanged.
                        error!("Hand tracker receive error: {}", e);
                        tokio::time::sleep(tokio::time::Duration::from_millis(100)).await;
                    }
                }

                // Check subprocess health and auto-restart if needed
                if let Some(ref mut sp) = subprocess {
                    if !sp.is_running() && tracker_config.auto_restart {
                        state.set_tracker_connected(false);
                        info!(
                            "Hand tracker subprocess crashed, restarting in {}s",
                            tracker_config.restart_delay_secs
                        );
                        tokio::time::sleep(tokio::time::Duration::from_secs(
                            tracker_config.restart_delay_secs,
                        ))
                        .await;
                        if let Err(e) = sp.start() {
                            error!("Failed to restart hand tracker: {}", e);
                        }
                    }
                }
            }
            _ = shutdown_rx.recv() => {
                info!("Hand tracking shutting down");
                break;
            }
        }
    }

    // Cleanup
    session.stop();
    receiver.stop();
    state.set_tracker_connected(false);
    if let Some(ref mut sp) = subprocess {
        sp.stop().await;
    }

    Ok(())
}

async fn run_http_server(state: Arc<AppState>) -> anyhow::Result<()> {
    let config = state.config.read().await;
    let http_config = config.http.clone();
    drop(config);

    let overlay_server = OverlayServer::new(Arc::clone(&state));
    let app = overlay_server.router();

    let addr = format!("{}:{}", http_config.host, http_config.port);
    info!("HTTP server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;

    let mut shutdown_rx = state.subscribe_shutdown();

    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            let _ = shutdown_rx.recv().await;
        })
        .await?;

    info!("HTTP server stopped");
    Ok(())
}

async fn shutdown_signal() {
    use tokio::signal;

    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {}
        _ = terminate => {}
    }
}
