//! Stretch Timer - alternating stretch and pause countdowns
//!
//! This is the main entry point for the stretch-timer application.

use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

use stretch_timer::{
    config::Config,
    state::AppState,
    api::create_router,
    tasks::{keyboard_input_task, spawn_timer_loop},
    utils::shutdown_signal,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    // Initialize tracing with appropriate log level
    tracing_subscriber::fmt()
        .with_env_filter(format!("stretch_timer={},tower_http=info", config.log_level()))
        .init();

    let settings = config.timer_settings();
    info!("Starting stretch-timer v{}", env!("CARGO_PKG_VERSION"));
    info!("Configuration: host={}, port={}, stretch={}s, pause={}s, tick={}ms",
          config.host, config.port, settings.default_stretch_secs,
          settings.default_pause_secs, settings.tick_period.as_millis());

    // Build the timer and start its loop; label setup failure aborts startup
    let timer_loop = spawn_timer_loop(settings)?;

    let state = Arc::new(AppState::new(
        config.port,
        config.host.clone(),
        settings,
        timer_loop.commands,
        timer_loop.snapshots,
    ));

    if config.keyboard {
        let keyboard_state = Arc::clone(&state);
        tokio::spawn(async move {
            keyboard_input_task(keyboard_state).await;
        });
    }

    // Create HTTP router with all endpoints
    let app = create_router(state);

    // Bind to the specified address
    let addr = config.address();
    let listener = TcpListener::bind(&addr).await?;

    info!("Server running on http://{}", addr);
    info!("Endpoints:");
    info!("  POST /toggle           - Start or stop the timer");
    info!("  POST /stretch/increase - Add {}s to the stretch interval", settings.stretch_step_secs);
    info!("  POST /stretch/reset    - Restore the default stretch interval");
    info!("  POST /pause/increase   - Add {}s to the pause interval", settings.pause_step_secs);
    info!("  POST /pause/reset      - Restore the default pause interval");
    info!("  POST /button/:button   - Press select/up/down ({{\"held_ms\":N}} or ?held_ms=N)");
    info!("  GET  /status           - Check current countdown and labels");
    info!("  GET  /health           - Health check");

    // Setup graceful shutdown
    let server = axum::serve(listener, app);

    tokio::select! {
        result = server => {
            if let Err(e) = result {
                tracing::error!("Server error: {}", e);
            }
        }
        _ = shutdown_signal() => {
            info!("Shutdown signal received");
        }
    }

    timer_loop.shutdown.cancel();
    if let Err(e) = timer_loop.task.await {
        tracing::error!("Timer loop ended abnormally: {}", e);
    }
    info!("Server shutdown complete");
    Ok(())
}
