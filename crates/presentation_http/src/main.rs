//! WeatherDash HTTP Server
//!
//! Main entry point for the dashboard web server.

use std::{future::IntoFuture, sync::Arc, time::Duration};

use application::ports::{SessionStore, WeatherPort};
use infrastructure::{
    AppConfig, InMemorySessionStore, TelemetryConfig, WeatherAdapter, init_telemetry,
};
use presentation_http::{error::set_expose_internal_errors, routes, state::AppState};
use tokio::{net::TcpListener, signal, sync::Notify};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration before logging so the log format can be honored
    let (config, load_error) = match AppConfig::load() {
        Ok(config) => (config, None),
        Err(e) => (AppConfig::default(), Some(e)),
    };

    init_telemetry(
        &TelemetryConfig::new("info,weatherdash_server=debug,tower_http=debug")
            .with_format(config.server.log_format),
    )?;

    if let Some(e) = load_error {
        warn!("Failed to load config, using defaults: {}", e);
    }

    info!("🌦️ WeatherDash v{} starting...", env!("CARGO_PKG_VERSION"));
    info!(
        host = %config.server.host,
        port = %config.server.port,
        default_location = %config.dashboard.default_location,
        max_samples = config.dashboard.max_samples,
        "Configuration loaded"
    );

    if !config.weather.has_api_key() {
        warn!("No OpenWeatherMap API key configured, set WEATHERDASH_WEATHER__API_KEY");
    }

    set_expose_internal_errors(config.server.expose_error_details);

    // Initialize adapters
    let weather: Arc<dyn WeatherPort> = Arc::new(
        WeatherAdapter::with_config(config.weather.to_client_config())
            .map_err(|e| anyhow::anyhow!("Failed to initialize weather client: {e}"))?,
    );
    let sessions: Arc<dyn SessionStore> = Arc::new(InMemorySessionStore::with_limits(
        config.dashboard.max_sessions,
        config.dashboard.session_idle(),
    ));

    let addr = config.bind_address();
    let shutdown_timeout = config.server.shutdown_timeout();

    let state = AppState::new(weather, sessions, config)
        .map_err(|e| anyhow::anyhow!("Failed to initialize application state: {e}"))?;

    // Build router
    let app = routes::create_router(state).layer(TraceLayer::new_for_http());

    // Start server
    let listener = TcpListener::bind(&addr).await?;

    info!("🚀 Server listening on http://{}", addr);

    let signalled = Arc::new(Notify::new());
    let notify = Arc::clone(&signalled);
    let server = axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            shutdown_signal().await;
            notify.notify_one();
        })
        .into_future();

    drain_with_timeout(server, &signalled, shutdown_timeout).await?;

    info!("👋 Server shutdown complete");

    Ok(())
}

/// Run `server` to completion, giving it at most `timeout` to drain open
/// connections once `signalled` fires
async fn drain_with_timeout<F>(
    server: F,
    signalled: &Notify,
    timeout: Duration,
) -> std::io::Result<()>
where
    F: std::future::Future<Output = std::io::Result<()>>,
{
    tokio::pin!(server);

    tokio::select! {
        result = &mut server => return result,
        () = signalled.notified() => {},
    }

    info!("⏳ Waiting up to {:?} for connections to close...", timeout);
    if let Ok(result) = tokio::time::timeout(timeout, &mut server).await {
        result
    } else {
        warn!("Connections still open after {:?}, shutting down anyway", timeout);
        Ok(())
    }
}

/// Wait for shutdown signals (SIGINT, SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            },
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            },
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            info!("📥 Received Ctrl+C, initiating graceful shutdown...");
        }
        () = terminate => {
            info!("📥 Received SIGTERM, initiating graceful shutdown...");
        }
    }
}
