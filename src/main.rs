//! Application entry point and server initialization
//!
//! This module contains the main function that:
//! - Loads environment configuration
//! - Opens the configured link store
//! - Starts the HTTP server with graceful shutdown support
//! - Closes the store once the server has stopped

use dotenvy::dotenv;
use tokio::net::TcpListener;
use tokio::signal;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use urlshort::config::Config;
use urlshort::route::create_app;
use urlshort::service::ShortenerService;
use urlshort::state::AppState;
use urlshort::store;

/// Application entry point
///
/// See [`urlshort::config`] for the environment variables read at startup.
#[tokio::main]
async fn main() {
    // Load environment variables from .env file if it exists
    dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("urlshort=debug,tower_http=debug")),
        )
        .init();

    let config = Config::from_env().expect("Invalid configuration");

    let link_store = store::open(&config).expect("Failed to open link store");
    let service = ShortenerService::new(config.public_base_url.clone(), link_store);

    let app = create_app(AppState::new(service.clone())).layer(TraceLayer::new_for_http());

    let addr = format!("0.0.0.0:{}", config.port);
    let listener = TcpListener::bind(&addr)
        .await
        .expect("Failed to bind listener");

    tracing::info!(
        %addr,
        public_base_url = service.base_url(),
        backend = service.backend_name(),
        "server starting"
    );

    // The server will continue running until it receives SIGTERM or SIGINT
    if let Err(err) = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        tracing::error!(error = %err, "server error");
    }

    // In-flight requests have drained; release the store exactly once
    service.close().await;
    tracing::info!("shutdown complete");
}

/// Handles graceful shutdown signals
///
/// Returns when SIGINT (Ctrl+C) or, on Unix, SIGTERM is received. Open
/// connections are then allowed to complete before `main` closes the store.
async fn shutdown_signal() {
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
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("shutdown signal received, stopping server");
}
