//! Route definitions for the URL shortener API
//!
//! This module configures all HTTP routes and maps them to their respective handlers.

use axum::routing::{get, post};
use axum::Router;

use crate::handler::{create_link, healthz, redirect};
use crate::state::AppState;

/// Creates the Axum application router
///
/// # Route Definitions
///
/// - `GET /healthz` - Liveness probe
/// - `POST /api/links` - Creates a new short link
/// - `GET /{shortcode}` - Redirects to the long URL
///
/// # Example Usage
///
/// ```no_run
/// # use std::sync::Arc;
/// # use urlshort::service::ShortenerService;
/// # use urlshort::state::AppState;
/// # use urlshort::store::MemoryStore;
/// # use urlshort::route::create_app;
/// let service = ShortenerService::new("http://localhost:8080", Arc::new(MemoryStore::new()));
/// let app = create_app(AppState::new(service));
/// // axum::serve(listener, app).await.unwrap();
/// ```
pub fn create_app(state: AppState) -> Router {
    let api_routes = Router::new().route("/links", post(create_link));

    Router::new()
        // Static path wins over the `{shortcode}` capture
        .route("/healthz", get(healthz))
        .route("/{shortcode}", get(redirect))
        .nest("/api", api_routes)
        .with_state(state)
}
