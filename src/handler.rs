//! HTTP request handlers for the URL shortener API
//!
//! Thin adapters over [`ShortenerService`](crate::service::ShortenerService):
//! they extract the request, call the service and shape the response.
//! Error-to-status mapping lives in [`crate::error`].

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};

use crate::error::{AppError, Result};
use crate::model::{CreateLinkRequest, CreateLinkResponse};
use crate::state::AppState;

/// Creates a new short link
///
/// # Request Body
///
/// ```json
/// { "url": "https://example.com/very/long/url" }
/// ```
///
/// # Response
///
/// - **200 OK** - `{ "shortcode": "1", "shortUrl": "http://localhost:8080/1" }`
/// - **400 Bad Request** - body is not valid JSON, or the URL fails validation
///   (plain-text reason)
/// - **500 Internal Server Error** - the store could not persist the link
pub async fn create_link(
    State(state): State<AppState>,
    payload: std::result::Result<Json<CreateLinkRequest>, JsonRejection>,
) -> Result<Json<CreateLinkResponse>> {
    let Json(payload) = payload.map_err(|rejection| {
        tracing::debug!(error = %rejection, "rejected create body");
        AppError::BadRequest("invalid json body".to_string())
    })?;

    let created = state.service.create_link(&payload.url).await?;

    Ok(Json(CreateLinkResponse {
        shortcode: created.shortcode,
        short_url: created.short_url,
    }))
}

/// Redirects a shortcode to its long URL
///
/// # Response
///
/// - **302 Found** - `Location` set to the stored long URL
/// - **404 Not Found** - unknown shortcode, or one that is not base-62
pub async fn redirect(
    Path(shortcode): Path<String>,
    State(state): State<AppState>,
) -> Result<Response> {
    let long_url = state.service.resolve(&shortcode).await?;
    Ok((StatusCode::FOUND, [(header::LOCATION, long_url)]).into_response())
}

/// Liveness probe, no dependency checks
pub async fn healthz() -> &'static str {
    "ok"
}
