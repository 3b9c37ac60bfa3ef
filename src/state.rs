//! Application state shared across all request handlers

use crate::service::ShortenerService;

/// Handler state
///
/// Cloned into every request by Axum; the service inside only holds the
/// base URL and an `Arc` to the store, so clones are cheap.
#[derive(Clone)]
pub struct AppState {
    pub service: ShortenerService,
}

impl AppState {
    pub fn new(service: ShortenerService) -> Self {
        Self { service }
    }
}
