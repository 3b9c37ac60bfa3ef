//! Link shortening service
//!
//! Ties the pieces together:
//!
//! - creation: validate -> `LinkStore::insert` -> encode the new id -> short URL
//! - resolution: decode the shortcode -> `LinkStore::get_by_id` -> long URL
//!
//! The service keeps no state of its own besides the public base URL and a
//! handle to the store.

use std::sync::Arc;

use thiserror::Error;

use crate::codec;
use crate::store::{LinkStore, StoreError};
use crate::validator::{validate_url, ValidationError};

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("persistence failed: {0}")]
    Persistence(#[from] StoreError),

    /// Unknown or undecodable shortcode. Both cases are reported the same
    /// way so callers learn nothing about the code format.
    #[error("not found")]
    NotFound,
}

/// Result of a successful creation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatedLink {
    pub shortcode: String,
    pub short_url: String,
}

#[derive(Clone)]
pub struct ShortenerService {
    base_url: String,
    store: Arc<dyn LinkStore>,
}

impl ShortenerService {
    /// Creates a service publishing short URLs under `base_url`
    ///
    /// A trailing slash on `base_url` is dropped.
    pub fn new(base_url: impl Into<String>, store: Arc<dyn LinkStore>) -> Self {
        let mut base_url = base_url.into();
        if base_url.ends_with('/') {
            base_url.pop();
        }
        Self { base_url, store }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn backend_name(&self) -> &'static str {
        self.store.backend_name()
    }

    /// Validates and stores `raw_url`, returning its shortcode and short URL
    pub async fn create_link(&self, raw_url: &str) -> Result<CreatedLink, ServiceError> {
        let long_url = raw_url.trim();
        validate_url(long_url)?;

        let id = self.store.insert(long_url).await.map_err(|err| {
            tracing::error!(error = %err, "failed to persist url");
            err
        })?;

        let shortcode = codec::encode(id);
        let short_url = format!("{}/{}", self.base_url, shortcode);
        tracing::info!(id, %shortcode, "link created");

        Ok(CreatedLink {
            shortcode,
            short_url,
        })
    }

    /// Returns the long URL behind `shortcode`
    pub async fn resolve(&self, shortcode: &str) -> Result<String, ServiceError> {
        let id = match codec::decode(shortcode) {
            Ok(id) => id,
            Err(err) => {
                tracing::debug!(%shortcode, error = %err, "undecodable shortcode");
                return Err(ServiceError::NotFound);
            }
        };

        match self.store.get_by_id(id).await {
            Ok(Some(record)) => Ok(record.long_url),
            Ok(None) => {
                tracing::debug!(%shortcode, id, "no link for shortcode");
                Err(ServiceError::NotFound)
            }
            Err(err) => {
                tracing::error!(%shortcode, error = %err, "failed to look up link");
                Err(err.into())
            }
        }
    }

    /// Releases the store. Call once at shutdown; repeated calls are no-ops.
    pub async fn close(&self) {
        self.store.close().await;
    }
}
