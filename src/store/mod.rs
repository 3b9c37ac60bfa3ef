//! Link storage
//!
//! The service only ever talks to [`LinkStore`]. Two backends implement it:
//!
//! - [`MemoryStore`] - volatile in-process table behind a read-write lock
//! - [`RedbStore`] - durable embedded redb database
//!
//! The backend is picked once at startup by [`open`].

mod memory;
mod redb_store;

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;

use crate::codec::LinkId;
use crate::config::{Config, StoreBackend};
use crate::model::LinkRecord;

pub use self::memory::MemoryStore;
pub use self::redb_store::{init_db, RedbStore};

/// Result type for store operations
pub type Result<T> = std::result::Result<T, StoreError>;

/// Backend failures
///
/// A missing record is not an error: lookups return `Ok(None)`.
#[derive(Debug, Clone, Error)]
pub enum StoreError {
    #[error("storage backend failed: {0}")]
    Backend(String),

    #[error("storage operation timed out after {0:?}")]
    Timeout(Duration),

    #[error("store is closed")]
    Closed,

    #[error("stored data is invalid: {0}")]
    InvalidData(String),
}

/// Contract every link backend satisfies
///
/// Identifiers start at 1 and are never handed out twice by one store, even
/// under concurrent callers. A failed `insert` leaves nothing behind.
#[async_trait]
pub trait LinkStore: Send + Sync {
    /// Records `long_url` under a fresh identifier and returns it
    async fn insert(&self, long_url: &str) -> Result<LinkId>;

    /// Looks up a record; `Ok(None)` when the id was never assigned
    async fn get_by_id(&self, id: LinkId) -> Result<Option<LinkRecord>>;

    /// Releases backend resources. Safe to call more than once.
    async fn close(&self);

    /// Short backend name for logs
    fn backend_name(&self) -> &'static str;
}

/// Opens the backend selected by `config`
pub fn open(config: &Config) -> Result<Arc<dyn LinkStore>> {
    let store: Arc<dyn LinkStore> = match config.store_backend {
        StoreBackend::Memory => Arc::new(MemoryStore::new()),
        StoreBackend::Redb => Arc::new(RedbStore::open(
            &config.database_url,
            config.store_timeout,
        )?),
    };

    tracing::info!(backend = store.backend_name(), "link store opened");
    Ok(store)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn opens_memory_backend() {
        let config = Config {
            store_backend: StoreBackend::Memory,
            ..Config::default()
        };

        let store = open(&config).unwrap();
        assert_eq!(store.backend_name(), "memory");
        assert_eq!(store.insert("https://example.com").await.unwrap(), 1);
        store.close().await;
    }

    #[tokio::test]
    async fn opens_redb_backend() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config {
            store_backend: StoreBackend::Redb,
            database_url: dir.path().join("links.redb").to_string_lossy().into_owned(),
            ..Config::default()
        };

        let store = open(&config).unwrap();
        assert_eq!(store.backend_name(), "redb");
        assert_eq!(store.insert("https://example.com").await.unwrap(), 1);
        store.close().await;
    }
}
