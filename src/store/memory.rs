use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use parking_lot::RwLock;

use super::{LinkStore, Result, StoreError};
use crate::codec::LinkId;
use crate::model::LinkRecord;

#[derive(Debug)]
struct Table {
    /// Next identifier to hand out. Independent of `records.len()` so ids
    /// stay unique even if records are ever removed.
    next_id: LinkId,
    records: HashMap<LinkId, LinkRecord>,
}

/// Volatile link store
///
/// A single `RwLock` guards both the counter and the records: `insert` takes
/// it exclusively, so id assignment and the write are one step, while
/// `get_by_id` readers share it.
#[derive(Debug)]
pub struct MemoryStore {
    // `None` once closed
    table: RwLock<Option<Table>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            table: RwLock::new(Some(Table {
                next_id: 1,
                records: HashMap::new(),
            })),
        }
    }

    /// Number of stored records
    pub fn len(&self) -> usize {
        self.table.read().as_ref().map_or(0, |t| t.records.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl LinkStore for MemoryStore {
    async fn insert(&self, long_url: &str) -> Result<LinkId> {
        let mut guard = self.table.write();
        let table = guard.as_mut().ok_or(StoreError::Closed)?;

        let id = table.next_id;
        let next_id = id
            .checked_add(1)
            .ok_or_else(|| StoreError::Backend("identifier space exhausted".to_string()))?;

        table.records.insert(
            id,
            LinkRecord {
                id,
                long_url: long_url.to_string(),
                created_at: Utc::now(),
            },
        );
        table.next_id = next_id;

        Ok(id)
    }

    async fn get_by_id(&self, id: LinkId) -> Result<Option<LinkRecord>> {
        let guard = self.table.read();
        let table = guard.as_ref().ok_or(StoreError::Closed)?;
        Ok(table.records.get(&id).cloned())
    }

    async fn close(&self) {
        if self.table.write().take().is_some() {
            tracing::debug!("memory store released");
        }
    }

    fn backend_name(&self) -> &'static str {
        "memory"
    }
}
