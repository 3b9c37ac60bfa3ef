//! Durable link store on the embedded redb database
//!
//! redb has no auto-increment column, so identity is generated by a sequence
//! row kept next to the links. The sequence is advanced inside the same write
//! transaction as the record insert: both commit together or neither does.

use std::path::Path;
use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use parking_lot::RwLock;
use redb::{Database, ReadableDatabase, ReadableTable, TableDefinition};

use super::{LinkStore, Result, StoreError};
use crate::codec::LinkId;
use crate::model::LinkRecord;

/// Main table for storing link records
///
/// Key: link identifier
/// Value: JSON-serialized LinkRecord
///
/// Example:
/// - Key: 125
/// - Value: '{"id":125,"long_url":"https://example.com","created_at":"..."}'
pub const TABLE_LINKS: TableDefinition<u64, &str> = TableDefinition::new("links_v1");

/// Bookkeeping table
///
/// Holds the last identifier handed out under [`LINK_SEQUENCE`].
pub const TABLE_META: TableDefinition<&str, u64> = TableDefinition::new("meta_v1");

/// Key of the identifier sequence in [`TABLE_META`]
pub const LINK_SEQUENCE: &str = "link_seq";

/// Initializes the embedded database and creates required tables
///
/// Creates or opens the database file at `db_path`, then opens both tables
/// in one write transaction so they exist before the first request.
///
/// # Example
///
/// ```no_run
/// # use urlshort::store::init_db;
/// let db = init_db("data.db").expect("Failed to initialize database");
/// ```
pub fn init_db(db_path: impl AsRef<Path>) -> std::result::Result<Database, redb::Error> {
    let db = Database::create(db_path)?;

    let write_txn = db.begin_write()?;
    {
        write_txn.open_table(TABLE_LINKS)?;
        write_txn.open_table(TABLE_META)?;
    }
    write_txn.commit()?;

    Ok(db)
}

/// Commit gate shared by a blocking operation and the caller awaiting it
///
/// Exactly one side wins: either the operation starts committing, or the
/// caller gives up waiting. A write that lost the race aborts its
/// transaction, so a timed-out insert never shows up later.
#[derive(Debug, Default)]
struct Deadline(AtomicU8);

impl Deadline {
    const PENDING: u8 = 0;
    const COMMITTING: u8 = 1;
    const EXPIRED: u8 = 2;

    /// Claims the right to commit; `false` once the caller has timed out
    fn begin_commit(&self) -> bool {
        self.0
            .compare_exchange(Self::PENDING, Self::COMMITTING, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
    }

    /// Marks the operation abandoned; `false` if it is already committing
    fn expire(&self) -> bool {
        self.0
            .compare_exchange(Self::PENDING, Self::EXPIRED, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
    }
}

/// Durable link store
///
/// redb calls are blocking, so each operation runs on tokio's blocking pool
/// and is abandoned with [`StoreError::Timeout`] once `op_timeout` elapses.
/// An abandoned insert rolls back instead of committing.
pub struct RedbStore {
    // `None` once closed
    db: RwLock<Option<Arc<Database>>>,
    op_timeout: Duration,
}

impl RedbStore {
    /// Opens (or creates) the database file and wraps it as a store
    pub fn open(db_path: impl AsRef<Path>, op_timeout: Duration) -> Result<Self> {
        let db = init_db(db_path).map_err(backend_error)?;
        Ok(Self::with_database(db, op_timeout))
    }

    fn with_database(db: Database, op_timeout: Duration) -> Self {
        Self {
            db: RwLock::new(Some(Arc::new(db))),
            op_timeout,
        }
    }

    fn handle(&self) -> Result<Arc<Database>> {
        self.db.read().clone().ok_or(StoreError::Closed)
    }

    async fn run<T, F>(&self, op: F) -> Result<T>
    where
        F: FnOnce(&Database, &Deadline) -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let db = self.handle()?;
        let deadline = Arc::new(Deadline::default());
        let op_deadline = Arc::clone(&deadline);
        let mut task = tokio::task::spawn_blocking(move || op(&db, &op_deadline));

        let joined = match tokio::time::timeout(self.op_timeout, &mut task).await {
            Ok(joined) => joined,
            Err(_) if deadline.expire() => return Err(StoreError::Timeout(self.op_timeout)),
            // Already committing: its outcome is the one the caller must see
            Err(_) => task.await,
        };

        joined.unwrap_or_else(|join_err| {
            Err(StoreError::Backend(format!("storage task failed: {join_err}")))
        })
    }
}

#[async_trait]
impl LinkStore for RedbStore {
    async fn insert(&self, long_url: &str) -> Result<LinkId> {
        let long_url = long_url.to_string();
        self.run(move |db, deadline| insert_link(db, long_url, deadline))
            .await
    }

    async fn get_by_id(&self, id: LinkId) -> Result<Option<LinkRecord>> {
        self.run(move |db, _| read_link(db, id)).await
    }

    async fn close(&self) {
        // Blocking operations still in flight keep their own handle; the
        // file is released when the last one finishes.
        if self.db.write().take().is_some() {
            tracing::info!("redb store closed");
        }
    }

    fn backend_name(&self) -> &'static str {
        "redb"
    }
}

fn insert_link(db: &Database, long_url: String, deadline: &Deadline) -> Result<LinkId> {
    let write_txn = db.begin_write().map_err(backend_error)?;
    let id = {
        let mut meta = write_txn.open_table(TABLE_META).map_err(backend_error)?;
        let last = meta
            .get(LINK_SEQUENCE)
            .map_err(backend_error)?
            .map(|guard| guard.value())
            .unwrap_or(0);
        let id = last
            .checked_add(1)
            .ok_or_else(|| StoreError::Backend("identifier space exhausted".to_string()))?;

        let record = LinkRecord {
            id,
            long_url,
            created_at: Utc::now(),
        };
        let record_json = serde_json::to_string(&record)
            .map_err(|e| StoreError::InvalidData(e.to_string()))?;

        let mut links = write_txn.open_table(TABLE_LINKS).map_err(backend_error)?;
        links
            .insert(id, record_json.as_str())
            .map_err(backend_error)?;
        meta.insert(LINK_SEQUENCE, id).map_err(backend_error)?;

        id
    };

    // Dropping an uncommitted transaction aborts it, so any early return
    // above leaves neither the record nor the bumped sequence behind.
    if !deadline.begin_commit() {
        write_txn.abort().map_err(backend_error)?;
        return Err(StoreError::Backend(
            "insert abandoned after timeout".to_string(),
        ));
    }
    write_txn.commit().map_err(backend_error)?;

    Ok(id)
}

fn read_link(db: &Database, id: LinkId) -> Result<Option<LinkRecord>> {
    let read_txn = db.begin_read().map_err(backend_error)?;
    let table = read_txn.open_table(TABLE_LINKS).map_err(backend_error)?;

    let Some(value) = table.get(id).map_err(backend_error)? else {
        return Ok(None);
    };
    let record: LinkRecord = serde_json::from_str(value.value())
        .map_err(|e| StoreError::InvalidData(format!("link {id}: {e}")))?;

    Ok(Some(record))
}

fn backend_error<E: std::fmt::Display>(err: E) -> StoreError {
    StoreError::Backend(err.to_string())
}
