//! SQLite implementation of the Ledger trait.
//!
//! This is the persistent reference ledger. It uses rusqlite with bundled
//! SQLite, wrapped in async via tokio::spawn_blocking.

use std::path::Path;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use bytes::Bytes;
use rusqlite::{params, Connection, OptionalExtension};

use crate::error::{LedgerError, Result};
use crate::iter::{IteratorTracker, SnapshotIterator};
use crate::migration::{self, now_millis};
use crate::traits::{KeyValue, Ledger, StateIterator};

/// SQLite-based ledger implementation.
///
/// Thread-safe via internal Mutex. All operations use spawn_blocking
/// to avoid blocking the async runtime.
pub struct SqliteLedger {
    /// The SQLite connection, protected by a mutex.
    conn: Arc<Mutex<Connection>>,
    iterators: IteratorTracker,
}

impl SqliteLedger {
    /// Open a SQLite database at the given path.
    ///
    /// Creates the file and runs migrations if it doesn't exist.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let mut conn = Connection::open(path)?;
        migration::migrate(&mut conn)?;
        Ok(Self::from_connection(conn))
    }

    /// Open an in-memory SQLite database.
    ///
    /// Useful for testing.
    pub fn open_memory() -> Result<Self> {
        let mut conn = Connection::open_in_memory()?;
        migration::migrate(&mut conn)?;
        Ok(Self::from_connection(conn))
    }

    fn from_connection(conn: Connection) -> Self {
        Self {
            conn: Arc::new(Mutex::new(conn)),
            iterators: IteratorTracker::default(),
        }
    }

    /// Number of range iterators opened and not yet closed.
    pub fn open_iterators(&self) -> usize {
        self.iterators.open_count()
    }

    /// Run `f` against the connection on the blocking thread pool.
    async fn with_conn<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&Connection) -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let conn = self.conn.clone();

        tokio::task::spawn_blocking(move || {
            let conn = conn.lock().map_err(|e| {
                LedgerError::Database(rusqlite::Error::SqliteFailure(
                    rusqlite::ffi::Error::new(rusqlite::ffi::SQLITE_LOCKED),
                    Some(format!("mutex poisoned: {}", e)),
                ))
            })?;
            f(&conn)
        })
        .await
        .map_err(|e| LedgerError::Task(format!("spawn_blocking failed: {}", e)))?
    }
}

#[async_trait]
impl Ledger for SqliteLedger {
    async fn get_state(&self, key: &str) -> Result<Option<Bytes>> {
        let key = key.to_string();

        self.with_conn(move |conn| {
            let value: Option<Vec<u8>> = conn
                .query_row(
                    "SELECT value FROM world_state WHERE key = ?1",
                    params![key],
                    |row| row.get(0),
                )
                .optional()?;

            Ok(value.map(Bytes::from))
        })
        .await
    }

    async fn put_state(&self, key: &str, value: Bytes) -> Result<()> {
        if key.is_empty() {
            return Err(LedgerError::InvalidKey("key must not be empty".into()));
        }
        let key = key.to_string();

        self.with_conn(move |conn| {
            conn.execute(
                "INSERT INTO world_state (key, value, updated_at) VALUES (?1, ?2, ?3)
                 ON CONFLICT(key) DO UPDATE SET
                    value = excluded.value,
                    updated_at = excluded.updated_at",
                params![key, &value[..], now_millis()],
            )?;
            Ok(())
        })
        .await
    }

    async fn del_state(&self, key: &str) -> Result<()> {
        let key = key.to_string();

        self.with_conn(move |conn| {
            conn.execute("DELETE FROM world_state WHERE key = ?1", params![key])?;
            Ok(())
        })
        .await
    }

    async fn get_state_by_range(
        &self,
        start_key: &str,
        end_key: &str,
    ) -> Result<Box<dyn StateIterator>> {
        let start = start_key.to_string();
        let end = end_key.to_string();

        let entries = self
            .with_conn(move |conn| {
                let mut stmt = conn.prepare(
                    "SELECT key, value FROM world_state
                     WHERE key >= ?1 AND (?2 = '' OR key < ?2)
                     ORDER BY key",
                )?;

                let entries = stmt
                    .query_map(params![start, end], |row| {
                        let key: String = row.get(0)?;
                        let value: Vec<u8> = row.get(1)?;
                        Ok(KeyValue {
                            key,
                            value: Bytes::from(value),
                        })
                    })?
                    .collect::<rusqlite::Result<Vec<_>>>()?;

                Ok(entries)
            })
            .await?;

        tracing::debug!(start_key, end_key, count = entries.len(), "opened range scan");
        Ok(Box::new(SnapshotIterator::new(entries, &self.iterators)))
    }
}
