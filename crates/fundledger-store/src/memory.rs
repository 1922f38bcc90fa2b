//! In-memory implementation of the Ledger trait.
//!
//! This is primarily for testing. It has the same semantics as SQLite
//! but keeps everything in memory with no persistence.

use std::collections::BTreeMap;
use std::ops::Bound;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;
use bytes::Bytes;

use crate::error::{LedgerError, Result};
use crate::iter::{IteratorTracker, SnapshotIterator};
use crate::traits::{in_range, KeyValue, Ledger, StateIterator};

/// In-memory ledger implementation.
///
/// All data is lost when the ledger is dropped. Thread-safe via RwLock.
/// Keys are held in a `BTreeMap`, whose `String` ordering is the same
/// byte-lexicographic order SQLite uses.
pub struct MemoryLedger {
    state: RwLock<BTreeMap<String, Bytes>>,
    iterators: IteratorTracker,
}

impl MemoryLedger {
    /// Create a new empty in-memory ledger.
    pub fn new() -> Self {
        Self {
            state: RwLock::new(BTreeMap::new()),
            iterators: IteratorTracker::default(),
        }
    }

    /// Number of range iterators opened and not yet closed.
    pub fn open_iterators(&self) -> usize {
        self.iterators.open_count()
    }

    /// Number of keys currently stored.
    pub fn len(&self) -> Result<usize> {
        Ok(self.read()?.len())
    }

    /// Whether the ledger holds no keys.
    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.read()?.is_empty())
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, BTreeMap<String, Bytes>>> {
        self.state
            .read()
            .map_err(|e| LedgerError::Unavailable(format!("lock poisoned: {}", e)))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, BTreeMap<String, Bytes>>> {
        self.state
            .write()
            .map_err(|e| LedgerError::Unavailable(format!("lock poisoned: {}", e)))
    }
}

impl Default for MemoryLedger {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Ledger for MemoryLedger {
    async fn get_state(&self, key: &str) -> Result<Option<Bytes>> {
        Ok(self.read()?.get(key).cloned())
    }

    async fn put_state(&self, key: &str, value: Bytes) -> Result<()> {
        if key.is_empty() {
            return Err(LedgerError::InvalidKey("key must not be empty".into()));
        }
        self.write()?.insert(key.to_string(), value);
        Ok(())
    }

    async fn del_state(&self, key: &str) -> Result<()> {
        self.write()?.remove(key);
        Ok(())
    }

    async fn get_state_by_range(
        &self,
        start_key: &str,
        end_key: &str,
    ) -> Result<Box<dyn StateIterator>> {
        let state = self.read()?;

        // Walk from start_key and stop at the first key past end_key.
        let entries: Vec<KeyValue> = state
            .range::<str, _>((Bound::Included(start_key), Bound::Unbounded))
            .take_while(|(key, _)| in_range(key, start_key, end_key))
            .map(|(key, value)| KeyValue {
                key: key.clone(),
                value: value.clone(),
            })
            .collect();

        tracing::debug!(start_key, end_key, count = entries.len(), "opened range scan");
        Ok(Box::new(SnapshotIterator::new(entries, &self.iterators)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn value(s: &str) -> Bytes {
        Bytes::copy_from_slice(s.as_bytes())
    }

    fn collect(mut iter: Box<dyn StateIterator>) -> Vec<String> {
        let mut keys = Vec::new();
        while iter.has_next() {
            keys.push(iter.next().unwrap().key);
        }
        iter.close().unwrap();
        keys
    }

    #[tokio::test]
    async fn test_memory_ledger_basic() {
        let ledger = MemoryLedger::new();

        assert_eq!(ledger.get_state("k").await.unwrap(), None);

        ledger.put_state("k", value("v1")).await.unwrap();
        assert_eq!(ledger.get_state("k").await.unwrap(), Some(value("v1")));

        ledger.put_state("k", value("v2")).await.unwrap();
        assert_eq!(ledger.get_state("k").await.unwrap(), Some(value("v2")));
        assert_eq!(ledger.len().unwrap(), 1);

        ledger.del_state("k").await.unwrap();
        assert_eq!(ledger.get_state("k").await.unwrap(), None);
        assert!(ledger.is_empty().unwrap());
    }

    #[tokio::test]
    async fn test_delete_absent_is_noop() {
        let ledger = MemoryLedger::new();
        ledger.del_state("missing").await.unwrap();
        ledger.del_state("missing").await.unwrap();
    }

    #[tokio::test]
    async fn test_empty_key_rejected() {
        let ledger = MemoryLedger::new();
        let err = ledger.put_state("", value("v")).await.unwrap_err();
        assert!(matches!(err, LedgerError::InvalidKey(_)));
    }

    #[tokio::test]
    async fn test_range_scan_order_and_bounds() {
        let ledger = MemoryLedger::new();
        for key in ["b", "a", "d", "c"] {
            ledger.put_state(key, value(key)).await.unwrap();
        }

        let all = ledger.get_state_by_range("", "").await.unwrap();
        assert_eq!(collect(all), vec!["a", "b", "c", "d"]);

        let middle = ledger.get_state_by_range("b", "d").await.unwrap();
        assert_eq!(collect(middle), vec!["b", "c"]);

        let tail = ledger.get_state_by_range("c", "").await.unwrap();
        assert_eq!(collect(tail), vec!["c", "d"]);

        assert_eq!(ledger.open_iterators(), 0);
    }

    #[tokio::test]
    async fn test_range_scan_is_snapshot() {
        let ledger = MemoryLedger::new();
        ledger.put_state("a", value("1")).await.unwrap();

        let iter = ledger.get_state_by_range("", "").await.unwrap();
        ledger.put_state("b", value("2")).await.unwrap();
        ledger.del_state("a").await.unwrap();

        assert_eq!(collect(iter), vec!["a"]);
    }

    #[tokio::test]
    async fn test_open_iterators_tracked() {
        let ledger = MemoryLedger::new();
        let first = ledger.get_state_by_range("", "").await.unwrap();
        let second = ledger.get_state_by_range("", "").await.unwrap();
        assert_eq!(ledger.open_iterators(), 2);

        drop(first);
        assert_eq!(ledger.open_iterators(), 1);
        collect(second);
        assert_eq!(ledger.open_iterators(), 0);
    }
}
