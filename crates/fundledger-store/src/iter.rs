//! Snapshot range iterator shared by the reference ledgers.
//!
//! Both ledgers materialize the scanned range when the scan opens, so the
//! iterator is finite, unaffected by later writes, and holds no lock while
//! the caller walks it.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use crate::error::{LedgerError, Result};
use crate::traits::{KeyValue, StateIterator};

/// Counts range iterators that have been opened but not yet released.
#[derive(Debug, Clone, Default)]
pub struct IteratorTracker {
    open: Arc<AtomicUsize>,
}

impl IteratorTracker {
    /// Number of iterators currently open.
    pub fn open_count(&self) -> usize {
        self.open.load(Ordering::SeqCst)
    }

    fn acquire(&self) {
        self.open.fetch_add(1, Ordering::SeqCst);
    }

    fn release(&self) {
        self.open.fetch_sub(1, Ordering::SeqCst);
    }
}

/// Iterator over a materialized range of entries.
pub struct SnapshotIterator {
    entries: VecDeque<KeyValue>,
    tracker: IteratorTracker,
    closed: bool,
}

impl SnapshotIterator {
    /// Wrap `entries`, which must already be in key order.
    pub fn new(entries: Vec<KeyValue>, tracker: &IteratorTracker) -> Self {
        tracker.acquire();
        Self {
            entries: entries.into(),
            tracker: tracker.clone(),
            closed: false,
        }
    }
}

impl StateIterator for SnapshotIterator {
    fn has_next(&self) -> bool {
        !self.closed && !self.entries.is_empty()
    }

    fn next(&mut self) -> Result<KeyValue> {
        if self.closed {
            return Err(LedgerError::IteratorClosed);
        }
        self.entries
            .pop_front()
            .ok_or(LedgerError::IteratorExhausted)
    }

    fn close(&mut self) -> Result<()> {
        if !self.closed {
            self.closed = true;
            self.entries.clear();
            self.tracker.release();
        }
        Ok(())
    }
}

impl Drop for SnapshotIterator {
    fn drop(&mut self) {
        let _ = self.close();
    }
}
