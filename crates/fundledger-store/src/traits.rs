//! Ledger trait: the abstract interface to the external key-value store.
//!
//! The record adapter only needs four operations from the ledger: point
//! get, put, delete, and an ordered range scan. Implementations include
//! SQLite (persistent) and in-memory (for tests).

use async_trait::async_trait;
use bytes::Bytes;

use crate::error::Result;

/// One entry yielded by a range scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyValue {
    pub key: String,
    pub value: Bytes,
}

/// The Ledger trait: async interface to an ordered key-value store.
///
/// # Design Notes
///
/// - **Ordering**: keys compare byte-lexicographically; range scans yield
///   entries in that order.
/// - **Absent keys**: `get_state` returns `None`; `del_state` on an absent
///   key is a no-op.
/// - **Range bounds**: `start_key` is inclusive, `end_key` exclusive. An
///   empty string leaves that side of the range open, so `("", "")` scans
///   the whole ledger.
/// - **Atomicity**: each call is atomic on its own. Grouping calls into a
///   transaction is the ledger's business, not the caller's.
#[async_trait]
pub trait Ledger: Send + Sync {
    /// Fetch the value stored under `key`.
    async fn get_state(&self, key: &str) -> Result<Option<Bytes>>;

    /// Store `value` under `key`, replacing any previous value.
    async fn put_state(&self, key: &str, value: Bytes) -> Result<()>;

    /// Remove `key`.
    async fn del_state(&self, key: &str) -> Result<()>;

    /// Open a scan over `[start_key, end_key)`.
    ///
    /// The iterator sees a snapshot of the ledger taken when the scan opens
    /// and must be closed once the caller is done with it.
    async fn get_state_by_range(
        &self,
        start_key: &str,
        end_key: &str,
    ) -> Result<Box<dyn StateIterator>>;
}

/// Forward-only cursor over the entries of a range scan.
pub trait StateIterator: Send {
    /// Whether another entry is available.
    fn has_next(&self) -> bool;

    /// Take the next entry.
    fn next(&mut self) -> Result<KeyValue>;

    /// Release the cursor. Calling `close` more than once is allowed.
    fn close(&mut self) -> Result<()>;
}

/// Owns a [`StateIterator`] and closes it when dropped.
///
/// Callers that want to observe the close result call [`ScanGuard::finish`];
/// early returns fall through to `Drop`, which closes and logs failures.
pub struct ScanGuard {
    iter: Box<dyn StateIterator>,
    closed: bool,
}

impl ScanGuard {
    /// Take ownership of an open iterator.
    pub fn new(iter: Box<dyn StateIterator>) -> Self {
        Self {
            iter,
            closed: false,
        }
    }

    /// Access the iterator.
    pub fn iter(&mut self) -> &mut dyn StateIterator {
        self.iter.as_mut()
    }

    /// Close the iterator and report the result.
    pub fn finish(mut self) -> Result<()> {
        self.closed = true;
        self.iter.close()
    }
}

impl Drop for ScanGuard {
    fn drop(&mut self) {
        if !self.closed {
            if let Err(e) = self.iter.close() {
                tracing::warn!("failed to close range iterator: {}", e);
            }
        }
    }
}

/// Range bounds covering exactly the keys that start with `prefix`.
///
/// The end bound is the smallest string greater than every key with the
/// prefix. When no such string exists (empty prefix, or a prefix made only
/// of `char::MAX`) the end is left open.
pub fn prefix_range(prefix: &str) -> (String, String) {
    let mut end: Vec<char> = prefix.chars().collect();
    while let Some(last) = end.pop() {
        if let Some(next) = next_char(last) {
            end.push(next);
            return (prefix.to_string(), end.into_iter().collect());
        }
    }
    (prefix.to_string(), String::new())
}

/// The next Unicode scalar value, skipping the surrogate gap.
fn next_char(c: char) -> Option<char> {
    match c {
        '\u{D7FF}' => Some('\u{E000}'),
        char::MAX => None,
        _ => char::from_u32(c as u32 + 1),
    }
}

/// Whether `key` falls inside `[start_key, end_key)` with open empty bounds.
pub fn in_range(key: &str, start_key: &str, end_key: &str) -> bool {
    key >= start_key && (end_key.is_empty() || key < end_key)
}
