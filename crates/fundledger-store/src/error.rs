//! Error types for the ledger module.

use thiserror::Error;

/// Errors that can occur during ledger operations.
#[derive(Debug, Error)]
pub enum LedgerError {
    /// Database error from SQLite.
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// Key rejected by the ledger.
    #[error("invalid key: {0}")]
    InvalidKey(String),

    /// `next()` called on an iterator with no remaining entries.
    #[error("range iterator exhausted")]
    IteratorExhausted,

    /// `next()` called on an iterator that was already closed.
    #[error("range iterator closed")]
    IteratorClosed,

    /// The backend cannot serve the request.
    #[error("ledger unavailable: {0}")]
    Unavailable(String),

    /// A blocking task failed to complete.
    #[error("blocking task failed: {0}")]
    Task(String),

    /// Migration error.
    #[error("migration error: {0}")]
    Migration(String),
}

/// Result type for ledger operations.
pub type Result<T> = std::result::Result<T, LedgerError>;
