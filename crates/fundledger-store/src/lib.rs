//! # Fundledger Store
//!
//! The ledger abstraction fundledger runs on: an ordered key-value store
//! with point reads, writes, deletes and range scans. Provides the
//! [`Ledger`] trait with SQLite and in-memory implementations.
//!
//! ## Key Types
//!
//! - [`Ledger`] - The async trait for all ledger operations
//! - [`StateIterator`] - Cursor returned by a range scan
//! - [`ScanGuard`] - Closes a cursor on every exit path
//! - [`SqliteLedger`] - SQLite-based persistent ledger
//! - [`MemoryLedger`] - In-memory ledger for tests
//!
//! ## Usage
//!
//! ```rust,no_run
//! use bytes::Bytes;
//! use fundledger_store::{Ledger, SqliteLedger};
//!
//! async fn example() {
//!     let ledger = SqliteLedger::open("ledger.db").unwrap();
//!
//!     ledger.put_state("FUND1", Bytes::from_static(b"{}")).await.unwrap();
//!     let value = ledger.get_state("FUND1").await.unwrap();
//!     assert!(value.is_some());
//! }
//! ```
//!
//! ## Design Notes
//!
//! - **Byte ordering**: both ledgers order keys byte-lexicographically
//! - **Snapshot scans**: a range scan sees the ledger as of the moment it opened
//! - **Idempotent deletes**: removing an absent key succeeds

pub mod error;
pub mod iter;
pub mod memory;
pub mod migration;
pub mod sqlite;
pub mod traits;

pub use error::{LedgerError, Result};
pub use iter::{IteratorTracker, SnapshotIterator};
pub use memory::MemoryLedger;
pub use sqlite::SqliteLedger;
pub use traits::{in_range, prefix_range, KeyValue, Ledger, ScanGuard, StateIterator};
