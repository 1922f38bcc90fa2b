//! # Fundledger
//!
//! A mutual fund record store on top of an ordered key-value ledger.
//!
//! ## Overview
//!
//! The [`FundContract`] exposes six operations against whatever ledger the
//! caller's transaction provides:
//!
//! - **Seed**: write three sample funds
//! - **Create**: store a record under its id, overwriting any previous one
//! - **Read**: fetch one record
//! - **Update**: replace an existing record
//! - **Delete**: remove a record (absent ids are fine)
//! - **List all**: every record in ledger key order
//!
//! Consensus, ordering and durability belong to the ledger. The contract
//! only maps records to keys and bytes.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use fundledger::{FundContract, FundRecord, TxContext};
//! use fundledger::store::SqliteLedger;
//!
//! async fn example() {
//!     let ledger = SqliteLedger::open("ledger.db").unwrap();
//!     let ctx = TxContext::new("tx-1", &ledger);
//!     let contract = FundContract::default();
//!
//!     let fund = FundRecord::new("FUND9", "Tech Fund", "Dana", 1500.50, 15.0, 6);
//!     contract.create(&ctx, &fund).await.unwrap();
//!
//!     let stored = contract.read(&ctx, "FUND9").await.unwrap();
//!     assert_eq!(stored, fund);
//! }
//! ```
//!
//! Callers that address functions by name with string arguments go through
//! [`dispatch::invoke`].
//!
//! ## Re-exports
//!
//! - `fundledger::core` - Record type and wire codec
//! - `fundledger::store` - Ledger abstraction, SQLite and in-memory ledgers

pub mod context;
pub mod contract;
pub mod dispatch;
pub mod error;

// Re-export component crates
pub use fundledger_core as core;
pub use fundledger_store as store;

// Re-export main types for convenience
pub use context::TxContext;
pub use contract::{ContractConfig, FundContract};
pub use dispatch::{invoke, Function};
pub use error::{ContractError, LedgerOp, Result};

pub use fundledger_core::FundRecord;
