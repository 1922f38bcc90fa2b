//! # Fundledger Testkit
//!
//! Testing utilities for fundledger.
//!
//! ## Overview
//!
//! This crate provides:
//!
//! - **Golden vectors**: Records with the exact bytes they are stored as
//! - **Generators**: Proptest strategies for property-based testing
//! - **Fixtures**: A ledger and contract ready for a test scenario
//! - **Faults**: A ledger wrapper that fails selected calls
//!
//! ## Golden Vectors
//!
//! ```rust
//! use fundledger_testkit::vectors::verify_all_vectors;
//!
//! for check in verify_all_vectors() {
//!     assert!(check.passed(), "{}: {}", check.name, check.actual);
//! }
//! ```
//!
//! ## Property Testing
//!
//! ```rust,ignore
//! use proptest::prelude::*;
//! use fundledger_testkit::generators::fund_record;
//!
//! proptest! {
//!     #[test]
//!     fn encoding_roundtrips(record in fund_record()) {
//!         let bytes = fundledger_core::encode_record(&record).unwrap();
//!         prop_assert_eq!(fundledger_core::decode_record(&bytes).unwrap(), record);
//!     }
//! }
//! ```
//!
//! ## Fault Injection
//!
//! ```rust
//! use fundledger_store::MemoryLedger;
//! use fundledger_testkit::faults::FaultyLedger;
//!
//! // Second and later writes fail.
//! let ledger = FaultyLedger::new(MemoryLedger::new()).fail_put_from(2);
//! ```

pub mod faults;
pub mod fixtures;
pub mod generators;
pub mod vectors;

pub use faults::{FaultPlan, FaultyLedger};
pub use fixtures::{sample_fund, ContractFixture};
pub use generators::{fund_record, fund_records, realistic_fund_record};
pub use vectors::{all_vectors, verify_all_vectors, verify_vector, GoldenVector, VectorCheck};
