//! # Fundledger Core
//!
//! Pure data types for fundledger: the mutual fund record and the JSON
//! encoding it is persisted under.
//!
//! This crate contains no I/O and no storage. It is the shape of the data
//! and the rules for turning it into bytes and back.
//!
//! ## Key Types
//!
//! - [`FundRecord`] - The only entity: one fund holding for one investor
//! - [`CodecError`] - Failure to encode or decode a record
//!
//! ## Wire Format
//!
//! Records are stored as compact JSON objects. See the [`codec`] module for
//! the exact layout.

pub mod codec;
pub mod error;
pub mod record;
pub mod seed;

pub use codec::{decode_record, encode_record, encode_records, LedgerFormatter};
pub use error::{CodecError, Result};
pub use record::FundRecord;
pub use seed::seed_records;
