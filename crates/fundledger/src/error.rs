//! Error types for the fund contract.

use std::fmt;

use fundledger_core::CodecError;
use fundledger_store::LedgerError;
use thiserror::Error;

/// The ledger call that failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LedgerOp {
    Read,
    Write,
    Delete,
    Scan,
    Close,
}

impl fmt::Display for LedgerOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let op = match self {
            LedgerOp::Read => "read",
            LedgerOp::Write => "write",
            LedgerOp::Delete => "delete",
            LedgerOp::Scan => "scan",
            LedgerOp::Close => "close scan over",
        };
        f.write_str(op)
    }
}

/// Errors that can occur during contract operations.
#[derive(Debug, Error)]
pub enum ContractError {
    /// No record is stored under the id.
    #[error("mutual fund {id} does not exist")]
    NotFound { id: String },

    /// The ledger rejected or failed a call.
    #[error("failed to {op} {key:?}: {source}")]
    Store {
        op: LedgerOp,
        key: String,
        #[source]
        source: LedgerError,
    },

    /// Stored bytes are not a valid record.
    #[error("failed to decode mutual fund {key}: {source}")]
    Decode {
        key: String,
        #[source]
        source: CodecError,
    },

    /// The record cannot be encoded.
    #[error("failed to encode mutual fund {id}: {source}")]
    Encode {
        id: String,
        #[source]
        source: CodecError,
    },

    /// Seeding stopped at the record with this 1-based index.
    #[error("failed to add mutual fund {index}: {source}")]
    Seed {
        index: usize,
        #[source]
        source: Box<ContractError>,
    },

    /// No contract function has this name.
    #[error("unknown function: {0}")]
    UnknownFunction(String),

    /// Wrong number of arguments for a function.
    #[error("{function} expects {expected} arguments, got {got}")]
    ArgumentCount {
        function: &'static str,
        expected: usize,
        got: usize,
    },

    /// An argument could not be parsed into its parameter type.
    #[error("invalid value for {param}: {value:?}")]
    InvalidArgument { param: &'static str, value: String },

    /// A response payload could not be serialized.
    #[error("failed to encode response: {0}")]
    Payload(#[source] CodecError),
}

impl ContractError {
    /// Whether this error means the record does not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(self, ContractError::NotFound { .. })
    }
}

/// Result type for contract operations.
pub type Result<T> = std::result::Result<T, ContractError>;
