//! Error types for fundledger core.

use thiserror::Error;

/// Errors raised while converting a record to or from its wire form.
#[derive(Debug, Error)]
pub enum CodecError {
    #[error("encoding error: {0}")]
    Encode(#[source] serde_json::Error),

    #[error("decoding error: {0}")]
    Decode(#[source] serde_json::Error),
}

/// Result type for codec operations.
pub type Result<T> = std::result::Result<T, CodecError>;
