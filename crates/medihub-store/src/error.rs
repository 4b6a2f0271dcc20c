//! Store error types.

use std::path::PathBuf;

use medihub_commerce::CommerceError;
use thiserror::Error;

/// Errors that can occur in the key-value backend.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Failed to serialize or deserialize a value.
    #[error("Serialization error: {0}")]
    SerializeError(#[from] serde_json::Error),

    /// Failed to read or write a snapshot file.
    #[error("Snapshot I/O error at {path}: {source}")]
    Snapshot {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Could not find a free ID for a new record.
    #[error("No free ID for new {0}")]
    IdExhausted(&'static str),
}

impl From<StoreError> for CommerceError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::SerializeError(e) => CommerceError::Serialization(e.to_string()),
            other => CommerceError::Storage(other.to_string()),
        }
    }
}
