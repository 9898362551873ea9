//! # Store Errors

use thiserror::Error;

/// Result type for record store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Record store errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// A cafe with this name already exists
    #[error("A cafe named '{0}' already exists")]
    DuplicateName(String),

    /// The collection lock was poisoned by a panicking writer
    #[error("Store lock poisoned")]
    LockPoisoned,

    /// Snapshot file could not be read or written
    #[error("Storage I/O error: {0}")]
    Io(String),

    /// Snapshot file exists but does not describe a valid collection
    #[error("Corrupt snapshot: {0}")]
    Corrupt(String),
}

impl From<std::io::Error> for StoreError {
    fn from(err: std::io::Error) -> Self {
        StoreError::Io(err.to_string())
    }
}
