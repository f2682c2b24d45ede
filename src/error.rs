use thiserror::Error;

/// Failure of the underlying key-value medium.
///
/// Never crosses a store's public contract: stores log it and degrade to
/// defaults (on read) or in-memory-only state (on write).
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage quota exceeded writing {key} ({needed} bytes needed, {quota} allowed)")]
    QuotaExceeded {
        key: String,
        needed: usize,
        quota: usize,
    },
    #[error("storage unavailable: {0}")]
    Unavailable(String),
    #[error("storage corrupt: {0}")]
    Corrupt(String),
    #[error("storage io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("storage serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("storage lock poisoned during {0}")]
    LockPoisoned(&'static str),
}

/// Signals returned by store operations and the store registry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// `add` on a collection whose duplicate policy is `Reject`.
    #[error("duplicate key {key} in {storage_key}")]
    DuplicateKey { storage_key: String, key: String },
    /// The record (or the result of applying a patch) failed its schema.
    #[error("invalid record for {storage_key}: {reason}")]
    InvalidRecord { storage_key: String, reason: String },
    /// Collection operation on a singleton, or the other way round.
    #[error("{operation} is not supported by {storage_key}")]
    Unsupported {
        storage_key: String,
        operation: &'static str,
    },
    #[error("storage key {0} is already owned by another store")]
    KeyTaken(String),
    #[error("no store registered for {0}")]
    UnknownStore(String),
}

impl StoreError {
    pub(crate) fn invalid(storage_key: &str, reason: impl Into<String>) -> Self {
        StoreError::InvalidRecord {
            storage_key: storage_key.to_string(),
            reason: reason.into(),
        }
    }

    pub(crate) fn unsupported(storage_key: &str, operation: &'static str) -> Self {
        StoreError::Unsupported {
            storage_key: storage_key.to_string(),
            operation,
        }
    }

    /// HTTP-style status code for this error.
    pub fn status_code(&self) -> u16 {
        match self {
            StoreError::DuplicateKey { .. } => 409,
            StoreError::InvalidRecord { .. } => 422,
            StoreError::Unsupported { .. } => 405,
            StoreError::KeyTaken(_) => 409,
            StoreError::UnknownStore(_) => 404,
        }
    }
}
