use slotvault_types::Address;

/// Errors from word store operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// A lock protecting backend state was poisoned by a panicking writer.
    #[error("lock poisoned: {0}")]
    LockPoisoned(String),

    /// I/O error from a persistent storage backend.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The backend rejected the operation for a substrate-specific reason.
    #[error("backend error at {address}: {reason}")]
    Backend { address: Address, reason: String },

    /// Storage backend is read-only or otherwise unavailable.
    #[error("store is read-only")]
    ReadOnly,
}

/// Result alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
