use slotvault_store::StoreError;

/// Errors from packed-array operations.
///
/// Every variant is fatal to the current unit of work: the engine never
/// retries or partially applies, it propagates and lets the host discard
/// the unit of work's effects.
#[derive(Debug, thiserror::Error)]
pub enum ArrayError {
    /// Index at or past the validated bound.
    #[error("index {index} out of range (length {length})")]
    IndexOutOfRange { index: u64, length: u64 },

    /// A bulk range extends past the logical length.
    #[error("range [{start}, {start}+{count}) exceeds length {length}")]
    RangeOutOfBounds { start: u64, count: u64, length: u64 },

    /// Appending would exceed the array's configured capacity.
    #[error("array is at capacity ({max_length} elements)")]
    CapacityExceeded { max_length: u64 },

    /// Shift or delete-last on a zero-length array.
    #[error("operation on empty array")]
    Empty,

    /// Failure propagated from the underlying word store.
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Result alias for array operations.
pub type ArrayResult<T> = Result<T, ArrayError>;
