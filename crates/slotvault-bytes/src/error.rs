use slotvault_store::StoreError;

/// Errors from chunked byte encoding and decoding.
#[derive(Debug, thiserror::Error)]
pub enum BytesError {
    /// The payload is longer than the 4-byte length prefix can express.
    #[error("payload of {len} bytes exceeds the {max}-byte encoding limit")]
    PayloadTooLarge { len: usize, max: usize },

    /// Failure propagated from the underlying word store.
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Result alias for chunked byte operations.
pub type BytesResult<T> = Result<T, BytesError>;
