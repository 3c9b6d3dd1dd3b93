use thiserror::Error;

/// Errors produced by type-level parsing and scalar codecs.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeError {
    #[error("invalid hex string: {0}")]
    InvalidHex(String),

    #[error("invalid byte length: expected {expected}, got {actual}")]
    InvalidLength { expected: usize, actual: usize },

    #[error("word value does not fit in {width} bits")]
    ValueOutOfRange { width: usize },
}
