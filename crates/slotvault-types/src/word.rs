use std::fmt;

use serde::{Deserialize, Serialize};

use crate::arith::be_add;
use crate::error::TypeError;

/// An opaque 32-byte slot value, the store's unit of access.
///
/// The raw store imposes no structure on a word; all structure (packed
/// elements, headers, chunk payloads, counters) is imposed by the engine
/// crates. A word read from a never-written address is [`Word::ZERO`].
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Word([u8; 32]);

impl Word {
    /// The width of a word in bytes.
    pub const SIZE: usize = 32;

    /// The all-zero word. What an unwritten slot reads as.
    pub const ZERO: Word = Word([0u8; 32]);

    /// Wrap raw bytes as a word.
    pub const fn new(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Returns `true` if every byte is zero.
    pub fn is_zero(&self) -> bool {
        self.0 == [0u8; 32]
    }

    /// The raw 32 bytes.
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Mutable access to the raw bytes.
    pub fn as_bytes_mut(&mut self) -> &mut [u8; 32] {
        &mut self.0
    }

    // ---------------------------------------------------------------
    // Big-endian arithmetic
    // ---------------------------------------------------------------

    /// Treat the word as a 256-bit big-endian integer and add `n`,
    /// wrapping silently at 2^256.
    pub fn wrapping_add_u64(&self, n: u64) -> Word {
        Word(be_add(&self.0, n))
    }

    // ---------------------------------------------------------------
    // Fixed-width scalar codecs
    // ---------------------------------------------------------------

    /// Encode a `u64` as a word (big-endian, right-aligned).
    pub fn from_u64(value: u64) -> Word {
        let mut bytes = [0u8; 32];
        bytes[24..].copy_from_slice(&value.to_be_bytes());
        Word(bytes)
    }

    /// Decode the word as a `u64`.
    ///
    /// Fails with [`TypeError::ValueOutOfRange`] if any of the upper 24
    /// bytes is non-zero.
    pub fn to_u64(&self) -> Result<u64, TypeError> {
        if self.0[..24].iter().any(|&b| b != 0) {
            return Err(TypeError::ValueOutOfRange { width: 64 });
        }
        let mut buf = [0u8; 8];
        buf.copy_from_slice(&self.0[24..]);
        Ok(u64::from_be_bytes(buf))
    }

    /// Encode a `u128` as a word (big-endian, right-aligned).
    pub fn from_u128(value: u128) -> Word {
        let mut bytes = [0u8; 32];
        bytes[16..].copy_from_slice(&value.to_be_bytes());
        Word(bytes)
    }

    /// Decode the word as a `u128`.
    ///
    /// Fails with [`TypeError::ValueOutOfRange`] if any of the upper 16
    /// bytes is non-zero.
    pub fn to_u128(&self) -> Result<u128, TypeError> {
        if self.0[..16].iter().any(|&b| b != 0) {
            return Err(TypeError::ValueOutOfRange { width: 128 });
        }
        let mut buf = [0u8; 16];
        buf.copy_from_slice(&self.0[16..]);
        Ok(u128::from_be_bytes(buf))
    }

    /// Encode a boolean as a word: `true` is 1, `false` is the zero word.
    pub fn from_bool(value: bool) -> Word {
        Self::from_u64(value as u64)
    }

    /// Decode the word as a boolean: any non-zero word is `true`.
    pub fn to_bool(&self) -> bool {
        !self.is_zero()
    }

    // ---------------------------------------------------------------
    // Hex
    // ---------------------------------------------------------------

    /// Hex-encoded string representation.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Short hex representation (first 8 characters).
    pub fn short_hex(&self) -> String {
        hex::encode(&self.0[..4])
    }

    /// Parse from a hex string.
    pub fn from_hex(s: &str) -> Result<Self, TypeError> {
        let bytes = hex::decode(s).map_err(|e| TypeError::InvalidHex(e.to_string()))?;
        if bytes.len() != 32 {
            return Err(TypeError::InvalidLength {
                expected: 32,
                actual: bytes.len(),
            });
        }
        let mut arr = [0u8; 32];
        arr.copy_from_slice(&bytes);
        Ok(Self(arr))
    }
}

impl Default for Word {
    fn default() -> Self {
        Self::ZERO
    }
}

impl fmt::Debug for Word {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Word({})", self.short_hex())
    }
}

impl fmt::Display for Word {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl From<[u8; 32]> for Word {
    fn from(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }
}

impl From<Word> for [u8; 32] {
    fn from(word: Word) -> Self {
        word.0
    }
}
