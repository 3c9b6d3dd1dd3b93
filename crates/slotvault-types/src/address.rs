use std::fmt;

use serde::{Deserialize, Serialize};

use crate::arith::be_add;
use crate::error::TypeError;
use crate::word::Word;

/// A 32-byte store key.
///
/// Addresses come from two places: a deterministic derivation over a
/// namespace id and sub-key (see `slotvault-store`), or big-endian offset
/// arithmetic against an existing base address (array data slots, chunk
/// chains, allocator regions).
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Address([u8; 32]);

impl Address {
    /// The all-zero address. Used as the "absent" sentinel for handles.
    pub const ZERO: Address = Address([0u8; 32]);

    /// Wrap raw bytes as an address.
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

    /// The address `n` slots past this one (256-bit big-endian addition,
    /// wrapping at 2^256).
    pub fn offset(&self, n: u64) -> Address {
        Address(be_add(&self.0, n))
    }

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

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Address({})", self.short_hex())
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl From<[u8; 32]> for Address {
    fn from(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }
}

impl From<Address> for [u8; 32] {
    fn from(addr: Address) -> Self {
        addr.0
    }
}

// An address is storable as a word (allocator counter, byte-chain handles)
// and a word holding an address converts back losslessly.

impl From<Word> for Address {
    fn from(word: Word) -> Self {
        Self(*word.as_bytes())
    }
}

impl From<Address> for Word {
    fn from(addr: Address) -> Self {
        Word::new(addr.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_is_all_zeros() {
        assert!(Address::ZERO.is_zero());
    }

    #[test]
    fn offset_zero_is_identity() {
        let addr = Address::new([0x17; 32]);
        assert_eq!(addr.offset(0), addr);
    }

    #[test]
    fn offset_adds_big_endian() {
        let addr = Address::ZERO.offset(300);
        assert_eq!(addr.as_bytes()[31], 0x2c);
        assert_eq!(addr.as_bytes()[30], 0x01);
    }

    #[test]
    fn offsets_compose() {
        let base = Address::new([0x05; 32]);
        assert_eq!(base.offset(3).offset(4), base.offset(7));
    }

    #[test]
    fn word_conversion_roundtrip() {
        let addr = Address::new([0xaa; 32]);
        let word: Word = addr.into();
        assert_eq!(Address::from(word), addr);
    }

    #[test]
    fn hex_roundtrip() {
        let addr = Address::new([0x3c; 32]);
        assert_eq!(Address::from_hex(&addr.to_hex()).unwrap(), addr);
    }

    #[test]
    fn from_hex_rejects_bad_length() {
        assert_eq!(
            Address::from_hex("ff").unwrap_err(),
            TypeError::InvalidLength {
                expected: 32,
                actual: 1
            }
        );
    }

    #[test]
    fn debug_uses_short_hex() {
        let addr = Address::new([0xab; 32]);
        assert_eq!(format!("{addr:?}"), "Address(abababab)");
    }

    #[test]
    fn serde_roundtrip() {
        let addr = Address::new([0x42; 32]);
        let json = serde_json::to_string(&addr).unwrap();
        let parsed: Address = serde_json::from_str(&json).unwrap();
        assert_eq!(addr, parsed);
    }
}
