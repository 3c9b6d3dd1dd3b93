use serde::{Deserialize, Serialize};

use slotvault_types::Word;

/// Persisted array metadata, stored as one word at the array's base address.
///
/// Layout: bytes 0..8 hold `length` (big-endian u64), bytes 8..16 hold
/// `start_index` (big-endian u64), bytes 16..32 are unused and zero. Data
/// slots start at `base + 1` so the header never collides with element
/// storage.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArrayHeader {
    /// Logical element count.
    pub length: u64,
    /// Rotating logical-to-physical offset for ring-buffer indexing.
    pub start_index: u64,
}

impl ArrayHeader {
    /// Encode into the base-address word.
    pub fn to_word(&self) -> Word {
        let mut bytes = [0u8; 32];
        bytes[..8].copy_from_slice(&self.length.to_be_bytes());
        bytes[8..16].copy_from_slice(&self.start_index.to_be_bytes());
        Word::new(bytes)
    }

    /// Decode from the base-address word. The zero word decodes to the
    /// default header, so a never-written array reads as empty.
    pub fn from_word(word: &Word) -> Self {
        let bytes = word.as_bytes();
        let mut buf = [0u8; 8];
        buf.copy_from_slice(&bytes[..8]);
        let length = u64::from_be_bytes(buf);
        buf.copy_from_slice(&bytes[8..16]);
        let start_index = u64::from_be_bytes(buf);
        Self {
            length,
            start_index,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_word_decodes_to_empty_header() {
        let header = ArrayHeader::from_word(&Word::ZERO);
        assert_eq!(header, ArrayHeader::default());
        assert_eq!(header.length, 0);
        assert_eq!(header.start_index, 0);
    }

    #[test]
    fn roundtrip() {
        let header = ArrayHeader {
            length: 300,
            start_index: 17,
        };
        assert_eq!(ArrayHeader::from_word(&header.to_word()), header);
    }

    #[test]
    fn layout_is_big_endian_at_fixed_offsets() {
        let header = ArrayHeader {
            length: 1,
            start_index: 2,
        };
        let word = header.to_word();
        assert_eq!(word.as_bytes()[7], 1);
        assert_eq!(word.as_bytes()[15], 2);
        // Remaining bytes stay zero.
        assert_eq!(&word.as_bytes()[16..], &[0u8; 16]);
    }

    #[test]
    fn max_values_survive_roundtrip() {
        let header = ArrayHeader {
            length: u64::MAX,
            start_index: u64::MAX,
        };
        assert_eq!(ArrayHeader::from_word(&header.to_word()), header);
    }
}
