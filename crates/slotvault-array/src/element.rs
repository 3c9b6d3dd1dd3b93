//! The per-type packing capability.
//!
//! An [`Element`] knows how many of itself fill one 32-byte slot and how to
//! pack/unpack a full slot's worth. Packing is big-endian throughout: the
//! most-significant element occupies the lowest byte offsets, and for the
//! bit element, bit `b` of a slot lives in byte `b >> 3` at bit position
//! `7 - (b & 7)`.
//!
//! `unpack` must be the exact inverse of `pack` for every representable
//! value; the engine round-trips slots through these functions on every
//! partial-slot mutation.

use slotvault_types::{Address, Word};

/// A value type that packs into 32-byte slots.
pub trait Element: Clone + PartialEq + Sized {
    /// Number of elements per slot. Must exactly fill 32 bytes
    /// (`CAPACITY * element_width == 32`, or 256 for the bit element).
    const CAPACITY: usize;

    /// The zero element, what an unwritten position reads as.
    fn zero() -> Self;

    /// Pack exactly [`CAPACITY`](Self::CAPACITY) elements into one slot.
    fn pack(items: &[Self]) -> Word;

    /// Unpack a slot into [`CAPACITY`](Self::CAPACITY) elements.
    fn unpack(word: &Word) -> Vec<Self>;
}

macro_rules! uint_element {
    ($ty:ty, $capacity:expr, $width:expr) => {
        impl Element for $ty {
            const CAPACITY: usize = $capacity;

            fn zero() -> Self {
                0
            }

            fn pack(items: &[Self]) -> Word {
                debug_assert_eq!(items.len(), Self::CAPACITY);
                let mut bytes = [0u8; 32];
                for (i, item) in items.iter().enumerate() {
                    bytes[i * $width..(i + 1) * $width].copy_from_slice(&item.to_be_bytes());
                }
                Word::new(bytes)
            }

            fn unpack(word: &Word) -> Vec<Self> {
                let bytes = word.as_bytes();
                (0..Self::CAPACITY)
                    .map(|i| {
                        let mut buf = [0u8; $width];
                        buf.copy_from_slice(&bytes[i * $width..(i + 1) * $width]);
                        <$ty>::from_be_bytes(buf)
                    })
                    .collect()
            }
        }
    };
}

uint_element!(u8, 32, 1);
uint_element!(u16, 16, 2);
uint_element!(u32, 8, 4);
uint_element!(u64, 4, 8);
uint_element!(u128, 2, 16);

impl Element for bool {
    const CAPACITY: usize = 256;

    fn zero() -> Self {
        false
    }

    fn pack(items: &[Self]) -> Word {
        debug_assert_eq!(items.len(), Self::CAPACITY);
        let mut bytes = [0u8; 32];
        for (b, &bit) in items.iter().enumerate() {
            if bit {
                bytes[b >> 3] |= 1 << (7 - (b & 7));
            }
        }
        Word::new(bytes)
    }

    fn unpack(word: &Word) -> Vec<Self> {
        let bytes = word.as_bytes();
        (0..Self::CAPACITY)
            .map(|b| bytes[b >> 3] & (1 << (7 - (b & 7))) != 0)
            .collect()
    }
}

impl Element for Word {
    const CAPACITY: usize = 1;

    fn zero() -> Self {
        Word::ZERO
    }

    fn pack(items: &[Self]) -> Word {
        debug_assert_eq!(items.len(), 1);
        items[0]
    }

    fn unpack(word: &Word) -> Vec<Self> {
        vec![*word]
    }
}

impl Element for Address {
    const CAPACITY: usize = 1;

    fn zero() -> Self {
        Address::ZERO
    }

    fn pack(items: &[Self]) -> Word {
        debug_assert_eq!(items.len(), 1);
        Word::from(items[0])
    }

    fn unpack(word: &Word) -> Vec<Self> {
        vec![Address::from(*word)]
    }
}
