//! The slot-packing storage engine.
//!
//! A [`PackedArray`] maps an ordered, appendable sequence of typed elements
//! onto 32-byte physical slots, packing as many elements per slot as fit.
//! Mutations go to an in-memory write-back cache and reach the word store
//! only on an explicit [`save`](PackedArray::save); logical indices rotate
//! through a persisted start offset so [`shift`](PackedArray::shift) is an
//! O(1) ring-buffer dequeue rather than a data move.
//!
//! # Key Types
//!
//! - [`Element`] — The per-type packing capability: capacity per slot plus
//!   pack/unpack, implemented for `u8`..`u128`, `bool`, [`Word`], [`Address`]
//! - [`ArrayHeader`] — Persisted length + start index, one word at the base
//! - [`PackedArray`] — The engine itself
//! - Typed aliases: [`U8Array`], [`U16Array`], [`U32Array`], [`U64Array`],
//!   [`U128Array`], [`BitArray`], [`WordArray`], [`AddressArray`]
//!
//! [`Word`]: slotvault_types::Word
//! [`Address`]: slotvault_types::Address

pub mod array;
pub mod element;
pub mod error;
pub mod header;

pub use array::PackedArray;
pub use element::Element;
pub use error::{ArrayError, ArrayResult};
pub use header::ArrayHeader;

use slotvault_types::{Address, Word};

/// One bit per element, 256 elements per slot.
pub type BitArray = PackedArray<bool>;
/// One byte per element, 32 elements per slot.
pub type U8Array = PackedArray<u8>;
/// Two bytes per element, 16 elements per slot.
pub type U16Array = PackedArray<u16>;
/// Four bytes per element, 8 elements per slot.
pub type U32Array = PackedArray<u32>;
/// Eight bytes per element, 4 elements per slot.
pub type U64Array = PackedArray<u64>;
/// Sixteen bytes per element, 2 elements per slot.
pub type U128Array = PackedArray<u128>;
/// One full word per element, stored verbatim.
pub type WordArray = PackedArray<Word>;
/// One 32-byte address per element, stored verbatim.
pub type AddressArray = PackedArray<Address>;
