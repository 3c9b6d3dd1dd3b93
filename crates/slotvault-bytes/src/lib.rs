//! Chunked variable-length byte storage for SlotVault.
//!
//! Fixed-width values live at deterministic namespaced addresses, but an
//! arbitrary-length payload needs a fresh, collision-free region sized at
//! encode time. This crate turns a byte buffer into a chain of consecutive
//! slots obtained from the [`AddressAllocator`] and hands back the chain's
//! base address as a single 32-byte handle -- the value the caller stores at
//! its own logical key.
//!
//! # Chain layout
//!
//! ```text
//! base + 0:  [4-byte big-endian length][up to 28 payload bytes][zero pad]
//! base + 1:  [32 raw payload bytes]
//! base + 2:  [32 raw payload bytes]
//! ...
//! ```
//!
//! Chains are allocated once and never freed: re-encoding a value orphans
//! the old chain. There is no garbage collection.
//!
//! [`AddressAllocator`]: slotvault_store::AddressAllocator

pub mod codec;
pub mod error;

pub use codec::ChunkedBytes;
pub use error::{BytesError, BytesResult};
