//! Raw word storage for SlotVault.
//!
//! The substrate SlotVault builds on is deliberately primitive: write exactly
//! one 32-byte word at a 32-byte address, read the word at a 32-byte address,
//! and read all-zero for any address never written. This crate defines that
//! contract as a trait, provides backends and instrumentation, and implements
//! the two pieces of address-space management the engine needs.
//!
//! # Components
//!
//! - [`WordStore`] -- the substrate contract all backends implement
//! - [`InMemoryWordStore`] -- `HashMap`-based store for tests and embedding
//! - [`CountingStore`] -- wrapper that counts reads/writes for observability
//! - [`derive_address`] -- deterministic (namespace, sub-key) address derivation
//! - [`AddressAllocator`] -- monotonic counter handing out disjoint slot regions
//!
//! # Design Rules
//!
//! 1. Unwritten addresses read as the zero word, never as an error.
//! 2. The store never interprets word contents -- it is a pure key-value store.
//! 3. All backend failures are propagated, never silently ignored.
//! 4. The host provides the atomic commit boundary; this crate only decides
//!    which words to read and write.

pub mod alloc;
pub mod counting;
pub mod error;
pub mod memory;
pub mod namespace;
pub mod traits;

// Re-export primary types at crate root for ergonomic imports.
pub use alloc::AddressAllocator;
pub use counting::CountingStore;
pub use error::{StoreError, StoreResult};
pub use memory::InMemoryWordStore;
pub use namespace::derive_address;
pub use traits::WordStore;
