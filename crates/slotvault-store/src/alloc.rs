use std::sync::Arc;

use tracing::debug;

use slotvault_types::{Address, Word};

use crate::error::StoreResult;
use crate::namespace::derive_address;
use crate::traits::WordStore;

/// Monotonic region allocator over the word store's address space.
///
/// A single counter word at a reserved address holds the next free offset,
/// interpreted as a 256-bit big-endian integer. [`allocate`](Self::allocate)
/// reserves `n` contiguous slots by bumping the counter and returning the
/// old value as the region's base address. Regions handed out over the life
/// of the store are pairwise disjoint because the counter never decreases.
///
/// The counter is loaded lazily on the first allocation and cached for the
/// allocator's lifetime, so constructing an allocator that never allocates
/// costs no store reads. Unsigned overflow at 2^256 is not handled; the
/// address space makes it unreachable in practice.
pub struct AddressAllocator {
    store: Arc<dyn WordStore>,
    counter_address: Address,
    cached: Option<Word>,
}

impl AddressAllocator {
    /// Create an allocator using the well-known default counter address.
    pub fn new(store: Arc<dyn WordStore>) -> Self {
        Self::with_counter_address(store, Self::default_counter_address())
    }

    /// Create an allocator with an explicit counter address.
    ///
    /// The caller is responsible for keeping the counter address out of any
    /// region the allocator could hand out and away from derived namespaces.
    pub fn with_counter_address(store: Arc<dyn WordStore>, counter_address: Address) -> Self {
        Self {
            store,
            counter_address,
            cached: None,
        }
    }

    /// The reserved address the counter lives at by default.
    pub fn default_counter_address() -> Address {
        derive_address(0, b"slotvault.alloc.next_free")
    }

    /// Reserve `n` contiguous slots and return the base address of the
    /// reserved region.
    ///
    /// The counter is persisted immediately, so a fresh allocator over the
    /// same store continues where this one left off. `allocate(0)` returns
    /// the current counter without advancing it; the returned address
    /// aliases the next real allocation's base, so callers must only pass
    /// zero when they will never dereference the result.
    pub fn allocate(&mut self, n: u64) -> StoreResult<Address> {
        let current = match self.cached {
            Some(word) => word,
            None => {
                let word = self.store.read(&self.counter_address)?;
                self.cached = Some(word);
                word
            }
        };

        let base = Address::from(current);
        if n == 0 {
            return Ok(base);
        }

        let next = current.wrapping_add_u64(n);
        self.store.write(&self.counter_address, next)?;
        self.cached = Some(next);

        debug!(base = %base.short_hex(), slots = n, "allocated region");
        Ok(base)
    }

    /// The next free offset, without reserving anything.
    ///
    /// Loads (and caches) the counter if it has not been read yet.
    pub fn next_free(&mut self) -> StoreResult<Address> {
        self.allocate(0)
    }
}

impl std::fmt::Debug for AddressAllocator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AddressAllocator")
            .field("counter_address", &self.counter_address)
            .field("cached", &self.cached)
            .finish()
    }
}
