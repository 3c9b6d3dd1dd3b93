use std::sync::atomic::{AtomicU64, Ordering};

use slotvault_types::{Address, Word};

use crate::error::StoreResult;
use crate::traits::WordStore;

/// Word store wrapper that counts reads and writes.
///
/// Wraps any [`WordStore`] and tallies how many raw operations pass through.
/// The engine promises that idempotent mutations never inflate the write set
/// and that `save()` flushes each dirty slot exactly once; this wrapper is
/// how tests (and embedders) observe those promises.
pub struct CountingStore<S: WordStore> {
    inner: S,
    reads: AtomicU64,
    writes: AtomicU64,
}

impl<S: WordStore> CountingStore<S> {
    /// Wrap a store, starting both counters at zero.
    pub fn new(inner: S) -> Self {
        Self {
            inner,
            reads: AtomicU64::new(0),
            writes: AtomicU64::new(0),
        }
    }

    /// Number of reads issued since construction (or the last reset).
    pub fn reads(&self) -> u64 {
        self.reads.load(Ordering::Relaxed)
    }

    /// Number of writes issued since construction (or the last reset).
    pub fn writes(&self) -> u64 {
        self.writes.load(Ordering::Relaxed)
    }

    /// Reset both counters to zero.
    pub fn reset_counts(&self) {
        self.reads.store(0, Ordering::Relaxed);
        self.writes.store(0, Ordering::Relaxed);
    }

    /// Access the wrapped store.
    pub fn inner(&self) -> &S {
        &self.inner
    }
}

impl<S: WordStore> WordStore for CountingStore<S> {
    fn read(&self, address: &Address) -> StoreResult<Word> {
        self.reads.fetch_add(1, Ordering::Relaxed);
        self.inner.read(address)
    }

    fn write(&self, address: &Address, word: Word) -> StoreResult<()> {
        self.writes.fetch_add(1, Ordering::Relaxed);
        self.inner.write(address, word)
    }
}

impl<S: WordStore> std::fmt::Debug for CountingStore<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CountingStore")
            .field("reads", &self.reads())
            .field("writes", &self.writes())
            .finish()
    }
}
