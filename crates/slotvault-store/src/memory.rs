use std::collections::HashMap;
use std::sync::RwLock;

use slotvault_types::{Address, Word};

use crate::error::StoreResult;
use crate::traits::WordStore;

/// In-memory, HashMap-based word store.
///
/// Intended for tests and embedding. Words are held behind a `RwLock` for
/// safe concurrent access. An address absent from the map reads as the zero
/// word, matching the substrate contract.
pub struct InMemoryWordStore {
    words: RwLock<HashMap<Address, Word>>,
}

impl InMemoryWordStore {
    /// Create a new empty in-memory store.
    pub fn new() -> Self {
        Self {
            words: RwLock::new(HashMap::new()),
        }
    }

    /// Number of addresses ever written (including zero-word writes).
    pub fn len(&self) -> usize {
        self.words.read().expect("lock poisoned").len()
    }

    /// Returns `true` if no address was ever written.
    pub fn is_empty(&self) -> bool {
        self.words.read().expect("lock poisoned").is_empty()
    }

    /// Remove all written words, returning the store to its pristine state.
    pub fn clear(&self) {
        self.words.write().expect("lock poisoned").clear();
    }

    /// Return a sorted list of every address ever written.
    pub fn written_addresses(&self) -> Vec<Address> {
        let map = self.words.read().expect("lock poisoned");
        let mut addrs: Vec<Address> = map.keys().copied().collect();
        addrs.sort();
        addrs
    }
}

impl Default for InMemoryWordStore {
    fn default() -> Self {
        Self::new()
    }
}

impl WordStore for InMemoryWordStore {
    fn read(&self, address: &Address) -> StoreResult<Word> {
        let map = self.words.read().expect("lock poisoned");
        Ok(map.get(address).copied().unwrap_or(Word::ZERO))
    }

    fn write(&self, address: &Address, word: Word) -> StoreResult<()> {
        let mut map = self.words.write().expect("lock poisoned");
        map.insert(*address, word);
        Ok(())
    }
}

impl std::fmt::Debug for InMemoryWordStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let count = self.len();
        f.debug_struct("InMemoryWordStore")
            .field("word_count", &count)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // -----------------------------------------------------------------------
    // Substrate contract
    // -----------------------------------------------------------------------

    #[test]
    fn unwritten_address_reads_zero() {
        let store = InMemoryWordStore::new();
        let addr = Address::new([0x11; 32]);
        assert_eq!(store.read(&addr).unwrap(), Word::ZERO);
    }

    #[test]
    fn write_then_read() {
        let store = InMemoryWordStore::new();
        let addr = Address::new([0x22; 32]);
        let word = Word::from_u64(77);
        store.write(&addr, word).unwrap();
        assert_eq!(store.read(&addr).unwrap(), word);
    }

    #[test]
    fn write_replaces_previous_value() {
        let store = InMemoryWordStore::new();
        let addr = Address::new([0x33; 32]);
        store.write(&addr, Word::from_u64(1)).unwrap();
        store.write(&addr, Word::from_u64(2)).unwrap();
        assert_eq!(store.read(&addr).unwrap().to_u64().unwrap(), 2);
    }

    #[test]
    fn distinct_addresses_are_independent() {
        let store = InMemoryWordStore::new();
        let a = Address::new([0x01; 32]);
        let b = Address::new([0x02; 32]);
        store.write(&a, Word::from_u64(10)).unwrap();
        store.write(&b, Word::from_u64(20)).unwrap();
        assert_eq!(store.read(&a).unwrap().to_u64().unwrap(), 10);
        assert_eq!(store.read(&b).unwrap().to_u64().unwrap(), 20);
    }

    #[test]
    fn explicit_zero_write_is_recorded() {
        let store = InMemoryWordStore::new();
        let addr = Address::new([0x44; 32]);
        store.write(&addr, Word::ZERO).unwrap();
        // Indistinguishable by value from an unwritten address, but the
        // write itself is tracked.
        assert_eq!(store.len(), 1);
        assert_eq!(store.read(&addr).unwrap(), Word::ZERO);
    }

    // -----------------------------------------------------------------------
    // Utility methods
    // -----------------------------------------------------------------------

    #[test]
    fn len_and_is_empty() {
        let store = InMemoryWordStore::new();
        assert!(store.is_empty());
        store.write(&Address::new([1; 32]), Word::from_u64(1)).unwrap();
        assert!(!store.is_empty());
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn clear_removes_all() {
        let store = InMemoryWordStore::new();
        store.write(&Address::new([1; 32]), Word::from_u64(1)).unwrap();
        store.write(&Address::new([2; 32]), Word::from_u64(2)).unwrap();
        store.clear();
        assert!(store.is_empty());
        assert_eq!(store.read(&Address::new([1; 32])).unwrap(), Word::ZERO);
    }

    #[test]
    fn written_addresses_is_sorted() {
        let store = InMemoryWordStore::new();
        store.write(&Address::new([3; 32]), Word::from_u64(3)).unwrap();
        store.write(&Address::new([1; 32]), Word::from_u64(1)).unwrap();
        store.write(&Address::new([2; 32]), Word::from_u64(2)).unwrap();
        let addrs = store.written_addresses();
        assert_eq!(addrs.len(), 3);
        for w in addrs.windows(2) {
            assert!(w[0] <= w[1]);
        }
    }

    // -----------------------------------------------------------------------
    // Concurrent read safety
    // -----------------------------------------------------------------------

    #[test]
    fn concurrent_reads_are_safe() {
        use std::sync::Arc;
        use std::thread;

        let store = Arc::new(InMemoryWordStore::new());
        let addr = Address::new([0x55; 32]);
        store.write(&addr, Word::from_u64(123)).unwrap();

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let store = Arc::clone(&store);
                thread::spawn(move || {
                    let word = store.read(&addr).unwrap();
                    assert_eq!(word.to_u64().unwrap(), 123);
                })
            })
            .collect();

        for h in handles {
            h.join().expect("thread should not panic");
        }
    }

    #[test]
    fn default_creates_empty_store() {
        let store = InMemoryWordStore::default();
        assert!(store.is_empty());
    }

    #[test]
    fn debug_format() {
        let store = InMemoryWordStore::new();
        let debug = format!("{store:?}");
        assert!(debug.contains("InMemoryWordStore"));
        assert!(debug.contains("word_count"));
    }
}
