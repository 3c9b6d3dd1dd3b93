//! The generic packed array over the raw word store.
//!
//! All state lives in two places: a persisted header word at the array's
//! base address, and element data packed into slots at `base + 1` onward.
//! An instance keeps a read-through, write-back cache of loaded slots plus
//! a dirty set; nothing reaches the store until [`save`](PackedArray::save).
//!
//! Logical index `i` maps to physical index `p = (start_index + i) %
//! max_length`, and `p` maps to slot `p / CAPACITY`, sub-index
//! `p % CAPACITY`. Rotating `start_index` instead of moving data is what
//! makes [`shift`](PackedArray::shift) O(1).
//!
//! Validation policy: logical accessors (`get`, `set`, `delete`, bulk ops,
//! the cursor) strictly require `index < length`; the physical accessors
//! bypass the start offset and are bounded only by `max_length`.

use std::collections::{BTreeSet, HashMap};
use std::marker::PhantomData;
use std::sync::Arc;

use tracing::debug;

use slotvault_store::WordStore;
use slotvault_types::{Address, Word};

use crate::element::Element;
use crate::error::{ArrayError, ArrayResult};
use crate::header::ArrayHeader;

/// Default cap on logical length, and the modulus for ring-buffer
/// index arithmetic.
pub const DEFAULT_MAX_LENGTH: u64 = (1 << 32) - 2;

/// An ordered, indexable, appendable collection of `E` packed into
/// 32-byte slots.
///
/// The base address is caller-supplied (typically via
/// `slotvault_store::derive_address`); the array never allocates. Two live
/// instances over the same base address keep independent caches and will
/// not see each other's unsaved writes -- callers coordinate manually if
/// they need that.
pub struct PackedArray<E: Element> {
    store: Arc<dyn WordStore>,
    base: Address,
    max_length: u64,
    header: Option<ArrayHeader>,
    header_dirty: bool,
    slots: HashMap<u64, Word>,
    dirty: BTreeSet<u64>,
    cursor: u64,
    _element: PhantomData<E>,
}

impl<E: Element> PackedArray<E> {
    /// Attach to the array stored at `base` with the default length cap.
    pub fn new(store: Arc<dyn WordStore>, base: Address) -> Self {
        Self::with_max_length(store, base, DEFAULT_MAX_LENGTH)
    }

    /// Attach with an explicit length cap. The cap bounds storage growth
    /// and defines the modulus for wraparound indexing, so every instance
    /// over one base address must use the same value.
    pub fn with_max_length(store: Arc<dyn WordStore>, base: Address, max_length: u64) -> Self {
        Self {
            store,
            base,
            max_length,
            header: None,
            header_dirty: false,
            slots: HashMap::new(),
            dirty: BTreeSet::new(),
            cursor: 0,
            _element: PhantomData,
        }
    }

    /// The array's base address (where the header lives).
    pub fn base(&self) -> Address {
        self.base
    }

    /// The configured length cap.
    pub fn max_length(&self) -> u64 {
        self.max_length
    }

    /// Logical element count.
    pub fn len(&mut self) -> ArrayResult<u64> {
        Ok(self.header()?.length)
    }

    /// Returns `true` if the array holds no elements.
    pub fn is_empty(&mut self) -> ArrayResult<bool> {
        Ok(self.header()?.length == 0)
    }

    /// The current ring-buffer start offset.
    pub fn start_index(&mut self) -> ArrayResult<u64> {
        Ok(self.header()?.start_index)
    }

    // ---------------------------------------------------------------
    // Element access
    // ---------------------------------------------------------------

    /// Get the element at logical index `index`.
    pub fn get(&mut self, index: u64) -> ArrayResult<E> {
        let physical = self.to_physical(index)?;
        self.read_element(physical)
    }

    /// Set the element at logical index `index`.
    ///
    /// Writing a value equal to the current one is a no-op: the slot is
    /// not re-packed and not marked dirty, so repeated idempotent writes
    /// never inflate the write set.
    pub fn set(&mut self, index: u64, value: E) -> ArrayResult<()> {
        let physical = self.to_physical(index)?;
        self.write_element(physical, value)?;
        Ok(())
    }

    /// Get the element at physical index `index`, bypassing the start
    /// offset. For callers that manage rotation themselves.
    pub fn get_physical(&mut self, index: u64) -> ArrayResult<E> {
        self.check_physical(index)?;
        self.read_element(index)
    }

    /// Set the element at physical index `index`, bypassing the start
    /// offset. Same idempotent-write behavior as [`set`](Self::set).
    pub fn set_physical(&mut self, index: u64, value: E) -> ArrayResult<()> {
        self.check_physical(index)?;
        self.write_element(index, value)?;
        Ok(())
    }

    // ---------------------------------------------------------------
    // Queue operations
    // ---------------------------------------------------------------

    /// Append `value` at the logical tail and return the physical index it
    /// landed at (stable for the element's lifetime, useful as a handle).
    pub fn push(&mut self, value: E) -> ArrayResult<u64> {
        let header = self.header()?;
        if header.length >= self.max_length {
            return Err(ArrayError::CapacityExceeded {
                max_length: self.max_length,
            });
        }
        let physical = (header.start_index + header.length) % self.max_length;
        self.write_element(physical, value)?;
        let header = self.header_mut()?;
        header.length += 1;
        self.header_dirty = true;
        Ok(physical)
    }

    /// Remove and return the element at the logical front.
    ///
    /// An O(1) ring-buffer dequeue: the front element is zeroed, the start
    /// offset advances (mod `max_length`), and no other element moves.
    pub fn shift(&mut self) -> ArrayResult<E> {
        let header = self.header()?;
        if header.length == 0 {
            return Err(ArrayError::Empty);
        }
        let physical = header.start_index;
        let value = self.read_element(physical)?;
        self.write_element(physical, E::zero())?;
        let max_length = self.max_length;
        let header = self.header_mut()?;
        header.start_index = (header.start_index + 1) % max_length;
        header.length -= 1;
        self.header_dirty = true;
        Ok(value)
    }

    /// Remove and return the element at the logical tail.
    ///
    /// Zeroes the element and decrements the length; the start offset is
    /// untouched.
    pub fn delete_last(&mut self) -> ArrayResult<E> {
        let header = self.header()?;
        if header.length == 0 {
            return Err(ArrayError::Empty);
        }
        let physical = (header.start_index + header.length - 1) % self.max_length;
        let value = self.read_element(physical)?;
        self.write_element(physical, E::zero())?;
        let header = self.header_mut()?;
        header.length -= 1;
        self.header_dirty = true;
        Ok(value)
    }

    /// Zero the element at logical index `index` without changing the
    /// length.
    pub fn delete(&mut self, index: u64) -> ArrayResult<()> {
        self.set(index, E::zero())
    }

    /// Zero the element at physical index `index` without changing the
    /// length.
    pub fn delete_physical(&mut self, index: u64) -> ArrayResult<()> {
        self.set_physical(index, E::zero())
    }

    // ---------------------------------------------------------------
    // Bulk operations
    // ---------------------------------------------------------------

    /// Get `count` elements starting at logical index `start`.
    pub fn get_all(&mut self, start: u64, count: u64) -> ArrayResult<Vec<E>> {
        let length = self.header()?.length;
        if start.checked_add(count).map_or(true, |end| end > length) {
            return Err(ArrayError::RangeOutOfBounds {
                start,
                count,
                length,
            });
        }
        let mut values = Vec::with_capacity(count as usize);
        for i in 0..count {
            values.push(self.get(start + i)?);
        }
        Ok(values)
    }

    /// Set consecutive elements starting at logical index `start`.
    pub fn set_multiple(&mut self, start: u64, values: &[E]) -> ArrayResult<()> {
        let length = self.header()?.length;
        let count = values.len() as u64;
        if start.checked_add(count).map_or(true, |end| end > length) {
            return Err(ArrayError::RangeOutOfBounds {
                start,
                count,
                length,
            });
        }
        for (i, value) in values.iter().enumerate() {
            self.set(start + i as u64, value.clone())?;
        }
        Ok(())
    }

    // ---------------------------------------------------------------
    // Cursor iteration
    // ---------------------------------------------------------------

    /// Return the element at the read cursor and advance it, or `None`
    /// once the cursor reaches the logical length.
    pub fn next(&mut self) -> ArrayResult<Option<E>> {
        if self.cursor >= self.header()?.length {
            return Ok(None);
        }
        let value = self.get(self.cursor)?;
        self.cursor += 1;
        Ok(Some(value))
    }

    /// Reset the read cursor to logical index 0.
    pub fn rewind(&mut self) {
        self.cursor = 0;
    }

    // ---------------------------------------------------------------
    // Persistence
    // ---------------------------------------------------------------

    /// Flush every dirty slot to the store exactly once each, then the
    /// header if either field changed, then clear all dirty tracking.
    ///
    /// This is the only point at which the array writes to the store on
    /// normal mutation paths.
    pub fn save(&mut self) -> ArrayResult<()> {
        let flushed = self.dirty.len();
        for slot in std::mem::take(&mut self.dirty) {
            let word = self.slots[&slot];
            self.store.write(&self.slot_address(slot), word)?;
        }
        if self.header_dirty {
            if let Some(header) = self.header {
                self.store.write(&self.base, header.to_word())?;
            }
            self.header_dirty = false;
        }
        if flushed > 0 {
            debug!(base = %self.base.short_hex(), slots = flushed, "flushed dirty slots");
        }
        Ok(())
    }

    /// Zero every slot this instance has touched, reset the header to
    /// empty, and drop all caches. Writes go to the store immediately.
    ///
    /// Slots never loaded into this instance's cache are left as they are
    /// in the store, so this is not a guaranteed full namespace wipe;
    /// callers needing true erasure must track touched slots externally.
    pub fn delete_all(&mut self) -> ArrayResult<()> {
        for slot in std::mem::take(&mut self.slots).into_keys() {
            self.store.write(&self.slot_address(slot), Word::ZERO)?;
        }
        self.store.write(&self.base, Word::ZERO)?;
        self.dirty.clear();
        self.header = Some(ArrayHeader::default());
        self.header_dirty = false;
        self.cursor = 0;
        Ok(())
    }

    /// Zero the length and start offset and immediately [`save`](Self::save).
    ///
    /// Element data is left in place; the array merely becomes logically
    /// empty. Pending dirty slots are flushed as part of the save.
    pub fn reset(&mut self) -> ArrayResult<()> {
        self.header = Some(ArrayHeader::default());
        self.header_dirty = true;
        self.cursor = 0;
        self.save()
    }

    // ---------------------------------------------------------------
    // Internals
    // ---------------------------------------------------------------

    /// Store address of physical slot `slot`. Data starts one past the
    /// base because slot 0 of the namespace is the header.
    fn slot_address(&self, slot: u64) -> Address {
        self.base.offset(slot + 1)
    }

    /// Lazily load the header, treating a never-written base as empty.
    fn header(&mut self) -> ArrayResult<ArrayHeader> {
        if self.header.is_none() {
            let word = self.store.read(&self.base)?;
            self.header = Some(ArrayHeader::from_word(&word));
        }
        Ok(self.header.expect("header just loaded"))
    }

    fn header_mut(&mut self) -> ArrayResult<&mut ArrayHeader> {
        self.header()?;
        Ok(self.header.as_mut().expect("header just loaded"))
    }

    /// Map a logical index to its physical index, validating strictly
    /// against the logical length.
    fn to_physical(&mut self, index: u64) -> ArrayResult<u64> {
        let header = self.header()?;
        if index >= header.length {
            return Err(ArrayError::IndexOutOfRange {
                index,
                length: header.length,
            });
        }
        Ok((header.start_index + index) % self.max_length)
    }

    fn check_physical(&self, index: u64) -> ArrayResult<()> {
        if index >= self.max_length {
            return Err(ArrayError::IndexOutOfRange {
                index,
                length: self.max_length,
            });
        }
        Ok(())
    }

    /// Load a slot through the cache.
    fn load_slot(&mut self, slot: u64) -> ArrayResult<Word> {
        if let Some(word) = self.slots.get(&slot) {
            return Ok(*word);
        }
        let word = self.store.read(&self.slot_address(slot))?;
        self.slots.insert(slot, word);
        Ok(word)
    }

    fn read_element(&mut self, physical: u64) -> ArrayResult<E> {
        let capacity = E::CAPACITY as u64;
        let (slot, sub) = (physical / capacity, (physical % capacity) as usize);
        let word = self.load_slot(slot)?;
        Ok(E::unpack(&word).swap_remove(sub))
    }

    /// Write one element into its slot, marking the slot dirty only when
    /// the value actually changes.
    fn write_element(&mut self, physical: u64, value: E) -> ArrayResult<()> {
        let capacity = E::CAPACITY as u64;
        let (slot, sub) = (physical / capacity, (physical % capacity) as usize);
        let word = self.load_slot(slot)?;
        let mut items = E::unpack(&word);
        if items[sub] == value {
            return Ok(());
        }
        items[sub] = value;
        self.slots.insert(slot, E::pack(&items));
        self.dirty.insert(slot);
        Ok(())
    }
}

impl<E: Element> std::fmt::Debug for PackedArray<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PackedArray")
            .field("base", &self.base)
            .field("max_length", &self.max_length)
            .field("header", &self.header)
            .field("cached_slots", &self.slots.len())
            .field("dirty_slots", &self.dirty.len())
            .finish()
    }
}
