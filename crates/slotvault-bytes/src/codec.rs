use std::sync::Arc;

use tracing::debug;

use slotvault_store::{AddressAllocator, WordStore};
use slotvault_types::{Address, Word};

use crate::error::{BytesError, BytesResult};

/// Payload bytes carried by chunk 0, after the 4-byte length prefix.
const FIRST_CHUNK_CAPACITY: usize = 28;
/// Payload bytes carried by every subsequent chunk.
const CHUNK_CAPACITY: usize = 32;
/// Width of the big-endian length prefix in chunk 0.
const LENGTH_PREFIX: usize = 4;

/// Encoder/decoder for variable-length byte payloads over the word store.
///
/// Owns the [`AddressAllocator`] it draws chain regions from. Allocator
/// instances cache the counter, so exactly one live allocator may manage a
/// store's address space; moving it into the codec enforces that for the
/// common case, and [`into_allocator`](Self::into_allocator) releases it
/// when the caller needs it back.
pub struct ChunkedBytes {
    store: Arc<dyn WordStore>,
    allocator: AddressAllocator,
}

impl ChunkedBytes {
    /// Create a codec over `store`, drawing regions from `allocator`.
    pub fn new(store: Arc<dyn WordStore>, allocator: AddressAllocator) -> Self {
        Self { store, allocator }
    }

    /// Release the owned allocator.
    pub fn into_allocator(self) -> AddressAllocator {
        self.allocator
    }

    /// Number of slots a payload of `len` bytes occupies: one first chunk
    /// plus however many 32-byte chunks the remainder needs.
    pub fn chunk_count(len: usize) -> u64 {
        let rest = len.saturating_sub(FIRST_CHUNK_CAPACITY);
        1 + rest.div_ceil(CHUNK_CAPACITY) as u64
    }

    /// Encode `payload` into a freshly allocated chain and return the
    /// chain's base address as the handle to store.
    ///
    /// Writes go to the store immediately; there is no deferred flush for
    /// chains. Each call allocates a new region, so re-encoding a value
    /// orphans the previous chain.
    pub fn encode(&mut self, payload: &[u8]) -> BytesResult<Address> {
        if payload.len() > u32::MAX as usize {
            return Err(BytesError::PayloadTooLarge {
                len: payload.len(),
                max: u32::MAX as usize,
            });
        }

        let total = Self::chunk_count(payload.len());
        let base = self.allocator.allocate(total)?;

        let first_len = payload.len().min(FIRST_CHUNK_CAPACITY);
        let mut chunk = [0u8; 32];
        chunk[..LENGTH_PREFIX].copy_from_slice(&(payload.len() as u32).to_be_bytes());
        chunk[LENGTH_PREFIX..LENGTH_PREFIX + first_len].copy_from_slice(&payload[..first_len]);
        self.store.write(&base, Word::new(chunk))?;

        let mut written = first_len;
        let mut index = 1u64;
        while written < payload.len() {
            let take = (payload.len() - written).min(CHUNK_CAPACITY);
            let mut chunk = [0u8; 32];
            chunk[..take].copy_from_slice(&payload[written..written + take]);
            self.store.write(&base.offset(index), Word::new(chunk))?;
            written += take;
            index += 1;
        }

        debug!(base = %base.short_hex(), bytes = payload.len(), chunks = total, "encoded chain");
        Ok(base)
    }

    /// Decode the chain at `handle` back into its payload.
    ///
    /// The zero handle decodes to an empty payload, and so does a chain
    /// whose first chunk reads all-zero: "never written" and "written
    /// empty" are indistinguishable, because all-zero is the substrate's
    /// sentinel for absence. A consequence: a chain allocated at offset 0
    /// of a pristine store gets the zero address as its handle and cannot
    /// be decoded, so hosts reserve the first region before encoding.
    /// Decoding only makes sense against a handle produced by
    /// [`encode`](Self::encode) over the same store -- the chain carries no
    /// checksum, and a chunk that was never written reads the same as a
    /// genuine zero chunk.
    pub fn decode(&self, handle: &Address) -> BytesResult<Vec<u8>> {
        if handle.is_zero() {
            return Ok(Vec::new());
        }

        let first = self.store.read(handle)?;
        let bytes = first.as_bytes();
        let mut len_buf = [0u8; LENGTH_PREFIX];
        len_buf.copy_from_slice(&bytes[..LENGTH_PREFIX]);
        let len = u32::from_be_bytes(len_buf) as usize;
        if len == 0 {
            return Ok(Vec::new());
        }

        let first_len = len.min(FIRST_CHUNK_CAPACITY);
        let mut payload = Vec::with_capacity(len);
        payload.extend_from_slice(&bytes[LENGTH_PREFIX..LENGTH_PREFIX + first_len]);

        let mut index = 1u64;
        while payload.len() < len {
            let chunk = self.store.read(&handle.offset(index))?;
            let take = (len - payload.len()).min(CHUNK_CAPACITY);
            payload.extend_from_slice(&chunk.as_bytes()[..take]);
            index += 1;
        }
        Ok(payload)
    }
}

impl std::fmt::Debug for ChunkedBytes {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChunkedBytes")
            .field("allocator", &self.allocator)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use slotvault_store::InMemoryWordStore;

    fn codec() -> (Arc<InMemoryWordStore>, ChunkedBytes) {
        let store = Arc::new(InMemoryWordStore::new());
        let mut allocator = AddressAllocator::new(Arc::clone(&store) as Arc<dyn WordStore>);
        // Reserve offset 0 so no chain lands at the zero address, which the
        // decoder reads as the absence sentinel.
        allocator.allocate(1).unwrap();
        let codec = ChunkedBytes::new(Arc::clone(&store) as Arc<dyn WordStore>, allocator);
        (store, codec)
    }

    // -----------------------------------------------------------------------
    // Round-trips at the chunk boundaries
    // -----------------------------------------------------------------------

    #[test]
    fn roundtrip_at_boundary_lengths() {
        // 27/28/29 straddle the first-chunk capacity; 60 straddles the
        // first subsequent chunk; 1000 spans many chunks.
        for len in [0usize, 1, 27, 28, 29, 60, 1000] {
            let (_, mut codec) = codec();
            let payload: Vec<u8> = (0..len).map(|i| (i * 7 + 3) as u8).collect();
            let handle = codec.encode(&payload).unwrap();
            assert_eq!(codec.decode(&handle).unwrap(), payload, "length {len}");
        }
    }

    #[test]
    fn hundred_byte_payload_occupies_four_slots() {
        assert_eq!(ChunkedBytes::chunk_count(100), 4);

        let (_, mut codec) = codec();
        let handle = codec.encode(&[0xaa; 100]).unwrap();
        // The allocator's next region begins exactly four slots past the
        // chain's base.
        let mut allocator = codec.into_allocator();
        assert_eq!(allocator.next_free().unwrap(), handle.offset(4));
    }

    #[test]
    fn chunk_counts_at_boundaries() {
        assert_eq!(ChunkedBytes::chunk_count(0), 1);
        assert_eq!(ChunkedBytes::chunk_count(28), 1);
        assert_eq!(ChunkedBytes::chunk_count(29), 2);
        assert_eq!(ChunkedBytes::chunk_count(60), 2);
        assert_eq!(ChunkedBytes::chunk_count(61), 3);
    }

    // -----------------------------------------------------------------------
    // Chain layout
    // -----------------------------------------------------------------------

    #[test]
    fn first_chunk_holds_length_prefix_and_28_bytes() {
        let (store, mut codec) = codec();
        let payload: Vec<u8> = (1..=40u8).collect();
        let handle = codec.encode(&payload).unwrap();

        let first = store.read(&handle).unwrap();
        assert_eq!(&first.as_bytes()[..4], &40u32.to_be_bytes());
        assert_eq!(&first.as_bytes()[4..32], &payload[..28]);

        // Byte 28 of the payload starts the second chunk.
        let second = store.read(&handle.offset(1)).unwrap();
        assert_eq!(&second.as_bytes()[..12], &payload[28..]);
        assert_eq!(&second.as_bytes()[12..], &[0u8; 20]);
    }

    #[test]
    fn empty_payload_still_writes_its_first_chunk() {
        let (store, mut codec) = codec();
        let handle = codec.encode(b"").unwrap();
        assert!(!handle.is_zero());
        assert_eq!(codec.decode(&handle).unwrap(), Vec::<u8>::new());
        // The all-zero first chunk was genuinely written, even though it is
        // indistinguishable by value from an unwritten slot.
        assert!(store.written_addresses().contains(&handle));
        assert_eq!(ChunkedBytes::chunk_count(0), 1);
    }

    // -----------------------------------------------------------------------
    // Absence sentinels
    // -----------------------------------------------------------------------

    #[test]
    fn zero_handle_decodes_to_empty() {
        let (_, codec) = codec();
        assert_eq!(codec.decode(&Address::ZERO).unwrap(), Vec::<u8>::new());
    }

    #[test]
    fn never_written_handle_decodes_to_empty() {
        let (_, codec) = codec();
        let handle = Address::new([0x42; 32]);
        assert_eq!(codec.decode(&handle).unwrap(), Vec::<u8>::new());
    }

    // -----------------------------------------------------------------------
    // Chain independence
    // -----------------------------------------------------------------------

    #[test]
    fn chains_never_overlap() {
        let (_, mut codec) = codec();
        let a = codec.encode(&[0x11; 100]).unwrap();
        let b = codec.encode(&[0x22; 100]).unwrap();
        assert_eq!(b, a.offset(4));
        assert_eq!(codec.decode(&a).unwrap(), vec![0x11; 100]);
        assert_eq!(codec.decode(&b).unwrap(), vec![0x22; 100]);
    }

    #[test]
    fn reencoding_orphans_but_preserves_the_old_chain() {
        let (_, mut codec) = codec();
        let old = codec.encode(b"first version").unwrap();
        let new = codec.encode(b"second version, somewhat longer").unwrap();
        assert_ne!(old, new);
        // The old chain is orphaned, not destroyed.
        assert_eq!(codec.decode(&old).unwrap(), b"first version");
        assert_eq!(codec.decode(&new).unwrap(), b"second version, somewhat longer");
    }

    #[test]
    fn large_payload_roundtrip() {
        let (_, mut codec) = codec();
        let payload: Vec<u8> = (0..100_000).map(|i| (i % 251) as u8).collect();
        let handle = codec.encode(&payload).unwrap();
        assert_eq!(codec.decode(&handle).unwrap(), payload);
    }
}
