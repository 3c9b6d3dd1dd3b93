//! Deterministic address derivation for namespaced storage.
//!
//! Typed arrays and scalar slots do not go through the allocator; their base
//! addresses are a deterministic function of a 16-bit namespace id and a
//! sub-key. Distinct (namespace, sub-key) pairs essentially never collide:
//! the derivation is a BLAKE3 hash over the domain-separated input, so a
//! collision would require a hash collision.

use slotvault_types::Address;

/// Domain separator prefixed to every derivation input, so derived addresses
/// can never collide with addresses produced by other hashing schemes over
/// the same store.
const DERIVE_DOMAIN: &[u8] = b"slotvault.addr.v1";

/// Derive the base address for a (namespace, sub-key) pair.
///
/// The same pair always derives the same address. The zero-length sub-key is
/// valid and distinct from any non-empty sub-key.
pub fn derive_address(namespace: u16, subkey: &[u8]) -> Address {
    let mut hasher = blake3::Hasher::new();
    hasher.update(DERIVE_DOMAIN);
    hasher.update(&namespace.to_be_bytes());
    hasher.update(subkey);
    Address::new(*hasher.finalize().as_bytes())
}
