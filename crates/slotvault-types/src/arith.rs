//! Big-endian arithmetic over 32-byte values.
//!
//! Words and addresses are both 256-bit big-endian integers for the purposes
//! of offset arithmetic. Addition wraps silently at 2^256; the address space
//! is large enough that wraparound never occurs in practice.

/// Add a small integer to a 32-byte big-endian value, wrapping at 2^256.
///
/// The carry propagates from the least-significant byte (index 31) toward
/// the most-significant byte (index 0).
pub(crate) fn be_add(bytes: &[u8; 32], n: u64) -> [u8; 32] {
    let mut out = *bytes;
    let mut carry = n as u128;
    for i in (0..32).rev() {
        if carry == 0 {
            break;
        }
        let sum = out[i] as u128 + (carry & 0xff);
        out[i] = sum as u8;
        carry = (carry >> 8) + (sum >> 8);
    }
    out
}
