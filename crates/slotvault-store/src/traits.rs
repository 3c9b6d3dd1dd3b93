use slotvault_types::{Address, Word};

use crate::error::StoreResult;

/// The primitive word store every SlotVault engine component builds on.
///
/// All implementations must satisfy these invariants:
/// - Reading an address that was never written returns [`Word::ZERO`],
///   never an error.
/// - A write is visible to every subsequent read of the same address
///   within the current unit of work.
/// - The store never interprets word contents -- it is a pure key-value
///   store over 32-byte keys and 32-byte values.
/// - Atomicity across multiple writes is the host's responsibility; the
///   store itself makes no ordering or rollback guarantees.
pub trait WordStore: Send + Sync {
    /// Read the word at `address`.
    ///
    /// Returns [`Word::ZERO`] if the address was never written.
    /// Returns `Err` only on backend failure, never for absence.
    fn read(&self, address: &Address) -> StoreResult<Word>;

    /// Write `word` at `address`, replacing any previous value.
    fn write(&self, address: &Address, word: Word) -> StoreResult<()>;
}
