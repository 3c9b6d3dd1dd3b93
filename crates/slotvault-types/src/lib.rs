//! Foundation types for SlotVault.
//!
//! SlotVault persists structured data on top of a primitive word store whose
//! unit of access is a single 32-byte slot. This crate provides the two core
//! value types every other SlotVault crate builds on, plus the big-endian
//! arithmetic they share.
//!
//! # Key Types
//!
//! - [`Word`] — An opaque 32-byte slot value, with fixed-width scalar
//!   conversions and 256-bit big-endian addition
//! - [`Address`] — A 32-byte store key, with small-offset addition for
//!   header/data and chunk-chain addressing
//! - [`TypeError`] — Errors from hex parsing and scalar encode/decode

pub mod address;
mod arith;
pub mod error;
pub mod word;

pub use address::Address;
pub use error::TypeError;
pub use word::Word;
