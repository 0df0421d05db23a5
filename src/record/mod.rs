//! Record Module
//!
//! Logical entities stored in the data file and their text encoding.
//!
//! ## Payload Format
//! ```text
//! ┌─────────┬───┬──────────┬───┬─────┬───┬──────────┬──────────────┐
//! │ key     │ | │ field 2  │ | │ ... │ | │ field N  │ 0x00 padding │
//! └─────────┴───┴──────────┴───┴─────┴───┴──────────┴──────────────┘
//! ```
//!
//! A payload whose first byte is `*` is a tombstone; nothing after the
//! marker is interpreted as record data.

pub mod codec;
mod movie;

pub use codec::{decode, encode, parse_key, Decoded, MAX_PAYLOAD_LEN};
pub use movie::Movie;

use crate::error::Result;

/// Primary key of a record, always the first encoded field
pub type Key = i64;

/// Field separator inside an encoded payload
pub const SEPARATOR: char = '|';

/// First payload byte of a deleted (free) slot
pub const TOMBSTONE_MARKER: u8 = b'*';

/// Filler written after a payload that is shorter than its slot
pub const PAD_BYTE: u8 = 0x00;

/// A fixed-arity entity that can live in a slot.
///
/// `fields()` must return exactly `FIELD_COUNT` values with the key
/// rendered first; `from_fields()` receives the same shape back.
pub trait Record: Sized {
    /// Number of separator-joined fields, key included
    const FIELD_COUNT: usize;

    /// The unique integer key
    fn key(&self) -> Key;

    /// Ordered textual fields, key first
    fn fields(&self) -> Vec<String>;

    /// Rebuild the entity from exactly `FIELD_COUNT` fields
    fn from_fields(fields: &[&str]) -> Result<Self>;
}
