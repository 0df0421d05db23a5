//! Outcome definitions
//!
//! What the store reports back for each command.

use crate::engine::{Deleted, Inserted};
use crate::index::Located;
use crate::record::Key;

/// Result of executing one command
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome<R> {
    /// Lookup hit
    Found(Located<R>),

    /// Record tombstoned and its slot pushed on the free list
    Deleted(Deleted),

    /// Record written to a reused or appended slot
    Inserted(Inserted),

    /// Lookup or delete of a key that is absent or deleted
    NotFound(Key),

    /// Insert of a key that is already live
    DuplicateKey(Key),
}

impl<R> Outcome<R> {
    /// True for `NotFound` and `DuplicateKey`
    pub fn is_rejection(&self) -> bool {
        matches!(self, Outcome::NotFound(_) | Outcome::DuplicateKey(_))
    }
}
