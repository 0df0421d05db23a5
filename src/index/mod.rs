//! Index Module
//!
//! Ephemeral key → offset index, rebuilt by a full scan.
//!
//! ## Responsibilities
//! - Collect `(key, offset)` for every live slot
//! - Keep entries sorted by key for binary search
//! - Resolve a key to its record with one direct slot read
//!
//! The index owns no on-disk state and is stale as soon as anything
//! writes to the file; callers rebuild it after every mutation.

use crate::error::{Result, SlotDbError};
use crate::record::{self, Decoded, Key, Record};
use crate::storage::{read_slot, DataFile, Offset, Scanner, FIRST_SLOT};

/// One live record's position
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndexEntry {
    pub key: Key,
    pub offset: Offset,
}

/// A record together with the slot it was read from
#[derive(Debug, Clone, PartialEq)]
pub struct Located<R> {
    pub record: R,
    pub offset: Offset,
    pub capacity: u16,
}

/// Sorted index over the live records of one scan
#[derive(Debug, Clone, Default)]
pub struct Index {
    entries: Vec<IndexEntry>,
}

impl Index {
    /// Scan the whole file and index every live record
    ///
    /// Keys are assumed unique among live records; this is not checked.
    pub fn build<R: Record>(file: &mut DataFile) -> Result<Self> {
        let mut entries = Vec::new();

        for view in Scanner::<R>::new(file, FIRST_SLOT) {
            let view = view?;
            if let Decoded::Live(record) = &view.content {
                entries.push(IndexEntry {
                    key: record.key(),
                    offset: view.offset,
                });
            }
        }

        entries.sort_by_key(|entry| entry.key);
        tracing::debug!(entries = entries.len(), "built index");
        Ok(Self { entries })
    }

    /// Binary search for `key`
    pub fn find(&self, key: Key) -> Option<Offset> {
        let mut low = 0usize;
        let mut high = self.entries.len();

        while low < high {
            let mid = low + (high - low) / 2;
            let entry = self.entries[mid];
            if entry.key == key {
                return Some(entry.offset);
            } else if entry.key < key {
                low = mid + 1;
            } else {
                high = mid;
            }
        }
        None
    }

    pub fn contains(&self, key: Key) -> bool {
        self.find(key).is_some()
    }

    pub fn entries(&self) -> &[IndexEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Find `key` through `index` and read its slot directly
///
/// A slot that has been deleted since the index was built, or that now
/// holds a different key, reads as `None`. An undecodable payload is an
/// `Encoding` error here, since the index claimed the slot was live.
pub fn lookup<R: Record>(file: &mut DataFile, index: &Index, key: Key) -> Result<Option<Located<R>>> {
    let Some(offset) = index.find(key) else {
        return Ok(None);
    };

    let slot = read_slot(file, offset)?
        .ok_or_else(|| SlotDbError::invalid_offset(offset, "indexed slot is missing"))?;

    match record::decode::<R>(&slot.payload)? {
        Decoded::Live(record) if record.key() == key => Ok(Some(Located {
            record,
            offset,
            capacity: slot.capacity,
        })),
        Decoded::Live(_) | Decoded::Tombstone => {
            tracing::debug!(key, offset = %offset, "index entry is stale");
            Ok(None)
        }
    }
}
