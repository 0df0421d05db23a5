//! Storage Module
//!
//! The single data file: header, slots, and the free list threaded
//! through reclaimed slots.
//!
//! ## File Format
//! ```text
//! ┌────────────────────────────────────────────────────────────┐
//! │ Header (4 bytes)                                           │
//! │   FreeListHead: i32 BE (-1 = empty list)                   │
//! ├────────────────────────────────────────────────────────────┤
//! │ Slot (repeated until EOF or a zero capacity)               │
//! │   Capacity: u16 BE | Payload (Capacity bytes)              │
//! │                                                            │
//! │   occupied: "key|field2|...|fieldN" + 0x00 fill            │
//! │   free:     '*' | Next: i32 BE | leftover bytes            │
//! └────────────────────────────────────────────────────────────┘
//! ```
//!
//! Offsets stored in the file double as pointers, so every read and write
//! here seeks to an absolute position.

mod allocator;
mod compaction;
mod delete;
mod file;
mod free_list;
mod scanner;
mod slot;

use std::fmt;

pub use allocator::{allocate, store, Allocation, Placement};
pub use compaction::{compact, CompactionStats};
pub use delete::delete;
pub use file::DataFile;
pub use free_list::{head, push_free, unlink, walk, FreeListIter, FreeNode, LinkSlot};
pub use scanner::{next_slot, Scanner, SlotView};
pub use slot::{end_of_slots, read_slot, RawSlot};

use crate::error::{Result, SlotDbError};

// =============================================================================
// Shared Constants
// =============================================================================

/// Header size: FreeListHead (4)
pub const HEADER_SIZE: u64 = 4;

/// Size of the capacity prefix in front of every payload
pub const CAPACITY_SIZE: u64 = 2;

/// Size of a stored free-list link
pub const LINK_SIZE: u64 = 4;

/// On-disk link value meaning "no more nodes"
pub const EMPTY_LIST: i32 = -1;

/// Smallest capacity that can carry the tombstone marker and a link
pub const MIN_SLOT_CAPACITY: u16 = 1 + LINK_SIZE as u16;

/// Position of the first slot
pub const FIRST_SLOT: Offset = Offset(HEADER_SIZE);

// =============================================================================
// Offset
// =============================================================================

/// Absolute byte position of a slot's capacity prefix.
///
/// Kept distinct from sizes; the only arithmetic offered is stepping to
/// the fields inside a slot and past the slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Offset(u64);

impl Offset {
    pub const fn new(pos: u64) -> Self {
        Self(pos)
    }

    /// Raw byte position
    pub const fn get(self) -> u64 {
        self.0
    }

    /// Position of the first payload byte
    pub const fn payload(self) -> u64 {
        self.0 + CAPACITY_SIZE
    }

    /// Position of the `next` link inside a free slot (after the marker)
    pub const fn link_field(self) -> u64 {
        self.0 + CAPACITY_SIZE + 1
    }

    /// Offset of the slot that follows a slot of `capacity` bytes
    pub const fn after_slot(self, capacity: u16) -> Offset {
        Offset(self.0 + CAPACITY_SIZE + capacity as u64)
    }

    /// Encode an optional link as the on-disk signed value
    pub fn to_link(next: Option<Offset>) -> Result<i32> {
        match next {
            None => Ok(EMPTY_LIST),
            Some(offset) => i32::try_from(offset.0).map_err(|_| {
                SlotDbError::invalid_offset(offset, "offset does not fit in a 32-bit link")
            }),
        }
    }

    /// Decode an on-disk link; only `-1` may be negative
    pub fn from_link(raw: i32) -> Result<Option<Offset>> {
        match raw {
            EMPTY_LIST => Ok(None),
            raw if raw < HEADER_SIZE as i32 => Err(SlotDbError::CorruptFreeList(format!(
                "link {} points into the header or below zero",
                raw
            ))),
            raw => Ok(Some(Offset(raw as u64))),
        }
    }
}

impl fmt::Display for Offset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<Offset> for u64 {
    fn from(offset: Offset) -> u64 {
        offset.0
    }
}
