//! Logical delete
//!
//! Tombstones an occupied slot in place and hands it to the free list.

use crate::error::{Result, SlotDbError};
use crate::record::TOMBSTONE_MARKER;

use super::slot::read_capacity;
use super::{push_free, DataFile, Offset, FIRST_SLOT, MIN_SLOT_CAPACITY};

/// Delete the occupied slot at `offset`, returning its capacity
///
/// The capacity is re-read from the file. Targets that are not an
/// occupied slot, or slots too small to carry a free-list link, fail
/// with `InvalidOffset` before anything is written.
pub fn delete(file: &mut DataFile, offset: Offset) -> Result<u16> {
    if offset < FIRST_SLOT {
        return Err(SlotDbError::invalid_offset(offset, "offset lies inside the header"));
    }

    let capacity = match read_capacity(file, offset)? {
        None | Some(0) => {
            return Err(SlotDbError::invalid_offset(offset, "no slot at this offset"))
        }
        Some(capacity) => capacity,
    };

    if offset.after_slot(capacity).get() > file.len()? {
        return Err(SlotDbError::invalid_offset(
            offset,
            format!("slot of capacity {} runs past end of file", capacity),
        ));
    }

    if capacity < MIN_SLOT_CAPACITY {
        return Err(SlotDbError::invalid_offset(
            offset,
            format!(
                "capacity {} cannot hold a free-list link (min {})",
                capacity, MIN_SLOT_CAPACITY
            ),
        ));
    }

    let mut first = [0u8; 1];
    file.read_exact_at(offset.payload(), &mut first)?;
    if first[0] == TOMBSTONE_MARKER {
        return Err(SlotDbError::invalid_offset(offset, "slot is already deleted"));
    }

    file.write_all_at(offset.payload(), &[TOMBSTONE_MARKER])?;
    push_free(file, offset, capacity)?;

    tracing::debug!(offset = %offset, capacity, "deleted slot");
    Ok(capacity)
}
