//! Best-fit slot allocator
//!
//! Chooses where a new payload goes: the smallest free slot that can hold
//! it, or a fresh slot at the end of the file.

use crate::error::{Result, SlotDbError};
use crate::record::codec::MAX_PAYLOAD_LEN;

use super::slot::{end_of_slots, write_slot};
use super::{unlink, walk, DataFile, FreeNode, LinkSlot, Offset, MIN_SLOT_CAPACITY};

/// Where an allocation came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    /// A free slot was unlinked and reused whole
    Reused,
    /// A new slot was placed at end of file
    Appended,
}

/// A slot reserved for a payload
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Allocation {
    pub offset: Offset,
    /// Capacity of the slot; for reused slots this is the original
    /// capacity, never shrunk to the payload
    pub capacity: u16,
    pub placement: Placement,
}

/// Reserve a slot able to hold `needed` payload bytes
///
/// Walks the whole free list keeping the smallest node with
/// `capacity >= needed` (first one wins on ties) and unlinks it. With no
/// fitting node, reserves a slot at the end of the slot sequence sized to
/// the payload. A zero-capacity end marker and anything after it are cut
/// off first, so the new slot is reachable by scans. Nothing else is
/// written for an append; `store` does that.
pub fn allocate(file: &mut DataFile, needed: u16) -> Result<Allocation> {
    let mut best: Option<(LinkSlot, FreeNode)> = None;

    for entry in walk(file)? {
        let (prev, node) = entry?;
        if node.capacity < needed {
            continue;
        }
        if best.map_or(true, |(_, b)| node.capacity < b.capacity) {
            best = Some((prev, node));
        }
    }

    if let Some((prev, node)) = best {
        unlink(file, prev, node.next)?;
        tracing::debug!(
            offset = %node.offset,
            capacity = node.capacity,
            needed,
            "reusing free slot"
        );
        return Ok(Allocation {
            offset: node.offset,
            capacity: node.capacity,
            placement: Placement::Reused,
        });
    }

    let offset = end_of_slots(file)?;
    let physical_end = file.end()?;
    if offset < physical_end {
        tracing::warn!(
            offset = %offset,
            discarded = physical_end.get() - offset.get(),
            "truncating bytes past end marker"
        );
        file.set_len(offset.get())?;
    }

    let capacity = needed.max(MIN_SLOT_CAPACITY);
    tracing::debug!(offset = %offset, capacity, "appending new slot");
    Ok(Allocation {
        offset,
        capacity,
        placement: Placement::Appended,
    })
}

/// Allocate a slot for `payload` and write it
///
/// Bytes between the payload end and the slot capacity are zero-filled.
pub fn store(file: &mut DataFile, payload: &[u8]) -> Result<Allocation> {
    let needed = u16::try_from(payload.len()).map_err(|_| SlotDbError::RecordTooLarge {
        len: payload.len(),
        max: MAX_PAYLOAD_LEN,
    })?;

    let allocation = allocate(file, needed)?;
    write_slot(file, allocation.offset, allocation.capacity, payload)?;
    Ok(allocation)
}
