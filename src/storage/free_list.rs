//! Free list ("LED")
//!
//! Singly-linked list of reclaimed slots. The head lives in the file
//! header; every other link lives inside a free slot, right after the
//! tombstone marker:
//!
//! ```text
//! header            slot A                      slot B
//! ┌──────────┐      ┌─────┬───┬──────────┬──┐   ┌─────┬───┬──────────┬──┐
//! │ head = A │ ───▶ │ cap │ * │ next = B │..│ ─▶│ cap │ * │ next = -1│..│
//! └──────────┘      └─────┴───┴──────────┴──┘   └─────┴───┴──────────┴──┘
//! ```

use std::collections::HashSet;

use bytes::{Buf, BufMut};

use crate::error::{Result, SlotDbError};
use crate::record::TOMBSTONE_MARKER;

use super::{DataFile, Offset, CAPACITY_SIZE, LINK_SIZE, MIN_SLOT_CAPACITY};

/// A free slot in the list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FreeNode {
    pub offset: Offset,
    pub capacity: u16,
    pub next: Option<Offset>,
}

/// Where a link is stored
///
/// The head link sits in the file header, not inside a slot, so
/// unlinking the first node rewrites the header instead of a slot field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkSlot {
    /// The header field at byte 0
    Head,
    /// The `next` field of the free slot at this offset
    Node(Offset),
}

impl LinkSlot {
    /// Absolute byte position of the stored link
    pub fn position(self) -> u64 {
        match self {
            LinkSlot::Head => 0,
            LinkSlot::Node(offset) => offset.link_field(),
        }
    }
}

/// Read the list head from the header
pub fn head(file: &mut DataFile) -> Result<Option<Offset>> {
    read_link(file, LinkSlot::Head)
}

/// Insert a freed slot at the front of the list
///
/// Writes the tombstone marker and the old head into the slot, then
/// points the header at it.
pub fn push_free(file: &mut DataFile, offset: Offset, capacity: u16) -> Result<()> {
    if capacity < MIN_SLOT_CAPACITY {
        return Err(SlotDbError::invalid_offset(
            offset,
            format!(
                "capacity {} cannot hold a free-list link (min {})",
                capacity, MIN_SLOT_CAPACITY
            ),
        ));
    }

    let old_head = head(file)?;
    if old_head == Some(offset) {
        return Err(SlotDbError::invalid_offset(offset, "slot is already the list head"));
    }

    let mut node = Vec::with_capacity(1 + LINK_SIZE as usize);
    node.put_u8(TOMBSTONE_MARKER);
    node.put_i32(Offset::to_link(old_head)?);
    file.write_all_at(offset.payload(), &node)?;

    write_link(file, LinkSlot::Head, Some(offset))?;

    tracing::trace!(offset = %offset, capacity, "pushed free slot");
    Ok(())
}

/// Overwrite the link stored at `prev` with `next`, dropping the node
/// that sat between them
pub fn unlink(file: &mut DataFile, prev: LinkSlot, next: Option<Offset>) -> Result<()> {
    write_link(file, prev, next)
}

/// Walk the list from the head
pub fn walk(file: &mut DataFile) -> Result<FreeListIter<'_>> {
    let first = head(file)?;
    let file_len = file.len()?;
    Ok(FreeListIter {
        file,
        file_len,
        prev: LinkSlot::Head,
        cursor: first,
        visited: HashSet::new(),
    })
}

/// Iterator over free nodes, each paired with the link that points at it
///
/// Fails with `CorruptFreeList` on a revisited offset, a link past the
/// end of the file, or a node that is not tombstoned.
pub struct FreeListIter<'a> {
    file: &'a mut DataFile,
    file_len: u64,
    prev: LinkSlot,
    cursor: Option<Offset>,
    visited: HashSet<Offset>,
}

impl<'a> FreeListIter<'a> {
    fn read_node(&mut self, offset: Offset) -> Result<FreeNode> {
        if !self.visited.insert(offset) {
            return Err(SlotDbError::CorruptFreeList(format!(
                "cycle detected at offset {}",
                offset
            )));
        }

        let node_len = CAPACITY_SIZE + 1 + LINK_SIZE;
        if offset.get() + node_len > self.file_len {
            return Err(SlotDbError::CorruptFreeList(format!(
                "node at {} lies beyond end of file ({} bytes)",
                offset, self.file_len
            )));
        }

        let mut buf = [0u8; (CAPACITY_SIZE + 1 + LINK_SIZE) as usize];
        self.file.read_exact_at(offset.get(), &mut buf)?;

        let mut cursor = &buf[..];
        let capacity = cursor.get_u16();
        let marker = cursor.get_u8();
        let next = Offset::from_link(cursor.get_i32())?;

        if marker != TOMBSTONE_MARKER {
            return Err(SlotDbError::CorruptFreeList(format!(
                "node at {} is not tombstoned",
                offset
            )));
        }
        if offset.after_slot(capacity).get() > self.file_len {
            return Err(SlotDbError::CorruptFreeList(format!(
                "node at {} claims capacity {} past end of file",
                offset, capacity
            )));
        }

        Ok(FreeNode {
            offset,
            capacity,
            next,
        })
    }
}

impl<'a> Iterator for FreeListIter<'a> {
    /// (link pointing at the node, node)
    type Item = Result<(LinkSlot, FreeNode)>;

    fn next(&mut self) -> Option<Self::Item> {
        let offset = self.cursor.take()?;

        match self.read_node(offset) {
            Ok(node) => {
                let prev = std::mem::replace(&mut self.prev, LinkSlot::Node(offset));
                self.cursor = node.next;
                Some(Ok((prev, node)))
            }
            Err(e) => Some(Err(e)),
        }
    }
}

fn read_link(file: &mut DataFile, at: LinkSlot) -> Result<Option<Offset>> {
    let mut buf = [0u8; LINK_SIZE as usize];
    file.read_exact_at(at.position(), &mut buf)?;
    Offset::from_link((&buf[..]).get_i32())
}

fn write_link(file: &mut DataFile, at: LinkSlot, value: Option<Offset>) -> Result<()> {
    let mut buf = Vec::with_capacity(LINK_SIZE as usize);
    buf.put_i32(Offset::to_link(value)?);
    file.write_all_at(at.position(), &buf)
}
