//! Raw slot access
//!
//! Reads and writes `[capacity][payload]` units without interpreting
//! the payload.

use bytes::{Buf, BufMut, Bytes, BytesMut};

use crate::error::{Result, SlotDbError};
use crate::record::PAD_BYTE;

use super::{DataFile, Offset, CAPACITY_SIZE, FIRST_SLOT};

/// A slot as stored: position, reserved capacity and every payload byte
#[derive(Debug, Clone)]
pub struct RawSlot {
    pub offset: Offset,
    pub capacity: u16,
    pub payload: Bytes,
}

impl RawSlot {
    /// Offset of the slot immediately after this one
    pub fn next_offset(&self) -> Offset {
        self.offset.after_slot(self.capacity)
    }
}

/// Read the slot at `offset`
///
/// Returns `None` at the end of the slot sequence: either a zero
/// capacity prefix or a clean physical end of file.
pub fn read_slot(file: &mut DataFile, offset: Offset) -> Result<Option<RawSlot>> {
    let capacity = match read_capacity(file, offset)? {
        Some(0) | None => return Ok(None),
        Some(capacity) => capacity,
    };

    let mut payload = vec![0u8; capacity as usize];
    file.read_exact_at(offset.payload(), &mut payload)?;

    Ok(Some(RawSlot {
        offset,
        capacity,
        payload: Bytes::from(payload),
    }))
}

/// Offset where the slot sequence ends
///
/// This is the zero-capacity end marker if the file has one, otherwise
/// the physical end of file. Bytes past a marker are unreachable by scans.
pub fn end_of_slots(file: &mut DataFile) -> Result<Offset> {
    let file_len = file.len()?;
    let mut offset = FIRST_SLOT;

    while let Some(capacity) = read_capacity(file, offset)? {
        if capacity == 0 {
            break;
        }
        let next = offset.after_slot(capacity);
        if next.get() > file_len {
            return Err(SlotDbError::invalid_offset(
                offset,
                format!("slot of capacity {} runs past end of file", capacity),
            ));
        }
        offset = next;
    }

    Ok(offset)
}

/// Read only the capacity prefix at `offset`, `None` at physical EOF
pub(crate) fn read_capacity(file: &mut DataFile, offset: Offset) -> Result<Option<u16>> {
    let mut prefix = [0u8; CAPACITY_SIZE as usize];
    match file.read_at(offset.get(), &mut prefix)? {
        0 => Ok(None),
        n if n < prefix.len() => Err(SlotDbError::invalid_offset(
            offset,
            "truncated capacity prefix",
        )),
        _ => Ok(Some((&prefix[..]).get_u16())),
    }
}

/// Write a full slot: capacity prefix, payload, then zero fill up to
/// `capacity`
pub(crate) fn write_slot(
    file: &mut DataFile,
    offset: Offset,
    capacity: u16,
    payload: &[u8],
) -> Result<()> {
    if payload.len() > capacity as usize {
        return Err(SlotDbError::invalid_offset(
            offset,
            format!(
                "payload of {} bytes does not fit capacity {}",
                payload.len(),
                capacity
            ),
        ));
    }

    let mut buf = BytesMut::with_capacity(CAPACITY_SIZE as usize + capacity as usize);
    buf.put_u16(capacity);
    buf.put_slice(payload);
    buf.put_bytes(PAD_BYTE, capacity as usize - payload.len());

    file.write_all_at(offset.get(), &buf)
}
