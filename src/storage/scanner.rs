//! Slot scanner
//!
//! Forward-only enumeration of every slot, live or deleted.

use std::marker::PhantomData;

use bytes::Bytes;

use crate::error::{Result, SlotDbError};
use crate::record::{self, Decoded, Record};

use super::{read_slot, DataFile, Offset};

/// One slot as seen by a scan
#[derive(Debug, Clone)]
pub struct SlotView<R> {
    /// Start of the slot (its capacity prefix)
    pub offset: Offset,
    /// Reserved payload bytes
    pub capacity: u16,
    /// Decoded record, or `Tombstone` for deleted / undecodable slots
    pub content: Decoded<R>,
    /// Payload bytes as stored, padding included
    pub payload: Bytes,
}

impl<R> SlotView<R> {
    pub fn is_live(&self) -> bool {
        !self.content.is_tombstone()
    }
}

/// Read and classify the slot at `offset`
///
/// Returns the view plus the offset just past it, or `None` once the
/// end of the slot sequence is reached. A payload that is not valid text
/// is classified as a tombstone instead of failing the scan.
pub fn next_slot<R: Record>(
    file: &mut DataFile,
    offset: Offset,
) -> Result<Option<(SlotView<R>, Offset)>> {
    let Some(raw) = read_slot(file, offset)? else {
        return Ok(None);
    };

    let content = match record::decode::<R>(&raw.payload) {
        Ok(content) => content,
        Err(SlotDbError::Encoding(reason)) => {
            tracing::warn!(offset = %offset, %reason, "treating undecodable slot as deleted");
            Decoded::Tombstone
        }
        Err(e) => return Err(e),
    };

    let next = raw.next_offset();
    Ok(Some((
        SlotView {
            offset: raw.offset,
            capacity: raw.capacity,
            content,
            payload: raw.payload,
        },
        next,
    )))
}

/// Iterator over slots starting at a given offset
///
/// Stops after the end marker or the first error.
pub struct Scanner<'a, R> {
    file: &'a mut DataFile,
    cursor: Option<Offset>,
    _record: PhantomData<R>,
}

impl<'a, R: Record> Scanner<'a, R> {
    /// Scan from `start` (normally `FIRST_SLOT`)
    pub fn new(file: &'a mut DataFile, start: Offset) -> Self {
        Self {
            file,
            cursor: Some(start),
            _record: PhantomData,
        }
    }

    /// Offset the next call to `next()` will read, `None` once finished
    pub fn position(&self) -> Option<Offset> {
        self.cursor
    }
}

impl<'a, R: Record> Iterator for Scanner<'a, R> {
    type Item = Result<SlotView<R>>;

    fn next(&mut self) -> Option<Self::Item> {
        let offset = self.cursor.take()?;

        match next_slot(self.file, offset) {
            Ok(Some((view, next))) => {
                self.cursor = Some(next);
                Some(Ok(view))
            }
            Ok(None) => None,
            Err(e) => Some(Err(e)),
        }
    }
}
