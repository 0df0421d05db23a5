//! Compaction
//!
//! Rewrites the file with only live slots, packed back to back, and an
//! empty free list.

use bytes::{BufMut, BytesMut};

use crate::error::Result;
use crate::record::{codec::trim_padding, Record, PAD_BYTE};

use super::{DataFile, Scanner, EMPTY_LIST, FIRST_SLOT, MIN_SLOT_CAPACITY};

/// Summary of a compaction run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CompactionStats {
    /// Live records kept
    pub records_kept: usize,
    /// Deleted or undecodable slots dropped
    pub slots_dropped: usize,
    pub bytes_before: u64,
    pub bytes_after: u64,
}

/// Compact the file in place
///
/// Each kept slot is shrunk to its payload without padding (never below
/// `MIN_SLOT_CAPACITY`). Every offset computed before this call is
/// invalid afterwards.
pub fn compact<R: Record>(file: &mut DataFile) -> Result<CompactionStats> {
    let bytes_before = file.len()?;

    let mut image = BytesMut::with_capacity(bytes_before as usize);
    image.put_i32(EMPTY_LIST);

    let mut stats = CompactionStats {
        bytes_before,
        ..CompactionStats::default()
    };

    for view in Scanner::<R>::new(file, FIRST_SLOT) {
        let view = view?;
        if !view.is_live() {
            stats.slots_dropped += 1;
            continue;
        }

        let payload = trim_padding(&view.payload);
        // payload came out of a slot, so it fits in u16
        let capacity = (payload.len() as u16).max(MIN_SLOT_CAPACITY);
        image.put_u16(capacity);
        image.put_slice(payload);
        image.put_bytes(PAD_BYTE, capacity as usize - payload.len());
        stats.records_kept += 1;
    }

    file.write_all_at(0, &image)?;
    file.set_len(image.len() as u64)?;
    file.sync()?;

    stats.bytes_after = image.len() as u64;
    tracing::info!(
        kept = stats.records_kept,
        dropped = stats.slots_dropped,
        before = stats.bytes_before,
        after = stats.bytes_after,
        "compacted data file"
    );
    Ok(stats)
}

