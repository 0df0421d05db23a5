//! Record codec
//!
//! Converts records to and from slot payload bytes.

use crate::error::{Result, SlotDbError};

use super::{Key, Record, PAD_BYTE, SEPARATOR, TOMBSTONE_MARKER};

/// Maximum payload length representable by the 2-byte capacity prefix
pub const MAX_PAYLOAD_LEN: usize = u16::MAX as usize;

/// Result of decoding a slot payload
#[derive(Debug, Clone, PartialEq)]
pub enum Decoded<R> {
    /// A live record
    Live(R),

    /// The payload starts with the tombstone marker
    Tombstone,
}

impl<R> Decoded<R> {
    pub fn is_tombstone(&self) -> bool {
        matches!(self, Decoded::Tombstone)
    }

    pub fn into_live(self) -> Option<R> {
        match self {
            Decoded::Live(record) => Some(record),
            Decoded::Tombstone => None,
        }
    }
}

/// Encode a record as separator-joined UTF-8
///
/// Fails with `Encoding` when a field contains the separator or the pad
/// byte, since either would make the payload ambiguous on decode.
pub fn encode<R: Record>(record: &R) -> Result<Vec<u8>> {
    let fields = record.fields();
    if fields.len() != R::FIELD_COUNT {
        return Err(SlotDbError::MalformedRecord(format!(
            "expected {} fields, record produced {}",
            R::FIELD_COUNT,
            fields.len()
        )));
    }

    for (i, field) in fields.iter().enumerate() {
        if field.contains(SEPARATOR) {
            return Err(SlotDbError::Encoding(format!(
                "field {} contains the separator '{}'",
                i + 1,
                SEPARATOR
            )));
        }
        if field.as_bytes().contains(&PAD_BYTE) {
            return Err(SlotDbError::Encoding(format!(
                "field {} contains a NUL byte",
                i + 1
            )));
        }
    }

    let encoded = fields.join(SEPARATOR.to_string().as_str()).into_bytes();
    if encoded.len() > MAX_PAYLOAD_LEN {
        return Err(SlotDbError::RecordTooLarge {
            len: encoded.len(),
            max: MAX_PAYLOAD_LEN,
        });
    }
    Ok(encoded)
}

/// Decode a slot payload
///
/// Trailing pad bytes are ignored. A leading tombstone marker
/// short-circuits before any text validation.
pub fn decode<R: Record>(payload: &[u8]) -> Result<Decoded<R>> {
    if payload.first() == Some(&TOMBSTONE_MARKER) {
        return Ok(Decoded::Tombstone);
    }

    let text = std::str::from_utf8(trim_padding(payload))
        .map_err(|e| SlotDbError::Encoding(format!("payload is not valid UTF-8: {}", e)))?;

    let fields: Vec<&str> = text.split(SEPARATOR).collect();
    if fields.len() != R::FIELD_COUNT {
        return Err(SlotDbError::MalformedRecord(format!(
            "expected {} fields, found {}",
            R::FIELD_COUNT,
            fields.len()
        )));
    }

    R::from_fields(&fields).map(Decoded::Live)
}

/// Parse the textual key field
pub fn parse_key(field: &str) -> Result<Key> {
    field
        .trim()
        .parse()
        .map_err(|_| SlotDbError::MalformedRecord(format!("invalid key {:?}", field)))
}

/// Strip the zero fill left behind by a slot reuse
pub(crate) fn trim_padding(payload: &[u8]) -> &[u8] {
    let end = payload
        .iter()
        .rposition(|&b| b != PAD_BYTE)
        .map_or(0, |pos| pos + 1);
    &payload[..end]
}
