//! Error types for SlotDB
//!
//! Provides a unified error type for all operations.

use thiserror::Error;

use crate::record::Key;
use crate::storage::Offset;

/// Result type alias using SlotDbError
pub type Result<T> = std::result::Result<T, SlotDbError>;

/// Unified error type for SlotDB operations
#[derive(Debug, Error)]
pub enum SlotDbError {
    // -------------------------------------------------------------------------
    // I/O Errors
    // -------------------------------------------------------------------------
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // -------------------------------------------------------------------------
    // Record Errors
    // -------------------------------------------------------------------------
    #[error("Encoding error: {0}")]
    Encoding(String),

    #[error("Malformed record: {0}")]
    MalformedRecord(String),

    #[error("Record too large: {len} bytes (max {max})")]
    RecordTooLarge { len: usize, max: usize },

    #[error("Duplicate key: {0}")]
    DuplicateKey(Key),

    // -------------------------------------------------------------------------
    // Storage Errors
    // -------------------------------------------------------------------------
    #[error("Invalid offset {offset}: {reason}")]
    InvalidOffset { offset: Offset, reason: String },

    #[error("Free list corrupted: {0}")]
    CorruptFreeList(String),

    // -------------------------------------------------------------------------
    // Driver Errors
    // -------------------------------------------------------------------------
    #[error("Script error on line {line}: {message}")]
    Script { line: usize, message: String },

    #[error("Configuration error: {0}")]
    Config(String),
}

impl SlotDbError {
    pub(crate) fn invalid_offset(offset: Offset, reason: impl Into<String>) -> Self {
        SlotDbError::InvalidOffset {
            offset,
            reason: reason.into(),
        }
    }
}
