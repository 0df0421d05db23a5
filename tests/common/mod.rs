//! Shared helpers for integration tests

#![allow(dead_code)]

use std::path::PathBuf;

use slotdb::record::{parse_key, Key, Record};
use slotdb::{Result, SlotDbError};
use tempfile::TempDir;

/// Three-field record used where exact byte sizes matter: `key|name|tag`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pair {
    pub key: Key,
    pub name: String,
    pub tag: String,
}

impl Pair {
    pub fn new(key: Key, name: &str, tag: &str) -> Self {
        Self {
            key,
            name: name.to_string(),
            tag: tag.to_string(),
        }
    }
}

impl Record for Pair {
    const FIELD_COUNT: usize = 3;

    fn key(&self) -> Key {
        self.key
    }

    fn fields(&self) -> Vec<String> {
        vec![self.key.to_string(), self.name.clone(), self.tag.clone()]
    }

    fn from_fields(fields: &[&str]) -> Result<Self> {
        match fields {
            [key, name, tag] => Ok(Self::new(parse_key(key)?, name, tag)),
            _ => Err(SlotDbError::MalformedRecord(format!(
                "pair needs 3 fields, got {}",
                fields.len()
            ))),
        }
    }
}

pub fn setup_temp_dir() -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("records.dat");
    (temp_dir, path)
}

// =============================================================================
// Raw file builders
// =============================================================================

pub fn header(head: i32) -> Vec<u8> {
    head.to_be_bytes().to_vec()
}

/// Occupied slot: capacity prefix, payload, zero fill
pub fn live_slot(capacity: u16, payload: &[u8]) -> Vec<u8> {
    assert!(payload.len() <= capacity as usize);
    let mut slot = capacity.to_be_bytes().to_vec();
    slot.extend_from_slice(payload);
    slot.resize(2 + capacity as usize, 0);
    slot
}

/// Free slot: capacity prefix, '*', next link, filler
pub fn free_slot(capacity: u16, next: i32) -> Vec<u8> {
    let mut slot = capacity.to_be_bytes().to_vec();
    slot.push(b'*');
    slot.extend_from_slice(&next.to_be_bytes());
    slot.resize(2 + capacity as usize, b'x');
    slot
}

pub fn write_raw(path: &PathBuf, parts: &[Vec<u8>]) {
    let bytes: Vec<u8> = parts.concat();
    std::fs::write(path, bytes).unwrap();
}

/// Records of payload length 5, 20 and 8 bytes
pub fn sized_pairs() -> [Pair; 3] {
    [
        Pair::new(1, "a", "b"),
        Pair::new(2, "aaaaaaaaa", "bbbbbbbb"),
        Pair::new(3, "cc", "ddd"),
    ]
}
