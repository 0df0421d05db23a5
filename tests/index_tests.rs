//! Tests for the index and point lookup
//!
//! These tests verify:
//! - Only live records are indexed, sorted by key
//! - Binary search hits and misses
//! - Stale entries read as not found
//! - Live slots that fail to decode are hard errors on direct lookup

mod common;

use common::{free_slot, header, live_slot, setup_temp_dir, write_raw, Pair};
use slotdb::index::{lookup, Index, IndexEntry};
use slotdb::storage::{self, DataFile, Offset};
use slotdb::SlotDbError;

fn unordered_file() -> (tempfile::TempDir, DataFile) {
    let (temp, path) = setup_temp_dir();
    write_raw(
        &path,
        &[
            header(-1),
            live_slot(6, b"30|c|d"),
            live_slot(5, b"7|a|b"),
            free_slot(6, -1),
            live_slot(7, b"-2|e|fg"),
            live_slot(8, b"15|x|y"),
        ],
    );
    // free_slot is reachable only by scanning; the header says the list is empty
    let file = DataFile::open(&path).unwrap();
    (temp, file)
}

#[test]
fn test_build_skips_deleted_and_sorts() {
    let (_temp, mut file) = unordered_file();

    let index = Index::build::<Pair>(&mut file).unwrap();

    assert_eq!(
        index.entries(),
        &[
            IndexEntry { key: -2, offset: Offset::new(27) },
            IndexEntry { key: 7, offset: Offset::new(12) },
            IndexEntry { key: 15, offset: Offset::new(36) },
            IndexEntry { key: 30, offset: Offset::new(4) },
        ]
    );
}

#[test]
fn test_build_on_empty_file() {
    let (_temp, path) = setup_temp_dir();
    let mut file = DataFile::create(&path).unwrap();

    let index = Index::build::<Pair>(&mut file).unwrap();

    assert!(index.is_empty());
    assert_eq!(index.find(1), None);
}

#[test]
fn test_find_every_key_and_misses() {
    let (_temp, mut file) = unordered_file();
    let index = Index::build::<Pair>(&mut file).unwrap();

    for entry in index.entries() {
        assert_eq!(index.find(entry.key), Some(entry.offset));
    }
    for missing in [-100, -1, 0, 8, 16, 31, 1000] {
        assert_eq!(index.find(missing), None);
    }
}

#[test]
fn test_lookup_reads_record() {
    let (_temp, mut file) = unordered_file();
    let index = Index::build::<Pair>(&mut file).unwrap();

    let found = lookup::<Pair>(&mut file, &index, 15).unwrap().unwrap();

    assert_eq!(found.record, Pair::new(15, "x", "y"));
    assert_eq!(found.offset, Offset::new(36));
    assert_eq!(found.capacity, 8);
}

#[test]
fn test_lookup_missing_key() {
    let (_temp, mut file) = unordered_file();
    let index = Index::build::<Pair>(&mut file).unwrap();

    assert!(lookup::<Pair>(&mut file, &index, 99).unwrap().is_none());
}

#[test]
fn test_lookup_through_stale_index_is_not_found() {
    let (_temp, mut file) = unordered_file();
    let index = Index::build::<Pair>(&mut file).unwrap();

    storage::delete(&mut file, Offset::new(12)).unwrap();

    assert!(lookup::<Pair>(&mut file, &index, 7).unwrap().is_none());
    let rebuilt = Index::build::<Pair>(&mut file).unwrap();
    assert_eq!(rebuilt.len(), 3);
    assert!(!rebuilt.contains(7));
}

#[test]
fn test_lookup_of_undecodable_slot_is_encoding_error() {
    let (_temp, mut file) = unordered_file();
    let index = Index::build::<Pair>(&mut file).unwrap();

    // Corrupt the indexed slot for key 30 after the scan
    file.write_all_at(Offset::new(4).payload() + 3, &[0xC3, 0x28])
        .unwrap();

    let result = lookup::<Pair>(&mut file, &index, 30);

    assert!(matches!(result, Err(SlotDbError::Encoding(_))));
}

#[test]
fn test_scan_skips_slot_that_fails_to_decode() {
    let (_temp, mut file) = unordered_file();
    file.write_all_at(Offset::new(4).payload() + 3, &[0xC3, 0x28])
        .unwrap();

    let index = Index::build::<Pair>(&mut file).unwrap();

    assert_eq!(index.len(), 3);
    assert!(!index.contains(30));
}
