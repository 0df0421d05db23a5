//! Tests for compaction
//!
//! These tests verify:
//! - Only live records survive, packed with no gaps
//! - The free list is reset and the file truncated
//! - Reused slots shrink back to their payload size
//! - A second compaction changes nothing

mod common;

use common::{free_slot, header, live_slot, setup_temp_dir, sized_pairs, write_raw, Pair};
use slotdb::storage::{head, DataFile};
use slotdb::Store;

#[test]
fn test_compact_drops_deleted_slots() {
    let (_temp, path) = setup_temp_dir();
    let mut store = Store::<Pair>::create(&path).unwrap();
    for pair in sized_pairs() {
        store.insert(&pair).unwrap();
    }
    store.delete(2).unwrap().unwrap();

    let stats = store.compact().unwrap();

    assert_eq!(stats.records_kept, 2);
    assert_eq!(stats.slots_dropped, 1);
    assert_eq!(stats.bytes_before, 43);
    assert_eq!(stats.bytes_after, 21);
    assert_eq!(
        std::fs::read(&path).unwrap(),
        [header(-1), live_slot(5, b"1|a|b"), live_slot(8, b"3|cc|ddd")].concat()
    );
}

#[test]
fn test_compact_resets_free_list_and_offsets() {
    let (_temp, path) = setup_temp_dir();
    let mut store = Store::<Pair>::create(&path).unwrap();
    for pair in sized_pairs() {
        store.insert(&pair).unwrap();
    }
    store.delete(1).unwrap().unwrap();
    assert_eq!(store.free_list().unwrap().len(), 1);

    store.compact().unwrap();

    assert!(store.free_list().unwrap().is_empty());
    let found = store.lookup(2).unwrap().unwrap();
    assert_eq!(found.offset.get(), 4);
    assert_eq!(store.lookup(3).unwrap().unwrap().offset.get(), 26);
    assert!(store.lookup(1).unwrap().is_none());
}

#[test]
fn test_compact_shrinks_reused_slot() {
    let (_temp, path) = setup_temp_dir();
    let mut store = Store::<Pair>::create(&path).unwrap();
    for pair in sized_pairs() {
        store.insert(&pair).unwrap();
    }
    store.delete(2).unwrap().unwrap();
    let inserted = store.insert(&Pair::new(4, "ab", "c")).unwrap();
    assert_eq!(inserted.capacity, 20);

    store.compact().unwrap();

    let found = store.lookup(4).unwrap().unwrap();
    assert_eq!(found.capacity, 6);
    assert_eq!(found.record, Pair::new(4, "ab", "c"));
}

#[test]
fn test_compact_is_idempotent() {
    let (_temp, path) = setup_temp_dir();
    write_raw(
        &path,
        &[
            header(18),
            live_slot(12, b"1|a|b"),
            free_slot(9, -1),
            live_slot(8, b"3|cc|ddd"),
        ],
    );
    let mut store = Store::<Pair>::open_path(&path).unwrap();

    store.compact().unwrap();
    let first = std::fs::read(&path).unwrap();
    let stats = store.compact().unwrap();
    let second = std::fs::read(&path).unwrap();

    assert_eq!(first, second);
    assert_eq!(stats.slots_dropped, 0);
    assert_eq!(stats.bytes_before, stats.bytes_after);

    let mut file = DataFile::open(&path).unwrap();
    assert_eq!(head(&mut file).unwrap(), None);
}

#[test]
fn test_compact_empty_store() {
    let (_temp, path) = setup_temp_dir();
    let mut store = Store::<Pair>::create(&path).unwrap();

    let stats = store.compact().unwrap();

    assert_eq!(stats.records_kept, 0);
    assert_eq!(std::fs::read(&path).unwrap(), header(-1));
}

#[test]
fn test_compact_everything_deleted() {
    let (_temp, path) = setup_temp_dir();
    let mut store = Store::<Pair>::create(&path).unwrap();
    for pair in sized_pairs() {
        store.insert(&pair).unwrap();
    }
    for key in 1..=3 {
        store.delete(key).unwrap().unwrap();
    }

    let stats = store.compact().unwrap();

    assert_eq!(stats.slots_dropped, 3);
    assert_eq!(store.file_len().unwrap(), 4);
    assert!(store.records().unwrap().is_empty());
}

#[test]
fn test_compact_stops_at_end_marker() {
    let (_temp, path) = setup_temp_dir();
    write_raw(
        &path,
        &[header(-1), live_slot(5, b"1|a|b"), vec![0, 0], b"garbage".to_vec()],
    );
    let mut store = Store::<Pair>::open_path(&path).unwrap();

    store.compact().unwrap();

    assert_eq!(
        std::fs::read(&path).unwrap(),
        [header(-1), live_slot(5, b"1|a|b")].concat()
    );
}
