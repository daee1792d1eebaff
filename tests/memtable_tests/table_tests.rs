//! MemTable Tests
//!
//! Tests verify:
//! - Basic put/get/remove
//! - Size tracking
//! - Ordered range reads
//! - Concurrent access patterns

use std::sync::Arc;
use std::thread;

use benchkv::memtable::MemTable;

// =============================================================================
// Basic Operations Tests
// =============================================================================

#[test]
fn test_new_memtable_is_empty() {
    let memtable: MemTable<u64> = MemTable::new();
    assert_eq!(memtable.entry_count(), 0);
    assert_eq!(memtable.size(), 0);
    assert!(memtable.is_empty());
}

#[test]
fn test_put_and_get() {
    let memtable = MemTable::new();

    assert!(!memtable.put(b"key1".to_vec(), b"value1".to_vec()));

    assert_eq!(memtable.get(&b"key1".to_vec()), Some(b"value1".to_vec()));
    assert!(memtable.contains(&b"key1".to_vec()));
    assert_eq!(memtable.get(&b"missing".to_vec()), None);
}

#[test]
fn test_put_overwrites_and_tracks_size() {
    let memtable = MemTable::new();

    memtable.put(7u64, vec![0; 10]);
    assert_eq!(memtable.size(), 10);

    assert!(memtable.put(7u64, vec![0; 4]));
    assert_eq!(memtable.size(), 4);
    assert_eq!(memtable.entry_count(), 1);
}

#[test]
fn test_remove() {
    let memtable = MemTable::new();
    memtable.put(1u64, b"a".to_vec());

    assert!(memtable.remove(&1));
    assert!(!memtable.remove(&1));
    assert_eq!(memtable.get(&1), None);
    assert_eq!(memtable.size(), 0);
}

#[test]
fn test_clear() {
    let memtable = MemTable::new();
    for i in 0..10u64 {
        memtable.put(i, vec![1; 3]);
    }
    memtable.clear();
    assert!(memtable.is_empty());
    assert_eq!(memtable.size(), 0);
}

// =============================================================================
// Range Tests
// =============================================================================

#[test]
fn test_range_from_is_inclusive_and_ordered() {
    let memtable = MemTable::new();
    for i in [50u64, 10, 40, 20, 30] {
        memtable.put(i, i.to_le_bytes().to_vec());
    }

    let keys: Vec<u64> = memtable.range_from(&20, 3).into_iter().map(|(k, _)| k).collect();
    assert_eq!(keys, vec![20, 30, 40]);
}

#[test]
fn test_range_from_between_keys_and_past_end() {
    let memtable = MemTable::new();
    for i in [10u64, 20, 30] {
        memtable.put(i, Vec::new());
    }

    let keys: Vec<u64> = memtable.range_from(&15, 10).into_iter().map(|(k, _)| k).collect();
    assert_eq!(keys, vec![20, 30]);
    assert!(memtable.range_from(&31, 10).is_empty());
    assert!(memtable.range_from(&10, 0).is_empty());
}

#[test]
fn test_range_over_byte_keys_is_lexicographic() {
    let memtable = MemTable::new();
    for k in ["b", "aa", "a", "c"] {
        memtable.put(k.as_bytes().to_vec(), Vec::new());
    }

    let keys: Vec<Vec<u8>> = memtable
        .range_from(&b"a".to_vec(), 4)
        .into_iter()
        .map(|(k, _)| k)
        .collect();
    assert_eq!(keys, vec![b"a".to_vec(), b"aa".to_vec(), b"b".to_vec(), b"c".to_vec()]);
}

// =============================================================================
// Concurrency Tests
// =============================================================================

#[test]
fn test_concurrent_writers_and_readers() {
    let memtable = Arc::new(MemTable::new());
    let mut handles = Vec::new();

    for t in 0..4u64 {
        let memtable = Arc::clone(&memtable);
        handles.push(thread::spawn(move || {
            for i in 0..250u64 {
                memtable.put(t * 1000 + i, vec![0; 8]);
                assert!(memtable.get(&(t * 1000 + i)).is_some());
            }
        }));
    }
    for handle in handles {
        handle.join().unwrap();
    }

    assert_eq!(memtable.entry_count(), 1000);
    assert_eq!(memtable.size(), 8000);
}
