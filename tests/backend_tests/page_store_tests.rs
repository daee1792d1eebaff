//! Tests for PageStore
//!
//! These tests verify:
//! - Point operations keyed by u64
//! - Range reads in numeric key order
//! - Insert/update accounting in statistics
//! - Behavior after close

use benchkv::backend::{Backend, PageStore, WriteOptions};
use benchkv::config::{PageStoreOptions, Properties};
use benchkv::BenchKvError;

// =============================================================================
// Helper Functions
// =============================================================================

fn open_store() -> PageStore {
    PageStore::open(PageStoreOptions::default()).unwrap()
}

// =============================================================================
// Basic Operations Tests
// =============================================================================

#[test]
fn test_put_get_delete() {
    let store = open_store();

    store.put(42, b"value", WriteOptions::insert()).unwrap();
    assert_eq!(store.get(&42).unwrap(), Some(b"value".to_vec()));
    assert_eq!(store.get(&43).unwrap(), None);

    store.delete(&42).unwrap();
    assert_eq!(store.get(&42).unwrap(), None);
    assert!(store.is_empty());
}

#[test]
fn test_delete_missing_key_is_ok() {
    let store = open_store();
    store.delete(&1).unwrap();
}

#[test]
fn test_range_in_numeric_order() {
    let store = open_store();
    for k in [300u64, 100, 200, 400] {
        store.put(k, &k.to_le_bytes(), WriteOptions::insert()).unwrap();
    }

    let range = store.get_range(&150, 2).unwrap();
    let keys: Vec<u64> = range.iter().map(|(k, _)| *k).collect();
    assert_eq!(keys, vec![200, 300]);
    assert_eq!(range[0].1, 200u64.to_le_bytes().to_vec());
}

// =============================================================================
// Statistics Tests
// =============================================================================

#[test]
fn test_stats_distinguish_insert_and_update() {
    let store = open_store();

    store.put(1, b"abc", WriteOptions::insert()).unwrap();
    store.put(1, b"abcd", WriteOptions::update()).unwrap();
    store.get(&1).unwrap();
    store.get(&2).unwrap();
    store.get_range(&0, 10).unwrap();
    store.delete(&1).unwrap();

    let stats = store.stats();
    assert_eq!(stats.inserts, 1);
    assert_eq!(stats.updates, 1);
    assert_eq!(stats.bytes_written, 7);
    assert_eq!(stats.reads, 2);
    assert_eq!(stats.read_misses, 1);
    assert_eq!(stats.range_scans, 1);
    assert_eq!(stats.range_entries, 1);
    assert_eq!(stats.deletes, 1);
}

// =============================================================================
// Lifecycle Tests
// =============================================================================

#[test]
fn test_operations_fail_after_close() {
    let store = open_store();
    store.put(1, b"v", WriteOptions::insert()).unwrap();
    store.close().unwrap();

    assert!(matches!(store.get(&1), Err(BenchKvError::Backend(_))));
    assert!(store.put(2, b"v", WriteOptions::insert()).is_err());
}

#[test]
fn test_configure_reads_prefixed_properties() {
    let props = Properties::new().with("pagestore.bg_threads", "6");
    let opts = PageStore::configure(&props).unwrap();
    assert_eq!(opts.bg_threads, 6);

    let store = PageStore::open(opts).unwrap();
    assert_eq!(store.options().bg_threads, 6);
}

#[test]
fn test_open_rejects_invalid_options() {
    let opts = PageStoreOptions::builder().page_fill_pct(0).build();
    assert!(PageStore::open(opts).is_err());
}
