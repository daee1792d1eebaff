//! MemTable implementation
//!
//! BTreeMap-based memtable with RwLock for concurrency.

use std::collections::BTreeMap;
use std::ops::Bound;
use std::sync::atomic::{AtomicUsize, Ordering};

use parking_lot::RwLock;

/// In-memory ordered table
///
/// `size` counts value bytes only; it is an approximation used for logging.
pub struct MemTable<K> {
    data: RwLock<BTreeMap<K, Vec<u8>>>,
    size: AtomicUsize,
}

impl<K: Ord + Clone> MemTable<K> {
    /// Create a new empty MemTable
    pub fn new() -> Self {
        Self {
            data: RwLock::new(BTreeMap::new()),
            size: AtomicUsize::new(0),
        }
    }

    /// Get a value by key (read lock)
    pub fn get(&self, key: &K) -> Option<Vec<u8>> {
        self.data.read().get(key).cloned()
    }

    pub fn contains(&self, key: &K) -> bool {
        self.data.read().contains_key(key)
    }

    /// Put a key-value pair (write lock)
    ///
    /// Returns true if the key was already present.
    pub fn put(&self, key: K, value: Vec<u8>) -> bool {
        let added = value.len();
        let mut data = self.data.write();
        let previous = data.insert(key, value);
        self.size.fetch_add(added, Ordering::Relaxed);
        match previous {
            Some(old) => {
                self.size.fetch_sub(old.len(), Ordering::Relaxed);
                true
            }
            None => false,
        }
    }

    /// Remove a key (write lock)
    ///
    /// Returns true if the key was present.
    pub fn remove(&self, key: &K) -> bool {
        let mut data = self.data.write();
        match data.remove(key) {
            Some(old) => {
                self.size.fetch_sub(old.len(), Ordering::Relaxed);
                true
            }
            None => false,
        }
    }

    /// Up to `count` entries with key >= `start`, in ascending key order
    pub fn range_from(&self, start: &K, count: usize) -> Vec<(K, Vec<u8>)> {
        self.data
            .read()
            .range((Bound::Included(start), Bound::Unbounded))
            .take(count)
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }

    /// Get approximate size in bytes
    pub fn size(&self) -> usize {
        self.size.load(Ordering::Relaxed)
    }

    /// Get entry count
    pub fn entry_count(&self) -> usize {
        self.data.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.read().is_empty()
    }

    /// Remove all entries
    pub fn clear(&self) {
        let mut data = self.data.write();
        data.clear();
        self.size.store(0, Ordering::Relaxed);
    }
}

impl<K: Ord + Clone> Default for MemTable<K> {
    fn default() -> Self {
        Self::new()
    }
}
