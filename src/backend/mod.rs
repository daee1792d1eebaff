//! Backend Module
//!
//! The storage-engine interface the adapter drives, plus two reference
//! engines.
//!
//! ## Responsibilities
//! - Declare each engine's native key type (numeric or raw bytes)
//! - Derive engine options from harness properties
//! - Point get/put/delete and forward range reads
//! - Keep per-engine operation statistics
//!
//! Engines must be safe to call from many threads at once; the adapter adds
//! no locking on the data path.

mod log_store;
mod page_store;

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::config::Properties;
use crate::error::Result;
use crate::key::BackendKey;

pub use log_store::LogStore;
pub use page_store::PageStore;

/// Write flags passed through to the engine
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WriteOptions {
    /// The write replaces an existing record rather than adding a new one
    pub is_update: bool,
}

impl WriteOptions {
    pub fn insert() -> Self {
        Self { is_update: false }
    }

    pub fn update() -> Self {
        Self { is_update: true }
    }
}

/// A storage engine driven by the adapter
pub trait Backend: Send + Sync + Sized + 'static {
    /// Native key type
    type Key: BackendKey + Ord + Clone + Send + Sync + fmt::Debug;

    /// Engine options derived from properties
    type Options: Clone + fmt::Debug + Send;

    /// Registry name, also the property prefix
    const NAME: &'static str;

    /// Build engine options from harness properties
    fn configure(props: &Properties) -> Result<Self::Options>;

    /// Physically open the engine
    fn open(options: Self::Options) -> Result<Self>;

    /// Returns `Ok(None)` if the key is absent
    fn get(&self, key: &Self::Key) -> Result<Option<Vec<u8>>>;

    fn put(&self, key: Self::Key, value: &[u8], options: WriteOptions) -> Result<()>;

    /// Up to `count` entries with key >= `start`, in engine iteration order
    fn get_range(&self, start: &Self::Key, count: usize) -> Result<Vec<(Self::Key, Vec<u8>)>>;

    /// Deleting an absent key is not an error
    fn delete(&self, key: &Self::Key) -> Result<()>;

    /// Physically close the engine; later calls fail
    fn close(&self) -> Result<()>;

    fn stats(&self) -> BackendStats;
}

// =============================================================================
// Statistics
// =============================================================================

/// Snapshot of engine operation counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BackendStats {
    pub reads: u64,
    pub read_misses: u64,
    pub inserts: u64,
    pub updates: u64,
    pub deletes: u64,
    pub range_scans: u64,
    pub range_entries: u64,
    pub bytes_written: u64,
}

impl fmt::Display for BackendStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "reads={} read_misses={} inserts={} updates={} deletes={} range_scans={} range_entries={} bytes_written={}",
            self.reads,
            self.read_misses,
            self.inserts,
            self.updates,
            self.deletes,
            self.range_scans,
            self.range_entries,
            self.bytes_written
        )
    }
}

/// Lock-free counters behind [`BackendStats`]
#[derive(Debug, Default)]
pub(crate) struct StatsRecorder {
    reads: AtomicU64,
    read_misses: AtomicU64,
    inserts: AtomicU64,
    updates: AtomicU64,
    deletes: AtomicU64,
    range_scans: AtomicU64,
    range_entries: AtomicU64,
    bytes_written: AtomicU64,
}

impl StatsRecorder {
    pub(crate) fn record_read(&self, hit: bool) {
        self.reads.fetch_add(1, Ordering::Relaxed);
        if !hit {
            self.read_misses.fetch_add(1, Ordering::Relaxed);
        }
    }

    pub(crate) fn record_write(&self, options: WriteOptions, bytes: usize) {
        let counter = if options.is_update {
            &self.updates
        } else {
            &self.inserts
        };
        counter.fetch_add(1, Ordering::Relaxed);
        self.bytes_written.fetch_add(bytes as u64, Ordering::Relaxed);
    }

    pub(crate) fn record_delete(&self) {
        self.deletes.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_range(&self, entries: usize) {
        self.range_scans.fetch_add(1, Ordering::Relaxed);
        self.range_entries.fetch_add(entries as u64, Ordering::Relaxed);
    }

    pub(crate) fn snapshot(&self) -> BackendStats {
        BackendStats {
            reads: self.reads.load(Ordering::Relaxed),
            read_misses: self.read_misses.load(Ordering::Relaxed),
            inserts: self.inserts.load(Ordering::Relaxed),
            updates: self.updates.load(Ordering::Relaxed),
            deletes: self.deletes.load(Ordering::Relaxed),
            range_scans: self.range_scans.load(Ordering::Relaxed),
            range_entries: self.range_entries.load(Ordering::Relaxed),
            bytes_written: self.bytes_written.load(Ordering::Relaxed),
        }
    }
}
