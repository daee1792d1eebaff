//! Page Store
//!
//! Numeric-keyed, in-memory ordered engine. Keys are `u64`, so scans follow
//! numeric order of the derived keys rather than the byte order of the
//! harness keys.

use std::sync::atomic::{AtomicBool, Ordering};

use tracing::info;

use crate::config::{PageStoreOptions, Properties};
use crate::error::{BenchKvError, Result};
use crate::memtable::MemTable;
use super::{Backend, BackendStats, StatsRecorder, WriteOptions};

/// In-memory engine keyed by `u64`
pub struct PageStore {
    options: PageStoreOptions,
    table: MemTable<u64>,
    stats: StatsRecorder,
    closed: AtomicBool,
}

impl PageStore {
    pub fn options(&self) -> &PageStoreOptions {
        &self.options
    }

    pub fn len(&self) -> usize {
        self.table.entry_count()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    fn ensure_open(&self) -> Result<()> {
        if self.closed.load(Ordering::Acquire) {
            return Err(BenchKvError::Backend(format!(
                "page store {} is closed",
                self.options.path.display()
            )));
        }
        Ok(())
    }
}

impl Backend for PageStore {
    type Key = u64;
    type Options = PageStoreOptions;

    const NAME: &'static str = "pagestore";

    fn configure(props: &Properties) -> Result<Self::Options> {
        PageStoreOptions::from_properties(props)
    }

    fn open(options: Self::Options) -> Result<Self> {
        options.validate()?;
        let record_cache_capacity = options.record_cache_capacity()?;

        info!(
            path = %options.path.display(),
            destroy = options.destroy,
            cache_size_mib = options.cache_size_mib,
            record_cache_capacity,
            memtable_size_mib = options.memtable_size_mib,
            bg_threads = options.bg_threads,
            page_fill_pct = options.page_fill_pct,
            use_direct_io = options.use_direct_io,
            deferred_io_batch_size = options.deferred_io_batch_size,
            "opening page store"
        );

        Ok(Self {
            options,
            table: MemTable::new(),
            stats: StatsRecorder::default(),
            closed: AtomicBool::new(false),
        })
    }

    fn get(&self, key: &u64) -> Result<Option<Vec<u8>>> {
        self.ensure_open()?;
        let value = self.table.get(key);
        self.stats.record_read(value.is_some());
        Ok(value)
    }

    fn put(&self, key: u64, value: &[u8], options: WriteOptions) -> Result<()> {
        self.ensure_open()?;
        self.table.put(key, value.to_vec());
        self.stats.record_write(options, value.len());
        Ok(())
    }

    fn get_range(&self, start: &u64, count: usize) -> Result<Vec<(u64, Vec<u8>)>> {
        self.ensure_open()?;
        let entries = self.table.range_from(start, count);
        self.stats.record_range(entries.len());
        Ok(entries)
    }

    fn delete(&self, key: &u64) -> Result<()> {
        self.ensure_open()?;
        self.table.remove(key);
        self.stats.record_delete();
        Ok(())
    }

    fn close(&self) -> Result<()> {
        self.closed.store(true, Ordering::Release);
        info!(
            path = %self.options.path.display(),
            entries = self.table.entry_count(),
            bytes = self.table.size(),
            "closed page store"
        );
        self.table.clear();
        Ok(())
    }

    fn stats(&self) -> BackendStats {
        self.stats.snapshot()
    }
}
