//! Log Store
//!
//! Byte-keyed engine: an ordered memtable made durable by a write-ahead log.
//!
//! ## Concurrency
//! - Writes (put/delete): serialized by the WAL mutex; the log append and the
//!   memtable update happen under the same guard so replay order matches
//!   apply order
//! - Reads (get/range): memtable read lock only

use std::fs;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};

use parking_lot::Mutex;
use tracing::{debug, info};

use crate::config::{LogStoreOptions, Properties};
use crate::error::{BenchKvError, Result};
use crate::memtable::MemTable;
use crate::wal::{Operation, WalRecovery, WalWriter};
use super::{Backend, BackendStats, StatsRecorder, WriteOptions};

/// WAL-backed engine keyed by raw bytes
pub struct LogStore {
    options: LogStoreOptions,
    table: MemTable<Vec<u8>>,
    wal: Mutex<WalWriter>,
    stats: StatsRecorder,
    closed: AtomicBool,
}

impl LogStore {
    const WAL_FILENAME: &'static str = "wal.log";

    /// Path of the write-ahead log inside the store directory
    pub fn wal_path(&self) -> PathBuf {
        self.options.path.join(Self::WAL_FILENAME)
    }

    pub fn options(&self) -> &LogStoreOptions {
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
                "log store {} is closed",
                self.options.path.display()
            )));
        }
        Ok(())
    }
}

impl Backend for LogStore {
    type Key = Vec<u8>;
    type Options = LogStoreOptions;

    const NAME: &'static str = "logstore";

    fn configure(props: &Properties) -> Result<Self::Options> {
        LogStoreOptions::from_properties(props)
    }

    /// Open or create the store
    ///
    /// On startup:
    /// 1. Remove the directory if `destroy` is set
    /// 2. Create the directory
    /// 3. Replay the WAL into the memtable (dropping any torn tail)
    /// 4. Reopen the WAL for appending, continuing the LSN sequence
    fn open(options: Self::Options) -> Result<Self> {
        if options.destroy && options.path.exists() {
            info!(path = %options.path.display(), "destroying existing log store");
            fs::remove_dir_all(&options.path)?;
        }
        fs::create_dir_all(&options.path)?;

        let wal_path = options.path.join(Self::WAL_FILENAME);
        let table = MemTable::new();
        let mut next_lsn = 1;

        if wal_path.exists() {
            let (entries, result) = WalRecovery::recover(&wal_path)?;
            for entry in entries {
                match entry.operation {
                    Operation::Put { key, value } => {
                        table.put(key, value);
                    }
                    Operation::Delete { key } => {
                        table.remove(&key);
                    }
                }
            }
            next_lsn = result.last_lsn + 1;
            info!(
                path = %options.path.display(),
                recovered = result.entries_recovered,
                last_lsn = result.last_lsn,
                truncated = result.was_truncated,
                live_keys = table.entry_count(),
                "replayed log store WAL"
            );
        }

        let wal = WalWriter::open(&wal_path, options.wal_sync_strategy, next_lsn)?;
        debug!(path = %options.path.display(), next_lsn, "opened log store");

        Ok(Self {
            options,
            table,
            wal: Mutex::new(wal),
            stats: StatsRecorder::default(),
            closed: AtomicBool::new(false),
        })
    }

    fn get(&self, key: &Vec<u8>) -> Result<Option<Vec<u8>>> {
        self.ensure_open()?;
        let value = self.table.get(key);
        self.stats.record_read(value.is_some());
        Ok(value)
    }

    fn put(&self, key: Vec<u8>, value: &[u8], options: WriteOptions) -> Result<()> {
        self.ensure_open()?;
        let mut wal = self.wal.lock();
        wal.append(Operation::Put {
            key: key.clone(),
            value: value.to_vec(),
        })?;
        self.table.put(key, value.to_vec());
        self.stats.record_write(options, value.len());
        Ok(())
    }

    fn get_range(&self, start: &Vec<u8>, count: usize) -> Result<Vec<(Vec<u8>, Vec<u8>)>> {
        self.ensure_open()?;
        let entries = self.table.range_from(start, count);
        self.stats.record_range(entries.len());
        Ok(entries)
    }

    fn delete(&self, key: &Vec<u8>) -> Result<()> {
        self.ensure_open()?;
        let mut wal = self.wal.lock();
        wal.append(Operation::Delete { key: key.clone() })?;
        self.table.remove(key);
        self.stats.record_delete();
        Ok(())
    }

    /// Sync the WAL and refuse further operations
    fn close(&self) -> Result<()> {
        let mut wal = self.wal.lock();
        self.closed.store(true, Ordering::Release);
        wal.sync()?;
        info!(
            path = %self.options.path.display(),
            entries = self.table.entry_count(),
            last_lsn = wal.current_lsn() - 1,
            "closed log store"
        );
        Ok(())
    }

    fn stats(&self) -> BackendStats {
        self.stats.snapshot()
    }
}
