//! Configuration for benchkv
//!
//! The harness hands every adapter a flat, string-keyed property map. Backend
//! option structs are derived from it here; none of the knobs influence the
//! record codec or operation dispatch, they are forwarded to the backend.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::error::{BenchKvError, Result};

/// Property holding the number of fields per record
pub const FIELD_COUNT_PROPERTY: &str = "fieldcount";

/// Default number of fields per record
pub const FIELD_COUNT_DEFAULT: usize = 10;

// =============================================================================
// Properties
// =============================================================================

/// Flat string-keyed property map
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Properties {
    entries: BTreeMap<String, String>,
}

impl Properties {
    /// Create an empty property map
    pub fn new() -> Self {
        Self::default()
    }

    /// Load properties from a `key=value` file
    ///
    /// Blank lines and lines starting with `#` or `!` are skipped. The first
    /// `=` splits key from value; both sides are trimmed.
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        Self::parse(&text)
    }

    /// Parse properties from text in the same format as [`Properties::load`]
    pub fn parse(text: &str) -> Result<Self> {
        let mut props = Self::new();
        for (lineno, raw) in text.lines().enumerate() {
            let line = raw.trim();
            if line.is_empty() || line.starts_with('#') || line.starts_with('!') {
                continue;
            }
            let (key, value) = line.split_once('=').ok_or_else(|| {
                BenchKvError::Config(format!(
                    "line {}: expected key=value, got '{}'",
                    lineno + 1,
                    line
                ))
            })?;
            props.set(key.trim(), value.trim());
        }
        Ok(props)
    }

    /// Parse a single `key=value` override (as given on the command line)
    pub fn set_pair(&mut self, pair: &str) -> Result<()> {
        let (key, value) = pair
            .split_once('=')
            .ok_or_else(|| BenchKvError::Config(format!("expected key=value, got '{}'", pair)))?;
        self.set(key.trim(), value.trim());
        Ok(())
    }

    /// Set a property, replacing any previous value
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.entries.insert(key.into(), value.into());
        self
    }

    /// Builder-style variant of [`Properties::set`]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(key, value);
        self
    }

    /// Merge another map into this one; `other` wins on conflicts
    pub fn merge(&mut self, other: &Properties) {
        for (k, v) in &other.entries {
            self.entries.insert(k.clone(), v.clone());
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// Get a property or fall back to `default`
    pub fn get_or<'a>(&'a self, key: &str, default: &'a str) -> &'a str {
        self.get(key).unwrap_or(default)
    }

    /// Parse a property with `FromStr`, falling back to `default` when unset
    pub fn get_parsed<T>(&self, key: &str, default: T) -> Result<T>
    where
        T: FromStr,
        T::Err: std::fmt::Display,
    {
        match self.get(key) {
            None => Ok(default),
            Some(raw) => raw.parse::<T>().map_err(|e| {
                BenchKvError::Config(format!("invalid value '{}' for {}: {}", raw, key, e))
            }),
        }
    }

    /// Parse a boolean property
    ///
    /// Accepts `true`/`false`, `1`/`0`, `yes`/`no` (case-insensitive).
    pub fn get_bool(&self, key: &str, default: bool) -> Result<bool> {
        match self.get(key) {
            None => Ok(default),
            Some(raw) => match raw.to_ascii_lowercase().as_str() {
                "true" | "1" | "yes" => Ok(true),
                "false" | "0" | "no" => Ok(false),
                _ => Err(BenchKvError::Config(format!(
                    "invalid boolean '{}' for {}",
                    raw, key
                ))),
            },
        }
    }

    /// Configured number of fields per record
    pub fn field_count(&self) -> Result<usize> {
        self.get_parsed(FIELD_COUNT_PROPERTY, FIELD_COUNT_DEFAULT)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

// =============================================================================
// WAL Sync Strategy
// =============================================================================

/// WAL sync strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WalSyncStrategy {
    /// fsync after every write (safest, slowest)
    EveryWrite,

    /// fsync after N uncommitted entries (balanced durability/performance)
    EveryNEntries { count: usize },
}

impl WalSyncStrategy {
    /// Map the `sync_every` knob: 0 or 1 syncs every write
    pub fn from_count(count: usize) -> Self {
        if count <= 1 {
            WalSyncStrategy::EveryWrite
        } else {
            WalSyncStrategy::EveryNEntries { count }
        }
    }
}

// =============================================================================
// PageStore Options
// =============================================================================

/// Tuning knobs for the numeric-keyed page store
///
/// Every field is pass-through: the store records and logs them but the
/// adapter never reads them.
#[derive(Debug, Clone, PartialEq)]
pub struct PageStoreOptions {
    /// Store name / location (used for identification in logs)
    pub path: PathBuf,
    /// Discard existing contents on open
    pub destroy: bool,
    pub cache_size_mib: u64,
    pub memtable_size_mib: u64,
    pub use_direct_io: bool,
    pub bg_threads: usize,
    /// Expected key + value size, used to size the record cache
    pub record_size_bytes: u64,
    /// Target page fill percentage (1..=100)
    pub page_fill_pct: u8,
    pub pin_threads: bool,
    pub deferred_io_batch_size: usize,
    pub deferred_io_max_deferrals: usize,
    pub deferral_autotuning: bool,
    pub memory_autotuning: bool,
    pub reorg_length: usize,
    pub rec_cache_batch_writeout: bool,
    pub optimistic_caching: bool,
    pub rec_cache_use_lru: bool,
}

impl PageStoreOptions {
    pub const PREFIX: &'static str = "pagestore";

    /// Per-entry metadata overhead assumed when sizing the record cache
    pub const RECORD_CACHE_ENTRY_OVERHEAD: u64 = 96;

    pub fn builder() -> PageStoreOptionsBuilder {
        PageStoreOptionsBuilder::default()
    }

    /// Derive options from `pagestore.*` properties
    pub fn from_properties(props: &Properties) -> Result<Self> {
        let d = Self::default();
        let key = |name: &str| format!("{}.{}", Self::PREFIX, name);

        let path = props.get_or(&key("dbname"), "/tmp/benchkv-pagestore");
        if path.is_empty() {
            return Err(BenchKvError::Config("pagestore path is missing".to_string()));
        }

        let opts = Self {
            path: PathBuf::from(path),
            destroy: props.get_bool(&key("destroy"), d.destroy)?,
            cache_size_mib: props.get_parsed(&key("cache_size_mib"), d.cache_size_mib)?,
            memtable_size_mib: props.get_parsed(&key("memtable_size_mib"), d.memtable_size_mib)?,
            use_direct_io: props.get_bool(&key("use_direct_io"), d.use_direct_io)?,
            bg_threads: props.get_parsed(&key("bg_threads"), d.bg_threads)?,
            record_size_bytes: props.get_parsed(&key("record_size_bytes"), d.record_size_bytes)?,
            page_fill_pct: props.get_parsed(&key("page_fill_pct"), d.page_fill_pct)?,
            pin_threads: props.get_bool(&key("pin_threads"), d.pin_threads)?,
            deferred_io_batch_size: props
                .get_parsed(&key("deferred_io_batch_size"), d.deferred_io_batch_size)?,
            deferred_io_max_deferrals: props
                .get_parsed(&key("deferred_io_max_deferrals"), d.deferred_io_max_deferrals)?,
            deferral_autotuning: props
                .get_bool(&key("deferral_autotuning"), d.deferral_autotuning)?,
            memory_autotuning: props.get_bool(&key("memory_autotuning"), d.memory_autotuning)?,
            reorg_length: props.get_parsed(&key("reorg_length"), d.reorg_length)?,
            rec_cache_batch_writeout: props
                .get_bool(&key("rec_cache_batch_writeout"), d.rec_cache_batch_writeout)?,
            optimistic_caching: props.get_bool(&key("optimistic_caching"), d.optimistic_caching)?,
            rec_cache_use_lru: props.get_bool(&key("rec_cache_use_lru"), d.rec_cache_use_lru)?,
        };
        opts.validate()?;
        Ok(opts)
    }

    pub fn validate(&self) -> Result<()> {
        if self.page_fill_pct == 0 || self.page_fill_pct > 100 {
            return Err(BenchKvError::Config(format!(
                "page_fill_pct must be in 1..=100, got {}",
                self.page_fill_pct
            )));
        }
        self.record_cache_capacity()?;
        Ok(())
    }

    /// Number of records the record cache can hold for the configured size
    ///
    /// Fails with `Config` if the cache or record size overflows `u64`.
    pub fn record_cache_capacity(&self) -> Result<u64> {
        let cache_bytes = self.cache_size_mib.checked_mul(1024 * 1024).ok_or_else(|| {
            BenchKvError::Config(format!(
                "cache_size_mib {} overflows the cache size in bytes",
                self.cache_size_mib
            ))
        })?;
        let entry_bytes = self
            .record_size_bytes
            .checked_add(Self::RECORD_CACHE_ENTRY_OVERHEAD)
            .ok_or_else(|| {
                BenchKvError::Config(format!(
                    "record_size_bytes {} overflows the cache entry size",
                    self.record_size_bytes
                ))
            })?;
        Ok(cache_bytes / entry_bytes)
    }
}

impl Default for PageStoreOptions {
    fn default() -> Self {
        Self {
            path: PathBuf::from("/tmp/benchkv-pagestore"),
            destroy: false,
            cache_size_mib: 64,
            memtable_size_mib: 64,
            use_direct_io: true,
            bg_threads: 2,
            record_size_bytes: 32,
            page_fill_pct: 50,
            pin_threads: true,
            deferred_io_batch_size: 1,
            deferred_io_max_deferrals: 0,
            deferral_autotuning: false,
            memory_autotuning: false,
            reorg_length: 5,
            rec_cache_batch_writeout: true,
            optimistic_caching: false,
            rec_cache_use_lru: false,
        }
    }
}

/// Builder for PageStoreOptions
#[derive(Default)]
pub struct PageStoreOptionsBuilder {
    options: PageStoreOptions,
}

impl PageStoreOptionsBuilder {
    pub fn path(mut self, path: impl Into<PathBuf>) -> Self {
        self.options.path = path.into();
        self
    }

    pub fn destroy(mut self, destroy: bool) -> Self {
        self.options.destroy = destroy;
        self
    }

    pub fn cache_size_mib(mut self, mib: u64) -> Self {
        self.options.cache_size_mib = mib;
        self
    }

    pub fn record_size_bytes(mut self, bytes: u64) -> Self {
        self.options.record_size_bytes = bytes;
        self
    }

    pub fn bg_threads(mut self, threads: usize) -> Self {
        self.options.bg_threads = threads;
        self
    }

    pub fn page_fill_pct(mut self, pct: u8) -> Self {
        self.options.page_fill_pct = pct;
        self
    }

    pub fn build(self) -> PageStoreOptions {
        self.options
    }
}

// =============================================================================
// LogStore Options
// =============================================================================

/// Options for the byte-keyed, WAL-backed log store
#[derive(Debug, Clone, PartialEq)]
pub struct LogStoreOptions {
    /// Root directory for the store
    /// Internal structure:
    ///   {path}/
    ///     └── wal.log
    pub path: PathBuf,

    /// Remove the directory before opening
    pub destroy: bool,

    /// Sync strategy: how often to fsync the WAL
    pub wal_sync_strategy: WalSyncStrategy,
}

impl LogStoreOptions {
    pub const PREFIX: &'static str = "logstore";

    pub fn builder() -> LogStoreOptionsBuilder {
        LogStoreOptionsBuilder::default()
    }

    /// Derive options from `logstore.*` properties
    pub fn from_properties(props: &Properties) -> Result<Self> {
        let key = |name: &str| format!("{}.{}", Self::PREFIX, name);

        let path = props.get_or(&key("dbname"), "/tmp/benchkv-logstore");
        if path.is_empty() {
            return Err(BenchKvError::Config("logstore path is missing".to_string()));
        }
        let d = Self::default();
        let sync_every: usize = props.get_parsed(&key("sync_every"), 0)?;

        Ok(Self {
            path: PathBuf::from(path),
            destroy: props.get_bool(&key("destroy"), d.destroy)?,
            wal_sync_strategy: WalSyncStrategy::from_count(sync_every),
        })
    }
}

impl Default for LogStoreOptions {
    fn default() -> Self {
        Self {
            path: PathBuf::from("/tmp/benchkv-logstore"),
            destroy: false,
            wal_sync_strategy: WalSyncStrategy::EveryWrite,
        }
    }
}

/// Builder for LogStoreOptions
#[derive(Default)]
pub struct LogStoreOptionsBuilder {
    options: LogStoreOptions,
}

impl LogStoreOptionsBuilder {
    /// Set the store directory
    pub fn path(mut self, path: impl Into<PathBuf>) -> Self {
        self.options.path = path.into();
        self
    }

    pub fn destroy(mut self, destroy: bool) -> Self {
        self.options.destroy = destroy;
        self
    }

    /// Set the WAL sync strategy
    pub fn wal_sync_strategy(mut self, strategy: WalSyncStrategy) -> Self {
        self.options.wal_sync_strategy = strategy;
        self
    }

    pub fn build(self) -> LogStoreOptions {
        self.options
    }
}
