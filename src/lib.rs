//! # benchkv
//!
//! Storage-adapter layer for a key-value benchmark harness:
//! - Binary record codec with full and projected decode
//! - Opaque-key to native-key mapping per engine
//! - One uniform Read/Scan/Update/Insert/Delete surface over many engines
//! - Shared, refcounted engine lifecycle (open once, close on last release)
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                  Benchmark Harness Workers                   │
//! │               (one Adapter per worker thread)                │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │  read / scan / update / insert / delete
//! ┌─────────────────────▼───────────────────────────────────────┐
//! │                         Adapter                              │
//! │              (RowFormat dispatch, field count)               │
//! └──────┬──────────────────────┬─────────────────────┬─────────┘
//!        │                      │                     │
//!        ▼                      ▼                     ▼
//!  ┌───────────┐        ┌─────────────┐       ┌──────────────┐
//!  │  Record   │        │  Key Map    │       │ SharedHandle │
//!  │  Codec    │        │ (u64 / raw) │       │  (refcount)  │
//!  └───────────┘        └─────────────┘       └──────┬───────┘
//!                                                    │
//!                                  ┌─────────────────┴──────────┐
//!                                  ▼                            ▼
//!                           ┌─────────────┐             ┌─────────────┐
//!                           │  PageStore  │             │  LogStore   │
//!                           │  (u64 keys) │             │ (WAL+table) │
//!                           └─────────────┘             └─────────────┘
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod record;
pub mod key;
pub mod memtable;
pub mod wal;
pub mod backend;
pub mod adapter;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{BenchKvError, Result};
pub use config::Properties;
pub use record::{Field, Row};
pub use adapter::{Adapter, Db, DbFactory, RowFormat, SharedHandle};
pub use backend::{Backend, BackendStats, LogStore, PageStore, WriteOptions};

// =============================================================================
// Version Info
// =============================================================================

/// Current version of benchkv
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
