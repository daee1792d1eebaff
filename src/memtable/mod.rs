//! MemTable Module
//!
//! Ordered in-memory table shared by the reference backends.
//!
//! ## Responsibilities
//! - Point reads and writes keyed by the backend's native key type
//! - Forward range reads in key order (for scans)
//! - Approximate size tracking
//!
//! ## Data Structure Choice
//! BTreeMap wrapped in RwLock:
//! - Ordered keys (required for range scans)
//! - Many concurrent readers, one writer at a time

mod table;

pub use table::MemTable;
