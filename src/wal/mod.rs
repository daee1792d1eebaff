//! Write-Ahead Log (WAL) Module
//!
//! Durability for the log store: every mutation is appended here before it
//! reaches the memtable, and the log is replayed on open.
//!
//! ## File Format
//! ```text
//! ┌──────────────────────────────────────┐
//! │ Entry 1                              │
//! │ ┌─────────┬─────────┬──────────────┐ │
//! │ │ Len (4) │ CRC (4) │ Data         │ │
//! │ └─────────┴─────────┴──────────────┘ │
//! ├──────────────────────────────────────┤
//! │ Entry 2                              │
//! │ ┌─────────┬─────────┬──────────────┐ │
//! │ │ Len (4) │ CRC (4) │ Data         │ │
//! │ └─────────┴─────────┴──────────────┘ │
//! └──────────────────────────────────────┘
//! ```
//!
//! Len and CRC are little-endian; Data is a bincode `WalEntry` and the CRC
//! covers Data only.

mod entry;
mod writer;
mod recovery;

pub use entry::{WalEntry, Operation, HEADER_SIZE};
pub use writer::WalWriter;
pub use recovery::{WalRecovery, RecoveryResult};
