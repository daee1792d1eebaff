//! Error types for benchkv
//!
//! Provides a unified error type for all adapter, codec and backend operations.
//!
//! A missing key is never an error: reads report it as `Ok(None)`. Everything
//! in here aborts the current logical operation.

use thiserror::Error;

/// Result type alias using BenchKvError
pub type Result<T> = std::result::Result<T, BenchKvError>;

/// Unified error type for benchkv operations
#[derive(Debug, Error)]
pub enum BenchKvError {
    // -------------------------------------------------------------------------
    // I/O Errors
    // -------------------------------------------------------------------------
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // -------------------------------------------------------------------------
    // Record / Key Integrity Errors
    // -------------------------------------------------------------------------
    #[error("Record truncated at offset {offset}: need {needed} bytes, {remaining} remain")]
    Truncated {
        offset: usize,
        needed: usize,
        remaining: usize,
    },

    #[error("Filtered decode matched {matched} of {requested} fields; '{missing}' not found in record order")]
    FilterMismatch {
        missing: String,
        matched: usize,
        requested: usize,
    },

    #[error("Record has {actual} fields, expected {expected}")]
    FieldCountMismatch { expected: usize, actual: usize },

    #[error("Field component of {len} bytes exceeds the u32 length prefix")]
    FieldTooLarge { len: usize },

    #[error("Key of {len} bytes is too short for a numeric key (need at least 8)")]
    KeyTooShort { len: usize },

    // -------------------------------------------------------------------------
    // Backend Errors
    // -------------------------------------------------------------------------
    #[error("Backend open failed: {0}")]
    BackendOpen(String),

    #[error("Backend error: {0}")]
    Backend(String),

    #[error("WAL corruption detected: {0}")]
    WalCorruption(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    // -------------------------------------------------------------------------
    // Adapter Errors
    // -------------------------------------------------------------------------
    #[error("Adapter used before init() or after cleanup()")]
    NotInitialized,

    #[error("Unknown row format: {0}")]
    UnknownFormat(String),

    #[error("Unknown backend: {0}")]
    UnknownBackend(String),

    // -------------------------------------------------------------------------
    // Configuration Errors
    // -------------------------------------------------------------------------
    #[error("Configuration error: {0}")]
    Config(String),
}

impl BenchKvError {
    /// True for faults caused by malformed records, keys or filters rather
    /// than by the backend or the environment.
    pub fn is_integrity_fault(&self) -> bool {
        matches!(
            self,
            BenchKvError::Truncated { .. }
                | BenchKvError::FilterMismatch { .. }
                | BenchKvError::FieldCountMismatch { .. }
                | BenchKvError::FieldTooLarge { .. }
                | BenchKvError::KeyTooShort { .. }
        )
    }
}

impl From<bincode::Error> for BenchKvError {
    fn from(err: bincode::Error) -> Self {
        BenchKvError::Serialization(err.to_string())
    }
}
