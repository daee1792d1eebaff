//! WAL Recovery
//!
//! Reads every intact frame from the log. A torn or corrupt frame ends the
//! log: everything from it onwards is cut off.

use std::fs::{self, OpenOptions};
use std::path::Path;

use tracing::warn;

use crate::error::Result;
use super::{WalEntry, HEADER_SIZE};

/// Handles WAL recovery after a restart
pub struct WalRecovery;

/// Result of a recovery operation
#[derive(Debug, Default, PartialEq, Eq)]
pub struct RecoveryResult {
    /// Number of entries successfully recovered
    pub entries_recovered: u64,

    /// Last valid LSN (0 if none)
    pub last_lsn: u64,

    /// Byte offset where the valid prefix ends
    pub valid_len: u64,

    /// Whether the WAL was truncated (torn or corrupt tail removed)
    pub was_truncated: bool,
}

impl WalRecovery {
    /// Recover entries from a WAL file, truncating any invalid tail
    pub fn recover(path: &Path) -> Result<(Vec<WalEntry>, RecoveryResult)> {
        let (entries, mut result, file_len) = Self::scan(path)?;

        if result.valid_len < file_len {
            warn!(
                path = %path.display(),
                valid_len = result.valid_len,
                file_len,
                "truncating invalid WAL tail"
            );
            let file = OpenOptions::new().write(true).open(path)?;
            file.set_len(result.valid_len)?;
            file.sync_all()?;
            result.was_truncated = true;
        }

        Ok((entries, result))
    }

    /// Verify integrity of a WAL file without modifying it
    pub fn verify(path: &Path) -> Result<RecoveryResult> {
        let (_, mut result, file_len) = Self::scan(path)?;
        result.was_truncated = result.valid_len < file_len;
        Ok(result)
    }

    fn scan(path: &Path) -> Result<(Vec<WalEntry>, RecoveryResult, u64)> {
        let data = fs::read(path)?;
        let mut entries = Vec::new();
        let mut result = RecoveryResult::default();
        let mut pos = 0usize;

        while data.len() - pos >= HEADER_SIZE {
            let header = &data[pos..pos + HEADER_SIZE];
            let len = u32::from_le_bytes([header[0], header[1], header[2], header[3]]) as usize;
            let crc = u32::from_le_bytes([header[4], header[5], header[6], header[7]]);
            let start = pos + HEADER_SIZE;
            if data.len() - start < len {
                break;
            }

            let entry = match WalEntry::from_payload(&data[start..start + len], crc) {
                Ok(entry) => entry,
                Err(e) => {
                    warn!(offset = pos, error = %e, "stopping WAL replay at bad frame");
                    break;
                }
            };

            result.entries_recovered += 1;
            result.last_lsn = entry.lsn;
            entries.push(entry);
            pos = start + len;
        }

        result.valid_len = pos as u64;
        Ok((entries, result, data.len() as u64))
    }
}
