//! Key mapping
//!
//! The harness hands the adapter opaque byte-string keys. Backends that order
//! by a fixed-width integer get a `u64` built from the first 8 key bytes in
//! native byte order. That integer is an opaque correlate of the key: it is not
//! the decimal value of the string and there is no way back to the original
//! key.

use crate::error::{BenchKvError, Result};

/// Number of key bytes consumed by [`to_numeric`]
pub const NUMERIC_KEY_WIDTH: usize = 8;

/// Reinterpret the first 8 bytes of `key` as a native-endian `u64`
///
/// Bytes past the eighth are ignored, so keys sharing a prefix map to the
/// same numeric key.
pub fn to_numeric(key: &[u8]) -> Result<u64> {
    let prefix: [u8; NUMERIC_KEY_WIDTH] = key
        .get(..NUMERIC_KEY_WIDTH)
        .and_then(|p| p.try_into().ok())
        .ok_or(BenchKvError::KeyTooShort { len: key.len() })?;
    Ok(u64::from_ne_bytes(prefix))
}

/// Number of distinct keys [`ordinal_key`] can produce
///
/// Eight decimal digits: every ordinal below this limit has a distinct
/// 8-byte prefix, so the keys stay distinct on numeric-keyed backends.
pub const ORDINAL_KEY_LIMIT: u64 = 100_000_000;

/// Zero-padded decimal key for a load ordinal
///
/// Ordinals at or past [`ORDINAL_KEY_LIMIT`] would grow a ninth digit and
/// collide with earlier keys on their first 8 bytes, so they are rejected.
pub fn ordinal_key(ordinal: u64) -> Result<String> {
    if ordinal >= ORDINAL_KEY_LIMIT {
        return Err(BenchKvError::Config(format!(
            "key ordinal {} exceeds the {}-key space",
            ordinal, ORDINAL_KEY_LIMIT
        )));
    }
    Ok(format!("{:08}", ordinal))
}

/// A backend's native key type, derivable from an opaque harness key
pub trait BackendKey: Sized {
    fn from_opaque(key: &[u8]) -> Result<Self>;
}

impl BackendKey for u64 {
    fn from_opaque(key: &[u8]) -> Result<Self> {
        to_numeric(key)
    }
}

impl BackendKey for Vec<u8> {
    fn from_opaque(key: &[u8]) -> Result<Self> {
        Ok(key.to_vec())
    }
}
