//! Record Module
//!
//! Binary codec for a row of named fields.
//!
//! ## Wire Format
//! ```text
//! ┌──────────────┬──────────┬───────────────┬───────────┐
//! │ NameLen (4)  │   Name   │ ValueLen (4)  │   Value   │  field 0
//! ├──────────────┼──────────┼───────────────┼───────────┤
//! │ NameLen (4)  │   Name   │ ValueLen (4)  │   Value   │  field 1
//! └──────────────┴──────────┴───────────────┴───────────┘
//!   ... repeated for each field, in row order ...
//! ```
//!
//! - Length prefixes are little-endian `u32`
//! - No record-level length header, no trailing marker, no checksum
//! - The buffer length delimits the record

mod codec;

pub use codec::{decode_all, decode_filtered, encode, encoded_len, LEN_PREFIX_SIZE};

/// A name/value pair within a row
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Field {
    pub name: Vec<u8>,
    pub value: Vec<u8>,
}

impl Field {
    pub fn new(name: impl Into<Vec<u8>>, value: impl Into<Vec<u8>>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }

    /// Encoded size of this field including both length prefixes
    pub fn encoded_len(&self) -> usize {
        2 * LEN_PREFIX_SIZE + self.name.len() + self.value.len()
    }
}

/// Ordered sequence of fields; order matches write order
pub type Row = Vec<Field>;
