//! Record codec
//!
//! Encoding and decoding functions for rows.

use bytes::{BufMut, Bytes, BytesMut};

use crate::error::{BenchKvError, Result};
use super::{Field, Row};

/// Size of each length prefix
pub const LEN_PREFIX_SIZE: usize = 4;

// =============================================================================
// Encoding
// =============================================================================

/// Exact encoded size of `row`
pub fn encoded_len(row: &[Field]) -> usize {
    row.iter().map(Field::encoded_len).sum()
}

/// Encode a row
///
/// Format per field: name_len (4) + name + value_len (4) + value
pub fn encode(row: &[Field]) -> Result<Bytes> {
    let mut buf = BytesMut::with_capacity(encoded_len(row));

    for field in row {
        put_component(&mut buf, &field.name)?;
        put_component(&mut buf, &field.value)?;
    }

    Ok(buf.freeze())
}

fn put_component(buf: &mut BytesMut, data: &[u8]) -> Result<()> {
    let len = u32::try_from(data.len())
        .map_err(|_| BenchKvError::FieldTooLarge { len: data.len() })?;
    buf.put_u32_le(len);
    buf.put_slice(data);
    Ok(())
}

// =============================================================================
// Decoding
// =============================================================================

/// Decode every field in the buffer
///
/// Succeeds only when the buffer is consumed exactly.
pub fn decode_all(bytes: &[u8]) -> Result<Row> {
    let mut reader = FieldReader::new(bytes);
    let mut row = Vec::new();

    while let Some(field) = reader.next_field()? {
        row.push(field);
    }

    Ok(row)
}

/// Decode only the fields named in `filter`
///
/// This is a linear merge against the record's field order, not a lookup:
/// a field is kept when its name equals the next expected filter entry. It
/// stops once every filter entry has matched; fields after the last match
/// are never parsed. A filter entry that never matches in order is a
/// `FilterMismatch`.
pub fn decode_filtered<N: AsRef<[u8]>>(bytes: &[u8], filter: &[N]) -> Result<Row> {
    let mut reader = FieldReader::new(bytes);
    let mut row = Vec::with_capacity(filter.len());
    let mut wanted = filter.iter().peekable();

    while let Some(next) = wanted.peek() {
        let Some(field) = reader.next_field()? else {
            break;
        };
        if field.name == next.as_ref() {
            row.push(field);
            wanted.next();
        }
    }

    if let Some(missing) = wanted.next() {
        return Err(BenchKvError::FilterMismatch {
            missing: String::from_utf8_lossy(missing.as_ref()).into_owned(),
            matched: row.len(),
            requested: filter.len(),
        });
    }

    Ok(row)
}

/// Sequential cursor over encoded fields
struct FieldReader<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> FieldReader<'a> {
    fn new(buf: &'a [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    /// Next field, or `None` at the exact end of the buffer
    fn next_field(&mut self) -> Result<Option<Field>> {
        if self.pos == self.buf.len() {
            return Ok(None);
        }
        let name = self.component()?;
        let value = self.component()?;
        Ok(Some(Field { name, value }))
    }

    fn component(&mut self) -> Result<Vec<u8>> {
        let prefix = self.take(LEN_PREFIX_SIZE)?;
        let len = u32::from_le_bytes([prefix[0], prefix[1], prefix[2], prefix[3]]) as usize;
        Ok(self.take(len)?.to_vec())
    }

    fn take(&mut self, needed: usize) -> Result<&'a [u8]> {
        let remaining = self.buf.len() - self.pos;
        if needed > remaining {
            return Err(BenchKvError::Truncated {
                offset: self.pos,
                needed,
                remaining,
            });
        }
        let slice = &self.buf[self.pos..self.pos + needed];
        self.pos += needed;
        Ok(slice)
    }
}
