//! Adapter implementation
//!
//! Routes each logical operation to the implementation for the row format
//! bound at `init()`.

use std::sync::Arc;

use tracing::{debug, trace, warn};

use crate::backend::{Backend, WriteOptions};
use crate::config::Properties;
use crate::error::{BenchKvError, Result};
use crate::key::BackendKey;
use crate::record::{self, Field, Row};
use super::{Db, RowFormat, SharedHandle};

/// Per-worker adapter over a shared engine
///
/// Holds no locks on the data path; concurrency is the engine's concern.
pub struct Adapter<B: Backend> {
    handle: Arc<SharedHandle<B>>,
    session: Option<Session<B>>,
}

/// State that exists only between `init()` and `cleanup()`
struct Session<B> {
    backend: Arc<B>,
    format: RowFormat,
    field_count: usize,
}

impl<B: Backend> Adapter<B> {
    pub fn new(handle: Arc<SharedHandle<B>>) -> Self {
        Self {
            handle,
            session: None,
        }
    }

    pub fn is_initialized(&self) -> bool {
        self.session.is_some()
    }

    /// Row format bound at init, if initialized
    pub fn format(&self) -> Option<RowFormat> {
        self.session.as_ref().map(|s| s.format)
    }

    /// Configured fields per record, if initialized
    pub fn field_count(&self) -> Option<usize> {
        self.session.as_ref().map(|s| s.field_count)
    }

    pub fn handle(&self) -> &Arc<SharedHandle<B>> {
        &self.handle
    }

    fn session(&self) -> Result<&Session<B>> {
        self.session.as_ref().ok_or(BenchKvError::NotInitialized)
    }
}

impl<B: Backend> Db for Adapter<B> {
    fn name(&self) -> &'static str {
        B::NAME
    }

    fn init(&mut self, props: &Properties) -> Result<()> {
        if self.session.is_some() {
            return Ok(());
        }

        let format_key = format!("{}.format", B::NAME);
        let format: RowFormat = props.get_or(&format_key, RowFormat::DEFAULT).parse()?;
        let field_count = props.field_count()?;

        let backend = self.handle.attach(props)?;
        debug!(backend = B::NAME, %format, field_count, "adapter initialized");

        self.session = Some(Session {
            backend,
            format,
            field_count,
        });
        Ok(())
    }

    fn cleanup(&mut self) -> Result<()> {
        // Drop our engine reference before detaching so the last releaser
        // closes an engine nobody else is holding.
        match self.session.take() {
            Some(session) => {
                drop(session);
                self.handle.detach()?;
                Ok(())
            }
            None => Ok(()),
        }
    }

    fn read(
        &self,
        _table: &str,
        key: &[u8],
        fields: Option<&[Vec<u8>]>,
    ) -> Result<Option<Row>> {
        let session = self.session()?;
        match session.format {
            RowFormat::Single => session.read_single(key, fields),
        }
    }

    fn scan(
        &self,
        _table: &str,
        start_key: &[u8],
        count: usize,
        fields: Option<&[Vec<u8>]>,
    ) -> Result<Vec<Row>> {
        let session = self.session()?;
        match session.format {
            RowFormat::Single => session.scan_single(start_key, count, fields),
        }
    }

    fn update(&self, _table: &str, key: &[u8], row: &[Field]) -> Result<()> {
        let session = self.session()?;
        match session.format {
            RowFormat::Single => session.write_single(key, row, WriteOptions::update()),
        }
    }

    fn insert(&self, _table: &str, key: &[u8], row: &[Field]) -> Result<()> {
        let session = self.session()?;
        match session.format {
            RowFormat::Single => session.write_single(key, row, WriteOptions::insert()),
        }
    }

    fn delete(&self, _table: &str, key: &[u8]) -> Result<()> {
        let session = self.session()?;
        match session.format {
            RowFormat::Single => session.delete_single(key),
        }
    }
}

impl<B: Backend> Drop for Adapter<B> {
    fn drop(&mut self) {
        if self.session.is_some() {
            if let Err(e) = self.cleanup() {
                warn!(backend = B::NAME, error = %e, "cleanup on drop failed");
            }
        }
    }
}

// =============================================================================
// Single-row format
// =============================================================================

impl<B: Backend> Session<B> {
    fn read_single(&self, key: &[u8], fields: Option<&[Vec<u8>]>) -> Result<Option<Row>> {
        let native = B::Key::from_opaque(key)?;
        match self.backend.get(&native)? {
            Some(data) => self.decode(&data, fields).map(Some),
            None => {
                trace!(backend = B::NAME, key = ?native, "read miss");
                Ok(None)
            }
        }
    }

    fn scan_single(
        &self,
        start_key: &[u8],
        count: usize,
        fields: Option<&[Vec<u8>]>,
    ) -> Result<Vec<Row>> {
        let start = B::Key::from_opaque(start_key)?;
        self.backend
            .get_range(&start, count)?
            .iter()
            .map(|(_, data)| self.decode(data, fields))
            .collect()
    }

    fn write_single(&self, key: &[u8], row: &[Field], options: WriteOptions) -> Result<()> {
        let native = B::Key::from_opaque(key)?;
        let data = record::encode(row)?;
        self.backend.put(native, &data, options)
    }

    fn delete_single(&self, key: &[u8]) -> Result<()> {
        let native = B::Key::from_opaque(key)?;
        self.backend.delete(&native)
    }

    /// Full decode checks the field count; a projection is checked by the codec
    fn decode(&self, data: &[u8], fields: Option<&[Vec<u8>]>) -> Result<Row> {
        match fields {
            Some(filter) => record::decode_filtered(data, filter),
            None => {
                let row = record::decode_all(data)?;
                if row.len() != self.field_count {
                    return Err(BenchKvError::FieldCountMismatch {
                        expected: self.field_count,
                        actual: row.len(),
                    });
                }
                Ok(row)
            }
        }
    }
}
