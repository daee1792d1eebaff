//! Adapter Module
//!
//! Binds the record codec, key mapping and a shared engine behind the
//! harness's five logical operations.
//!
//! ## Lifecycle
//! ```text
//!   Uninitialized ──init()──▶ Opened (refcount > 0) ──cleanup()──▶ Closed
//! ```
//! The engine is opened by the first `init()` across all adapters sharing a
//! [`SharedHandle`] and closed by the last `cleanup()`.
//!
//! ## Results
//! - `Ok(Some(row))` / `Ok(())`: success
//! - `Ok(None)` from `read`: key not found
//! - `Err(_)`: integrity or engine fault; the operation is abandoned

mod dispatch;
mod factory;
mod handle;

use std::fmt;
use std::str::FromStr;

use crate::config::Properties;
use crate::error::{BenchKvError, Result};
use crate::record::{Field, Row};

pub use dispatch::Adapter;
pub use factory::DbFactory;
pub use handle::SharedHandle;

/// The operation surface the benchmark harness drives
pub trait Db: Send {
    /// Name of the engine behind this adapter
    fn name(&self) -> &'static str;

    /// Attach to the shared engine and bind a row format
    fn init(&mut self, props: &Properties) -> Result<()>;

    /// Detach from the shared engine
    fn cleanup(&mut self) -> Result<()>;

    /// Read a record; `fields` selects a projection in record field order
    fn read(&self, table: &str, key: &[u8], fields: Option<&[Vec<u8>]>) -> Result<Option<Row>>;

    /// Read up to `count` records starting at `start_key`
    fn scan(
        &self,
        table: &str,
        start_key: &[u8],
        count: usize,
        fields: Option<&[Vec<u8>]>,
    ) -> Result<Vec<Row>>;

    fn update(&self, table: &str, key: &[u8], row: &[Field]) -> Result<()>;

    fn insert(&self, table: &str, key: &[u8], row: &[Field]) -> Result<()>;

    fn delete(&self, table: &str, key: &[u8]) -> Result<()>;
}

/// How rows are laid out in the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowFormat {
    /// One encoded record per key
    Single,
}

impl RowFormat {
    pub const DEFAULT: &'static str = "single";

    pub fn as_str(self) -> &'static str {
        match self {
            RowFormat::Single => "single",
        }
    }
}

impl FromStr for RowFormat {
    type Err = BenchKvError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "single" => Ok(RowFormat::Single),
            other => Err(BenchKvError::UnknownFormat(other.to_string())),
        }
    }
}

impl fmt::Display for RowFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
