//! Adapter factory
//!
//! Maps engine names to adapters. The factory owns one shared handle per
//! engine, so every adapter it creates for the same name shares one engine.

use std::sync::Arc;

use crate::backend::{Backend, LogStore, PageStore};
use crate::error::{BenchKvError, Result};
use super::{Adapter, Db, SharedHandle};

/// Creates adapters by engine name
pub struct DbFactory {
    page_store: Arc<SharedHandle<PageStore>>,
    log_store: Arc<SharedHandle<LogStore>>,
}

impl DbFactory {
    /// Engine names accepted by [`DbFactory::create`]
    pub const NAMES: [&'static str; 2] = [PageStore::NAME, LogStore::NAME];

    pub fn new() -> Self {
        Self {
            page_store: Arc::new(SharedHandle::new()),
            log_store: Arc::new(SharedHandle::new()),
        }
    }

    /// Create an uninitialized adapter for `name`
    pub fn create(&self, name: &str) -> Result<Box<dyn Db>> {
        if name == PageStore::NAME {
            Ok(Box::new(Adapter::new(Arc::clone(&self.page_store))))
        } else if name == LogStore::NAME {
            Ok(Box::new(Adapter::new(Arc::clone(&self.log_store))))
        } else {
            Err(BenchKvError::UnknownBackend(name.to_string()))
        }
    }

    pub fn page_store_handle(&self) -> &Arc<SharedHandle<PageStore>> {
        &self.page_store
    }

    pub fn log_store_handle(&self) -> &Arc<SharedHandle<LogStore>> {
        &self.log_store
    }
}

impl Default for DbFactory {
    fn default() -> Self {
        Self::new()
    }
}
