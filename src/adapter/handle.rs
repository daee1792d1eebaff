//! Shared backend handle
//!
//! One engine instance is shared by every adapter attached to the handle.
//! The first attach physically opens it, the last detach physically closes
//! it. Both transitions run under the handle's mutex, so any interleaving of
//! concurrent attaches and detaches yields exactly one open and one close per
//! cycle.

use std::sync::Arc;

use parking_lot::Mutex;
use tracing::{debug, info};

use crate::backend::Backend;
use crate::config::Properties;
use crate::error::{BenchKvError, Result};

/// Refcounted owner of a shared engine
pub struct SharedHandle<B: Backend> {
    state: Mutex<HandleState<B>>,
}

struct HandleState<B> {
    backend: Option<Arc<B>>,
    refs: usize,
    /// Physical opens performed over the handle's lifetime
    opens: u64,
    /// Physical closes performed over the handle's lifetime
    closes: u64,
}

impl<B: Backend> SharedHandle<B> {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(HandleState {
                backend: None,
                refs: 0,
                opens: 0,
                closes: 0,
            }),
        }
    }

    /// Attach one user, opening the engine if this is the first
    ///
    /// If the open fails the reference count is left unchanged.
    pub fn attach(&self, props: &Properties) -> Result<Arc<B>> {
        let mut state = self.state.lock();

        if let Some(backend) = &state.backend {
            let backend = Arc::clone(backend);
            state.refs += 1;
            debug!(backend = B::NAME, refs = state.refs, "attached to open backend");
            return Ok(backend);
        }

        let options = B::configure(props)?;
        let backend = B::open(options).map_err(|e| match e {
            BenchKvError::BackendOpen(_) => e,
            other => BenchKvError::BackendOpen(format!("{}: {}", B::NAME, other)),
        })?;
        let backend = Arc::new(backend);

        state.backend = Some(Arc::clone(&backend));
        state.refs = 1;
        state.opens += 1;
        info!(backend = B::NAME, "opened shared backend");

        Ok(backend)
    }

    /// Detach one user, closing the engine if this was the last
    ///
    /// Returns true if this call closed the engine.
    pub fn detach(&self) -> Result<bool> {
        let mut state = self.state.lock();

        if state.refs == 0 {
            return Err(BenchKvError::NotInitialized);
        }
        state.refs -= 1;
        if state.refs > 0 {
            debug!(backend = B::NAME, refs = state.refs, "detached from backend");
            return Ok(false);
        }

        let backend = state.backend.take().ok_or(BenchKvError::NotInitialized)?;
        state.closes += 1;

        let stats = backend.stats();
        backend.close()?;
        info!(backend = B::NAME, %stats, "closed shared backend");

        Ok(true)
    }

    /// Current number of attached users
    pub fn ref_count(&self) -> usize {
        self.state.lock().refs
    }

    pub fn is_open(&self) -> bool {
        self.state.lock().backend.is_some()
    }

    pub fn open_count(&self) -> u64 {
        self.state.lock().opens
    }

    pub fn close_count(&self) -> u64 {
        self.state.lock().closes
    }

    /// The open engine, if any
    pub fn backend(&self) -> Option<Arc<B>> {
        self.state.lock().backend.clone()
    }
}

impl<B: Backend> Default for SharedHandle<B> {
    fn default() -> Self {
        Self::new()
    }
}
