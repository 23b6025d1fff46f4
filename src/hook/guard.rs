//! Serialized write-enable critical section
//!
//! Kernel write protection is a single global toggle, not a per-buffer
//! one, so every rewrite in the system must pass through one mutual
//! exclusion point. The guard acquires permission only immediately before
//! a real rewrite and releases it immediately after; the no-match path
//! never touches it.

use std::sync::{Arc, Mutex};

use log::{debug, warn};

use crate::error::Result;
use crate::MODULE;

use super::host::HookHost;

/// scoped write-enable window around a single rewrite
pub struct WriteGuard<H: HookHost> {
    host: Arc<H>,
    section: Mutex<()>,
}

impl<H: HookHost> WriteGuard<H> {
    pub fn new(host: Arc<H>) -> Self {
        Self {
            host,
            section: Mutex::new(()),
        }
    }

    /// run `f` with kernel write protection lifted
    ///
    /// concurrent callers serialize on the section; only one thread is
    /// ever inside the writing-enabled state. when the host refuses the
    /// toggle, `f` never runs and the error is returned for the caller to
    /// log and skip. a failed restore is logged, not propagated, since the
    /// rewrite itself already happened.
    pub fn with_write<R>(&self, f: impl FnOnce() -> R) -> Result<R> {
        let _section = self
            .section
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());

        self.host.set_kernel_writing(true)?;
        debug!(target: MODULE, "obtained write permissions");

        let out = f();

        match self.host.set_kernel_writing(false) {
            Ok(()) => debug!(target: MODULE, "restored write permissions"),
            Err(err) => warn!(target: MODULE, "{err}"),
        }

        Ok(out)
    }
}
