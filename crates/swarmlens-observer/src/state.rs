//! Shared application state for the facade server.
//!
//! [`AppState`] holds the one daemon handle every request uses. It is
//! built once at startup, wrapped in [`Arc`], and injected via Axum's
//! `State` extractor. Nothing in it is mutable, so no lock is needed;
//! concurrent reads rely on the daemon client being safe to share.

use std::fmt;
use std::sync::Arc;

use swarmlens_core::daemon::DaemonApi;

/// Shared state for the Axum application.
#[derive(Clone)]
pub struct AppState {
    /// Read-only handle to the orchestration daemon.
    pub daemon: Arc<dyn DaemonApi>,
}

impl AppState {
    /// Create application state around a daemon handle.
    pub fn new(daemon: Arc<dyn DaemonApi>) -> Self {
        Self { daemon }
    }
}

impl fmt::Debug for AppState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppState").finish_non_exhaustive()
    }
}
