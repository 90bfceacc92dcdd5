//! Orchestration daemon seam and an in-memory implementation.
//!
//! The facade only ever reads from the daemon: list containers, list
//! services, list tasks. The [`DaemonApi`] trait abstracts the client so
//! the HTTP layer can be driven by the real Docker adapter in production
//! and by [`StaticDaemon`] in tests.
//!
//! A single handle is built at startup and shared as
//! `Arc<dyn DaemonApi>` by every request handler. Implementations hold no
//! mutable state and must tolerate concurrent read-only calls.

use async_trait::async_trait;
use swarmlens_types::{ContainerRecord, ServiceRecord, TaskRecord};

/// Errors that can occur while querying the daemon.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DaemonError {
    /// The daemon could not be reached (connection refused, socket
    /// missing, transport failure, client timeout).
    #[error("daemon unavailable: {message}")]
    Unavailable {
        /// Description of the transport failure.
        message: String,
    },

    /// The daemon answered with an error status.
    #[error("daemon returned {status}: {message}")]
    Api {
        /// HTTP status code returned by the daemon.
        status: u16,
        /// Error message from the daemon.
        message: String,
    },

    /// The daemon answered, but a required field was missing or invalid.
    #[error("malformed daemon response: {message}")]
    Malformed {
        /// What was wrong with the response.
        message: String,
    },
}

impl DaemonError {
    /// Shorthand for a [`DaemonError::Malformed`] error.
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::Malformed {
            message: message.into(),
        }
    }
}

/// Read-only view of an orchestration daemon.
///
/// Every method is a single pure read against the daemon's current state.
/// No retries happen here; a failure is returned to the caller as is.
#[async_trait]
pub trait DaemonApi: Send + Sync {
    /// Check that the daemon is reachable.
    ///
    /// # Errors
    ///
    /// Returns [`DaemonError`] if the daemon does not answer.
    async fn ping(&self) -> Result<(), DaemonError>;

    /// List containers with the daemon's default (unfiltered) options.
    ///
    /// # Errors
    ///
    /// Returns [`DaemonError`] if the query fails or the response cannot
    /// be reduced to [`ContainerRecord`]s.
    async fn list_containers(&self) -> Result<Vec<ContainerRecord>, DaemonError>;

    /// List all swarm services, in daemon order.
    ///
    /// # Errors
    ///
    /// Returns [`DaemonError`] if the query fails or the response cannot
    /// be reduced to [`ServiceRecord`]s.
    async fn list_services(&self) -> Result<Vec<ServiceRecord>, DaemonError>;

    /// List all swarm tasks across every service.
    ///
    /// # Errors
    ///
    /// Returns [`DaemonError`] if the query fails or the response cannot
    /// be reduced to [`TaskRecord`]s.
    async fn list_tasks(&self) -> Result<Vec<TaskRecord>, DaemonError>;
}

/// A daemon backed by fixed, in-memory record lists.
///
/// When `failure` is set, every call returns a clone of that error, which
/// lets tests exercise the HTTP error path.
#[derive(Debug, Clone, Default)]
pub struct StaticDaemon {
    /// Containers returned by [`DaemonApi::list_containers`].
    pub containers: Vec<ContainerRecord>,
    /// Services returned by [`DaemonApi::list_services`].
    pub services: Vec<ServiceRecord>,
    /// Tasks returned by [`DaemonApi::list_tasks`].
    pub tasks: Vec<TaskRecord>,
    /// Error returned by every call, if set.
    pub failure: Option<DaemonError>,
}

impl StaticDaemon {
    /// Create an empty daemon.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a daemon whose every call fails with `error`.
    pub fn failing(error: DaemonError) -> Self {
        Self {
            failure: Some(error),
            ..Self::default()
        }
    }

    fn check(&self) -> Result<(), DaemonError> {
        self.failure.clone().map_or(Ok(()), Err)
    }
}

#[async_trait]
impl DaemonApi for StaticDaemon {
    async fn ping(&self) -> Result<(), DaemonError> {
        self.check()
    }

    async fn list_containers(&self) -> Result<Vec<ContainerRecord>, DaemonError> {
        self.check()?;
        Ok(self.containers.clone())
    }

    async fn list_services(&self) -> Result<Vec<ServiceRecord>, DaemonError> {
        self.check()?;
        Ok(self.services.clone())
    }

    async fn list_tasks(&self) -> Result<Vec<TaskRecord>, DaemonError> {
        self.check()?;
        Ok(self.tasks.clone())
    }
}
