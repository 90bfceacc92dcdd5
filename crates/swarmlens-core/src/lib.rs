//! Configuration, daemon access, and response shaping for swarmlens.
//!
//! This crate owns everything between the HTTP layer and the Docker
//! client: what to connect to, how the daemon is queried, and how its
//! records become response summaries.
//!
//! # Modules
//!
//! - [`config`] -- Configuration loading from `swarmlens.yaml` into
//!   strongly-typed structs, with environment overrides.
//! - [`daemon`] -- [`DaemonApi`] trait, [`DaemonError`], and the
//!   in-memory [`StaticDaemon`].
//! - [`summary`] -- Container and service summary construction,
//!   including running-replica aggregation.
//!
//! [`DaemonApi`]: daemon::DaemonApi
//! [`DaemonError`]: daemon::DaemonError
//! [`StaticDaemon`]: daemon::StaticDaemon

pub mod config;
pub mod daemon;
pub mod summary;

pub use config::{ApiVersion, ConfigError, FacadeConfig};
pub use daemon::{DaemonApi, DaemonError, StaticDaemon};
