//! HTTP facade over a Docker daemon's swarm introspection API.
//!
//! This crate provides an Axum HTTP server that exposes:
//!
//! - **Liveness** (`GET /`) returning plain-text `hey`
//! - **Containers** (`GET /containers`) as `{id, image}` pairs
//! - **Services** (`GET /services`) with current/target replica counts,
//!   image reference, and last update time
//!
//! # Architecture
//!
//! Every request queries the daemon through one shared, read-only
//! [`DaemonApi`] handle held in [`AppState`], reshapes the records, and
//! encodes JSON. There is no cache and no background work; each response
//! is a fresh snapshot. Daemon failures map to `5xx` JSON errors via
//! [`ObserverError`] and never stop the server.
//!
//! [`DaemonApi`]: swarmlens_core::daemon::DaemonApi
//! [`ObserverError`]: error::ObserverError

pub mod error;
pub mod handlers;
pub mod router;
pub mod server;
pub mod startup;
pub mod state;

// Re-export primary types for convenience.
pub use router::build_router;
pub use server::{shutdown_signal, start_server, ServerConfig, ServerError};
pub use startup::{spawn_server, RunningServer, StartupError};
pub use state::AppState;
