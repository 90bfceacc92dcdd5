//! Shared type definitions for the swarmlens daemon facade.
//!
//! # Modules
//!
//! - [`enums`] -- Task lifecycle states
//! - [`records`] -- Daemon-neutral container, service, and task records
//! - [`summaries`] -- JSON response shapes served over HTTP

pub mod enums;
pub mod records;
pub mod summaries;

// Re-export all public types at crate root for convenience.
pub use enums::TaskState;
pub use records::{ContainerRecord, ServiceMode, ServiceRecord, TaskRecord};
pub use summaries::{ContainerSummary, ServiceSummary};
