//! Daemon-neutral records returned by a `swarmlens_core::daemon::DaemonApi`
//! implementation.
//!
//! These are the facade's view of the orchestration daemon's objects,
//! reduced to the fields the endpoints need. Adapters are responsible
//! for rejecting responses that cannot be reduced (missing identifiers,
//! replicated services without a target) before a record is built.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::enums::TaskState;

/// A container as listed by the daemon.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContainerRecord {
    /// Daemon-assigned container identifier.
    pub id: String,
    /// Image reference the container was created from.
    pub image: String,
}

/// Scheduling mode of a swarm service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "mode")]
pub enum ServiceMode {
    /// Fixed number of replicas spread over the cluster.
    Replicated {
        /// Desired replica count.
        replicas: u64,
    },
    /// One task per eligible node, or any other non-replicated mode
    /// (jobs included).
    Global,
}

/// A swarm service as listed by the daemon.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceRecord {
    /// Daemon-assigned service identifier.
    pub id: String,
    /// Service name from the spec annotations.
    pub name: String,
    /// Image reference from the task template's container spec.
    pub image: String,
    /// Scheduling mode.
    pub mode: ServiceMode,
    /// When the service object was last updated, if reported.
    pub updated_at: Option<DateTime<Utc>>,
}

/// A swarm task as listed by the daemon.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskRecord {
    /// Daemon-assigned task identifier.
    pub id: String,
    /// Identifier of the owning service. Absent for orphaned tasks.
    pub service_id: Option<String>,
    /// Observed lifecycle state.
    pub state: TaskState,
}
