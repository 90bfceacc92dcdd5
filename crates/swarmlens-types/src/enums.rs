//! Enumeration types shared across the swarmlens workspace.

use serde::{Deserialize, Serialize};

/// Lifecycle state of a swarm task as reported by the daemon.
///
/// Mirrors the Docker Engine `TaskState` values. Anything the daemon
/// omits or that this crate does not recognize maps to
/// [`TaskState::Unknown`] rather than failing the whole listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskState {
    /// Task was created.
    New,
    /// Task was allocated resources by the orchestrator.
    Allocated,
    /// Task is waiting for resources.
    Pending,
    /// Task was assigned to a node.
    Assigned,
    /// Node accepted the task.
    Accepted,
    /// Node is preparing the task (pulling the image, etc.).
    Preparing,
    /// Task is ready to start.
    Ready,
    /// Task is starting.
    Starting,
    /// Task is running.
    Running,
    /// Task exited without error.
    Complete,
    /// Task was shut down by the orchestrator.
    Shutdown,
    /// Task exited with an error.
    Failed,
    /// Node rejected the task.
    Rejected,
    /// Task is marked for removal.
    Remove,
    /// Node holding the task went away.
    Orphaned,
    /// State was absent or unrecognized.
    #[default]
    Unknown,
}

impl TaskState {
    /// Whether this task counts toward a service's current replicas.
    pub const fn is_running(self) -> bool {
        matches!(self, Self::Running)
    }
}

impl From<&str> for TaskState {
    fn from(value: &str) -> Self {
        match value {
            "new" => Self::New,
            "allocated" => Self::Allocated,
            "pending" => Self::Pending,
            "assigned" => Self::Assigned,
            "accepted" => Self::Accepted,
            "preparing" => Self::Preparing,
            "ready" => Self::Ready,
            "starting" => Self::Starting,
            "running" => Self::Running,
            "complete" => Self::Complete,
            "shutdown" => Self::Shutdown,
            "failed" => Self::Failed,
            "rejected" => Self::Rejected,
            "remove" => Self::Remove,
            "orphaned" => Self::Orphaned,
            _ => Self::Unknown,
        }
    }
}
