//! JSON response shapes served by the facade endpoints.
//!
//! Both types are transient: built per request from the daemon's
//! current snapshot and dropped once encoded.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One entry of the `GET /containers` response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContainerSummary {
    /// Daemon-assigned container identifier.
    pub id: String,
    /// Image reference.
    pub image: String,
}

/// One entry of the `GET /services` response.
///
/// `current_replicas` is a point-in-time count of running tasks and may
/// already be stale when the response is read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceSummary {
    /// Service name.
    pub image_name: String,
    /// Full image reference, usually `name:tag@sha256:<digest>`.
    pub image_name_hash: String,
    /// Tasks of this service observed in the `running` state.
    pub current_replicas: u64,
    /// Replica target, or `1` for global services.
    pub max_replicas: u64,
    /// Service metadata update time.
    pub last_updated: Option<DateTime<Utc>>,
    /// `true` unless the service is in replicated mode.
    pub is_global: bool,
}
