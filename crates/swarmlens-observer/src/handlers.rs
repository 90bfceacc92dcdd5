//! REST endpoint handlers for the facade server.
//!
//! Each handler queries the daemon through the shared [`AppState`],
//! reshapes the records, and encodes them as JSON. Daemon failures become
//! [`ObserverError`] responses instead of aborting the request.
//!
//! # Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | `GET` | `/` | Liveness, plain text `hey` |
//! | `GET` | `/containers` | Container `{id, image}` list |
//! | `GET` | `/services` | Service replica summaries |

use std::sync::Arc;

use axum::extract::State;
use axum::http::Uri;
use axum::Json;
use swarmlens_core::summary::{summarize_containers, summarize_services};
use swarmlens_types::{ContainerSummary, ServiceSummary};

use crate::error::ObserverError;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// GET / -- liveness
// ---------------------------------------------------------------------------

/// Fixed plain-text acknowledgment. Does not touch the daemon.
pub async fn index() -> &'static str {
    "hey"
}

// ---------------------------------------------------------------------------
// GET /containers -- list containers
// ---------------------------------------------------------------------------

/// List the daemon's containers as `{id, image}` pairs.
pub async fn list_containers(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<ContainerSummary>>, ObserverError> {
    let containers = state.daemon.list_containers().await?;
    tracing::debug!(count = containers.len(), "containers listed");
    Ok(Json(summarize_containers(&containers)))
}

// ---------------------------------------------------------------------------
// GET /services -- service summaries
// ---------------------------------------------------------------------------

/// Summarize every swarm service with its current and target replicas.
///
/// The service and task listings are independent reads issued
/// concurrently; the first one to fail decides the error.
pub async fn list_services(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<ServiceSummary>>, ObserverError> {
    let (services, tasks) =
        tokio::try_join!(state.daemon.list_services(), state.daemon.list_tasks())?;
    tracing::debug!(
        services = services.len(),
        tasks = tasks.len(),
        "services and tasks listed"
    );
    Ok(Json(summarize_services(&services, &tasks)))
}

// ---------------------------------------------------------------------------
// Fallback
// ---------------------------------------------------------------------------

/// JSON 404 for any path without a route.
pub async fn not_found(uri: Uri) -> ObserverError {
    ObserverError::NotFound(uri.path().to_owned())
}
