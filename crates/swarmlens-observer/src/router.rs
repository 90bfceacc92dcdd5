//! Axum router construction for the facade API.
//!
//! Assembles all routes into a single [`Router`] with CORS and request
//! tracing middleware.

use std::sync::Arc;

use axum::routing::get;
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::state::AppState;

/// Build the complete Axum router for the facade server.
///
/// The router includes:
/// - `GET /` -- liveness text
/// - `GET /containers` -- container summaries
/// - `GET /services` -- service summaries
///
/// Any other path gets a JSON `404`. CORS allows any origin with `GET`
/// only, since every endpoint is a read.
pub fn build_router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([axum::http::Method::GET])
        .allow_headers(Any);

    Router::new()
        .route("/", get(handlers::index))
        .route("/containers", get(handlers::list_containers))
        .route("/services", get(handlers::list_services))
        .fallback(handlers::not_found)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
