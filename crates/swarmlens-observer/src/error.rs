//! Error types for the facade HTTP layer.
//!
//! [`ObserverError`] is the translation point between internal failures
//! and HTTP. Its [`IntoResponse`](axum::response::IntoResponse)
//! implementation picks the status code, logs the cause, and writes a
//! small JSON body. A failed request never takes the process down.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use swarmlens_core::daemon::DaemonError;

/// Errors that can occur in the facade API layer.
#[derive(Debug, thiserror::Error)]
pub enum ObserverError {
    /// A daemon query failed or returned an unusable response.
    #[error(transparent)]
    Daemon(#[from] DaemonError),

    /// No route matches the request path.
    #[error("not found: {0}")]
    NotFound(String),
}

impl ObserverError {
    /// The HTTP status this error maps to.
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::Daemon(DaemonError::Unavailable { .. }) => StatusCode::SERVICE_UNAVAILABLE,
            Self::Daemon(DaemonError::Api { .. } | DaemonError::Malformed { .. }) => {
                StatusCode::BAD_GATEWAY
            }
            Self::NotFound(_) => StatusCode::NOT_FOUND,
        }
    }
}

impl IntoResponse for ObserverError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = self.to_string();

        if let Self::Daemon(ref cause) = self {
            tracing::warn!(error = %cause, status = status.as_u16(), "daemon query failed");
        }

        let body = serde_json::json!({
            "error": message,
            "status": status.as_u16(),
        });

        (status, axum::Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unavailable_maps_to_503() {
        let err = ObserverError::from(DaemonError::Unavailable {
            message: String::from("connection refused"),
        });
        assert_eq!(err.status(), StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(err.to_string(), "daemon unavailable: connection refused");
    }

    #[test]
    fn api_and_malformed_map_to_502() {
        let api = ObserverError::from(DaemonError::Api {
            status: 500,
            message: String::from("boom"),
        });
        let malformed = ObserverError::from(DaemonError::malformed("missing id"));
        assert_eq!(api.status(), StatusCode::BAD_GATEWAY);
        assert_eq!(malformed.status(), StatusCode::BAD_GATEWAY);
    }

    #[test]
    fn response_carries_status() {
        let response = ObserverError::NotFound(String::from("/nope")).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
