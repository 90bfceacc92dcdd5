//! Error types for the swarmlens server binary.
//!
//! [`AppError`] wraps every failure mode between process start and the
//! server accepting connections. All of them are fatal.

/// Top-level error for the swarmlens server binary.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Configuration loading or validation failed.
    #[error("config error: {source}")]
    Config {
        /// The underlying config error.
        #[from]
        source: swarmlens_core::config::ConfigError,
    },

    /// The Docker daemon could not be reached at startup.
    #[error("cannot reach Docker daemon at {host}: {source}")]
    Daemon {
        /// The daemon address that was tried.
        host: String,
        /// The underlying daemon error.
        source: swarmlens_core::daemon::DaemonError,
    },

    /// The HTTP server failed to bind or serve.
    #[error("server error: {source}")]
    Server {
        /// The underlying server error.
        #[from]
        source: swarmlens_observer::ServerError,
    },
}
