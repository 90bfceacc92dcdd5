//! Background startup helper for running the facade inside another task.
//!
//! [`spawn_server`] binds eagerly, so address errors surface to the
//! caller, then serves on a background Tokio task. The returned
//! [`RunningServer`] reports the bound address and stops the server on
//! [`RunningServer::shutdown`].
//!
//! # Usage
//!
//! ```rust,ignore
//! use swarmlens_observer::startup::spawn_server;
//! use swarmlens_observer::{AppState, ServerConfig};
//! use std::sync::Arc;
//!
//! let running = spawn_server(&ServerConfig::default(), state).await?;
//! println!("listening on {}", running.local_addr());
//! running.shutdown().await?;
//! ```

use std::net::SocketAddr;
use std::sync::Arc;

use tokio::sync::oneshot;
use tokio::task::JoinHandle;

use crate::server::{bind, serve, ServerConfig, ServerError};
use crate::state::AppState;

/// Errors that can occur when spawning or stopping the facade server.
#[derive(Debug, thiserror::Error)]
pub enum StartupError {
    /// The server failed to bind or exited with an error.
    #[error("server error: {0}")]
    Server(#[from] ServerError),

    /// The background task panicked or was aborted.
    #[error("server task failed: {0}")]
    Join(String),
}

/// A facade server running on a background task.
#[derive(Debug)]
pub struct RunningServer {
    addr: SocketAddr,
    stop: oneshot::Sender<()>,
    handle: JoinHandle<Result<(), ServerError>>,
}

impl RunningServer {
    /// The address the server actually bound (useful with port `0`).
    pub const fn local_addr(&self) -> SocketAddr {
        self.addr
    }

    /// Stop accepting connections, let in-flight requests finish, and
    /// wait for the background task to exit.
    ///
    /// # Errors
    ///
    /// Returns [`StartupError`] if the server had failed or its task
    /// did not complete normally.
    pub async fn shutdown(self) -> Result<(), StartupError> {
        // The receiver is gone only if the server already exited; the
        // join below reports why.
        let _ = self.stop.send(());
        self.handle
            .await
            .map_err(|e| StartupError::Join(format!("{e}")))??;
        Ok(())
    }
}

/// Bind the configured address and serve the facade on a background task.
///
/// # Errors
///
/// Returns [`StartupError::Server`] if the address cannot be bound.
pub async fn spawn_server(
    config: &ServerConfig,
    state: Arc<AppState>,
) -> Result<RunningServer, StartupError> {
    let listener = bind(config).await?;
    let addr = listener
        .local_addr()
        .map_err(|e| ServerError::Bind(format!("no local address: {e}")))?;

    let (stop, stopped) = oneshot::channel::<()>();
    let handle = tokio::spawn(async move {
        let result = serve(listener, state, async move {
            let _ = stopped.await;
        })
        .await;
        if let Err(ref e) = result {
            tracing::error!(error = %e, "facade server exited with error");
        }
        result
    });

    tracing::info!(%addr, "facade server spawned on background task");

    Ok(RunningServer { addr, stop, handle })
}
