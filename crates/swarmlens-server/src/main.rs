//! swarmlens server binary.
//!
//! Serves a small JSON view of a Docker swarm: running containers and a
//! per-service replica summary. Every request is answered from a fresh
//! daemon query; nothing is cached or persisted.
//!
//! # Startup Sequence
//!
//! 1. Load configuration (`SWARMLENS_CONFIG`, default `swarmlens.yaml`)
//! 2. Initialize structured logging (tracing)
//! 3. Create the Docker client at the pinned API version and ping it
//! 4. Serve HTTP until `Ctrl-C` or `SIGTERM`
//!
//! Any failure before the server is listening is fatal: it is logged and
//! the process exits non-zero.

mod docker;
mod error;

use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Context as _;
use swarmlens_core::config::{ConfigError, FacadeConfig, LoggingConfig};
use swarmlens_core::daemon::{DaemonApi, DaemonError};
use swarmlens_observer::{shutdown_signal, start_server, AppState, ServerConfig};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use crate::docker::DockerDaemon;
use crate::error::AppError;

/// Environment variable naming the config file.
const CONFIG_PATH_VAR: &str = "SWARMLENS_CONFIG";

/// Config file used when [`CONFIG_PATH_VAR`] is unset.
const DEFAULT_CONFIG_PATH: &str = "swarmlens.yaml";

/// Application entry point.
///
/// Loads configuration first so the log level and format can come from
/// it; a configuration error is still reported through the default
/// subscriber.
#[tokio::main]
async fn main() -> ExitCode {
    let config_path = std::env::var(CONFIG_PATH_VAR)
        .map_or_else(|_| PathBuf::from(DEFAULT_CONFIG_PATH), PathBuf::from);
    let loaded = FacadeConfig::load(&config_path);

    let logging = loaded
        .as_ref()
        .map(|c| c.logging.clone())
        .unwrap_or_default();
    init_logging(&logging);

    info!("swarmlens starting");

    match run(&config_path, loaded).await {
        Ok(()) => {
            info!("swarmlens shutdown complete");
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!(error = %format!("{e:#}"), "swarmlens failed");
            ExitCode::FAILURE
        }
    }
}

/// Connect to the daemon and serve until a shutdown signal arrives.
async fn run(
    config_path: &Path,
    loaded: Result<FacadeConfig, ConfigError>,
) -> anyhow::Result<()> {
    let config = loaded
        .map_err(AppError::from)
        .with_context(|| format!("loading {}", config_path.display()))?;
    info!(
        config_file = %config_path.display(),
        found = config_path.exists(),
        host = config.server.host,
        port = config.server.port,
        docker_host = config.docker.resolved_host(),
        api_version = config.docker.api_version,
        "configuration loaded"
    );

    let daemon = connect_daemon(&config).await?;

    let state = Arc::new(AppState::new(Arc::new(daemon)));
    let server_config = ServerConfig::from(&config.server);
    start_server(&server_config, state, shutdown_signal())
        .await
        .map_err(AppError::from)
        .context("running HTTP server")?;

    Ok(())
}

/// Build the Docker client and prove the daemon answers.
async fn connect_daemon(config: &FacadeConfig) -> Result<DockerDaemon, AppError> {
    let version = config.docker.api_version()?;
    let host = config.docker.resolved_host();
    let daemon_error = |source: DaemonError| AppError::Daemon {
        host: host.to_owned(),
        source,
    };

    let daemon =
        DockerDaemon::connect(host, version, config.docker.timeout_secs).map_err(daemon_error)?;
    daemon.ping().await.map_err(daemon_error)?;

    info!(host, api_version = %version, "Docker daemon reachable");
    Ok(daemon)
}

/// Install the global tracing subscriber.
///
/// `RUST_LOG` wins over the configured level when set.
fn init_logging(logging: &LoggingConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logging.level));

    if logging.json {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .init();
    }
}
