//! Docker Engine adapter for the facade.
//!
//! [`DockerDaemon`] implements [`DaemonApi`] on top of a [`bollard`]
//! client negotiated at a pinned API version. It reduces bollard's
//! all-optional models to [`swarmlens_types`] records and sorts failures
//! into the [`DaemonError`] kinds the HTTP layer maps to status codes.
//!
//! # Hosts
//!
//! - `unix:///var/run/docker.sock` -- local socket
//! - `tcp://host:2375` or `http://host:2375` -- plain TCP, no TLS
//!
//! bollard connects lazily, so [`DockerDaemon::connect`] only validates
//! the address. Call [`DaemonApi::ping`] to prove the daemon is there.

use async_trait::async_trait;
use bollard::errors::Error as BollardError;
use bollard::models::{ContainerSummary as DockerContainer, Service, Task};
use bollard::query_parameters::{ListContainersOptions, ListServicesOptions, ListTasksOptions};
use bollard::{ClientVersion, Docker};
use chrono::{DateTime, Utc};
use swarmlens_core::config::ApiVersion;
use swarmlens_core::daemon::{DaemonApi, DaemonError};
use swarmlens_types::{ContainerRecord, ServiceMode, ServiceRecord, TaskRecord, TaskState};
use tracing::debug;

/// A read-only Docker daemon client shared by every request.
#[derive(Clone)]
pub struct DockerDaemon {
    client: Docker,
    host: String,
}

impl std::fmt::Debug for DockerDaemon {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DockerDaemon")
            .field("host", &self.host)
            .finish_non_exhaustive()
    }
}

impl DockerDaemon {
    /// Build a client for `host`, pinned to `version`, with a per-request
    /// timeout of `timeout_secs`.
    ///
    /// # Errors
    ///
    /// Returns [`DaemonError::Unavailable`] if the host scheme is not
    /// supported or bollard rejects the address.
    pub fn connect(
        host: &str,
        version: ApiVersion,
        timeout_secs: u64,
    ) -> Result<Self, DaemonError> {
        let client_version = ClientVersion {
            major_version: version.major,
            minor_version: version.minor,
        };

        let connected = if host.starts_with("unix://") {
            Docker::connect_with_unix(host, timeout_secs, &client_version)
        } else if host.starts_with("tcp://") || host.starts_with("http://") {
            Docker::connect_with_http(host, timeout_secs, &client_version)
        } else {
            return Err(DaemonError::Unavailable {
                message: format!(
                    "unsupported Docker host {host:?}: expected unix://, tcp://, or http://"
                ),
            });
        };
        let client = connected.map_err(|e| DaemonError::Unavailable {
            message: format!("failed to create Docker client for {host}: {e}"),
        })?;

        debug!(host, api_version = %version, "Docker client created");

        Ok(Self {
            client,
            host: host.to_owned(),
        })
    }
}

#[async_trait]
impl DaemonApi for DockerDaemon {
    async fn ping(&self) -> Result<(), DaemonError> {
        self.client.ping().await.map(drop).map_err(daemon_error)
    }

    async fn list_containers(&self) -> Result<Vec<ContainerRecord>, DaemonError> {
        let containers = self
            .client
            .list_containers(None::<ListContainersOptions>)
            .await
            .map_err(daemon_error)?;
        containers.into_iter().map(container_record).collect()
    }

    async fn list_services(&self) -> Result<Vec<ServiceRecord>, DaemonError> {
        let services = self
            .client
            .list_services(None::<ListServicesOptions>)
            .await
            .map_err(daemon_error)?;
        services.into_iter().map(service_record).collect()
    }

    async fn list_tasks(&self) -> Result<Vec<TaskRecord>, DaemonError> {
        let tasks = self
            .client
            .list_tasks(None::<ListTasksOptions>)
            .await
            .map_err(daemon_error)?;
        Ok(tasks.into_iter().map(task_record).collect())
    }
}

// ---------------------------------------------------------------------------
// Model reduction
// ---------------------------------------------------------------------------

/// Sort a bollard error into a [`DaemonError`] kind.
fn daemon_error(err: BollardError) -> DaemonError {
    match err {
        BollardError::DockerResponseServerError {
            status_code,
            message,
        } => DaemonError::Api {
            status: status_code,
            message,
        },
        err @ (BollardError::JsonDataError { .. } | BollardError::JsonSerdeError { .. }) => {
            DaemonError::malformed(err.to_string())
        }
        err => DaemonError::Unavailable {
            message: err.to_string(),
        },
    }
}

fn container_record(container: DockerContainer) -> Result<ContainerRecord, DaemonError> {
    let id = container
        .id
        .ok_or_else(|| DaemonError::malformed("container without an id"))?;
    Ok(ContainerRecord {
        id,
        image: container.image.unwrap_or_default(),
    })
}

fn service_record(service: Service) -> Result<ServiceRecord, DaemonError> {
    let id = service
        .id
        .ok_or_else(|| DaemonError::malformed("service without an id"))?;
    let spec = service
        .spec
        .ok_or_else(|| DaemonError::malformed(format!("service {id} has no spec")))?;

    let mode = match spec.mode.and_then(|m| m.replicated) {
        Some(replicated) => {
            let replicas = replicated.replicas.ok_or_else(|| {
                DaemonError::malformed(format!("replicated service {id} has no replica count"))
            })?;
            let replicas = u64::try_from(replicas).map_err(|_e| {
                DaemonError::malformed(format!(
                    "replicated service {id} has negative replica count {replicas}"
                ))
            })?;
            ServiceMode::Replicated { replicas }
        }
        None => ServiceMode::Global,
    };

    let image = spec
        .task_template
        .and_then(|t| t.container_spec)
        .and_then(|c| c.image)
        .unwrap_or_default();

    let updated_at = service
        .updated_at
        .map(|raw| parse_timestamp(&id, &raw))
        .transpose()?;

    Ok(ServiceRecord {
        id,
        name: spec.name.unwrap_or_default(),
        image,
        mode,
        updated_at,
    })
}

fn task_record(task: Task) -> TaskRecord {
    let state = task
        .status
        .and_then(|s| s.state)
        .map_or(TaskState::Unknown, |s| TaskState::from(s.to_string().as_str()));
    TaskRecord {
        id: task.id.unwrap_or_default(),
        service_id: task.service_id,
        state,
    }
}

fn parse_timestamp(service_id: &str, raw: &str) -> Result<DateTime<Utc>, DaemonError> {
    DateTime::parse_from_rfc3339(raw)
        .map(|t| t.with_timezone(&Utc))
        .map_err(|e| {
            DaemonError::malformed(format!(
                "service {service_id} has invalid UpdatedAt {raw:?}: {e}"
            ))
        })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use bollard::models::{
        ServiceSpec, ServiceSpecMode, ServiceSpecModeReplicated, TaskSpec,
        TaskSpecContainerSpec, TaskState as DockerTaskState, TaskStatus,
    };
    use chrono::TimeZone;

    use super::*;

    fn docker_service(id: &str, mode: Option<ServiceSpecMode>) -> Service {
        Service {
            id: Some(id.to_owned()),
            updated_at: Some(String::from("2024-06-01T10:00:00.123456789Z")),
            spec: Some(ServiceSpec {
                name: Some(String::from("web")),
                mode,
                task_template: Some(TaskSpec {
                    container_spec: Some(TaskSpecContainerSpec {
                        image: Some(String::from("nginx:1.27@sha256:aa11")),
                        ..Default::default()
                    }),
                    ..Default::default()
                }),
                ..Default::default()
            }),
            ..Default::default()
        }
    }

    fn replicated(replicas: Option<i64>) -> ServiceSpecMode {
        ServiceSpecMode {
            replicated: Some(ServiceSpecModeReplicated { replicas }),
            ..Default::default()
        }
    }

    #[test]
    fn container_maps_id_and_image() {
        let record = container_record(DockerContainer {
            id: Some(String::from("4f1c2a9e0b7d")),
            image: Some(String::from("redis:7")),
            ..Default::default()
        })
        .unwrap();
        assert_eq!(record.id, "4f1c2a9e0b7d");
        assert_eq!(record.image, "redis:7");
    }

    #[test]
    fn container_without_id_is_malformed() {
        let result = container_record(DockerContainer::default());
        assert!(matches!(result, Err(DaemonError::Malformed { .. })));
    }

    #[test]
    fn replicated_service_maps_all_fields() {
        let record = service_record(docker_service("svc-1", Some(replicated(Some(3))))).unwrap();
        assert_eq!(record.id, "svc-1");
        assert_eq!(record.name, "web");
        assert_eq!(record.image, "nginx:1.27@sha256:aa11");
        assert_eq!(record.mode, ServiceMode::Replicated { replicas: 3 });

        let expected = Utc
            .with_ymd_and_hms(2024, 6, 1, 10, 0, 0)
            .unwrap()
            .checked_add_signed(chrono::Duration::nanoseconds(123_456_789))
            .unwrap();
        assert_eq!(record.updated_at, Some(expected));
    }

    #[test]
    fn replicated_service_without_count_is_malformed() {
        let result = service_record(docker_service("svc-1", Some(replicated(None))));
        assert!(matches!(result, Err(DaemonError::Malformed { .. })));
    }

    #[test]
    fn negative_replica_count_is_malformed() {
        let result = service_record(docker_service("svc-1", Some(replicated(Some(-1)))));
        assert!(matches!(result, Err(DaemonError::Malformed { .. })));
    }

    #[test]
    fn non_replicated_modes_are_global() {
        let global = Some(ServiceSpecMode::default());
        assert_eq!(
            service_record(docker_service("g", global)).unwrap().mode,
            ServiceMode::Global
        );
        assert_eq!(
            service_record(docker_service("g", None)).unwrap().mode,
            ServiceMode::Global
        );
    }

    #[test]
    fn service_without_spec_is_malformed() {
        let service = Service {
            id: Some(String::from("svc-1")),
            ..Default::default()
        };
        assert!(matches!(
            service_record(service),
            Err(DaemonError::Malformed { .. })
        ));
    }

    #[test]
    fn bad_timestamp_is_malformed() {
        let mut service = docker_service("svc-1", Some(replicated(Some(1))));
        service.updated_at = Some(String::from("yesterday"));
        assert!(matches!(
            service_record(service),
            Err(DaemonError::Malformed { .. })
        ));
    }

    #[test]
    fn task_state_is_carried_over() {
        let record = task_record(Task {
            id: Some(String::from("t1")),
            service_id: Some(String::from("svc-1")),
            status: Some(TaskStatus {
                state: Some(DockerTaskState::RUNNING),
                ..Default::default()
            }),
            ..Default::default()
        });
        assert_eq!(record.state, TaskState::Running);
        assert_eq!(record.service_id.as_deref(), Some("svc-1"));
    }

    #[test]
    fn task_without_status_is_unknown() {
        assert_eq!(task_record(Task::default()).state, TaskState::Unknown);
    }

    #[test]
    fn server_error_maps_to_api() {
        let err = daemon_error(BollardError::DockerResponseServerError {
            status_code: 503,
            message: String::from("This node is not a swarm manager."),
        });
        assert_eq!(
            err,
            DaemonError::Api {
                status: 503,
                message: String::from("This node is not a swarm manager."),
            }
        );
    }

    #[test]
    fn unsupported_host_scheme_is_rejected() {
        let version = ApiVersion { major: 1, minor: 39 };
        let result = DockerDaemon::connect("ssh://user@host", version, 5);
        assert!(matches!(result, Err(DaemonError::Unavailable { .. })));
    }

    #[tokio::test]
    async fn unreachable_daemon_queries_are_unavailable() {
        let version = ApiVersion { major: 1, minor: 39 };
        let daemon = DockerDaemon::connect("tcp://127.0.0.1:1", version, 2).unwrap();

        assert!(matches!(
            daemon.list_containers().await,
            Err(DaemonError::Unavailable { .. })
        ));
        assert!(matches!(
            daemon.list_services().await,
            Err(DaemonError::Unavailable { .. })
        ));
        assert!(matches!(
            daemon.list_tasks().await,
            Err(DaemonError::Unavailable { .. })
        ));
    }
}
