//! Docker Runtime - bollard-backed ContainerRuntime
//!
//! Talks to the Docker Engine API over the local unix socket.
//! Liveness is a filesystem stat of the socket path; listing and
//! inspection go through bollard with a per-request timeout.

use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use async_trait::async_trait;
use bollard::Docker;
use bollard::container::{InspectContainerOptions, ListContainersOptions};
use bollard::errors::Error as BollardError;
use bollard::models::{ContainerInspectResponse, HealthStatusEnum};
use tracing::{debug, warn};

use crate::config::DockerConfig;
use crate::domain::container::HealthStatus;
use crate::ports::container_runtime::{
    ContainerInspection, ContainerRef, ContainerRuntime, RuntimeError,
};

/// Docker Engine client bound to one control socket.
pub struct DockerRuntime {
    /// bollard client, created on first use.
    docker: OnceLock<Docker>,
    /// Socket checked for liveness and dialled by the client.
    socket_path: PathBuf,
    /// Per-request timeout handed to bollard (seconds).
    timeout_seconds: u64,
}

impl DockerRuntime {
    /// Create a runtime for the configured socket.
    ///
    /// Does not touch the socket. Building a bollard client can fail
    /// while the socket is missing, so the client is created on the
    /// first list or inspect call and the exporter still starts (and
    /// serves 500s) while the daemon is down.
    pub fn new(config: &DockerConfig) -> Self {
        Self {
            docker: OnceLock::new(),
            socket_path: PathBuf::from(&config.socket_path),
            timeout_seconds: config.timeout_seconds,
        }
    }

    /// Path of the control socket.
    pub fn socket_path(&self) -> &Path {
        &self.socket_path
    }

    /// Shared bollard client, connecting on first use.
    fn client(&self) -> Result<Docker, RuntimeError> {
        if let Some(docker) = self.docker.get() {
            return Ok(docker.clone());
        }

        let path = self.socket_path.to_string_lossy();
        let docker =
            Docker::connect_with_unix(&path, self.timeout_seconds, bollard::API_DEFAULT_VERSION)
                .map_err(|e| map_error(None, e))?;

        debug!(socket = %path, "Docker client created");
        Ok(self.docker.get_or_init(|| docker).clone())
    }
}

#[async_trait]
impl ContainerRuntime for DockerRuntime {
    async fn is_available(&self) -> bool {
        tokio::fs::try_exists(&self.socket_path)
            .await
            .unwrap_or(false)
    }

    async fn list_running_containers(&self) -> Result<Vec<ContainerRef>, RuntimeError> {
        let options = Some(ListContainersOptions::<String> {
            all: false,
            ..Default::default()
        });

        let summaries = self
            .client()?
            .list_containers(options)
            .await
            .map_err(|e| map_error(None, e))?;

        let mut containers = Vec::with_capacity(summaries.len());
        for summary in summaries {
            let Some(id) = summary.id.filter(|id| !id.is_empty()) else {
                warn!(names = ?summary.names, "Container summary without id, skipping");
                continue;
            };
            let name = summary
                .names
                .and_then(|names| names.into_iter().next())
                .unwrap_or_default();
            containers.push(ContainerRef { id, name });
        }

        Ok(containers)
    }

    async fn inspect_container(&self, id: &str) -> Result<ContainerInspection, RuntimeError> {
        let response = self
            .client()?
            .inspect_container(id, None::<InspectContainerOptions>)
            .await
            .map_err(|e| map_error(Some(id), e))?;

        debug!(id, "Container inspected");

        Ok(ContainerInspection {
            id: id.to_string(),
            name: response.name.clone(),
            health_status: health_status(&response),
        })
    }
}

/// Extract `State.Health.Status`, treating "no healthcheck" as absent.
pub fn health_status(response: &ContainerInspectResponse) -> Option<HealthStatus> {
    let status = response.state.as_ref()?.health.as_ref()?.status.as_ref()?;

    match status {
        HealthStatusEnum::EMPTY | HealthStatusEnum::NONE => None,
        HealthStatusEnum::STARTING => Some(HealthStatus::Starting),
        HealthStatusEnum::HEALTHY => Some(HealthStatus::Healthy),
        HealthStatusEnum::UNHEALTHY => Some(HealthStatus::Unhealthy),
    }
}

/// Map a bollard error onto the runtime error taxonomy.
fn map_error(id: Option<&str>, err: BollardError) -> RuntimeError {
    match err {
        BollardError::DockerResponseServerError {
            status_code: 404, ..
        } => RuntimeError::NotFound(id.unwrap_or_default().to_string()),
        BollardError::JsonDataError { message, .. } => RuntimeError::Malformed {
            id: id.unwrap_or_default().to_string(),
            reason: message,
        },
        BollardError::JsonSerdeError { err } => RuntimeError::Malformed {
            id: id.unwrap_or_default().to_string(),
            reason: err.to_string(),
        },
        other => RuntimeError::Unavailable(other.to_string()),
    }
}
