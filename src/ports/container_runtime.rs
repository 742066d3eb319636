//! Container Runtime Port - Docker Daemon Interface
//!
//! Defines the trait the health prober needs from a container runtime:
//! a cheap reachability probe, the list of running containers, and a
//! per-container inspect that surfaces the healthcheck status.

use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::container::HealthStatus;

/// Minimal identity of a running container from the list call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContainerRef {
  /// Runtime-assigned container id.
  pub id: String,
  /// Display name from the list call (may be empty).
  pub name: String,
}

/// Result of inspecting a single container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContainerInspection {
  /// Container id the inspection belongs to.
  pub id: String,
  /// Display name as reported by inspect, if any.
  pub name: Option<String>,
  /// Healthcheck status; `None` when no healthcheck is configured.
  pub health_status: Option<HealthStatus>,
}

/// Failures talking to the container runtime.
#[derive(Debug, Error)]
pub enum RuntimeError {
  /// Socket missing, connection refused, or transport failure.
  #[error("container runtime unavailable: {0}")]
  Unavailable(String),

  /// The runtime did not answer within the scrape deadline.
  #[error("container runtime timed out after {0:?}")]
  Timeout(Duration),

  /// The runtime answered with something we could not interpret.
  #[error("malformed runtime response for container {id}: {reason}")]
  Malformed {
    /// Container the response was for.
    id: String,
    /// What was wrong with it.
    reason: String,
  },

  /// The container disappeared between list and inspect.
  #[error("container {0} not found")]
  NotFound(String),
}

impl RuntimeError {
  /// Whether this error means the runtime as a whole cannot be reached.
  ///
  /// Per-container errors (`Malformed`, `NotFound`) only skip that container.
  pub fn is_unavailable(&self) -> bool {
    matches!(self, Self::Unavailable(_) | Self::Timeout(_))
  }
}

/// Trait for container runtime clients.
///
/// Implementors own their connection. The prober holds one behind an
/// `Arc<dyn ContainerRuntime>` for the lifetime of the process.
#[async_trait]
pub trait ContainerRuntime: Send + Sync + 'static {
  /// Whether the runtime's control socket is present.
  ///
  /// Must not make a network call; a filesystem stat at most.
  async fn is_available(&self) -> bool;

  /// List currently running containers, in runtime order.
  async fn list_running_containers(&self) -> Result<Vec<ContainerRef>, RuntimeError>;

  /// Inspect a single container by id.
  async fn inspect_container(&self, id: &str) -> Result<ContainerInspection, RuntimeError>;
}
