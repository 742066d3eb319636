//! Health Prober - Liveness and Per-Container Health Collection
//!
//! Answers the two questions the HTTP layer asks on every request:
//! - Can the exporter reach the runtime at all? (`is_healthy`)
//! - What healthcheck status does each running container report?
//!   (`list_container_health`)
//!
//! Every call is a fresh query. Nothing is cached between scrapes.

use std::sync::Arc;
use std::time::{Duration, Instant};

use futures_util::stream::{self, StreamExt};
use tracing::{debug, info, instrument, warn};

use crate::config::DockerConfig;
use crate::domain::container::{ContainerRecord, display_name};
use crate::ports::container_runtime::{
  ContainerInspection, ContainerRef, ContainerRuntime, RuntimeError,
};

/// Collection limits for a single scrape.
#[derive(Debug, Clone)]
pub struct ProberConfig {
  /// Deadline for the whole list + inspect pass.
  pub timeout: Duration,
  /// Maximum inspect calls in flight at once.
  pub max_concurrent_inspects: usize,
}

impl Default for ProberConfig {
  fn default() -> Self {
    Self {
      timeout: Duration::from_secs(5),
      max_concurrent_inspects: 8,
    }
  }
}

impl From<&DockerConfig> for ProberConfig {
  fn from(config: &DockerConfig) -> Self {
    Self {
      timeout: Duration::from_secs(config.timeout_seconds),
      max_concurrent_inspects: config.max_concurrent_inspects,
    }
  }
}

/// Queries a container runtime for liveness and healthcheck status.
pub struct HealthProber {
  /// Runtime port, owned for the lifetime of the process.
  runtime: Arc<dyn ContainerRuntime>,
  /// Collection limits.
  config: ProberConfig,
}

impl HealthProber {
  /// Create a new prober over the given runtime.
  pub fn new(runtime: Arc<dyn ContainerRuntime>, config: ProberConfig) -> Self {
    Self { runtime, config }
  }

  /// Whether the runtime's control socket is present.
  pub async fn is_healthy(&self) -> bool {
    self.runtime.is_available().await
  }

  /// Inspect every running container and keep those with a healthcheck.
  ///
  /// Output follows the runtime's list order. Containers without a
  /// healthcheck are omitted. Malformed or vanished containers are
  /// skipped with a log line; runtime-wide failures abort the pass.
  ///
  /// # Errors
  /// Returns `RuntimeError::Unavailable` if listing or an inspect call
  /// cannot reach the runtime, or `RuntimeError::Timeout` if the pass
  /// exceeds the configured deadline.
  #[instrument(skip(self))]
  pub async fn list_container_health(&self) -> Result<Vec<ContainerRecord>, RuntimeError> {
    let started = Instant::now();

    let records = tokio::time::timeout(self.config.timeout, self.collect())
      .await
      .map_err(|_| RuntimeError::Timeout(self.config.timeout))??;

    info!(
      samples = records.len(),
      elapsed_ms = started.elapsed().as_millis() as u64,
      "Container health collected"
    );

    Ok(records)
  }

  /// List then inspect with bounded concurrency.
  async fn collect(&self) -> Result<Vec<ContainerRecord>, RuntimeError> {
    let containers = self.runtime.list_running_containers().await?;
    debug!(containers = containers.len(), "Running containers listed");

    let concurrency = self.config.max_concurrent_inspects.max(1);
    let inspections: Vec<_> = stream::iter(containers)
      .map(|container| async move {
        let result = self.runtime.inspect_container(&container.id).await;
        (container, result)
      })
      .buffered(concurrency)
      .collect()
      .await;

    let mut records = Vec::with_capacity(inspections.len());
    for (container, result) in inspections {
      if let Some(record) = Self::to_record(container, result)? {
        records.push(record);
      }
    }

    Ok(records)
  }

  /// Turn one inspect outcome into a record, a skip, or a fatal error.
  fn to_record(
    container: ContainerRef,
    result: Result<ContainerInspection, RuntimeError>,
  ) -> Result<Option<ContainerRecord>, RuntimeError> {
    let inspection = match result {
      Ok(inspection) => inspection,
      Err(RuntimeError::NotFound(id)) => {
        debug!(id = %id, "Container vanished before inspect, skipping");
        return Ok(None);
      }
      Err(e @ RuntimeError::Malformed { .. }) => {
        warn!(error = %e, "Skipping container with malformed inspect response");
        return Ok(None);
      }
      Err(e) => return Err(e),
    };

    let Some(status) = inspection.health_status else {
      debug!(id = %container.id, "No healthcheck configured, skipping");
      return Ok(None);
    };

    let name = inspection
      .name
      .as_deref()
      .map(display_name)
      .filter(|n| !n.is_empty())
      .unwrap_or_else(|| display_name(&container.name))
      .to_string();

    Ok(Some(ContainerRecord {
      id: container.id,
      name,
      status,
      observed_at_ms: chrono::Utc::now().timestamp_millis(),
    }))
  }
}
