//! Metric Samples
//!
//! Converts container records into the gauge samples exported on
//! `/metrics`. One record maps to exactly one sample.

use super::container::ContainerRecord;

/// Name of the exported gauge.
pub const METRIC_NAME: &str = "container_inspect_state_health_status";

/// Help text attached to the gauge family.
pub const METRIC_HELP: &str =
    "Docker container healthcheck status (1 = healthy, 0 = any other status)";

/// A single gauge sample for one container.
#[derive(Debug, Clone, PartialEq)]
pub struct MetricSample {
    /// `id` label.
    pub id: String,
    /// `name` label.
    pub name: String,
    /// `value` label: the raw status string.
    pub status: String,
    /// 1.0 when healthy, 0.0 otherwise.
    pub value: f64,
    /// Sample timestamp (Unix ms), omitted when `None`.
    pub timestamp_ms: Option<i64>,
}

impl MetricSample {
    /// Build the sample for a container record.
    pub fn from_record(record: &ContainerRecord, include_timestamp: bool) -> Self {
        Self {
            id: record.id.clone(),
            name: record.name.clone(),
            status: record.status.as_str().to_string(),
            value: if record.status.is_healthy() { 1.0 } else { 0.0 },
            timestamp_ms: include_timestamp.then_some(record.observed_at_ms),
        }
    }
}

/// Build one sample per record, preserving order.
pub fn samples_from_records(
    records: &[ContainerRecord],
    include_timestamp: bool,
) -> Vec<MetricSample> {
    records
        .iter()
        .map(|r| MetricSample::from_record(r, include_timestamp))
        .collect()
}
