//! Domain layer - Core types for container health export.
//!
//! Pure data and conversions, no I/O (hexagonal architecture inner ring).
//! Adapters produce `ContainerRecord`s, the HTTP layer consumes
//! `MetricSample`s.

pub mod container;
pub mod sample;

// Re-export core types for convenience
pub use container::{ContainerRecord, HEALTHY_SENTINEL, HealthStatus};
pub use sample::{METRIC_NAME, MetricSample, samples_from_records};
