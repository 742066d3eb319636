//! Adapters Layer - Hexagonal Architecture Outer Ring
//!
//! Implements the port traits defined in `crate::ports` with concrete
//! external dependencies, and exposes the exporter over HTTP.
//!
//! Adapter categories:
//! - `docker`: Docker Engine API client (bollard, unix socket)
//! - `http`: axum server with /healthcheck and /metrics
//! - `metrics`: Prometheus text exposition

pub mod docker;
pub mod http;
pub mod metrics;
