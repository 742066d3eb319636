//! HTTP Adapter
//!
//! axum server fronting the health prober: `/healthcheck` for
//! exporter liveness, `/metrics` for the Prometheus scrape.

pub mod server;

pub use server::{ExporterServer, ExporterState};
