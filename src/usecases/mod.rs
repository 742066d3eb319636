//! Use Cases Layer - Application Logic
//!
//! Orchestrates domain types with port interfaces.
//!
//! Use cases:
//! - `HealthProber`: runtime liveness and per-container health collection

pub mod health_prober;

pub use health_prober::{HealthProber, ProberConfig};
