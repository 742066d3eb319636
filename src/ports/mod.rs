//! Ports Layer - Hexagonal Architecture Boundaries
//!
//! Defines the interfaces (traits) that the usecases layer
//! requires from the outside world. Adapters implement these traits.
//!
//! Port categories:
//! - `ContainerRuntime`: container listing, inspection and reachability

pub mod container_runtime;

pub use container_runtime::{ContainerInspection, ContainerRef, ContainerRuntime, RuntimeError};
