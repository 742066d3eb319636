//! Docker Engine Adapter
//!
//! Implements the `ContainerRuntime` port against the local Docker
//! daemon via bollard.

pub mod runtime;

pub use runtime::DockerRuntime;
