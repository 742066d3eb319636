//! Metrics Adapters
//!
//! Prometheus text exposition of container health samples.

pub mod exposition;

pub use exposition::{CONTENT_TYPE, encode_samples};
