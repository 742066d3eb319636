//! Configuration Module - TOML-based Exporter Configuration
//!
//! Loads configuration from an optional `config.toml` with
//! environment variable and CLI overrides. Every field has a
//! default, so the exporter runs with no file at all.

pub mod loader;

use serde::Deserialize;

/// Default Docker control socket.
pub const DEFAULT_SOCKET_PATH: &str = "/var/run/docker.sock";

/// Default HTTP listen port.
pub const DEFAULT_PORT: u16 = 8080;

/// Top-level exporter configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AppConfig {
  /// HTTP listener and logging.
  #[serde(default)]
  pub exporter: ExporterConfig,
  /// Docker daemon connection.
  #[serde(default)]
  pub docker: DockerConfig,
  /// Exposition options.
  #[serde(default)]
  pub metrics: MetricsConfig,
}

/// HTTP listener and logging configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ExporterConfig {
  /// Log level (trace, debug, info, warn, error).
  #[serde(default = "default_log_level")]
  pub log_level: String,
  /// Address the HTTP server binds to.
  #[serde(default = "default_listen_address")]
  pub listen_address: String,
}

/// Docker daemon connection configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct DockerConfig {
  /// Path to the Docker control socket.
  #[serde(default = "default_socket_path")]
  pub socket_path: String,
  /// Deadline for one scrape's list + inspect pass (seconds).
  #[serde(default = "default_timeout")]
  pub timeout_seconds: u64,
  /// Maximum concurrent inspect calls per scrape.
  #[serde(default = "default_max_concurrent_inspects")]
  pub max_concurrent_inspects: usize,
}

/// Exposition configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct MetricsConfig {
  /// Append a millisecond timestamp to every sample.
  #[serde(default = "default_true")]
  pub include_timestamp: bool,
}

impl Default for ExporterConfig {
  fn default() -> Self {
    Self {
      log_level: default_log_level(),
      listen_address: default_listen_address(),
    }
  }
}

impl Default for DockerConfig {
  fn default() -> Self {
    Self {
      socket_path: default_socket_path(),
      timeout_seconds: default_timeout(),
      max_concurrent_inspects: default_max_concurrent_inspects(),
    }
  }
}

impl Default for MetricsConfig {
  fn default() -> Self {
    Self {
      include_timestamp: default_true(),
    }
  }
}

// Default value functions for serde

fn default_log_level() -> String {
  "info".to_string()
}

fn default_listen_address() -> String {
  format!("0.0.0.0:{DEFAULT_PORT}")
}

fn default_socket_path() -> String {
  DEFAULT_SOCKET_PATH.to_string()
}

fn default_timeout() -> u64 {
  5
}

fn default_max_concurrent_inspects() -> usize {
  8
}

fn default_true() -> bool {
  true
}
