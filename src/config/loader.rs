//! Configuration Loader - File Loading, Overrides and Validation
//!
//! Resolves the effective configuration: explicit file, else
//! `config.toml` in the working directory, else built-in defaults.
//! CLI/env overrides are applied on top, then everything is validated.

use std::net::SocketAddr;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::info;

use super::AppConfig;

/// Config file picked up implicitly from the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "config.toml";

/// Overrides coming from the command line or environment.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
  /// Replaces the port of `exporter.listen_address`.
  pub port: Option<u16>,
  /// Replaces `docker.socket_path`.
  pub socket_path: Option<String>,
}

/// Load and validate configuration from a TOML file.
///
/// # Errors
/// Returns detailed error if:
/// - File doesn't exist or can't be read
/// - TOML parsing fails
/// - Validation rules are violated
pub fn load_config(path: &str) -> Result<AppConfig> {
  let path = Path::new(path);

  let content = std::fs::read_to_string(path)
    .with_context(|| format!("Failed to read config file: {}", path.display()))?;

  let config: AppConfig = toml::from_str(&content)
    .with_context(|| format!("Failed to parse {}", path.display()))?;

  validate_config(&config)?;

  info!(
    path = %path.display(),
    listen = %config.exporter.listen_address,
    socket = %config.docker.socket_path,
    "Configuration loaded successfully"
  );

  Ok(config)
}

/// Resolve the effective configuration.
///
/// An explicit path must exist. Without one, `config.toml` is used
/// when present and defaults otherwise. Overrides are applied last.
pub fn resolve_config(explicit: Option<&str>, overrides: &ConfigOverrides) -> Result<AppConfig> {
  let mut config = match explicit {
    Some(path) => load_config(path)?,
    None if Path::new(DEFAULT_CONFIG_FILE).exists() => load_config(DEFAULT_CONFIG_FILE)?,
    None => AppConfig::default(),
  };

  apply_overrides(&mut config, overrides)?;
  validate_config(&config)?;

  Ok(config)
}

/// Apply CLI/env overrides to a loaded configuration.
pub fn apply_overrides(config: &mut AppConfig, overrides: &ConfigOverrides) -> Result<()> {
  if let Some(port) = overrides.port {
    let mut addr: SocketAddr = config
      .exporter
      .listen_address
      .parse()
      .with_context(|| format!("Invalid listen_address: {}", config.exporter.listen_address))?;
    addr.set_port(port);
    config.exporter.listen_address = addr.to_string();
  }

  if let Some(socket_path) = &overrides.socket_path {
    config.docker.socket_path = socket_path.clone();
  }

  Ok(())
}

/// Validate all configuration parameters.
fn validate_config(config: &AppConfig) -> Result<()> {
  config
    .exporter
    .listen_address
    .parse::<SocketAddr>()
    .with_context(|| {
      format!(
        "listen_address must be a socket address (e.g. 0.0.0.0:8080), got {}",
        config.exporter.listen_address
      )
    })?;

  anyhow::ensure!(
    !config.docker.socket_path.is_empty(),
    "docker.socket_path must not be empty"
  );
  anyhow::ensure!(
    config.docker.timeout_seconds > 0,
    "docker.timeout_seconds must be positive"
  );
  anyhow::ensure!(
    (1..=64).contains(&config.docker.max_concurrent_inspects),
    "docker.max_concurrent_inspects must be in [1, 64], got {}",
    config.docker.max_concurrent_inspects
  );

  Ok(())
}

#[cfg(test)]
mod tests {
  use std::io::Write;

  use super::*;

  fn write_config(content: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
  }

  #[test]
  fn test_load_nonexistent_file() {
    let result = load_config("nonexistent.toml");
    assert!(result.is_err());
  }

  #[test]
  fn test_example_config_is_valid() {
    let path = concat!(env!("CARGO_MANIFEST_DIR"), "/config.example.toml");
    let config = load_config(path).unwrap();
    assert_eq!(config.docker.max_concurrent_inspects, 8);
  }

  #[test]
  fn test_empty_file_uses_defaults() {
    let file = write_config("");
    let config = load_config(file.path().to_str().unwrap()).unwrap();
    assert_eq!(config.exporter.listen_address, "0.0.0.0:8080");
    assert_eq!(config.docker.socket_path, "/var/run/docker.sock");
    assert_eq!(config.docker.timeout_seconds, 5);
    assert!(config.metrics.include_timestamp);
  }

  #[test]
  fn test_partial_file_overrides_fields() {
    let file = write_config(
      r#"
[docker]
socket_path = "/run/user/1000/docker.sock"
timeout_seconds = 2

[metrics]
include_timestamp = false
"#,
    );
    let config = load_config(file.path().to_str().unwrap()).unwrap();
    assert_eq!(config.docker.socket_path, "/run/user/1000/docker.sock");
    assert_eq!(config.docker.timeout_seconds, 2);
    assert_eq!(config.docker.max_concurrent_inspects, 8);
    assert!(!config.metrics.include_timestamp);
  }

  #[test]
  fn test_unknown_section_rejected() {
    let file = write_config("[tls]\nenabled = true\n");
    assert!(load_config(file.path().to_str().unwrap()).is_err());
  }

  #[test]
  fn test_zero_timeout_rejected() {
    let file = write_config("[docker]\ntimeout_seconds = 0\n");
    assert!(load_config(file.path().to_str().unwrap()).is_err());
  }

  #[test]
  fn test_bad_listen_address_rejected() {
    let file = write_config("[exporter]\nlisten_address = \"localhost\"\n");
    assert!(load_config(file.path().to_str().unwrap()).is_err());
  }

  #[test]
  fn test_port_override_keeps_host() {
    let mut config = AppConfig::default();
    config.exporter.listen_address = "127.0.0.1:8080".to_string();
    let overrides = ConfigOverrides { port: Some(9417), socket_path: None };
    apply_overrides(&mut config, &overrides).unwrap();
    assert_eq!(config.exporter.listen_address, "127.0.0.1:9417");
  }

  #[test]
  fn test_socket_override() {
    let mut config = AppConfig::default();
    let overrides = ConfigOverrides {
      port: None,
      socket_path: Some("/tmp/docker.sock".to_string()),
    };
    apply_overrides(&mut config, &overrides).unwrap();
    assert_eq!(config.docker.socket_path, "/tmp/docker.sock");
  }

  #[test]
  fn test_explicit_missing_path_errors() {
    let result = resolve_config(Some("/definitely/not/here.toml"), &ConfigOverrides::default());
    assert!(result.is_err());
  }
}
