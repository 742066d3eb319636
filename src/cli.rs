//! Command Line Interface
//!
//! `docker-health-exporter` serves by default; `--healthcheck` runs the
//! liveness check once and exits, for use as a container HEALTHCHECK.

use clap::Parser;

use crate::config::loader::ConfigOverrides;

#[derive(Parser, Debug, Clone)]
#[command(name = "docker-health-exporter")]
#[command(author, version, about = "Prometheus exporter for Docker container healthchecks", long_about = None)]
pub struct Cli {
    /// Exit with 0 when healthy or 1 when unhealthy instead of serving
    #[arg(short = 'H', long)]
    pub healthcheck: bool,

    /// Path to a TOML config file (default: ./config.toml if present)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Override the HTTP listen port
    #[arg(short, long, env = "EXPORTER_PORT")]
    pub port: Option<u16>,

    /// Override the Docker control socket path
    #[arg(long, env = "DOCKER_SOCKET_PATH")]
    pub socket_path: Option<String>,
}

impl Cli {
    /// Config overrides carried by flags and environment.
    pub fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            port: self.port,
            socket_path: self.socket_path.clone(),
        }
    }
}
