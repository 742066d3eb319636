//! Docker Health Exporter — Entry Point
//!
//! Wiring sequence:
//! 1. Parse CLI flags (`-H/--healthcheck`, `--config`, `--port`, `--socket-path`)
//! 2. Resolve config (file or defaults, then overrides) + validate
//! 3. Init tracing (JSON structured logging)
//! 4. Create DockerRuntime (implements ContainerRuntime port) and HealthProber
//! 5. `--healthcheck`: check the socket once, exit 0/1, never bind
//! 6. Otherwise spawn the exporter server (/healthcheck + /metrics)
//! 7. Wait for SIGINT/SIGTERM → graceful shutdown

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use tokio::sync::broadcast;
use tracing::{info, warn};

use docker_health_exporter::adapters::docker::DockerRuntime;
use docker_health_exporter::adapters::http::{ExporterServer, ExporterState};
use docker_health_exporter::cli::Cli;
use docker_health_exporter::config::loader::resolve_config;
use docker_health_exporter::usecases::{HealthProber, ProberConfig};

#[tokio::main]
async fn main() -> Result<ExitCode> {
    // ── 1. Parse command line ───────────────────────────────
    let cli = Cli::parse();

    // ── 2. Resolve configuration ────────────────────────────
    let config = resolve_config(cli.config.as_deref(), &cli.overrides())
        .context("Failed to load configuration")?;

    // ── 3. Initialize structured JSON logging ───────────────
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                tracing_subscriber::EnvFilter::new(&config.exporter.log_level)
            }),
        )
        .json()
        .init();

    // ── 4. Docker client + prober (owned, injected) ─────────
    let runtime = Arc::new(DockerRuntime::new(&config.docker));
    let prober = HealthProber::new(runtime, ProberConfig::from(&config.docker));

    // ── 5. One-shot liveness check ──────────────────────────
    if cli.healthcheck {
        let healthy = prober.is_healthy().await;
        info!(
            healthy,
            socket = %config.docker.socket_path,
            "Healthcheck mode"
        );
        return Ok(if healthy {
            ExitCode::SUCCESS
        } else {
            ExitCode::FAILURE
        });
    }

    info!(
        version = env!("CARGO_PKG_VERSION"),
        listen = %config.exporter.listen_address,
        socket = %config.docker.socket_path,
        timeout_s = config.docker.timeout_seconds,
        "Starting Docker health exporter"
    );

    // ── 6. Spawn exporter server ────────────────────────────
    let (shutdown_tx, _shutdown_rx) = broadcast::channel::<()>(1);
    let state = Arc::new(ExporterState::new(
        prober,
        config.metrics.include_timestamp,
    ));
    let server = ExporterServer::new(state, config.exporter.listen_address.clone());
    let mut server_handle = tokio::spawn(server.run(shutdown_tx.subscribe()));

    // ── 7. Wait for SIGINT/SIGTERM or server exit ───────────
    tokio::select! {
        _ = shutdown_signal() => {
            info!("Shutdown signal received, stopping server");
        }
        result = &mut server_handle => {
            return match result {
                Ok(Ok(())) => Ok(ExitCode::SUCCESS),
                Ok(Err(e)) => Err(e).context("Exporter server failed"),
                Err(e) => Err(e).context("Exporter server task aborted"),
            };
        }
    }

    let _ = shutdown_tx.send(());

    if tokio::time::timeout(Duration::from_secs(5), server_handle)
        .await
        .is_err()
    {
        warn!("Server did not stop within 5s");
    }

    info!("Shutdown complete");
    Ok(ExitCode::SUCCESS)
}

/// Resolve on SIGINT, or SIGTERM on unix (`docker stop`).
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "Failed to listen for SIGINT");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {}
        _ = terminate => {}
    }
}
