//! Exporter HTTP Server - /healthcheck and /metrics
//!
//! Exposes exporter liveness and the container health gauge via
//! axum 0.7. Each request is independent: `/metrics` runs the
//! liveness pre-check, then a fresh list + inspect pass.

use std::sync::Arc;

use axum::Router;
use axum::extract::State;
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use tokio::sync::broadcast;
use tracing::{debug, error, info, instrument, warn};

use crate::adapters::metrics::exposition::{CONTENT_TYPE, encode_samples};
use crate::domain::sample::samples_from_records;
use crate::usecases::health_prober::HealthProber;

/// Body of a 500 from `/metrics`.
pub const RUNTIME_UNAVAILABLE_BODY: &str = "runtime unavailable";

/// State shared by all request handlers.
pub struct ExporterState {
    /// Liveness and collection against the container runtime.
    pub prober: HealthProber,
    /// Append per-sample timestamps.
    pub include_timestamp: bool,
}

impl ExporterState {
    /// Create handler state around an owned prober.
    pub fn new(prober: HealthProber, include_timestamp: bool) -> Self {
        Self {
            prober,
            include_timestamp,
        }
    }
}

/// Axum-based exporter HTTP server.
pub struct ExporterServer {
    /// Shared handler state.
    state: Arc<ExporterState>,
    /// Bind address, e.g. `0.0.0.0:8080`.
    listen_address: String,
}

impl ExporterServer {
    /// Create a new exporter server.
    pub fn new(state: Arc<ExporterState>, listen_address: impl Into<String>) -> Self {
        Self {
            state,
            listen_address: listen_address.into(),
        }
    }

    /// Build the router: two routes plus a 404 fallback.
    pub fn router(state: Arc<ExporterState>) -> Router {
        Router::new()
            .route("/healthcheck", get(Self::healthcheck))
            .route("/metrics", get(Self::metrics))
            .fallback(Self::not_found)
            .with_state(state)
    }

    /// Serve until the shutdown signal fires.
    #[instrument(skip(self, shutdown_rx), fields(address = %self.listen_address))]
    pub async fn run(self, mut shutdown_rx: broadcast::Receiver<()>) -> anyhow::Result<()> {
        let app = Self::router(Arc::clone(&self.state));

        let listener = tokio::net::TcpListener::bind(&self.listen_address).await?;

        info!(address = %self.listen_address, "Exporter server started");

        axum::serve(listener, app)
            .with_graceful_shutdown(async move {
                let _ = shutdown_rx.recv().await;
            })
            .await?;

        info!("Exporter server stopped");
        Ok(())
    }

    /// Liveness: 200 `OK` if the runtime socket exists, else 500 `ERR`.
    async fn healthcheck(State(state): State<Arc<ExporterState>>) -> impl IntoResponse {
        if state.prober.is_healthy().await {
            (StatusCode::OK, "OK")
        } else {
            warn!("Healthcheck failed: runtime socket missing");
            (StatusCode::INTERNAL_SERVER_ERROR, "ERR")
        }
    }

    /// Scrape: liveness pre-check, then one sample per healthchecked container.
    async fn metrics(State(state): State<Arc<ExporterState>>) -> Response {
        if !state.prober.is_healthy().await {
            warn!("Scrape rejected: runtime socket missing");
            return runtime_unavailable();
        }

        let records = match state.prober.list_container_health().await {
            Ok(records) => records,
            Err(e) => {
                error!(error = %e, "Scrape failed");
                return runtime_unavailable();
            }
        };

        let samples = samples_from_records(&records, state.include_timestamp);
        match encode_samples(&samples) {
            Ok(body) => {
                debug!(samples = samples.len(), "Scrape served");
                (StatusCode::OK, [(header::CONTENT_TYPE, CONTENT_TYPE)], body).into_response()
            }
            Err(e) => {
                error!(error = %e, "Failed to encode scrape");
                (StatusCode::INTERNAL_SERVER_ERROR, "encoding failed").into_response()
            }
        }
    }

    async fn not_found() -> impl IntoResponse {
        (StatusCode::NOT_FOUND, "not found")
    }
}

fn runtime_unavailable() -> Response {
    (StatusCode::INTERNAL_SERVER_ERROR, RUNTIME_UNAVAILABLE_BODY).into_response()
}
