//! API server — HTTP routes plus the Prometheus exporter.

use crate::rest::{self, AppState};
use crate::swagger;
use axum::routing::{get, post};
use axum::Router;
use recs_core::config::AppConfig;
use recs_engine::RecommendationEngine;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;
use tower_http::trace::TraceLayer;
use tracing::info;

/// Build the HTTP router over an already loaded engine.
pub fn build_router(engine: Arc<RecommendationEngine>, default_k: usize) -> Router {
    let state = AppState {
        engine,
        default_k,
        start_time: Instant::now(),
    };

    Router::new()
        .route("/", get(rest::root))
        // Recommendation endpoints
        .route("/recommendations", post(rest::recommendations))
        .route("/recommendations_offline", post(rest::recommendations_offline))
        .route("/recommendations_online", post(rest::recommendations_online))
        // Operational endpoints
        .route("/stats", get(rest::stats))
        .route("/health", get(rest::health_check))
        .route("/ready", get(rest::readiness))
        .route("/live", get(rest::liveness))
        .route("/api-docs/openapi.json", get(swagger::openapi_json))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub struct ApiServer {
    config: AppConfig,
    engine: Arc<RecommendationEngine>,
}

impl ApiServer {
    pub fn new(config: AppConfig, engine: Arc<RecommendationEngine>) -> Self {
        Self { config, engine }
    }

    /// Serve HTTP until ctrl-c.
    pub async fn start_http(&self) -> anyhow::Result<()> {
        let app = build_router(self.engine.clone(), self.config.api.default_k);

        let addr = SocketAddr::new(self.config.api.host.parse()?, self.config.api.http_port);

        info!(addr = %addr, "Starting HTTP server");

        let listener = tokio::net::TcpListener::bind(addr).await?;
        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        info!("HTTP server stopped");
        Ok(())
    }

    /// Start the metrics exporter on a separate port.
    pub fn start_metrics(&self) -> anyhow::Result<()> {
        let addr = SocketAddr::new(self.config.api.host.parse()?, self.config.metrics.port);
        metrics_exporter_prometheus::PrometheusBuilder::new()
            .with_http_listener(addr)
            .install()?;

        info!(port = self.config.metrics.port, "Metrics exporter started");
        Ok(())
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
