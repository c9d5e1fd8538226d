//! Recommendation service — blends precomputed personal recommendations with
//! event-triggered item-to-item recommendations.
//!
//! Main entry point: loads the source tables, then starts the server.

use clap::Parser;
use recs_api::ApiServer;
use recs_core::config::AppConfig;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{error, info, warn};

#[derive(Parser, Debug)]
#[command(name = "recs-service")]
#[command(about = "Blended offline/online track recommendation service")]
#[command(version)]
struct Cli {
    /// Directory holding the source tables (overrides config)
    #[arg(long, env = "DATA_DIR")]
    data_dir: Option<PathBuf>,

    /// HTTP port (overrides config)
    #[arg(long, env = "RECS_SERVICE__API__HTTP_PORT")]
    http_port: Option<u16>,

    /// Metrics port (overrides config)
    #[arg(long, env = "RECS_SERVICE__METRICS__PORT")]
    metrics_port: Option<u16>,

    /// Do not start the Prometheus exporter
    #[arg(long, default_value_t = false)]
    no_metrics: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "recs_service=info,recs_loader=info,recs_store=info,recs_engine=info,tower_http=info"
                    .into()
            }),
        )
        .json()
        .init();

    let cli = Cli::parse();

    info!("Recommendation service starting up");

    // Load configuration
    let mut config = AppConfig::load().unwrap_or_else(|e| {
        warn!(error = %e, "Failed to load config, using defaults");
        AppConfig::default()
    });

    // Apply CLI overrides
    if let Some(dir) = cli.data_dir {
        config.data.dir = dir;
    }
    if let Some(port) = cli.http_port {
        config.api.http_port = port;
    }
    if let Some(port) = cli.metrics_port {
        config.metrics.port = port;
    }
    if cli.no_metrics {
        config.metrics.enabled = false;
    }

    info!(
        data_dir = %config.data.dir.display(),
        http_port = config.api.http_port,
        similar_k = config.similarity.default_k,
        max_events_per_user = config.events.max_events_per_user,
        "Configuration loaded"
    );

    // Stores are fully loaded before the listener is bound.
    let (engine, report) = recs_loader::load_engine(&config);
    if !report.is_complete() {
        warn!(
            failed = report.failures().count(),
            "Serving with incomplete data, affected lists will be empty"
        );
    }
    engine.log_stats();
    let engine = Arc::new(engine);

    let api_server = ApiServer::new(config.clone(), engine.clone());

    if config.metrics.enabled {
        if let Err(e) = api_server.start_metrics() {
            error!(error = %e, "Failed to start metrics exporter");
        }
    }

    info!("Recommendation service is ready to serve traffic");

    // Blocks until shutdown
    api_server.start_http().await?;

    engine.log_stats();
    info!("Stopping");
    Ok(())
}
