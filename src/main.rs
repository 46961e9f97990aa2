//! Launchdash Server
//!
//! Run with: cargo run --bin launchdash
//!
//! # Configuration
//!
//! Settings come from the first config file found (see
//! [`launchdash::config::Config::load_default`]), then environment overrides.
//! A config file or override that does not parse stops startup:
//! - `LAUNCHDASH_DATASET`: CSV file to load (default: data/spacex_launch_dash.csv)
//! - `LAUNCHDASH_HOST`: Host to bind to (default: 127.0.0.1)
//! - `LAUNCHDASH_PORT`: Port to listen on (default: 8050)
//! - `LAUNCHDASH_MAX_SESSIONS`: Concurrent session limit (default: 1000)
//! - `LAUNCHDASH_LOG_LEVEL`: Log filter directives
//! - `LAUNCHDASH_LOG_FORMAT`: pretty or json
//! - `RUST_LOG`: Takes precedence over the configured log filter

use launchdash::api::{serve, AppState};
use launchdash::config::{Config, LoggingConfig};
use launchdash::dashboard::Dashboard;
use launchdash::dataset::DatasetLoader;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Config decides the final log format, so loading it logs through a
    // temporary subscriber
    let config = tracing::subscriber::with_default(bootstrap_subscriber(), || {
        Config::load_default().map_err(|e| {
            tracing::error!(error = %e, "Failed to load configuration");
            e
        })
    })?;

    init_tracing(&config.logging);

    tracing::info!("Starting Launchdash v{}", env!("CARGO_PKG_VERSION"));

    // Load the dataset; the server does not start without it
    tracing::info!("Dataset file: {:?}", config.dataset.path);
    let dataset = match DatasetLoader::new()
        .with_columns(config.dataset.columns.clone())
        .load(&config.dataset.path)
    {
        Ok(dataset) => Arc::new(dataset),
        Err(e) => {
            tracing::error!(error = %e, "Failed to load dataset");
            return Err(e.into());
        }
    };
    tracing::info!("Dataset: {}", dataset.stats());

    let dashboard = Arc::new(Dashboard::new(
        dataset,
        config.dashboard.labels.clone(),
        &config.dashboard.layout,
    ));

    let api_config = config.server.api_config();
    let state = AppState::new(dashboard, api_config.clone());

    tracing::info!("Starting server on {}:{}", api_config.host, api_config.port);
    serve(state, &api_config).await?;

    tracing::info!("Launchdash stopped");
    Ok(())
}

/// Plain subscriber used while the config itself is loading
fn bootstrap_subscriber() -> impl tracing::Subscriber + Send + Sync + 'static {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("launchdash=info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
}

/// Install the global subscriber; `RUST_LOG` wins over the configured filter
fn init_tracing(logging: &LoggingConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logging.level));

    let registry = tracing_subscriber::registry().with(filter);

    if logging.is_json() {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}
