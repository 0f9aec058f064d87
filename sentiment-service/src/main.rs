//! sentiment-service - CSV sentiment dashboard
//!
//! Serves the upload page, relays message batches to the hosted
//! classification model and returns consolidated sentiment summaries.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use sentiment_common::config::{self, CONFIG_PATH_ENV};
use sentiment_service::ingest::IngestOptions;
use sentiment_service::{bind_listener, build_router, services, AppState};
use tracing::info;

/// Command-line arguments for sentiment-service
#[derive(Parser, Debug)]
#[command(name = "sentiment-service")]
#[command(about = "CSV sentiment analysis dashboard")]
#[command(version)]
struct Args {
    /// TOML configuration file
    #[arg(short, long, env = CONFIG_PATH_ENV)]
    config: Option<PathBuf>,

    /// Address to bind (overrides [server] host)
    #[arg(long, env = "SENTIMENT_HOST")]
    host: Option<String>,

    /// Port to listen on (overrides [server] port)
    #[arg(short, long, env = "SENTIMENT_PORT")]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let (toml_config, config_source) =
        config::load_config(args.config.as_deref()).context("Failed to load configuration")?;

    // Initialize tracing (RUST_LOG wins over the configured level)
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::new(
                toml_config
                    .logging
                    .filter_directives(std::env::var("RUST_LOG").ok().as_deref()),
            ),
        )
        .init();

    info!(
        "Starting sentiment-service v{} [{}] built {} ({})",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH"),
        env!("BUILD_TIMESTAMP"),
        env!("BUILD_PROFILE")
    );
    config_source.log();

    let classifier = services::build_classifier(&toml_config)?;
    let delimiter = toml_config.csv.delimiter_byte()?;
    info!("CSV delimiter: {:?}", toml_config.csv.delimiter);

    let state = AppState::new(
        Arc::new(classifier),
        IngestOptions::default().with_delimiter(delimiter),
    );
    let app = build_router(state);

    let host = args.host.unwrap_or(toml_config.server.host);
    let port = args.port.unwrap_or(toml_config.server.port);
    let listener = bind_listener(&host, port)
        .await
        .with_context(|| format!("Failed to bind to {}:{}", host, port))?;
    let addr = listener.local_addr()?;
    info!("Listening on http://{}", addr);
    info!("Health check: http://{}/health", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
