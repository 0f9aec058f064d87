//! sentiment-service library interface
//!
//! CSV ingestion, classification gateway, result aggregation and the HTTP
//! surface that exposes them. Exposed as a library for the binaries and for
//! integration testing.

pub mod aggregator;
pub mod api;
pub mod error;
pub mod ingest;
pub mod models;
pub mod pipeline;
pub mod services;

pub use crate::error::{ApiError, ApiResult};

use axum::extract::DefaultBodyLimit;
use axum::Router;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

use crate::ingest::IngestOptions;
use crate::services::Classifier;

/// Largest accepted request body (CSV upload or message list)
pub const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Application state shared across handlers
///
/// Holds no per-run data: every analysis starts from fresh state.
#[derive(Clone)]
pub struct AppState {
    /// Classification gateway
    pub classifier: Arc<dyn Classifier>,
    /// CSV parser options for uploaded files
    pub ingest_options: IngestOptions,
    /// Service startup timestamp for uptime tracking
    pub startup_time: DateTime<Utc>,
}

impl AppState {
    pub fn new(classifier: Arc<dyn Classifier>, ingest_options: IngestOptions) -> Self {
        Self {
            classifier,
            ingest_options,
            startup_time: Utc::now(),
        }
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .merge(api::ui_routes())
        .merge(api::analyze_routes())
        .merge(api::report_routes())
        .merge(api::health_routes())
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Bind the HTTP listener
///
/// `host` may be an IP literal or a resolvable hostname such as `localhost`.
pub async fn bind_listener(host: &str, port: u16) -> std::io::Result<TcpListener> {
    TcpListener::bind((host, port)).await
}
