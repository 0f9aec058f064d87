//! Full analysis endpoint
//!
//! POST /api/report takes the raw CSV file as the request body and returns
//! the consolidated [`SummaryReport`].

use axum::{body::Bytes, extract::State, routing::post, Json, Router};

use crate::{error::ApiResult, models::SummaryReport, pipeline, AppState};

/// POST /api/report
pub async fn analyze_report(
    State(state): State<AppState>,
    body: Bytes,
) -> ApiResult<Json<SummaryReport>> {
    tracing::info!(bytes = body.len(), "CSV analysis requested");

    let report =
        pipeline::run_analysis(&body, &state.ingest_options, state.classifier.as_ref()).await?;

    Ok(Json(report))
}

/// Build report routes
pub fn report_routes() -> Router<AppState> {
    Router::new().route("/api/report", post(analyze_report))
}
