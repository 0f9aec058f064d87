//! Message relay endpoint
//!
//! POST /api/analyze forwards `{"messages": [...]}` to the classification
//! service and returns the service's payload untouched.

use axum::{extract::rejection::JsonRejection, extract::State, routing::post, Json, Router};
use serde::Deserialize;

use crate::{
    error::{ApiError, ApiResult},
    AppState,
};

/// POST /api/analyze request
#[derive(Debug, Deserialize)]
pub struct AnalyzeRequest {
    #[serde(default)]
    pub messages: Option<Vec<String>>,
}

/// POST /api/analyze
///
/// 400 when no messages are supplied, 502 when the service reports an error
/// or times out, 500 for anything unexpected.
pub async fn analyze_messages(
    State(state): State<AppState>,
    payload: Result<Json<AnalyzeRequest>, JsonRejection>,
) -> ApiResult<Json<serde_json::Value>> {
    let Json(request) = payload.map_err(|e| ApiError::BadRequest(e.body_text()))?;

    let messages = request.messages.unwrap_or_default();
    if messages.is_empty() {
        return Err(ApiError::BadRequest("No messages supplied.".to_string()));
    }

    tracing::info!(messages = messages.len(), "Relaying messages for classification");

    let body = state
        .classifier
        .classify_raw(&messages)
        .await
        .map_err(ApiError::from_relay)?;

    Ok(Json(body))
}

/// Build relay routes
pub fn analyze_routes() -> Router<AppState> {
    Router::new().route("/api/analyze", post(analyze_messages))
}
