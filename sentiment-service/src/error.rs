//! Error types for the HTTP surface
//!
//! Every error body is `{"error": <message>, "code": <CODE>}` where `error`
//! is a plain string a page can show as-is.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::ingest::IngestError;
use crate::pipeline::PipelineError;
use crate::services::GatewayError;

/// API error type
#[derive(Debug, Error)]
pub enum ApiError {
    /// Invalid request (400)
    #[error("{0}")]
    BadRequest(String),

    /// Classification service reported an error (502)
    #[error("Upstream error: {0}")]
    Upstream(String),

    /// Classification service did not answer in time (502 on the relay)
    #[error("Upstream timeout: {0}")]
    UpstreamTimeout(String),

    /// Internal server error (500)
    #[error("Internal server error: {0}")]
    Internal(String),

    /// Failed analysis run, mapped onto the user-facing taxonomy
    #[error(transparent)]
    Pipeline(#[from] PipelineError),
}

impl ApiError {
    /// Map a gateway failure for the message relay endpoint
    pub fn from_relay(err: GatewayError) -> Self {
        match err {
            GatewayError::Upstream(message) => ApiError::Upstream(message),
            GatewayError::Timeout(after) => ApiError::UpstreamTimeout(format!(
                "no response from the classification service within {:?}",
                after
            )),
            other => ApiError::Internal(other.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code, message) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg),
            ApiError::Upstream(msg) => (
                StatusCode::BAD_GATEWAY,
                "UPSTREAM_ERROR",
                format!("Upstream error: {}", msg),
            ),
            ApiError::UpstreamTimeout(msg) => (
                StatusCode::BAD_GATEWAY,
                "GATEWAY_TIMEOUT",
                format!("Upstream timeout: {}", msg),
            ),
            ApiError::Internal(msg) => {
                tracing::error!(error = %msg, "Request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "Internal server error.".to_string(),
                )
            }
            ApiError::Pipeline(ref err) => {
                (pipeline_status(err), err.code(), err.user_message())
            }
        };

        let body = Json(json!({
            "error": message,
            "code": code,
        }));

        (status, body).into_response()
    }
}

fn pipeline_status(err: &PipelineError) -> StatusCode {
    match err {
        PipelineError::Ingest(IngestError::NoFile)
        | PipelineError::Ingest(IngestError::Parse { .. })
        | PipelineError::Ingest(IngestError::Schema(_)) => StatusCode::BAD_REQUEST,
        PipelineError::Gateway(GatewayError::Timeout(_)) => StatusCode::GATEWAY_TIMEOUT,
        PipelineError::Gateway(_) => StatusCode::BAD_GATEWAY,
        PipelineError::Aggregation(_) => StatusCode::UNPROCESSABLE_ENTITY,
    }
}

/// Result type for API handlers
pub type ApiResult<T> = Result<T, ApiError>;
