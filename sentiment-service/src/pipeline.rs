//! Sentiment analysis pipeline
//!
//! Ingestion → classification → aggregation. Each stage fails fast and the
//! failure is converted to one user-visible message at the top. Nothing is
//! shared between runs; a new run simply starts from fresh state.

use thiserror::Error;
use tracing::{info, warn};

use crate::aggregator::{self, AggregationError};
use crate::ingest::{self, IngestError, IngestOptions};
use crate::models::SummaryReport;
use crate::services::{Classifier, GatewayError};

/// Any failure of a pipeline run
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Ingest(#[from] IngestError),

    #[error(transparent)]
    Gateway(#[from] GatewayError),

    #[error(transparent)]
    Aggregation(#[from] AggregationError),
}

impl PipelineError {
    /// Message shown to the user in place of the dashboard
    pub fn user_message(&self) -> String {
        match self {
            PipelineError::Ingest(IngestError::NoFile) => "Please select a file.".to_string(),
            PipelineError::Ingest(IngestError::Parse { .. }) => {
                "Error reading CSV. Please check the file format.".to_string()
            }
            PipelineError::Ingest(IngestError::Schema(_)) => {
                "Invalid CSV. The 'username' and 'message' columns are required.".to_string()
            }
            PipelineError::Gateway(GatewayError::Timeout(_)) => {
                "The sentiment service is taking too long to respond. Please try again later."
                    .to_string()
            }
            PipelineError::Gateway(GatewayError::Upstream(message)) => {
                format!("Server error: {}. Please try again later.", message)
            }
            PipelineError::Gateway(_) => "Server error. Please try again later.".to_string(),
            PipelineError::Aggregation(_) => {
                "Could not determine sentiments from the API response.".to_string()
            }
        }
    }

    /// Stable error code for API clients
    pub fn code(&self) -> &'static str {
        match self {
            PipelineError::Ingest(IngestError::NoFile) => "NO_FILE",
            PipelineError::Ingest(IngestError::Parse { .. }) => "PARSE_ERROR",
            PipelineError::Ingest(IngestError::Schema(_)) => "SCHEMA_ERROR",
            PipelineError::Gateway(GatewayError::Timeout(_)) => "GATEWAY_TIMEOUT",
            PipelineError::Gateway(_) => "GATEWAY_ERROR",
            PipelineError::Aggregation(_) => "AGGREGATION_ERROR",
        }
    }
}

/// Run one full analysis over an uploaded CSV file
pub async fn run_analysis(
    file_bytes: &[u8],
    options: &IngestOptions,
    classifier: &dyn Classifier,
) -> Result<SummaryReport, PipelineError> {
    let outcome = run_stages(file_bytes, options, classifier).await;

    match &outcome {
        Ok(report) => info!(
            messages = report.total_messages,
            most_frequent = %report.most_frequent,
            satisfaction_index = report.satisfaction_index,
            "Analysis completed"
        ),
        Err(e) => warn!(code = e.code(), error = %e, "Analysis failed"),
    }

    outcome
}

async fn run_stages(
    file_bytes: &[u8],
    options: &IngestOptions,
    classifier: &dyn Classifier,
) -> Result<SummaryReport, PipelineError> {
    let batch = ingest::ingest(file_bytes, options)?;
    info!(messages = batch.len(), "Classifying messages");

    let payload = classifier.classify(batch.as_slice()).await?;
    let shape = payload.shape();
    let results = payload.into_results();

    aggregator::check_alignment(shape, results.len(), batch.len())?;
    let report = aggregator::aggregate(&results, batch.len())?;

    Ok(report)
}
