//! Consolidated summary of one analysis run

use serde::{Deserialize, Serialize};

use super::LabelScore;

/// Number of messages whose dominant sentiment fell into one label bucket
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SentimentCount {
    /// Lower-cased label (bucket key)
    pub label: String,
    pub count: usize,
}

/// Summary statistics derived once per successful run
///
/// Created fresh for every analysis and never cached across runs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryReport {
    /// Most frequent dominant label, in its original casing
    pub most_frequent: String,
    /// Dominant sentiment with the lowest score across all messages
    pub worst_feeling: LabelScore,
    /// Percentage of ingested messages with a positive dominant label (2 decimals)
    pub satisfaction_index: f64,
    /// Label buckets in first-seen order
    pub sentiment_counts: Vec<SentimentCount>,
    /// Dominant sentiment per classified message, in input order
    pub per_message: Vec<LabelScore>,
    /// Message count from ingestion (the satisfaction index denominator)
    pub total_messages: usize,
}

impl SummaryReport {
    /// Satisfaction index formatted for display, e.g. `"33.33%"`
    pub fn satisfaction_display(&self) -> String {
        format!("{:.2}%", self.satisfaction_index)
    }
}
