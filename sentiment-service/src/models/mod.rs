//! Data models for the sentiment pipeline
//!
//! - Classification service payloads (label/score results)
//! - Consolidated summary report handed to presentation

pub mod classification;
pub mod report;

pub use classification::{ClassificationPayload, ClassificationResult, LabelScore};
pub use report::{SentimentCount, SummaryReport};
