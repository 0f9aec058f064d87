//! Classification service result types
//!
//! The service has emitted more than one payload layout over time. The
//! layout is never guessed per call: the configured [`ResponseShape`]
//! decides how a successful body is read.

use sentiment_common::config::ResponseShape;
use serde::{Deserialize, Serialize};

/// A single sentiment label with the model's confidence (0.0-1.0)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabelScore {
    pub label: String,
    pub score: f64,
}

impl LabelScore {
    pub fn new(label: impl Into<String>, score: f64) -> Self {
        Self {
            label: label.into(),
            score,
        }
    }
}

/// Classification output for one message
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ClassificationResult {
    /// The model's selected top class only
    Single(LabelScore),
    /// Every class considered for the message, unsorted by score
    Ranked(Vec<LabelScore>),
}

/// Successful classification payload, interpreted per [`ResponseShape`]
#[derive(Debug, Clone, PartialEq)]
pub enum ClassificationPayload {
    /// One result per message, indexed by message position
    PerMessage(Vec<ClassificationResult>),
    /// Legacy layout: all classes for the whole batch in one flat list
    Collapsed(Vec<LabelScore>),
}

impl ClassificationPayload {
    /// Interpret a parsed response body using the configured shape
    pub fn from_value(
        value: serde_json::Value,
        shape: ResponseShape,
    ) -> Result<Self, serde_json::Error> {
        match shape {
            ResponseShape::PerMessage => serde_json::from_value(value).map(Self::PerMessage),
            ResponseShape::Collapsed => serde_json::from_value(value).map(Self::Collapsed),
        }
    }

    pub fn shape(&self) -> ResponseShape {
        match self {
            Self::PerMessage(_) => ResponseShape::PerMessage,
            Self::Collapsed(_) => ResponseShape::Collapsed,
        }
    }

    /// Per-message results; a collapsed list becomes one pseudo-message
    pub fn into_results(self) -> Vec<ClassificationResult> {
        match self {
            Self::PerMessage(results) => results,
            Self::Collapsed(list) if list.is_empty() => Vec::new(),
            Self::Collapsed(list) => vec![ClassificationResult::Ranked(list)],
        }
    }
}
