//! Result normalization and summary statistics
//!
//! Tie-break rules (all deterministic, all "first wins"):
//! - dominant label of a message: first candidate with the maximum score
//! - most frequent sentiment: first bucket to appear in input order
//! - worst feeling: first message with the minimum dominant score
//!
//! Labels are folded to lower case for bucketing only. The report shows the
//! original casing of the first dominant sentiment that fell into a bucket.

use sentiment_common::config::ResponseShape;
use std::collections::HashMap;
use thiserror::Error;

use crate::models::{ClassificationResult, LabelScore, SentimentCount, SummaryReport};

/// Bucket keys counted towards the satisfaction index
pub const POSITIVE_LABELS: [&str; 2] = ["positive", "very positive"];

/// Aggregation failures
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AggregationError {
    #[error("no sentiments")]
    NoSentiments,

    #[error("message {index} has no candidate labels")]
    EmptyCandidates { index: usize },

    #[error("expected {expected} classification results, received {actual}")]
    CountMismatch { expected: usize, actual: usize },

    #[error("no messages to compute a satisfaction index over")]
    NoMessages,
}

/// Lower-cased bucket key for a label
pub fn bucket_key(label: &str) -> String {
    label.to_lowercase()
}

pub fn is_positive(bucket: &str) -> bool {
    POSITIVE_LABELS.contains(&bucket)
}

/// Reduce one message's result to its dominant sentiment
///
/// Returns `None` for an empty candidate list.
pub fn dominant_sentiment(result: &ClassificationResult) -> Option<&LabelScore> {
    match result {
        ClassificationResult::Single(label_score) => Some(label_score),
        ClassificationResult::Ranked(candidates) => {
            candidates.iter().fold(None, |best: Option<&LabelScore>, current| match best {
                Some(b) if current.score > b.score => Some(current),
                Some(b) => Some(b),
                None => Some(current),
            })
        }
    }
}

/// Verify one result per message for the canonical response shape
///
/// An empty result list is left for [`aggregate`] to report as
/// [`AggregationError::NoSentiments`]. The collapsed legacy shape always
/// yields a single pseudo-message and is exempt.
pub fn check_alignment(
    shape: ResponseShape,
    results: usize,
    messages: usize,
) -> Result<(), AggregationError> {
    if shape == ResponseShape::PerMessage && results != 0 && results != messages {
        return Err(AggregationError::CountMismatch {
            expected: messages,
            actual: results,
        });
    }
    Ok(())
}

/// Derive the summary report from per-message classification results
///
/// `total_messages` is the ingested message count. It is the satisfaction
/// index denominator even when fewer results came back.
pub fn aggregate(
    results: &[ClassificationResult],
    total_messages: usize,
) -> Result<SummaryReport, AggregationError> {
    if results.is_empty() {
        return Err(AggregationError::NoSentiments);
    }
    if total_messages == 0 {
        return Err(AggregationError::NoMessages);
    }

    let dominants = results
        .iter()
        .enumerate()
        .map(|(index, result)| {
            dominant_sentiment(result)
                .cloned()
                .ok_or(AggregationError::EmptyCandidates { index })
        })
        .collect::<Result<Vec<_>, _>>()?;

    let sentiment_counts = count_buckets(&dominants);

    let mut most_frequent_bucket = &sentiment_counts[0];
    for bucket in &sentiment_counts[1..] {
        if bucket.count > most_frequent_bucket.count {
            most_frequent_bucket = bucket;
        }
    }
    let most_frequent = dominants
        .iter()
        .find(|d| bucket_key(&d.label) == most_frequent_bucket.label)
        .map(|d| d.label.clone())
        .unwrap_or_else(|| most_frequent_bucket.label.clone());

    let mut worst_feeling = &dominants[0];
    for current in &dominants[1..] {
        if current.score < worst_feeling.score {
            worst_feeling = current;
        }
    }
    let worst_feeling = worst_feeling.clone();

    let positive: usize = sentiment_counts
        .iter()
        .filter(|bucket| is_positive(&bucket.label))
        .map(|bucket| bucket.count)
        .sum();
    if positive > total_messages {
        return Err(AggregationError::CountMismatch {
            expected: total_messages,
            actual: results.len(),
        });
    }
    let satisfaction_index = round2(positive as f64 / total_messages as f64 * 100.0);

    tracing::debug!(
        messages = total_messages,
        buckets = sentiment_counts.len(),
        satisfaction_index,
        "Sentiments aggregated"
    );

    Ok(SummaryReport {
        most_frequent,
        worst_feeling,
        satisfaction_index,
        sentiment_counts,
        per_message: dominants,
        total_messages,
    })
}

/// Frequency of each lower-cased label, in first-seen order
fn count_buckets(dominants: &[LabelScore]) -> Vec<SentimentCount> {
    let mut positions: HashMap<String, usize> = HashMap::new();
    let mut counts: Vec<SentimentCount> = Vec::new();

    for dominant in dominants {
        let key = bucket_key(&dominant.label);
        match positions.get(&key) {
            Some(&pos) => counts[pos].count += 1,
            None => {
                positions.insert(key.clone(), counts.len());
                counts.push(SentimentCount { label: key, count: 1 });
            }
        }
    }

    counts
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
