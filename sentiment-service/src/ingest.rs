//! CSV ingestion and validation
//!
//! Parses an uploaded file (header row = field names, blank lines skipped)
//! and extracts the `message` column in row order. Any row-level parse error
//! rejects the whole file; there is no partial recovery.
//!
//! The schema check only looks at the first data row. A file whose later rows
//! break the schema in ways the parser accepts is not detected here.

use csv::{ReaderBuilder, StringRecord};
use sentiment_common::config::DEFAULT_CSV_DELIMITER;
use thiserror::Error;
use tracing::debug;

pub const USERNAME_COLUMN: &str = "username";
pub const MESSAGE_COLUMN: &str = "message";

/// Ingestion failures
#[derive(Debug, Error)]
pub enum IngestError {
    /// No file content was supplied
    #[error("No file supplied")]
    NoFile,

    /// The CSV parser rejected a row
    #[error("CSV parse error{}: {reason}", at_line(.line))]
    Parse { line: Option<u64>, reason: String },

    /// No data rows, or the first row lacks a required column
    #[error("Schema error: {0}")]
    Schema(String),
}

/// Parser options
#[derive(Debug, Clone, Copy)]
pub struct IngestOptions {
    pub delimiter: u8,
}

impl Default for IngestOptions {
    fn default() -> Self {
        Self {
            delimiter: DEFAULT_CSV_DELIMITER as u8,
        }
    }
}

impl IngestOptions {
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }
}

/// Ordered message texts, one per data row
///
/// The position of each message is the index that correlates it with its
/// classification result.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MessageBatch {
    messages: Vec<String>,
}

impl MessageBatch {
    pub fn new(messages: Vec<String>) -> Self {
        Self { messages }
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn as_slice(&self) -> &[String] {
        &self.messages
    }

    pub fn into_vec(self) -> Vec<String> {
        self.messages
    }
}

/// Parse CSV bytes into a [`MessageBatch`]
pub fn ingest(file_bytes: &[u8], options: &IngestOptions) -> Result<MessageBatch, IngestError> {
    if file_bytes.is_empty() {
        return Err(IngestError::NoFile);
    }

    let mut reader = ReaderBuilder::new()
        .delimiter(options.delimiter)
        .has_headers(true)
        .flexible(false)
        .from_reader(file_bytes);

    let headers = reader.headers().map_err(parse_error)?.clone();
    let username_idx = column_index(&headers, USERNAME_COLUMN);
    let message_idx = column_index(&headers, MESSAGE_COLUMN);

    let mut messages = Vec::new();
    for (row, result) in reader.records().enumerate() {
        let record = result.map_err(parse_error)?;

        if row == 0 {
            check_first_row(&record, username_idx, message_idx)?;
        }

        // Present on every row once the first row passed: records have equal length
        let message = message_idx
            .and_then(|idx| record.get(idx))
            .unwrap_or_default();
        messages.push(message.to_string());
    }

    if messages.is_empty() {
        return Err(IngestError::Schema("the file contains no data rows".to_string()));
    }

    debug!(rows = messages.len(), "CSV ingested");
    Ok(MessageBatch::new(messages))
}

fn column_index(headers: &StringRecord, name: &str) -> Option<usize> {
    headers.iter().position(|h| h == name)
}

/// A required column counts as missing when absent or blank in the first row
fn check_first_row(
    record: &StringRecord,
    username_idx: Option<usize>,
    message_idx: Option<usize>,
) -> Result<(), IngestError> {
    for (name, idx) in [(USERNAME_COLUMN, username_idx), (MESSAGE_COLUMN, message_idx)] {
        let present = idx
            .and_then(|i| record.get(i))
            .map(|value| !value.is_empty())
            .unwrap_or(false);
        if !present {
            return Err(IngestError::Schema(format!(
                "required column '{}' is missing",
                name
            )));
        }
    }
    Ok(())
}

fn at_line(line: &Option<u64>) -> String {
    line.map(|l| format!(" at line {}", l)).unwrap_or_default()
}

fn parse_error(err: csv::Error) -> IngestError {
    let line = err.position().map(|p| p.line());
    let reason = match err.kind() {
        csv::ErrorKind::UnequalLengths {
            expected_len, len, ..
        } => format!("expected {} fields, found {}", expected_len, len),
        csv::ErrorKind::Utf8 { .. } => "invalid UTF-8".to_string(),
        _ => err.to_string(),
    };
    IngestError::Parse { line, reason }
}
