//! Classification service client
//!
//! One batched POST per analysis carrying `{"inputs": [...]}` with bearer
//! authorization. No chunking, no retry. The whole round trip is bounded by
//! the configured timeout.

use async_trait::async_trait;
use sentiment_common::config::{ClassifierConfig, ResponseShape};
use serde::Serialize;
use std::fmt;
use std::time::{Duration, Instant};
use thiserror::Error;

use super::Classifier;

const USER_AGENT: &str = concat!("sentiment-service/", env!("CARGO_PKG_VERSION"));

/// Classification gateway errors
#[derive(Debug, Error)]
pub enum GatewayError {
    /// The request did not complete within the configured ceiling
    #[error("Classification request timed out after {0:?}")]
    Timeout(Duration),

    #[error("Network error: {0}")]
    Network(String),

    /// Error reported by the service itself, message kept verbatim
    #[error("{0}")]
    Upstream(String),

    /// Body was not JSON, or did not match the configured response shape
    #[error("Malformed response body: {0}")]
    MalformedBody(String),

    #[error("HTTP client error: {0}")]
    Client(String),
}

impl GatewayError {
    pub fn is_timeout(&self) -> bool {
        matches!(self, GatewayError::Timeout(_))
    }
}

/// Construction parameters for [`ClassificationClient`]
#[derive(Clone)]
pub struct GatewaySettings {
    pub endpoint: String,
    pub api_key: String,
    pub timeout: Duration,
    pub response_shape: ResponseShape,
}

impl GatewaySettings {
    /// Combine the `[classifier]` config section with a resolved credential
    pub fn from_config(config: &ClassifierConfig, api_key: String) -> Self {
        Self {
            endpoint: config.endpoint.clone(),
            api_key,
            timeout: Duration::from_secs(config.timeout_secs),
            response_shape: config.response_shape,
        }
    }
}

impl fmt::Debug for GatewaySettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GatewaySettings")
            .field("endpoint", &self.endpoint)
            .field("api_key", &"<redacted>")
            .field("timeout", &self.timeout)
            .field("response_shape", &self.response_shape)
            .finish()
    }
}

#[derive(Serialize)]
struct ClassifyRequest<'a> {
    inputs: &'a [String],
}

/// HTTP client for the hosted sentiment model
#[derive(Debug)]
pub struct ClassificationClient {
    http_client: reqwest::Client,
    settings: GatewaySettings,
}

impl ClassificationClient {
    pub fn new(settings: GatewaySettings) -> Result<Self, GatewayError> {
        let http_client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(settings.timeout)
            .build()
            .map_err(|e| GatewayError::Client(e.to_string()))?;

        Ok(Self {
            http_client,
            settings,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.settings.endpoint
    }

    fn transport_error(&self, err: reqwest::Error) -> GatewayError {
        if err.is_timeout() {
            GatewayError::Timeout(self.settings.timeout)
        } else {
            GatewayError::Network(err.to_string())
        }
    }
}

#[async_trait]
impl Classifier for ClassificationClient {
    fn response_shape(&self) -> ResponseShape {
        self.settings.response_shape
    }

    async fn classify_raw(&self, messages: &[String]) -> Result<serde_json::Value, GatewayError> {
        let started = Instant::now();
        tracing::debug!(messages = messages.len(), "Querying classification service");

        let response = self
            .http_client
            .post(&self.settings.endpoint)
            .bearer_auth(&self.settings.api_key)
            .json(&ClassifyRequest { inputs: messages })
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        let status = response.status();
        let body_text = response
            .text()
            .await
            .map_err(|e| self.transport_error(e))?;

        let body = parse_body(&body_text)?;

        if let Some(message) = upstream_error(&body) {
            tracing::warn!(
                status = status.as_u16(),
                error = %message,
                "Classification service reported an error"
            );
            return Err(GatewayError::Upstream(message));
        }

        if !status.is_success() {
            return Err(GatewayError::Upstream(format!(
                "classification service returned HTTP {}",
                status.as_u16()
            )));
        }

        tracing::info!(
            messages = messages.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Classification request completed"
        );

        Ok(body)
    }
}

/// Body is read as text first so a non-JSON reply is reported as such
fn parse_body(text: &str) -> Result<serde_json::Value, GatewayError> {
    serde_json::from_str(text).map_err(|e| {
        let preview: String = text.chars().take(120).collect();
        GatewayError::MalformedBody(format!("{} (body starts with {:?})", e, preview))
    })
}

/// Extract the message of a top-level `{"error": ...}` object
fn upstream_error(body: &serde_json::Value) -> Option<String> {
    let error = body.as_object()?.get("error")?;
    match error {
        serde_json::Value::Null => None,
        serde_json::Value::String(message) => Some(message.clone()),
        other => Some(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn settings() -> GatewaySettings {
        GatewaySettings {
            endpoint: "http://127.0.0.1:9/classify".to_string(),
            api_key: "test-token".to_string(),
            timeout: Duration::from_secs(5),
            response_shape: ResponseShape::PerMessage,
        }
    }

    #[test]
    fn test_client_creation() {
        let client = ClassificationClient::new(settings()).unwrap();
        assert_eq!(client.endpoint(), "http://127.0.0.1:9/classify");
        assert_eq!(client.response_shape(), ResponseShape::PerMessage);
    }

    #[test]
    fn test_settings_debug_redacts_key() {
        let rendered = format!("{:?}", settings());
        assert!(!rendered.contains("test-token"));
        assert!(rendered.contains("<redacted>"));
    }

    #[test]
    fn test_settings_from_config() {
        let config = ClassifierConfig {
            timeout_secs: 12,
            response_shape: ResponseShape::Collapsed,
            ..ClassifierConfig::default()
        };
        let settings = GatewaySettings::from_config(&config, "k".to_string());
        assert_eq!(settings.timeout, Duration::from_secs(12));
        assert_eq!(settings.response_shape, ResponseShape::Collapsed);
        assert_eq!(settings.endpoint, config.endpoint);
    }

    #[test]
    fn test_request_body_shape() {
        let messages = vec!["a".to_string(), "b".to_string()];
        let body = serde_json::to_value(ClassifyRequest { inputs: &messages }).unwrap();
        assert_eq!(body, json!({"inputs": ["a", "b"]}));
    }

    #[test]
    fn test_upstream_error_extraction() {
        assert_eq!(
            upstream_error(&json!({"error": "Model is loading"})),
            Some("Model is loading".to_string())
        );
        assert_eq!(
            upstream_error(&json!({"error": ["a", "b"]})),
            Some("[\"a\",\"b\"]".to_string())
        );
        assert_eq!(upstream_error(&json!({"error": null})), None);
        assert_eq!(upstream_error(&json!([[{"label": "x", "score": 1.0}]])), None);
    }

    #[test]
    fn test_non_json_body_is_malformed() {
        let err = parse_body("<html>Bad Gateway</html>").unwrap_err();
        assert!(matches!(err, GatewayError::MalformedBody(_)));
    }

    #[test]
    fn test_timeout_detection() {
        assert!(GatewayError::Timeout(Duration::from_secs(1)).is_timeout());
        assert!(!GatewayError::Upstream("x".to_string()).is_timeout());
    }
}
