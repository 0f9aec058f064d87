//! Outbound services
//!
//! The classification gateway sits behind the [`Classifier`] trait so the
//! pipeline and HTTP handlers can run against a stand-in during tests.

pub mod classification_client;

pub use classification_client::{ClassificationClient, GatewayError, GatewaySettings};

use async_trait::async_trait;
use sentiment_common::config::{resolve_api_key, ResponseShape, TomlConfig};

use crate::models::ClassificationPayload;

/// Sentiment classification capability
#[async_trait]
pub trait Classifier: Send + Sync {
    /// Layout used to interpret successful payloads
    fn response_shape(&self) -> ResponseShape;

    /// Send one batched request and return the parsed body untouched
    ///
    /// An explicit error object in the body is reported as
    /// [`GatewayError::Upstream`], never returned as a payload.
    async fn classify_raw(&self, messages: &[String]) -> Result<serde_json::Value, GatewayError>;

    /// Classify messages and interpret the body per [`Self::response_shape`]
    async fn classify(&self, messages: &[String]) -> Result<ClassificationPayload, GatewayError> {
        let body = self.classify_raw(messages).await?;
        ClassificationPayload::from_value(body, self.response_shape())
            .map_err(|e| GatewayError::MalformedBody(e.to_string()))
    }
}

/// Build the HTTP gateway from bootstrap configuration
///
/// Resolves the credential once here; the client never reads the
/// environment afterwards.
pub fn build_classifier(config: &TomlConfig) -> sentiment_common::Result<ClassificationClient> {
    let api_key = resolve_api_key(config)?;
    let settings = GatewaySettings::from_config(&config.classifier, api_key);
    tracing::info!(
        endpoint = %settings.endpoint,
        timeout_secs = settings.timeout.as_secs(),
        response_shape = ?settings.response_shape,
        "Classification gateway configured"
    );
    ClassificationClient::new(settings)
        .map_err(|e| sentiment_common::Error::Internal(e.to_string()))
}
