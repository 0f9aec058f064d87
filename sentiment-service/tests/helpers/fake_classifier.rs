//! In-process stand-in for the classification gateway

use async_trait::async_trait;
use sentiment_common::config::ResponseShape;
use sentiment_service::services::{Classifier, GatewayError};
use serde_json::Value;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

type Reply = Box<dyn Fn(&[String]) -> Result<Value, GatewayError> + Send + Sync>;

/// Classifier returning canned replies and recording every call
pub struct FakeClassifier {
    shape: ResponseShape,
    reply: Reply,
    calls: AtomicUsize,
    last_inputs: Mutex<Vec<String>>,
}

impl FakeClassifier {
    pub fn new<F>(shape: ResponseShape, reply: F) -> Self
    where
        F: Fn(&[String]) -> Result<Value, GatewayError> + Send + Sync + 'static,
    {
        Self {
            shape,
            reply: Box::new(reply),
            calls: AtomicUsize::new(0),
            last_inputs: Mutex::new(Vec::new()),
        }
    }

    /// Always answer with the same body
    pub fn returning(shape: ResponseShape, body: Value) -> Self {
        Self::new(shape, move |_| Ok(body.clone()))
    }

    /// Label every message with a fixed label and score, one singleton list each
    pub fn labelling_all(label: &'static str, score: f64) -> Self {
        Self::new(ResponseShape::PerMessage, move |messages| {
            Ok(Value::Array(
                messages
                    .iter()
                    .map(|_| serde_json::json!([{"label": label, "score": score}]))
                    .collect(),
            ))
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_inputs(&self) -> Vec<String> {
        self.last_inputs.lock().unwrap().clone()
    }
}

#[async_trait]
impl Classifier for FakeClassifier {
    fn response_shape(&self) -> ResponseShape {
        self.shape
    }

    async fn classify_raw(&self, messages: &[String]) -> Result<Value, GatewayError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_inputs.lock().unwrap() = messages.to_vec();
        (self.reply)(messages)
    }
}
