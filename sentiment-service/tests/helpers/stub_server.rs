//! Local HTTP stand-in for the hosted classification service

use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::post,
    Router,
};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// What the stub answers with
#[derive(Clone)]
pub enum StubReply {
    /// Status code and raw body text
    Raw(StatusCode, String),
    /// Sleep before answering 200 with the body
    Delayed(Duration, String),
}

#[derive(Default)]
struct Captured {
    authorization: Option<String>,
    body: Option<serde_json::Value>,
    requests: usize,
}

#[derive(Clone)]
struct StubState {
    reply: StubReply,
    captured: Arc<Mutex<Captured>>,
}

/// Running stub server
pub struct StubServer {
    pub endpoint: String,
    captured: Arc<Mutex<Captured>>,
}

impl StubServer {
    pub fn authorization(&self) -> Option<String> {
        self.captured.lock().unwrap().authorization.clone()
    }

    pub fn request_body(&self) -> Option<serde_json::Value> {
        self.captured.lock().unwrap().body.clone()
    }

    pub fn requests(&self) -> usize {
        self.captured.lock().unwrap().requests
    }
}

async fn classify(State(state): State<StubState>, headers: HeaderMap, body: String) -> Response {
    {
        let mut captured = state.captured.lock().unwrap();
        captured.requests += 1;
        captured.authorization = headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        captured.body = serde_json::from_str(&body).ok();
    }

    match state.reply {
        StubReply::Raw(status, text) => (status, text).into_response(),
        StubReply::Delayed(delay, text) => {
            tokio::time::sleep(delay).await;
            (StatusCode::OK, text).into_response()
        }
    }
}

/// Bind an ephemeral port and serve `reply` on POST /classify
pub async fn spawn_stub(reply: StubReply) -> StubServer {
    let captured = Arc::new(Mutex::new(Captured::default()));
    let state = StubState {
        reply,
        captured: captured.clone(),
    };
    let app = Router::new()
        .route("/classify", post(classify))
        .with_state(state);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    StubServer {
        endpoint: format!("http://{}/classify", addr),
        captured,
    }
}
