//! Shared fixtures for router-level tests.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{Request, Response},
    Router,
};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

use social_relay::{router, AppState, Config, EventSink, MessageRelay, RelayError, WebhookEvent};

pub const SECRET: &str = "test-secret";

/// Relay that records calls and fails for selected chat ids.
#[derive(Default)]
pub struct FakeRelay {
    pub failing: Vec<String>,
    pub calls: Mutex<Vec<(String, String)>>,
}

impl FakeRelay {
    pub fn failing(ids: &[&str]) -> Self {
        Self {
            failing: ids.iter().map(|s| s.to_string()).collect(),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn chat_ids(&self) -> Vec<String> {
        self.calls.lock().unwrap().iter().map(|(id, _)| id.clone()).collect()
    }
}

#[async_trait]
impl MessageRelay for FakeRelay {
    async fn send_message(&self, chat_id: &str, text: &str) -> Result<Value, RelayError> {
        self.calls
            .lock()
            .unwrap()
            .push((chat_id.to_string(), text.to_string()));

        if self.failing.iter().any(|id| id == chat_id) {
            return Err(RelayError::Upstream {
                status: 400,
                body: r#"{"ok":false,"description":"Bad Request: chat not found"}"#.to_string(),
            });
        }

        Ok(json!({"ok": true, "result": {"message_id": 1, "chat": {"id": chat_id}}}))
    }
}

/// Sink that keeps every recorded event.
#[derive(Default)]
pub struct RecordingSink {
    pub events: Mutex<Vec<WebhookEvent>>,
}

impl EventSink for RecordingSink {
    fn record(&self, event: &WebhookEvent) {
        self.events.lock().unwrap().push(event.clone());
    }
}

pub struct TestApp {
    pub router: Router,
    pub relay: Arc<FakeRelay>,
    pub sink: Arc<RecordingSink>,
}

impl TestApp {
    pub fn new(config: Config, relay: FakeRelay) -> Self {
        let relay = Arc::new(relay);
        let sink = Arc::new(RecordingSink::default());
        let state = AppState::new(config, relay.clone(), sink.clone());

        Self {
            router: router(state),
            relay,
            sink,
        }
    }

    /// App with the shared secret configured and a relay that always succeeds.
    pub fn configured() -> Self {
        Self::new(configured_config(), FakeRelay::default())
    }

    /// Send a request through the router via `tower::ServiceExt::oneshot`.
    pub async fn oneshot(&self, request: Request<Body>) -> Response<Body> {
        self.router
            .clone()
            .oneshot(request)
            .await
            .expect("router is infallible")
    }
}

pub fn configured_config() -> Config {
    Config {
        api_secret: Some(SECRET.to_string()),
        telegram_bot_token: Some("123:abc".to_string()),
        ..Config::default()
    }
}

pub fn get(uri: &str, key: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method("GET").uri(uri);
    if let Some(key) = key {
        builder = builder.header("X-API-Key", key);
    }
    builder.body(Body::empty()).unwrap()
}

pub fn head(uri: &str) -> Request<Body> {
    Request::builder()
        .method("HEAD")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

pub fn post_json(uri: &str, key: Option<&str>, body: &Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json");
    if let Some(key) = key {
        builder = builder.header("X-API-Key", key);
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

pub async fn body_bytes(response: Response<Body>) -> Vec<u8> {
    response
        .into_body()
        .collect()
        .await
        .unwrap()
        .to_bytes()
        .to_vec()
}

pub async fn body_json(response: Response<Body>) -> Value {
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}
