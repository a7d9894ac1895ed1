//! HTTP endpoint handlers.

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{info, warn};

use crate::error::{ApiError, ApiResult};
use crate::events::{EventSink, WebhookEvent};
use crate::publish::{publish, PublishRequest, PublishResponse};
use crate::telegram::MessageRelay;
use crate::Config;

/// Service name reported by the root endpoint.
pub const SERVICE_NAME: &str = "Social Aggregator Minimal API";

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub relay: Arc<dyn MessageRelay>,
    pub events: Arc<dyn EventSink>,
}

impl AppState {
    pub fn new(config: Config, relay: Arc<dyn MessageRelay>, events: Arc<dyn EventSink>) -> Self {
        Self {
            config: Arc::new(config),
            relay,
            events,
        }
    }
}

// =============================================================================
// Liveness
// =============================================================================

/// Root status response.
#[derive(Serialize)]
pub struct ServiceStatus {
    pub status: &'static str,
    pub service: &'static str,
}

/// Root endpoint.
pub async fn root() -> Json<ServiceStatus> {
    Json(ServiceStatus {
        status: "ok",
        service: SERVICE_NAME,
    })
}

/// Health check response.
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

/// Health check endpoint. Never consults configuration.
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "healthy" })
}

/// Empty 200 for `HEAD` probes.
pub async fn head_ok() -> StatusCode {
    StatusCode::OK
}

// =============================================================================
// Feed
// =============================================================================

/// Feed endpoint. Aggregation is not implemented; always empty.
pub async fn feed() -> Json<Vec<Value>> {
    Json(Vec::new())
}

// =============================================================================
// Telegram send
// =============================================================================

/// Query parameters for `GET /api/telegram/send`.
#[derive(Debug, Deserialize)]
pub struct SendQuery {
    pub chat_id: String,
    pub text: String,
}

/// Response for a relayed message.
#[derive(Serialize)]
pub struct SendResponse {
    pub ok: bool,
    pub result: Value,
}

/// Relay a single message. Requires the API key.
pub async fn telegram_send(
    State(state): State<AppState>,
    Query(query): Query<SendQuery>,
) -> ApiResult<Json<SendResponse>> {
    info!(chat_id = %query.chat_id, text_length = query.text.len(), "telegram_send_received");

    let result = state.relay.send_message(&query.chat_id, &query.text).await?;

    Ok(Json(SendResponse { ok: true, result }))
}

// =============================================================================
// Publish
// =============================================================================

/// Publish one post to many targets. Requires the API key.
pub async fn publish_post(
    State(state): State<AppState>,
    Json(request): Json<PublishRequest>,
) -> ApiResult<Json<PublishResponse>> {
    let report = publish(state.relay.as_ref(), &request).await;

    report.into_result().map_err(ApiError::Publish)?;

    Ok(Json(PublishResponse::ok()))
}

// =============================================================================
// Telegram webhook
// =============================================================================

/// Webhook acknowledgement.
#[derive(Serialize)]
pub struct WebhookAck {
    pub ok: bool,
}

/// Inbound Telegram webhook. Unauthenticated; any JSON is accepted.
///
/// The body is parsed regardless of `Content-Type`; only bodies that are
/// not JSON at all are rejected.
pub async fn telegram_webhook(
    State(state): State<AppState>,
    body: Bytes,
) -> ApiResult<Json<WebhookAck>> {
    let payload: Value = match serde_json::from_slice(&body) {
        Ok(payload) => payload,
        Err(e) => {
            warn!(body_length = body.len(), error = %e, "telegram_webhook_invalid_json");
            return Err(ApiError::InvalidJson(e));
        }
    };

    state.events.record(&WebhookEvent::telegram(payload));
    Ok(Json(WebhookAck { ok: true }))
}
