//! Web server module.
//!
//! Routes:
//! - `/`, `/health`: liveness, no auth
//! - `/api/feed`: empty feed, no auth
//! - `/api/telegram/send`, `/api/posts/publish`: outbound relay, `X-API-Key`
//! - `/api/webhooks/telegram`: inbound callbacks, no auth

pub mod auth;
pub mod handlers;

use axum::{
    middleware::from_fn_with_state,
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

pub use auth::{authorize, require_api_key, API_KEY_HEADER};
pub use handlers::{
    feed, head_ok, health, publish_post, root, telegram_send, telegram_webhook, AppState,
    HealthResponse, SendQuery, SendResponse, ServiceStatus, WebhookAck, SERVICE_NAME,
};

/// Build the application router.
pub fn router(state: AppState) -> Router {
    let protected = Router::new()
        .route("/api/telegram/send", get(telegram_send))
        .route("/api/posts/publish", post(publish_post))
        .layer(from_fn_with_state(state.clone(), require_api_key));

    Router::new()
        .route("/", get(root).head(head_ok))
        .route("/health", get(health).head(head_ok))
        .route("/api/feed", get(feed))
        .route("/api/webhooks/telegram", post(telegram_webhook))
        .merge(protected)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
