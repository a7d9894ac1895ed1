//! Shared-secret authentication for protected routes.
//!
//! Callers present the secret in the `X-API-Key` header. There is no
//! query-string fallback.

use axum::{
    extract::{Request, State},
    http::HeaderMap,
    middleware::Next,
    response::Response,
};
use tracing::warn;

use crate::config::Config;
use crate::error::{ApiError, ApiResult};
use crate::web::AppState;

/// Header carrying the caller's credential.
pub const API_KEY_HEADER: &str = "X-API-Key";

/// Check the request headers against the configured secret.
///
/// A missing secret is a server misconfiguration and is reported as
/// such, not as an authorization failure.
pub fn authorize(config: &Config, headers: &HeaderMap) -> ApiResult<()> {
    let expected = match config.api_secret.as_deref() {
        Some(secret) => secret,
        None => {
            warn!("api_secret_not_configured");
            return Err(ApiError::Configuration("API_SECRET"));
        }
    };

    let provided = headers.get(API_KEY_HEADER).map(|v| v.as_bytes());

    match provided {
        Some(provided) if constant_time_eq(provided, expected.as_bytes()) => Ok(()),
        Some(provided) => {
            warn!(provided_length = provided.len(), "api_key_invalid");
            Err(ApiError::Unauthorized)
        }
        None => {
            warn!("api_key_missing");
            Err(ApiError::Unauthorized)
        }
    }
}

/// Middleware that rejects requests failing [`authorize`].
///
/// Runs before the handler's extractors, so a rejected request never has
/// its query or body parsed.
pub async fn require_api_key(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    authorize(&state.config, request.headers())?;
    Ok(next.run(request).await)
}

/// Constant-time byte comparison to prevent timing attacks.
fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }

    let mut result = 0u8;
    for (x, y) in a.iter().zip(b.iter()) {
        result |= x ^ y;
    }
    result == 0
}
