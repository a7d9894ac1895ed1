//! Error types for the relay and the HTTP surface.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use crate::publish::TargetError;

/// Errors from a single outbound call to the messaging platform.
#[derive(Debug, Error)]
pub enum RelayError {
    /// The bot token is not configured.
    #[error("TELEGRAM_BOT_TOKEN is not set")]
    NotConfigured,

    /// The bot API answered with something other than 200.
    #[error("Telegram error: {body}")]
    Upstream { status: u16, body: String },

    /// The request never produced a response (connect failure, timeout).
    #[error("Telegram request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The configured API base could not be turned into a request URL.
    #[error("Invalid Telegram API endpoint: {0}")]
    InvalidEndpoint(#[from] url::ParseError),
}

/// Errors returned by HTTP handlers.
#[derive(Debug, Error)]
pub enum ApiError {
    /// A required secret is missing from the server configuration.
    #[error("{0} is not set")]
    Configuration(&'static str),

    /// Caller credential missing or not equal to the shared secret.
    #[error("Unauthorized")]
    Unauthorized,

    /// Single-target relay failed.
    #[error(transparent)]
    Relay(#[from] RelayError),

    /// Request body is not JSON.
    #[error("Invalid JSON body: {0}")]
    InvalidJson(#[from] serde_json::Error),

    /// One or more publish targets failed.
    #[error("Publish failed for {} target(s)", .0.len())]
    Publish(Vec<TargetError>),
}

/// Error response body for JSON responses.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Machine-readable error code.
    pub error: &'static str,
    /// Human-readable error message.
    pub message: String,
    /// Per-target failures, present only for publish errors.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<TargetError>>,
}

impl ApiError {
    fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            Self::Configuration(_) => (StatusCode::INTERNAL_SERVER_ERROR, "CONFIGURATION_ERROR"),
            Self::Unauthorized => (StatusCode::UNAUTHORIZED, "UNAUTHORIZED"),
            Self::Relay(RelayError::NotConfigured) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "CONFIGURATION_ERROR")
            }
            Self::Relay(_) => (StatusCode::INTERNAL_SERVER_ERROR, "UPSTREAM_ERROR"),
            Self::InvalidJson(_) => (StatusCode::BAD_REQUEST, "INVALID_JSON"),
            Self::Publish(_) => (StatusCode::INTERNAL_SERVER_ERROR, "PUBLISH_FAILED"),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();
        let message = self.to_string();

        let errors = match self {
            Self::Publish(errors) => Some(errors),
            _ => None,
        };

        let body = Json(ErrorResponse {
            error: code,
            message,
            errors,
        });

        (status, body).into_response()
    }
}

/// Result type for handler operations.
pub type ApiResult<T> = Result<T, ApiError>;
