//! reqwest-backed [`MessageRelay`] implementation.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde_json::Value;
use tracing::{error, info, warn};
use url::Url;

use super::types::SendMessageRequest;
use super::MessageRelay;
use crate::config::Config;
use crate::error::RelayError;

/// HTTP client for the Telegram bot API.
///
/// Holds one pooled [`Client`] for the lifetime of the process. The bot
/// token is optional here; sends fail with [`RelayError::NotConfigured`]
/// when it is missing.
#[derive(Clone)]
pub struct TelegramClient {
    http: Client,
    api_base: String,
    bot_token: Option<String>,
    timeout: Duration,
}

impl TelegramClient {
    /// Create a client from the application configuration.
    pub fn new(config: &Config) -> Result<Self, RelayError> {
        let timeout = config.request_timeout();
        let http = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            http,
            api_base: config.telegram_api_base.clone(),
            bot_token: config.telegram_bot_token.clone(),
            timeout,
        })
    }

    /// Build the `sendMessage` URL for the configured bot.
    fn send_message_url(&self) -> Result<Url, RelayError> {
        let token = self.bot_token.as_deref().ok_or(RelayError::NotConfigured)?;
        let url = Url::parse(&format!("{}/bot{}/sendMessage", self.api_base, token))?;
        Ok(url)
    }
}

#[async_trait]
impl MessageRelay for TelegramClient {
    async fn send_message(&self, chat_id: &str, text: &str) -> Result<Value, RelayError> {
        let url = match self.send_message_url() {
            Ok(url) => url,
            Err(e) => {
                error!(chat_id = chat_id, error = %e, "telegram_send_not_configured");
                return Err(e);
            }
        };

        info!(
            chat_id = chat_id,
            text_length = text.len(),
            timeout_seconds = self.timeout.as_secs_f64(),
            "telegram_send_starting"
        );

        let response = match self
            .http
            .post(url)
            .json(&SendMessageRequest::html(chat_id, text))
            .send()
            .await
        {
            Ok(resp) => resp,
            Err(e) => {
                // reqwest errors embed the URL, which contains the bot token
                let e = e.without_url();
                if e.is_timeout() {
                    error!(
                        chat_id = chat_id,
                        timeout_seconds = self.timeout.as_secs_f64(),
                        error = %e,
                        "telegram_send_timeout"
                    );
                } else {
                    error!(chat_id = chat_id, error = %e, "telegram_send_request_error");
                }
                return Err(RelayError::Transport(e));
            }
        };

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| RelayError::Transport(e.without_url()))?;

        if status != StatusCode::OK {
            warn!(
                chat_id = chat_id,
                status_code = status.as_u16(),
                body_length = body.len(),
                "telegram_send_rejected"
            );
            return Err(RelayError::Upstream {
                status: status.as_u16(),
                body,
            });
        }

        info!(chat_id = chat_id, status_code = status.as_u16(), "telegram_send_complete");

        Ok(parse_body(body))
    }
}

/// Return the upstream body as JSON, or as a JSON string if it is not JSON.
fn parse_body(body: String) -> Value {
    serde_json::from_str(&body).unwrap_or(Value::String(body))
}
