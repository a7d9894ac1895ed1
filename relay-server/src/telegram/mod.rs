//! Outbound relay to the Telegram bot API.
//!
//! Handlers talk to [`MessageRelay`] rather than to [`TelegramClient`]
//! directly, so the HTTP surface can be exercised without network access.

pub mod client;
pub mod types;

use async_trait::async_trait;
use serde_json::Value;

use crate::error::RelayError;

pub use client::TelegramClient;
pub use types::{SendMessageRequest, PARSE_MODE_HTML};

/// Something that can deliver a text message to a chat.
#[async_trait]
pub trait MessageRelay: Send + Sync {
    /// Send `text` to `chat_id`, returning the upstream response body.
    async fn send_message(&self, chat_id: &str, text: &str) -> Result<Value, RelayError>;
}
