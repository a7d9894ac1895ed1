//! Wire types for the bot API `sendMessage` call.

use serde::Serialize;

/// Parse mode used for every relayed message.
pub const PARSE_MODE_HTML: &str = "HTML";

/// JSON body posted to `sendMessage`.
#[derive(Debug, Clone, Serialize)]
pub struct SendMessageRequest<'a> {
    pub chat_id: &'a str,
    pub text: &'a str,
    pub parse_mode: &'static str,
}

impl<'a> SendMessageRequest<'a> {
    /// Build an HTML-formatted message for `chat_id`.
    pub fn html(chat_id: &'a str, text: &'a str) -> Self {
        Self {
            chat_id,
            text,
            parse_mode: PARSE_MODE_HTML,
        }
    }
}
