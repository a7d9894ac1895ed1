//! Social Relay - minimal HTTP relay to the Telegram bot API.
//!
//! ## Architecture
//!
//! ```text
//! Client → /api/posts/publish → publish() → MessageRelay → Telegram
//! Telegram → /api/webhooks/telegram → EventSink
//! ```

pub mod config;
pub mod error;
pub mod events;
pub mod publish;
pub mod telegram;
pub mod web;

// Re-export commonly used types
pub use config::Config;
pub use error::{ApiError, ApiResult, RelayError};
pub use events::{EventSink, TracingSink, WebhookEvent};
pub use publish::{publish, PublishReport, PublishRequest, PublishResponse, TargetError};
pub use telegram::{MessageRelay, TelegramClient};
pub use web::{router, AppState};
