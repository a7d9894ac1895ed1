//! Sink for inbound webhook events.
//!
//! The webhook handler hands every payload to an [`EventSink`] and
//! acknowledges; it never interprets the payload itself.

use serde_json::Value;
use tracing::info;

/// An inbound callback received from a messaging platform.
#[derive(Debug, Clone)]
pub struct WebhookEvent {
    /// Platform that sent the callback
    pub source: &'static str,
    /// Raw JSON payload
    pub payload: Value,
}

impl WebhookEvent {
    pub fn telegram(payload: Value) -> Self {
        Self {
            source: "telegram",
            payload,
        }
    }

    /// Telegram `update_id`, when the payload is an Update object.
    pub fn update_id(&self) -> Option<i64> {
        self.payload.get("update_id").and_then(Value::as_i64)
    }
}

/// Destination for webhook events.
pub trait EventSink: Send + Sync {
    fn record(&self, event: &WebhookEvent);
}

/// Writes each event as a structured `tracing` event.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl EventSink for TracingSink {
    fn record(&self, event: &WebhookEvent) {
        info!(
            source = event.source,
            update_id = ?event.update_id(),
            payload = %event.payload,
            "telegram_webhook_received"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_update_id() {
        let event = WebhookEvent::telegram(json!({"update_id": 1001, "message": {}}));
        assert_eq!(event.update_id(), Some(1001));

        let event = WebhookEvent::telegram(json!([1, 2, 3]));
        assert_eq!(event.update_id(), None);
    }

    #[test]
    fn test_tracing_sink_accepts_any_json() {
        let sink = TracingSink;
        sink.record(&WebhookEvent::telegram(json!(null)));
        sink.record(&WebhookEvent::telegram(json!("text")));
        sink.record(&WebhookEvent::telegram(json!({"update_id": 1})));
    }
}
