//! Multi-target publish orchestration.
//!
//! ## Processing Flow
//!
//! ```text
//! PublishRequest → publish() → [TargetOutcome; n] → PublishReport
//! ```
//!
//! Targets are handled one at a time, in request order. A failing target
//! is recorded and the loop moves on; nothing already sent is undone.

pub mod types;

use tracing::{info, warn};

use crate::telegram::MessageRelay;

pub use types::{
    Attachment, AttachmentKind, Content, Provider, PublishRequest, PublishResponse, Target,
    TargetError,
};

/// Error text recorded for providers without a relay.
pub const NOT_IMPLEMENTED: &str = "not implemented";

/// Result of delivering to one target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TargetOutcome {
    Delivered,
    Failed(TargetError),
}

/// Per-target outcomes of a publish, in request order.
#[derive(Debug, Default)]
pub struct PublishReport {
    pub outcomes: Vec<TargetOutcome>,
}

impl PublishReport {
    /// Number of targets that were delivered.
    pub fn delivered(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(o, TargetOutcome::Delivered))
            .count()
    }

    /// `Ok` when every target was delivered, otherwise all failures.
    pub fn into_result(self) -> Result<(), Vec<TargetError>> {
        let errors: Vec<TargetError> = self
            .outcomes
            .into_iter()
            .filter_map(|o| match o {
                TargetOutcome::Failed(e) => Some(e),
                TargetOutcome::Delivered => None,
            })
            .collect();

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

/// Deliver `request.content` to every target.
pub async fn publish(relay: &dyn MessageRelay, request: &PublishRequest) -> PublishReport {
    info!(
        targets = request.targets.len(),
        text_length = request.content.text.len(),
        "publish_start"
    );

    if !request.content.media.is_empty() {
        // TODO: forward attachments once sendPhoto/sendMediaGroup are wired up
        warn!(
            media_count = request.content.media.len(),
            "publish_media_ignored"
        );
    }

    let mut report = PublishReport::default();

    for target in &request.targets {
        let outcome = deliver(relay, target, &request.content.text).await;
        report.outcomes.push(outcome);
    }

    info!(
        targets = request.targets.len(),
        delivered = report.delivered(),
        "publish_complete"
    );

    report
}

async fn deliver(relay: &dyn MessageRelay, target: &Target, text: &str) -> TargetOutcome {
    let failed = |error: String| {
        TargetOutcome::Failed(TargetError {
            provider: target.provider.clone(),
            destination_id: target.destination_id.clone(),
            error,
        })
    };

    match &target.provider {
        Provider::Telegram => match relay.send_message(&target.destination_id, text).await {
            Ok(_) => {
                info!(
                    provider = %target.provider,
                    destination_id = %target.destination_id,
                    "publish_target_delivered"
                );
                TargetOutcome::Delivered
            }
            Err(e) => {
                warn!(
                    provider = %target.provider,
                    destination_id = %target.destination_id,
                    error = %e,
                    "publish_target_failed"
                );
                failed(e.to_string())
            }
        },
        Provider::Other(name) => {
            warn!(
                provider = %name,
                destination_id = %target.destination_id,
                "publish_provider_not_implemented"
            );
            failed(NOT_IMPLEMENTED.to_string())
        }
    }
}
