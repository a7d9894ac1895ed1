//! Request and response shapes for `POST /api/posts/publish`.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Kind of media attached to a post.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AttachmentKind {
    Image,
    Video,
    Link,
}

/// A media attachment. Accepted on input, not forwarded to any provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Attachment {
    #[serde(rename = "type")]
    pub kind: AttachmentKind,
    pub url: String,
    #[serde(default, alias = "thumb", skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,
}

/// The body of a post.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Content {
    pub text: String,
    #[serde(default)]
    pub media: Vec<Attachment>,
}

/// Destination platform of a target.
///
/// Unknown provider names are kept rather than rejected so that the
/// publish loop can report them per target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Provider {
    Telegram,
    Other(String),
}

impl Provider {
    pub fn as_str(&self) -> &str {
        match self {
            Provider::Telegram => "telegram",
            Provider::Other(name) => name,
        }
    }
}

impl From<String> for Provider {
    fn from(name: String) -> Self {
        match name.as_str() {
            // "tg" is the legacy spelling still sent by older clients
            "telegram" | "tg" => Provider::Telegram,
            _ => Provider::Other(name),
        }
    }
}

impl From<Provider> for String {
    fn from(provider: Provider) -> Self {
        match provider {
            Provider::Telegram => "telegram".to_string(),
            Provider::Other(name) => name,
        }
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where to deliver a post.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Target {
    pub provider: Provider,
    #[serde(rename = "destinationId", alias = "sourceId")]
    pub destination_id: String,
}

/// Body of `POST /api/posts/publish`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PublishRequest {
    pub targets: Vec<Target>,
    pub content: Content,
}

/// Successful publish response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PublishResponse {
    pub status: String,
}

impl PublishResponse {
    pub fn ok() -> Self {
        Self {
            status: "ok".to_string(),
        }
    }
}

/// Failure recorded for one target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TargetError {
    pub provider: Provider,
    #[serde(rename = "destinationId")]
    pub destination_id: String,
    pub error: String,
}
