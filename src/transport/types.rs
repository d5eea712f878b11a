//! Wire types for the assistant backend.
//!
//! ```text
//! POST <endpoint>
//! {
//!   "message": "Hello",
//!   "language": "en",
//!   "context": {
//!     "page": "/pricing",
//!     "previous_messages": [ {"type": "bot", "text": "...", "timestamp": "..."} ]
//!   }
//! }
//!
//! 200 OK
//! { "response": "Hi there!" }
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::transcript::{Message, Role};

/// Request body posted to the assistant endpoint.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct AssistantRequest {
    pub message: String,
    pub language: String,
    pub context: RequestContext,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct RequestContext {
    /// Path of the page hosting the widget.
    pub page: String,
    /// Most recent transcript entries, oldest first.
    pub previous_messages: Vec<ContextMessage>,
}

/// A transcript entry as the backend sees it.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct ContextMessage {
    #[serde(rename = "type")]
    pub role: Role,
    pub text: String,
    pub timestamp: DateTime<Utc>,
}

impl From<&Message> for ContextMessage {
    fn from(message: &Message) -> Self {
        Self {
            role: message.role,
            text: message.text.clone(),
            timestamp: message.timestamp,
        }
    }
}

/// Success body. Any other fields the backend adds (`needs_ticket`,
/// `suggested_faqs`, `confidence`, ...) are ignored.
#[derive(Deserialize, Debug, Default)]
pub struct AssistantReply {
    #[serde(default)]
    pub response: Option<String>,
}

impl AssistantReply {
    /// The reply text, if it is present and non-blank.
    pub fn into_text(self) -> Option<String> {
        self.response.filter(|text| !text.trim().is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_request_serializes_to_backend_shape() {
        let timestamp = Utc.with_ymd_and_hms(2026, 3, 1, 9, 15, 0).unwrap();
        let request = AssistantRequest {
            message: "Hello".to_string(),
            language: "fr".to_string(),
            context: RequestContext {
                page: "/pricing".to_string(),
                previous_messages: vec![ContextMessage {
                    role: Role::Assistant,
                    text: "Bonjour".to_string(),
                    timestamp,
                }],
            },
        };

        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["message"], "Hello");
        assert_eq!(json["language"], "fr");
        assert_eq!(json["context"]["page"], "/pricing");
        let first = &json["context"]["previous_messages"][0];
        assert_eq!(first["type"], "bot");
        assert_eq!(first["text"], "Bonjour");
        assert_eq!(first["timestamp"], "2026-03-01T09:15:00Z");
    }

    #[test]
    fn test_reply_ignores_unknown_fields() {
        let body = r#"{"response":"Hi","needs_ticket":false,"suggested_faqs":[],"confidence":0.9}"#;
        let reply: AssistantReply = serde_json::from_str(body).unwrap();
        assert_eq!(reply.into_text().as_deref(), Some("Hi"));
    }

    #[test]
    fn test_reply_missing_null_or_blank_is_none() {
        for body in [r#"{}"#, r#"{"response":null}"#, r#"{"response":"  "}"#] {
            let reply: AssistantReply = serde_json::from_str(body).unwrap();
            assert!(reply.into_text().is_none(), "body {body} should have no reply");
        }
    }
}
