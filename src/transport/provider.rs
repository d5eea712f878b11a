use std::fmt;

use async_trait::async_trait;

use super::types::AssistantRequest;

/// Errors that can occur while calling the assistant backend.
///
/// The session controller never branches on these: every variant ends up as
/// the localized fallback message. They exist so the log says what went wrong.
#[derive(Debug)]
pub enum TransportError {
    /// Transport misconfigured (bad endpoint, client could not be built).
    Config(String),
    /// Network-level failure (DNS, connection refused, reset).
    Network(String),
    /// The request exceeded the configured timeout.
    Timeout,
    /// Backend answered with a non-2xx status.
    Api { status: u16, message: String },
    /// Body was not the JSON we expected.
    Parse(String),
    /// Body parsed but `response` was absent, null, or empty.
    MissingReply,
}

impl fmt::Display for TransportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransportError::Config(msg) => write!(f, "config error: {msg}"),
            TransportError::Network(msg) => write!(f, "network error: {msg}"),
            TransportError::Timeout => write!(f, "request timed out"),
            TransportError::Api { status, message } => {
                write!(f, "API error (HTTP {status}): {message}")
            }
            TransportError::Parse(msg) => write!(f, "parse error: {msg}"),
            TransportError::MissingReply => write!(f, "response field missing or empty"),
        }
    }
}

impl std::error::Error for TransportError {}

#[async_trait]
pub trait AssistantTransport: Send + Sync {
    /// Returns the name of the transport (for logs).
    fn name(&self) -> &str;

    /// Sends one request and resolves to the assistant's reply text.
    async fn post(&self, request: &AssistantRequest) -> Result<String, TransportError>;
}
