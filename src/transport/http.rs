//! HTTP transport for the assistant backend.
//!
//! One POST per user message, JSON in and JSON out, no auth and no retries.
//! Both the connect phase and the whole request are bounded so a dead backend
//! turns into a fallback message instead of a typing indicator that never ends.

use std::time::Duration;

use async_trait::async_trait;
use log::{debug, info, warn};

use crate::transport::{AssistantReply, AssistantRequest, AssistantTransport, TransportError};

pub const DEFAULT_ENDPOINT: &str = "http://localhost:8000/api/support/chatbot";
pub const DEFAULT_TIMEOUT_SECS: u64 = 20;
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 5;

/// Assistant transport backed by `reqwest`.
pub struct HttpTransport {
    endpoint: String,
    client: reqwest::Client,
}

impl HttpTransport {
    pub fn new(endpoint: impl Into<String>, timeout: Duration, connect_timeout: Duration) -> Result<Self, TransportError> {
        let endpoint = endpoint.into();
        reqwest::Url::parse(&endpoint)
            .map_err(|e| TransportError::Config(format!("invalid endpoint {endpoint:?}: {e}")))?;

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .connect_timeout(connect_timeout)
            .build()
            .map_err(|e| TransportError::Config(e.to_string()))?;

        Ok(Self { endpoint, client })
    }

    /// Transport with the default timeouts.
    pub fn with_endpoint(endpoint: impl Into<String>) -> Result<Self, TransportError> {
        Self::new(
            endpoint,
            Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            Duration::from_secs(DEFAULT_CONNECT_TIMEOUT_SECS),
        )
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

fn classify(e: reqwest::Error) -> TransportError {
    if e.is_timeout() {
        TransportError::Timeout
    } else if e.is_decode() {
        TransportError::Parse(e.to_string())
    } else {
        TransportError::Network(e.to_string())
    }
}

#[async_trait]
impl AssistantTransport for HttpTransport {
    fn name(&self) -> &str {
        "http"
    }

    async fn post(&self, request: &AssistantRequest) -> Result<String, TransportError> {
        info!(
            "Assistant request: endpoint={}, language={}, context_len={}",
            self.endpoint,
            request.language,
            request.context.previous_messages.len()
        );

        // `.json()` sets Content-Type: application/json and nothing else.
        let response = self
            .client
            .post(&self.endpoint)
            .json(request)
            .send()
            .await
            .map_err(classify)?;

        debug!("Assistant response status: {}", response.status());

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let err_body = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            warn!("Assistant API error: {} - {}", status, err_body);
            return Err(TransportError::Api {
                status,
                message: err_body,
            });
        }

        let body = response.text().await.map_err(classify)?;
        let reply: AssistantReply =
            serde_json::from_str(&body).map_err(|e| TransportError::Parse(e.to_string()))?;

        let text = reply.into_text().ok_or(TransportError::MissingReply)?;
        debug!("Assistant reply: {} bytes", text.len());
        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_invalid_endpoint() {
        let result = HttpTransport::with_endpoint("not a url");
        assert!(matches!(result, Err(TransportError::Config(_))));
    }

    #[test]
    fn test_keeps_endpoint() {
        let transport = HttpTransport::with_endpoint(DEFAULT_ENDPOINT).unwrap();
        assert_eq!(transport.endpoint(), DEFAULT_ENDPOINT);
        assert_eq!(transport.name(), "http");
    }
}
