//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::core::state::Session;
use crate::transport::{AssistantRequest, AssistantTransport, TransportError};

/// A transport that answers from a fixed script and records every request.
/// Once the script runs out, every post fails with a network error.
pub struct ScriptedTransport {
    replies: Mutex<VecDeque<Result<String, TransportError>>>,
    requests: Mutex<Vec<AssistantRequest>>,
}

impl ScriptedTransport {
    pub fn replying<'a>(replies: impl IntoIterator<Item = &'a str>) -> Self {
        Self {
            replies: Mutex::new(replies.into_iter().map(|r| Ok(r.to_string())).collect()),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn failing() -> Self {
        Self::replying([])
    }

    pub fn requests(&self) -> Vec<AssistantRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl AssistantTransport for ScriptedTransport {
    fn name(&self) -> &str {
        "scripted"
    }

    async fn post(&self, request: &AssistantRequest) -> Result<String, TransportError> {
        self.requests.lock().unwrap().push(request.clone());
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(TransportError::Network("script exhausted".to_string())))
    }
}

/// Creates a closed session on the home page in `language`.
pub fn test_session(language: &str) -> Session {
    Session::new(language, "/")
}
