//! # Session State
//!
//! The conversation session controller. One `Session` exists per mounted
//! widget; hosts hold it by value and pass `&mut` to whoever needs to notify
//! it (the language coordinator, the event loop).
//!
//! ```text
//! Session
//! ├── id: Uuid                     // log correlation
//! ├── transcript: Transcript       // append-only, welcome message first
//! ├── language: String             // active language code
//! ├── is_open: bool                // panel visibility
//! ├── in_flight: Option<RequestId> // the single request slot
//! ├── suggestions_visible: bool    // quick chips under the transcript
//! ├── page: String                 // host page path sent as context
//! └── context_window: usize        // transcript entries sent per request (≤ 5)
//! ```
//!
//! A send is split in two so an event loop can keep handling input while the
//! request is out: [`Session::begin_send`] claims the slot and returns the
//! request, [`Session::complete_send`] records the outcome and frees it.
//! [`Session::send`] strings both together around a single `.await`.

use log::{debug, info, warn};
use uuid::Uuid;

use crate::core::content::{self, ContentEntry};
use crate::core::markup;
use crate::core::transcript::{Message, Role, Transcript};
use crate::transport::{
    AssistantRequest, AssistantTransport, ContextMessage, RequestContext, TransportError,
};

/// Hard ceiling on how many transcript entries go out with a request.
pub const MAX_CONTEXT_MESSAGES: usize = 5;

pub type RequestId = u64;

const REPLY_PREVIEW_CHARS: usize = 80;

/// A request claimed by [`Session::begin_send`], ready for the transport.
#[derive(Debug, Clone, PartialEq)]
pub struct OutboundRequest {
    pub id: RequestId,
    pub body: AssistantRequest,
}

pub struct Session {
    pub id: Uuid,
    transcript: Transcript,
    language: String,
    is_open: bool,
    in_flight: Option<RequestId>,
    next_request_id: RequestId,
    suggestions_visible: bool,
    page: String,
    context_window: usize,
}

impl Session {
    /// Creates a session and seeds it with the welcome message for `language`.
    pub fn new(language: &str, page: impl Into<String>) -> Self {
        let mut session = Self {
            id: Uuid::new_v4(),
            transcript: Transcript::new(),
            language: String::new(),
            is_open: false,
            in_flight: None,
            next_request_id: 1,
            suggestions_visible: false,
            page: page.into(),
            context_window: MAX_CONTEXT_MESSAGES,
        };
        session.initialize(language);
        session
    }

    /// Number of transcript entries sent as context, clamped to `1..=5`.
    pub fn with_context_window(mut self, window: usize) -> Self {
        self.context_window = window.clamp(1, MAX_CONTEXT_MESSAGES);
        self
    }

    // ── Panel ───────────────────────────────────────────────────────────

    pub fn open(&mut self) {
        self.is_open = true;
    }

    pub fn close(&mut self) {
        self.is_open = false;
    }

    pub fn toggle(&mut self) {
        self.is_open = !self.is_open;
    }

    pub fn is_open(&self) -> bool {
        self.is_open
    }

    // ── Language ────────────────────────────────────────────────────────

    /// Starts (or restarts) the conversation: fresh transcript holding only
    /// the welcome message, suggestions shown, request slot released.
    pub fn initialize(&mut self, language: &str) {
        if let Some(stale) = self.in_flight.take() {
            info!("Session {} reset with request {} still in flight", self.id, stale);
        }
        self.language = language.to_string();
        self.transcript.clear();
        let welcome = self.content().welcome;
        self.transcript
            .append(Message::new(Role::Assistant, welcome, self.language.clone()));
        self.suggestions_visible = true;
        debug!("Session {} initialized in '{}'", self.id, self.language);
    }

    /// Switches the active language. Existing messages keep their text and
    /// time label; unknown codes are accepted and resolve to English content.
    pub fn set_language(&mut self, language: &str) {
        if content::find(language).is_none() {
            debug!("No content for language '{}', English will be used", language);
        }
        self.language = language.to_string();
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    /// Content table entry for the active language.
    pub fn content(&self) -> &'static ContentEntry {
        content::lookup(&self.language)
    }

    // ── Transcript & transient UI ───────────────────────────────────────

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    pub fn page(&self) -> &str {
        &self.page
    }

    pub fn set_page(&mut self, page: impl Into<String>) {
        self.page = page.into();
    }

    /// Suggestions currently on screen; empty once the user has sent anything.
    pub fn suggestions(&self) -> &'static [&'static str] {
        if self.suggestions_visible {
            self.content().suggestions
        } else {
            &[]
        }
    }

    pub fn is_pending(&self) -> bool {
        self.in_flight.is_some()
    }

    /// The typing indicator is shown for exactly as long as a request is out.
    pub fn is_typing(&self) -> bool {
        self.is_pending()
    }

    // ── Send cycle ──────────────────────────────────────────────────────

    /// Validates input and claims the request slot.
    ///
    /// Returns `None` without touching any state when the trimmed text is
    /// empty or another request is still in flight.
    pub fn begin_send(&mut self, raw: &str) -> Option<OutboundRequest> {
        let text = raw.trim();
        if text.is_empty() {
            debug!("Ignoring empty message");
            return None;
        }
        if let Some(pending) = self.in_flight {
            debug!("Dropping send while request {} is in flight", pending);
            return None;
        }

        self.transcript
            .append(Message::new(Role::User, text, self.language.clone()));
        self.suggestions_visible = false;

        let id = self.next_request_id;
        self.next_request_id += 1;
        self.in_flight = Some(id);

        let body = AssistantRequest {
            message: text.to_string(),
            language: self.language.clone(),
            context: RequestContext {
                page: self.page.clone(),
                previous_messages: self
                    .transcript
                    .last_n(self.context_window)
                    .iter()
                    .map(ContextMessage::from)
                    .collect(),
            },
        };
        info!("Session {} sending request {}", self.id, id);
        Some(OutboundRequest { id, body })
    }

    /// Records the outcome of request `id` and frees the slot.
    ///
    /// Failures become the fallback text of the language active *now*.
    /// Completions for a request that is no longer in flight (the session was
    /// reset meanwhile) are dropped. Returns whether a reply was appended.
    pub fn complete_send(&mut self, id: RequestId, result: Result<String, TransportError>) -> bool {
        if self.in_flight != Some(id) {
            warn!("Session {} ignoring completion for stale request {}", self.id, id);
            return false;
        }
        self.in_flight = None;

        let text = match result {
            Ok(reply) => reply,
            Err(e) => {
                warn!("Assistant request {} failed, using fallback: {}", id, e);
                self.content().fallback.to_string()
            }
        };
        debug!("Request {} reply: {}", id, markup::log_preview(&text, REPLY_PREVIEW_CHARS));
        self.transcript
            .append(Message::new(Role::Assistant, text, self.language.clone()));
        true
    }

    /// Full exchange with one suspension point. Returns `false` when the input
    /// was rejected (empty, or a request already in flight).
    pub async fn send(&mut self, transport: &dyn AssistantTransport, raw: &str) -> bool {
        let Some(request) = self.begin_send(raw) else {
            return false;
        };
        let result = transport.post(&request.body).await;
        self.complete_send(request.id, result)
    }
}
