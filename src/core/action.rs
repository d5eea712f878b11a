//! # Actions
//!
//! Everything that can happen to the widget becomes an `Action`.
//! User presses Enter? That's `Action::Submit(text)`.
//! Backend answers? That's `Action::ReplyReceived { .. }`.
//!
//! The `update()` function takes the session and an action, mutates the
//! session, and returns an `Effect` telling the host what I/O to perform.
//! No I/O happens here.
//!
//! ```text
//! Session + Action  →  update()  →  Effect
//! ```
//!
//! A `SpawnRequest` effect must eventually be answered with exactly one
//! `ReplyReceived` carrying the same request id.

use log::debug;

use crate::core::state::{OutboundRequest, RequestId, Session};
use crate::transport::TransportError;

#[derive(Debug)]
pub enum Action {
    Open,
    Close,
    Toggle,
    /// Restart the conversation in the active language.
    Reset,
    SetLanguage(String),
    Submit(String),
    /// A quick suggestion chip was clicked (index into the visible list).
    PickSuggestion(usize),
    ReplyReceived {
        request_id: RequestId,
        result: Result<String, TransportError>,
    },
    Quit,
}

#[derive(Debug, PartialEq)]
pub enum Effect {
    None,
    /// Post this request with the assistant transport.
    SpawnRequest(OutboundRequest),
    Quit,
}

pub fn update(session: &mut Session, action: Action) -> Effect {
    match action {
        Action::Open => session.open(),
        Action::Close => session.close(),
        Action::Toggle => session.toggle(),
        Action::Reset => {
            let language = session.language().to_string();
            session.initialize(&language);
        }
        Action::SetLanguage(code) => session.set_language(&code),
        Action::Submit(text) => return submit(session, &text),
        Action::PickSuggestion(index) => match session.suggestions().get(index) {
            Some(suggestion) => return submit(session, suggestion),
            None => debug!("No suggestion at index {}", index),
        },
        Action::ReplyReceived { request_id, result } => {
            session.complete_send(request_id, result);
        }
        Action::Quit => return Effect::Quit,
    }
    Effect::None
}

fn submit(session: &mut Session, text: &str) -> Effect {
    match session.begin_send(text) {
        Some(request) => Effect::SpawnRequest(request),
        None => Effect::None,
    }
}
