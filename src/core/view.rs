//! # Render Description
//!
//! A pure function from session state to what the widget should show. Hosts
//! (the terminal UI here, an HTML page elsewhere) only ever paint a
//! `WidgetView`; they never read the session directly.

use chrono::Local;

use crate::core::content::{self, Direction};
use crate::core::markup::{self, Inline};
use crate::core::state::Session;
use crate::core::transcript::{Message, Role};

#[derive(Debug, Clone, PartialEq)]
pub struct WidgetView {
    pub is_open: bool,
    pub language: String,
    pub direction: Direction,
    pub messages: Vec<MessageView>,
    pub suggestions: Vec<SuggestionView>,
    /// Show the "assistant is typing" bubble after the last message.
    pub typing: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MessageView {
    pub role: Role,
    pub avatar: &'static str,
    /// Local time, formatted for the language the message was recorded in.
    pub time: String,
    pub body: Vec<Inline>,
}

impl MessageView {
    pub fn from_message(message: &Message) -> Self {
        let avatar = match message.role {
            Role::Assistant => "🤖",
            Role::User => "👤",
        };
        let local = message.timestamp.with_timezone(&Local);
        Self {
            role: message.role,
            avatar,
            time: content::lookup(&message.language).format_time(&local),
            body: markup::parse(&message.text),
        }
    }

    pub fn html(&self) -> String {
        markup::inlines_to_html(&self.body)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuggestionView {
    /// Index to pass back in `Action::PickSuggestion`.
    pub index: usize,
    pub label: &'static str,
}

pub fn render(session: &Session) -> WidgetView {
    WidgetView {
        is_open: session.is_open(),
        language: session.language().to_string(),
        direction: session.content().direction,
        messages: session
            .transcript()
            .iter()
            .map(MessageView::from_message)
            .collect(),
        suggestions: session
            .suggestions()
            .iter()
            .copied()
            .enumerate()
            .map(|(index, label)| SuggestionView { index, label })
            .collect(),
        typing: session.is_typing(),
    }
}
