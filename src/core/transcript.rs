//! # Transcript Store
//!
//! Append-only log of the messages exchanged in one session. Entries are
//! never edited or removed; the only way to empty the log is to start a new
//! session (`clear`, called from `Session::initialize`).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, PartialEq, Eq, Clone, Copy)]
pub enum Role {
    #[serde(rename = "user")]
    User,
    #[serde(rename = "bot")]
    Assistant,
}

/// One transcript entry.
#[derive(Debug, Clone, PartialEq)]
pub struct Message {
    pub role: Role,
    /// Raw text as typed or received, lightweight markup included.
    pub text: String,
    pub timestamp: DateTime<Utc>,
    /// Language that was active when the message was recorded. Drives the
    /// time label, so switching language later does not relabel old entries.
    pub language: String,
}

impl Message {
    pub fn new(role: Role, text: impl Into<String>, language: impl Into<String>) -> Self {
        Self {
            role,
            text: text.into(),
            timestamp: Utc::now(),
            language: language.into(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Transcript {
    entries: Vec<Message>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, message: Message) -> &Message {
        self.entries.push(message);
        &self.entries[self.entries.len() - 1]
    }

    /// The last `n` entries (fewer when the transcript is shorter), oldest first.
    pub fn last_n(&self, n: usize) -> &[Message] {
        let start = self.entries.len().saturating_sub(n);
        &self.entries[start..]
    }

    pub fn last(&self) -> Option<&Message> {
        self.entries.last()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Message> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub(crate) fn clear(&mut self) {
        self.entries.clear();
    }

    /// Number of entries with the given role.
    pub fn count(&self, role: Role) -> usize {
        self.entries.iter().filter(|m| m.role == role).count()
    }
}
