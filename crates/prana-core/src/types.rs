// SPDX-FileCopyrightText: 2026 Prana Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Common types shared by the conversation client, backends, and front ends.

use chrono::{DateTime, Local, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Unique, monotonically assigned identifier for a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct MessageId(pub u64);

/// Who wrote a message.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Author {
    User,
    Assistant,
}

impl Author {
    /// Maps the author onto the backend's role vocabulary.
    pub fn turn_role(self) -> TurnRole {
        match self {
            Author::User => TurnRole::User,
            Author::Assistant => TurnRole::Model,
        }
    }
}

/// One turn in a conversation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub id: MessageId,
    pub text: String,
    pub author: Author,
    pub created_at: DateTime<Utc>,
}

impl Message {
    /// Returns true if the message was written by the user.
    pub fn is_user(&self) -> bool {
        self.author == Author::User
    }

    /// Local wall-clock time of creation as `HH:MM`.
    pub fn display_time(&self) -> String {
        self.created_at
            .with_timezone(&Local)
            .format("%H:%M")
            .to_string()
    }
}

/// Ordered, append-only sequence of messages.
///
/// Insertion order is the dialogue order sent to the backend. Ids are
/// assigned by the history itself, starting at 1.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConversationHistory {
    messages: Vec<Message>,
}

impl ConversationHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a message and returns a reference to it.
    pub fn push(&mut self, author: Author, text: impl Into<String>) -> &Message {
        let id = MessageId(self.messages.last().map_or(1, |m| m.id.0 + 1));
        self.messages.push(Message {
            id,
            text: text.into(),
            author,
            created_at: Utc::now(),
        });
        &self.messages[self.messages.len() - 1]
    }

    pub fn push_user(&mut self, text: impl Into<String>) -> &Message {
        self.push(Author::User, text)
    }

    pub fn push_assistant(&mut self, text: impl Into<String>) -> &Message {
        self.push(Author::Assistant, text)
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Message> {
        self.messages.iter()
    }

    pub fn last(&self) -> Option<&Message> {
        self.messages.last()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Converts the history into backend content turns.
    ///
    /// Messages whose text is blank after trimming are dropped; the rest keep
    /// their relative order.
    pub fn to_turns(&self) -> Vec<ContentTurn> {
        self.messages
            .iter()
            .filter(|m| !m.text.trim().is_empty())
            .map(|m| ContentTurn {
                role: m.author.turn_role(),
                text: m.text.clone(),
            })
            .collect()
    }
}

impl<'a> IntoIterator for &'a ConversationHistory {
    type Item = &'a Message;
    type IntoIter = std::slice::Iter<'a, Message>;

    fn into_iter(self) -> Self::IntoIter {
        self.messages.iter()
    }
}

// --- Backend request/response types ---

/// Role vocabulary understood by the generative backend.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum TurnRole {
    User,
    Model,
}

/// A single role-tagged content unit sent to the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentTurn {
    pub role: TurnRole,
    pub text: String,
}

/// A request to a generative backend.
///
/// Derived per call and never stored. `history` holds the turns that
/// precede `user_text`; the new utterance is never duplicated inside it.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerateRequest {
    pub model: String,
    pub system_instruction: Option<String>,
    pub temperature: f32,
    /// Token budget for model "thinking". `Some(0)` disables it.
    pub thinking_budget: Option<u32>,
    pub history: Vec<ContentTurn>,
    pub user_text: String,
}

/// Token accounting reported by the backend, when available.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TokenUsage {
    pub prompt_tokens: u32,
    pub output_tokens: u32,
    pub total_tokens: u32,
}

/// A complete (non-streaming) backend response.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerateResponse {
    /// Concatenated reply text; `None` when the backend returned no text.
    pub text: Option<String>,
    pub finish_reason: Option<String>,
    pub usage: Option<TokenUsage>,
}

/// A single fragment of a streaming backend response.
///
/// `text` may be empty (e.g. a trailing chunk that only carries a finish
/// reason or usage).
#[derive(Debug, Clone, PartialEq)]
pub struct StreamChunk {
    pub text: String,
    pub finish_reason: Option<String>,
    pub usage: Option<TokenUsage>,
}

impl StreamChunk {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            finish_reason: None,
            usage: None,
        }
    }
}

// --- Reply types ---

/// Fixed classification of a backend or transport failure.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorKind {
    ApiKeyError,
    QuotaExceeded,
    NetworkError,
    UnknownError,
}

impl ErrorKind {
    /// The fixed user-facing text rendered in place of a reply.
    pub fn fallback_text(self) -> &'static str {
        match self {
            ErrorKind::ApiKeyError => {
                "There seems to be an issue with the API configuration. Please check your settings."
            }
            ErrorKind::QuotaExceeded => {
                "I'm experiencing high demand right now. Please try again in a moment."
            }
            ErrorKind::NetworkError => {
                "I'm having trouble connecting right now. Please check your internet connection and try again."
            }
            ErrorKind::UnknownError => {
                "I'm experiencing some technical difficulties. Please try again, and if the problem persists, try restarting the app."
            }
        }
    }

    /// Whether the kind warrants an explicit, blocking user notification
    /// rather than a generic connectivity notice.
    pub fn requires_alert(self) -> bool {
        matches!(self, ErrorKind::ApiKeyError | ErrorKind::QuotaExceeded)
    }

    /// Short title for a user-facing alert.
    pub fn notice(self) -> &'static str {
        match self {
            ErrorKind::ApiKeyError => "Configuration Error",
            ErrorKind::QuotaExceeded => "Service Busy",
            ErrorKind::NetworkError | ErrorKind::UnknownError => "Connection Error",
        }
    }
}

/// Outcome of one conversation turn.
///
/// `text` is always renderable: either the assistant reply, the fallback
/// apology, or the fixed text for `error`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatReply {
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorKind>,
}

impl ChatReply {
    pub fn ok(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            error: None,
        }
    }

    pub fn failed(kind: ErrorKind) -> Self {
        Self {
            text: kind.fallback_text().to_string(),
            error: Some(kind),
        }
    }

    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }

    /// Views the reply as a `Result`, discarding the fallback text on error.
    pub fn into_result(self) -> Result<String, ErrorKind> {
        match self.error {
            None => Ok(self.text),
            Some(kind) => Err(kind),
        }
    }
}
