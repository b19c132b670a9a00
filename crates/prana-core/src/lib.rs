// SPDX-FileCopyrightText: 2026 Prana Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the Prana wellness assistant.
//!
//! This crate provides the conversation data model, the backend request and
//! response types, the [`GenerativeBackend`] trait that concrete providers
//! implement, fault classification into [`ErrorKind`], and secret redaction
//! for log output.

pub mod classify;
pub mod error;
pub mod redact;
pub mod traits;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use classify::{FALLBACK_REPLY, classify_fault, classify_message};
pub use error::PranaError;
pub use redact::{RedactingWriter, redact};
pub use traits::{ChunkStream, GenerativeBackend};
pub use types::{
    Author, ChatReply, ContentTurn, ConversationHistory, ErrorKind, GenerateRequest,
    GenerateResponse, Message, MessageId, StreamChunk, TokenUsage, TurnRole,
};

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn error_kind_wire_names() {
        let kinds = [
            (ErrorKind::ApiKeyError, "API_KEY_ERROR"),
            (ErrorKind::QuotaExceeded, "QUOTA_EXCEEDED"),
            (ErrorKind::NetworkError, "NETWORK_ERROR"),
            (ErrorKind::UnknownError, "UNKNOWN_ERROR"),
        ];
        for (kind, name) in kinds {
            assert_eq!(kind.to_string(), name);
            assert_eq!(ErrorKind::from_str(name).unwrap(), kind);
            assert_eq!(serde_json::to_string(&kind).unwrap(), format!("\"{name}\""));
        }
    }

    #[test]
    fn alert_policy() {
        assert!(ErrorKind::ApiKeyError.requires_alert());
        assert!(ErrorKind::QuotaExceeded.requires_alert());
        assert!(!ErrorKind::NetworkError.requires_alert());
        assert!(!ErrorKind::UnknownError.requires_alert());
        assert_eq!(ErrorKind::UnknownError.notice(), "Connection Error");
    }

    #[test]
    fn chat_reply_result_view() {
        assert_eq!(ChatReply::ok("hi").into_result(), Ok("hi".to_string()));

        let failed = ChatReply::failed(ErrorKind::QuotaExceeded);
        assert!(failed.is_error());
        assert_eq!(failed.text, ErrorKind::QuotaExceeded.fallback_text());
        assert_eq!(failed.into_result(), Err(ErrorKind::QuotaExceeded));
    }

    #[test]
    fn chat_reply_serializes_without_absent_error() {
        let json = serde_json::to_value(ChatReply::ok("hello")).unwrap();
        assert_eq!(json, serde_json::json!({"text": "hello"}));
    }

    #[test]
    fn history_assigns_monotonic_ids() {
        let mut history = ConversationHistory::new();
        let a = history.push_assistant("Hello!").id;
        let b = history.push_user("hi").id;
        let c = history.push_assistant("").id;
        assert_eq!(a, MessageId(1));
        assert!(a < b && b < c);
        assert_eq!(history.len(), 3);
        assert!(history.messages()[1].is_user());
    }

    #[test]
    fn history_maps_roles_and_drops_blank_text() {
        let mut history = ConversationHistory::new();
        history.push_assistant("Welcome");
        history.push_user("  ");
        history.push_user("What helps sleep?");
        history.push_assistant("");
        history.push_assistant("Chamomile tea.");

        let turns = history.to_turns();
        assert_eq!(
            turns,
            vec![
                ContentTurn { role: TurnRole::Model, text: "Welcome".into() },
                ContentTurn { role: TurnRole::User, text: "What helps sleep?".into() },
                ContentTurn { role: TurnRole::Model, text: "Chamomile tea.".into() },
            ]
        );
    }

    #[test]
    fn display_time_is_hours_and_minutes() {
        let mut history = ConversationHistory::new();
        let time = history.push_user("hi").display_time();
        assert_eq!(time.len(), 5);
        assert_eq!(&time[2..3], ":");
    }

    mod props {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn filtered_history_keeps_order_and_count(
                entries in prop::collection::vec(
                    (any::<bool>(), prop::sample::select(vec!["", " ", "a", "ginger", "tulsi tea"])),
                    0..40,
                )
            ) {
                let mut history = ConversationHistory::new();
                for (is_user, text) in &entries {
                    let author = if *is_user { Author::User } else { Author::Assistant };
                    history.push(author, *text);
                }
                let blank = entries.iter().filter(|(_, t)| t.trim().is_empty()).count();

                let turns = history.to_turns();
                prop_assert_eq!(turns.len(), entries.len() - blank);

                let expected: Vec<ContentTurn> = entries
                    .iter()
                    .filter(|(_, t)| !t.trim().is_empty())
                    .map(|(is_user, t)| ContentTurn {
                        role: if *is_user { TurnRole::User } else { TurnRole::Model },
                        text: t.to_string(),
                    })
                    .collect();
                prop_assert_eq!(turns, expected);
            }
        }
    }
}
