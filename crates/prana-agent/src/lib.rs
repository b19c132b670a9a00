// SPDX-FileCopyrightText: 2026 Prana Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Conversation layer for the Prana wellness assistant.
//!
//! [`ConversationClient`] is the stateless request/reply core. [`ChatSession`]
//! is the caller side that owns a transcript and serializes turns against it.

pub mod conversation;
pub mod prompt;
pub mod session;

pub use conversation::{ClientSettings, ConversationClient, PROBE_TEXT};
pub use prompt::{DEFAULT_SYSTEM_PROMPT, resolve_system_prompt};
pub use session::{ChatSession, QUICK_QUESTIONS, quick_question};
