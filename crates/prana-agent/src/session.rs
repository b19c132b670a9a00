// SPDX-FileCopyrightText: 2026 Prana Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Caller-side chat transcript.
//!
//! [`ChatSession`] owns the [`ConversationHistory`] for one conversation and
//! drives the client one turn at a time. Each turn takes `&mut self`, so two
//! turns against the same history can never overlap.

use prana_config::PranaConfig;
use prana_core::traits::GenerativeBackend;
use prana_core::{ChatReply, ConversationHistory, PranaError};
use tracing::debug;

use crate::conversation::ConversationClient;

/// Canned starter prompts offered to new users.
pub const QUICK_QUESTIONS: [&str; 4] = [
    "What herbs help with stress?",
    "Best foods for digestion?",
    "How to improve sleep naturally?",
    "Yoga poses for back pain?",
];

/// Returns the quick question for a 1-based index.
pub fn quick_question(index: usize) -> Option<&'static str> {
    index.checked_sub(1).and_then(|i| QUICK_QUESTIONS.get(i).copied())
}

/// One conversation: history plus the client that extends it.
pub struct ChatSession<'a, B> {
    client: &'a ConversationClient<B>,
    history: ConversationHistory,
    max_input_chars: usize,
}

impl<'a, B: GenerativeBackend> ChatSession<'a, B> {
    /// Starts a session whose history opens with the assistant `greeting`.
    pub fn new(client: &'a ConversationClient<B>, greeting: &str, max_input_chars: usize) -> Self {
        let mut history = ConversationHistory::new();
        if !greeting.trim().is_empty() {
            history.push_assistant(greeting);
        }
        Self {
            client,
            history,
            max_input_chars,
        }
    }

    pub fn from_config(client: &'a ConversationClient<B>, config: &PranaConfig) -> Self {
        Self::new(
            client,
            &config.assistant.greeting,
            config.chat.max_input_chars,
        )
    }

    pub fn history(&self) -> &ConversationHistory {
        &self.history
    }

    /// Trims `input` and checks it against the input rules.
    pub fn validate_input(&self, input: &str) -> Result<String, PranaError> {
        let text = input.trim();
        if text.is_empty() {
            return Err(PranaError::InvalidInput("message is empty".into()));
        }
        let chars = text.chars().count();
        if chars > self.max_input_chars {
            return Err(PranaError::InvalidInput(format!(
                "message is {chars} characters long; the limit is {}",
                self.max_input_chars
            )));
        }
        Ok(text.to_string())
    }

    /// Runs one non-streaming turn.
    pub async fn send(&mut self, input: &str) -> Result<ChatReply, PranaError> {
        let text = self.validate_input(input)?;
        let prior = self.history.clone();
        self.history.push_user(text.as_str());

        let reply = self.client.send_once(&text, &prior).await;
        self.record(&reply);
        Ok(reply)
    }

    /// Runs one streaming turn, forwarding fragments to `on_chunk`.
    pub async fn send_streaming<F>(&mut self, input: &str, on_chunk: F) -> Result<ChatReply, PranaError>
    where
        F: FnMut(&str),
    {
        let text = self.validate_input(input)?;
        let prior = self.history.clone();
        self.history.push_user(text.as_str());

        let reply = self.client.send_stream(&text, &prior, on_chunk).await;
        self.record(&reply);
        Ok(reply)
    }

    fn record(&mut self, reply: &ChatReply) {
        let message = self.history.push_assistant(reply.text.as_str());
        debug!(
            id = message.id.0,
            error = ?reply.error,
            "assistant reply recorded"
        );
    }
}
