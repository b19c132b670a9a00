// SPDX-FileCopyrightText: 2026 Prana Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Stateless conversation client.
//!
//! [`ConversationClient`] turns one user utterance plus an explicit prior
//! history into a single [`ChatReply`], either atomically or as a stream of
//! fragments. It owns no history of its own and never retries. Every backend
//! or transport fault is classified into an [`ErrorKind`] at this boundary;
//! no raw fault reaches the caller.

use futures::StreamExt;
use prana_config::PranaConfig;
use prana_core::traits::GenerativeBackend;
use prana_core::{
    ChatReply, ConversationHistory, ErrorKind, FALLBACK_REPLY, GenerateRequest, PranaError,
    classify_fault,
};
use prana_gemini::GeminiBackend;
use tracing::{debug, error, info, warn};

use crate::prompt;

/// Utterance sent by [`ConversationClient::test_connection`].
pub const PROBE_TEXT: &str = "Hello";

/// Temperature used by the connection probe.
const PROBE_TEMPERATURE: f32 = 0.1;

/// Static per-process parameters of every request.
#[derive(Debug, Clone, PartialEq)]
pub struct ClientSettings {
    pub model: String,
    pub temperature: f32,
    pub thinking_budget: u32,
    pub system_instruction: Option<String>,
}

impl ClientSettings {
    /// Builds settings from configuration, resolving the system instruction.
    pub async fn from_config(config: &PranaConfig) -> Self {
        let system_instruction = prompt::resolve_system_prompt(
            config.assistant.system_prompt.as_deref(),
            config.assistant.system_prompt_file.as_deref(),
        )
        .await;

        Self {
            model: config.gemini.model.clone(),
            temperature: config.gemini.temperature,
            thinking_budget: config.gemini.thinking_budget,
            system_instruction: Some(system_instruction),
        }
    }
}

/// Conversation client over a [`GenerativeBackend`].
///
/// Holds only fixed configuration. It is cheap to share by reference and
/// may be called concurrently; callers serialize turns against one history.
#[derive(Debug, Clone)]
pub struct ConversationClient<B> {
    backend: B,
    settings: ClientSettings,
}

impl ConversationClient<GeminiBackend> {
    /// Constructs a Gemini-backed client.
    ///
    /// Fails immediately with [`PranaError::Config`] when no API key is
    /// available or the endpoint is rejected.
    pub async fn connect(config: &PranaConfig) -> Result<Self, PranaError> {
        let backend = GeminiBackend::new(&config.gemini)?;
        let settings = ClientSettings::from_config(config).await;
        Ok(Self::new(backend, settings))
    }
}

impl<B: GenerativeBackend> ConversationClient<B> {
    pub fn new(backend: B, settings: ClientSettings) -> Self {
        Self { backend, settings }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn settings(&self) -> &ClientSettings {
        &self.settings
    }

    /// Sends one utterance and waits for the complete reply.
    ///
    /// `text` is passed through as given; callers reject blank input.
    pub async fn send_once(&self, text: &str, history: &ConversationHistory) -> ChatReply {
        let request = self.build_request(text, history);
        debug!(
            backend = self.backend.name(),
            turns = request.history.len(),
            "sending message"
        );

        match self.backend.generate(request).await {
            Ok(response) => match response.text {
                Some(text) if !text.is_empty() => ChatReply::ok(text),
                _ => {
                    info!("backend returned no text, using fallback reply");
                    ChatReply::ok(FALLBACK_REPLY)
                }
            },
            Err(e) => self.fault_reply(&e),
        }
    }

    /// Sends one utterance and streams the reply through `on_chunk`.
    ///
    /// Each fragment, empty ones included, is passed to `on_chunk` in arrival
    /// order before the next is read. Fragments already delivered are not
    /// retracted when the stream later fails.
    pub async fn send_stream<F>(
        &self,
        text: &str,
        history: &ConversationHistory,
        mut on_chunk: F,
    ) -> ChatReply
    where
        F: FnMut(&str),
    {
        let request = self.build_request(text, history);
        debug!(
            backend = self.backend.name(),
            turns = request.history.len(),
            "opening reply stream"
        );

        let mut stream = match self.backend.stream(request).await {
            Ok(stream) => stream,
            Err(e) => return self.fault_reply(&e),
        };

        let mut full = String::new();
        let mut fragments = 0usize;
        while let Some(item) = stream.next().await {
            match item {
                Ok(chunk) => {
                    full.push_str(&chunk.text);
                    fragments += 1;
                    on_chunk(&chunk.text);
                }
                Err(e) => {
                    warn!(fragments, "reply stream failed after partial delivery");
                    return self.fault_reply(&e);
                }
            }
        }

        debug!(fragments, chars = full.len(), "reply stream finished");
        if full.is_empty() {
            info!("stream produced no text, using fallback reply");
            return ChatReply::ok(FALLBACK_REPLY);
        }
        ChatReply::ok(full)
    }

    /// Probes the backend with a minimal request.
    ///
    /// Returns whether non-empty text came back. Faults are logged and
    /// reported as `false`.
    pub async fn test_connection(&self) -> bool {
        let request = GenerateRequest {
            model: self.settings.model.clone(),
            system_instruction: None,
            temperature: PROBE_TEMPERATURE,
            thinking_budget: Some(0),
            history: Vec::new(),
            user_text: PROBE_TEXT.to_string(),
        };

        match self.backend.generate(request).await {
            Ok(response) => response.text.is_some_and(|t| !t.is_empty()),
            Err(e) => {
                error!(backend = self.backend.name(), error = %e, "connection test failed");
                false
            }
        }
    }

    fn build_request(&self, text: &str, history: &ConversationHistory) -> GenerateRequest {
        GenerateRequest {
            model: self.settings.model.clone(),
            system_instruction: self.settings.system_instruction.clone(),
            temperature: self.settings.temperature,
            thinking_budget: Some(self.settings.thinking_budget),
            history: history.to_turns(),
            user_text: text.to_string(),
        }
    }

    fn fault_reply(&self, err: &PranaError) -> ChatReply {
        let kind: ErrorKind = classify_fault(err);
        warn!(
            backend = self.backend.name(),
            kind = %kind,
            error = %err,
            "generation failed"
        );
        ChatReply::failed(kind)
    }
}
