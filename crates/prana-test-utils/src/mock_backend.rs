// SPDX-FileCopyrightText: 2026 Prana Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock generative backend for deterministic testing.
//!
//! `MockBackend` implements `GenerativeBackend` with scripted outcomes and
//! records every request it receives, so tests can assert on exactly what
//! would have been sent over the wire.

use std::collections::VecDeque;
use std::sync::Arc;

use async_trait::async_trait;
use futures::stream;
use tokio::sync::Mutex;

use prana_core::traits::{ChunkStream, GenerativeBackend};
use prana_core::types::{GenerateRequest, GenerateResponse, StreamChunk, TokenUsage};
use prana_core::PranaError;

/// Default reply when the script is exhausted.
const DEFAULT_REPLY: &str = "mock response";

/// One scripted backend outcome.
#[derive(Debug, Clone)]
pub enum Script {
    /// A successful reply. `None` models a response without any text.
    Reply(Option<String>),
    /// Stream fragments in order; an `Err` interrupts the stream there.
    /// A non-streaming call joins the fragments up to the first `Err`
    /// and fails with it.
    Chunks(Vec<Result<String, String>>),
    /// The request fails before any reply with this provider message.
    Fault(String),
}

impl Script {
    pub fn reply(text: impl Into<String>) -> Self {
        Script::Reply(Some(text.into()))
    }

    pub fn empty() -> Self {
        Script::Reply(None)
    }

    pub fn fault(message: impl Into<String>) -> Self {
        Script::Fault(message.into())
    }

    pub fn chunks<I, S>(fragments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Script::Chunks(fragments.into_iter().map(|s| Ok(s.into())).collect())
    }
}

/// A mock generative backend that plays back scripted outcomes.
///
/// Outcomes are popped from a FIFO queue. When the queue is empty, a
/// default "mock response" reply is returned.
#[derive(Clone, Default)]
pub struct MockBackend {
    script: Arc<Mutex<VecDeque<Script>>>,
    requests: Arc<Mutex<Vec<GenerateRequest>>>,
}

impl MockBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a mock backend pre-loaded with the given outcomes.
    pub fn with_script(script: Vec<Script>) -> Self {
        Self {
            script: Arc::new(Mutex::new(VecDeque::from(script))),
            requests: Arc::default(),
        }
    }

    /// Create a mock backend that replies with each text in turn.
    pub fn with_replies<S: Into<String>>(replies: impl IntoIterator<Item = S>) -> Self {
        Self::with_script(replies.into_iter().map(Script::reply).collect())
    }

    /// Add an outcome to the end of the queue.
    pub async fn push(&self, outcome: Script) {
        self.script.lock().await.push_back(outcome);
    }

    /// Every request received so far, in arrival order.
    pub async fn requests(&self) -> Vec<GenerateRequest> {
        self.requests.lock().await.clone()
    }

    /// The most recent request, if any.
    pub async fn last_request(&self) -> Option<GenerateRequest> {
        self.requests.lock().await.last().cloned()
    }

    async fn next_outcome(&self, request: GenerateRequest) -> Script {
        self.requests.lock().await.push(request);
        self.script
            .lock()
            .await
            .pop_front()
            .unwrap_or_else(|| Script::reply(DEFAULT_REPLY))
    }
}

fn usage() -> TokenUsage {
    TokenUsage {
        prompt_tokens: 10,
        output_tokens: 20,
        total_tokens: 30,
    }
}

#[async_trait]
impl GenerativeBackend for MockBackend {
    fn name(&self) -> &str {
        "mock-backend"
    }

    async fn generate(&self, request: GenerateRequest) -> Result<GenerateResponse, PranaError> {
        match self.next_outcome(request).await {
            Script::Reply(text) => Ok(GenerateResponse {
                text,
                finish_reason: Some("STOP".to_string()),
                usage: Some(usage()),
            }),
            Script::Chunks(fragments) => {
                let mut text = String::new();
                for fragment in fragments {
                    text.push_str(&fragment.map_err(PranaError::provider)?);
                }
                Ok(GenerateResponse {
                    text: Some(text),
                    finish_reason: Some("STOP".to_string()),
                    usage: Some(usage()),
                })
            }
            Script::Fault(message) => Err(PranaError::provider(message)),
        }
    }

    async fn stream(&self, request: GenerateRequest) -> Result<ChunkStream, PranaError> {
        let items: Vec<Result<StreamChunk, PranaError>> = match self.next_outcome(request).await {
            Script::Reply(text) => vec![Ok(StreamChunk {
                text: text.unwrap_or_default(),
                finish_reason: Some("STOP".to_string()),
                usage: Some(usage()),
            })],
            Script::Chunks(fragments) => fragments
                .into_iter()
                .map(|f| f.map(StreamChunk::text).map_err(PranaError::provider))
                .collect(),
            Script::Fault(message) => return Err(PranaError::provider(message)),
        };
        Ok(Box::pin(stream::iter(items)))
    }
}
