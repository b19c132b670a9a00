// SPDX-FileCopyrightText: 2026 Prana Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Google Gemini backend for the Prana wellness assistant.
//!
//! This crate implements [`GenerativeBackend`] for the Gemini
//! `generateContent` REST API, providing both single-shot generation and
//! streaming SSE responses.

pub mod client;
pub mod endpoint;
pub mod sse;
pub mod types;

use async_trait::async_trait;
use futures::stream::StreamExt;
use prana_config::model::GeminiConfig;
use prana_core::traits::{ChunkStream, GenerativeBackend};
use prana_core::{
    GenerateRequest, GenerateResponse, PranaError, StreamChunk, TokenUsage, TurnRole,
};
use secrecy::SecretString;
use tracing::{info, warn};

use crate::client::GeminiClient;
use crate::types::{
    Content, GenerateContentRequest, GenerateContentResponse, GenerationConfig, ThinkingConfig,
    UsageMetadata,
};

/// Environment variable consulted when no key is configured.
pub const API_KEY_ENV: &str = "GEMINI_API_KEY";

/// Gemini backend implementing [`GenerativeBackend`].
///
/// API key resolution order: config -> `GEMINI_API_KEY` env var -> error.
#[derive(Debug, Clone)]
pub struct GeminiBackend {
    client: GeminiClient,
}

impl GeminiBackend {
    /// Creates a backend from configuration, resolving the API key.
    pub fn new(config: &GeminiConfig) -> Result<Self, PranaError> {
        let api_key = resolve_api_key(config)?;
        Self::with_api_key(config, &api_key)
    }

    /// Creates a backend with an explicit API key.
    pub fn with_api_key(config: &GeminiConfig, api_key: &SecretString) -> Result<Self, PranaError> {
        let client = GeminiClient::new(api_key, &config.base_url)?;
        info!(model = config.model, "gemini backend initialized");
        Ok(Self { client })
    }
}

#[async_trait]
impl GenerativeBackend for GeminiBackend {
    fn name(&self) -> &str {
        "gemini"
    }

    async fn generate(&self, request: GenerateRequest) -> Result<GenerateResponse, PranaError> {
        let wire = to_wire_request(&request);
        let response = self.client.generate_content(&request.model, &wire).await?;
        log_block_reason(&response);

        Ok(GenerateResponse {
            text: response.text(),
            finish_reason: response.finish_reason().map(str::to_string),
            usage: response.usage_metadata.map(to_usage),
        })
    }

    async fn stream(&self, request: GenerateRequest) -> Result<ChunkStream, PranaError> {
        let wire = to_wire_request(&request);
        let responses = self
            .client
            .stream_generate_content(&request.model, &wire)
            .await?;

        let chunks = responses.map(|result| {
            result.map(|response| {
                log_block_reason(&response);
                StreamChunk {
                    text: response.text().unwrap_or_default(),
                    finish_reason: response.finish_reason().map(str::to_string),
                    usage: response.usage_metadata.map(to_usage),
                }
            })
        });

        Ok(Box::pin(chunks))
    }
}

/// Resolves the API key from config or the `GEMINI_API_KEY` environment variable.
pub fn resolve_api_key(config: &GeminiConfig) -> Result<SecretString, PranaError> {
    resolve_api_key_from(config.api_key.as_deref(), std::env::var(API_KEY_ENV).ok())
}

/// Key resolution with the environment value supplied by the caller.
///
/// Blank values count as absent.
pub fn resolve_api_key_from(
    configured: Option<&str>,
    env_value: Option<String>,
) -> Result<SecretString, PranaError> {
    if let Some(key) = configured
        && !key.trim().is_empty()
    {
        return Ok(SecretString::from(key.trim().to_string()));
    }

    match env_value {
        Some(key) if !key.trim().is_empty() => Ok(SecretString::from(key.trim().to_string())),
        _ => Err(PranaError::Config(format!(
            "Gemini API key not found. Set gemini.api_key in config or the {API_KEY_ENV} environment variable."
        ))),
    }
}

/// Converts a backend-neutral request into the Gemini wire format.
///
/// Prior turns keep their order and the new user utterance is appended last.
pub fn to_wire_request(request: &GenerateRequest) -> GenerateContentRequest {
    let mut contents: Vec<Content> = request
        .history
        .iter()
        .map(|turn| Content::text(Some(wire_role(turn.role)), turn.text.as_str()))
        .collect();
    contents.push(Content::text(Some("user"), request.user_text.as_str()));

    GenerateContentRequest {
        contents,
        system_instruction: request
            .system_instruction
            .as_deref()
            .map(|text| Content::text(None, text)),
        generation_config: GenerationConfig {
            temperature: request.temperature,
            thinking_config: request
                .thinking_budget
                .map(|thinking_budget| ThinkingConfig { thinking_budget }),
        },
    }
}

fn wire_role(role: TurnRole) -> &'static str {
    match role {
        TurnRole::User => "user",
        TurnRole::Model => "model",
    }
}

fn to_usage(usage: UsageMetadata) -> TokenUsage {
    TokenUsage {
        prompt_tokens: usage.prompt_token_count,
        output_tokens: usage.candidates_token_count,
        total_tokens: usage.total_token_count,
    }
}

fn log_block_reason(response: &GenerateContentResponse) {
    if let Some(reason) = response.block_reason() {
        warn!(reason, "gemini blocked the prompt");
    }
}
