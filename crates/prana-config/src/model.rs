// SPDX-FileCopyrightText: 2026 Prana Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs for the Prana wellness assistant.
//!
//! All structs use `#[serde(deny_unknown_fields)]` to reject unrecognized
//! config keys at startup, providing actionable error messages.

use serde::{Deserialize, Serialize};

/// Top-level Prana configuration.
///
/// Loaded from TOML files following XDG hierarchy, with environment variable overrides.
/// All sections are optional and default to sensible values.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct PranaConfig {
    /// Assistant identity and behavior settings.
    #[serde(default)]
    pub assistant: AssistantConfig,

    /// Gemini API settings.
    #[serde(default)]
    pub gemini: GeminiConfig,

    /// Chat front-end settings.
    #[serde(default)]
    pub chat: ChatConfig,
}

/// Assistant identity and behavior configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct AssistantConfig {
    /// Display name of the assistant.
    #[serde(default = "default_assistant_name")]
    pub name: String,

    /// Logging level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Inline system instruction. Overridden by `system_prompt_file` if both set.
    #[serde(default)]
    pub system_prompt: Option<String>,

    /// Path to a markdown file containing the system instruction.
    #[serde(default)]
    pub system_prompt_file: Option<String>,

    /// Opening assistant message shown at the start of every session.
    #[serde(default = "default_greeting")]
    pub greeting: String,
}

impl Default for AssistantConfig {
    fn default() -> Self {
        Self {
            name: default_assistant_name(),
            log_level: default_log_level(),
            system_prompt: None,
            system_prompt_file: None,
            greeting: default_greeting(),
        }
    }
}

fn default_assistant_name() -> String {
    "prana".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_greeting() -> String {
    "Hello! I'm your Ayurvedic wellness assistant. I'm here to help you with natural remedies, \
     lifestyle advice, and wellness guidance. How can I assist you today?"
        .to_string()
}

/// Gemini API configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct GeminiConfig {
    /// Gemini API key. `None` requires the `GEMINI_API_KEY` environment variable.
    #[serde(default)]
    pub api_key: Option<String>,

    /// Model identifier used for every request.
    #[serde(default = "default_model")]
    pub model: String,

    /// Base URL of the Generative Language API.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Sampling temperature for conversation turns.
    #[serde(default = "default_temperature")]
    pub temperature: f32,

    /// Thinking token budget. `0` disables thinking for faster replies.
    #[serde(default)]
    pub thinking_budget: u32,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: default_model(),
            base_url: default_base_url(),
            temperature: default_temperature(),
            thinking_budget: 0,
        }
    }
}

fn default_model() -> String {
    "gemini-2.5-flash".to_string()
}

fn default_base_url() -> String {
    "https://generativelanguage.googleapis.com/v1beta".to_string()
}

fn default_temperature() -> f32 {
    0.7
}

/// Chat front-end configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ChatConfig {
    /// Maximum accepted length of one user message, in characters.
    #[serde(default = "default_max_input_chars")]
    pub max_input_chars: usize,

    /// Stream replies fragment by fragment instead of waiting for the full text.
    #[serde(default = "default_stream")]
    pub stream: bool,

    /// Caller-side timeout wrapped around each turn, in seconds.
    #[serde(default = "default_turn_timeout_secs")]
    pub turn_timeout_secs: u64,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            max_input_chars: default_max_input_chars(),
            stream: default_stream(),
            turn_timeout_secs: default_turn_timeout_secs(),
        }
    }
}

fn default_max_input_chars() -> usize {
    500
}

fn default_stream() -> bool {
    true
}

fn default_turn_timeout_secs() -> u64 {
    120
}
