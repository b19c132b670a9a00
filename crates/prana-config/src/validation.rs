// SPDX-FileCopyrightText: 2026 Prana Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.
//!
//! Validates semantic constraints that serde attributes cannot express,
//! such as temperature ranges and parseable URLs.

use crate::diagnostic::ConfigError;
use crate::model::PranaConfig;

const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// Validate a deserialized configuration for semantic correctness.
///
/// Collects every failure instead of stopping at the first one.
pub fn validate_config(config: &PranaConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    if !LOG_LEVELS.contains(&config.assistant.log_level.as_str()) {
        errors.push(ConfigError::Validation {
            message: format!(
                "assistant.log_level `{}` must be one of: {}",
                config.assistant.log_level,
                LOG_LEVELS.join(", ")
            ),
        });
    }

    if config.gemini.model.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "gemini.model must not be empty".to_string(),
        });
    }

    let temperature = config.gemini.temperature;
    if !(0.0..=2.0).contains(&temperature) {
        errors.push(ConfigError::Validation {
            message: format!("gemini.temperature must be between 0.0 and 2.0, got {temperature}"),
        });
    }

    if let Err(e) = url::Url::parse(&config.gemini.base_url) {
        errors.push(ConfigError::Validation {
            message: format!("gemini.base_url `{}` is not a valid URL: {e}", config.gemini.base_url),
        });
    }

    if config.chat.max_input_chars == 0 {
        errors.push(ConfigError::Validation {
            message: "chat.max_input_chars must be at least 1".to_string(),
        });
    }

    if config.chat.turn_timeout_secs == 0 {
        errors.push(ConfigError::Validation {
            message: "chat.turn_timeout_secs must be at least 1".to_string(),
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
