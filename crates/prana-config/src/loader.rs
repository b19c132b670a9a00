// SPDX-FileCopyrightText: 2026 Prana Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Supports XDG hierarchy: `./prana.toml` > `~/.config/prana/prana.toml` > `/etc/prana/prana.toml`
//! with environment variable overrides via `PRANA_` prefix.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::Path;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};

use crate::model::PranaConfig;

/// System-wide config file location.
pub const SYSTEM_CONFIG_PATH: &str = "/etc/prana/prana.toml";

/// Local config file name, resolved against the working directory.
pub const LOCAL_CONFIG_FILE: &str = "prana.toml";

/// Load configuration from the standard XDG hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/prana/prana.toml` (system-wide)
/// 3. `~/.config/prana/prana.toml` (user XDG config)
/// 4. `./prana.toml` (local directory)
/// 5. `PRANA_*` environment variables
pub fn load_config() -> Result<PranaConfig, figment::Error> {
    build_figment().extract()
}

/// Load configuration from a TOML string only (no XDG lookup, no env).
///
/// Used for testing and explicit configuration.
pub fn load_config_from_str(toml_content: &str) -> Result<PranaConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(PranaConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<PranaConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(PranaConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// Build the Figment used for hierarchical config loading.
pub fn build_figment() -> Figment {
    Figment::new()
        .merge(Serialized::defaults(PranaConfig::default()))
        .merge(Toml::file(SYSTEM_CONFIG_PATH))
        .merge(Toml::file(user_config_path().unwrap_or_default()))
        .merge(Toml::file(LOCAL_CONFIG_FILE))
        .merge(env_provider())
}

/// `~/.config/prana/prana.toml`, if a config dir exists on this platform.
pub fn user_config_path() -> Option<std::path::PathBuf> {
    dirs::config_dir().map(|d| d.join("prana").join("prana.toml"))
}

/// Create the environment variable provider using explicit `map()` for section-to-dot mapping.
///
/// Uses `Env::map()` rather than `Env::split("_")` because key names contain
/// underscores: `PRANA_GEMINI_API_KEY` must map to `gemini.api_key`, not
/// `gemini.api.key`.
fn env_provider() -> Env {
    Env::prefixed("PRANA_").map(|key| {
        let mapped = key
            .as_str()
            .replacen("assistant_", "assistant.", 1)
            .replacen("gemini_", "gemini.", 1)
            .replacen("chat_", "chat.", 1);
        mapped.into()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn env_overrides_nested_keys() {
        figment::Jail::expect_with(|jail| {
            jail.set_env("PRANA_GEMINI_API_KEY", "env-key");
            jail.set_env("PRANA_GEMINI_THINKING_BUDGET", "128");
            jail.set_env("PRANA_CHAT_MAX_INPUT_CHARS", "250");
            jail.set_env("PRANA_ASSISTANT_LOG_LEVEL", "debug");

            let config = load_config()?;
            assert_eq!(config.gemini.api_key.as_deref(), Some("env-key"));
            assert_eq!(config.gemini.thinking_budget, 128);
            assert_eq!(config.chat.max_input_chars, 250);
            assert_eq!(config.assistant.log_level, "debug");
            Ok(())
        });
    }

    #[test]
    fn local_file_overrides_defaults() {
        figment::Jail::expect_with(|jail| {
            jail.create_file(
                LOCAL_CONFIG_FILE,
                r#"
[gemini]
model = "gemini-2.5-pro"
temperature = 0.3
"#,
            )?;

            let config = load_config()?;
            assert_eq!(config.gemini.model, "gemini-2.5-pro");
            assert!((config.gemini.temperature - 0.3).abs() < f32::EPSILON);
            Ok(())
        });
    }
}
