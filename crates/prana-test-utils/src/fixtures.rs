// SPDX-FileCopyrightText: 2026 Prana Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration fixtures.

use prana_config::PranaConfig;

/// API key placed in [`test_config`].
pub const TEST_API_KEY: &str = "test-gemini-key";

/// A configuration that never consults the environment for a key and
/// points at a local endpoint.
pub fn test_config() -> PranaConfig {
    let mut config = PranaConfig::default();
    config.gemini.api_key = Some(TEST_API_KEY.to_string());
    config.gemini.base_url = "http://127.0.0.1:9".to_string();
    config.gemini.temperature = 0.5;
    config.assistant.system_prompt = Some("You are a test wellness guide.".to_string());
    config
}
