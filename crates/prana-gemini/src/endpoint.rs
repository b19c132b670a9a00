// SPDX-FileCopyrightText: 2026 Prana Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Endpoint URL policy and method URL construction.

use prana_core::PranaError;
use tracing::error;

/// Validate the configured base URL.
///
/// - Localhost URLs (127.0.0.1, ::1, localhost) are allowed with any scheme.
/// - Remote URLs must use HTTPS, since every request carries the API key.
pub fn validate_base_url(base_url: &str) -> Result<(), PranaError> {
    let parsed = url::Url::parse(base_url)
        .map_err(|e| PranaError::Config(format!("invalid Gemini base URL `{base_url}`: {e}")))?;

    let host = parsed.host_str().unwrap_or("");
    if is_localhost(host) {
        return Ok(());
    }

    if parsed.scheme() != "https" {
        error!(url = %base_url, "TLS required for remote Gemini endpoint");
        return Err(PranaError::Config(
            "TLS required for remote Gemini endpoint -- use HTTPS".to_string(),
        ));
    }

    Ok(())
}

/// Check if a host refers to localhost.
pub fn is_localhost(host: &str) -> bool {
    matches!(host, "127.0.0.1" | "::1" | "localhost" | "[::1]") || host.starts_with("127.")
}

/// Builds `{base}/models/{model}:{method}`.
pub fn method_url(base_url: &str, model: &str, method: &str) -> String {
    format!("{}/models/{model}:{method}", base_url.trim_end_matches('/'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn allows_https_remote() {
        assert!(validate_base_url("https://generativelanguage.googleapis.com/v1beta").is_ok());
    }

    #[test]
    fn blocks_http_remote() {
        let err = validate_base_url("http://generativelanguage.googleapis.com/v1beta")
            .unwrap_err()
            .to_string();
        assert!(err.contains("TLS required"), "got: {err}");
    }

    #[test]
    fn allows_http_localhost() {
        assert!(validate_base_url("http://127.0.0.1:8080").is_ok());
        assert!(validate_base_url("http://localhost:3000/v1beta").is_ok());
        assert!(validate_base_url("http://[::1]:8080").is_ok());
    }

    #[test]
    fn rejects_garbage() {
        assert!(matches!(
            validate_base_url("not a url"),
            Err(PranaError::Config(_))
        ));
    }

    #[test]
    fn method_url_trims_trailing_slash() {
        assert_eq!(
            method_url("https://host/v1beta/", "gemini-2.5-flash", "generateContent"),
            "https://host/v1beta/models/gemini-2.5-flash:generateContent"
        );
        assert_eq!(
            method_url("http://127.0.0.1:9", "m", "streamGenerateContent?alt=sse"),
            "http://127.0.0.1:9/models/m:streamGenerateContent?alt=sse"
        );
    }
}
