// SPDX-FileCopyrightText: 2026 Prana Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the Prana workspace.

use thiserror::Error;

/// The primary error type used across Prana crates.
///
/// Backend faults travel as [`PranaError::Provider`] until they reach the
/// conversation client, which classifies them into an
/// [`ErrorKind`](crate::types::ErrorKind) and never lets them escape.
#[derive(Debug, Error)]
pub enum PranaError {
    /// Configuration errors (missing credential, invalid URL, bad header value).
    #[error("configuration error: {0}")]
    Config(String),

    /// Generative backend errors (HTTP failure, API error body, malformed stream).
    #[error("provider error: {message}")]
    Provider {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Caller-side input rejected before any request was made.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Operation timed out (only raised by callers layering a timeout).
    #[error("operation timed out after {duration:?}")]
    Timeout { duration: std::time::Duration },

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}

impl PranaError {
    /// Shorthand for a provider fault without an underlying source.
    pub fn provider(message: impl Into<String>) -> Self {
        PranaError::Provider {
            message: message.into(),
            source: None,
        }
    }
}
