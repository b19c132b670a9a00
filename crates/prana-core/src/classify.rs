// SPDX-FileCopyrightText: 2026 Prana Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Fault classification.
//!
//! Backends report failures as opaque text. This module maps that text onto
//! the flat [`ErrorKind`] taxonomy with a case-sensitive substring match,
//! first match wins:
//!
//! | substring              | kind             |
//! |------------------------|------------------|
//! | `API key`              | `API_KEY_ERROR`  |
//! | `quota`, `limit`       | `QUOTA_EXCEEDED` |
//! | `network`, `fetch`     | `NETWORK_ERROR`  |
//! | anything else          | `UNKNOWN_ERROR`  |
//!
//! The match depends on the vendor's error wording and is lossy. If the
//! backend changes its messages the mapping must be revisited.

use crate::error::PranaError;
use crate::types::ErrorKind;

/// Reply text used when the backend succeeds but produces no text.
pub const FALLBACK_REPLY: &str =
    "I apologize, but I couldn't generate a response. Please try again.";

const RULES: &[(&[&str], ErrorKind)] = &[
    (&["API key"], ErrorKind::ApiKeyError),
    (&["quota", "limit"], ErrorKind::QuotaExceeded),
    (&["network", "fetch"], ErrorKind::NetworkError),
];

/// Classifies a raw fault message.
pub fn classify_message(message: &str) -> ErrorKind {
    RULES
        .iter()
        .find(|(needles, _)| needles.iter().any(|n| message.contains(n)))
        .map_or(ErrorKind::UnknownError, |(_, kind)| *kind)
}

/// Classifies a workspace error by its rendered message.
pub fn classify_fault(err: &PranaError) -> ErrorKind {
    match err {
        PranaError::Provider { message, .. } => classify_message(message),
        other => classify_message(&other.to_string()),
    }
}
