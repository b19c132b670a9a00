// SPDX-FileCopyrightText: 2026 Prana Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Secret redaction for log output and error messages.
//!
//! Two complementary mechanisms:
//! 1. **Regex-based**: catches known credential formats (Google API keys,
//!    `key=` query parameters, Bearer tokens).
//! 2. **Exact-match**: catches the configured credential value itself.

use std::io::Write;
use std::sync::{Arc, LazyLock, RwLock};

use regex::Regex;

static REDACTION_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    vec![
        // Google API keys: AIza followed by 35 url-safe characters.
        Regex::new(r"AIza[0-9A-Za-z_\-]{35}").unwrap(),
        // API keys passed as a query parameter.
        Regex::new(r"([?&])key=[^&\s]+").unwrap(),
        // Bearer tokens in headers.
        Regex::new(r"Bearer\s+[a-zA-Z0-9._\-]{10,}").unwrap(),
    ]
});

/// The redaction placeholder.
pub const REDACTED: &str = "[REDACTED]";

/// Redact secrets from a string using the known patterns and exact values.
pub fn redact(input: &str, secrets: &[String]) -> String {
    let mut result = input.to_string();

    for (i, pattern) in REDACTION_PATTERNS.iter().enumerate() {
        // Keep the separator of a `?key=` / `&key=` match.
        let replacement = if i == 1 {
            format!("${{1}}key={REDACTED}")
        } else {
            REDACTED.to_string()
        };
        result = pattern
            .replace_all(&result, replacement.as_str())
            .into_owned();
    }

    // Longest first so a secret containing another is replaced whole.
    let mut sorted: Vec<&String> = secrets.iter().collect();
    sorted.sort_by_key(|v| std::cmp::Reverse(v.len()));
    for value in sorted {
        if !value.is_empty() {
            result = result.replace(value.as_str(), REDACTED);
        }
    }

    result
}

/// A writer wrapper that redacts secrets from everything written through it.
///
/// Used as the log sink so that credentials echoed in backend error bodies
/// never reach the terminal.
pub struct RedactingWriter<W> {
    inner: W,
    secrets: Arc<RwLock<Vec<String>>>,
}

impl<W: Write> RedactingWriter<W> {
    pub fn new(inner: W, secrets: Arc<RwLock<Vec<String>>>) -> Self {
        Self { inner, secrets }
    }

    /// Registers an exact value to redact.
    pub fn add_secret(secrets: &Arc<RwLock<Vec<String>>>, value: String) {
        if let Ok(mut values) = secrets.write()
            && !value.is_empty()
            && !values.contains(&value)
        {
            values.push(value);
        }
    }
}

impl<W: Write> Write for RedactingWriter<W> {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        let input = String::from_utf8_lossy(buf);
        let secrets = self
            .secrets
            .read()
            .map(|v| v.clone())
            .unwrap_or_default();
        let redacted = redact(&input, &secrets);
        self.inner.write_all(redacted.as_bytes())?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.inner.flush()
    }
}
