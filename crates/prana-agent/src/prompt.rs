// SPDX-FileCopyrightText: 2026 Prana Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! System instruction resolution.

use tracing::{info, warn};

/// Built-in instruction used when nothing is configured.
pub const DEFAULT_SYSTEM_PROMPT: &str = "\
You are an expert Ayurvedic wellness assistant with deep knowledge of traditional Indian medicine, herbs, nutrition, yoga, and holistic health practices.

Your role is to:
- Provide personalized wellness advice based on Ayurvedic principles
- Recommend natural remedies, herbs, and lifestyle changes
- Suggest yoga poses, breathing exercises, and meditation techniques
- Offer guidance on nutrition and diet according to Ayurvedic doshas
- Help users understand their constitution (Vata, Pitta, Kapha)
- Provide holistic solutions for common health concerns

Always:
- Give practical, actionable advice
- Explain the reasoning behind your recommendations
- Emphasize the importance of consulting healthcare professionals for serious conditions
- Be warm, supportive, and encouraging
- Keep responses concise but informative

Remember: You are not a replacement for medical care, but a guide for natural wellness and prevention.";

/// Loads the system instruction following priority: file > inline > default.
pub async fn resolve_system_prompt(inline_prompt: Option<&str>, prompt_file: Option<&str>) -> String {
    if let Some(file_path) = prompt_file {
        match tokio::fs::read_to_string(file_path).await {
            Ok(content) => {
                let trimmed = content.trim();
                if !trimmed.is_empty() {
                    info!(path = file_path, "loaded system prompt from file");
                    return trimmed.to_string();
                }
                warn!(path = file_path, "system prompt file is empty, falling back");
            }
            Err(e) => {
                warn!(
                    path = file_path,
                    error = %e,
                    "failed to read system prompt file, falling back"
                );
            }
        }
    }

    if let Some(prompt) = inline_prompt
        && !prompt.trim().is_empty()
    {
        return prompt.to_string();
    }

    DEFAULT_SYSTEM_PROMPT.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[tokio::test]
    async fn file_wins_over_inline() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "  From file.  ").unwrap();
        let path = file.path().to_str().unwrap();

        let prompt = resolve_system_prompt(Some("Inline."), Some(path)).await;
        assert_eq!(prompt, "From file.");
    }

    #[tokio::test]
    async fn missing_file_falls_back_to_inline() {
        let prompt = resolve_system_prompt(Some("Inline."), Some("/nonexistent/prompt.md")).await;
        assert_eq!(prompt, "Inline.");
    }

    #[tokio::test]
    async fn empty_file_and_blank_inline_fall_back_to_default() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let path = file.path().to_str().unwrap();

        let prompt = resolve_system_prompt(Some("   "), Some(path)).await;
        assert_eq!(prompt, DEFAULT_SYSTEM_PROMPT);
    }

    #[tokio::test]
    async fn nothing_configured_uses_default() {
        let prompt = resolve_system_prompt(None, None).await;
        assert!(prompt.starts_with("You are an expert Ayurvedic wellness assistant"));
    }
}
