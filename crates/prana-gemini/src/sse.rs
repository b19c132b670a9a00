// SPDX-FileCopyrightText: 2026 Prana Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! SSE stream parser for `streamGenerateContent?alt=sse` responses.
//!
//! Each SSE event carries one JSON `GenerateContentResponse`. The API may
//! also emit an `{"error": {...}}` payload mid-stream, which is surfaced as
//! an `Err` item.

use std::pin::Pin;

use eventsource_stream::Eventsource;
use futures::stream::{Stream, StreamExt};
use prana_core::PranaError;
use serde::Deserialize;

use crate::types::{ApiErrorResponse, GenerateContentResponse};

/// Boxed stream of parsed response chunks.
pub type ResponseStream =
    Pin<Box<dyn Stream<Item = Result<GenerateContentResponse, PranaError>> + Send>>;

#[derive(Deserialize)]
#[serde(untagged)]
enum SsePayload {
    // Must come first: every field of a response chunk is optional.
    Error(ApiErrorResponse),
    Chunk(GenerateContentResponse),
}

/// Parses a streaming response into [`GenerateContentResponse`] chunks.
///
/// Events with an empty data field (keep-alives) are skipped.
pub fn parse_sse_stream(response: reqwest::Response) -> ResponseStream {
    let events = response.bytes_stream().eventsource();

    let mapped = events.filter_map(|result| async move {
        match result {
            Ok(event) => {
                let data = event.data.trim();
                if data.is_empty() {
                    return None;
                }
                Some(parse_event_data(data))
            }
            Err(e) => Some(Err(PranaError::Provider {
                message: format!("network stream interrupted: {e}"),
                source: Some(Box::new(e)),
            })),
        }
    });

    Box::pin(mapped)
}

/// Parses one SSE `data:` payload.
pub fn parse_event_data(data: &str) -> Result<GenerateContentResponse, PranaError> {
    match serde_json::from_str::<SsePayload>(data) {
        Ok(SsePayload::Chunk(chunk)) => Ok(chunk),
        Ok(SsePayload::Error(err)) => Err(PranaError::provider(err.error.describe())),
        Err(e) => Err(PranaError::Provider {
            message: format!("failed to parse stream chunk: {e}"),
            source: Some(Box::new(e)),
        }),
    }
}
