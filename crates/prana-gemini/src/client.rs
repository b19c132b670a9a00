// SPDX-FileCopyrightText: 2026 Prana Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP client for the Gemini `generateContent` REST API.
//!
//! Provides [`GeminiClient`] which handles authentication, request
//! construction, and error body decoding. It performs no retries and sets
//! no request timeout; callers that need a deadline layer one on top.

use prana_core::PranaError;
use reqwest::header::{HeaderMap, HeaderValue};
use secrecy::{ExposeSecret, SecretString};
use tracing::debug;

use crate::endpoint;
use crate::sse::{self, ResponseStream};
use crate::types::{ApiErrorResponse, GenerateContentRequest, GenerateContentResponse};

/// Header carrying the API key.
const API_KEY_HEADER: &str = "x-goog-api-key";

/// HTTP client for Gemini API communication.
#[derive(Debug, Clone)]
pub struct GeminiClient {
    client: reqwest::Client,
    base_url: String,
}

impl GeminiClient {
    /// Creates a new client authenticated with `api_key`.
    ///
    /// Fails with [`PranaError::Config`] if the key is empty or the base URL
    /// violates the endpoint policy.
    pub fn new(api_key: &SecretString, base_url: &str) -> Result<Self, PranaError> {
        if api_key.expose_secret().trim().is_empty() {
            return Err(PranaError::Config("Gemini API key is empty".into()));
        }
        endpoint::validate_base_url(base_url)?;

        let mut key_value = HeaderValue::from_str(api_key.expose_secret())
            .map_err(|e| PranaError::Config(format!("invalid API key header value: {e}")))?;
        key_value.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(API_KEY_HEADER, key_value);
        headers.insert("content-type", HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .build()
            .map_err(|e| PranaError::Provider {
                message: format!("failed to build HTTP client: {e}"),
                source: Some(Box::new(e)),
            })?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Sends a non-streaming request and returns the full response.
    pub async fn generate_content(
        &self,
        model: &str,
        request: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse, PranaError> {
        let url = endpoint::method_url(&self.base_url, model, "generateContent");
        let response = self.post(&url, request).await?;

        let body = response.text().await.map_err(|e| PranaError::Provider {
            message: format!("network read failed: {e}"),
            source: Some(Box::new(e)),
        })?;
        serde_json::from_str(&body).map_err(|e| PranaError::Provider {
            message: format!("failed to parse API response: {e}"),
            source: Some(Box::new(e)),
        })
    }

    /// Sends a streaming request and returns a stream of response chunks.
    pub async fn stream_generate_content(
        &self,
        model: &str,
        request: &GenerateContentRequest,
    ) -> Result<ResponseStream, PranaError> {
        let url = endpoint::method_url(&self.base_url, model, "streamGenerateContent?alt=sse");
        let response = self.post(&url, request).await?;
        Ok(sse::parse_sse_stream(response))
    }

    /// Posts the request and converts non-2xx responses into provider errors.
    async fn post(
        &self,
        url: &str,
        request: &GenerateContentRequest,
    ) -> Result<reqwest::Response, PranaError> {
        let response = self
            .client
            .post(url)
            .json(request)
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status();
        debug!(status = %status, "gemini response received");

        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        Err(PranaError::provider(error_message(status, &body)))
    }
}

/// Maps a transport failure onto a message the classifier reads as a
/// network fault.
fn transport_error(e: reqwest::Error) -> PranaError {
    let message = if e.is_timeout() {
        format!("network request timed out: {e}")
    } else {
        format!("network request failed: {e}")
    };
    PranaError::Provider {
        message,
        source: Some(Box::new(e)),
    }
}

/// Renders a non-2xx response, preferring the API's own error message.
fn error_message(status: reqwest::StatusCode, body: &str) -> String {
    match serde_json::from_str::<ApiErrorResponse>(body) {
        Ok(api_err) => api_err.error.describe(),
        Err(_) => format!("API returned {status}: {body}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Content, GenerationConfig};
    use futures::StreamExt;
    use wiremock::matchers::{body_partial_json, header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn key() -> SecretString {
        SecretString::from("test-gemini-key")
    }

    fn sample_request() -> GenerateContentRequest {
        GenerateContentRequest {
            contents: vec![Content::text(Some("user"), "Hello")],
            system_instruction: None,
            generation_config: GenerationConfig {
                temperature: 0.5,
                thinking_config: None,
            },
        }
    }

    fn text_response(text: &str) -> serde_json::Value {
        serde_json::json!({
            "candidates": [{
                "content": {"role": "model", "parts": [{"text": text}]},
                "finishReason": "STOP"
            }],
            "usageMetadata": {"promptTokenCount": 2, "candidatesTokenCount": 3, "totalTokenCount": 5}
        })
    }

    #[test]
    fn rejects_empty_key() {
        let err = GeminiClient::new(&SecretString::from("  "), "https://example.com").unwrap_err();
        assert!(matches!(err, PranaError::Config(_)));
    }

    #[test]
    fn rejects_plain_http_remote() {
        let err = GeminiClient::new(&key(), "http://example.com/v1beta").unwrap_err();
        assert!(err.to_string().contains("TLS required"));
    }

    #[test]
    fn debug_output_hides_key() {
        let client = GeminiClient::new(&key(), "http://127.0.0.1:1").unwrap();
        assert!(!format!("{client:?}").contains("test-gemini-key"));
    }

    #[tokio::test]
    async fn generate_sends_key_header_and_body() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/models/gemini-2.5-flash:generateContent"))
            .and(header("x-goog-api-key", "test-gemini-key"))
            .and(header("content-type", "application/json"))
            .and(body_partial_json(serde_json::json!({
                "contents": [{"role": "user", "parts": [{"text": "Hello"}]}],
                "generationConfig": {"temperature": 0.5}
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(text_response("Namaste")))
            .expect(1)
            .mount(&server)
            .await;

        let client = GeminiClient::new(&key(), &server.uri()).unwrap();
        let response = client
            .generate_content("gemini-2.5-flash", &sample_request())
            .await
            .unwrap();

        assert_eq!(response.text().as_deref(), Some("Namaste"));
    }

    #[tokio::test]
    async fn invalid_key_error_keeps_api_message() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(400).set_body_json(serde_json::json!({
                "error": {
                    "code": 400,
                    "message": "API key not valid. Please pass a valid API key.",
                    "status": "INVALID_ARGUMENT"
                }
            })))
            .mount(&server)
            .await;

        let client = GeminiClient::new(&key(), &server.uri()).unwrap();
        let err = client
            .generate_content("m", &sample_request())
            .await
            .unwrap_err();

        let msg = err.to_string();
        assert!(msg.contains("API key not valid"), "got: {msg}");
        assert_eq!(prana_core::classify_fault(&err), prana_core::ErrorKind::ApiKeyError);
    }

    #[tokio::test]
    async fn quota_error_classifies_as_quota() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(429).set_body_json(serde_json::json!({
                "error": {
                    "code": 429,
                    "message": "You exceeded your current quota, please check your plan and billing details.",
                    "status": "RESOURCE_EXHAUSTED"
                }
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = GeminiClient::new(&key(), &server.uri()).unwrap();
        let err = client
            .generate_content("m", &sample_request())
            .await
            .unwrap_err();

        assert_eq!(prana_core::classify_fault(&err), prana_core::ErrorKind::QuotaExceeded);
    }

    #[tokio::test]
    async fn non_json_error_body_is_reported_with_status() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(503).set_body_string("upstream unavailable"))
            .mount(&server)
            .await;

        let client = GeminiClient::new(&key(), &server.uri()).unwrap();
        let err = client
            .generate_content("m", &sample_request())
            .await
            .unwrap_err()
            .to_string();

        assert!(err.contains("503"), "got: {err}");
        assert!(err.contains("upstream unavailable"), "got: {err}");
    }

    #[tokio::test]
    async fn connection_refused_is_network_fault() {
        // Bind and drop a listener to get a port nothing listens on.
        let port = {
            let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
            listener.local_addr().unwrap().port()
        };

        let client = GeminiClient::new(&key(), &format!("http://127.0.0.1:{port}")).unwrap();
        let err = client
            .generate_content("m", &sample_request())
            .await
            .unwrap_err();

        assert!(err.to_string().contains("network"), "got: {err}");
        assert_eq!(prana_core::classify_fault(&err), prana_core::ErrorKind::NetworkError);
    }

    #[tokio::test]
    async fn stream_uses_sse_endpoint() {
        let server = MockServer::start().await;

        let sse_body = format!(
            "data: {}\n\ndata: {}\n\n",
            text_response("Calm "),
            text_response("breath.")
        );

        Mock::given(method("POST"))
            .and(path("/models/gemini-2.5-flash:streamGenerateContent"))
            .and(query_param("alt", "sse"))
            .and(header("x-goog-api-key", "test-gemini-key"))
            .respond_with(
                ResponseTemplate::new(200)
                    .insert_header("content-type", "text/event-stream")
                    .set_body_string(sse_body),
            )
            .expect(1)
            .mount(&server)
            .await;

        let client = GeminiClient::new(&key(), &server.uri()).unwrap();
        let stream = client
            .stream_generate_content("gemini-2.5-flash", &sample_request())
            .await
            .unwrap();

        let texts: Vec<String> = stream
            .map(|r| r.unwrap().text().unwrap_or_default())
            .collect()
            .await;
        assert_eq!(texts, vec!["Calm ", "breath."]);
    }
}
