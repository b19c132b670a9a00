// SPDX-FileCopyrightText: 2026 Prana Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Generative backend trait for hosted text-generation endpoints.

use std::pin::Pin;
use std::sync::Arc;

use async_trait::async_trait;
use futures_core::Stream;

use crate::error::PranaError;
use crate::types::{GenerateRequest, GenerateResponse, StreamChunk};

/// A boxed stream of reply fragments.
pub type ChunkStream = Pin<Box<dyn Stream<Item = Result<StreamChunk, PranaError>> + Send>>;

/// A hosted text-generation endpoint.
///
/// Implementations are stateless across calls: every request carries its
/// full history. Failures are reported as [`PranaError::Provider`] whose
/// message carries the backend's own wording, which is what the
/// conversation client classifies.
#[async_trait]
pub trait GenerativeBackend: Send + Sync + 'static {
    /// Human-readable backend name, used in logs.
    fn name(&self) -> &str;

    /// Sends a request and waits for the complete response.
    async fn generate(&self, request: GenerateRequest) -> Result<GenerateResponse, PranaError>;

    /// Sends a request and returns the reply as an ordered fragment stream.
    ///
    /// Errors may surface either here (at open time) or as an `Err` item
    /// mid-stream.
    async fn stream(&self, request: GenerateRequest) -> Result<ChunkStream, PranaError>;
}

#[async_trait]
impl<B: GenerativeBackend + ?Sized> GenerativeBackend for Arc<B> {
    fn name(&self) -> &str {
        (**self).name()
    }

    async fn generate(&self, request: GenerateRequest) -> Result<GenerateResponse, PranaError> {
        (**self).generate(request).await
    }

    async fn stream(&self, request: GenerateRequest) -> Result<ChunkStream, PranaError> {
        (**self).stream(request).await
    }
}
