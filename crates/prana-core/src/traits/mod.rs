// SPDX-FileCopyrightText: 2026 Prana Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Trait seams between the conversation client and concrete backends.
//!
//! Traits use `#[async_trait]` so they stay usable behind `dyn`.

pub mod backend;

pub use backend::{ChunkStream, GenerativeBackend};
