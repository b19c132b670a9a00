// SPDX-FileCopyrightText: 2026 Prana Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test utilities for Prana integration tests.
//!
//! Provides a scripted generative backend and configuration fixtures for
//! fast, deterministic, CI-runnable tests without network access.
//!
//! # Components
//!
//! - [`MockBackend`] - Scripted backend that records every request
//! - [`test_config`] - Configuration with deterministic defaults

pub mod fixtures;
pub mod mock_backend;

pub use fixtures::{TEST_API_KEY, test_config};
pub use mock_backend::{MockBackend, Script};
