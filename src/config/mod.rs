// ABOUTME: Configuration management module for centralized server settings
// ABOUTME: Loads HTTP, generation client, CORS, and debounce settings from the environment
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 ShareBites Contributors

//! Configuration module for the ShareBites server
//!
//! All settings come from environment variables; there is no config file.
//!
//! - **Environment**: `ServerConfig` and its sections, parsed from env vars

/// Environment and server configuration
pub mod environment;

pub use environment::{CorsConfig, Environment, HttpConfig, LlmConfig, ServerConfig};
