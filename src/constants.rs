// ABOUTME: System-wide constants and configuration defaults for the ShareBites server
// ABOUTME: Re-exports the core site constants and adds service identity and env defaults
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 ShareBites Contributors

//! # Constants Module
//!
//! Site facts, canned texts, and the conversion policy live in
//! `sharebites_core::constants` and are re-exported here. This module adds
//! the server's identity and the defaults behind each environment variable.

pub use sharebites_core::constants::*;

/// Service identity used in logs and health responses
pub mod service {
    /// Service name
    pub const SERVICE_NAME: &str = "sharebites-server";
    /// Crate version baked in at compile time
    pub const SERVICE_VERSION: &str = env!("CARGO_PKG_VERSION");
}

/// Defaults for values read from the environment
pub mod defaults {
    /// `HTTP_HOST`
    pub const HTTP_HOST: &str = "127.0.0.1";
    /// `HTTP_PORT`
    pub const HTTP_PORT: u16 = 8081;
    /// `HTTP_REQUEST_TIMEOUT_SECS`
    pub const HTTP_REQUEST_TIMEOUT_SECS: u64 = 60;
    /// `SHAREBITES_LLM_MODEL`
    pub const LLM_MODEL: &str = "gemini-2.0-flash";
    /// `SHAREBITES_LLM_BASE_URL`
    pub const LLM_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
    /// `SHAREBITES_LLM_TIMEOUT_SECS`
    pub const LLM_TIMEOUT_SECS: u64 = 30;
    /// `SHAREBITES_DEBOUNCE_MS`
    pub const DEBOUNCE_MS: u64 = 500;
}
