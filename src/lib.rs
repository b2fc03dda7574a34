// ABOUTME: Main library entry point for the ShareBites donation and support service
// ABOUTME: Provides the AI-assisted flows, chat session state, debounced estimates, and HTTP API
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 ShareBites Contributors

#![deny(unsafe_code)]

//! # ShareBites Server
//!
//! Backend for ShareBites, a non-profit "Fighting Hunger One Bite at a Time"
//! website. Three operations are backed by a hosted generative model:
//!
//! - **Support chat**: ShareBot answers questions about donating and the site
//! - **Donation estimate**: meals provided and families fed for an amount
//! - **Impact analysis**: summary, insights, and recommendations for program metrics
//!
//! ## Architecture
//!
//! - **models / validation**: input and output shapes, checked before any call
//! - **llm**: the `GenerationClient` trait, the Gemini client, prompt templates
//! - **flows**: one operation each; validate, fill template, call once, shape the result
//! - **session**: chat transcript bookkeeping with single-flight submit
//! - **debounce**: cancel-and-reschedule donation estimates
//! - **routes / server**: the axum HTTP API
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use sharebites_server::llm::GeminiClient;
//! use sharebites_server::session::ChatSession;
//!
//! # async fn example() -> anyhow::Result<()> {
//! let session = ChatSession::open(Arc::new(GeminiClient::from_env()?));
//! let outcome = session.submit("How can I pledge food?").await?;
//! if let Some(turn) = outcome.turn() {
//!     println!("{}", turn.text());
//! }
//! # Ok(())
//! # }
//! ```

/// Configuration management
pub mod config;

/// Application constants and environment defaults
pub mod constants;

/// Debounced donation-impact estimates
pub mod debounce;

/// Unified error handling
pub mod errors;

/// The generation-backed operations and site forms
pub mod flows;

/// Generation client abstraction and Gemini implementation
pub mod llm;

/// Structured logging setup
pub mod logging;

/// HTTP middleware
pub mod middleware;

/// HTTP route handlers
pub mod routes;

/// Server assembly and startup
pub mod server;

/// Chat widget session state
pub mod session;

/// Contract-layer request and result shapes
pub use sharebites_core::models;

/// Field-level validation rules
pub use sharebites_core::validation;
