// ABOUTME: HTTP middleware for the ShareBites API router
// ABOUTME: CORS policy plus request-id generation and request tracing spans
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 ShareBites Contributors

/// Cross-origin policy from configuration
pub mod cors;
/// Request IDs and per-request tracing spans
pub mod request_tracing;

pub use cors::setup_cors;
pub use request_tracing::{make_request_span, RequestIdGenerator, REQUEST_ID_HEADER};
