// ABOUTME: Core contract types and constants for the ShareBites service
// ABOUTME: Foundation crate with error handling, flow input/output shapes, and validation
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 ShareBites Contributors

#![deny(unsafe_code)]

//! # ShareBites Core
//!
//! Foundation crate for the ShareBites service. It has no network or runtime
//! dependencies so the contract can be checked anywhere, including tests that
//! never touch the generation client.
//!
//! ## Modules
//!
//! - **errors**: Unified `AppError` plus `ValidationError` and `GenerationError`
//! - **constants**: Site facts, the donation conversion policy, canned texts
//! - **models**: Input/output shapes for the chat, estimate, and analysis flows
//! - **validation**: The `Validate` trait and field checkers

/// Unified error handling system with standard error codes and HTTP responses
pub mod errors;

/// Application constants organized by domain
pub mod constants;

/// Contract-layer request and result shapes
pub mod models;

/// Field-level validation rules
pub mod validation;
