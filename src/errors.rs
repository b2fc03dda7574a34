// ABOUTME: Unified error handling for the ShareBites server
// ABOUTME: Re-exports the core AppError system with its validation and generation families
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 ShareBites Contributors

//! # Unified Error Handling System
//!
//! `AppError` and its families are defined in `sharebites_core::errors` so
//! the contract layer can raise them without depending on the server. The
//! core crate is built with `http-response`, so `AppError` is an axum
//! `IntoResponse` here.

pub use sharebites_core::errors::*;
