// ABOUTME: Shared test helpers for integration tests
// ABOUTME: Exports the in-process HTTP request helpers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 ShareBites Contributors

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

pub mod api;
