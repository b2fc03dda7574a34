// ABOUTME: The ShareBites request/response operations against the generation client
// ABOUTME: Each flow validates input, fills its template, issues one call, and shapes the result
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 ShareBites Contributors

//! # Flows
//!
//! A flow is one request/response operation:
//!
//! 1. validate the input against the contract layer (no call on failure)
//! 2. build exactly one [`GenerationRequest`](crate::llm::GenerationRequest)
//! 3. validate the reply against the output shape
//!
//! Flows hold no state. The form submissions live here too: they share the
//! validate-then-acknowledge shape but never reach the model.

mod chat;
mod donation;
mod forms;
mod impact;

pub use chat::{chat_request, customer_support_chat};
pub use donation::{donation_request, estimate_donation_impact};
pub use forms::{submit_donation, submit_food_pledge, submit_support_request, DonationReceipt};
pub use impact::{analyze_impact, impact_request};
