// ABOUTME: Contract-layer data models for the three generation flows and the site forms
// ABOUTME: Re-exports request/result shapes and defines the structured-output contract
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 ShareBites Contributors

//! # Contract Models
//!
//! Input and output shapes for each flow. Field names serialize in camelCase
//! so the JSON contract matches what the site's widgets send and render.

mod chat;
mod donation;
mod forms;
mod impact;

pub use chat::{ChatInput, ChatOutput, ChatPart, ChatRole, ChatTranscript, ChatTurn, TranscriptEntry};
pub use donation::{reference_impact, DonationEstimateRequest, DonationEstimateResult, ReferenceImpact};
pub use forms::{DonationSubmission, FoodPledge, FormAck, SupportRequest};
pub use impact::{ImpactAnalysisRequest, ImpactAnalysisResult, ImpactStats, MonthlyPoint};

use serde::de::DeserializeOwned;

use crate::errors::GenerationError;

/// Output shape a structured generation call must produce.
///
/// The generation client sends [`response_schema`](Self::response_schema) to
/// the provider, parses the reply into `Self`, then runs
/// [`check`](Self::check) so numeric and textual guarantees hold even when the
/// provider ignores the schema.
pub trait StructuredOutput: DeserializeOwned + Send {
    /// Short name used in logs and error messages
    const SCHEMA_NAME: &'static str;

    /// Provider-facing JSON schema (OpenAPI subset, upper-case type names)
    fn response_schema() -> serde_json::Value;

    /// Enforce constraints serde cannot express
    ///
    /// # Errors
    ///
    /// Returns [`GenerationError::MalformedOutput`] when a guarantee is violated.
    fn check(&self) -> Result<(), GenerationError>;
}

/// Reject NaN, infinities, and negatives in a model-produced number
pub(crate) fn check_non_negative(
    schema: &'static str,
    field: &str,
    value: f64,
) -> Result<(), GenerationError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(GenerationError::malformed(
            schema,
            format!("{field} must be a non-negative number, got {value}"),
        ))
    }
}

/// Reject blank model-produced text
pub(crate) fn check_non_blank(
    schema: &'static str,
    field: &str,
    value: &str,
) -> Result<(), GenerationError> {
    if value.trim().is_empty() {
        Err(GenerationError::malformed(schema, format!("{field} is empty")))
    } else {
        Ok(())
    }
}
