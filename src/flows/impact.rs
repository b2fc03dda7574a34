// ABOUTME: Impact-data analysis flow producing a summary, insights, and recommendations
// ABOUTME: Structured call over the aggregate program metrics snapshot
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 ShareBites Contributors

use std::time::Instant;

use tracing::{info, instrument};

use crate::errors::AppResult;
use crate::llm::prompts::impact_analysis_prompt;
use crate::llm::{generate_structured, GenerationClient, GenerationRequest};
use crate::models::{ImpactAnalysisRequest, ImpactAnalysisResult};
use crate::validation::Validate;

/// Build the single request for one analysis
#[must_use]
pub fn impact_request(request: &ImpactAnalysisRequest) -> GenerationRequest {
    GenerationRequest::new(impact_analysis_prompt(request)).with_output::<ImpactAnalysisResult>()
}

/// Analyze a metrics snapshot
///
/// # Errors
///
/// Returns a validation error when a metric is not positive or the trend
/// narrative is shorter than 20 characters, or a generation error when the
/// call fails or the reply does not match the output shape.
#[instrument(skip(client, request), fields(flow = "impact_analysis"))]
pub async fn analyze_impact(
    client: &dyn GenerationClient,
    request: &ImpactAnalysisRequest,
) -> AppResult<ImpactAnalysisResult> {
    request.validate()?;

    let started = Instant::now();
    let result: ImpactAnalysisResult = generate_structured(client, impact_request(request)).await?;

    info!(
        duration_ms = started.elapsed().as_millis() as u64,
        insights = result.key_insights.len(),
        "impact analysis produced"
    );
    Ok(result)
}
