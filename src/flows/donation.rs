// ABOUTME: Donation-impact estimate flow turning an amount into meals and families fed
// ABOUTME: Structured call whose numbers are checked against the fixed conversion policy
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 ShareBites Contributors

use std::time::Instant;

use tracing::{info, instrument, warn};

use crate::constants::conversion::CONSISTENCY_TOLERANCE;
use crate::errors::AppResult;
use crate::llm::prompts::donation_estimate_prompt;
use crate::llm::{generate_structured, GenerationClient, GenerationRequest};
use crate::models::{reference_impact, DonationEstimateRequest, DonationEstimateResult};
use crate::validation::Validate;

/// Build the single request for one estimate
#[must_use]
pub fn donation_request(request: &DonationEstimateRequest) -> GenerationRequest {
    GenerationRequest::new(donation_estimate_prompt(request))
        .with_output::<DonationEstimateResult>()
}

/// Estimate the impact of a donation.
///
/// The model's numbers are returned as produced. A result that strays from
/// the conversion policy is logged, not rejected.
///
/// # Errors
///
/// Returns a validation error for a non-positive amount, or a generation
/// error when the call fails or the reply does not match the output shape.
#[instrument(skip(client), fields(flow = "donation_estimate", amount = request.donation_amount))]
pub async fn estimate_donation_impact(
    client: &dyn GenerationClient,
    request: &DonationEstimateRequest,
) -> AppResult<DonationEstimateResult> {
    request.validate()?;

    let started = Instant::now();
    let result: DonationEstimateResult =
        generate_structured(client, donation_request(request)).await?;

    if !result.is_consistent_with(request.donation_amount, CONSISTENCY_TOLERANCE) {
        let expected = reference_impact(request.donation_amount);
        warn!(
            meals = result.meals_provided,
            families = result.families_fed,
            expected_meals = expected.meals,
            expected_families = expected.families,
            "estimate deviates from conversion policy"
        );
    }

    info!(
        duration_ms = started.elapsed().as_millis() as u64,
        "donation estimate produced"
    );
    Ok(result)
}
