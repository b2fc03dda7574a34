// ABOUTME: Prompt templates for the ShareBites flows loaded at compile time
// ABOUTME: Provides the chat system context and the estimate/analysis instruction templates
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 ShareBites Contributors

//! # Prompt Templates
//!
//! Prompts are loaded at compile time from markdown files for easy maintenance.
//! Templates use `{{name}}` placeholders named after the request's wire fields.

use crate::models::{DonationEstimateRequest, ImpactAnalysisRequest};

/// ShareBot persona, mission, and site facts sent as the first chat turn
pub const SHAREBITES_CONTEXT: &str = include_str!("sharebites_context.md");

/// Donation impact calculator instruction
pub const DONATION_ESTIMATE_TEMPLATE: &str = include_str!("donation_estimate.md");

/// Impact data analyst instruction
pub const IMPACT_ANALYSIS_TEMPLATE: &str = include_str!("impact_analysis.md");

/// Fill the donation template for `request`
#[must_use]
pub fn donation_estimate_prompt(request: &DonationEstimateRequest) -> String {
    DONATION_ESTIMATE_TEMPLATE.replace(
        "{{donationAmount}}",
        &format_number(request.donation_amount),
    )
}

/// Fill the analysis template for `request`
#[must_use]
pub fn impact_analysis_prompt(request: &ImpactAnalysisRequest) -> String {
    IMPACT_ANALYSIS_TEMPLATE
        .replace(
            "{{mealsDistributed}}",
            &format_number(request.meals_distributed),
        )
        .replace("{{moneyRaised}}", &format_number(request.money_raised))
        .replace(
            "{{numberOfDonors}}",
            &format_number(request.number_of_donors),
        )
        .replace("{{monthlyTrends}}", request.monthly_trends.trim())
}

/// Render whole numbers without a trailing `.0`
fn format_number(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{value:.0}")
    } else {
        value.to_string()
    }
}
