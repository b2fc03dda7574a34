// ABOUTME: Donation-impact estimate request/result shapes and the reference conversion
// ABOUTME: 1 currency unit => 2 meals => 0.5 families is the ground truth for model estimates
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 ShareBites Contributors

use serde::{Deserialize, Serialize};
use serde_json::json;

use super::{check_non_blank, check_non_negative, StructuredOutput};
use crate::constants::conversion::{FAMILIES_PER_UNIT, MEALS_PER_UNIT};
use crate::errors::{GenerationError, ValidationError};
use crate::validation::{require_positive, Validate};

/// One donation amount to be explained
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DonationEstimateRequest {
    /// Amount donated (currency-agnostic)
    pub donation_amount: f64,
}

impl DonationEstimateRequest {
    /// Create a request for `amount`
    #[must_use]
    pub const fn new(amount: f64) -> Self {
        Self {
            donation_amount: amount,
        }
    }
}

impl Validate for DonationEstimateRequest {
    fn validate(&self) -> Result<(), ValidationError> {
        require_positive("donationAmount", self.donation_amount)
    }
}

/// Model-estimated impact of a donation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DonationEstimateResult {
    /// Estimated meals provided
    pub meals_provided: f64,
    /// Estimated families fed
    pub families_fed: f64,
    /// Short motivating statement
    pub impact_statement: String,
}

impl DonationEstimateResult {
    /// Whether the model's numbers agree with the fixed conversion policy
    #[must_use]
    pub fn is_consistent_with(&self, amount: f64, tolerance: f64) -> bool {
        let reference = reference_impact(amount);
        (self.meals_provided - reference.meals).abs() <= tolerance
            && (self.families_fed - reference.families).abs() <= tolerance
    }
}

impl StructuredOutput for DonationEstimateResult {
    const SCHEMA_NAME: &'static str = "DonationEstimateResult";

    fn response_schema() -> serde_json::Value {
        json!({
            "type": "OBJECT",
            "properties": {
                "mealsProvided": {
                    "type": "NUMBER",
                    "description": "The estimated number of meals provided by the donation."
                },
                "familiesFed": {
                    "type": "NUMBER",
                    "description": "The estimated number of families that can be fed by the donation."
                },
                "impactStatement": {
                    "type": "STRING",
                    "description": "A statement summarizing the impact of the donation."
                }
            },
            "required": ["mealsProvided", "familiesFed", "impactStatement"]
        })
    }

    fn check(&self) -> Result<(), GenerationError> {
        check_non_negative(Self::SCHEMA_NAME, "mealsProvided", self.meals_provided)?;
        check_non_negative(Self::SCHEMA_NAME, "familiesFed", self.families_fed)?;
        check_non_blank(Self::SCHEMA_NAME, "impactStatement", &self.impact_statement)
    }
}

/// Deterministic impact under the fixed conversion policy
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ReferenceImpact {
    /// Meals provided
    pub meals: f64,
    /// Families fed
    pub families: f64,
}

/// Apply the fixed conversion policy to `amount`
#[must_use]
pub fn reference_impact(amount: f64) -> ReferenceImpact {
    ReferenceImpact {
        meals: amount * MEALS_PER_UNIT,
        families: amount * FAMILIES_PER_UNIT,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_conversion() {
        let impact = reference_impact(10.0);
        assert!((impact.meals - 20.0).abs() < f64::EPSILON);
        assert!((impact.families - 5.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_result_wire_names() {
        let result: DonationEstimateResult = serde_json::from_value(json!({
            "mealsProvided": 50,
            "familiesFed": 12.5,
            "impactStatement": "Your $25 feeds 12 families!"
        }))
        .unwrap();
        assert!(result.is_consistent_with(25.0, 0.5));
        assert!(!result.is_consistent_with(30.0, 0.5));
        assert!(result.check().is_ok());
    }

    #[test]
    fn test_check_rejects_negative_meals() {
        let result = DonationEstimateResult {
            meals_provided: -1.0,
            families_fed: 0.0,
            impact_statement: "x".to_owned(),
        };
        assert!(matches!(
            result.check(),
            Err(GenerationError::MalformedOutput { .. })
        ));
    }
}
