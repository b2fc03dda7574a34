// ABOUTME: Site form submissions validated and acknowledged without persistence
// ABOUTME: Food pledges, simulated monetary donations, and support contact messages
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 ShareBites Contributors

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::constants::forms::{PLEDGE_THANKS, SUPPORT_THANKS};
use crate::errors::AppResult;
use crate::models::{
    reference_impact, DonationSubmission, FoodPledge, FormAck, ReferenceImpact, SupportRequest,
};
use crate::validation::Validate;

/// Acknowledgment of a donation plus its deterministic impact
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DonationReceipt {
    /// Acknowledgment
    #[serde(flatten)]
    pub ack: FormAck,
    /// Impact under the fixed conversion policy
    pub impact: ReferenceImpact,
}

/// Accept a food pledge
///
/// # Errors
///
/// Returns a validation error naming the first invalid field.
pub fn submit_food_pledge(pledge: &FoodPledge) -> AppResult<FormAck> {
    pledge.validate()?;
    let ack = FormAck::new(PLEDGE_THANKS);
    info!(reference = %ack.reference, food_type = %pledge.food_type, "food pledge acknowledged");
    Ok(ack)
}

/// Accept a simulated donation; nothing is charged
///
/// # Errors
///
/// Returns a validation error for an amount below 1 or an unknown payment method.
pub fn submit_donation(donation: &DonationSubmission) -> AppResult<DonationReceipt> {
    donation.validate()?;
    let ack = FormAck::new(format!(
        "Thank you for your generous donation of ${} via {}!",
        donation.donation_amount, donation.payment_method
    ));
    info!(reference = %ack.reference, amount = donation.donation_amount, "donation acknowledged");
    Ok(DonationReceipt {
        ack,
        impact: reference_impact(donation.donation_amount),
    })
}

/// Accept a support contact message
///
/// # Errors
///
/// Returns a validation error naming the first invalid field.
pub fn submit_support_request(request: &SupportRequest) -> AppResult<FormAck> {
    request.validate()?;
    let ack = FormAck::new(SUPPORT_THANKS);
    info!(reference = %ack.reference, subject = %request.subject, "support request acknowledged");
    Ok(ack)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_donation_receipt_message_and_impact() {
        let receipt = submit_donation(&DonationSubmission {
            donation_amount: 25.0,
            payment_method: "PayPal".to_owned(),
        })
        .unwrap();
        assert_eq!(
            receipt.ack.message,
            "Thank you for your generous donation of $25 via PayPal!"
        );
        assert!((receipt.impact.meals - 50.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_invalid_support_request_names_field() {
        let error = submit_support_request(&SupportRequest {
            name: "Dana".to_owned(),
            email: "dana@example.org".to_owned(),
            subject: "Hi".to_owned(),
            message: "Where do I drop off food?".to_owned(),
        })
        .unwrap_err();
        assert!(error.is_validation());
        assert_eq!(error.field(), Some("subject"));
    }
}
