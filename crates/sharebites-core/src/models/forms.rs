// ABOUTME: Site form submissions (food pledge, monetary donation, support contact)
// ABOUTME: Shape-validated and acknowledged locally; nothing is persisted or charged
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 ShareBites Contributors

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::constants::conversion::MIN_DONATION_AMOUNT;
use crate::constants::limits::{
    MIN_FOOD_TYPE_CHARS, MIN_NAME_CHARS, MIN_SUBJECT_CHARS, MIN_SUPPORT_MESSAGE_CHARS,
};
use crate::constants::site::PAYMENT_OPTIONS;
use crate::errors::ValidationError;
use crate::validation::{require_at_least, require_email, require_min_chars, require_non_blank, Validate};

/// An offer of surplus food
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FoodPledge {
    /// Donor name
    pub name: String,
    /// Donor email
    pub email: String,
    /// Kind of food (canned goods, fresh produce, cooked meals, ...)
    pub food_type: String,
    /// Free-text quantity
    pub quantity: String,
    /// Where to collect the food
    #[serde(default)]
    pub pickup_address: Option<String>,
    /// Anything else the donor wants to add
    #[serde(default)]
    pub message: Option<String>,
}

impl Validate for FoodPledge {
    fn validate(&self) -> Result<(), ValidationError> {
        require_min_chars("name", &self.name, MIN_NAME_CHARS)?;
        require_email("email", &self.email)?;
        require_min_chars("foodType", &self.food_type, MIN_FOOD_TYPE_CHARS)?;
        require_non_blank("quantity", &self.quantity)
    }
}

/// A simulated monetary donation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DonationSubmission {
    /// Amount donated
    pub donation_amount: f64,
    /// One of the accepted payment methods
    pub payment_method: String,
}

impl Validate for DonationSubmission {
    fn validate(&self) -> Result<(), ValidationError> {
        require_at_least("donationAmount", self.donation_amount, MIN_DONATION_AMOUNT)?;
        require_non_blank("paymentMethod", &self.payment_method)?;
        if !PAYMENT_OPTIONS.contains(&self.payment_method.as_str()) {
            return Err(ValidationError::invalid_format(
                "paymentMethod",
                format!("must be one of: {}", PAYMENT_OPTIONS.join(", ")),
            ));
        }
        Ok(())
    }
}

/// A message sent through the support contact form
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SupportRequest {
    /// Sender name
    pub name: String,
    /// Sender email
    pub email: String,
    /// Subject line
    pub subject: String,
    /// Message body
    pub message: String,
}

impl Validate for SupportRequest {
    fn validate(&self) -> Result<(), ValidationError> {
        require_min_chars("name", &self.name, MIN_NAME_CHARS)?;
        require_email("email", &self.email)?;
        require_min_chars("subject", &self.subject, MIN_SUBJECT_CHARS)?;
        require_min_chars("message", &self.message, MIN_SUPPORT_MESSAGE_CHARS)
    }
}

/// Local acknowledgment of a form submission
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormAck {
    /// Reference the user can quote to support
    pub reference: Uuid,
    /// Thank-you text to display
    pub message: String,
    /// When the submission was acknowledged
    pub received_at: DateTime<Utc>,
}

impl FormAck {
    /// Acknowledge with a fresh reference
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            reference: Uuid::new_v4(),
            message: message.into(),
            received_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pledge() -> FoodPledge {
        FoodPledge {
            name: "Al".to_owned(),
            email: "al@example.org".to_owned(),
            food_type: "Canned goods".to_owned(),
            quantity: "3 boxes".to_owned(),
            pickup_address: None,
            message: None,
        }
    }

    #[test]
    fn test_pledge_boundaries() {
        assert!(pledge().validate().is_ok());

        let short_name = FoodPledge {
            name: "A".to_owned(),
            ..pledge()
        };
        assert_eq!(short_name.validate().unwrap_err().field(), "name");

        let short_food = FoodPledge {
            food_type: "ab".to_owned(),
            ..pledge()
        };
        assert_eq!(short_food.validate().unwrap_err().field(), "foodType");

        let bad_email = FoodPledge {
            email: "al-at-example".to_owned(),
            ..pledge()
        };
        assert_eq!(bad_email.validate().unwrap_err().field(), "email");
    }

    #[test]
    fn test_donation_submission_rules() {
        let ok = DonationSubmission {
            donation_amount: 1.0,
            payment_method: "PayPal".to_owned(),
        };
        assert!(ok.validate().is_ok());

        let too_small = DonationSubmission {
            donation_amount: 0.5,
            ..ok.clone()
        };
        assert_eq!(too_small.validate().unwrap_err().field(), "donationAmount");

        let unknown_method = DonationSubmission {
            payment_method: "Gold bars".to_owned(),
            ..ok
        };
        assert_eq!(
            unknown_method.validate().unwrap_err().field(),
            "paymentMethod"
        );
    }

    #[test]
    fn test_optional_pledge_fields_default() {
        let pledge: FoodPledge = serde_json::from_value(serde_json::json!({
            "name": "Bea",
            "email": "bea@example.org",
            "foodType": "Fresh produce",
            "quantity": "10kg"
        }))
        .unwrap();
        assert!(pledge.pickup_address.is_none());
        assert!(pledge.validate().is_ok());
    }
}
