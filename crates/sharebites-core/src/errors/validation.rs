// ABOUTME: Contract-layer validation error naming the offending input field
// ABOUTME: Raised synchronously before any generation call is attempted
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 ShareBites Contributors

use thiserror::Error;

use super::{AppError, ErrorCode};

/// Input failed a contract constraint.
///
/// `field` is the wire (camelCase) name so the presentation layer can attach
/// the message to the matching form control.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Field is absent or blank
    #[error("{field} is required")]
    Missing {
        /// Offending field
        field: &'static str,
    },
    /// Numeric field is outside its accepted range
    #[error("{field} {reason}")]
    OutOfRange {
        /// Offending field
        field: &'static str,
        /// Human-readable constraint, e.g. "must be greater than 0"
        reason: String,
    },
    /// Text field is shorter than its minimum length
    #[error("{field} must be at least {min} characters (got {actual})")]
    TooShort {
        /// Offending field
        field: &'static str,
        /// Minimum number of characters
        min: usize,
        /// Number of characters supplied
        actual: usize,
    },
    /// Field does not match the expected format
    #[error("{field} {reason}")]
    InvalidFormat {
        /// Offending field
        field: &'static str,
        /// Human-readable description of the expected format
        reason: String,
    },
}

impl ValidationError {
    /// Create an out-of-range error
    #[must_use]
    pub fn out_of_range(field: &'static str, reason: impl Into<String>) -> Self {
        Self::OutOfRange {
            field,
            reason: reason.into(),
        }
    }

    /// Create an invalid-format error
    #[must_use]
    pub fn invalid_format(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidFormat {
            field,
            reason: reason.into(),
        }
    }

    /// Wire name of the field that failed
    #[must_use]
    pub const fn field(&self) -> &'static str {
        match self {
            Self::Missing { field }
            | Self::OutOfRange { field, .. }
            | Self::TooShort { field, .. }
            | Self::InvalidFormat { field, .. } => field,
        }
    }

    const fn code(&self) -> ErrorCode {
        match self {
            Self::Missing { .. } => ErrorCode::MissingRequiredField,
            Self::OutOfRange { .. } => ErrorCode::ValueOutOfRange,
            Self::TooShort { .. } => ErrorCode::InvalidInput,
            Self::InvalidFormat { .. } => ErrorCode::InvalidFormat,
        }
    }
}

impl From<ValidationError> for AppError {
    fn from(error: ValidationError) -> Self {
        Self::new(error.code(), error.to_string()).with_field(error.field())
    }
}
