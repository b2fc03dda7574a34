// ABOUTME: Field-level validation rules shared by every flow input and form
// ABOUTME: Provides the Validate trait and small checkers that name the failing field
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 ShareBites Contributors

//! # Contract Validation
//!
//! Every request shape implements [`Validate`]. Flows call `validate()` before
//! building a prompt, so malformed input never reaches the remote model.

use std::sync::OnceLock;

use regex::Regex;

use crate::errors::ValidationError;

/// A request shape with field constraints
pub trait Validate {
    /// Check every field constraint, failing on the first violation
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] naming the offending field.
    fn validate(&self) -> Result<(), ValidationError>;
}

/// Require a finite number strictly greater than zero
///
/// # Errors
///
/// Returns `OutOfRange` for zero, negatives, NaN, or infinities.
pub fn require_positive(field: &'static str, value: f64) -> Result<(), ValidationError> {
    if !value.is_finite() {
        return Err(ValidationError::out_of_range(field, "must be a finite number"));
    }
    if value <= 0.0 {
        return Err(ValidationError::out_of_range(field, "must be greater than 0"));
    }
    Ok(())
}

/// Require a finite number at or above `min`
///
/// # Errors
///
/// Returns `OutOfRange` when the value is below `min` or not finite.
pub fn require_at_least(field: &'static str, value: f64, min: f64) -> Result<(), ValidationError> {
    if !value.is_finite() {
        return Err(ValidationError::out_of_range(field, "must be a finite number"));
    }
    if value < min {
        return Err(ValidationError::out_of_range(
            field,
            format!("must be at least {min}"),
        ));
    }
    Ok(())
}

/// Require text that is not empty after trimming
///
/// # Errors
///
/// Returns `Missing` for empty or whitespace-only text.
pub fn require_non_blank(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::Missing { field });
    }
    Ok(())
}

/// Require at least `min` characters (Unicode scalar values, untrimmed)
///
/// # Errors
///
/// Returns `Missing` for blank text and `TooShort` below the minimum.
pub fn require_min_chars(
    field: &'static str,
    value: &str,
    min: usize,
) -> Result<(), ValidationError> {
    require_non_blank(field, value)?;
    let actual = value.chars().count();
    if actual < min {
        return Err(ValidationError::TooShort { field, min, actual });
    }
    Ok(())
}

/// Require at most `max` characters
///
/// # Errors
///
/// Returns `InvalidFormat` when the text is longer than `max`.
pub fn require_max_chars(
    field: &'static str,
    value: &str,
    max: usize,
) -> Result<(), ValidationError> {
    if value.chars().count() > max {
        return Err(ValidationError::invalid_format(
            field,
            format!("must be at most {max} characters"),
        ));
    }
    Ok(())
}

/// Require a syntactically valid email address
///
/// # Errors
///
/// Returns `Missing` for blank input and `InvalidFormat` otherwise.
pub fn require_email(field: &'static str, value: &str) -> Result<(), ValidationError> {
    require_non_blank(field, value)?;
    let valid = email_regex().is_some_and(|re| re.is_match(value.trim()));
    if !valid {
        return Err(ValidationError::invalid_format(
            field,
            "must be a valid email address",
        ));
    }
    Ok(())
}

/// Get compiled email regex (cached)
fn email_regex() -> Option<&'static Regex> {
    static EMAIL_REGEX: OnceLock<Option<Regex>> = OnceLock::new();
    EMAIL_REGEX
        .get_or_init(|| Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").ok())
        .as_ref()
}
