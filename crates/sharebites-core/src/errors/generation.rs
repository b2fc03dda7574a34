// ABOUTME: Generation client failure taxonomy for calls to the hosted model API
// ABOUTME: Covers transport, provider status, rate limiting, blocked and unusable output
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 ShareBites Contributors

use thiserror::Error;

use super::{AppError, ErrorCode};

/// The remote generation call failed.
///
/// No variant carries partial results: a failed call is terminal for that
/// request and must be re-triggered by a new user action.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GenerationError {
    /// Request never completed (DNS, TLS, timeout, connection reset)
    #[error("request to {provider} failed: {message}")]
    Transport {
        /// Provider name
        provider: &'static str,
        /// Underlying error text
        message: String,
    },
    /// Provider answered with a non-success status
    #[error("{provider} returned status {status}: {message}")]
    Provider {
        /// Provider name
        provider: &'static str,
        /// HTTP status code
        status: u16,
        /// Provider error message
        message: String,
    },
    /// Provider is throttling us; `message` is safe to show to users
    #[error("{message}")]
    RateLimited {
        /// User-facing retry hint
        message: String,
    },
    /// Provider refused to answer for safety reasons
    #[error("response blocked by safety filter: {reason}")]
    Blocked {
        /// Block or finish reason reported by the provider
        reason: String,
    },
    /// Structured output was required but the model produced nothing
    #[error("model returned no content")]
    EmptyOutput,
    /// Output did not match the expected shape
    #[error("model output did not match the {schema} schema: {message}")]
    MalformedOutput {
        /// Name of the expected output shape
        schema: &'static str,
        /// Parse or constraint failure
        message: String,
    },
}

impl GenerationError {
    /// Create a transport error
    #[must_use]
    pub fn transport(provider: &'static str, message: impl Into<String>) -> Self {
        Self::Transport {
            provider,
            message: message.into(),
        }
    }

    /// Create a malformed-output error
    #[must_use]
    pub fn malformed(schema: &'static str, message: impl Into<String>) -> Self {
        Self::MalformedOutput {
            schema,
            message: message.into(),
        }
    }

    const fn code(&self) -> ErrorCode {
        match self {
            Self::Transport { .. } => ErrorCode::ExternalServiceUnavailable,
            Self::Provider { status, .. } if *status == 401 || *status == 403 => {
                ErrorCode::ExternalAuthFailed
            }
            Self::RateLimited { .. } => ErrorCode::ExternalRateLimited,
            Self::Provider { .. }
            | Self::Blocked { .. }
            | Self::EmptyOutput
            | Self::MalformedOutput { .. } => ErrorCode::ExternalServiceError,
        }
    }
}

impl From<GenerationError> for AppError {
    fn from(error: GenerationError) -> Self {
        let code = error.code();
        Self::new(code, error.to_string()).with_source(error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generation_error_codes() {
        let err: AppError = GenerationError::transport("gemini", "timed out").into();
        assert_eq!(err.code, ErrorCode::ExternalServiceUnavailable);
        assert!(err.is_generation());

        let err: AppError = GenerationError::Provider {
            provider: "gemini",
            status: 403,
            message: "bad key".to_owned(),
        }
        .into();
        assert_eq!(err.code, ErrorCode::ExternalAuthFailed);

        let err: AppError = GenerationError::RateLimited {
            message: "try later".to_owned(),
        }
        .into();
        assert_eq!(err.code, ErrorCode::ExternalRateLimited);
        assert_eq!(err.message, "try later");
    }
}
