// ABOUTME: Generation client abstraction for the hosted generative-model API
// ABOUTME: Defines the one-call-in, one-response-out contract plus safety and sampling config
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 ShareBites Contributors

//! # Generation Client Interface
//!
//! The hosted model is the only source of non-determinism in the service, so
//! every flow talks to it through the narrow [`GenerationClient`] trait: one
//! [`GenerationRequest`] in, one [`GenerationResponse`] out. Production uses
//! [`GeminiClient`]; tests substitute a deterministic stub.
//!
//! ## Example
//!
//! ```rust,no_run
//! use sharebites_server::llm::{GenerationClient, GenerationRequest, GeminiClient};
//! use sharebites_server::errors::AppError;
//!
//! # async fn example() -> Result<(), AppError> {
//! let client = GeminiClient::from_env()?;
//! let request = GenerationRequest::new("What does ShareBites do?").with_temperature(0.6);
//! let response = client.generate(&request).await?;
//! println!("{}", response.text);
//! # Ok(())
//! # }
//! ```

mod gemini;
pub mod prompts;

pub use gemini::GeminiClient;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::errors::{AppError, GenerationError};
use crate::models::{ChatTurn, StructuredOutput};

// ============================================================================
// Safety Configuration
// ============================================================================

/// Content category the provider can filter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HarmCategory {
    /// Hate speech
    #[serde(rename = "HARM_CATEGORY_HATE_SPEECH")]
    HateSpeech,
    /// Sexually explicit content
    #[serde(rename = "HARM_CATEGORY_SEXUALLY_EXPLICIT")]
    SexuallyExplicit,
    /// Harassment
    #[serde(rename = "HARM_CATEGORY_HARASSMENT")]
    Harassment,
    /// Dangerous content
    #[serde(rename = "HARM_CATEGORY_DANGEROUS_CONTENT")]
    DangerousContent,
}

/// Probability level at which the provider blocks a category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum HarmBlockThreshold {
    /// Block low probability and above
    BlockLowAndAbove,
    /// Block medium probability and above
    BlockMediumAndAbove,
    /// Block only high probability
    BlockOnlyHigh,
    /// Never block
    BlockNone,
}

/// One category/threshold pair
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SafetySetting {
    /// Category to filter
    pub category: HarmCategory,
    /// Threshold at which to block
    pub threshold: HarmBlockThreshold,
}

impl SafetySetting {
    /// All four categories at `BLOCK_MEDIUM_AND_ABOVE`
    #[must_use]
    pub fn moderate_defaults() -> Vec<Self> {
        [
            HarmCategory::HateSpeech,
            HarmCategory::SexuallyExplicit,
            HarmCategory::Harassment,
            HarmCategory::DangerousContent,
        ]
        .into_iter()
        .map(|category| Self {
            category,
            threshold: HarmBlockThreshold::BlockMediumAndAbove,
        })
        .collect()
    }
}

// ============================================================================
// Request/Response Types
// ============================================================================

/// Sampling and safety configuration for one call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationConfig {
    /// Sampling temperature
    pub temperature: Option<f32>,
    /// Cap on generated tokens
    pub max_output_tokens: Option<u32>,
    /// Content-safety thresholds
    pub safety_settings: Vec<SafetySetting>,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            temperature: None,
            max_output_tokens: None,
            safety_settings: SafetySetting::moderate_defaults(),
        }
    }
}

/// Everything the client needs for one round-trip
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationRequest {
    /// Template-filled instruction or the latest user message
    pub prompt: String,
    /// Ordered turns sent before `prompt`
    pub history: Vec<ChatTurn>,
    /// Sampling and safety configuration
    pub config: GenerationConfig,
    /// JSON schema the reply must follow; `None` asks for free text
    pub response_schema: Option<serde_json::Value>,
}

impl GenerationRequest {
    /// Create a free-text request with default configuration
    #[must_use]
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            history: Vec::new(),
            config: GenerationConfig::default(),
            response_schema: None,
        }
    }

    /// Set the conversation history
    #[must_use]
    pub fn with_history(mut self, history: Vec<ChatTurn>) -> Self {
        self.history = history;
        self
    }

    /// Set the temperature
    #[must_use]
    pub const fn with_temperature(mut self, temperature: f32) -> Self {
        self.config.temperature = Some(temperature);
        self
    }

    /// Set the maximum output tokens
    #[must_use]
    pub const fn with_max_output_tokens(mut self, max_output_tokens: u32) -> Self {
        self.config.max_output_tokens = Some(max_output_tokens);
        self
    }

    /// Replace the safety settings
    #[must_use]
    pub fn with_safety_settings(mut self, safety_settings: Vec<SafetySetting>) -> Self {
        self.config.safety_settings = safety_settings;
        self
    }

    /// Ask for JSON output matching `T`
    #[must_use]
    pub fn with_output<T: StructuredOutput>(mut self) -> Self {
        self.response_schema = Some(T::response_schema());
        self
    }
}

/// Token usage statistics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenUsage {
    /// Number of tokens in the prompt
    pub prompt_tokens: u32,
    /// Number of tokens in the completion
    pub completion_tokens: u32,
    /// Total tokens used
    pub total_tokens: u32,
}

/// What came back from one call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationResponse {
    /// Generated text; may be empty
    pub text: String,
    /// Model that produced it
    pub model: String,
    /// Finish reason (STOP, MAX_TOKENS, SAFETY, ...)
    pub finish_reason: Option<String>,
    /// Token usage statistics
    pub usage: Option<TokenUsage>,
}

impl GenerationResponse {
    /// Response carrying only text
    #[must_use]
    pub fn text(model: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            model: model.into(),
            finish_reason: Some("STOP".to_owned()),
            usage: None,
        }
    }

    /// Text with surrounding whitespace removed, `None` when nothing is left
    #[must_use]
    pub fn non_empty_text(&self) -> Option<&str> {
        let trimmed = self.text.trim();
        (!trimmed.is_empty()).then_some(trimmed)
    }
}

// ============================================================================
// Client Trait
// ============================================================================

/// A hosted generative-model endpoint.
///
/// Implementations hold no per-conversation state; history is supplied by
/// the caller on every call.
#[async_trait]
pub trait GenerationClient: Send + Sync {
    /// Provider identifier (e.g., "gemini")
    fn name(&self) -> &'static str;

    /// Model used when generating
    fn model(&self) -> &str;

    /// Issue exactly one request
    ///
    /// # Errors
    ///
    /// Returns a [`GenerationError`] for transport, provider, or safety failures.
    async fn generate(
        &self,
        request: &GenerationRequest,
    ) -> Result<GenerationResponse, GenerationError>;
}

/// Issue one structured call and validate the reply against `T`.
///
/// # Errors
///
/// Returns a generation-family [`AppError`] when the call fails, the reply is
/// empty, the JSON does not match `T`, or `T::check` rejects it.
pub async fn generate_structured<T: StructuredOutput>(
    client: &dyn GenerationClient,
    request: GenerationRequest,
) -> Result<T, AppError> {
    let request = request.with_output::<T>();
    let response = client.generate(&request).await?;

    let Some(text) = response.non_empty_text() else {
        warn!(schema = T::SCHEMA_NAME, "model returned empty structured output");
        return Err(GenerationError::EmptyOutput.into());
    };

    let parsed: T = serde_json::from_str(strip_code_fence(text)).map_err(|e| {
        warn!(schema = T::SCHEMA_NAME, error = %e, "structured output did not parse");
        GenerationError::malformed(T::SCHEMA_NAME, e.to_string())
    })?;
    parsed.check()?;

    debug!(schema = T::SCHEMA_NAME, model = %response.model, "structured output accepted");
    Ok(parsed)
}

/// Some models wrap JSON in a markdown fence even in JSON mode
fn strip_code_fence(text: &str) -> &str {
    let Some(rest) = text.strip_prefix("```") else {
        return text;
    };
    let rest = rest.strip_prefix("json").unwrap_or(rest);
    rest.strip_suffix("```").unwrap_or(rest).trim()
}
