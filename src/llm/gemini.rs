// ABOUTME: Google Gemini generation client for the generateContent REST endpoint
// ABOUTME: Maps history, safety settings, and JSON-mode schemas onto Gemini's wire format
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 ShareBites Contributors

//! # Gemini Client
//!
//! Implementation of [`GenerationClient`] for Google's Gemini models.
//!
//! ## Configuration
//!
//! Set the `GEMINI_API_KEY` environment variable with your API key from
//! Google AI Studio. `SHAREBITES_LLM_MODEL`, `SHAREBITES_LLM_BASE_URL` and
//! `SHAREBITES_LLM_TIMEOUT_SECS` override the defaults (see
//! [`LlmConfig`](crate::config::LlmConfig)).

use std::fmt::{Debug, Formatter, Result as FmtResult};
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, instrument};

use super::{
    GenerationClient, GenerationRequest, GenerationResponse, SafetySetting, TokenUsage,
};
use crate::config::LlmConfig;
use crate::errors::{AppError, GenerationError};
use crate::models::ChatTurn;

const PROVIDER_NAME: &str = "gemini";

/// Header carrying the API key (keeps the key out of request URLs and logs)
const API_KEY_HEADER: &str = "x-goog-api-key";

// ============================================================================
// API Request/Response Types
// ============================================================================

/// Gemini API request structure
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiRequest<'a> {
    contents: Vec<GeminiContent>,
    generation_config: GeminiGenerationConfig,
    #[serde(skip_serializing_if = "<[_]>::is_empty")]
    safety_settings: &'a [SafetySetting],
}

/// Content structure for Gemini API
#[derive(Debug, Serialize, Deserialize)]
struct GeminiContent {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    #[serde(default)]
    parts: Vec<GeminiPart>,
}

/// Text part; other part kinds (inline data, function calls) are ignored
#[derive(Debug, Serialize, Deserialize)]
struct GeminiPart {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    text: Option<String>,
}

/// Generation configuration
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiGenerationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_output_tokens: Option<u32>,
    candidate_count: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_mime_type: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_schema: Option<serde_json::Value>,
}

/// Gemini API response structure
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiResponse {
    candidates: Option<Vec<Candidate>>,
    prompt_feedback: Option<PromptFeedback>,
    usage_metadata: Option<UsageMetadata>,
    error: Option<GeminiError>,
}

/// Response candidate
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    content: Option<GeminiContent>,
    finish_reason: Option<String>,
}

/// Present when the prompt itself was blocked
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    block_reason: Option<String>,
}

/// Usage metadata from Gemini API response
#[derive(Debug, Deserialize)]
struct UsageMetadata {
    #[serde(rename = "promptTokenCount")]
    prompt: Option<u32>,
    #[serde(rename = "candidatesTokenCount")]
    candidates: Option<u32>,
    #[serde(rename = "totalTokenCount")]
    total: Option<u32>,
}

/// API error response from Gemini
#[derive(Debug, Deserialize)]
struct GeminiError {
    message: String,
}

// ============================================================================
// Client Implementation
// ============================================================================

/// Google Gemini generation client
pub struct GeminiClient {
    api_key: String,
    client: Client,
    model: String,
    base_url: String,
}

impl GeminiClient {
    /// Create a client with default model, endpoint, and timeout
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(api_key: impl Into<String>) -> Result<Self, AppError> {
        Self::with_config(api_key, &LlmConfig::default())
    }

    /// Create a client using model, endpoint, and timeout from `config`
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn with_config(api_key: impl Into<String>, config: &LlmConfig) -> Result<Self, AppError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| AppError::config(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            api_key: api_key.into(),
            client,
            model: config.model.clone(),
            base_url: config.base_url.trim_end_matches('/').to_owned(),
        })
    }

    /// Create a client from an [`LlmConfig`] that carries the API key
    ///
    /// # Errors
    ///
    /// Returns an error if the key is missing or the HTTP client cannot be built.
    pub fn from_config(config: &LlmConfig) -> Result<Self, AppError> {
        let api_key = config.api_key.clone().ok_or_else(|| {
            AppError::new(
                crate::errors::ErrorCode::ConfigMissing,
                format!("{} environment variable not set", LlmConfig::API_KEY_ENV),
            )
        })?;
        Self::with_config(api_key, config)
    }

    /// Create a client from environment variables
    ///
    /// # Errors
    ///
    /// Returns an error if `GEMINI_API_KEY` is not set.
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_config(&LlmConfig::from_env())
    }

    /// Override the model
    #[must_use]
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Override the API base URL (tests point this at a local listener)
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_owned();
        self
    }

    /// Check that the API key is accepted by listing models
    ///
    /// # Errors
    ///
    /// Returns a transport error if the endpoint cannot be reached.
    #[instrument(skip(self))]
    pub async fn health_check(&self) -> Result<bool, GenerationError> {
        let url = format!("{}/models", self.base_url);
        let response = self
            .client
            .get(&url)
            .header(API_KEY_HEADER, &self.api_key)
            .send()
            .await
            .map_err(|e| GenerationError::transport(PROVIDER_NAME, e.to_string()))?;
        Ok(response.status().is_success())
    }

    /// Build the API URL for the configured model
    fn generate_url(&self) -> String {
        format!("{}/models/{}:generateContent", self.base_url, self.model)
    }

    fn convert_turn(turn: &ChatTurn) -> GeminiContent {
        GeminiContent {
            role: Some(turn.role.as_str().to_owned()),
            parts: turn
                .parts
                .iter()
                .map(|part| GeminiPart {
                    text: Some(part.text.clone()),
                })
                .collect(),
        }
    }

    /// Build a Gemini API request: history first, then the prompt as the final user turn
    fn build_request(request: &GenerationRequest) -> GeminiRequest<'_> {
        let mut contents: Vec<GeminiContent> =
            request.history.iter().map(Self::convert_turn).collect();
        contents.push(Self::convert_turn(&ChatTurn::user(request.prompt.clone())));

        GeminiRequest {
            contents,
            generation_config: GeminiGenerationConfig {
                temperature: request.config.temperature,
                max_output_tokens: request.config.max_output_tokens,
                candidate_count: 1,
                response_mime_type: request
                    .response_schema
                    .as_ref()
                    .map(|_| "application/json"),
                response_schema: request.response_schema.clone(),
            },
            safety_settings: &request.config.safety_settings,
        }
    }

    /// Extract text, finish reason and usage, surfacing safety blocks
    fn extract_response(
        &self,
        response: GeminiResponse,
    ) -> Result<GenerationResponse, GenerationError> {
        if let Some(error) = response.error {
            return Err(GenerationError::Provider {
                provider: PROVIDER_NAME,
                status: 200,
                message: error.message,
            });
        }

        if let Some(reason) = response
            .prompt_feedback
            .and_then(|feedback| feedback.block_reason)
        {
            return Err(GenerationError::Blocked { reason });
        }

        let candidate = response
            .candidates
            .and_then(|candidates| candidates.into_iter().next());
        let finish_reason = candidate.as_ref().and_then(|c| c.finish_reason.clone());

        let text: String = candidate
            .and_then(|c| c.content)
            .map(|content| {
                content
                    .parts
                    .into_iter()
                    .filter_map(|part| part.text)
                    .collect()
            })
            .unwrap_or_default();

        if text.is_empty() && finish_reason.as_deref() == Some("SAFETY") {
            return Err(GenerationError::Blocked {
                reason: "SAFETY".to_owned(),
            });
        }

        Ok(GenerationResponse {
            text,
            model: self.model.clone(),
            finish_reason,
            usage: response.usage_metadata.as_ref().map(Self::convert_usage),
        })
    }

    /// Convert usage metadata to our token usage format
    fn convert_usage(metadata: &UsageMetadata) -> TokenUsage {
        TokenUsage {
            prompt_tokens: metadata.prompt.unwrap_or(0),
            completion_tokens: metadata.candidates.unwrap_or(0),
            total_tokens: metadata.total.unwrap_or(0),
        }
    }

    /// Map API error status to the matching generation error
    fn map_api_error(status: u16, response_text: &str) -> GenerationError {
        let message = serde_json::from_str::<GeminiResponse>(response_text)
            .ok()
            .and_then(|r| r.error)
            .map_or_else(|| response_text.to_owned(), |e| e.message);

        match status {
            429 => GenerationError::RateLimited {
                message: Self::extract_quota_message(&message),
            },
            _ => GenerationError::Provider {
                provider: PROVIDER_NAME,
                status,
                message,
            },
        }
    }

    /// Extract a user-friendly quota/rate limit message from Gemini error
    fn extract_quota_message(message: &str) -> String {
        // Example: "Please retry in 6.406453963s."
        const RETRY_PREFIX: &str = "Please retry in ";
        if let Some(retry_pos) = message.find(RETRY_PREFIX) {
            let after_prefix = &message[retry_pos + RETRY_PREFIX.len()..];
            if let Some(s_pos) = after_prefix.find('s') {
                if let Ok(seconds) = after_prefix[..s_pos].parse::<f64>() {
                    let seconds_int = seconds.ceil() as u64;
                    return format!(
                        "AI service quota exceeded. Please try again in {seconds_int} seconds."
                    );
                }
            }
        }
        "AI service quota exceeded. Please wait a moment and try again.".to_owned()
    }
}

#[async_trait]
impl GenerationClient for GeminiClient {
    fn name(&self) -> &'static str {
        PROVIDER_NAME
    }

    fn model(&self) -> &str {
        &self.model
    }

    #[instrument(skip(self, request), fields(model = %self.model, history = request.history.len()))]
    async fn generate(
        &self,
        request: &GenerationRequest,
    ) -> Result<GenerationResponse, GenerationError> {
        let gemini_request = Self::build_request(request);

        debug!("Sending request to Gemini API");

        let response = self
            .client
            .post(self.generate_url())
            .header(API_KEY_HEADER, &self.api_key)
            .json(&gemini_request)
            .send()
            .await
            .map_err(|e| GenerationError::transport(PROVIDER_NAME, e.to_string()))?;

        let status = response.status();
        let response_text = response
            .text()
            .await
            .map_err(|e| GenerationError::transport(PROVIDER_NAME, e.to_string()))?;

        if !status.is_success() {
            error!(status = %status, "Gemini API error");
            return Err(Self::map_api_error(status.as_u16(), &response_text));
        }

        let gemini_response: GeminiResponse =
            serde_json::from_str(&response_text).map_err(|e| {
                error!(error = %e, "Failed to parse Gemini response");
                GenerationError::Provider {
                    provider: PROVIDER_NAME,
                    status: status.as_u16(),
                    message: format!("unparseable response body: {e}"),
                }
            })?;

        let result = self.extract_response(gemini_response)?;
        debug!(finish_reason = ?result.finish_reason, "Received Gemini response");
        Ok(result)
    }
}

impl Debug for GeminiClient {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("GeminiClient")
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .field("api_key", &"[REDACTED]")
            .finish_non_exhaustive()
    }
}
