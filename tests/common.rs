// ABOUTME: Shared test utilities and setup functions for integration tests
// ABOUTME: Provides quiet logging and a deterministic, recording stub generation client
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 ShareBites Contributors
#![allow(
    dead_code,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::must_use_candidate
)]
//! Shared test utilities for `sharebites_server`

use std::collections::VecDeque;
use std::sync::{Arc, Mutex, Once};

use async_trait::async_trait;
use serde_json::json;
use sharebites_server::config::ServerConfig;
use sharebites_server::errors::GenerationError;
use sharebites_server::llm::{GenerationClient, GenerationRequest, GenerationResponse};
use sharebites_server::server::AppState;
use tokio::sync::Semaphore;

static INIT_LOGGER: Once = Once::new();

/// Initialize quiet logging for tests (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        // Check for TEST_LOG environment variable to control test logging level
        let log_level = match std::env::var("TEST_LOG").as_deref() {
            Ok("TRACE") => tracing::Level::TRACE,
            Ok("DEBUG") => tracing::Level::DEBUG,
            Ok("INFO") => tracing::Level::INFO,
            _ => tracing::Level::WARN,
        };

        let _ = tracing_subscriber::fmt()
            .with_max_level(log_level)
            .with_test_writer()
            .try_init();
    });
}

/// What the stub answers with
#[derive(Debug, Clone)]
pub enum StubReply {
    /// Successful reply with this text
    Text(String),
    /// Provider answered with HTTP 500
    ProviderError,
    /// Provider answered with HTTP 429
    RateLimited,
    /// Transport failure before any response
    Unreachable,
}

impl StubReply {
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text(text.into())
    }

    fn produce(&self, model: &str) -> Result<GenerationResponse, GenerationError> {
        match self {
            Self::Text(text) => Ok(GenerationResponse::text(model, text.clone())),
            Self::ProviderError => Err(GenerationError::Provider {
                provider: "stub",
                status: 500,
                message: "internal error".to_owned(),
            }),
            Self::RateLimited => Err(GenerationError::RateLimited {
                message: "AI service quota exceeded. Please try again in 5 seconds.".to_owned(),
            }),
            Self::Unreachable => Err(GenerationError::transport("stub", "connection refused")),
        }
    }
}

/// Deterministic generation client that records every request
pub struct StubClient {
    script: Mutex<VecDeque<StubReply>>,
    fallback: StubReply,
    requests: Mutex<Vec<GenerationRequest>>,
    gate: Option<Semaphore>,
}

impl StubClient {
    /// Always answer with `reply`
    pub fn always(reply: StubReply) -> Self {
        Self::scripted(Vec::new(), reply)
    }

    /// Always answer with `text`
    pub fn replying(text: impl Into<String>) -> Self {
        Self::always(StubReply::text(text))
    }

    /// Always fail with a provider error
    pub fn failing() -> Self {
        Self::always(StubReply::ProviderError)
    }

    /// Answer with `script` in order, then with `fallback`
    pub fn scripted(script: Vec<StubReply>, fallback: StubReply) -> Self {
        Self {
            script: Mutex::new(script.into()),
            fallback,
            requests: Mutex::new(Vec::new()),
            gate: None,
        }
    }

    /// Hold every call until [`release`](Self::release) hands out a permit
    #[must_use]
    pub fn gated(mut self) -> Self {
        self.gate = Some(Semaphore::new(0));
        self
    }

    /// Let `calls` held calls proceed
    pub fn release(&self, calls: usize) {
        if let Some(gate) = &self.gate {
            gate.add_permits(calls);
        }
    }

    /// Number of calls received
    pub fn calls(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    /// Every request received, in order
    pub fn requests(&self) -> Vec<GenerationRequest> {
        self.requests.lock().unwrap().clone()
    }

    /// Most recent request
    pub fn last_request(&self) -> GenerationRequest {
        self.requests
            .lock()
            .unwrap()
            .last()
            .cloned()
            .expect("no request recorded")
    }
}

#[async_trait]
impl GenerationClient for StubClient {
    fn name(&self) -> &'static str {
        "stub"
    }

    fn model(&self) -> &str {
        "stub-model"
    }

    async fn generate(
        &self,
        request: &GenerationRequest,
    ) -> Result<GenerationResponse, GenerationError> {
        self.requests.lock().unwrap().push(request.clone());
        if let Some(gate) = &self.gate {
            gate.acquire().await.expect("gate closed").forget();
        }
        let reply = self
            .script
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| self.fallback.clone());
        reply.produce(self.model())
    }
}

/// Estimate JSON that follows the conversion policy exactly
pub fn donation_reply(amount: f64) -> StubReply {
    StubReply::text(
        json!({
            "mealsProvided": amount * 2.0,
            "familiesFed": amount * 0.5,
            "impactStatement": format!("Your gift of {amount} feeds {} families!", amount * 0.5)
        })
        .to_string(),
    )
}

/// A well-formed analysis reply
pub fn analysis_reply() -> StubReply {
    StubReply::text(
        json!({
            "summary": "ShareBites distributed over fifteen thousand meals.",
            "keyInsights": [
                "December donations rose by a fifth.",
                "Meal distribution peaked in January."
            ],
            "recommendations": "Plan a mid-year campaign to smooth seasonal dips."
        })
        .to_string(),
    )
}

/// Configuration that passes validation without touching the environment
pub fn test_config() -> ServerConfig {
    let mut config = ServerConfig::default();
    config.llm.api_key = Some("test-key".to_owned());
    config
}

/// Shared state around `client`
pub fn test_state(client: Arc<StubClient>) -> AppState {
    init_test_logging();
    AppState::new(client, test_config())
}
