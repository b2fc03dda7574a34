// ABOUTME: Environment configuration management for deployment-specific settings
// ABOUTME: Parses environment variables into typed server, LLM, and debounce settings
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 ShareBites Contributors

//! Environment-based configuration management

use std::env;
use std::net::SocketAddr;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::constants::defaults;

/// Environment type for logging and other deployment-dependent behavior
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Local development
    #[default]
    Development,
    /// Production deployment
    Production,
    /// Automated tests
    Testing,
}

impl Environment {
    /// Parse from string with fallback
    #[must_use]
    pub fn from_str_or_default(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "production" | "prod" => Self::Production,
            "testing" | "test" => Self::Testing,
            _ => Self::Development,
        }
    }

    /// Read `ENVIRONMENT`
    #[must_use]
    pub fn from_env() -> Self {
        env::var("ENVIRONMENT")
            .map(|value| Self::from_str_or_default(&value))
            .unwrap_or_default()
    }

    /// Check if this is a production environment
    #[must_use]
    pub const fn is_production(self) -> bool {
        matches!(self, Self::Production)
    }
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Development => write!(f, "development"),
            Self::Production => write!(f, "production"),
            Self::Testing => write!(f, "testing"),
        }
    }
}

/// HTTP listener settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct HttpConfig {
    /// Interface to bind
    pub host: String,
    /// Port to bind
    pub port: u16,
    /// Upper bound on one request, generation call included
    pub request_timeout_secs: u64,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            host: defaults::HTTP_HOST.to_owned(),
            port: defaults::HTTP_PORT,
            request_timeout_secs: defaults::HTTP_REQUEST_TIMEOUT_SECS,
        }
    }
}

impl HttpConfig {
    /// Socket address to bind
    ///
    /// # Errors
    ///
    /// Returns an error if `host:port` is not a valid socket address.
    pub fn socket_addr(&self) -> Result<SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .with_context(|| format!("Invalid HTTP_HOST/HTTP_PORT: {}:{}", self.host, self.port))
    }
}

/// Generation client settings
#[derive(Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LlmConfig {
    /// Gemini API key
    #[serde(skip_serializing)]
    pub api_key: Option<String>,
    /// Model name
    pub model: String,
    /// API base URL
    pub base_url: String,
    /// Per-request timeout
    pub timeout_secs: u64,
}

impl LlmConfig {
    /// Environment variable holding the API key
    pub const API_KEY_ENV: &'static str = "GEMINI_API_KEY";

    /// Read the generation client settings; invalid numbers fall back to defaults
    #[must_use]
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            api_key: env::var(Self::API_KEY_ENV)
                .ok()
                .filter(|key| !key.trim().is_empty()),
            model: env::var("SHAREBITES_LLM_MODEL").unwrap_or(defaults.model),
            base_url: env::var("SHAREBITES_LLM_BASE_URL").unwrap_or(defaults.base_url),
            timeout_secs: parse_or_warn("SHAREBITES_LLM_TIMEOUT_SECS", defaults.timeout_secs),
        }
    }

    /// Whether an API key is present
    #[must_use]
    pub const fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: defaults::LLM_MODEL.to_owned(),
            base_url: defaults::LLM_BASE_URL.to_owned(),
            timeout_secs: defaults::LLM_TIMEOUT_SECS,
        }
    }
}

impl std::fmt::Debug for LlmConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LlmConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

/// Cross-origin settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct CorsConfig {
    /// Comma-separated origins; empty or `*` allows any origin
    pub allowed_origins: String,
}

/// Complete server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Deployment environment
    pub environment: Environment,
    /// HTTP listener
    pub http: HttpConfig,
    /// Generation client
    pub llm: LlmConfig,
    /// Cross-origin policy
    pub cors: CorsConfig,
    /// Quiet interval for donation estimates
    pub debounce_ms: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            environment: Environment::default(),
            http: HttpConfig::default(),
            llm: LlmConfig::default(),
            cors: CorsConfig::default(),
            debounce_ms: defaults::DEBOUNCE_MS,
        }
    }
}

impl ServerConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns an error if a numeric variable does not parse or validation fails.
    pub fn from_env() -> Result<Self> {
        info!("Loading configuration from environment variables");

        let config = Self {
            environment: Environment::from_env(),
            http: HttpConfig {
                host: env_var_or("HTTP_HOST", defaults::HTTP_HOST),
                port: env_var_or("HTTP_PORT", &defaults::HTTP_PORT.to_string())
                    .parse()
                    .context("Invalid HTTP_PORT value")?,
                request_timeout_secs: env_var_or(
                    "HTTP_REQUEST_TIMEOUT_SECS",
                    &defaults::HTTP_REQUEST_TIMEOUT_SECS.to_string(),
                )
                .parse()
                .context("Invalid HTTP_REQUEST_TIMEOUT_SECS value")?,
            },
            llm: LlmConfig::from_env(),
            cors: CorsConfig {
                allowed_origins: env::var("CORS_ALLOWED_ORIGINS").unwrap_or_default(),
            },
            debounce_ms: env_var_or("SHAREBITES_DEBOUNCE_MS", &defaults::DEBOUNCE_MS.to_string())
                .parse()
                .context("Invalid SHAREBITES_DEBOUNCE_MS value")?,
        };

        config.validate()?;
        info!("Configuration loaded successfully");
        Ok(config)
    }

    /// Validate configuration values
    ///
    /// # Errors
    ///
    /// Returns an error if the API key is missing or a timeout/interval is zero.
    pub fn validate(&self) -> Result<()> {
        if !self.llm.has_api_key() {
            return Err(anyhow::anyhow!(
                "{} must be set to reach the generation service",
                LlmConfig::API_KEY_ENV
            ));
        }
        if self.llm.timeout_secs == 0 {
            return Err(anyhow::anyhow!(
                "SHAREBITES_LLM_TIMEOUT_SECS must be greater than zero"
            ));
        }
        if self.http.request_timeout_secs == 0 {
            return Err(anyhow::anyhow!(
                "HTTP_REQUEST_TIMEOUT_SECS must be greater than zero"
            ));
        }
        if self.debounce_ms == 0 {
            return Err(anyhow::anyhow!(
                "SHAREBITES_DEBOUNCE_MS must be greater than zero"
            ));
        }
        if self.http.request_timeout_secs < self.llm.timeout_secs {
            warn!(
                "HTTP_REQUEST_TIMEOUT_SECS is shorter than SHAREBITES_LLM_TIMEOUT_SECS; slow generations will be cut off"
            );
        }
        Ok(())
    }

    /// Debounce interval as a `Duration`
    #[must_use]
    pub const fn debounce_interval(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    /// Get a summary of the configuration for logging (without secrets)
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "ShareBites Server Configuration:\n\
             - Environment: {}\n\
             - HTTP: {}:{}\n\
             - Request Timeout: {}s\n\
             - LLM Model: {}\n\
             - LLM Base URL: {}\n\
             - LLM Timeout: {}s\n\
             - API Key: {}\n\
             - CORS Origins: {}\n\
             - Estimate Debounce: {}ms",
            self.environment,
            self.http.host,
            self.http.port,
            self.http.request_timeout_secs,
            self.llm.model,
            self.llm.base_url,
            self.llm.timeout_secs,
            if self.llm.has_api_key() {
                "Configured"
            } else {
                "Missing"
            },
            if self.cors.allowed_origins.is_empty() {
                "*"
            } else {
                self.cors.allowed_origins.as_str()
            },
            self.debounce_ms,
        )
    }
}

/// Get environment variable or default value
fn env_var_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_owned())
}

/// Parse a numeric variable, warning and falling back on bad input
fn parse_or_warn(key: &str, default: u64) -> u64 {
    match env::var(key) {
        Ok(raw) => raw.trim().parse().unwrap_or_else(|_| {
            warn!(key, value = %raw, default, "Invalid numeric value, using default");
            default
        }),
        Err(_) => default,
    }
}
