// ABOUTME: Integration tests for environment-driven server configuration
// ABOUTME: Validates defaults, overrides, key handling, and rejection of bad values
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 ShareBites Contributors

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use std::env;
use std::time::Duration;

use serial_test::serial;
use sharebites_server::config::{Environment, LlmConfig, ServerConfig};

const VARS: &[&str] = &[
    "ENVIRONMENT",
    "HTTP_HOST",
    "HTTP_PORT",
    "HTTP_REQUEST_TIMEOUT_SECS",
    "CORS_ALLOWED_ORIGINS",
    "GEMINI_API_KEY",
    "SHAREBITES_LLM_MODEL",
    "SHAREBITES_LLM_BASE_URL",
    "SHAREBITES_LLM_TIMEOUT_SECS",
    "SHAREBITES_DEBOUNCE_MS",
];

fn clear_env() {
    for var in VARS {
        env::remove_var(var);
    }
}

#[test]
fn test_environment_parsing() {
    assert_eq!(
        Environment::from_str_or_default("production"),
        Environment::Production
    );
    assert_eq!(
        Environment::from_str_or_default("PROD"),
        Environment::Production
    );
    assert_eq!(
        Environment::from_str_or_default("testing"),
        Environment::Testing
    );
    assert_eq!(
        Environment::from_str_or_default("anything-else"),
        Environment::Development
    );
    assert!(Environment::Production.is_production());
    assert!(!Environment::Development.is_production());
}

#[test]
fn test_defaults() {
    let config = ServerConfig::default();

    assert_eq!(config.http.host, "127.0.0.1");
    assert_eq!(config.http.port, 8081);
    assert_eq!(config.llm.model, "gemini-2.0-flash");
    assert_eq!(config.debounce_interval(), Duration::from_millis(500));
    assert!(!config.llm.has_api_key());
}

#[test]
#[serial]
fn test_from_env_requires_api_key() {
    clear_env();

    let error = ServerConfig::from_env().unwrap_err();

    assert!(error.to_string().contains("GEMINI_API_KEY"));
}

#[test]
#[serial]
fn test_from_env_reads_overrides() {
    clear_env();
    env::set_var("ENVIRONMENT", "production");
    env::set_var("HTTP_HOST", "0.0.0.0");
    env::set_var("HTTP_PORT", "9090");
    env::set_var("GEMINI_API_KEY", "secret-key");
    env::set_var("SHAREBITES_LLM_MODEL", "gemini-1.5-pro");
    env::set_var("SHAREBITES_DEBOUNCE_MS", "750");
    env::set_var("CORS_ALLOWED_ORIGINS", "https://sharebites.org");

    let config = ServerConfig::from_env().unwrap();
    clear_env();

    assert_eq!(config.environment, Environment::Production);
    assert_eq!(config.http.socket_addr().unwrap().to_string(), "0.0.0.0:9090");
    assert_eq!(config.llm.api_key.as_deref(), Some("secret-key"));
    assert_eq!(config.llm.model, "gemini-1.5-pro");
    assert_eq!(config.debounce_ms, 750);
    assert_eq!(config.cors.allowed_origins, "https://sharebites.org");
}

#[test]
#[serial]
fn test_invalid_port_is_rejected() {
    clear_env();
    env::set_var("GEMINI_API_KEY", "secret-key");
    env::set_var("HTTP_PORT", "not-a-port");

    let result = ServerConfig::from_env();
    clear_env();

    assert!(result.is_err());
}

#[test]
#[serial]
fn test_zero_debounce_is_rejected() {
    clear_env();
    env::set_var("GEMINI_API_KEY", "secret-key");
    env::set_var("SHAREBITES_DEBOUNCE_MS", "0");

    let result = ServerConfig::from_env();
    clear_env();

    assert!(result.is_err());
}

#[test]
#[serial]
fn test_blank_api_key_counts_as_missing() {
    clear_env();
    env::set_var("GEMINI_API_KEY", "   ");

    let llm = LlmConfig::from_env();
    clear_env();

    assert!(!llm.has_api_key());
}

#[test]
#[serial]
fn test_bad_llm_timeout_falls_back_to_default() {
    clear_env();
    env::set_var("SHAREBITES_LLM_TIMEOUT_SECS", "soon");

    let llm = LlmConfig::from_env();
    clear_env();

    assert_eq!(llm.timeout_secs, LlmConfig::default().timeout_secs);
}

#[test]
fn test_secrets_stay_out_of_output() {
    let mut config = ServerConfig::default();
    config.llm.api_key = Some("super-secret".to_owned());

    assert!(!format!("{config:?}").contains("super-secret"));
    assert!(!config.summary().contains("super-secret"));
    assert!(config.summary().contains("API Key: Configured"));

    let json = serde_json::to_string(&config).unwrap();
    assert!(!json.contains("super-secret"));
}
