// ABOUTME: Logging configuration and structured logging setup for the ShareBites services
// ABOUTME: Configures log level, output format, and noise reduction for HTTP and client crates
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 ShareBites Contributors

//! Structured logging built on `tracing-subscriber`.
//!
//! `RUST_LOG` sets the level, `LOG_FORMAT` picks `json`, `pretty` or
//! `compact`. Production always records source location and thread.

use std::env;
use std::io;

use anyhow::Result;
use tracing::info;
use tracing_subscriber::filter::Directive;
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::fmt;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

use crate::config::Environment;
use crate::constants::service;

/// Crates whose chatter is capped regardless of `RUST_LOG`
const QUIET_TARGETS: &[&str] = &[
    "hyper=warn",
    "hyper::proto=warn",
    "reqwest=warn",
    "rustls=warn",
    "tower_http=info",
];

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// One JSON object per event
    Json,
    /// Multi-field human-readable lines
    #[default]
    Pretty,
    /// Single-line terminal output
    Compact,
}

impl LogFormat {
    /// Parse `LOG_FORMAT`; anything unrecognized is pretty
    #[must_use]
    pub fn from_str_or_default(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "json" => Self::Json,
            "compact" => Self::Compact,
            _ => Self::Pretty,
        }
    }
}

/// Subscriber settings
#[derive(Debug, Clone)]
#[allow(clippy::struct_excessive_bools)]
pub struct LoggingConfig {
    /// Filter directive, e.g. `info` or `sharebites_server=debug`
    pub level: String,
    /// Output format
    pub format: LogFormat,
    /// Record file and line
    pub source_location: bool,
    /// Record thread id and name
    pub thread_info: bool,
    /// Emit span open/close events
    pub span_events: bool,
    /// Write to stderr (keeps the CLI's stdout clean)
    pub to_stderr: bool,
    /// Reported service name
    pub service_name: &'static str,
    /// Deployment environment
    pub environment: Environment,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_owned(),
            format: LogFormat::default(),
            source_location: false,
            thread_info: false,
            span_events: false,
            to_stderr: false,
            service_name: service::SERVICE_NAME,
            environment: Environment::default(),
        }
    }
}

impl LoggingConfig {
    /// Read `RUST_LOG`, `LOG_FORMAT`, `LOG_INCLUDE_*` and `ENVIRONMENT`
    #[must_use]
    pub fn from_env() -> Self {
        let environment = Environment::from_env();
        let production = environment.is_production();
        Self {
            level: env::var("RUST_LOG").unwrap_or_else(|_| "info".to_owned()),
            format: env::var("LOG_FORMAT")
                .map(|value| LogFormat::from_str_or_default(&value))
                .unwrap_or_default(),
            source_location: production || env::var("LOG_INCLUDE_LOCATION").is_ok(),
            thread_info: production || env::var("LOG_INCLUDE_THREAD").is_ok(),
            span_events: env::var("LOG_INCLUDE_SPANS").is_ok(),
            environment,
            ..Self::default()
        }
    }

    /// Compact warnings on stderr unless `RUST_LOG` says otherwise
    #[must_use]
    pub fn for_cli() -> Self {
        Self {
            level: env::var("RUST_LOG").unwrap_or_else(|_| "warn".to_owned()),
            format: LogFormat::Compact,
            to_stderr: true,
            service_name: "sharebites-cli",
            ..Self::default()
        }
    }

    /// `level` plus the quiet-target caps
    #[must_use]
    pub fn env_filter(&self) -> EnvFilter {
        QUIET_TARGETS
            .iter()
            .filter_map(|directive| directive.parse::<Directive>().ok())
            .fold(EnvFilter::new(&self.level), EnvFilter::add_directive)
    }

    fn writer(&self) -> BoxMakeWriter {
        if self.to_stderr {
            BoxMakeWriter::new(io::stderr)
        } else {
            BoxMakeWriter::new(io::stdout)
        }
    }

    fn span_events(&self) -> FmtSpan {
        if self.span_events {
            FmtSpan::NEW | FmtSpan::CLOSE
        } else {
            FmtSpan::NONE
        }
    }

    /// Install the global subscriber
    ///
    /// # Errors
    ///
    /// Returns an error if a global subscriber is already installed
    pub fn init(&self) -> Result<()> {
        // Exactly one of these is Some
        let json = (self.format == LogFormat::Json).then(|| {
            fmt::layer()
                .json()
                .with_file(self.source_location)
                .with_line_number(self.source_location)
                .with_thread_ids(self.thread_info)
                .with_thread_names(self.thread_info)
                .with_span_events(self.span_events())
                .with_writer(self.writer())
        });
        let pretty = (self.format == LogFormat::Pretty).then(|| {
            fmt::layer()
                .with_file(self.source_location)
                .with_line_number(self.source_location)
                .with_thread_ids(self.thread_info)
                .with_thread_names(self.thread_info)
                .with_span_events(self.span_events())
                .with_writer(self.writer())
        });
        let compact = (self.format == LogFormat::Compact).then(|| {
            fmt::layer()
                .compact()
                .with_target(false)
                .with_writer(self.writer())
        });

        tracing_subscriber::registry()
            .with(self.env_filter())
            .with(json)
            .with(pretty)
            .with(compact)
            .try_init()?;

        info!(
            service.name = self.service_name,
            service.version = service::SERVICE_VERSION,
            environment = %self.environment,
            log.level = %self.level,
            log.format = ?self.format,
            source_location = self.source_location,
            thread_info = self.thread_info,
            "logging initialized"
        );
        Ok(())
    }
}

/// Install the subscriber described by the environment
///
/// # Errors
///
/// Returns an error if a global subscriber is already installed
pub fn init_from_env() -> Result<()> {
    LoggingConfig::from_env().init()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_format_parsing() {
        assert_eq!(LogFormat::from_str_or_default("json"), LogFormat::Json);
        assert_eq!(LogFormat::from_str_or_default("compact"), LogFormat::Compact);
        assert_eq!(LogFormat::from_str_or_default(" JSON "), LogFormat::Json);
        assert_eq!(LogFormat::from_str_or_default("fancy"), LogFormat::Pretty);
    }

    #[test]
    fn test_env_filter_keeps_noise_directives() {
        let config = LoggingConfig {
            level: "debug".into(),
            ..LoggingConfig::default()
        };
        let rendered = config.env_filter().to_string();
        assert!(rendered.contains("hyper=warn"));
        assert!(rendered.contains("reqwest=warn"));
    }

    #[test]
    fn test_cli_config_writes_to_stderr() {
        let config = LoggingConfig::for_cli();
        assert!(config.to_stderr);
        assert_eq!(config.format, LogFormat::Compact);
    }
}
