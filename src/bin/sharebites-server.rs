// ABOUTME: Server binary for the ShareBites HTTP API
// ABOUTME: Loads configuration from the environment, initializes logging, and serves until Ctrl-C
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 ShareBites Contributors

//! # ShareBites API Server Binary
//!
//! ```bash
//! GEMINI_API_KEY=... sharebites-server --http-port 8081
//! ```

use anyhow::Result;
use clap::Parser;
use sharebites_server::{config::ServerConfig, logging, server};
use tracing::{error, info};

#[derive(Parser)]
#[command(name = "sharebites-server")]
#[command(about = "ShareBites API - AI-assisted donation estimates, impact analysis, and support chat")]
pub struct Args {
    /// Override HTTP host
    #[arg(long)]
    http_host: Option<String>,

    /// Override HTTP port
    #[arg(long)]
    http_port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    logging::init_from_env()?;

    let mut config = ServerConfig::from_env().inspect_err(|e| {
        error!("Configuration error: {e:#}");
    })?;

    if let Some(http_host) = args.http_host {
        config.http.host = http_host;
    }
    if let Some(http_port) = args.http_port {
        config.http.port = http_port;
    }

    info!("Starting ShareBites API");
    info!("{}", config.summary());

    if let Err(e) = server::run(config).await {
        error!("Server error: {e:#}");
        return Err(e);
    }
    Ok(())
}
