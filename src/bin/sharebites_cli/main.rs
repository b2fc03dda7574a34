// ABOUTME: ShareBites CLI for exercising the generation flows from a terminal
// ABOUTME: Interactive support chat, one-shot donation estimates, and impact analysis
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 ShareBites Contributors
//!
//! Usage:
//! ```bash
//! # Chat with ShareBot (type `/reset` to start over, `/quit` to leave)
//! sharebites-cli chat
//!
//! # Estimate the impact of a donation
//! sharebites-cli estimate 25
//!
//! # Type amounts one per line; only the last of a quick burst is estimated
//! sharebites-cli estimate --watch
//!
//! # Analyze program metrics (defaults to the impact page snapshot)
//! sharebites-cli analyze --meals 15230 --money 7615 --donors 350 \
//!     --trends "Donations rose 20% in December with steady donor growth."
//! ```

mod commands;

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use sharebites_server::config::{LlmConfig, ServerConfig};
use sharebites_server::constants::impact_defaults;
use sharebites_server::llm::GeminiClient;
use sharebites_server::logging::LoggingConfig;

#[derive(Parser)]
#[command(
    name = "sharebites-cli",
    about = "ShareBites command-line client",
    long_about = "Talk to ShareBot and run the donation estimate and impact analysis flows against the configured Gemini model."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Model override
    #[arg(long, global = true)]
    model: Option<String>,

    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,
}

#[non_exhaustive]
#[derive(Subcommand)]
enum Command {
    /// Interactive support chat
    Chat,

    /// Estimate meals provided and families fed for a donation
    Estimate {
        /// Donation amount
        #[arg(required_unless_present = "watch")]
        amount: Option<f64>,

        /// Read amounts from stdin and estimate after SHAREBITES_DEBOUNCE_MS of quiet
        #[arg(long, conflicts_with = "amount")]
        watch: bool,
    },

    /// Analyze program impact metrics
    Analyze {
        /// Meals distributed
        #[arg(long, default_value_t = impact_defaults::MEALS_DISTRIBUTED)]
        meals: f64,

        /// Money raised
        #[arg(long, default_value_t = impact_defaults::MONEY_RAISED)]
        money: f64,

        /// Number of donors
        #[arg(long, default_value_t = impact_defaults::NUMBER_OF_DONORS)]
        donors: f64,

        /// Monthly trends narrative (at least 20 characters)
        #[arg(long, default_value = impact_defaults::MONTHLY_TRENDS)]
        trends: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    LoggingConfig::for_cli().init()?;

    let mut client = GeminiClient::from_config(&LlmConfig::from_env())
        .context("Set GEMINI_API_KEY to use the CLI")?;
    if let Some(model) = cli.model {
        client = client.with_model(model);
    }
    let client = Arc::new(client);

    match cli.command {
        Command::Chat => commands::chat(client).await,
        Command::Estimate { watch: true, .. } => {
            let config = ServerConfig::from_env()?;
            commands::estimate_watch(client, &config, cli.json).await
        }
        Command::Estimate { amount, .. } => {
            let amount = amount.context("An amount is required without --watch")?;
            commands::estimate(client.as_ref(), amount, cli.json).await
        }
        Command::Analyze {
            meals,
            money,
            donors,
            trends,
        } => commands::analyze(client.as_ref(), meals, money, donors, trends, cli.json).await,
    }
}
