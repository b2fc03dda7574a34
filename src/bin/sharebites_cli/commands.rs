// ABOUTME: CLI command implementations for chat, estimate, and analyze
// ABOUTME: Thin wrappers that run a flow and print the result for humans or as JSON
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 ShareBites Contributors

use std::sync::Arc;

use anyhow::Result;
use sharebites_server::config::ServerConfig;
use sharebites_server::debounce::{DonationEstimator, EstimateState};
use sharebites_server::flows::{analyze_impact, estimate_donation_impact};
use sharebites_server::llm::{GeminiClient, GenerationClient};
use sharebites_server::models::{
    ChatRole, DonationEstimateRequest, DonationEstimateResult, ImpactAnalysisRequest,
};
use sharebites_server::session::{ChatSession, SubmitOutcome};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};

/// Interactive chat over one session
pub async fn chat(client: Arc<GeminiClient>) -> Result<()> {
    let session = ChatSession::open(client);
    let mut stdout = tokio::io::stdout();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    for entry in session.transcript().await.entries() {
        stdout
            .write_all(format!("ShareBot: {}\n", entry.turn.text()).as_bytes())
            .await?;
    }

    loop {
        stdout.write_all(b"> ").await?;
        stdout.flush().await?;

        let Some(line) = lines.next_line().await? else {
            break;
        };
        match line.trim() {
            "" => continue,
            "/quit" | "/exit" => break,
            "/reset" => {
                session.reset().await;
                stdout.write_all(b"(conversation reset)\n").await?;
                continue;
            }
            _ => {}
        }

        let reply = match session.submit(line).await {
            Ok(SubmitOutcome::Replied(turn)) => turn.text(),
            Ok(SubmitOutcome::Apologized { turn, error }) => {
                format!("{}\n  ({error})", turn.text())
            }
            Ok(SubmitOutcome::Busy) => "(still waiting for the previous reply)".to_owned(),
            Err(error) => format!("(not sent: {error})"),
        };
        stdout
            .write_all(format!("ShareBot: {reply}\n").as_bytes())
            .await?;
    }

    let transcript = session.close();
    let user_turns = transcript
        .turns()
        .filter(|turn| turn.role == ChatRole::User)
        .count();
    stdout
        .write_all(format!("Goodbye! ({user_turns} messages sent)\n").as_bytes())
        .await?;
    Ok(())
}

/// One donation estimate
pub async fn estimate(client: &dyn GenerationClient, amount: f64, json: bool) -> Result<()> {
    let result = estimate_donation_impact(client, &DonationEstimateRequest::new(amount)).await?;
    print_estimate(amount, &result, json)
}

/// Debounced estimates for amounts typed on stdin, one per line
pub async fn estimate_watch(
    client: Arc<GeminiClient>,
    config: &ServerConfig,
    json: bool,
) -> Result<()> {
    let estimator = DonationEstimator::from_config(client, config);
    let mut updates = estimator.subscribe();
    let printer = tokio::spawn(async move {
        while updates.changed().await.is_ok() {
            let state = updates.borrow_and_update().clone();
            match state {
                EstimateState::Ready(estimate) => {
                    if let Err(error) = print_estimate(estimate.amount, &estimate.result, json) {
                        eprintln!("(could not print estimate: {error})");
                    }
                }
                EstimateState::Failed { amount, notice, .. } => {
                    eprintln!("{amount}: {notice}");
                }
                EstimateState::Idle | EstimateState::Pending { .. } => {}
            }
        }
    });

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        match line.parse::<f64>() {
            Ok(amount) => estimator.schedule(amount),
            Err(_) => eprintln!("(not a number: {line})"),
        }
    }

    // Let the last scheduled estimate finish before leaving
    tokio::time::sleep(estimator.quiet_interval()).await;
    let mut settled = estimator.subscribe();
    settled
        .wait_for(|state| !matches!(state, EstimateState::Pending { .. }))
        .await?;
    drop(estimator);
    printer.await?;
    Ok(())
}

fn print_estimate(amount: f64, result: &DonationEstimateResult, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(result)?);
    } else {
        println!("Donation:       {amount}");
        println!("Meals provided: {}", result.meals_provided);
        println!("Families fed:   {}", result.families_fed);
        println!();
        println!("{}", result.impact_statement);
    }
    Ok(())
}

/// One impact analysis
pub async fn analyze(
    client: &dyn GenerationClient,
    meals: f64,
    money: f64,
    donors: f64,
    trends: String,
    json: bool,
) -> Result<()> {
    let request = ImpactAnalysisRequest {
        meals_distributed: meals,
        money_raised: money,
        number_of_donors: donors,
        monthly_trends: trends,
    };
    let result = analyze_impact(client, &request).await?;
    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        println!("Summary\n  {}\n", result.summary);
        println!("Key Insights");
        for (index, insight) in result.key_insights.iter().enumerate() {
            println!("  {}. {insight}", index + 1);
        }
        println!("\nRecommendations\n  {}", result.recommendations);
    }
    Ok(())
}
