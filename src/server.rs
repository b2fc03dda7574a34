// ABOUTME: HTTP server assembly for the ShareBites API
// ABOUTME: Builds shared state, merges domain routers, applies middleware, and serves on tokio
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 ShareBites Contributors

//! # Server
//!
//! One stateless [`GenerationClient`] is shared by every request; there is
//! no other shared mutable state on the server side.

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use axum::Router;
use tokio::net::TcpListener;
use tower_http::request_id::{PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use crate::config::ServerConfig;
use crate::llm::{GeminiClient, GenerationClient};
use crate::middleware::{make_request_span, setup_cors, RequestIdGenerator, REQUEST_ID_HEADER};
use crate::routes::{ChatRoutes, DonationRoutes, FormRoutes, HealthRoutes, ImpactRoutes, SiteRoutes};

/// State shared by all handlers
#[derive(Clone)]
pub struct AppState {
    /// Generation client used by the flows
    pub client: Arc<dyn GenerationClient>,
    /// Loaded configuration
    pub config: Arc<ServerConfig>,
}

impl AppState {
    /// Bundle a client and configuration
    #[must_use]
    pub fn new(client: Arc<dyn GenerationClient>, config: ServerConfig) -> Self {
        Self {
            client,
            config: Arc::new(config),
        }
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("client", &self.client.name())
            .field("model", &self.client.model())
            .finish_non_exhaustive()
    }
}

/// Build the complete router with middleware
pub fn build_router(state: AppState) -> Router {
    let timeout = Duration::from_secs(state.config.http.request_timeout_secs);
    let cors = setup_cors(&state.config.cors);

    Router::new()
        .merge(HealthRoutes::routes(state.clone()))
        .merge(SiteRoutes::routes())
        .merge(ChatRoutes::routes(state.clone()))
        .merge(DonationRoutes::routes(state.clone()))
        .merge(ImpactRoutes::routes(state))
        .merge(FormRoutes::routes())
        // Layers run bottom-up: the ID is set before the span that records it
        .layer(PropagateRequestIdLayer::new(REQUEST_ID_HEADER))
        .layer(TimeoutLayer::new(timeout))
        .layer(cors)
        .layer(TraceLayer::new_for_http().make_span_with(make_request_span))
        .layer(SetRequestIdLayer::new(REQUEST_ID_HEADER, RequestIdGenerator))
}

/// Load the Gemini client from configuration and serve until Ctrl-C
///
/// # Errors
///
/// Returns an error if the client cannot be built or the listener cannot bind.
pub async fn run(config: ServerConfig) -> Result<()> {
    let client = GeminiClient::from_config(&config.llm).context("Failed to create Gemini client")?;

    serve(AppState::new(Arc::new(client), config)).await
}

/// Serve `state` on the configured address until Ctrl-C
///
/// # Errors
///
/// Returns an error if the listener cannot bind or the server fails.
pub async fn serve(state: AppState) -> Result<()> {
    let addr = state.config.http.socket_addr()?;
    let app = build_router(state);

    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    info!("ShareBites API listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| anyhow::anyhow!("Failed to run API server: {e}"))?;

    info!("ShareBites API stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
