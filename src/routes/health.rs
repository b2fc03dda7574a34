// ABOUTME: Health check route handlers for service monitoring and status endpoints
// ABOUTME: Provides liveness and readiness endpoints for load balancers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 ShareBites Contributors

//! Health check routes for service monitoring

use axum::extract::State;
use axum::{routing::get, Json, Router};

use crate::constants::service::{SERVICE_NAME, SERVICE_VERSION};
use crate::server::AppState;

/// Health routes implementation
pub struct HealthRoutes;

impl HealthRoutes {
    /// Create all health check routes
    pub fn routes(state: AppState) -> Router {
        Router::new()
            .route("/health", get(Self::health))
            .route("/ready", get(Self::ready))
            .with_state(state)
    }

    async fn health() -> Json<serde_json::Value> {
        Json(serde_json::json!({
            "status": "healthy",
            "service": SERVICE_NAME,
            "version": SERVICE_VERSION,
            "timestamp": chrono::Utc::now().to_rfc3339()
        }))
    }

    async fn ready(State(state): State<AppState>) -> Json<serde_json::Value> {
        Json(serde_json::json!({
            "status": "ready",
            "generation": {
                "provider": state.client.name(),
                "model": state.client.model()
            },
            "timestamp": chrono::Utc::now().to_rfc3339()
        }))
    }
}
