// ABOUTME: Impact routes for the analysis flow and the impact page snapshot
// ABOUTME: Stats are static figures; analysis calls the model once
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 ShareBites Contributors

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::routing::{get, post};
use axum::{Json, Router};

use super::json_body;
use crate::errors::AppError;
use crate::flows::analyze_impact;
use crate::models::{ImpactAnalysisRequest, ImpactAnalysisResult, ImpactStats};
use crate::server::AppState;

/// Impact routes implementation
pub struct ImpactRoutes;

impl ImpactRoutes {
    /// Create all impact routes
    pub fn routes(state: AppState) -> Router {
        Router::new()
            .route("/api/impact/analyze", post(Self::analyze))
            .route("/api/impact/stats", get(Self::stats))
            .with_state(state)
    }

    async fn analyze(
        State(state): State<AppState>,
        body: Result<Json<ImpactAnalysisRequest>, JsonRejection>,
    ) -> Result<Json<ImpactAnalysisResult>, AppError> {
        let request = json_body(body)?;
        let result = analyze_impact(state.client.as_ref(), &request).await?;
        Ok(Json(result))
    }

    async fn stats() -> Json<ImpactStats> {
        Json(ImpactStats::default())
    }
}
