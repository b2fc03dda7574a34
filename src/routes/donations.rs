// ABOUTME: Donation routes for impact estimates and simulated monetary donations
// ABOUTME: Estimates call the model once; donations are acknowledged without a call
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 ShareBites Contributors

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::{routing::post, Json, Router};

use super::json_body;
use crate::errors::AppError;
use crate::flows::{estimate_donation_impact, submit_donation, DonationReceipt};
use crate::models::{DonationEstimateRequest, DonationEstimateResult, DonationSubmission};
use crate::server::AppState;

/// Donation routes implementation
pub struct DonationRoutes;

impl DonationRoutes {
    /// Create all donation routes
    pub fn routes(state: AppState) -> Router {
        Router::new()
            .route("/api/donations/estimate", post(Self::estimate))
            .route("/api/donations", post(Self::donate))
            .with_state(state)
    }

    async fn estimate(
        State(state): State<AppState>,
        body: Result<Json<DonationEstimateRequest>, JsonRejection>,
    ) -> Result<Json<DonationEstimateResult>, AppError> {
        let request = json_body(body)?;
        let result = estimate_donation_impact(state.client.as_ref(), &request).await?;
        Ok(Json(result))
    }

    /// Simulated donation; the receipt carries the deterministic impact
    async fn donate(
        body: Result<Json<DonationSubmission>, JsonRejection>,
    ) -> Result<(StatusCode, Json<DonationReceipt>), AppError> {
        let submission = json_body(body)?;
        let receipt = submit_donation(&submission)?;
        Ok((StatusCode::CREATED, Json(receipt)))
    }
}
