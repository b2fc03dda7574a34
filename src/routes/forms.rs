// ABOUTME: Form routes for food pledges and support contact messages
// ABOUTME: Submissions are validated and acknowledged; nothing is stored
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 ShareBites Contributors

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::{routing::post, Json, Router};

use super::json_body;
use crate::errors::AppError;
use crate::flows::{submit_food_pledge, submit_support_request};
use crate::models::{FoodPledge, FormAck, SupportRequest};

/// Form routes implementation
pub struct FormRoutes;

impl FormRoutes {
    /// Create all form routes
    pub fn routes() -> Router {
        Router::new()
            .route("/api/pledges", post(Self::pledge))
            .route("/api/support", post(Self::support))
    }

    async fn pledge(
        body: Result<Json<FoodPledge>, JsonRejection>,
    ) -> Result<(StatusCode, Json<FormAck>), AppError> {
        let pledge = json_body(body)?;
        Ok((StatusCode::CREATED, Json(submit_food_pledge(&pledge)?)))
    }

    async fn support(
        body: Result<Json<SupportRequest>, JsonRejection>,
    ) -> Result<(StatusCode, Json<FormAck>), AppError> {
        let request = json_body(body)?;
        Ok((StatusCode::CREATED, Json(submit_support_request(&request)?)))
    }
}
