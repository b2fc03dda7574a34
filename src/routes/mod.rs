// ABOUTME: Route module organization for the ShareBites HTTP API
// ABOUTME: Groups thin axum handlers by domain and shares request-body parsing
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 ShareBites Contributors

//! Route module for the ShareBites API
//!
//! Each domain module contains only route definitions and thin handler
//! functions that delegate to the flows.

use axum::extract::rejection::JsonRejection;
use axum::Json;

use crate::errors::{AppError, AppResult};

/// Support chat routes
pub mod chat;
/// Donation estimate and simulated donation routes
pub mod donations;
/// Food pledge and support contact routes
pub mod forms;
/// Health check routes
pub mod health;
/// Impact analysis and impact page routes
pub mod impact;
/// Static site facts
pub mod site;

pub use chat::ChatRoutes;
pub use donations::DonationRoutes;
pub use forms::FormRoutes;
pub use health::HealthRoutes;
pub use impact::ImpactRoutes;
pub use site::{SiteInfo, SiteRoutes};

/// Unwrap a JSON body, turning axum's rejection into our error shape
pub(crate) fn json_body<T>(body: Result<Json<T>, JsonRejection>) -> AppResult<T> {
    body.map(|Json(value)| value)
        .map_err(|rejection| AppError::invalid_input(rejection.body_text()))
}
