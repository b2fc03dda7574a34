// ABOUTME: Support chat route answering one message against caller-supplied history
// ABOUTME: The widget keeps its own transcript and sends it with every message
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 ShareBites Contributors

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::{routing::post, Json, Router};

use super::json_body;
use crate::errors::AppError;
use crate::flows::customer_support_chat;
use crate::models::{ChatInput, ChatOutput};
use crate::server::AppState;

/// Chat routes implementation
pub struct ChatRoutes;

impl ChatRoutes {
    /// Create all chat routes
    pub fn routes(state: AppState) -> Router {
        Router::new()
            .route("/api/chat", post(Self::send_message))
            .with_state(state)
    }

    /// Answer one message
    async fn send_message(
        State(state): State<AppState>,
        body: Result<Json<ChatInput>, JsonRejection>,
    ) -> Result<Json<ChatOutput>, AppError> {
        let input = json_body(body)?;
        let output = customer_support_chat(state.client.as_ref(), &input).await?;
        Ok(Json(output))
    }
}
