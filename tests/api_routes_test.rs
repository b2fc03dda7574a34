// ABOUTME: HTTP integration tests for the assembled ShareBites router
// ABOUTME: Exercises every endpoint through the full middleware stack with a stub model
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 ShareBites Contributors

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

//! HTTP integration tests for the ShareBites API
//!
//! Every test builds the production router around a [`StubClient`], so
//! validation, error mapping, and middleware run exactly as deployed.

mod common;
mod helpers;

use std::sync::Arc;

use axum::http::StatusCode;
use axum::Router;
use common::{analysis_reply, donation_reply, test_state, StubClient, StubReply};
use helpers::api::ApiRequest;
use serde_json::{json, Value};
use sharebites_server::constants::forms::{PLEDGE_THANKS, SUPPORT_THANKS};
use sharebites_server::server::build_router;

fn app(client: &Arc<StubClient>) -> Router {
    build_router(test_state(client.clone()))
}

fn idle_client() -> Arc<StubClient> {
    Arc::new(StubClient::replying("unused"))
}

// ============================================================================
// Health and site
// ============================================================================

#[tokio::test]
async fn test_health_endpoint() {
    let response = ApiRequest::get("/health").send(app(&idle_client())).await;

    assert_eq!(response.status, StatusCode::OK);
    let body: Value = response.json();
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["service"], "sharebites-server");
    assert!(body["timestamp"].is_string());
}

#[tokio::test]
async fn test_ready_reports_generation_client() {
    let response = ApiRequest::get("/ready").send(app(&idle_client())).await;

    assert_eq!(response.status, StatusCode::OK);
    let body: Value = response.json();
    assert_eq!(body["generation"]["provider"], "stub");
    assert_eq!(body["generation"]["model"], "stub-model");
}

#[tokio::test]
async fn test_site_info() {
    let response = ApiRequest::get("/api/site").send(app(&idle_client())).await;

    assert_eq!(response.status, StatusCode::OK);
    let body: Value = response.json();
    assert_eq!(body["name"], "ShareBites");
    assert_eq!(body["contactEmail"], "support@sharebites.org");
    assert_eq!(body["minDonationAmount"], 1.0);
    assert_eq!(body["paymentOptions"].as_array().unwrap().len(), 4);
    let paths: Vec<&str> = body["navigation"]
        .as_array()
        .unwrap()
        .iter()
        .map(|link| link["path"].as_str().unwrap())
        .collect();
    assert!(paths.contains(&"/donate#food-pledge"));
}

#[tokio::test]
async fn test_responses_carry_request_id() {
    let response = ApiRequest::get("/health").send(app(&idle_client())).await;
    let generated = response.header("x-request-id").expect("request id");
    assert!(generated.starts_with("req_"));

    let response = ApiRequest::get("/health")
        .header("x-request-id", "caller-123")
        .send(app(&idle_client()))
        .await;
    assert_eq!(response.header("x-request-id"), Some("caller-123"));
}

#[tokio::test]
async fn test_unknown_route_is_404() {
    let response = ApiRequest::get("/api/nothing").send(app(&idle_client())).await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

// ============================================================================
// Chat
// ============================================================================

#[tokio::test]
async fn test_chat_round() {
    let client = Arc::new(StubClient::replying("Head to [Donate Page](/donate)."));

    let response = ApiRequest::post("/api/chat")
        .json(&json!({
            "userMessage": "How can I give money?",
            "history": [
                {"role": "user", "parts": [{"text": "Hi"}]},
                {"role": "model", "parts": [{"text": "Hello!"}]}
            ]
        }))
        .send(app(&client))
        .await
        .expect_status(StatusCode::OK);

    let body: Value = response.json();
    assert_eq!(body["botResponse"], "Head to [Donate Page](/donate).");
    // Two context turns plus the caller's two
    assert_eq!(client.last_request().history.len(), 4);
}

#[tokio::test]
async fn test_chat_blank_message_is_400() {
    let client = idle_client();

    let response = ApiRequest::post("/api/chat")
        .json(&json!({"userMessage": "   "}))
        .send(app(&client))
        .await
        .expect_status(StatusCode::BAD_REQUEST);

    let body: Value = response.json();
    assert_eq!(body["error"]["field"], "userMessage");
    assert_eq!(client.calls(), 0);
}

#[tokio::test]
async fn test_chat_provider_failure_is_502() {
    let client = Arc::new(StubClient::failing());

    let response = ApiRequest::post("/api/chat")
        .json(&json!({"userMessage": "Hello"}))
        .send(app(&client))
        .await
        .expect_status(StatusCode::BAD_GATEWAY);

    assert_eq!(response.error_code(), "EXTERNAL_SERVICE_ERROR");
}

#[tokio::test]
async fn test_chat_rate_limit_is_503() {
    let client = Arc::new(StubClient::always(StubReply::RateLimited));

    let response = ApiRequest::post("/api/chat")
        .json(&json!({"userMessage": "Hello"}))
        .send(app(&client))
        .await
        .expect_status(StatusCode::SERVICE_UNAVAILABLE);

    assert_eq!(response.error_code(), "EXTERNAL_RATE_LIMITED");
}

#[tokio::test]
async fn test_malformed_json_is_400() {
    let client = idle_client();

    let response = ApiRequest::post("/api/chat")
        .raw_json("{\"userMessage\": ")
        .send(app(&client))
        .await
        .expect_status(StatusCode::BAD_REQUEST);

    let body: Value = response.json();
    assert_eq!(body["error"]["code"], "INVALID_INPUT");
    assert_eq!(client.calls(), 0);
}

// ============================================================================
// Donations
// ============================================================================

#[tokio::test]
async fn test_donation_estimate_round() {
    let client = Arc::new(StubClient::always(donation_reply(25.0)));

    let response = ApiRequest::post("/api/donations/estimate")
        .json(&json!({"donationAmount": 25}))
        .send(app(&client))
        .await
        .expect_status(StatusCode::OK);

    let body: Value = response.json();
    assert_eq!(body["mealsProvided"], 50.0);
    assert_eq!(body["familiesFed"], 12.5);
    assert!(body["impactStatement"].is_string());
}

#[tokio::test]
async fn test_donation_estimate_zero_is_400() {
    let client = idle_client();

    let response = ApiRequest::post("/api/donations/estimate")
        .json(&json!({"donationAmount": 0}))
        .send(app(&client))
        .await
        .expect_status(StatusCode::BAD_REQUEST);

    let body: Value = response.json();
    assert_eq!(body["error"]["code"], "VALUE_OUT_OF_RANGE");
    assert_eq!(body["error"]["field"], "donationAmount");
    assert_eq!(client.calls(), 0);
}

#[tokio::test]
async fn test_donation_submission_needs_no_model_call() {
    let client = idle_client();

    let response = ApiRequest::post("/api/donations")
        .json(&json!({"donationAmount": 10, "paymentMethod": "PayPal"}))
        .send(app(&client))
        .await
        .expect_status(StatusCode::CREATED);

    let body: Value = response.json();
    assert!(body["reference"].is_string());
    assert!(body["message"].as_str().unwrap().contains("via PayPal"));
    assert_eq!(body["impact"]["meals"], 20.0);
    assert_eq!(body["impact"]["families"], 5.0);
    assert_eq!(client.calls(), 0);
}

#[tokio::test]
async fn test_donation_submission_unknown_method_is_400() {
    let response = ApiRequest::post("/api/donations")
        .json(&json!({"donationAmount": 10, "paymentMethod": "Gold bars"}))
        .send(app(&idle_client()))
        .await
        .expect_status(StatusCode::BAD_REQUEST);

    let body: Value = response.json();
    assert_eq!(body["error"]["field"], "paymentMethod");
}

// ============================================================================
// Impact
// ============================================================================

#[tokio::test]
async fn test_impact_stats_snapshot() {
    let response = ApiRequest::get("/api/impact/stats")
        .send(app(&idle_client()))
        .await
        .expect_status(StatusCode::OK);

    let body: Value = response.json();
    assert_eq!(body["snapshot"]["mealsDistributed"], 15230.0);
    assert!(body["monthly"].as_array().is_some_and(|m| !m.is_empty()));
}

#[tokio::test]
async fn test_impact_analysis_round() {
    let client = Arc::new(StubClient::always(analysis_reply()));

    let response = ApiRequest::post("/api/impact/analyze")
        .json(&json!({
            "mealsDistributed": 15230,
            "moneyRaised": 7615,
            "numberOfDonors": 350,
            "monthlyTrends": "Donations rose steadily through the winter months."
        }))
        .send(app(&client))
        .await
        .expect_status(StatusCode::OK);

    let body: Value = response.json();
    assert_eq!(body["keyInsights"].as_array().unwrap().len(), 2);
    assert!(body["summary"].is_string());
    assert_eq!(client.calls(), 1);
}

#[tokio::test]
async fn test_impact_analysis_missing_field_is_400() {
    let client = Arc::new(StubClient::always(analysis_reply()));

    let response = ApiRequest::post("/api/impact/analyze")
        .json(&json!({"mealsDistributed": 10}))
        .send(app(&client))
        .await
        .expect_status(StatusCode::BAD_REQUEST);

    let body: Value = response.json();
    assert_eq!(body["error"]["code"], "INVALID_INPUT");
    assert_eq!(client.calls(), 0);
}

// ============================================================================
// Forms
// ============================================================================

#[tokio::test]
async fn test_food_pledge_is_acknowledged() {
    let response = ApiRequest::post("/api/pledges")
        .json(&json!({
            "name": "Dana",
            "email": "dana@example.org",
            "foodType": "Fresh produce",
            "quantity": "2 crates",
            "pickupAddress": "12 Market St"
        }))
        .send(app(&idle_client()))
        .await
        .expect_status(StatusCode::CREATED);

    let body: Value = response.json();
    assert_eq!(body["message"], PLEDGE_THANKS);
    assert!(body["receivedAt"].is_string());
}

#[tokio::test]
async fn test_food_pledge_bad_email_is_400() {
    let response = ApiRequest::post("/api/pledges")
        .json(&json!({
            "name": "Dana",
            "email": "not-an-email",
            "foodType": "Fresh produce",
            "quantity": "2 crates"
        }))
        .send(app(&idle_client()))
        .await
        .expect_status(StatusCode::BAD_REQUEST);

    let body: Value = response.json();
    assert_eq!(body["error"]["field"], "email");
}

#[tokio::test]
async fn test_support_request_is_acknowledged() {
    let response = ApiRequest::post("/api/support")
        .json(&json!({
            "name": "Sam",
            "email": "sam@example.org",
            "subject": "Pickup times",
            "message": "When do you collect pledged food?"
        }))
        .send(app(&idle_client()))
        .await
        .expect_status(StatusCode::CREATED);

    let body: Value = response.json();
    assert_eq!(body["message"], SUPPORT_THANKS);
}
