// ABOUTME: Integration tests for the customer-support chat flow
// ABOUTME: Covers request assembly, empty-reply fallback, and failure mapping
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 ShareBites Contributors

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use common::{init_test_logging, StubClient, StubReply};
use sharebites_server::constants::chat::{CONTEXT_ACKNOWLEDGMENT, EMPTY_RESPONSE_FALLBACK};
use sharebites_server::errors::ErrorCode;
use sharebites_server::flows::customer_support_chat;
use sharebites_server::llm::prompts::SHAREBITES_CONTEXT;
use sharebites_server::llm::HarmBlockThreshold;
use sharebites_server::models::{ChatInput, ChatRole, ChatTurn};

fn input(message: &str, history: Vec<ChatTurn>) -> ChatInput {
    ChatInput {
        user_message: message.to_owned(),
        history,
    }
}

#[tokio::test]
async fn test_reply_passes_through() {
    init_test_logging();
    let client = StubClient::replying("Visit [Donate Page](/donate) to give.");

    let output = customer_support_chat(&client, &input("How do I donate?", Vec::new()))
        .await
        .unwrap();

    assert_eq!(output.bot_response, "Visit [Donate Page](/donate) to give.");
    assert_eq!(client.calls(), 1);
}

#[tokio::test]
async fn test_request_carries_context_history_and_settings() {
    init_test_logging();
    let client = StubClient::replying("Sure!");
    let history = vec![
        ChatTurn::user("Hi"),
        ChatTurn::model("Hello! How can I help?"),
    ];

    customer_support_chat(&client, &input("Can I pledge cooked meals?", history))
        .await
        .unwrap();

    let request = client.last_request();
    let roles: Vec<ChatRole> = request.history.iter().map(|turn| turn.role).collect();
    assert_eq!(
        roles,
        vec![ChatRole::User, ChatRole::Model, ChatRole::User, ChatRole::Model]
    );
    assert_eq!(request.history[0].text(), SHAREBITES_CONTEXT);
    assert_eq!(request.history[1].text(), CONTEXT_ACKNOWLEDGMENT);
    assert_eq!(request.history[3].text(), "Hello! How can I help?");
    assert_eq!(request.prompt, "Can I pledge cooked meals?");
    assert_eq!(request.config.temperature, Some(0.6));
    assert_eq!(request.config.safety_settings.len(), 4);
    assert!(request
        .config
        .safety_settings
        .iter()
        .all(|setting| setting.threshold == HarmBlockThreshold::BlockMediumAndAbove));
}

#[tokio::test]
async fn test_empty_reply_uses_fallback() {
    init_test_logging();
    for empty in ["", "   ", "\n\t"] {
        let client = StubClient::replying(empty);
        let output = customer_support_chat(&client, &input("Hello?", Vec::new()))
            .await
            .unwrap();
        assert_eq!(output.bot_response, EMPTY_RESPONSE_FALLBACK);
    }
}

#[tokio::test]
async fn test_blank_message_is_rejected_before_any_call() {
    init_test_logging();
    let client = StubClient::replying("unused");

    let error = customer_support_chat(&client, &input("  ", Vec::new()))
        .await
        .unwrap_err();

    assert!(error.is_validation());
    assert_eq!(error.field(), Some("userMessage"));
    assert_eq!(client.calls(), 0);
}

#[tokio::test]
async fn test_generation_failures_map_to_generation_errors() {
    init_test_logging();

    let error = customer_support_chat(&StubClient::failing(), &input("Hi", Vec::new()))
        .await
        .unwrap_err();
    assert!(error.is_generation());
    assert_eq!(error.code, ErrorCode::ExternalServiceError);
    assert_eq!(error.http_status(), 502);

    let error = customer_support_chat(
        &StubClient::always(StubReply::RateLimited),
        &input("Hi", Vec::new()),
    )
    .await
    .unwrap_err();
    assert_eq!(error.code, ErrorCode::ExternalRateLimited);
    assert_eq!(error.http_status(), 503);
    assert!(error.message.contains("try again"));

    let error = customer_support_chat(
        &StubClient::always(StubReply::Unreachable),
        &input("Hi", Vec::new()),
    )
    .await
    .unwrap_err();
    assert_eq!(error.code, ErrorCode::ExternalServiceUnavailable);
}
