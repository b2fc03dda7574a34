// ABOUTME: Customer-support chat flow answering questions as ShareBot
// ABOUTME: Prepends the fixed site context and acknowledgment to the caller's history
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 ShareBites Contributors

use std::time::Instant;

use tracing::{info, instrument, warn};

use crate::constants::chat::{CONTEXT_ACKNOWLEDGMENT, EMPTY_RESPONSE_FALLBACK, TEMPERATURE};
use crate::errors::{AppError, AppResult};
use crate::llm::prompts::SHAREBITES_CONTEXT;
use crate::llm::{GenerationClient, GenerationRequest};
use crate::models::{ChatInput, ChatOutput, ChatTurn};
use crate::validation::Validate;

/// Build the single request for one chat turn.
///
/// History sent to the model is `[context, acknowledgment, ..input.history]`
/// and the latest message becomes the prompt.
#[must_use]
pub fn chat_request(input: &ChatInput) -> GenerationRequest {
    let mut history = Vec::with_capacity(input.history.len() + 2);
    history.push(ChatTurn::user(SHAREBITES_CONTEXT));
    history.push(ChatTurn::model(CONTEXT_ACKNOWLEDGMENT));
    history.extend(input.history.iter().cloned());

    GenerationRequest::new(input.user_message.clone())
        .with_history(history)
        .with_temperature(TEMPERATURE)
}

/// Answer one user message.
///
/// An empty reply is not an error: it is replaced by a fixed fallback text.
///
/// # Errors
///
/// Returns a validation error before any call when the input is malformed,
/// or a generation error when the call fails.
#[instrument(skip(client, input), fields(flow = "support_chat", history = input.history.len()))]
pub async fn customer_support_chat(
    client: &dyn GenerationClient,
    input: &ChatInput,
) -> AppResult<ChatOutput> {
    input.validate()?;

    let started = Instant::now();
    let response = client.generate(&chat_request(input)).await.map_err(|e| {
        warn!(error = %e, "support chat generation failed");
        AppError::from(e)
    })?;

    let bot_response = match response.non_empty_text() {
        Some(text) => text.to_owned(),
        None => {
            warn!(finish_reason = ?response.finish_reason, "empty chat reply, using fallback");
            EMPTY_RESPONSE_FALLBACK.to_owned()
        }
    };

    info!(
        duration_ms = started.elapsed().as_millis() as u64,
        model = %response.model,
        "support chat answered"
    );
    Ok(ChatOutput { bot_response })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_prepends_context_pair() {
        let input = ChatInput {
            user_message: "Can I donate canned goods?".to_owned(),
            history: vec![ChatTurn::user("Hi"), ChatTurn::model("Hello!")],
        };
        let request = chat_request(&input);

        assert_eq!(request.history.len(), 4);
        assert_eq!(request.history[0].text(), SHAREBITES_CONTEXT);
        assert_eq!(request.history[1].text(), CONTEXT_ACKNOWLEDGMENT);
        assert_eq!(request.history[2].text(), "Hi");
        assert_eq!(request.prompt, "Can I donate canned goods?");
        assert_eq!(request.config.temperature, Some(TEMPERATURE));
        assert_eq!(request.config.safety_settings.len(), 4);
        assert!(request.response_schema.is_none());
    }
}
