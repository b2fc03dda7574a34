// ABOUTME: Conversational state manager for one chat widget session
// ABOUTME: Owns the transcript, replays history in display order, and allows one call at a time
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 ShareBites Contributors

//! # Chat Session
//!
//! A [`ChatSession`] drives the submit cycle of the support widget:
//!
//! 1. validate the message, or report [`SubmitOutcome::Busy`] if a call is in flight
//! 2. snapshot the history as it stood before the new turn
//! 3. append the user turn
//! 4. run the support-chat flow once
//! 5. append the model's reply, or the fixed apology when the call fails
//!
//! The seeded greeting is shown in the transcript but never replayed to the
//! model, so the first call always carries an empty history. A submit that is
//! dropped before its reply lands still answers its user turn with the
//! apology, so the replayed history always alternates user and model.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::{debug, info, warn};

use crate::constants::chat::{ERROR_APOLOGY, GREETING};
use crate::errors::{AppError, AppResult};
use crate::flows::customer_support_chat;
use crate::llm::GenerationClient;
use crate::models::{ChatInput, ChatRole, ChatTranscript, ChatTurn};
use crate::validation::Validate;

/// Result of one submit
#[derive(Debug)]
pub enum SubmitOutcome {
    /// The model answered; the reply is now the last transcript turn
    Replied(ChatTurn),
    /// The call failed; the apology is now the last transcript turn
    Apologized {
        /// The appended apology turn
        turn: ChatTurn,
        /// Why the call failed
        error: AppError,
    },
    /// A call was already in flight; nothing was appended or sent
    Busy,
}

impl SubmitOutcome {
    /// The turn appended by this submit, if any
    #[must_use]
    pub const fn turn(&self) -> Option<&ChatTurn> {
        match self {
            Self::Replied(turn) | Self::Apologized { turn, .. } => Some(turn),
            Self::Busy => None,
        }
    }
}

struct TranscriptState {
    transcript: ChatTranscript,
    // Bumped on reset so a reply to a discarded transcript is dropped
    epoch: u64,
}

impl TranscriptState {
    /// Answer a trailing user turn with the apology
    fn close_unanswered(&mut self) -> bool {
        let unanswered = self
            .transcript
            .last()
            .is_some_and(|entry| entry.turn.role == ChatRole::User);
        if unanswered {
            self.transcript.push(ChatTurn::model(ERROR_APOLOGY));
        }
        unanswered
    }
}

/// Answers the user turn with the apology if the submit ends without a reply
struct UnansweredTurn<'a> {
    state: &'a RwLock<TranscriptState>,
    epoch: u64,
    answered: bool,
}

impl Drop for UnansweredTurn<'_> {
    fn drop(&mut self) {
        if self.answered {
            return;
        }
        // A contended lock leaves the repair to the next submit
        if let Ok(mut state) = self.state.try_write() {
            if state.epoch == self.epoch && state.close_unanswered() {
                debug!("submit dropped before its reply, apology appended");
            }
        }
    }
}

/// Clears the in-flight flag when the submit finishes or its future is dropped
struct InFlightGuard<'a>(&'a AtomicBool);

impl<'a> InFlightGuard<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self(flag))
    }
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// One chat widget session
pub struct ChatSession {
    client: Arc<dyn GenerationClient>,
    state: RwLock<TranscriptState>,
    in_flight: AtomicBool,
}

impl ChatSession {
    /// Open a session whose transcript is seeded with the greeting
    #[must_use]
    pub fn open(client: Arc<dyn GenerationClient>) -> Self {
        debug!(client = client.name(), "chat session opened");
        Self {
            client,
            state: RwLock::new(TranscriptState {
                transcript: ChatTranscript::seeded(GREETING),
                epoch: 0,
            }),
            in_flight: AtomicBool::new(false),
        }
    }

    /// Submit one user message.
    ///
    /// Generation failures do not surface as `Err`: they append the apology
    /// turn and are reported through [`SubmitOutcome::Apologized`].
    ///
    /// # Errors
    ///
    /// Returns a validation error, with nothing appended, when the message is
    /// blank or too long.
    pub async fn submit(&self, message: impl Into<String>) -> AppResult<SubmitOutcome> {
        let message = message.into().trim().to_owned();
        ChatInput {
            user_message: message.clone(),
            history: Vec::new(),
        }
        .validate()?;

        let Some(_guard) = InFlightGuard::acquire(&self.in_flight) else {
            debug!("submit ignored, a reply is still pending");
            return Ok(SubmitOutcome::Busy);
        };

        let (input, epoch) = {
            let mut state = self.state.write().await;
            if state.close_unanswered() {
                debug!("previous submit left a turn unanswered, apology appended");
            }
            let history = state.transcript.history();
            state.transcript.push(ChatTurn::user(message.clone()));
            (
                ChatInput {
                    user_message: message,
                    history,
                },
                state.epoch,
            )
        };
        let mut pending = UnansweredTurn {
            state: &self.state,
            epoch,
            answered: false,
        };

        let outcome = match customer_support_chat(self.client.as_ref(), &input).await {
            Ok(output) => SubmitOutcome::Replied(ChatTurn::model(output.bot_response)),
            Err(error) => {
                warn!(error = %error, "chat turn failed, appending apology");
                SubmitOutcome::Apologized {
                    turn: ChatTurn::model(ERROR_APOLOGY),
                    error,
                }
            }
        };

        let mut state = self.state.write().await;
        pending.answered = true;
        if state.epoch == epoch {
            if let Some(turn) = outcome.turn() {
                state.transcript.push(turn.clone());
            }
            info!(turns = state.transcript.len(), "chat turn recorded");
        } else {
            debug!("session was reset while waiting, reply discarded");
        }
        Ok(outcome)
    }

    /// Copy of the transcript in display order
    pub async fn transcript(&self) -> ChatTranscript {
        self.state.read().await.transcript.clone()
    }

    /// Discard the transcript and reseed the greeting
    pub async fn reset(&self) {
        let mut state = self.state.write().await;
        state.transcript = ChatTranscript::seeded(GREETING);
        state.epoch += 1;
        debug!("chat session reset");
    }

    /// Whether a call is in flight
    #[must_use]
    pub fn is_busy(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    /// Close the session and hand back its final transcript
    #[must_use]
    pub fn close(self) -> ChatTranscript {
        self.state.into_inner().transcript
    }
}

impl std::fmt::Debug for ChatSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChatSession")
            .field("client", &self.client.name())
            .field("in_flight", &self.is_busy())
            .finish_non_exhaustive()
    }
}
