// ABOUTME: Debounced donation-impact estimator for one donation form instance
// ABOUTME: Coalesces rapid amount changes into a single estimate after a quiet interval
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 ShareBites Contributors

//! # Debounced Estimator
//!
//! Each call to [`DonationEstimator::schedule`] cancels the pending estimate
//! and starts a new quiet interval; only the last amount in a burst reaches
//! the model. State is published on a `watch` channel so a form can render
//! the latest [`EstimateState`] without polling.

use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::config::ServerConfig;
use crate::constants::conversion::MIN_DONATION_AMOUNT;
use crate::constants::notices::ESTIMATE_FAILED;
use crate::errors::AppResult;
use crate::flows::estimate_donation_impact;
use crate::llm::GenerationClient;
use crate::models::{DonationEstimateRequest, DonationEstimateResult};
use crate::validation::require_at_least;

/// An estimate and the amount it was computed for
#[derive(Debug, Clone, PartialEq)]
pub struct Estimate {
    /// Amount the estimate belongs to
    pub amount: f64,
    /// Model result
    pub result: DonationEstimateResult,
}

/// What the donation form should show
#[derive(Debug, Clone, PartialEq, Default)]
pub enum EstimateState {
    /// No amount worth estimating
    #[default]
    Idle,
    /// Waiting for the quiet interval or the model
    Pending {
        /// Amount being estimated
        amount: f64,
        /// Last good estimate, still displayable
        previous: Option<Estimate>,
    },
    /// Latest estimate
    Ready(Estimate),
    /// The last attempt failed; the previous estimate is kept
    Failed {
        /// Amount that failed
        amount: f64,
        /// Retryable notice for the user
        notice: String,
        /// Last good estimate, untouched by the failure
        previous: Option<Estimate>,
    },
}

impl EstimateState {
    /// Most recent successful estimate, whatever the current state
    #[must_use]
    pub const fn latest(&self) -> Option<&Estimate> {
        match self {
            Self::Idle => None,
            Self::Ready(estimate) => Some(estimate),
            Self::Pending { previous, .. } | Self::Failed { previous, .. } => previous.as_ref(),
        }
    }
}

/// Debounced estimator bound to one form instance
pub struct DonationEstimator {
    client: Arc<dyn GenerationClient>,
    quiet: Duration,
    state: Arc<watch::Sender<EstimateState>>,
    pending: Mutex<Option<JoinHandle<()>>>,
}

impl DonationEstimator {
    /// Create an estimator with the given quiet interval
    #[must_use]
    pub fn new(client: Arc<dyn GenerationClient>, quiet: Duration) -> Self {
        let (state, _) = watch::channel(EstimateState::Idle);
        Self {
            client,
            quiet,
            state: Arc::new(state),
            pending: Mutex::new(None),
        }
    }

    /// Create an estimator using the configured quiet interval
    #[must_use]
    pub fn from_config(client: Arc<dyn GenerationClient>, config: &ServerConfig) -> Self {
        Self::new(client, config.debounce_interval())
    }

    /// Quiet interval
    #[must_use]
    pub const fn quiet_interval(&self) -> Duration {
        self.quiet
    }

    /// Receiver that observes every state change
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<EstimateState> {
        self.state.subscribe()
    }

    /// Current state
    #[must_use]
    pub fn current(&self) -> EstimateState {
        self.state.borrow().clone()
    }

    /// Record a new amount. Cancels any pending estimate; amounts below the
    /// donation minimum clear the result without a call.
    ///
    /// Must be called from within a tokio runtime.
    pub fn schedule(&self, amount: f64) {
        let mut pending = self.pending.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(task) = pending.take() {
            task.abort();
        }

        if !is_estimable(amount) {
            debug!(amount, "amount below minimum, clearing estimate");
            self.state.send_replace(EstimateState::Idle);
            return;
        }

        let previous = self.state.borrow().latest().cloned();
        self.state
            .send_replace(EstimateState::Pending { amount, previous });

        let client = Arc::clone(&self.client);
        let state = Arc::clone(&self.state);
        let quiet = self.quiet;
        *pending = Some(tokio::spawn(async move {
            tokio::time::sleep(quiet).await;
            debug!(amount, "quiet interval elapsed, estimating");
            let outcome = estimate_donation_impact(
                client.as_ref(),
                &DonationEstimateRequest::new(amount),
            )
            .await;
            publish(&state, amount, outcome.as_ref().ok().cloned());
        }));
    }

    /// Estimate immediately, cancelling any pending estimate. Amounts below
    /// the donation minimum clear the result without a call, as in
    /// [`schedule`](Self::schedule).
    ///
    /// # Errors
    ///
    /// Returns an `OutOfRange` validation error for amounts below the minimum,
    /// otherwise the generation error; a failed call keeps the previous estimate.
    pub async fn estimate_now(&self, amount: f64) -> AppResult<DonationEstimateResult> {
        self.cancel_pending();
        if let Err(error) = require_at_least("donationAmount", amount, MIN_DONATION_AMOUNT) {
            debug!(amount, "amount below minimum, clearing estimate");
            self.state.send_replace(EstimateState::Idle);
            return Err(error.into());
        }
        let previous = self.state.borrow().latest().cloned();
        self.state
            .send_replace(EstimateState::Pending { amount, previous });

        let outcome =
            estimate_donation_impact(self.client.as_ref(), &DonationEstimateRequest::new(amount))
                .await;
        publish(&self.state, amount, outcome.as_ref().ok().cloned());
        outcome
    }

    /// The ready estimate for `amount`, computing one only when none exists
    ///
    /// # Errors
    ///
    /// Returns the validation or generation error of the fresh estimate.
    pub async fn ensure_estimate(&self, amount: f64) -> AppResult<DonationEstimateResult> {
        if let EstimateState::Ready(estimate) = self.current() {
            if estimate.amount.to_bits() == amount.to_bits() {
                return Ok(estimate.result);
            }
        }
        self.estimate_now(amount).await
    }

    /// Abort the pending estimate, if any
    pub fn cancel_pending(&self) {
        let task = self
            .pending
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        if let Some(task) = task {
            task.abort();
        }
    }
}

impl Drop for DonationEstimator {
    fn drop(&mut self) {
        self.cancel_pending();
    }
}

impl std::fmt::Debug for DonationEstimator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DonationEstimator")
            .field("client", &self.client.name())
            .field("quiet", &self.quiet)
            .field("state", &*self.state.borrow())
            .finish_non_exhaustive()
    }
}

fn is_estimable(amount: f64) -> bool {
    require_at_least("donationAmount", amount, MIN_DONATION_AMOUNT).is_ok()
}

fn publish(
    state: &watch::Sender<EstimateState>,
    amount: f64,
    result: Option<DonationEstimateResult>,
) {
    let next = match result {
        Some(result) => EstimateState::Ready(Estimate { amount, result }),
        None => {
            warn!(amount, "donation estimate failed, keeping previous result");
            EstimateState::Failed {
                amount,
                notice: ESTIMATE_FAILED.to_owned(),
                previous: state.borrow().latest().cloned(),
            }
        }
    };
    state.send_replace(next);
}
