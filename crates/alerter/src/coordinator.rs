//! Invocation entry point: fetch, evaluate, notify.
//!
//! [`Coordinator::handle`] never fails and never panics past its boundary.
//! Forecast errors and panics become a 500 response; everything else is a
//! 200, including deliveries where one or both channels failed.

use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use chrono::Utc;
use futures::FutureExt;
use serde::Serialize;
use tracing::Instrument;
use uuid::Uuid;

use frostwatch_core::evaluator::{self, AlertResult};
use frostwatch_core::message::format_alert_message;
use frostwatch_core::threshold::AlertThreshold;
use frostwatch_core::types::{Location, Timestamp};
use frostwatch_notify::{NotificationOutcome, Notifier};

use crate::forecast::{ForecastError, ForecastSource};

pub const STATUS_OK: u16 = 200;
pub const STATUS_ERROR: u16 = 500;

pub const ALERT_SENT_BODY: &str = "Alert sent successfully.";
pub const NO_ALERT_BODY: &str = "No freezing weather detected in the next 8 hours.";
const PANIC_BODY: &str = "Error: invocation panicked";

/// Structured result returned to whatever triggered the invocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InvocationResponse {
    pub status_code: u16,
    pub body: String,
}

impl InvocationResponse {
    pub fn ok(body: impl Into<String>) -> Self {
        Self {
            status_code: STATUS_OK,
            body: body.into(),
        }
    }

    pub fn error(body: impl Into<String>) -> Self {
        Self {
            status_code: STATUS_ERROR,
            body: body.into(),
        }
    }
}

/// Per-invocation metadata supplied by the host.
#[derive(Debug, Clone)]
pub struct InvocationContext {
    pub request_id: Uuid,
}

impl InvocationContext {
    pub fn new() -> Self {
        Self {
            request_id: Uuid::new_v4(),
        }
    }
}

impl Default for InvocationContext {
    fn default() -> Self {
        Self::new()
    }
}

/// What a successful run did.
#[derive(Debug)]
pub enum AlertOutcome {
    NoAlert,
    /// An alert was dispatched; per-channel results are attached.
    Sent(NotificationOutcome),
}

/// Runs one alerting pass per invocation with collaborators built once at
/// process start.
pub struct Coordinator {
    forecast: Arc<dyn ForecastSource>,
    notifier: Notifier,
    location: Location,
    threshold: AlertThreshold,
}

impl Coordinator {
    pub fn new(
        forecast: Arc<dyn ForecastSource>,
        notifier: Notifier,
        location: Location,
        threshold: AlertThreshold,
    ) -> Self {
        Self {
            forecast,
            notifier,
            location,
            threshold,
        }
    }

    /// Handle one invocation. The trigger event is not inspected.
    pub async fn handle(
        &self,
        _event: &serde_json::Value,
        context: &InvocationContext,
    ) -> InvocationResponse {
        let span = tracing::info_span!("invocation", request_id = %context.request_id);
        let run = self.run(Utc::now()).instrument(span);

        match AssertUnwindSafe(run).catch_unwind().await {
            Ok(Ok(AlertOutcome::Sent(_))) => InvocationResponse::ok(ALERT_SENT_BODY),
            Ok(Ok(AlertOutcome::NoAlert)) => InvocationResponse::ok(NO_ALERT_BODY),
            Ok(Err(e)) => {
                tracing::error!(request_id = %context.request_id, error = %e, "Invocation failed");
                InvocationResponse::error(format!("Error: {e}"))
            }
            Err(_) => {
                tracing::error!(request_id = %context.request_id, "Invocation panicked");
                InvocationResponse::error(PANIC_BODY)
            }
        }
    }

    /// Fetch, evaluate against `now`, and notify if triggered.
    ///
    /// Only forecast failures are returned as errors. Notification failures
    /// are carried inside [`AlertOutcome::Sent`].
    pub async fn run(&self, now: Timestamp) -> Result<AlertOutcome, ForecastError> {
        let series = self.forecast.fetch(&self.location).await?;

        if !series.is_chronological() {
            tracing::warn!(
                entries = series.len(),
                "Forecast series is not chronological; scanning all entries",
            );
        }

        let result = evaluator::evaluate(
            series.points(),
            self.threshold.fahrenheit(),
            evaluator::lookahead_horizon(),
            now,
        );

        let (timestamp, temperature) = match result {
            AlertResult::NotTriggered => {
                tracing::info!(
                    threshold_f = self.threshold.fahrenheit(),
                    "No freezing temperatures within the lookahead window",
                );
                return Ok(AlertOutcome::NoAlert);
            }
            AlertResult::Triggered {
                timestamp,
                temperature,
            } => (timestamp, temperature),
        };

        tracing::info!(
            %timestamp,
            temperature,
            buffer = self.threshold.buffer_degrees(),
            "Freezing temperature forecast, sending alert",
        );

        let message = format_alert_message(temperature, timestamp, self.threshold.buffer_degrees());
        let outcome = self.notifier.notify(&message).await;

        if !outcome.all_succeeded() {
            let failed: Vec<&str> = outcome.failures().map(|(name, _)| name).collect();
            tracing::warn!(?failed, "Alert delivered with channel failures");
        }

        Ok(AlertOutcome::Sent(outcome))
    }
}
