//! Frost evaluation over a forecast series.
//!
//! Pure logic -- no clock access and no network. The caller passes in the
//! series, the threshold, the lookahead horizon and "now".

use chrono::Duration;

use crate::types::{ForecastPoint, Timestamp};

/// Hours ahead of the invocation time within which a forecast entry counts.
pub const LOOKAHEAD_HOURS: i64 = 8;

/// The fixed lookahead horizon as a [`Duration`].
pub fn lookahead_horizon() -> Duration {
    Duration::hours(LOOKAHEAD_HOURS)
}

/// Result of evaluating a forecast series.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AlertResult {
    /// The earliest qualifying entry in series order.
    Triggered {
        timestamp: Timestamp,
        temperature: f64,
    },
    NotTriggered,
}

impl AlertResult {
    pub fn is_triggered(&self) -> bool {
        matches!(self, AlertResult::Triggered { .. })
    }
}

/// Find the first entry, in series order, that falls within `horizon` of
/// `now` and is at or below `threshold_f`.
///
/// Both comparisons are inclusive. The whole series is scanned: entries
/// past the cutoff are skipped rather than ending the scan, so an
/// out-of-order series still yields a correct answer.
pub fn evaluate(
    series: &[ForecastPoint],
    threshold_f: f64,
    horizon: Duration,
    now: Timestamp,
) -> AlertResult {
    let cutoff = now + horizon;

    series
        .iter()
        .find(|point| point.timestamp <= cutoff && point.temperature <= threshold_f)
        .map_or(AlertResult::NotTriggered, |point| AlertResult::Triggered {
            timestamp: point.timestamp,
            temperature: point.temperature,
        })
}
