//! `frostwatch-core` -- pure frost-alert domain logic.
//!
//! No I/O lives here. The alerter crate fetches forecasts and dispatches
//! notifications; this crate decides whether a forecast warrants an alert
//! and what the alert says.

pub mod evaluator;
pub mod message;
pub mod threshold;
pub mod types;
