//! Alert subject and body text.

use crate::types::Timestamp;

/// Subject line used by every notification channel.
pub const ALERT_SUBJECT: &str = "Frost/Freezing Weather Alert";

/// Render the alert body for a triggering forecast entry.
pub fn format_alert_message(temperature: f64, timestamp: Timestamp, buffer_degrees: i32) -> String {
    format!(
        "Warning: Freezing temperature ({temperature}°F) forecasted at {} UTC. \
         Buffer applied: {buffer_degrees}°F.",
        timestamp.format("%Y-%m-%d %H:%M:%S"),
    )
}
