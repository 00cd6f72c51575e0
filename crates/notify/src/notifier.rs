//! Fan an alert out to every configured channel.

use std::sync::Arc;

use frostwatch_core::message::ALERT_SUBJECT;

use crate::channel::{AlertChannel, NotificationError};

/// Result of one channel's delivery attempt.
#[derive(Debug)]
pub struct ChannelOutcome {
    pub channel: &'static str,
    pub result: Result<(), NotificationError>,
}

/// Per-channel results of a single [`Notifier::notify`] call.
#[derive(Debug, Default)]
pub struct NotificationOutcome {
    pub channels: Vec<ChannelOutcome>,
}

impl NotificationOutcome {
    pub fn all_succeeded(&self) -> bool {
        self.channels.iter().all(|c| c.result.is_ok())
    }

    /// Channels whose delivery failed, with their errors.
    pub fn failures(&self) -> impl Iterator<Item = (&'static str, &NotificationError)> {
        self.channels
            .iter()
            .filter_map(|c| c.result.as_ref().err().map(|e| (c.channel, e)))
    }
}

/// Sends an alert through the email channel and then the topic channel.
///
/// Channels are constructed once at process start and reused for every
/// invocation.
#[derive(Clone)]
pub struct Notifier {
    channels: Vec<Arc<dyn AlertChannel>>,
}

impl Notifier {
    pub fn new(email: Arc<dyn AlertChannel>, topic: Arc<dyn AlertChannel>) -> Self {
        Self {
            channels: vec![email, topic],
        }
    }

    /// Attempt delivery on every channel, in order, without retry.
    ///
    /// A failure is recorded and logged; the remaining channels are still
    /// attempted.
    pub async fn notify(&self, message: &str) -> NotificationOutcome {
        let mut outcome = NotificationOutcome {
            channels: Vec::with_capacity(self.channels.len()),
        };

        for channel in &self.channels {
            let result = channel.send(ALERT_SUBJECT, message).await;
            if let Err(e) = &result {
                tracing::error!(channel = channel.name(), error = %e, "Alert delivery failed");
            }
            outcome.channels.push(ChannelOutcome {
                channel: channel.name(),
                result,
            });
        }

        outcome
    }
}
