//! The channel abstraction shared by every delivery mechanism.

use async_trait::async_trait;

// ---------------------------------------------------------------------------
// Error
// ---------------------------------------------------------------------------

/// Error type for notification delivery failures.
#[derive(Debug, thiserror::Error)]
pub enum NotificationError {
    /// The email provider rejected or failed the send.
    #[error("Email send failed: {0}")]
    Email(String),

    /// The topic provider rejected or failed the publish.
    #[error("Topic publish failed: {0}")]
    Publish(String),

    /// The outbound message could not be assembled.
    #[error("Notification build error: {0}")]
    Build(String),
}

// ---------------------------------------------------------------------------
// AlertChannel
// ---------------------------------------------------------------------------

/// A single outbound notification mechanism.
///
/// Implementations make exactly one outbound call per [`send`](Self::send)
/// and never retry.
#[async_trait]
pub trait AlertChannel: Send + Sync {
    /// Short, stable name used in logs and outcomes (e.g. `"email"`).
    fn name(&self) -> &'static str;

    /// Deliver `body` under `subject`.
    async fn send(&self, subject: &str, body: &str) -> Result<(), NotificationError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn notification_error_display_email() {
        let err = NotificationError::Email("MessageRejected".to_string());
        assert_eq!(err.to_string(), "Email send failed: MessageRejected");
    }

    #[test]
    fn notification_error_display_publish() {
        let err = NotificationError::Publish("NotFound: topic".to_string());
        assert_eq!(err.to_string(), "Topic publish failed: NotFound: topic");
    }

    #[test]
    fn notification_error_display_build() {
        let err = NotificationError::Build("missing body".to_string());
        assert_eq!(err.to_string(), "Notification build error: missing body");
    }
}
