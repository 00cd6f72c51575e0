//! Email alert delivery via Amazon SES.
//!
//! [`EmailDelivery`] sends a plain-text email from one configured sender to
//! one configured recipient using the SES v2 `SendEmail` API. Mailboxes may
//! carry a display name (`Frost Alerts <frost@example.com>`).

use async_trait::async_trait;
use aws_sdk_sesv2::error::DisplayErrorContext;
use aws_sdk_sesv2::types::{Body, Content, Destination, EmailContent, Message};
use lettre::message::Mailbox;

use crate::channel::{AlertChannel, NotificationError};

const CHARSET: &str = "UTF-8";

/// Sends alert emails through SES.
pub struct EmailDelivery {
    client: aws_sdk_sesv2::Client,
    from: Mailbox,
    to: Mailbox,
}

impl EmailDelivery {
    /// Create a delivery service from a shared AWS configuration.
    pub fn new(sdk_config: &aws_config::SdkConfig, from: Mailbox, to: Mailbox) -> Self {
        Self::with_client(aws_sdk_sesv2::Client::new(sdk_config), from, to)
    }

    /// Create a delivery service reusing an existing SES client.
    pub fn with_client(client: aws_sdk_sesv2::Client, from: Mailbox, to: Mailbox) -> Self {
        Self { client, from, to }
    }

    /// Assemble the SES simple-content payload.
    fn build_content(subject: &str, body: &str) -> Result<EmailContent, NotificationError> {
        let subject = Content::builder()
            .data(subject)
            .charset(CHARSET)
            .build()
            .map_err(|e| NotificationError::Build(e.to_string()))?;
        let text = Content::builder()
            .data(body)
            .charset(CHARSET)
            .build()
            .map_err(|e| NotificationError::Build(e.to_string()))?;

        let message = Message::builder()
            .subject(subject)
            .body(Body::builder().text(text).build())
            .build();

        Ok(EmailContent::builder().simple(message).build())
    }
}

#[async_trait]
impl AlertChannel for EmailDelivery {
    fn name(&self) -> &'static str {
        "email"
    }

    async fn send(&self, subject: &str, body: &str) -> Result<(), NotificationError> {
        let content = Self::build_content(subject, body)?;

        let output = self
            .client
            .send_email()
            .from_email_address(self.from.to_string())
            .destination(Destination::builder().to_addresses(self.to.to_string()).build())
            .content(content)
            .send()
            .await
            .map_err(|e| NotificationError::Email(DisplayErrorContext(&e).to_string()))?;

        tracing::info!(
            to = %self.to,
            message_id = output.message_id().unwrap_or("-"),
            "Alert email sent",
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use aws_sdk_sesv2::operation::send_email::{SendEmailError, SendEmailInput, SendEmailOutput};
    use aws_sdk_sesv2::types::error::MessageRejected;
    use aws_smithy_mocks::{mock, mock_client};
    use frostwatch_core::message::ALERT_SUBJECT;

    use super::*;

    const BODY: &str = "Warning: Freezing temperature (30°F) forecasted at 2024-11-03 21:00:00 UTC. \
                        Buffer applied: 0°F.";

    fn sender() -> Mailbox {
        "Frost Alerts <frost@example.com>".parse().unwrap()
    }

    fn recipient() -> Mailbox {
        "grower@example.com".parse().unwrap()
    }

    fn delivery(client: aws_sdk_sesv2::Client) -> EmailDelivery {
        EmailDelivery::with_client(client, sender(), recipient())
    }

    /// Sender, single recipient, fixed subject and a UTF-8 plain-text body.
    fn is_alert_email(req: &SendEmailInput) -> bool {
        let message = req.content().and_then(|c| c.simple());
        let subject = message.and_then(|m| m.subject());
        let text = message.and_then(|m| m.body()).and_then(|b| b.text());

        req.from_email_address() == Some(sender().to_string().as_str())
            && req.destination().map(|d| d.to_addresses()) == Some(&[recipient().to_string()][..])
            && subject.map(|s| s.data()) == Some(ALERT_SUBJECT)
            && text.map(|t| t.data()) == Some(BODY)
            && text.and_then(|t| t.charset()) == Some(CHARSET)
    }

    #[test]
    fn build_content_uses_simple_content() {
        let content = EmailDelivery::build_content("Frost", "Warning: 30°F").unwrap();
        assert!(content.simple().is_some());
        assert!(content.raw().is_none());
        assert!(content.template().is_none());
    }

    #[test]
    fn sender_keeps_its_display_name() {
        let from = sender();
        assert_eq!(from.name.as_deref(), Some("Frost Alerts"));
        assert!(from.to_string().ends_with("<frost@example.com>"));
    }

    #[tokio::test]
    async fn send_issues_one_plain_text_email() {
        let rule = mock!(aws_sdk_sesv2::Client::send_email)
            .match_requests(is_alert_email)
            .then_output(|| SendEmailOutput::builder().message_id("ses-1").build());
        let client = mock_client!(aws_sdk_sesv2, [&rule]);

        delivery(client).send(ALERT_SUBJECT, BODY).await.unwrap();

        assert_eq!(rule.num_calls(), 1);
    }

    #[tokio::test]
    async fn rejected_send_maps_to_email_error() {
        let rule = mock!(aws_sdk_sesv2::Client::send_email).then_error(|| {
            SendEmailError::MessageRejected(
                MessageRejected::builder()
                    .message("Email address is not verified.")
                    .build(),
            )
        });
        let client = mock_client!(aws_sdk_sesv2, [&rule]);

        let err = delivery(client).send(ALERT_SUBJECT, BODY).await.unwrap_err();

        assert_matches!(err, NotificationError::Email(_));
        assert_eq!(rule.num_calls(), 1);
    }
}
