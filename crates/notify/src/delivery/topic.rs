//! Topic alert delivery via Amazon SNS.

use async_trait::async_trait;
use aws_sdk_sns::error::DisplayErrorContext;

use crate::channel::{AlertChannel, NotificationError};

/// Publishes alerts to a single SNS topic.
pub struct TopicDelivery {
    client: aws_sdk_sns::Client,
    topic_arn: String,
}

impl TopicDelivery {
    /// Create a delivery service from a shared AWS configuration.
    pub fn new(sdk_config: &aws_config::SdkConfig, topic_arn: String) -> Self {
        Self::with_client(aws_sdk_sns::Client::new(sdk_config), topic_arn)
    }

    /// Create a delivery service reusing an existing SNS client.
    pub fn with_client(client: aws_sdk_sns::Client, topic_arn: String) -> Self {
        Self { client, topic_arn }
    }

    pub fn topic_arn(&self) -> &str {
        &self.topic_arn
    }
}

#[async_trait]
impl AlertChannel for TopicDelivery {
    fn name(&self) -> &'static str {
        "topic"
    }

    async fn send(&self, subject: &str, body: &str) -> Result<(), NotificationError> {
        let output = self
            .client
            .publish()
            .topic_arn(&self.topic_arn)
            .subject(subject)
            .message(body)
            .send()
            .await
            .map_err(|e| NotificationError::Publish(DisplayErrorContext(&e).to_string()))?;

        tracing::info!(
            topic_arn = %self.topic_arn,
            message_id = output.message_id().unwrap_or("-"),
            "Alert published to topic",
        );
        Ok(())
    }
}
