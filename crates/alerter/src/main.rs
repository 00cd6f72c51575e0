//! `frostwatch-alerter` -- one-shot frost alert run.
//!
//! Meant to be fired by an external scheduler (cron, systemd timer,
//! EventBridge). Each run fetches the forecast for the configured
//! location, and if a freezing temperature is due within the next 8 hours,
//! sends an alert by SES email and SNS topic. The invocation response is
//! printed to stdout as JSON.
//!
//! See [`AlerterConfig::from_env`] for the environment variables read.
//! AWS credentials and region come from the standard AWS provider chain.

use std::sync::Arc;

use frostwatch_alerter::config::AlerterConfig;
use frostwatch_alerter::coordinator::{Coordinator, InvocationContext, STATUS_OK};
use frostwatch_alerter::forecast::OpenWeatherClient;
use frostwatch_core::threshold::AlertThreshold;
use frostwatch_notify::delivery::email::EmailDelivery;
use frostwatch_notify::delivery::topic::TopicDelivery;
use frostwatch_notify::Notifier;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "frostwatch_alerter=info,frostwatch_notify=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = AlerterConfig::from_env().unwrap_or_else(|e| {
        tracing::error!(error = %e, "Invalid configuration");
        std::process::exit(1);
    });

    tracing::info!(
        latitude = config.location.latitude,
        longitude = config.location.longitude,
        buffer = config.buffer_degrees,
        "Starting frostwatch-alerter",
    );

    let forecast = OpenWeatherClient::new(
        config.forecast_url.clone(),
        config.api_key.clone(),
        config.forecast_timeout,
    )
    .unwrap_or_else(|e| {
        tracing::error!(error = %e, "Failed to build forecast HTTP client");
        std::process::exit(1);
    });

    let aws = aws_config::load_from_env().await;
    let email = EmailDelivery::new(&aws, config.sender.clone(), config.recipient.clone());
    let topic = TopicDelivery::new(&aws, config.topic_arn.clone());

    let coordinator = Coordinator::new(
        Arc::new(forecast),
        Notifier::new(Arc::new(email), Arc::new(topic)),
        config.location,
        AlertThreshold::new(config.buffer_degrees),
    );

    let response = coordinator
        .handle(&serde_json::json!({}), &InvocationContext::new())
        .await;

    match serde_json::to_string(&response) {
        Ok(json) => println!("{json}"),
        Err(e) => tracing::error!(error = %e, "Failed to serialise invocation response"),
    }

    if response.status_code != STATUS_OK {
        std::process::exit(1);
    }
}
