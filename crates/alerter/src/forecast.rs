//! Forecast retrieval from the OpenWeather 5-day / 3-hour API.
//!
//! [`OpenWeatherClient`] issues a single GET per call, asking the provider
//! for Fahrenheit directly (`units=imperial`) so no conversion happens
//! locally. There is no retry, caching or pagination: the provider returns
//! one bounded list.

use std::time::Duration;

use async_trait::async_trait;
use chrono::DateTime;
use serde::Deserialize;

use frostwatch_core::types::{ForecastPoint, ForecastSeries, Location};

// ---------------------------------------------------------------------------
// Error
// ---------------------------------------------------------------------------

/// Errors from the forecast layer.
#[derive(Debug, thiserror::Error)]
pub enum ForecastError {
    /// The request could not be sent or the response not received
    /// (network, DNS, TLS, timeout).
    #[error("Forecast request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The provider answered with a non-success status.
    #[error("Failed to fetch weather data ({status}): {body}")]
    Fetch {
        /// HTTP status code.
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },

    /// The response body was not a forecast list.
    #[error("Malformed forecast response: {0}")]
    Decode(#[from] serde_json::Error),

    /// An entry's `dt` is outside the representable range.
    #[error("Forecast entry has invalid timestamp {0}")]
    InvalidTimestamp(i64),
}

// ---------------------------------------------------------------------------
// ForecastSource
// ---------------------------------------------------------------------------

/// Anything that can produce a forecast series for a location.
#[async_trait]
pub trait ForecastSource: Send + Sync {
    async fn fetch(&self, location: &Location) -> Result<ForecastSeries, ForecastError>;
}

// ---------------------------------------------------------------------------
// Wire format
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct ForecastResponse {
    list: Vec<ForecastEntry>,
}

#[derive(Debug, Deserialize)]
struct ForecastEntry {
    /// Unix timestamp, seconds.
    dt: i64,
    main: MainReadings,
}

#[derive(Debug, Deserialize)]
struct MainReadings {
    temp: f64,
}

impl ForecastResponse {
    fn into_series(self) -> Result<ForecastSeries, ForecastError> {
        self.list
            .into_iter()
            .map(|entry| -> Result<ForecastPoint, ForecastError> {
                let timestamp = DateTime::from_timestamp(entry.dt, 0)
                    .ok_or(ForecastError::InvalidTimestamp(entry.dt))?;
                Ok(ForecastPoint {
                    timestamp,
                    temperature: entry.main.temp,
                })
            })
            .collect::<Result<Vec<_>, ForecastError>>()
            .map(ForecastSeries::new)
    }
}

/// Decode a raw OpenWeather forecast body into a series, keeping entry order.
pub fn parse_forecast(body: &str) -> Result<ForecastSeries, ForecastError> {
    serde_json::from_str::<ForecastResponse>(body)?.into_series()
}

// ---------------------------------------------------------------------------
// OpenWeatherClient
// ---------------------------------------------------------------------------

/// HTTP client for the OpenWeather forecast endpoint.
pub struct OpenWeatherClient {
    client: reqwest::Client,
    api_url: String,
    api_key: String,
}

impl OpenWeatherClient {
    /// Create a client whose requests time out after `timeout`.
    ///
    /// An expired timeout surfaces as [`ForecastError::Transport`].
    pub fn new(api_url: String, api_key: String, timeout: Duration) -> Result<Self, ForecastError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self::with_client(client, api_url, api_key))
    }

    /// Create a client reusing an existing [`reqwest::Client`].
    pub fn with_client(client: reqwest::Client, api_url: String, api_key: String) -> Self {
        Self {
            client,
            api_url,
            api_key,
        }
    }
}

#[async_trait]
impl ForecastSource for OpenWeatherClient {
    async fn fetch(&self, location: &Location) -> Result<ForecastSeries, ForecastError> {
        let lat = location.latitude.to_string();
        let lon = location.longitude.to_string();

        let response = self
            .client
            .get(&self.api_url)
            .query(&[
                ("lat", lat.as_str()),
                ("lon", lon.as_str()),
                ("appid", self.api_key.as_str()),
                ("units", "imperial"),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            tracing::debug!(status = status.as_u16(), body = %body, "Forecast request rejected");
            return Err(ForecastError::Fetch {
                status: status.as_u16(),
                body,
            });
        }

        let body = response.text().await?;
        tracing::debug!(status = status.as_u16(), body = %body, "Forecast response received");

        let series = parse_forecast(&body)?;
        tracing::info!(entries = series.len(), "Forecast fetched");
        Ok(series)
    }
}
