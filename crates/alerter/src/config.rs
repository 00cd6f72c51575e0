use std::fmt;
use std::time::Duration;

use frostwatch_core::types::Location;
use lettre::message::Mailbox;
use validator::Validate;

/// Default OpenWeather 5-day / 3-hour forecast endpoint.
pub const DEFAULT_FORECAST_URL: &str = "https://api.openweathermap.org/data/2.5/forecast";

/// Default timeout for the forecast request, in seconds.
const DEFAULT_FORECAST_TIMEOUT_SECS: u64 = 10;

/// Error raised while loading [`AlerterConfig`].
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} environment variable is required")]
    Missing(&'static str),

    #[error("{var} is invalid: {reason}")]
    Invalid { var: &'static str, reason: String },
}

/// Alerter configuration loaded from environment variables.
///
/// Read once at process start and never mutated afterwards.
#[derive(Clone)]
pub struct AlerterConfig {
    /// OpenWeather API key.
    pub api_key: String,
    pub location: Location,
    /// SES sender, bare address or `Name <address>`.
    pub sender: Mailbox,
    /// SES recipient, same forms as the sender.
    pub recipient: Mailbox,
    pub topic_arn: String,
    /// Degrees added to 32°F before comparing.
    pub buffer_degrees: i32,
    pub forecast_url: String,
    pub forecast_timeout: Duration,
}

impl fmt::Debug for AlerterConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AlerterConfig")
            .field("api_key", &"<redacted>")
            .field("location", &self.location)
            .field("sender", &self.sender)
            .field("recipient", &self.recipient)
            .field("topic_arn", &self.topic_arn)
            .field("buffer_degrees", &self.buffer_degrees)
            .field("forecast_url", &self.forecast_url)
            .field("forecast_timeout", &self.forecast_timeout)
            .finish()
    }
}

impl AlerterConfig {
    /// Load configuration from the process environment.
    ///
    /// | Env Var                 | Required | Default                 |
    /// |-------------------------|----------|-------------------------|
    /// | `OPENWEATHER_API_KEY`   | yes      | --                      |
    /// | `LAT`                   | no       | `44.42085921856718`     |
    /// | `LON`                   | no       | `-89.8140888229648`     |
    /// | `SES_SENDER_EMAIL`      | yes      | --                      |
    /// | `SES_RECIPIENT_EMAIL`   | yes      | --                      |
    /// | `SNS_TOPIC_ARN`         | yes      | --                      |
    /// | `BUFFER_TEMP`           | no       | `0`                     |
    /// | `FORECAST_API_URL`      | no       | OpenWeather forecast    |
    /// | `FORECAST_TIMEOUT_SECS` | no       | `10`                    |
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    ///
    /// Blank values are treated the same as unset ones.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };
        let require = |key: &'static str| get(key).ok_or(ConfigError::Missing(key));

        let api_key = require("OPENWEATHER_API_KEY")?;

        let defaults = Location::default();
        let location = Location::new(
            parse_or("LAT", get("LAT"), defaults.latitude)?,
            parse_or("LON", get("LON"), defaults.longitude)?,
        );
        location.validate().map_err(|e| ConfigError::Invalid {
            var: "LAT/LON",
            reason: e.to_string(),
        })?;

        let sender = parse_mailbox("SES_SENDER_EMAIL", require("SES_SENDER_EMAIL")?)?;
        let recipient = parse_mailbox("SES_RECIPIENT_EMAIL", require("SES_RECIPIENT_EMAIL")?)?;
        let topic_arn = require("SNS_TOPIC_ARN")?;

        let buffer_degrees = parse_or("BUFFER_TEMP", get("BUFFER_TEMP"), 0)?;
        let forecast_url =
            get("FORECAST_API_URL").unwrap_or_else(|| DEFAULT_FORECAST_URL.to_string());
        let timeout_secs = parse_or(
            "FORECAST_TIMEOUT_SECS",
            get("FORECAST_TIMEOUT_SECS"),
            DEFAULT_FORECAST_TIMEOUT_SECS,
        )?;

        Ok(Self {
            api_key,
            location,
            sender,
            recipient,
            topic_arn,
            buffer_degrees,
            forecast_url,
            forecast_timeout: Duration::from_secs(timeout_secs),
        })
    }
}

fn parse_or<T>(var: &'static str, raw: Option<String>, default: T) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: fmt::Display,
{
    match raw {
        Some(value) => value.parse().map_err(|e: T::Err| ConfigError::Invalid {
            var,
            reason: format!("{value:?}: {e}"),
        }),
        None => Ok(default),
    }
}

fn parse_mailbox(var: &'static str, raw: String) -> Result<Mailbox, ConfigError> {
    raw.parse().map_err(|e: lettre::address::AddressError| ConfigError::Invalid {
        var,
        reason: format!("{raw:?}: {e}"),
    })
}
