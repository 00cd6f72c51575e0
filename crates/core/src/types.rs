//! Forecast domain types shared across the workspace.

use chrono::{DateTime, Utc};
use validator::Validate;

/// Shorthand for the UTC timestamp type used throughout the workspace.
pub type Timestamp = DateTime<Utc>;

/// Default latitude (central Wisconsin).
pub const DEFAULT_LATITUDE: f64 = 44.42085921856718;

/// Default longitude (central Wisconsin).
pub const DEFAULT_LONGITUDE: f64 = -89.8140888229648;

/// Latitude/longitude pair in floating point degrees.
#[derive(Debug, Clone, Copy, PartialEq, Validate)]
pub struct Location {
    #[validate(range(min = -90.0, max = 90.0))]
    pub latitude: f64,
    #[validate(range(min = -180.0, max = 180.0))]
    pub longitude: f64,
}

impl Location {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

impl Default for Location {
    fn default() -> Self {
        Self::new(DEFAULT_LATITUDE, DEFAULT_LONGITUDE)
    }
}

/// One forecast entry: an absolute instant and the temperature predicted for it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ForecastPoint {
    pub timestamp: Timestamp,
    /// Degrees Fahrenheit.
    pub temperature: f64,
}

/// Forecast entries in the order the provider returned them.
///
/// The provider promises ascending timestamps, but nothing here relies on
/// it; see [`ForecastSeries::is_chronological`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ForecastSeries {
    points: Vec<ForecastPoint>,
}

impl ForecastSeries {
    pub fn new(points: Vec<ForecastPoint>) -> Self {
        Self { points }
    }

    pub fn points(&self) -> &[ForecastPoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// `true` when timestamps never decrease from one entry to the next.
    pub fn is_chronological(&self) -> bool {
        self.points
            .windows(2)
            .all(|pair| pair[0].timestamp <= pair[1].timestamp)
    }
}

impl From<Vec<ForecastPoint>> for ForecastSeries {
    fn from(points: Vec<ForecastPoint>) -> Self {
        Self::new(points)
    }
}
