//! Alert threshold derived from the configured buffer.

/// Freezing point of water in degrees Fahrenheit.
pub const FREEZING_POINT_F: f64 = 32.0;

/// Temperature at or below which an alert fires: 32°F plus a buffer.
///
/// A positive buffer raises the threshold so frost-sensitive setups are
/// warned before the forecast actually reaches freezing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AlertThreshold {
    buffer_degrees: i32,
}

impl AlertThreshold {
    pub fn new(buffer_degrees: i32) -> Self {
        Self { buffer_degrees }
    }

    /// Configured buffer in whole degrees Fahrenheit.
    pub fn buffer_degrees(&self) -> i32 {
        self.buffer_degrees
    }

    /// Threshold temperature in degrees Fahrenheit.
    pub fn fahrenheit(&self) -> f64 {
        FREEZING_POINT_F + f64::from(self.buffer_degrees)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_threshold_is_freezing() {
        assert_eq!(AlertThreshold::default().fahrenheit(), 32.0);
    }

    #[test]
    fn buffer_is_added_to_freezing_point() {
        assert_eq!(AlertThreshold::new(5).fahrenheit(), 37.0);
        assert_eq!(AlertThreshold::new(-4).fahrenheit(), 28.0);
    }
}
