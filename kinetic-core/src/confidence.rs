//! Classification confidence
//!
//! Each classification carries a score in [0, 1] describing how much the
//! input can be trusted. It never changes the state; it tells consumers
//! when the sensor is degraded, e.g. uncalibrated or returning malformed
//! channels.
//!
//! ```text
//! confidence = 0.5^degraded_channels × accuracy_factor
//!
//! accuracy_factor: Unreliable 0.25, Low 0.5, Medium 0.75, High/unknown 1.0
//! ```
//!
//! Stored as 16-bit fixed point so a score is cheap to copy and compare.

use crate::reading::Reading;

/// Confidence score in range [0, 1]
///
/// 0-65535 maps to 0.0-1.0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct ConfidenceScore {
    value: u16,
}

impl ConfidenceScore {
    /// Maximum confidence (100%)
    pub const MAX_CONFIDENCE: Self = Self { value: 65535 };

    /// No confidence (0%)
    pub const ZERO: Self = Self { value: 0 };

    /// Below this, treat the reading as degraded (60%)
    pub const DEGRADED_THRESHOLD: Self = Self { value: 39321 };

    /// Create from floating point value, clamped to [0, 1]
    pub fn from_float(confidence: f32) -> Self {
        let clamped = if confidence.is_nan() {
            0.0
        } else {
            confidence.clamp(0.0, 1.0)
        };
        Self {
            value: (clamped * 65535.0 + 0.5) as u16,
        }
    }

    /// Convert to floating point [0, 1]
    pub fn as_float(&self) -> f32 {
        self.value as f32 / 65535.0
    }

    /// Get raw fixed-point value
    pub fn value(&self) -> u16 {
        self.value
    }

    /// True when the input should be treated as degraded
    pub fn is_degraded(&self) -> bool {
        *self < Self::DEGRADED_THRESHOLD
    }

    /// Score a reading from its degraded channels and reported accuracy
    pub fn for_reading(reading: &Reading) -> Self {
        let mut score = 1.0_f32;
        for _ in 0..reading.degraded_channels {
            score *= 0.5;
        }
        if let Some(accuracy) = reading.accuracy {
            score *= accuracy.confidence_factor();
        }
        Self::from_float(score)
    }
}

impl Default for ConfidenceScore {
    fn default() -> Self {
        Self::MAX_CONFIDENCE
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reading::{Channel, ReadingBuilder, SensorAccuracy, Vec3};

    fn complete(t: u64) -> ReadingBuilder {
        ReadingBuilder::new(t)
            .raw_acceleration(Vec3::new(0.0, 0.0, 9.81))
            .linear_acceleration(Vec3::new(0.02, 0.0, 0.0))
            .angular_velocity(Vec3::new(0.01, 0.0, 0.0))
    }

    #[test]
    fn float_conversion() {
        let score = ConfidenceScore::from_float(0.75);
        assert!((score.as_float() - 0.75).abs() < 0.001);

        assert_eq!(ConfidenceScore::from_float(1.5), ConfidenceScore::MAX_CONFIDENCE);
        assert_eq!(ConfidenceScore::from_float(-0.5), ConfidenceScore::ZERO);
        assert_eq!(ConfidenceScore::from_float(f32::NAN), ConfidenceScore::ZERO);
    }

    #[test]
    fn clean_reading_is_fully_trusted() {
        let reading = complete(0).build();
        assert_eq!(ConfidenceScore::for_reading(&reading), ConfidenceScore::MAX_CONFIDENCE);
    }

    #[test]
    fn missing_channel_halves_confidence() {
        let reading = ReadingBuilder::new(0)
            .linear_acceleration(Vec3::new(0.02, 0.0, 0.0))
            .angular_velocity(Vec3::new(0.01, 0.0, 0.0))
            .build();
        let score = ConfidenceScore::for_reading(&reading);
        assert!((score.as_float() - 0.5).abs() < 0.001);
        assert!(score.is_degraded());
    }

    #[test]
    fn malformed_channel_halves_confidence() {
        let reading = complete(0)
            .channel_slice(Channel::LinearAcceleration, &[1.0])
            .build();
        let score = ConfidenceScore::for_reading(&reading);
        assert!((score.as_float() - 0.5).abs() < 0.001);
        assert!(score.is_degraded());
    }

    #[test]
    fn poor_accuracy_reduces_confidence() {
        let reading = complete(0)
            .accuracy(SensorAccuracy::Medium)
            .build();
        let score = ConfidenceScore::for_reading(&reading);
        assert!((score.as_float() - 0.75).abs() < 0.001);
        assert!(!score.is_degraded());

        let unreliable = complete(0)
            .accuracy(SensorAccuracy::Unreliable)
            .build();
        assert!(ConfidenceScore::for_reading(&unreliable).is_degraded());
    }
}
