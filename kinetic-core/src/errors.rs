//! Error types for configuration and sensor access
//!
//! ## Design Philosophy
//!
//! Classification itself never fails. Malformed channels are absorbed at the
//! reading boundary (zeroed, confidence reduced) and the classifier keeps
//! running. Only two things surface as errors:
//!
//! 1. **Bad configuration**: rejected once, at construction, so the
//!    classifier never runs with nonsensical thresholds.
//! 2. **Sensor unavailability**: reported by an adapter. The caller sees it,
//!    the confirmed state stays where it was.
//!
//! Both enums are `Copy` and carry only `&'static str` context so they can be
//! returned from the hot path without allocation.
//!
//! ```rust
//! use kinetic_core::{ConfigError, MotionClassifier, MotionConfig};
//!
//! let mut config = MotionConfig::default();
//! config.shake_history_size = 0;
//!
//! match MotionClassifier::new(config) {
//!     Err(ConfigError::ZeroWindow { name }) => assert_eq!(name, "shake_history_size"),
//!     _ => unreachable!(),
//! }
//! ```

use thiserror_no_std::Error;

/// Result type for configuration checks
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Configuration rejected at construction time
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum ConfigError {
    /// A threshold that must be positive or zero is negative
    #[error("Threshold {name} is negative: {value}")]
    NegativeThreshold {
        /// Field name in `MotionConfig`
        name: &'static str,
        /// Offending value
        value: f32,
    },

    /// A threshold is NaN or infinite
    #[error("Threshold {name} is not a finite number")]
    NonFiniteThreshold {
        /// Field name in `MotionConfig`
        name: &'static str,
    },

    /// A window or sample count is zero
    #[error("Window {name} must be non-zero")]
    ZeroWindow {
        /// Field name in `MotionConfig`
        name: &'static str,
    },

    /// A window is larger than the buffer backing it
    #[error("Window {name} exceeds capacity {max}")]
    WindowTooLarge {
        /// Field name in `MotionConfig`
        name: &'static str,
        /// Compile-time capacity of the backing buffer
        max: usize,
    },

    /// A window is too short for the statistic computed over it
    #[error("Window {name} must be at least {min}")]
    WindowTooSmall {
        /// Field name in `MotionConfig`
        name: &'static str,
        /// Smallest usable size
        min: usize,
    },

    /// A lower bound is above its upper bound
    #[error("Threshold {low} must not exceed {high}")]
    InvertedRange {
        /// Field expected to be the smaller one
        low: &'static str,
        /// Field expected to be the larger one
        high: &'static str,
    },

    /// A hysteresis factor below 1.0 would narrow the exit band
    #[error("Factor {name} must be at least 1.0")]
    InvalidFactor {
        /// Field name in `MotionConfig`
        name: &'static str,
    },

    /// A ratio outside [0, 1]
    #[error("Ratio {name} must lie in [0, 1]")]
    NotAFraction {
        /// Field name in `MotionConfig`
        name: &'static str,
    },
}

/// Failure reported by a sensor adapter
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SensorError {
    /// Sensor not responding or not initialised
    #[error("Sensor unavailable")]
    Unavailable,

    /// Read did not complete in time
    #[error("Sensor read timed out")]
    Timeout,

    /// Transport error on the bus
    #[error("Sensor bus error: {reason}")]
    Bus {
        /// Short description from the driver
        reason: &'static str,
    },
}

#[cfg(feature = "defmt")]
impl defmt::Format for ConfigError {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            Self::NegativeThreshold { name, value } =>
                defmt::write!(fmt, "{} negative: {}", name, value),
            Self::NonFiniteThreshold { name } =>
                defmt::write!(fmt, "{} not finite", name),
            Self::ZeroWindow { name } =>
                defmt::write!(fmt, "{} is zero", name),
            Self::WindowTooLarge { name, max } =>
                defmt::write!(fmt, "{} exceeds {}", name, max),
            Self::WindowTooSmall { name, min } =>
                defmt::write!(fmt, "{} below {}", name, min),
            Self::InvertedRange { low, high } =>
                defmt::write!(fmt, "{} > {}", low, high),
            Self::InvalidFactor { name } =>
                defmt::write!(fmt, "{} below 1.0", name),
            Self::NotAFraction { name } =>
                defmt::write!(fmt, "{} outside [0, 1]", name),
        }
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for SensorError {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            Self::Unavailable => defmt::write!(fmt, "Sensor unavailable"),
            Self::Timeout => defmt::write!(fmt, "Sensor timeout"),
            Self::Bus { reason } => defmt::write!(fmt, "Bus error: {}", reason),
        }
    }
}
