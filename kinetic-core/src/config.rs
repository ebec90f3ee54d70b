//! Classifier configuration
//!
//! A flat table of thresholds, built once and handed to
//! `MotionClassifier::new`. There is no global threshold state: two
//! classifiers with different tuning can run side by side.
//!
//! With the `std` feature the table is (de)serializable and every field is
//! optional in the serialized form, so a tuning file only needs to name what
//! it changes:
//!
//! ```rust
//! # #[cfg(feature = "std")] {
//! use kinetic_core::MotionConfig;
//!
//! let json = r#"{ "peak_magnitude_for_shake": 14.0, "min_state_duration_ms": 300 }"#;
//! let config: MotionConfig = serde_json::from_str(json).unwrap();
//!
//! assert_eq!(config.peak_magnitude_for_shake, 14.0);
//! assert_eq!(config.min_state_duration_ms, 300);
//! assert_eq!(config.stationary_gyro_max, MotionConfig::default().stationary_gyro_max);
//! assert!(config.validate().is_ok());
//! # }
//! ```
//!
//! Accelerations are m/s², angular rates rad/s, durations milliseconds.

use crate::constants::buffers::{
    HISTORY_CAPACITY, MAX_CATCH_SETTLE_SAMPLES, STATIONARY_SAMPLE_CAPACITY,
};
use crate::constants::motion::*;
use crate::constants::time::*;
use crate::errors::{ConfigError, ConfigResult};
use crate::state::MotionState;

/// Threshold table for every detector
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct MotionConfig {
    /// Linear acceleration ceiling for STATIONARY
    pub stationary_linear_accel_max: f32,
    /// Angular velocity ceiling for STATIONARY
    pub stationary_gyro_max: f32,
    /// Rotation speed ceiling for STATIONARY
    pub stationary_rot_speed_max: f32,
    /// Minimum STATIONARY candidacy before confirmation
    pub stationary_min_duration_ms: u64,
    /// Samples the variance gate examines
    pub stationary_consistency_required: usize,
    /// Variance ceiling for the gate
    pub stationary_max_variance: f32,
    /// High-variance time after which a candidacy is dropped
    pub stationary_variance_timeout_ms: u64,
    /// Multiplier on STATIONARY limits when leaving STATIONARY
    pub stationary_exit_hysteresis: f32,

    /// Linear acceleration ceiling for HELD_STILL
    pub held_still_linear_accel_max: f32,
    /// Angular velocity ceiling for HELD_STILL
    pub held_still_gyro_max: f32,
    /// Rotation speed ceiling for HELD_STILL
    pub held_still_rot_speed_max: f32,
    /// Multiplier on HELD_STILL limits when leaving a low-motion state
    pub hysteresis_factor: f32,

    /// Dwell before a candidate is confirmed
    pub min_state_duration_ms: u64,
    /// Readings averaged by the candidate resolver
    pub smoothing_window: usize,

    /// Raw magnitude below which the device is near weightless
    pub free_fall_accel_threshold: f32,
    /// Gyro floor for a tumbling fall
    pub free_fall_min_rotation: f32,
    /// Gyro ceiling for a fall (above is a spin)
    pub free_fall_max_rotation: f32,
    /// Linear acceleration ceiling in flight
    pub free_fall_linear_accel_max: f32,
    /// Flight time before a throw can be recognised
    pub free_fall_min_duration_ms: u64,
    /// Longest flight treated as a throw or drop
    pub free_fall_max_duration_ms: u64,
    /// Consecutive low samples that declare free fall without rotation
    pub free_fall_accel_consistency_samples: usize,

    /// Spike marking the end of a flight
    pub impact_accel_threshold: f32,
    /// Time after a flight in which a spike is its impact
    pub impact_window_ms: u64,
    /// Spike marking an impact with no flight
    pub standalone_impact_threshold: f32,

    /// Launch spike preceding a throw
    pub throw_launch_threshold: f32,
    /// Launch search window before free-fall entry
    pub throw_lookback_ms: u64,
    /// Consecutive low-motion samples that count as settled
    pub catch_settle_samples: usize,
    /// Time after impact within which settling is a catch
    pub catch_settle_window_ms: u64,

    /// Samples examined by the shake detector
    pub shake_history_size: usize,
    /// Peak a shake window must reach
    pub peak_magnitude_for_shake: f32,
    /// Mean a shake window must sustain
    pub min_magnitude_for_shake: f32,
    /// Reversals a shake window must contain
    pub min_accel_reversals_for_shake: usize,
    /// Noise delta for reversal counting
    pub reversal_delta: f32,

    /// Samples examined by the arc detector
    pub arc_window: usize,
    /// Mean gyro for an arc
    pub arc_rotation_threshold: f32,
    /// Mean linear acceleration for an arc
    pub arc_min_linear_accel: f32,
    /// Gyro standard deviation ceiling for an arc
    pub arc_max_gyro_std_dev: f32,
    /// Gyro reversals tolerated in an arc
    pub arc_max_reversals: usize,

    /// Samples examined by the rolling detector
    pub rolling_window: usize,
    /// Gyro floor while rolling
    pub rolling_min_gyro: f32,
    /// Linear acceleration ceiling while rolling
    pub rolling_max_linear_accel: f32,
    /// Share of rotation on the dominant axis
    pub rolling_axis_dominance: f32,
    /// Dominant-axis sign flips tolerated
    pub rolling_max_axis_flips: usize,
    /// Episode length before ROLLING is reported
    pub rolling_min_duration_ms: u64,
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self {
            stationary_linear_accel_max: STATIONARY_LINEAR_ACCEL_MAX,
            stationary_gyro_max: STATIONARY_GYRO_MAX,
            stationary_rot_speed_max: STATIONARY_ROT_SPEED_MAX,
            stationary_min_duration_ms: STATIONARY_MIN_DURATION_MS,
            stationary_consistency_required: STATIONARY_CONSISTENCY_REQUIRED,
            stationary_max_variance: STATIONARY_MAX_VARIANCE,
            stationary_variance_timeout_ms: STATIONARY_VARIANCE_TIMEOUT_MS,
            stationary_exit_hysteresis: STATIONARY_EXIT_HYSTERESIS,

            held_still_linear_accel_max: HELD_STILL_LINEAR_ACCEL_MAX,
            held_still_gyro_max: HELD_STILL_GYRO_MAX,
            held_still_rot_speed_max: HELD_STILL_ROT_SPEED_MAX,
            hysteresis_factor: HYSTERESIS_FACTOR,

            min_state_duration_ms: MIN_STATE_DURATION_MS,
            smoothing_window: SMOOTHING_WINDOW,

            free_fall_accel_threshold: FREE_FALL_ACCEL_THRESHOLD,
            free_fall_min_rotation: FREE_FALL_MIN_ROTATION,
            free_fall_max_rotation: FREE_FALL_MAX_ROTATION,
            free_fall_linear_accel_max: FREE_FALL_LINEAR_ACCEL_MAX,
            free_fall_min_duration_ms: FREE_FALL_MIN_DURATION_MS,
            free_fall_max_duration_ms: FREE_FALL_MAX_DURATION_MS,
            free_fall_accel_consistency_samples: FREE_FALL_ACCEL_CONSISTENCY_SAMPLES,

            impact_accel_threshold: IMPACT_ACCEL_THRESHOLD,
            impact_window_ms: IMPACT_WINDOW_MS,
            standalone_impact_threshold: STANDALONE_IMPACT_THRESHOLD,

            throw_launch_threshold: THROW_LAUNCH_THRESHOLD,
            throw_lookback_ms: THROW_LOOKBACK_MS,
            catch_settle_samples: CATCH_SETTLE_SAMPLES,
            catch_settle_window_ms: CATCH_SETTLE_WINDOW_MS,

            shake_history_size: SHAKE_HISTORY_SIZE,
            peak_magnitude_for_shake: PEAK_MAGNITUDE_FOR_SHAKE,
            min_magnitude_for_shake: MIN_MAGNITUDE_FOR_SHAKE,
            min_accel_reversals_for_shake: MIN_ACCEL_REVERSALS_FOR_SHAKE,
            reversal_delta: REVERSAL_DELTA,

            arc_window: ARC_WINDOW,
            arc_rotation_threshold: ARC_ROTATION_THRESHOLD,
            arc_min_linear_accel: ARC_MIN_LINEAR_ACCEL,
            arc_max_gyro_std_dev: ARC_MAX_GYRO_STD_DEV,
            arc_max_reversals: ARC_MAX_REVERSALS,

            rolling_window: ROLLING_WINDOW,
            rolling_min_gyro: ROLLING_MIN_GYRO,
            rolling_max_linear_accel: ROLLING_MAX_LINEAR_ACCEL,
            rolling_axis_dominance: ROLLING_AXIS_DOMINANCE,
            rolling_max_axis_flips: ROLLING_MAX_AXIS_FLIPS,
            rolling_min_duration_ms: ROLLING_MIN_DURATION_MS,
        }
    }
}

impl MotionConfig {
    /// Reject nonsensical tuning
    ///
    /// Checks, in order: every float threshold is finite and non-negative,
    /// windows are non-zero and fit their buffers, hysteresis factors do not
    /// narrow the exit band, and paired bounds are ordered.
    pub fn validate(&self) -> ConfigResult<()> {
        let thresholds = [
            ("stationary_linear_accel_max", self.stationary_linear_accel_max),
            ("stationary_gyro_max", self.stationary_gyro_max),
            ("stationary_rot_speed_max", self.stationary_rot_speed_max),
            ("stationary_max_variance", self.stationary_max_variance),
            ("stationary_exit_hysteresis", self.stationary_exit_hysteresis),
            ("held_still_linear_accel_max", self.held_still_linear_accel_max),
            ("held_still_gyro_max", self.held_still_gyro_max),
            ("held_still_rot_speed_max", self.held_still_rot_speed_max),
            ("hysteresis_factor", self.hysteresis_factor),
            ("free_fall_accel_threshold", self.free_fall_accel_threshold),
            ("free_fall_min_rotation", self.free_fall_min_rotation),
            ("free_fall_max_rotation", self.free_fall_max_rotation),
            ("free_fall_linear_accel_max", self.free_fall_linear_accel_max),
            ("impact_accel_threshold", self.impact_accel_threshold),
            ("standalone_impact_threshold", self.standalone_impact_threshold),
            ("throw_launch_threshold", self.throw_launch_threshold),
            ("peak_magnitude_for_shake", self.peak_magnitude_for_shake),
            ("min_magnitude_for_shake", self.min_magnitude_for_shake),
            ("reversal_delta", self.reversal_delta),
            ("arc_rotation_threshold", self.arc_rotation_threshold),
            ("arc_min_linear_accel", self.arc_min_linear_accel),
            ("arc_max_gyro_std_dev", self.arc_max_gyro_std_dev),
            ("rolling_min_gyro", self.rolling_min_gyro),
            ("rolling_max_linear_accel", self.rolling_max_linear_accel),
            ("rolling_axis_dominance", self.rolling_axis_dominance),
        ];

        for (name, value) in thresholds {
            check_threshold(name, value)?;
        }

        let windows = [
            ("stationary_consistency_required", self.stationary_consistency_required, STATIONARY_SAMPLE_CAPACITY),
            ("smoothing_window", self.smoothing_window, HISTORY_CAPACITY),
            ("free_fall_accel_consistency_samples", self.free_fall_accel_consistency_samples, usize::MAX),
            ("catch_settle_samples", self.catch_settle_samples, MAX_CATCH_SETTLE_SAMPLES),
            ("shake_history_size", self.shake_history_size, HISTORY_CAPACITY),
            ("min_accel_reversals_for_shake", self.min_accel_reversals_for_shake, usize::MAX),
            ("arc_window", self.arc_window, HISTORY_CAPACITY),
            ("rolling_window", self.rolling_window, HISTORY_CAPACITY),
        ];

        for (name, value, max) in windows {
            if value == 0 {
                return Err(ConfigError::ZeroWindow { name });
            }
            if value > max {
                return Err(ConfigError::WindowTooLarge { name, max });
            }
        }

        // The variance of fewer than two samples is undefined
        if self.stationary_consistency_required < 2 {
            return Err(ConfigError::WindowTooSmall {
                name: "stationary_consistency_required",
                min: 2,
            });
        }

        if self.min_state_duration_ms == 0 {
            return Err(ConfigError::ZeroWindow { name: "min_state_duration_ms" });
        }

        for (name, factor) in [
            ("stationary_exit_hysteresis", self.stationary_exit_hysteresis),
            ("hysteresis_factor", self.hysteresis_factor),
        ] {
            if factor < 1.0 {
                return Err(ConfigError::InvalidFactor { name });
            }
        }

        if self.rolling_axis_dominance > 1.0 {
            return Err(ConfigError::NotAFraction { name: "rolling_axis_dominance" });
        }

        let ordered = [
            ("stationary_linear_accel_max", self.stationary_linear_accel_max,
             "held_still_linear_accel_max", self.held_still_linear_accel_max),
            ("stationary_gyro_max", self.stationary_gyro_max,
             "held_still_gyro_max", self.held_still_gyro_max),
            ("stationary_rot_speed_max", self.stationary_rot_speed_max,
             "held_still_rot_speed_max", self.held_still_rot_speed_max),
            ("free_fall_min_rotation", self.free_fall_min_rotation,
             "free_fall_max_rotation", self.free_fall_max_rotation),
            ("min_magnitude_for_shake", self.min_magnitude_for_shake,
             "peak_magnitude_for_shake", self.peak_magnitude_for_shake),
            ("held_still_linear_accel_max", self.held_still_linear_accel_max,
             "peak_magnitude_for_shake", self.peak_magnitude_for_shake),
        ];

        for (low, low_value, high, high_value) in ordered {
            if low_value > high_value {
                return Err(ConfigError::InvertedRange { low, high });
            }
        }

        if self.free_fall_min_duration_ms > self.free_fall_max_duration_ms {
            return Err(ConfigError::InvertedRange {
                low: "free_fall_min_duration_ms",
                high: "free_fall_max_duration_ms",
            });
        }

        Ok(())
    }

    /// Dwell for a transition between two states
    ///
    /// STATIONARY <-> HELD_STILL waits twice as long.
    pub fn dwell_ms(&self, from: MotionState, to: MotionState) -> u64 {
        use MotionState::{HeldStill, Stationary};

        match (from, to) {
            (Stationary, HeldStill) | (HeldStill, Stationary) => self.min_state_duration_ms * 2,
            _ => self.min_state_duration_ms,
        }
    }
}

fn check_threshold(name: &'static str, value: f32) -> ConfigResult<()> {
    if !value.is_finite() {
        return Err(ConfigError::NonFiniteThreshold { name });
    }
    if value < 0.0 {
        return Err(ConfigError::NegativeThreshold { name, value });
    }
    Ok(())
}
