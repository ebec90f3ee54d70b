//! Constants for motion classification
//!
//! Every default threshold and buffer capacity lives here, with the units in
//! the name. `MotionConfig::default()` is assembled from these values.
//!
//! ## Organization
//!
//! - **Motion**: acceleration and rotation thresholds per state and gesture
//! - **Time**: dwell times, timeouts and episode windows
//! - **Buffers**: compile-time capacities of the fixed-size buffers
//!
//! Thresholds were tuned against recorded handling sessions of the toy
//! (desk, hand, throw, shake, roll). Treat them as a validated starting
//! point rather than a hard contract.

/// Acceleration, rotation and statistic thresholds.
pub mod motion;

/// Dwell times, timeouts and episode windows.
pub mod time;

/// Buffer capacities for the allocation-free ingest path.
pub mod buffers;

// Re-export commonly used constants for convenience
pub use motion::{
    STANDARD_GRAVITY_MS2, STATIONARY_LINEAR_ACCEL_MAX, STATIONARY_GYRO_MAX,
    HELD_STILL_LINEAR_ACCEL_MAX, HELD_STILL_GYRO_MAX, FREE_FALL_ACCEL_THRESHOLD,
    PEAK_MAGNITUDE_FOR_SHAKE,
};

pub use time::{
    MS_PER_SECOND, MIN_STATE_DURATION_MS, STATIONARY_MIN_DURATION_MS,
    STATIONARY_VARIANCE_TIMEOUT_MS,
};

pub use buffers::{
    HISTORY_CAPACITY, STATIONARY_SAMPLE_CAPACITY, PATTERN_HISTORY_CAPACITY,
    MAX_EVENTS_PER_SAMPLE,
};
