//! Buffer Capacities
//!
//! Compile-time sizes of the fixed buffers on the ingest path. Configured
//! windows are validated against these at construction.

/// Readings retained in `MotionHistory`.
///
/// Must cover the largest detector window (shake, 30 by default) plus the
/// throw lookback at ~100 Hz. 64 × ~64 bytes ≈ 4 KB.
pub const HISTORY_CAPACITY: usize = 64;

/// Magnitude samples kept by the STATIONARY candidate tracker.
pub const STATIONARY_SAMPLE_CAPACITY: usize = 16;

/// Most recent pattern events retained for "time since last" queries.
pub const PATTERN_HISTORY_CAPACITY: usize = 8;

/// Pattern events a single ingest can produce.
///
/// THROW, ROLLING, ARC_SWING and SHAKE are mutually exclusive in practice,
/// CATCH/DROP may accompany one of them.
pub const MAX_EVENTS_PER_SAMPLE: usize = 4;

/// Consecutive settle samples the landing resolver can require.
pub const MAX_CATCH_SETTLE_SAMPLES: usize = 16;
