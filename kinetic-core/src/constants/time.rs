//! Time-Related Constants
//!
//! All durations are milliseconds of reading time.

/// Milliseconds per second.
pub const MS_PER_SECOND: u64 = 1000;

// ===== DEBOUNCE =====

/// Minimum dwell before a candidate becomes the confirmed state.
///
/// Doubled for STATIONARY <-> HELD_STILL, the most flicker-prone pair.
pub const MIN_STATE_DURATION_MS: u64 = 400;

/// Minimum length of a STATIONARY candidacy before it may be confirmed.
pub const STATIONARY_MIN_DURATION_MS: u64 = 1000;

/// High-variance time after which a STATIONARY candidacy is abandoned.
pub const STATIONARY_VARIANCE_TIMEOUT_MS: u64 = 8000;

// ===== FREE FALL / IMPACT =====

/// Flight time before a free fall can be classified as a throw.
pub const FREE_FALL_MIN_DURATION_MS: u64 = 40;

/// Longest plausible flight for a hand-thrown toy.
pub const FREE_FALL_MAX_DURATION_MS: u64 = 2000;

/// How long after a flight ends a spike still counts as its impact.
pub const IMPACT_WINDOW_MS: u64 = 500;

// ===== THROW / CATCH =====

/// How far before free-fall entry a launch spike is searched for.
pub const THROW_LOOKBACK_MS: u64 = 500;

/// Time after impact within which settling means "caught".
pub const CATCH_SETTLE_WINDOW_MS: u64 = 800;

// ===== ROLLING =====

/// Rolling episode length before ROLLING is reported.
pub const ROLLING_MIN_DURATION_MS: u64 = 500;
