//! Motion Thresholds
//!
//! Accelerations are in m/s², angular velocities and rotation speed in rad/s.
//! "Linear" acceleration has gravity removed; "raw" includes it.

// ===== REFERENCE =====

/// Standard gravity (m/s²).
///
/// A device at rest reads roughly this on the raw channel. Free fall is
/// recognised by the raw magnitude dropping far below it.
pub const STANDARD_GRAVITY_MS2: f32 = 9.80665;

// ===== STATIONARY (resting on a surface) =====

/// Maximum linear acceleration magnitude for STATIONARY (m/s²).
///
/// A device on a desk shows ~0.02-0.05 m/s² of sensor noise. 0.15 leaves
/// headroom for a vibrating table without admitting a hand-held device.
pub const STATIONARY_LINEAR_ACCEL_MAX: f32 = 0.15;

/// Maximum angular velocity magnitude for STATIONARY (rad/s).
pub const STATIONARY_GYRO_MAX: f32 = 0.05;

/// Maximum rotation speed for STATIONARY (rad/s).
pub const STATIONARY_ROT_SPEED_MAX: f32 = 0.05;

/// Maximum sample variance of the linear magnitude while confirming STATIONARY.
///
/// Measured over `STATIONARY_CONSISTENCY_REQUIRED` samples. Desk noise sits
/// around 1e-4; a hand trying to hold still is an order of magnitude above.
pub const STATIONARY_MAX_VARIANCE: f32 = 0.005;

/// Number of most recent samples the variance gate looks at.
pub const STATIONARY_CONSISTENCY_REQUIRED: usize = 4;

/// Threshold multiplier for leaving STATIONARY.
///
/// A confirmed resting device must exceed twice the entry limits before it is
/// considered disturbed. This absorbs the "tiny jolt" (0.2-0.3 m/s² for one or
/// two samples) that otherwise causes STATIONARY/HELD_STILL flicker.
pub const STATIONARY_EXIT_HYSTERESIS: f32 = 2.0;

// ===== HELD STILL (in a hand, not moving) =====

/// Maximum linear acceleration magnitude for HELD_STILL (m/s²).
pub const HELD_STILL_LINEAR_ACCEL_MAX: f32 = 0.6;

/// Maximum angular velocity magnitude for HELD_STILL (rad/s).
pub const HELD_STILL_GYRO_MAX: f32 = 0.3;

/// Maximum rotation speed for HELD_STILL (rad/s).
pub const HELD_STILL_ROT_SPEED_MAX: f32 = 0.3;

/// Threshold multiplier for leaving a low-motion state towards MOVING.
pub const HYSTERESIS_FACTOR: f32 = 1.5;

// ===== FREE FALL / IMPACT =====

/// Raw acceleration magnitude below which the device is near weightless (m/s²).
///
/// About 0.3 g. Thrown or dropped devices read 0.5-2 m/s² in flight.
pub const FREE_FALL_ACCEL_THRESHOLD: f32 = 3.0;

/// Minimum angular velocity that marks a tumbling free fall (rad/s).
pub const FREE_FALL_MIN_ROTATION: f32 = 1.0;

/// Angular velocity above which the reading is treated as a spin, not a fall (rad/s).
pub const FREE_FALL_MAX_ROTATION: f32 = 15.0;

/// Linear acceleration ceiling during free fall (m/s²).
///
/// Gravity removal is unreliable in flight, so this is generous. It mainly
/// rejects readings where the raw channel glitched low during a violent shake.
pub const FREE_FALL_LINEAR_ACCEL_MAX: f32 = 12.0;

/// Consecutive low-gravity samples that declare free fall without rotation.
pub const FREE_FALL_ACCEL_CONSISTENCY_SAMPLES: usize = 3;

/// Spike magnitude that marks the end of a flight as an impact (m/s²).
pub const IMPACT_ACCEL_THRESHOLD: f32 = 15.0;

/// Spike magnitude that marks an impact with no preceding free fall (m/s²).
///
/// Only applies when the device was not already shaking or moving.
pub const STANDALONE_IMPACT_THRESHOLD: f32 = 20.0;

// ===== THROW =====

/// Linear acceleration that counts as a launch just before free fall (m/s²).
pub const THROW_LAUNCH_THRESHOLD: f32 = 12.0;

/// Consecutive low-motion candidates after impact that count as settled.
pub const CATCH_SETTLE_SAMPLES: usize = 3;

// ===== SHAKE =====

/// Peak linear magnitude a shake window must reach (m/s²).
pub const PEAK_MAGNITUDE_FOR_SHAKE: f32 = 12.0;

/// Mean linear magnitude a shake window must sustain (m/s²).
///
/// Rules out one spike followed by stillness.
pub const MIN_MAGNITUDE_FOR_SHAKE: f32 = 3.0;

/// Direction changes required within the shake window.
pub const MIN_ACCEL_REVERSALS_FOR_SHAKE: usize = 4;

/// Smallest swing in magnitude that counts as a reversal (m/s²).
pub const REVERSAL_DELTA: f32 = 1.0;

/// Samples examined by the shake detector.
pub const SHAKE_HISTORY_SIZE: usize = 30;

// ===== ARC SWING =====

/// Mean angular velocity over the arc window (rad/s).
pub const ARC_ROTATION_THRESHOLD: f32 = 1.5;

/// Fraction of the arc threshold the latest sample must still show.
///
/// Stops an arc from being reported after the swing has already ended.
pub const ARC_TAIL_FRACTION: f32 = 0.6;

/// Mean linear acceleration an arc must carry (m/s²).
pub const ARC_MIN_LINEAR_ACCEL: f32 = 0.5;

/// Upper bound on gyro standard deviation for a smooth arc (rad/s).
pub const ARC_MAX_GYRO_STD_DEV: f32 = 0.6;

/// Gyro-magnitude reversals tolerated within an arc.
pub const ARC_MAX_REVERSALS: usize = 1;

/// Samples examined by the arc detector.
pub const ARC_WINDOW: usize = 8;

// ===== ROLLING =====

/// Minimum angular velocity while rolling (rad/s).
pub const ROLLING_MIN_GYRO: f32 = 1.0;

/// Maximum linear acceleration while rolling (m/s²).
pub const ROLLING_MAX_LINEAR_ACCEL: f32 = 3.0;

/// Share of total rotation the dominant axis must carry.
pub const ROLLING_AXIS_DOMINANCE: f32 = 0.6;

/// Sign flips of the dominant axis tolerated within the window.
pub const ROLLING_MAX_AXIS_FLIPS: usize = 1;

/// Samples examined by the rolling detector.
pub const ROLLING_WINDOW: usize = 5;

// ===== SMOOTHING / ENERGY =====

/// Readings averaged by the candidate resolver.
pub const SMOOTHING_WINDOW: usize = 3;

/// Linear acceleration that saturates the energy score (m/s²).
pub const ENERGY_LINEAR_FULL_SCALE: f32 = 20.0;

/// Angular velocity that saturates the energy score (rad/s).
pub const ENERGY_GYRO_FULL_SCALE: f32 = 10.0;

/// Energy weights: linear, gyro, rotation speed. Sum to 1.0.
pub const ENERGY_WEIGHTS: [f32; 3] = [0.7, 0.2, 0.1];
