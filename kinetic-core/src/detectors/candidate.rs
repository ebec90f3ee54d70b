//! Candidate resolver
//!
//! Maps the smoothed magnitudes of the latest readings to an instantaneous,
//! unfiltered candidate state. The confirmed state only selects which
//! threshold set applies:
//!
//! | Confirmed    | STATIONARY limits        | HELD_STILL limits       |
//! |--------------|--------------------------|-------------------------|
//! | STATIONARY   | × `stationary_exit_hysteresis` | × `hysteresis_factor` |
//! | HELD_STILL   | plain                    | × `hysteresis_factor`   |
//! | anything else| plain                    | plain                   |
//!
//! Entering a low-motion state therefore takes a quieter signal than staying
//! in it. Combined with the rolling average this keeps boundary noise from
//! producing a new candidate every sample.

use crate::config::MotionConfig;
use crate::constants::motion::{ENERGY_GYRO_FULL_SCALE, ENERGY_LINEAR_FULL_SCALE, ENERGY_WEIGHTS};
use crate::history::MotionHistory;
use crate::state::MotionState;

/// Channel magnitudes used for resolution
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Magnitudes {
    /// Linear acceleration (m/s²)
    pub linear: f32,
    /// Angular velocity (rad/s)
    pub gyro: f32,
    /// Rotation speed (rad/s)
    pub rotation: f32,
}

impl Magnitudes {
    /// Rolling average of linear and gyro magnitude over the newest `window`
    /// readings. Rotation speed is taken from the latest reading only.
    pub fn smoothed(history: &MotionHistory, window: usize) -> Self {
        let mut linear = 0.0;
        let mut gyro = 0.0;
        let mut count = 0usize;

        for reading in history.window(window) {
            linear += reading.linear_magnitude();
            gyro += reading.gyro_magnitude();
            count += 1;
        }

        if count == 0 {
            return Self::default();
        }

        Self {
            linear: linear / count as f32,
            gyro: gyro / count as f32,
            rotation: history.latest().map(|r| r.rotation_speed).unwrap_or(0.0),
        }
    }

    /// Activity level in [0, 1]
    ///
    /// Weighted blend of linear acceleration, angular velocity and rotation
    /// speed, each saturating at its full-scale value.
    pub fn energy(&self) -> f32 {
        let linear = (self.linear / ENERGY_LINEAR_FULL_SCALE).min(1.0);
        let gyro = (self.gyro / ENERGY_GYRO_FULL_SCALE).min(1.0);
        let rotation = (self.rotation / ENERGY_GYRO_FULL_SCALE).min(1.0);

        linear * ENERGY_WEIGHTS[0] + gyro * ENERGY_WEIGHTS[1] + rotation * ENERGY_WEIGHTS[2]
    }
}

#[derive(Debug, Clone, Copy)]
struct Limits {
    linear: f32,
    gyro: f32,
    rotation: f32,
}

impl Limits {
    fn scaled(self, factor: f32) -> Self {
        Self {
            linear: self.linear * factor,
            gyro: self.gyro * factor,
            rotation: self.rotation * factor,
        }
    }

    fn admits(&self, m: &Magnitudes) -> bool {
        m.linear <= self.linear && m.gyro <= self.gyro && m.rotation <= self.rotation
    }
}

fn limits_for(config: &MotionConfig, confirmed: MotionState) -> (Limits, Limits) {
    let stationary = Limits {
        linear: config.stationary_linear_accel_max,
        gyro: config.stationary_gyro_max,
        rotation: config.stationary_rot_speed_max,
    };
    let held = Limits {
        linear: config.held_still_linear_accel_max,
        gyro: config.held_still_gyro_max,
        rotation: config.held_still_rot_speed_max,
    };

    match confirmed {
        MotionState::Stationary => (
            stationary.scaled(config.stationary_exit_hysteresis),
            held.scaled(config.hysteresis_factor),
        ),
        MotionState::HeldStill => (stationary, held.scaled(config.hysteresis_factor)),
        _ => (stationary, held),
    }
}

/// Resolve the candidate state for one reading
///
/// `shake_confirmed` comes from the shake detector. `device_shake` is the
/// sensor's own shake flag; it only counts while linear acceleration is at
/// least `min_magnitude_for_shake`, so a stale flag on a quiet device is
/// ignored.
pub fn resolve(
    config: &MotionConfig,
    magnitudes: &Magnitudes,
    confirmed: MotionState,
    shake_confirmed: bool,
    device_shake: bool,
) -> MotionState {
    let (stationary, held) = limits_for(config, confirmed);

    if stationary.admits(magnitudes) {
        return MotionState::Stationary;
    }
    if held.admits(magnitudes) {
        return MotionState::HeldStill;
    }

    let flagged = device_shake && magnitudes.linear >= config.min_magnitude_for_shake;
    if shake_confirmed || flagged {
        MotionState::Shake
    } else {
        MotionState::Moving
    }
}
