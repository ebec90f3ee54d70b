//! Free-fall / impact priority detector
//!
//! Evaluated before anything else on every reading. When it fires, its
//! verdict is committed immediately and the candidate resolver, the shake
//! detector and the debounce engine are all bypassed for that reading.
//!
//! ## Free fall
//!
//! A reading is *low* when the raw (gravity-included) magnitude is below
//! `free_fall_accel_threshold` and the linear magnitude is within
//! `free_fall_linear_accel_max`. Free fall is declared on a low reading when
//!
//! - angular velocity lies in the tumbling range, or
//! - `free_fall_accel_consistency_samples` low readings arrived in a row, or
//! - an episode is already in progress.
//!
//! The consistency rule keeps a single glitched sample from starting an
//! episode when the device is not rotating.
//!
//! A reading whose raw channel is a zero stand-in carries no gravity
//! information. It is skipped entirely: it neither starts, extends nor ends
//! a free fall, and the low-reading streak is left as it was.
//!
//! ## Impact
//!
//! - Within `impact_window_ms` after a flight ends, a reading whose raw or
//!   linear magnitude reaches `impact_accel_threshold` is the landing.
//! - Without a flight, a linear spike of `standalone_impact_threshold` is an
//!   impact unless the device was already moving or shaking.
//!
//! Impact is a single-reading trigger, not a dwell-gated state.

use crate::config::MotionConfig;
use crate::reading::{Channel, Reading};
use crate::state::MotionState;
use crate::time::{elapsed, Timestamp};

/// Verdict of the priority layer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Priority {
    /// Near weightless
    FreeFall,
    /// Sharp spike; `flight` is set when it ended a free fall
    Impact {
        /// The flight this impact ended, if any
        flight: Option<FlightSummary>,
    },
}

/// An in-progress free fall
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FreeFallEpisode {
    /// First reading of the episode
    pub started_at: Timestamp,
    /// Set once a launch spike was found before the episode
    pub thrown: bool,
    /// Set once the launch search ran
    pub throw_checked: bool,
}

/// A completed free fall, kept until its impact window closes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlightSummary {
    /// First reading of the flight
    pub started_at: Timestamp,
    /// First reading after the flight
    pub ended_at: Timestamp,
    /// Whether the flight began with a launch
    pub thrown: bool,
}

impl FlightSummary {
    /// Flight time in milliseconds
    pub fn duration_ms(&self) -> u64 {
        elapsed(self.started_at, self.ended_at)
    }
}

/// Free-fall and impact state
#[derive(Debug, Clone, Default)]
pub struct PriorityDetector {
    consecutive_low: usize,
    low_since: Option<Timestamp>,
    episode: Option<FreeFallEpisode>,
    last_flight: Option<FlightSummary>,
    // Low readings outlasting a plausible flight; ignored until they stop
    suppressed: bool,
}

impl PriorityDetector {
    /// Detector with no episode
    pub const fn new() -> Self {
        Self {
            consecutive_low: 0,
            low_since: None,
            episode: None,
            last_flight: None,
            suppressed: false,
        }
    }

    /// The free fall in progress
    pub fn episode(&self) -> Option<&FreeFallEpisode> {
        self.episode.as_ref()
    }

    /// Mark the free fall in progress as thrown
    pub fn record_throw_check(&mut self, thrown: bool) {
        if let Some(episode) = self.episode.as_mut() {
            episode.throw_checked = true;
            episode.thrown |= thrown;
        }
    }

    /// Forget every episode
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Classify one reading
    ///
    /// `confirmed` is the confirmed state before this reading.
    pub fn evaluate(
        &mut self,
        reading: &Reading,
        confirmed: MotionState,
        config: &MotionConfig,
    ) -> Option<Priority> {
        if reading.is_channel_degraded(Channel::RawAcceleration) {
            return None;
        }

        let now = reading.timestamp;
        let raw = reading.raw_magnitude();
        let linear = reading.linear_magnitude();

        let low = raw < config.free_fall_accel_threshold
            && linear <= config.free_fall_linear_accel_max;

        if low {
            return self.low_reading(reading, config);
        }

        self.consecutive_low = 0;
        self.low_since = None;
        self.suppressed = false;

        if let Some(episode) = self.episode.take() {
            self.last_flight = Some(FlightSummary {
                started_at: episode.started_at,
                ended_at: now,
                thrown: episode.thrown,
            });
        }

        if let Some(flight) = self.last_flight {
            if elapsed(flight.ended_at, now) <= config.impact_window_ms {
                if raw.max(linear) >= config.impact_accel_threshold {
                    self.last_flight = None;
                    log_debug!("impact after {} ms flight", flight.duration_ms());
                    return Some(Priority::Impact { flight: Some(flight) });
                }
            } else {
                self.last_flight = None;
            }
        }

        let already_moving = matches!(confirmed, MotionState::Moving | MotionState::Shake);
        if linear >= config.standalone_impact_threshold && !already_moving {
            return Some(Priority::Impact { flight: None });
        }

        None
    }

    fn low_reading(&mut self, reading: &Reading, config: &MotionConfig) -> Option<Priority> {
        let now = reading.timestamp;
        self.consecutive_low += 1;
        let low_since = *self.low_since.get_or_insert(now);

        if self.suppressed {
            return None;
        }

        if let Some(episode) = self.episode {
            if elapsed(episode.started_at, now) > config.free_fall_max_duration_ms {
                log_warn!(
                    "low gravity for {} ms, not a flight; ignoring until it clears",
                    elapsed(episode.started_at, now)
                );
                self.episode = None;
                self.last_flight = None;
                self.suppressed = true;
                return None;
            }
            return Some(Priority::FreeFall);
        }

        let gyro = reading.gyro_magnitude();
        let tumbling = gyro >= config.free_fall_min_rotation && gyro <= config.free_fall_max_rotation;
        let sustained = self.consecutive_low >= config.free_fall_accel_consistency_samples;

        if tumbling || sustained {
            // A new flight supersedes the impact window of the previous one
            self.last_flight = None;
            self.episode = Some(FreeFallEpisode {
                started_at: if tumbling { now } else { low_since },
                thrown: false,
                throw_checked: false,
            });
            return Some(Priority::FreeFall);
        }

        None
    }
}
