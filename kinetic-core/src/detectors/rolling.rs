//! Rolling detector
//!
//! Rolling across a table shows steady rotation about one axis while the
//! linear acceleration stays low. Per window of `rolling_window` readings:
//!
//! - every reading rotates at `rolling_min_gyro` or more with linear
//!   acceleration at most `rolling_max_linear_accel`;
//! - one axis carries at least `rolling_axis_dominance` of the summed
//!   absolute rotation;
//! - that axis changes sign at most `rolling_max_axis_flips` times.
//!
//! The episode starts with the first qualifying window and ends with the
//! first failing one. ROLLING is reported once per episode, when it has
//! lasted `rolling_min_duration_ms`.

use crate::config::MotionConfig;
use crate::history::MotionHistory;
use crate::reading::Reading;
use crate::state::{PatternEvent, PatternKind};
use crate::time::{elapsed, Timestamp};

/// An in-progress roll
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RollingEpisode {
    /// Oldest reading of the first qualifying window
    pub started_at: Timestamp,
    /// Set once ROLLING has been reported for this episode
    pub reported: bool,
}

impl RollingEpisode {
    /// Length of the roll so far
    pub fn duration(&self, now: Timestamp) -> u64 {
        elapsed(self.started_at, now)
    }
}

/// Rolling episode tracking
#[derive(Debug, Clone, Default)]
pub struct RollingDetector {
    episode: Option<RollingEpisode>,
}

impl RollingDetector {
    /// Detector with no episode
    pub const fn new() -> Self {
        Self { episode: None }
    }

    /// The roll in progress
    pub fn episode(&self) -> Option<&RollingEpisode> {
        self.episode.as_ref()
    }

    /// True while a roll is in progress
    pub fn is_active(&self) -> bool {
        self.episode.is_some()
    }

    /// End the roll without reporting
    pub fn interrupt(&mut self) {
        self.episode = None;
    }

    /// Evaluate the newest window
    pub fn update(
        &mut self,
        history: &MotionHistory,
        config: &MotionConfig,
        now: Timestamp,
    ) -> Option<PatternEvent> {
        let Some(window_start) = Self::qualifying_window(history, config) else {
            self.episode = None;
            return None;
        };

        let episode = self.episode.get_or_insert(RollingEpisode {
            started_at: window_start,
            reported: false,
        });

        let duration = episode.duration(now);
        if !episode.reported && duration >= config.rolling_min_duration_ms {
            episode.reported = true;
            return Some(PatternEvent::with_duration(PatternKind::Rolling, now, duration));
        }
        None
    }

    /// Start time of the newest window if it looks like rolling
    fn qualifying_window(history: &MotionHistory, config: &MotionConfig) -> Option<Timestamp> {
        if history.len() < config.rolling_window {
            return None;
        }

        let steady = history.window(config.rolling_window).all(|r| {
            r.gyro_magnitude() >= config.rolling_min_gyro
                && r.linear_magnitude() <= config.rolling_max_linear_accel
        });
        if !steady {
            return None;
        }

        let mut axis_totals = [0.0f32; 3];
        for reading in history.window(config.rolling_window) {
            for (axis, total) in axis_totals.iter_mut().enumerate() {
                *total += reading.angular_velocity.axis(axis).abs();
            }
        }
        let sum: f32 = axis_totals.iter().sum();
        let (dominant, dominant_total) = axis_totals
            .iter()
            .copied()
            .enumerate()
            .fold((0, 0.0f32), |best, (axis, total)| if total > best.1 { (axis, total) } else { best });

        if sum <= 0.0 || dominant_total / sum < config.rolling_axis_dominance {
            return None;
        }

        if axis_flips(history.window(config.rolling_window), dominant) > config.rolling_max_axis_flips {
            return None;
        }

        history.window(config.rolling_window).next().map(|r| r.timestamp)
    }
}

fn axis_flips<'a>(readings: impl Iterator<Item = &'a Reading>, axis: usize) -> usize {
    let mut flips = 0;
    let mut last_sign = 0.0f32;

    for reading in readings {
        let value = reading.angular_velocity.axis(axis);
        if value == 0.0 {
            continue;
        }
        let sign = value.signum();
        if last_sign != 0.0 && sign != last_sign {
            flips += 1;
        }
        last_sign = sign;
    }
    flips
}
