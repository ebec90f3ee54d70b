//! Arc-swing detector
//!
//! An arc swing is the toy being swung through the air in a smooth curve:
//! sustained rotation with moderate acceleration and few direction changes.
//! Compared to a shake it has a lower peak and far fewer reversals.

use crate::config::MotionConfig;
use crate::constants::motion::ARC_TAIL_FRACTION;
use crate::history::MotionHistory;
use crate::state::{PatternEvent, PatternKind};
use crate::stats::{count_reversals, mean, peak, series, std_dev};
use crate::time::Timestamp;

/// Edge-triggered ARC_SWING reporting
#[derive(Debug, Clone, Default)]
pub struct ArcDetector {
    swinging: bool,
}

impl ArcDetector {
    /// Detector not currently swinging
    pub const fn new() -> Self {
        Self { swinging: false }
    }

    /// True when the newest `arc_window` readings form a smooth arc
    pub fn is_arc(history: &MotionHistory, config: &MotionConfig) -> bool {
        if history.len() < config.arc_window {
            return false;
        }

        let gyro = series(history.window(config.arc_window).map(|r| r.gyro_magnitude()));
        let linear = series(history.window(config.arc_window).map(|r| r.linear_magnitude()));

        let (Some(gyro_mean), Some(gyro_spread), Some(&latest_gyro)) =
            (mean(&gyro), std_dev(&gyro), gyro.last())
        else {
            return false;
        };
        let (Some(linear_mean), Some(linear_peak)) = (mean(&linear), peak(&linear)) else {
            return false;
        };

        gyro_mean >= config.arc_rotation_threshold
            && latest_gyro >= config.arc_rotation_threshold * ARC_TAIL_FRACTION
            && gyro_spread <= config.arc_max_gyro_std_dev
            && count_reversals(&gyro, config.reversal_delta) <= config.arc_max_reversals
            && linear_mean >= config.arc_min_linear_accel
            && linear_peak < config.peak_magnitude_for_shake
    }

    /// Evaluate the window; reports once per contiguous arc
    pub fn update(
        &mut self,
        history: &MotionHistory,
        config: &MotionConfig,
        now: Timestamp,
    ) -> Option<PatternEvent> {
        let arc = Self::is_arc(history, config);
        let started = arc && !self.swinging;
        self.swinging = arc;
        started.then(|| PatternEvent::new(PatternKind::ArcSwing, now))
    }

    /// Forget the current swing
    pub fn reset(&mut self) {
        self.swinging = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reading::{ReadingBuilder, Vec3};

    fn push(history: &mut MotionHistory, t: u64, linear: f32, gyro: f32) {
        history.push(
            ReadingBuilder::new(t)
                .linear_acceleration(Vec3::new(linear, 0.0, 0.0))
                .angular_velocity(Vec3::new(0.0, gyro, 0.0))
                .build(),
        );
    }

    #[test]
    fn smooth_swing_reported_once() {
        let config = MotionConfig::default();
        let mut history = MotionHistory::new();
        let mut detector = ArcDetector::new();
        let mut events = 0;

        for i in 0..20u64 {
            // gyro ramps gently 2.0 -> 2.5, linear around 3
            push(&mut history, i * 20, 3.0, 2.0 + i as f32 * 0.025);
            if detector.update(&history, &config, i * 20).is_some() {
                events += 1;
            }
        }

        assert_eq!(events, 1);
    }

    #[test]
    fn jerky_rotation_is_not_an_arc() {
        let config = MotionConfig::default();
        let mut history = MotionHistory::new();

        for i in 0..8u64 {
            let gyro = if i % 2 == 0 { 0.5 } else { 4.0 };
            push(&mut history, i * 20, 3.0, gyro);
        }

        assert!(!ArcDetector::is_arc(&history, &config));
    }

    #[test]
    fn rotation_without_acceleration_is_not_an_arc() {
        let config = MotionConfig::default();
        let mut history = MotionHistory::new();
        for i in 0..8u64 {
            push(&mut history, i * 20, 0.1, 2.0);
        }
        assert!(!ArcDetector::is_arc(&history, &config));
    }

    #[test]
    fn short_history_not_confirmable() {
        let config = MotionConfig::default();
        let mut history = MotionHistory::new();
        push(&mut history, 0, 3.0, 2.0);
        assert!(!ArcDetector::is_arc(&history, &config));
    }
}
