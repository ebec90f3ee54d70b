//! Shake detector
//!
//! Looks at the linear magnitude over the newest `shake_history_size`
//! readings. A window is a shake when
//!
//! - its peak reaches `peak_magnitude_for_shake`,
//! - its mean stays at or above `min_magnitude_for_shake` (one spike followed
//!   by stillness is not a shake), and
//! - it reverses direction at least `min_accel_reversals_for_shake` times
//!   (high but constant magnitude is not a shake either).

use crate::config::MotionConfig;
use crate::history::MotionHistory;
use crate::state::{PatternEvent, PatternKind};
use crate::stats::{count_reversals, mean, peak, series, trough};
use crate::time::Timestamp;

/// Statistics of one shake window
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ShakeAnalysis {
    /// Highest linear magnitude
    pub peak: f32,
    /// Lowest linear magnitude
    pub trough: f32,
    /// Mean linear magnitude
    pub mean: f32,
    /// Direction changes larger than the noise delta
    pub reversals: usize,
    /// All three shake criteria hold
    pub confirmed: bool,
}

/// Analyse a magnitude window
pub fn analyse(magnitudes: &[f32], config: &MotionConfig) -> ShakeAnalysis {
    let (Some(peak), Some(trough), Some(mean)) = (peak(magnitudes), trough(magnitudes), mean(magnitudes)) else {
        return ShakeAnalysis::default();
    };
    let reversals = count_reversals(magnitudes, config.reversal_delta);

    ShakeAnalysis {
        peak,
        trough,
        mean,
        reversals,
        confirmed: peak >= config.peak_magnitude_for_shake
            && mean >= config.min_magnitude_for_shake
            && reversals >= config.min_accel_reversals_for_shake,
    }
}

/// Edge-triggered SHAKE reporting
#[derive(Debug, Clone, Default)]
pub struct ShakeDetector {
    shaking: bool,
}

impl ShakeDetector {
    /// Detector not currently shaking
    pub const fn new() -> Self {
        Self { shaking: false }
    }

    /// Analyse the newest shake window of `history`
    pub fn evaluate(&self, history: &MotionHistory, config: &MotionConfig) -> ShakeAnalysis {
        let magnitudes = series(
            history
                .window(config.shake_history_size)
                .map(|r| r.linear_magnitude()),
        );
        analyse(&magnitudes, config)
    }

    /// Report SHAKE when the candidate turns SHAKE
    pub fn observe(&mut self, shaking: bool, now: Timestamp) -> Option<PatternEvent> {
        let started = shaking && !self.shaking;
        self.shaking = shaking;
        started.then(|| PatternEvent::new(PatternKind::Shake, now))
    }

    /// Forget the current shake
    pub fn reset(&mut self) {
        self.shaking = false;
    }
}
