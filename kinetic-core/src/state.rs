//! Motion states and pattern events
//!
//! `MotionState` is shared by the candidate stream (instantaneous, unfiltered)
//! and the confirmed state (debounced, externally visible). Only the
//! confirmed state carries an entry time.

use crate::time::{elapsed, Timestamp};

/// Physical state of the device
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MotionState {
    /// Nothing classified yet; only ever the initial state
    Unknown,
    /// Resting on a surface
    Stationary,
    /// Held in a hand without moving
    HeldStill,
    /// Being moved
    Moving,
    /// Being shaken
    Shake,
    /// Near weightless: thrown or dropped
    FreeFall,
    /// Sharp deceleration, usually the end of a fall
    Impact,
}

impl MotionState {
    /// Upper-case name used in logs
    pub fn name(&self) -> &'static str {
        match self {
            Self::Unknown => "UNKNOWN",
            Self::Stationary => "STATIONARY",
            Self::HeldStill => "HELD_STILL",
            Self::Moving => "MOVING",
            Self::Shake => "SHAKE",
            Self::FreeFall => "FREE_FALL",
            Self::Impact => "IMPACT",
        }
    }

    /// States that interrupt idle behaviour when entered
    pub fn is_in_motion(&self) -> bool {
        matches!(self, Self::Moving | Self::Shake | Self::FreeFall | Self::Impact)
    }

    /// STATIONARY or HELD_STILL
    pub fn is_low_motion(&self) -> bool {
        matches!(self, Self::Stationary | Self::HeldStill)
    }

    /// States decided by the free-fall/impact priority layer
    pub fn is_priority(&self) -> bool {
        matches!(self, Self::FreeFall | Self::Impact)
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for MotionState {
    fn format(&self, fmt: defmt::Formatter) {
        defmt::write!(fmt, "{}", self.name())
    }
}

/// The externally visible state and when it was entered
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ConfirmedState {
    /// Current state
    pub state: MotionState,
    /// Timestamp of the transition into `state`
    pub entered_at: Timestamp,
}

impl ConfirmedState {
    /// The construction-time state
    pub const fn unknown(at: Timestamp) -> Self {
        Self {
            state: MotionState::Unknown,
            entered_at: at,
        }
    }

    /// Time spent in the current state
    pub fn duration(&self, now: Timestamp) -> u64 {
        elapsed(self.entered_at, now)
    }
}

/// Episodic gestures
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PatternKind {
    /// Launch followed by free fall
    Throw,
    /// Thrown flight ending in an impact and a quick settle
    Catch,
    /// Smooth rotation with moderate acceleration
    ArcSwing,
    /// Repeated high-magnitude reversals
    Shake,
    /// Sustained rotation about one axis with low acceleration
    Rolling,
    /// Fall ending on a surface
    Drop,
}

impl PatternKind {
    /// Upper-case name used in logs
    pub fn name(&self) -> &'static str {
        match self {
            Self::Throw => "THROW",
            Self::Catch => "CATCH",
            Self::ArcSwing => "ARC_SWING",
            Self::Shake => "SHAKE",
            Self::Rolling => "ROLLING",
            Self::Drop => "DROP",
        }
    }
}

/// A recognised gesture
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PatternEvent {
    /// What was recognised
    pub pattern: PatternKind,
    /// Timestamp of the reading that completed the pattern
    pub detected_at: Timestamp,
    /// Episode length where one applies (flight time, rolling time)
    pub duration_ms: Option<u64>,
}

impl PatternEvent {
    /// Event without a duration
    pub const fn new(pattern: PatternKind, detected_at: Timestamp) -> Self {
        Self {
            pattern,
            detected_at,
            duration_ms: None,
        }
    }

    /// Event carrying an episode duration
    pub const fn with_duration(pattern: PatternKind, detected_at: Timestamp, duration_ms: u64) -> Self {
        Self {
            pattern,
            detected_at,
            duration_ms: Some(duration_ms),
        }
    }
}
