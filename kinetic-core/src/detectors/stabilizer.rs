//! Debounce engine
//!
//! Turns the candidate stream into the confirmed state. Two pieces of state
//! drive it:
//!
//! - the *pending* candidate, which the confirmed state moves towards once it
//!   has been pending for the dwell time;
//! - a *challenger*, a candidate that disagrees with the pending one. It
//!   replaces the pending candidate only after persisting for the dwell
//!   itself, so one stray sample never resets a long-held candidacy.
//!
//! ```text
//! candidates:  S S S H S S S S M M M M M M M M M ...
//! pending:     S S S S S S S S S S S S S M M M M      (M took over after dwell)
//! confirmed:   S S S S S S S S S S S S S M M M M
//! ```
//!
//! A confirmed state is never replaced by a debounced candidate before it
//! has itself lasted `min_state_duration_ms`. STATIONARY additionally has to
//! pass the variance gate, and the STATIONARY/HELD_STILL pair uses a doubled
//! dwell. Free fall and impact
//! bypass all of this through `force`.
//!
//! ## Low-motion flicker
//!
//! A signal sitting on the STATIONARY/HELD_STILL boundary can alternate
//! between the two every sample. Each swap would restart the challenger, so
//! neither would ever last the dwell. While the pending candidate is not a
//! low-motion state, such a run is tracked as a whole: once it has switched
//! back at least once and HELD_STILL has been part of it for the dwell,
//! HELD_STILL becomes pending with that start time.
//!
//! ```text
//! candidates:  M M S H S H S H S H S H S H ...
//! pending:     M M M M M M M M M M M H H H      (H since its first sample)
//! ```

use crate::config::MotionConfig;
use crate::state::{ConfirmedState, MotionState};
use crate::time::{elapsed, Timestamp};

/// Debounced confirmed state
#[derive(Debug, Clone)]
pub struct Stabilizer {
    confirmed: ConfirmedState,
    pending: MotionState,
    pending_since: Timestamp,
    challenger: Option<(MotionState, Timestamp)>,
    low_run: Option<LowRun>,
}

// Unbroken run of STATIONARY/HELD_STILL candidates
#[derive(Debug, Clone, Copy)]
struct LowRun {
    last: MotionState,
    swaps: u8,
    held_since: Option<Timestamp>,
}

impl LowRun {
    fn start(candidate: MotionState, now: Timestamp) -> Self {
        Self {
            last: candidate,
            swaps: 0,
            held_since: (candidate == MotionState::HeldStill).then_some(now),
        }
    }

    fn observe(&mut self, candidate: MotionState, now: Timestamp) {
        if candidate != self.last {
            self.last = candidate;
            self.swaps = self.swaps.saturating_add(1);
        }
        if candidate == MotionState::HeldStill && self.held_since.is_none() {
            self.held_since = Some(now);
        }
    }

    // A plain S→H or H→S handover is one swap; flicker returns to a state
    fn flickering_since(&self) -> Option<Timestamp> {
        if self.swaps >= 2 {
            self.held_since
        } else {
            None
        }
    }
}

impl Stabilizer {
    /// Start in UNKNOWN
    pub const fn new(at: Timestamp) -> Self {
        Self {
            confirmed: ConfirmedState::unknown(at),
            pending: MotionState::Unknown,
            pending_since: at,
            challenger: None,
            low_run: None,
        }
    }

    /// The current confirmed state
    pub fn confirmed(&self) -> ConfirmedState {
        self.confirmed
    }

    /// The candidate the confirmed state is moving towards
    pub fn pending(&self) -> MotionState {
        self.pending
    }

    /// Commit a priority state immediately. Returns true if the state changed.
    pub fn force(&mut self, state: MotionState, now: Timestamp) -> bool {
        self.pending = state;
        self.pending_since = now;
        self.challenger = None;
        self.low_run = None;
        self.commit(state, now)
    }

    /// Feed one candidate. Returns true if the confirmed state changed.
    ///
    /// `stationary_ready` is the variance gate's verdict for this reading.
    pub fn update(
        &mut self,
        candidate: MotionState,
        now: Timestamp,
        config: &MotionConfig,
        stationary_ready: bool,
    ) -> bool {
        if self.confirmed.state == MotionState::Unknown {
            return self.leave_unknown(candidate, now);
        }

        if candidate.is_low_motion() {
            match &mut self.low_run {
                Some(run) => run.observe(candidate, now),
                slot @ None => *slot = Some(LowRun::start(candidate, now)),
            }
        } else {
            self.low_run = None;
        }

        if candidate == self.pending {
            self.challenger = None;
        } else {
            match self.challenger {
                Some((state, since)) if state == candidate => {
                    if elapsed(since, now) >= config.min_state_duration_ms {
                        self.pending = candidate;
                        self.pending_since = since;
                        self.challenger = None;
                    }
                }
                _ => self.challenger = Some((candidate, now)),
            }
        }

        if !self.pending.is_low_motion() {
            let flicker = self.low_run.and_then(|run| run.flickering_since());
            if let Some(since) = flicker {
                if elapsed(since, now) >= config.min_state_duration_ms {
                    self.pending = MotionState::HeldStill;
                    self.pending_since = since;
                    self.challenger = None;
                    self.low_run = None;
                }
            }
        }

        if self.pending == self.confirmed.state {
            return false;
        }
        // Every confirmed state is held for at least the base dwell
        if elapsed(self.confirmed.entered_at, now) < config.min_state_duration_ms {
            return false;
        }
        if elapsed(self.pending_since, now) < config.dwell_ms(self.confirmed.state, self.pending) {
            return false;
        }
        if self.pending == MotionState::Stationary && !stationary_ready {
            return false;
        }

        self.commit(self.pending, now)
    }

    // STATIONARY has to be earned through the gate, so the first reading
    // settles for HELD_STILL while the stationary candidacy keeps running.
    fn leave_unknown(&mut self, candidate: MotionState, now: Timestamp) -> bool {
        self.pending = candidate;
        self.pending_since = now;
        self.challenger = None;
        self.low_run = None;

        let initial = match candidate {
            MotionState::Stationary => MotionState::HeldStill,
            other => other,
        };
        self.commit(initial, now)
    }

    fn commit(&mut self, state: MotionState, now: Timestamp) -> bool {
        if self.confirmed.state == state {
            return false;
        }

        log_debug!(
            "state {} -> {} at t={}",
            self.confirmed.state.name(),
            state.name(),
            now
        );
        self.confirmed = ConfirmedState {
            state,
            entered_at: now,
        };
        true
    }
}
