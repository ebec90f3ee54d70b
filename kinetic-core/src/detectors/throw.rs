//! Throw, catch and drop
//!
//! A free fall alone does not say whether the toy was thrown or dropped.
//! Two extra observations decide:
//!
//! - **Launch**: a linear spike of `throw_launch_threshold` within
//!   `throw_lookback_ms` before the fall began marks the flight as a throw.
//! - **Landing**: after the flight's impact, `catch_settle_samples`
//!   consecutive low-motion candidates within `catch_settle_window_ms` mean
//!   a hand absorbed it. A thrown flight that settles like that is a CATCH.
//!   Everything else that lands is a DROP: an unthrown fall, or a flight
//!   that keeps bouncing past the settle window.

use crate::config::MotionConfig;
use crate::detectors::priority::FlightSummary;
use crate::history::MotionHistory;
use crate::state::{MotionState, PatternEvent, PatternKind};
use crate::time::{elapsed, Timestamp};

/// True if a launch spike preceded a fall starting at `fall_start`
pub fn launch_preceded(history: &MotionHistory, fall_start: Timestamp, config: &MotionConfig) -> bool {
    let from = fall_start.saturating_sub(config.throw_lookback_ms);
    history
        .between(from, fall_start)
        .any(|r| r.linear_magnitude() >= config.throw_launch_threshold)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Landing {
    impact_at: Timestamp,
    flight: FlightSummary,
    settled: usize,
}

/// Resolves a landed flight into CATCH or DROP
#[derive(Debug, Clone, Default)]
pub struct LandingResolver {
    pending: Option<Landing>,
}

impl LandingResolver {
    /// Resolver with nothing pending
    pub const fn new() -> Self {
        Self { pending: None }
    }

    /// True while a landing waits for resolution
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// A flight ended in an impact at `now`
    pub fn on_impact(&mut self, flight: FlightSummary, now: Timestamp) {
        self.pending = Some(Landing {
            impact_at: now,
            flight,
            settled: 0,
        });
    }

    /// A new fall started; the previous landing is no longer interesting
    pub fn abandon(&mut self) {
        self.pending = None;
    }

    /// Feed the candidate for the reading at `now`
    pub fn update(
        &mut self,
        candidate: MotionState,
        now: Timestamp,
        config: &MotionConfig,
    ) -> Option<PatternEvent> {
        let landing = self.pending.as_mut()?;
        let since_impact = elapsed(landing.impact_at, now);
        let flight_ms = landing.flight.duration_ms();

        if candidate.is_low_motion() {
            landing.settled += 1;
        } else {
            landing.settled = 0;
        }

        if landing.settled >= config.catch_settle_samples {
            let caught = landing.flight.thrown && since_impact <= config.catch_settle_window_ms;
            self.pending = None;
            let kind = if caught { PatternKind::Catch } else { PatternKind::Drop };
            return Some(PatternEvent::with_duration(kind, now, flight_ms));
        }

        if since_impact > config.catch_settle_window_ms {
            self.pending = None;
            return Some(PatternEvent::with_duration(PatternKind::Drop, now, flight_ms));
        }

        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reading::{ReadingBuilder, Vec3};

    fn flight(thrown: bool) -> FlightSummary {
        FlightSummary {
            started_at: 1000,
            ended_at: 1100,
            thrown,
        }
    }

    #[test]
    fn launch_found_within_lookback() {
        let config = MotionConfig::default();
        let mut history = MotionHistory::new();
        for (t, lin) in [(500, 15.0), (800, 2.0), (950, 13.0), (1000, 1.0)] {
            history.push(
                ReadingBuilder::new(t)
                    .linear_acceleration(Vec3::new(lin, 0.0, 0.0))
                    .build(),
            );
        }

        assert!(launch_preceded(&history, 1000, &config));
        // The 15 m/s² spike at 500 is outside a 400 ms lookback, 950 is not
        assert!(launch_preceded(&history, 1000, &MotionConfig { throw_lookback_ms: 400, ..config }));
        assert!(!launch_preceded(&history, 1000, &MotionConfig { throw_lookback_ms: 40, ..config }));
    }

    #[test]
    fn quick_settle_after_throw_is_catch() {
        let config = MotionConfig::default();
        let mut resolver = LandingResolver::new();
        resolver.on_impact(flight(true), 1100);

        assert_eq!(resolver.update(MotionState::Moving, 1110, &config), None);
        assert_eq!(resolver.update(MotionState::HeldStill, 1120, &config), None);
        assert_eq!(resolver.update(MotionState::HeldStill, 1130, &config), None);
        assert_eq!(
            resolver.update(MotionState::Stationary, 1140, &config),
            Some(PatternEvent::with_duration(PatternKind::Catch, 1140, 100))
        );
        assert!(!resolver.is_pending());
    }

    #[test]
    fn unthrown_fall_is_drop() {
        let config = MotionConfig::default();
        let mut resolver = LandingResolver::new();
        resolver.on_impact(flight(false), 1100);

        let mut event = None;
        for t in [1110, 1120, 1130] {
            event = resolver.update(MotionState::Stationary, t, &config);
        }
        assert_eq!(event.map(|e| e.pattern), Some(PatternKind::Drop));
    }

    #[test]
    fn slow_settle_is_drop() {
        let config = MotionConfig::default();
        let mut resolver = LandingResolver::new();
        resolver.on_impact(flight(true), 1100);

        for t in (1110..1900).step_by(10) {
            assert_eq!(resolver.update(MotionState::Moving, t, &config), None);
        }
        assert_eq!(
            resolver.update(MotionState::Moving, 1910, &config).map(|e| e.pattern),
            Some(PatternKind::Drop)
        );
    }

    #[test]
    fn new_fall_abandons_landing() {
        let config = MotionConfig::default();
        let mut resolver = LandingResolver::new();
        resolver.on_impact(flight(true), 1100);
        resolver.abandon();

        assert_eq!(resolver.update(MotionState::Stationary, 1110, &config), None);
    }
}
