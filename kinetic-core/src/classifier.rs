//! Motion classifier
//!
//! ## Overview
//!
//! `MotionClassifier` is a step function: one reading in, one
//! `Classification` out. It owns the history and every detector, and it
//! never sleeps, polls or spawns. The caller decides when readings arrive.
//!
//! ## Per-reading pipeline
//!
//! 1. Clamp a regressing timestamp and append to the history.
//! 2. Priority layer: FREE_FALL / IMPACT commit immediately. During a free
//!    fall the shake judgment is skipped altogether.
//! 3. Otherwise: rolling, shake and arc detectors read the history, the
//!    candidate resolver picks a candidate, the STATIONARY gate and the
//!    landing resolver see it, and the debounce engine decides whether the
//!    confirmed state moves.
//! 4. Pattern events are returned and copied into a bounded recent-pattern
//!    history for "time since last" queries.
//!
//! ## State machine
//!
//! ```text
//!            first reading
//! UNKNOWN ─────────────────► HELD_STILL / MOVING / SHAKE / ...
//!
//! STATIONARY ◄──(gate + 2×dwell)──► HELD_STILL ◄──(dwell)──► MOVING ◄──► SHAKE
//!      │                               │                      │
//!      └──────────────(priority, immediate)───────────────────┴──► FREE_FALL ──► IMPACT
//! ```
//!
//! UNKNOWN is never re-entered except through `reset`.
//!
//! ## Example
//!
//! ```rust
//! use kinetic_core::{MotionClassifier, MotionConfig, MotionState, ReadingBuilder, Vec3};
//!
//! let mut classifier = MotionClassifier::new(MotionConfig::default()).unwrap();
//!
//! for i in 0..200u64 {
//!     let reading = ReadingBuilder::new(i * 10)
//!         .raw_acceleration(Vec3::new(0.0, 0.0, 9.81))
//!         .linear_acceleration(Vec3::new(0.02, 0.01, 0.0))
//!         .angular_velocity(Vec3::new(0.01, 0.0, 0.0))
//!         .build();
//!     classifier.ingest(reading);
//! }
//!
//! assert_eq!(classifier.state(), MotionState::Stationary);
//! ```

use heapless::{HistoryBuffer, Vec};

use crate::adapter::SensorAdapter;
use crate::confidence::ConfidenceScore;
use crate::config::MotionConfig;
use crate::constants::buffers::{MAX_EVENTS_PER_SAMPLE, PATTERN_HISTORY_CAPACITY};
use crate::detectors::candidate::{resolve, Magnitudes};
use crate::detectors::priority::{Priority, PriorityDetector};
use crate::detectors::stationary::{GateStatus, StationaryGate};
use crate::detectors::throw::{launch_preceded, LandingResolver};
use crate::detectors::{ArcDetector, RollingDetector, ShakeDetector, Stabilizer};
use crate::errors::{ConfigResult, SensorError};
use crate::history::MotionHistory;
use crate::reading::Reading;
use crate::state::{ConfirmedState, MotionState, PatternEvent, PatternKind};
use crate::time::{elapsed, Timestamp};

/// Pattern events produced by one reading
pub type Events = Vec<PatternEvent, MAX_EVENTS_PER_SAMPLE>;

/// Result of ingesting one reading
#[derive(Debug, Clone, PartialEq)]
pub struct Classification {
    /// Confirmed state after this reading
    pub state: ConfirmedState,
    /// Confirmed state before this reading
    pub previous: MotionState,
    /// Instantaneous candidate for this reading
    pub candidate: MotionState,
    /// True if the confirmed state changed on this reading
    pub changed: bool,
    /// Patterns completed by this reading
    pub events: Events,
    /// Trust in the input
    pub confidence: ConfidenceScore,
    /// Activity level in [0, 1]
    pub energy: f32,
}

impl Classification {
    /// True when this reading confirmed a transition into an in-motion state
    ///
    /// Consumers use this as the interrupt signal for idle behaviour.
    pub fn entered_motion(&self) -> bool {
        self.changed && self.state.state.is_in_motion()
    }
}

/// Motion state classification engine
#[derive(Debug, Clone)]
pub struct MotionClassifier {
    config: MotionConfig,
    history: MotionHistory,
    stabilizer: Stabilizer,
    stationary: StationaryGate,
    priority: PriorityDetector,
    shake: ShakeDetector,
    arc: ArcDetector,
    rolling: RollingDetector,
    landing: LandingResolver,
    patterns: HistoryBuffer<PatternEvent, PATTERN_HISTORY_CAPACITY>,
    last_timestamp: Option<Timestamp>,
}

impl MotionClassifier {
    /// Build a classifier, rejecting invalid configuration
    pub fn new(config: MotionConfig) -> ConfigResult<Self> {
        if let Err(e) = config.validate() {
            log_warn!("rejected motion config: {}", e);
            return Err(e);
        }

        Ok(Self {
            config,
            history: MotionHistory::new(),
            stabilizer: Stabilizer::new(0),
            stationary: StationaryGate::new(),
            priority: PriorityDetector::new(),
            shake: ShakeDetector::new(),
            arc: ArcDetector::new(),
            rolling: RollingDetector::new(),
            landing: LandingResolver::new(),
            patterns: HistoryBuffer::new(),
            last_timestamp: None,
        })
    }

    /// Classify one reading
    pub fn ingest(&mut self, reading: Reading) -> Classification {
        let reading = self.monotonic(reading);
        let now = reading.timestamp;
        let previous = self.stabilizer.confirmed().state;

        self.history.push(reading);

        let smoothed = Magnitudes::smoothed(&self.history, self.config.smoothing_window);
        let instant = Magnitudes {
            linear: reading.linear_magnitude(),
            gyro: reading.gyro_magnitude(),
            rotation: reading.rotation_speed,
        };

        let mut events = Events::new();

        let (candidate, changed) = match self.priority.evaluate(&reading, previous, &self.config) {
            Some(Priority::FreeFall) => {
                self.interrupt_gestures();
                self.landing.abandon();
                if let Some(event) = self.check_throw(now) {
                    self.record(&mut events, event);
                }
                (MotionState::FreeFall, self.stabilizer.force(MotionState::FreeFall, now))
            }
            Some(Priority::Impact { flight }) => {
                self.interrupt_gestures();
                if let Some(flight) = flight {
                    self.landing.on_impact(flight, now);
                }
                (MotionState::Impact, self.stabilizer.force(MotionState::Impact, now))
            }
            None => self.classify(&reading, &smoothed, previous, &mut events),
        };

        Classification {
            state: self.stabilizer.confirmed(),
            previous,
            candidate,
            changed,
            events,
            confidence: ConfidenceScore::for_reading(&reading),
            energy: instant.energy(),
        }
    }

    /// Read one sample from `adapter` and classify it
    ///
    /// `Ok(None)` means no sample was ready. A sensor failure is returned to
    /// the caller and leaves the confirmed state untouched.
    pub fn poll<A: SensorAdapter>(&mut self, adapter: &mut A) -> Result<Option<Classification>, SensorError> {
        match adapter.read() {
            Ok(reading) => Ok(Some(self.ingest(reading))),
            Err(nb::Error::WouldBlock) => Ok(None),
            Err(nb::Error::Other(e)) => {
                log_warn!(
                    "sensor read failed ({}), holding {}",
                    e,
                    self.stabilizer.confirmed().state.name()
                );
                Err(e)
            }
        }
    }

    /// Current confirmed state
    pub fn state(&self) -> MotionState {
        self.stabilizer.confirmed().state
    }

    /// Current confirmed state with its entry time
    pub fn confirmed(&self) -> ConfirmedState {
        self.stabilizer.confirmed()
    }

    /// Time spent in the current state
    pub fn state_duration(&self, now: Timestamp) -> u64 {
        self.stabilizer.confirmed().duration(now)
    }

    /// Length of the free fall in progress
    ///
    /// `None` as soon as the episode ends, even though the confirmed state
    /// stays FREE_FALL until a debounced candidate has lasted the dwell.
    pub fn free_fall_duration(&self, now: Timestamp) -> Option<u64> {
        self.priority.episode().map(|e| elapsed(e.started_at, now))
    }

    /// Length of the roll in progress
    pub fn rolling_duration(&self, now: Timestamp) -> Option<u64> {
        self.rolling.episode().map(|e| e.duration(now))
    }

    /// Recent pattern events, oldest first
    pub fn recent_patterns(&self) -> impl Iterator<Item = &PatternEvent> {
        self.patterns.oldest_ordered()
    }

    /// Most recent pattern event
    pub fn last_pattern(&self) -> Option<&PatternEvent> {
        self.patterns.recent()
    }

    /// Time since `kind` was last seen, if it is still in the recent history
    pub fn time_since_last(&self, kind: PatternKind, now: Timestamp) -> Option<u64> {
        self.patterns
            .oldest_ordered()
            .filter(|e| e.pattern == kind)
            .last()
            .map(|e| elapsed(e.detected_at, now))
    }

    /// The configuration in use
    pub fn config(&self) -> &MotionConfig {
        &self.config
    }

    /// The reading history
    pub fn history(&self) -> &MotionHistory {
        &self.history
    }

    /// Back to UNKNOWN with no history, as if freshly constructed
    pub fn reset(&mut self) {
        self.history.clear();
        self.stabilizer = Stabilizer::new(self.last_timestamp.unwrap_or(0));
        self.stationary.reset();
        self.priority.reset();
        self.interrupt_gestures();
        self.landing.abandon();
        self.patterns = HistoryBuffer::new();
        self.last_timestamp = None;
    }

    fn classify(
        &mut self,
        reading: &Reading,
        smoothed: &Magnitudes,
        previous: MotionState,
        events: &mut Events,
    ) -> (MotionState, bool) {
        let now = reading.timestamp;
        let config = self.config;

        if let Some(event) = self.rolling.update(&self.history, &config, now) {
            self.record(events, event);
        }
        let rolling = self.rolling.is_active();

        let shake_confirmed = !rolling && self.shake.evaluate(&self.history, &config).confirmed;

        if rolling {
            self.arc.reset();
        } else if let Some(event) = self.arc.update(&self.history, &config, now) {
            self.record(events, event);
        }

        let candidate = resolve(
            &config,
            smoothed,
            previous,
            shake_confirmed,
            reading.shake_flag.unwrap_or(false),
        );

        if let Some(event) = self.shake.observe(candidate == MotionState::Shake, now) {
            self.record(events, event);
        }

        let gate = self
            .stationary
            .observe(candidate, reading.linear_magnitude(), now, &config);

        if let Some(event) = self.landing.update(candidate, now, &config) {
            self.record(events, event);
        }

        let changed = self
            .stabilizer
            .update(candidate, now, &config, gate == GateStatus::Confirmed);

        (candidate, changed)
    }

    // Once per free fall, as soon as it is long enough to be a flight
    fn check_throw(&mut self, now: Timestamp) -> Option<PatternEvent> {
        let episode = *self.priority.episode()?;
        if episode.throw_checked || elapsed(episode.started_at, now) < self.config.free_fall_min_duration_ms {
            return None;
        }

        let thrown = launch_preceded(&self.history, episode.started_at, &self.config);
        self.priority.record_throw_check(thrown);
        thrown.then(|| PatternEvent::new(PatternKind::Throw, now))
    }

    fn interrupt_gestures(&mut self) {
        self.stationary.reset();
        self.rolling.interrupt();
        self.shake.reset();
        self.arc.reset();
    }

    fn record(&mut self, events: &mut Events, event: PatternEvent) {
        log_info!("{} at t={}", event.pattern.name(), event.detected_at);
        self.patterns.write(event);
        if events.push(event).is_err() {
            log_warn!("dropped {} event, per-reading limit reached", event.pattern.name());
        }
    }

    fn monotonic(&mut self, mut reading: Reading) -> Reading {
        if let Some(last) = self.last_timestamp {
            if reading.timestamp < last {
                log_warn!(
                    "timestamp went backwards ({} < {}), clamping",
                    reading.timestamp,
                    last
                );
                reading.timestamp = last;
            }
        }
        self.last_timestamp = Some(reading.timestamp);
        reading
    }
}
