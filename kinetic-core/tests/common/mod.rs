//! Common test utilities for integration tests
//!
//! This module provides:
//! - Reading generators for each physical situation (`generators`)
//! - Canned handling sessions used by the scenario tests (`scenarios`)
//! - `Session`, a timeline builder, and `run`, which feeds a session through
//!   a classifier and keeps every classification

#![allow(dead_code)]

use kinetic_core::{Classification, MotionClassifier, MotionConfig, MotionState, Reading, Timestamp};

pub mod generators;
pub mod scenarios;

/// Deterministic xorshift noise source
pub struct TestRng {
    state: u32,
}

impl TestRng {
    pub fn new(seed: u32) -> Self {
        Self { state: seed.max(1) }
    }

    pub fn next_u32(&mut self) -> u32 {
        self.state ^= self.state << 13;
        self.state ^= self.state >> 17;
        self.state ^= self.state << 5;
        self.state
    }

    pub fn next_f32(&mut self) -> f32 {
        (self.next_u32() >> 8) as f32 / 16777216.0
    }

    pub fn gen_range(&mut self, min: f32, max: f32) -> f32 {
        min + self.next_f32() * (max - min)
    }
}

/// A labelled stretch of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Rest,
    Jolt,
    Launch,
    Fall,
    Impact,
    Shake,
    Other,
}

/// Timeline of readings at a fixed sample period
pub struct Session {
    pub readings: Vec<Reading>,
    pub phases: Vec<Phase>,
    pub next_t: Timestamp,
    pub step_ms: u64,
    pub rng: TestRng,
}

impl Session {
    pub fn new(step_ms: u64) -> Self {
        Self {
            readings: Vec::new(),
            phases: Vec::new(),
            next_t: 0,
            step_ms,
            rng: TestRng::new(42),
        }
    }

    /// Append `count` readings produced by `make(t, rng)`
    pub fn add(
        &mut self,
        phase: Phase,
        count: usize,
        mut make: impl FnMut(Timestamp, &mut TestRng) -> Reading,
    ) -> &mut Self {
        for _ in 0..count {
            let reading = make(self.next_t, &mut self.rng);
            self.readings.push(reading);
            self.phases.push(phase);
            self.next_t += self.step_ms;
        }
        self
    }

    /// Index range of every reading in `phase`
    pub fn indices(&self, phase: Phase) -> Vec<usize> {
        self.phases
            .iter()
            .enumerate()
            .filter(|(_, p)| **p == phase)
            .map(|(i, _)| i)
            .collect()
    }
}

/// Feed every reading of `session` and keep the results
pub fn run(session: &Session, config: MotionConfig) -> (MotionClassifier, Vec<Classification>) {
    let mut classifier = MotionClassifier::new(config).expect("valid config");
    let results = session
        .readings
        .iter()
        .map(|reading| classifier.ingest(*reading))
        .collect();
    (classifier, results)
}

/// Confirmed states with consecutive duplicates collapsed
pub fn state_sequence(results: &[Classification]) -> Vec<MotionState> {
    let mut sequence: Vec<MotionState> = Vec::new();
    for result in results {
        if sequence.last() != Some(&result.state.state) {
            sequence.push(result.state.state);
        }
    }
    sequence
}
