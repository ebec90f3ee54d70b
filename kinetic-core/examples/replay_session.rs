//! Replaying a recorded handling session
//!
//! This example demonstrates how to:
//! - Stamp readings from a `TimeSource`
//! - Feed a classifier through a `SensorAdapter`
//! - React to state changes and pattern events
//! - Load threshold overrides from a JSON file
//!
//! Run with `cargo run --example replay_session [tuning.json]`.

use std::fs;

use kinetic_core::time::{FixedTime, MonotonicClock};
use kinetic_core::{
    MotionClassifier, MotionConfig, Reading, ReadingBuilder, ReplayAdapter, SensorError, TimeSource, Vec3,
};

const STEP_MS: u64 = 10;

fn load_config() -> MotionConfig {
    let Some(path) = std::env::args().nth(1) else {
        return MotionConfig::default();
    };

    match fs::read_to_string(&path).map(|text| serde_json::from_str::<MotionConfig>(&text)) {
        Ok(Ok(config)) => {
            println!("Loaded tuning from {}", path);
            config
        }
        Ok(Err(e)) => {
            println!("Could not parse {}: {}, using defaults", path, e);
            MotionConfig::default()
        }
        Err(e) => {
            println!("Could not read {}: {}, using defaults", path, e);
            MotionConfig::default()
        }
    }
}

fn reading(clock: &mut FixedTime, raw: Vec3, linear: Vec3, gyro: Vec3) -> Reading {
    let reading = ReadingBuilder::stamped(&*clock)
        .raw_acceleration(raw)
        .linear_acceleration(linear)
        .angular_velocity(gyro)
        .build();
    clock.advance(STEP_MS);
    reading
}

/// Resting, thrown, caught, set down; one sensor dropout on the way
fn record_session() -> Vec<Result<Reading, SensorError>> {
    let mut clock = FixedTime::new(0);
    let mut frames = Vec::new();

    let table = (Vec3::new(0.0, 0.0, 9.81), Vec3::new(0.02, 0.01, 0.0), Vec3::new(0.01, 0.0, 0.0));
    let launch = (Vec3::new(12.0, 5.0, 9.81), Vec3::new(12.0, 5.0, 0.0), Vec3::new(0.5, 0.3, 0.0));
    let flight = (Vec3::new(1.5, 1.2, 0.8), Vec3::new(0.8, 0.6, 0.4), Vec3::new(5.0, 4.0, 3.0));
    let landing = (Vec3::new(25.0, 20.0, 15.0), Vec3::new(18.0, 15.0, 12.0), Vec3::new(1.0, 0.5, 0.0));

    for (count, (raw, linear, gyro)) in [(150, table), (3, launch), (10, flight), (1, landing)] {
        for _ in 0..count {
            frames.push(Ok(reading(&mut clock, raw, linear, gyro)));
        }
    }

    frames.push(Err(SensorError::Timeout));

    let (raw, linear, gyro) = table;
    for _ in 0..150 {
        frames.push(Ok(reading(&mut clock, raw, linear, gyro)));
    }
    frames
}

fn main() {
    println!("=== Motion Replay Example ===\n");

    let config = load_config();
    let mut classifier = match MotionClassifier::new(config) {
        Ok(classifier) => classifier,
        Err(e) => {
            println!("Invalid configuration: {}", e);
            return;
        }
    };

    let frames = record_session();
    let mut adapter = ReplayAdapter::new(&frames);
    let wall = MonotonicClock::new();
    let mut processed = 0usize;

    while !adapter.is_exhausted() {
        match classifier.poll(&mut adapter) {
            Ok(Some(result)) => {
                processed += 1;
                let t = result.state.entered_at;

                if result.changed {
                    println!(
                        "  t={:>5} ms  {:<11} -> {:<11} energy {:.2}",
                        t,
                        result.previous.name(),
                        result.state.state.name(),
                        result.energy
                    );
                }
                if result.entered_motion() {
                    println!("             (idle behaviour interrupted)");
                }
                for event in &result.events {
                    match event.duration_ms {
                        Some(ms) => println!("  t={:>5} ms  event {} ({} ms)", event.detected_at, event.pattern.name(), ms),
                        None => println!("  t={:>5} ms  event {}", event.detected_at, event.pattern.name()),
                    }
                }
            }
            Ok(None) => break,
            Err(e) => println!("  sensor error: {} (holding {})", e, classifier.state().name()),
        }
    }

    println!("\nProcessed {} readings in {} ms", processed, wall.now());
    println!("Final state: {}", classifier.state().name());
    println!("Recent patterns:");
    for event in classifier.recent_patterns() {
        println!("  {} at t={}", event.pattern.name(), event.detected_at);
    }
}
