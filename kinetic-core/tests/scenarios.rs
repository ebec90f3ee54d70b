//! End-to-end handling sessions
//!
//! Each test replays a canned session through a fresh classifier and checks
//! the confirmed state timeline and the pattern events it produced.

mod common;

use common::{run, scenarios, state_sequence, Phase};
use kinetic_core::{MotionConfig, MotionState, PatternKind};

#[test]
fn test_tiny_jolts_do_not_leave_stationary() {
    let session = scenarios::tiny_jolts();
    let (_, results) = run(&session, MotionConfig::default());

    let confirmed_at = results
        .iter()
        .position(|r| r.state.state == MotionState::Stationary)
        .map(|i| session.readings[i].timestamp);
    assert_eq!(confirmed_at, Some(1000));

    for (i, result) in results.iter().enumerate().skip(60) {
        assert_eq!(
            result.state.state,
            MotionState::Stationary,
            "left STATIONARY at t={}",
            session.readings[i].timestamp
        );
        assert!(!result.changed);
    }

    assert_eq!(
        state_sequence(&results),
        vec![MotionState::HeldStill, MotionState::Stationary]
    );
}

#[test]
fn test_free_fall_preempts_shake() {
    let session = scenarios::shake_then_two_throws();
    let (_, results) = run(&session, MotionConfig::default());

    // Sensor shake flag plus real motion: SHAKE from the start
    assert_eq!(results[0].state.state, MotionState::Shake);
    assert_eq!(results[34].state.state, MotionState::Shake);

    for i in session.indices(Phase::Fall) {
        assert_eq!(results[i].candidate, MotionState::FreeFall, "reading {}", i);
        assert_eq!(results[i].state.state, MotionState::FreeFall, "reading {}", i);
    }
    for i in session.indices(Phase::Impact) {
        assert_eq!(results[i].state.state, MotionState::Impact, "reading {}", i);
    }

    let falls: Vec<_> = results.iter().filter(|r| r.changed && r.state.state == MotionState::FreeFall).collect();
    assert_eq!(falls.len(), 2);
}

#[test]
fn test_free_fall_preempts_detected_shake() {
    let session = scenarios::shaken_by_hand_then_two_throws();
    let (_, results) = run(&session, MotionConfig::default());

    let first_fall = session.indices(Phase::Fall)[0];
    assert!(session.readings[..first_fall].iter().all(|r| r.shake_flag.is_none()));

    // Reversals confirm the candidate after six samples, the state one dwell later
    assert_ne!(results[4].candidate, MotionState::Shake);
    assert_eq!(results[5].candidate, MotionState::Shake);
    let before_fall = &results[first_fall - 1];
    assert_eq!(before_fall.state.state, MotionState::Shake);
    assert_eq!(before_fall.state.entered_at, 450);
    assert!(results[5].events.iter().any(|e| e.pattern == PatternKind::Shake));

    for i in session.indices(Phase::Fall) {
        assert_eq!(results[i].candidate, MotionState::FreeFall, "reading {}", i);
        assert_eq!(results[i].state.state, MotionState::FreeFall, "reading {}", i);
    }
    for i in session.indices(Phase::Impact) {
        assert_eq!(results[i].state.state, MotionState::Impact, "reading {}", i);
    }

    assert_eq!(results[first_fall].previous, MotionState::Shake);
    let falls = results.iter().filter(|r| r.changed && r.state.state == MotionState::FreeFall).count();
    assert_eq!(falls, 2);
}

#[test]
fn test_throw_and_catch() {
    let session = scenarios::throw_and_catch();
    let (classifier, results) = run(&session, MotionConfig::default());

    assert_eq!(
        state_sequence(&results),
        vec![
            MotionState::HeldStill,
            MotionState::Stationary,
            MotionState::FreeFall,
            MotionState::Impact,
            MotionState::Stationary,
        ]
    );

    let events: Vec<_> = results.iter().flat_map(|r| r.events.iter().copied()).collect();
    let kinds: Vec<_> = events.iter().map(|e| e.pattern).collect();
    assert_eq!(kinds, vec![PatternKind::Throw, PatternKind::Catch]);

    // Flight from 1530 to the impact reading at 1630
    let throw = events[0];
    assert_eq!(throw.detected_at, 1570);
    let catch = events[1];
    assert_eq!(catch.detected_at, 1680);
    assert_eq!(catch.duration_ms, Some(100));

    // Back on the table: gate (1000 ms) from the first quiet candidate at 1660
    let settled_at = results
        .iter()
        .enumerate()
        .skip(160)
        .find(|(_, r)| r.changed && r.state.state == MotionState::Stationary)
        .map(|(i, _)| session.readings[i].timestamp);
    assert_eq!(settled_at, Some(2660));

    let end = session.readings.last().map(|r| r.timestamp).unwrap_or(0);
    assert_eq!(classifier.last_pattern().map(|e| e.pattern), Some(PatternKind::Catch));
    assert_eq!(classifier.time_since_last(PatternKind::Throw, end), Some(end - 1570));
}

#[test]
fn test_drop_without_launch() {
    let session = scenarios::drop_to_floor();
    let (classifier, results) = run(&session, MotionConfig::default());

    let events: Vec<_> = results.iter().flat_map(|r| r.events.iter().copied()).collect();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].pattern, PatternKind::Drop);
    assert_eq!(events[0].detected_at, 1650);
    assert_eq!(events[0].duration_ms, Some(100));

    assert!(classifier.time_since_last(PatternKind::Throw, 5000).is_none());
    assert_eq!(classifier.state(), MotionState::Stationary);
}

#[test]
fn test_roll_across_table() {
    let session = scenarios::roll_across_table();
    let (classifier, results) = run(&session, MotionConfig::default());

    let events: Vec<_> = results.iter().flat_map(|r| r.events.iter().copied()).collect();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].pattern, PatternKind::Rolling);
    assert_eq!(events[0].detected_at, 1700);
    assert_eq!(events[0].duration_ms, Some(500));

    // Episode started with the oldest reading of the first full window
    assert_eq!(classifier.rolling_duration(2180), Some(980));
    assert_eq!(classifier.state(), MotionState::Moving);
}

#[test]
fn test_free_fall_duration_reported_in_flight() {
    let session = scenarios::drop_to_floor();
    let mut classifier = kinetic_core::MotionClassifier::new(MotionConfig::default()).unwrap();

    for reading in &session.readings[..155] {
        classifier.ingest(*reading);
    }
    // Fall began at 1500, latest reading 1540
    assert_eq!(classifier.free_fall_duration(1540), Some(40));

    for reading in &session.readings[155..] {
        classifier.ingest(*reading);
    }
    assert_eq!(classifier.free_fall_duration(4000), None);
}
