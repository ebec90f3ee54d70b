//! Canned handling sessions
//!
//! Each builder returns a `Session` whose phases can be looked up by the
//! test that replays it.

use super::generators::*;
use super::{Phase, Session};

/// Resting, then small jolts that must not disturb STATIONARY
///
/// Linear magnitude 0.03 with isolated spikes of 0.20-0.28 lasting one or
/// two samples.
pub fn tiny_jolts() -> Session {
    let mut session = Session::new(20);
    session.add(Phase::Rest, 100, |t, rng| resting(t, 0.03, rng));

    for spike in [&[0.20][..], &[0.15][..], &[0.26, 0.28][..], &[0.22][..], &[0.30, 0.25][..]] {
        for &level in spike {
            session.add(Phase::Jolt, 1, |t, _| resting_exact(t, level));
        }
        session.add(Phase::Rest, 15, |t, rng| resting(t, 0.03, rng));
    }
    session
}

/// Sustained shake, a throw, a landing, more shaking and a second throw
pub fn shake_then_two_throws() -> Session {
    let mut session = Session::new(10);
    session
        .add(Phase::Shake, 35, |t, _| shaking_flagged(t))
        .add(Phase::Fall, 10, |t, _| falling(t))
        .add(Phase::Impact, 1, |t, _| landing(t))
        .add(Phase::Shake, 5, |t, _| shaking_flagged(t))
        .add(Phase::Fall, 10, |t, _| falling(t))
        .add(Phase::Impact, 1, |t, _| landing(t));
    session
}

/// The same two throws, but the shake is only visible in the magnitudes
///
/// No sensor shake flag: SHAKE has to come from the reversal count.
pub fn shaken_by_hand_then_two_throws() -> Session {
    let mut session = Session::new(10);
    session
        .add(Phase::Shake, 60, |t, _| shaking(t, (t / 10) as usize))
        .add(Phase::Fall, 10, |t, _| falling(t))
        .add(Phase::Impact, 1, |t, _| landing(t))
        .add(Phase::Shake, 5, |t, _| shaking(t, (t / 10) as usize))
        .add(Phase::Fall, 10, |t, _| falling(t))
        .add(Phase::Impact, 1, |t, _| landing(t));
    session
}

/// Resting, thrown up, caught, put back down
pub fn throw_and_catch() -> Session {
    let mut session = Session::new(10);
    session
        .add(Phase::Rest, 150, |t, rng| resting(t, 0.02, rng))
        .add(Phase::Launch, 3, |t, _| launching(t))
        .add(Phase::Fall, 10, |t, _| falling(t))
        .add(Phase::Impact, 1, |t, _| landing(t))
        .add(Phase::Rest, 200, |t, rng| resting(t, 0.02, rng));
    session
}

/// Falls off the table: no launch, lands, stays on the floor
pub fn drop_to_floor() -> Session {
    let mut session = Session::new(10);
    session
        .add(Phase::Rest, 150, |t, rng| resting(t, 0.02, rng))
        .add(Phase::Fall, 10, |t, _| falling(t))
        .add(Phase::Impact, 1, |t, _| landing(t))
        .add(Phase::Rest, 200, |t, rng| resting(t, 0.02, rng));
    session
}

/// Rests, then rolls steadily for a second
pub fn roll_across_table() -> Session {
    let mut session = Session::new(20);
    session
        .add(Phase::Rest, 60, |t, rng| resting(t, 0.02, rng))
        .add(Phase::Other, 50, |t, _| rolling(t));
    session
}
