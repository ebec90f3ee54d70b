//! Window statistics
//!
//! Small, allocation-free helpers shared by the detectors. Every function
//! returns `None` (or zero reversals) for windows too short to say anything,
//! so callers treat a degenerate window as "not yet confirmable".

use heapless::Vec;
use libm::sqrtf;

use crate::constants::buffers::HISTORY_CAPACITY;

/// Magnitude series large enough for any history window
pub type Series = Vec<f32, HISTORY_CAPACITY>;

/// Collect up to `HISTORY_CAPACITY` values; extra values are dropped
pub fn series<I: IntoIterator<Item = f32>>(values: I) -> Series {
    let mut out = Series::new();
    for v in values {
        if out.push(v).is_err() {
            break;
        }
    }
    out
}

/// Arithmetic mean
pub fn mean(values: &[f32]) -> Option<f32> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f32>() / values.len() as f32)
}

/// Sample variance (n - 1 denominator). Needs at least two values.
pub fn variance(values: &[f32]) -> Option<f32> {
    if values.len() < 2 {
        return None;
    }
    let m = mean(values)?;
    let sum_sq: f32 = values.iter().map(|v| (v - m) * (v - m)).sum();
    Some(sum_sq / (values.len() - 1) as f32)
}

/// Sample standard deviation
pub fn std_dev(values: &[f32]) -> Option<f32> {
    variance(values).map(sqrtf)
}

/// Largest value
pub fn peak(values: &[f32]) -> Option<f32> {
    values.iter().copied().reduce(f32::max)
}

/// Smallest value
pub fn trough(values: &[f32]) -> Option<f32> {
    values.iter().copied().reduce(f32::min)
}

#[derive(Clone, Copy, PartialEq)]
enum Direction {
    Unknown,
    Rising,
    Falling,
}

/// Count direction changes larger than `delta` in a magnitude sequence
///
/// Zig-zag filter: the running extreme moves with the trend, and a reversal
/// is only counted once the sequence has retreated at least `delta` from
/// that extreme. The first move of `delta` establishes a direction without
/// counting, so a single hump (`[1, 2, 4, 6, 4, 2, 1]`) is one reversal and
/// sub-delta jitter is none.
pub fn count_reversals(values: &[f32], delta: f32) -> usize {
    if values.len() < 3 {
        return 0;
    }

    let mut direction = Direction::Unknown;
    let mut extreme = values[0];
    let mut reversals = 0;

    for &v in &values[1..] {
        match direction {
            Direction::Unknown => {
                if v - extreme >= delta {
                    direction = Direction::Rising;
                    extreme = v;
                } else if extreme - v >= delta {
                    direction = Direction::Falling;
                    extreme = v;
                }
            }
            Direction::Rising => {
                if v > extreme {
                    extreme = v;
                } else if extreme - v >= delta {
                    reversals += 1;
                    direction = Direction::Falling;
                    extreme = v;
                }
            }
            Direction::Falling => {
                if v < extreme {
                    extreme = v;
                } else if v - extreme >= delta {
                    reversals += 1;
                    direction = Direction::Rising;
                    extreme = v;
                }
            }
        }
    }

    reversals
}
