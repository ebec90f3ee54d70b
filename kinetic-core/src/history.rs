//! Motion history
//!
//! Fixed-capacity, arrival-ordered record of recent readings. Every
//! window-based detector reads from the same history, so a reading is stored
//! once no matter how many detectors look at it.

use crate::buffer::{CircularBuffer, CircularBufferIter};
use crate::constants::buffers::HISTORY_CAPACITY;
use crate::reading::Reading;
use crate::time::Timestamp;

/// Ring buffer of the most recent readings
#[derive(Debug, Clone, Default)]
pub struct MotionHistory {
    readings: CircularBuffer<Reading, HISTORY_CAPACITY>,
}

impl MotionHistory {
    /// Empty history
    pub const fn new() -> Self {
        Self {
            readings: CircularBuffer::new(),
        }
    }

    /// Append a reading, evicting the oldest when full
    pub fn push(&mut self, reading: Reading) {
        self.readings.push(reading);
    }

    /// The newest `n` readings (or fewer), oldest first
    pub fn window(&self, n: usize) -> CircularBufferIter<'_, Reading, HISTORY_CAPACITY> {
        self.readings.window(n)
    }

    /// Readings with `from <= timestamp < until`, oldest first
    pub fn between(&self, from: Timestamp, until: Timestamp) -> impl Iterator<Item = &Reading> {
        self.readings
            .iter()
            .filter(move |r| r.timestamp >= from && r.timestamp < until)
    }

    /// Most recent reading
    pub fn latest(&self) -> Option<&Reading> {
        self.readings.last()
    }

    /// Number of readings held
    pub fn len(&self) -> usize {
        self.readings.len()
    }

    /// True before the first push
    pub fn is_empty(&self) -> bool {
        self.readings.is_empty()
    }

    /// Maximum number of readings held
    pub const fn capacity(&self) -> usize {
        HISTORY_CAPACITY
    }

    /// Drop every reading
    pub fn clear(&mut self) {
        self.readings.clear();
    }
}
