//! Sensor adapter boundary
//!
//! The physical driver (bus transport, feature enablement, calibration) lives
//! outside this crate. It plugs in through `SensorAdapter`, a non-blocking
//! read in the `nb` style:
//!
//! - `Ok(reading)`: a new sample is ready
//! - `Err(nb::Error::WouldBlock)`: nothing new yet, poll again later
//! - `Err(nb::Error::Other(e))`: the sensor is unavailable
//!
//! Scheduling belongs to the caller. The classifier never sleeps or spins.

use crate::errors::SensorError;
use crate::reading::Reading;

/// Source of readings
pub trait SensorAdapter {
    /// Read the next sample without blocking
    fn read(&mut self) -> nb::Result<Reading, SensorError>;
}

impl<A: SensorAdapter + ?Sized> SensorAdapter for &mut A {
    fn read(&mut self) -> nb::Result<Reading, SensorError> {
        (**self).read()
    }
}

/// Replays a recorded session, including recorded read failures
///
/// ## Use Cases
///
/// 1. **Unit Testing**: feed known sequences through the real poll path
/// 2. **Tuning**: re-run a captured session against a new `MotionConfig`
///
/// Once exhausted it reports `WouldBlock`, like a sensor with no new data.
///
/// ```rust
/// use kinetic_core::{MotionClassifier, MotionConfig, ReadingBuilder, ReplayAdapter, SensorError};
///
/// let frames = [
///     Ok(ReadingBuilder::new(0).build()),
///     Err(SensorError::Timeout),
///     Ok(ReadingBuilder::new(20).build()),
/// ];
///
/// let mut adapter = ReplayAdapter::new(&frames);
/// let mut classifier = MotionClassifier::new(MotionConfig::default()).unwrap();
///
/// assert!(classifier.poll(&mut adapter).is_ok());
/// assert_eq!(classifier.poll(&mut adapter), Err(SensorError::Timeout));
/// assert!(classifier.poll(&mut adapter).is_ok());
/// assert!(adapter.is_exhausted());
/// ```
pub struct ReplayAdapter<'a> {
    /// Recorded frames
    frames: &'a [Result<Reading, SensorError>],
    /// Next frame to replay
    position: usize,
}

impl<'a> ReplayAdapter<'a> {
    /// Create from recorded frames
    pub fn new(frames: &'a [Result<Reading, SensorError>]) -> Self {
        Self { frames, position: 0 }
    }

    /// Rewind to the first frame
    pub fn reset(&mut self) {
        self.position = 0;
    }

    /// Frames replayed so far
    pub fn position(&self) -> usize {
        self.position
    }

    /// True once every frame has been replayed
    pub fn is_exhausted(&self) -> bool {
        self.position >= self.frames.len()
    }
}

impl<'a> SensorAdapter for ReplayAdapter<'a> {
    fn read(&mut self) -> nb::Result<Reading, SensorError> {
        let frame = *self
            .frames
            .get(self.position)
            .ok_or(nb::Error::<SensorError>::WouldBlock)?;
        self.position += 1;
        frame.map_err(nb::Error::Other)
    }
}
