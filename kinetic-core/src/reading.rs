//! Sensor readings
//!
//! A `Reading` is one timestamped IMU sample with every channel the
//! classifier uses. It is a plain `Copy` value: built once at the adapter
//! boundary, never mutated afterwards.
//!
//! Validation happens here and only here. `ReadingBuilder` accepts channels
//! as typed vectors or as raw slices straight from a driver; anything of the
//! wrong length or containing NaN/infinity becomes a zero vector, is counted
//! in `degraded_channels`, and a warning is logged. A vector channel that was
//! never supplied is treated the same way. `degraded_mask` records which
//! vector channels were zeroed, so detectors can ignore a stand-in zero.

use libm::sqrtf;

use crate::time::{TimeSource, Timestamp};

/// Three-axis vector (m/s² or rad/s depending on channel)
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Vec3 {
    /// X axis
    pub x: f32,
    /// Y axis
    pub y: f32,
    /// Z axis
    pub z: f32,
}

impl Vec3 {
    /// All axes zero
    pub const ZERO: Self = Self { x: 0.0, y: 0.0, z: 0.0 };

    /// Create from components
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// Parse a driver slice. Requires exactly three finite values.
    pub fn from_slice(values: &[f32]) -> Option<Self> {
        match values {
            [x, y, z] => Self::new(*x, *y, *z).finite(),
            _ => None,
        }
    }

    /// Euclidean length
    pub fn magnitude(&self) -> f32 {
        sqrtf(self.x * self.x + self.y * self.y + self.z * self.z)
    }

    /// Component by axis index (0 = x, 1 = y, 2 = z)
    pub fn axis(&self, index: usize) -> f32 {
        match index {
            0 => self.x,
            1 => self.y,
            _ => self.z,
        }
    }

    fn finite(self) -> Option<Self> {
        if self.x.is_finite() && self.y.is_finite() && self.z.is_finite() {
            Some(self)
        } else {
            None
        }
    }
}

/// Stability classification reported by the sensor's own classifier
///
/// Advisory only. Carried through for consumers, never trusted over the
/// measured magnitudes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StabilityTag {
    /// Resting on a table
    OnTable,
    /// Stationary but not necessarily on a table
    Stationary,
    /// Stable in hand
    Stable,
    /// In motion
    Motion,
    /// Sensor could not decide
    Unknown,
}

/// Calibration accuracy reported by the sensor
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SensorAccuracy {
    /// Uncalibrated
    Unreliable,
    /// Low accuracy
    Low,
    /// Medium accuracy
    Medium,
    /// Fully calibrated
    High,
}

impl SensorAccuracy {
    /// Map the 0-3 status code most IMU fusion firmwares report
    pub fn from_status(status: u8) -> Self {
        match status {
            0 => Self::Unreliable,
            1 => Self::Low,
            2 => Self::Medium,
            _ => Self::High,
        }
    }

    /// Multiplier applied to classification confidence
    pub fn confidence_factor(&self) -> f32 {
        match self {
            Self::Unreliable => 0.25,
            Self::Low => 0.5,
            Self::Medium => 0.75,
            Self::High => 1.0,
        }
    }
}

/// Vector channels of a reading
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Channel {
    /// Accelerometer including gravity
    RawAcceleration,
    /// Accelerometer with gravity removed
    LinearAcceleration,
    /// Gyroscope
    AngularVelocity,
}

impl Channel {
    /// Every vector channel
    pub const ALL: [Channel; 3] = [
        Self::RawAcceleration,
        Self::LinearAcceleration,
        Self::AngularVelocity,
    ];

    /// Bit of this channel in `Reading::degraded_mask`
    pub const fn bit(&self) -> u8 {
        match self {
            Self::RawAcceleration => 0b001,
            Self::LinearAcceleration => 0b010,
            Self::AngularVelocity => 0b100,
        }
    }

    /// Channel name for logs
    pub fn name(&self) -> &'static str {
        match self {
            Self::RawAcceleration => "raw_acceleration",
            Self::LinearAcceleration => "linear_acceleration",
            Self::AngularVelocity => "angular_velocity",
        }
    }
}

/// One IMU sample
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Reading {
    /// Capture time (ms)
    pub timestamp: Timestamp,
    /// Acceleration including gravity (m/s²)
    pub raw_acceleration: Vec3,
    /// Acceleration with gravity removed (m/s²)
    pub linear_acceleration: Vec3,
    /// Angular velocity (rad/s)
    pub angular_velocity: Vec3,
    /// Rotation speed derived from the orientation estimate (rad/s)
    pub rotation_speed: f32,
    /// Sensor-side stability classification, if the sensor provides one
    pub stability: Option<StabilityTag>,
    /// Sensor-side shake detection flag, if the sensor provides one
    pub shake_flag: Option<bool>,
    /// Sensor calibration accuracy, if known
    pub accuracy: Option<SensorAccuracy>,
    /// Number of fields replaced by zero because they were malformed or missing
    pub degraded_channels: u8,
    /// Vector channels replaced by zero, one `Channel::bit` each
    pub degraded_mask: u8,
}

impl Reading {
    /// Magnitude of the raw (gravity-included) acceleration
    pub fn raw_magnitude(&self) -> f32 {
        self.raw_acceleration.magnitude()
    }

    /// Magnitude of the linear (gravity-removed) acceleration
    pub fn linear_magnitude(&self) -> f32 {
        self.linear_acceleration.magnitude()
    }

    /// Magnitude of the angular velocity
    pub fn gyro_magnitude(&self) -> f32 {
        self.angular_velocity.magnitude()
    }

    /// True if any channel had to be zeroed
    pub fn is_degraded(&self) -> bool {
        self.degraded_channels > 0
    }

    /// True if `channel` holds a zero stand-in rather than a measurement
    pub fn is_channel_degraded(&self, channel: Channel) -> bool {
        self.degraded_mask & channel.bit() != 0
    }
}

/// Builder that validates channels at the adapter boundary
///
/// ```rust
/// use kinetic_core::{ReadingBuilder, Vec3};
/// use kinetic_core::reading::Channel;
///
/// let reading = ReadingBuilder::new(500)
///     .raw_acceleration(Vec3::new(0.0, 0.0, 9.8))
///     .linear_acceleration(Vec3::new(0.02, 0.0, 0.0))
///     .channel_slice(Channel::AngularVelocity, &[0.1, 0.2]) // wrong length
///     .build();
///
/// assert_eq!(reading.angular_velocity, Vec3::ZERO);
/// assert_eq!(reading.degraded_channels, 1);
/// assert!(reading.is_channel_degraded(Channel::AngularVelocity));
/// ```
#[derive(Debug, Clone)]
pub struct ReadingBuilder {
    timestamp: Timestamp,
    raw_acceleration: Vec3,
    linear_acceleration: Vec3,
    angular_velocity: Vec3,
    rotation_speed: Option<f32>,
    stability: Option<StabilityTag>,
    shake_flag: Option<bool>,
    accuracy: Option<SensorAccuracy>,
    degraded_channels: u8,
    degraded_mask: u8,
    supplied: u8,
}

impl ReadingBuilder {
    /// Start a reading at `timestamp` with all channels zero
    pub fn new(timestamp: Timestamp) -> Self {
        Self {
            timestamp,
            raw_acceleration: Vec3::ZERO,
            linear_acceleration: Vec3::ZERO,
            angular_velocity: Vec3::ZERO,
            rotation_speed: None,
            stability: None,
            shake_flag: None,
            accuracy: None,
            degraded_channels: 0,
            degraded_mask: 0,
            supplied: 0,
        }
    }

    /// Start a reading stamped by a clock
    pub fn stamped<C: TimeSource>(clock: &C) -> Self {
        Self::new(clock.now())
    }

    /// Set acceleration including gravity
    pub fn raw_acceleration(self, value: Vec3) -> Self {
        self.vector(Channel::RawAcceleration, value.finite())
    }

    /// Set acceleration with gravity removed
    pub fn linear_acceleration(self, value: Vec3) -> Self {
        self.vector(Channel::LinearAcceleration, value.finite())
    }

    /// Set angular velocity
    pub fn angular_velocity(self, value: Vec3) -> Self {
        self.vector(Channel::AngularVelocity, value.finite())
    }

    /// Set a vector channel from an untyped driver slice
    pub fn channel_slice(self, channel: Channel, values: &[f32]) -> Self {
        self.vector(channel, Vec3::from_slice(values))
    }

    /// Set rotation speed. Defaults to the gyro magnitude when never set.
    pub fn rotation_speed(mut self, value: f32) -> Self {
        if value.is_finite() && value >= 0.0 {
            self.rotation_speed = Some(value);
        } else {
            log_warn!("malformed rotation_speed at t={}, using zero", self.timestamp);
            self.rotation_speed = Some(0.0);
            self.degraded_channels = self.degraded_channels.saturating_add(1);
        }
        self
    }

    /// Attach the sensor's stability classification
    pub fn stability(mut self, tag: StabilityTag) -> Self {
        self.stability = Some(tag);
        self
    }

    /// Attach the sensor's shake flag
    pub fn shake_flag(mut self, flag: bool) -> Self {
        self.shake_flag = Some(flag);
        self
    }

    /// Attach the sensor's calibration accuracy
    pub fn accuracy(mut self, accuracy: SensorAccuracy) -> Self {
        self.accuracy = Some(accuracy);
        self
    }

    /// Finish the reading
    ///
    /// Vector channels that were never set are zero and count as degraded.
    pub fn build(mut self) -> Reading {
        for channel in Channel::ALL {
            if self.supplied & channel.bit() == 0 {
                log_warn!(
                    "missing {} at t={}, using zero vector",
                    channel.name(),
                    self.timestamp
                );
                self.degraded_channels = self.degraded_channels.saturating_add(1);
                self.degraded_mask |= channel.bit();
            }
        }

        Reading {
            timestamp: self.timestamp,
            raw_acceleration: self.raw_acceleration,
            linear_acceleration: self.linear_acceleration,
            angular_velocity: self.angular_velocity,
            rotation_speed: self
                .rotation_speed
                .unwrap_or_else(|| self.angular_velocity.magnitude()),
            stability: self.stability,
            shake_flag: self.shake_flag,
            accuracy: self.accuracy,
            degraded_channels: self.degraded_channels,
            degraded_mask: self.degraded_mask,
        }
    }

    fn vector(mut self, channel: Channel, value: Option<Vec3>) -> Self {
        self.supplied |= channel.bit();

        let value = match value {
            Some(v) => v,
            None => {
                log_warn!(
                    "malformed {} at t={}, using zero vector",
                    channel.name(),
                    self.timestamp
                );
                self.degraded_channels = self.degraded_channels.saturating_add(1);
                self.degraded_mask |= channel.bit();
                Vec3::ZERO
            }
        };

        match channel {
            Channel::RawAcceleration => self.raw_acceleration = value,
            Channel::LinearAcceleration => self.linear_acceleration = value,
            Channel::AngularVelocity => self.angular_velocity = value,
        }
        self
    }
}
