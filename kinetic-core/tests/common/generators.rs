//! Reading generators for each physical situation
//!
//! Values follow what the IMU reports for the toy:
//! - on a desk: ~0.02-0.05 m/s² linear noise, gravity on z
//! - shaken: raw ~(15, 12, 8), linear ~(8, 6, 4), device shake flag set
//! - in flight: raw ~(1.5, 1.2, 0.8), tumbling at ~7 rad/s
//! - landing: raw ~(25, 20, 15)

use kinetic_core::{Reading, ReadingBuilder, Timestamp, Vec3};

use super::TestRng;

const GRAVITY: f32 = 9.81;

/// Resting on a surface with small sensor noise around `linear`
pub fn resting(t: Timestamp, linear: f32, rng: &mut TestRng) -> Reading {
    let jitter = rng.gen_range(-0.003, 0.003);
    ReadingBuilder::new(t)
        .raw_acceleration(Vec3::new(0.0, 0.0, GRAVITY))
        .linear_acceleration(Vec3::new(linear + jitter, 0.0, 0.0))
        .angular_velocity(Vec3::new(0.01, 0.0, 0.0))
        .build()
}

/// Resting with an exact linear magnitude, no noise
pub fn resting_exact(t: Timestamp, linear: f32) -> Reading {
    ReadingBuilder::new(t)
        .raw_acceleration(Vec3::new(0.0, 0.0, GRAVITY))
        .linear_acceleration(Vec3::new(linear, 0.0, 0.0))
        .angular_velocity(Vec3::new(0.01, 0.0, 0.0))
        .build()
}

/// Shaken, with the sensor's own shake flag set
pub fn shaking_flagged(t: Timestamp) -> Reading {
    ReadingBuilder::new(t)
        .raw_acceleration(Vec3::new(15.0, 12.0, 8.0))
        .linear_acceleration(Vec3::new(8.0, 6.0, 4.0))
        .angular_velocity(Vec3::new(2.0, 1.5, 1.0))
        .shake_flag(true)
        .build()
}

/// Vigorous back-and-forth shake without any sensor flag
pub fn shaking(t: Timestamp, index: usize) -> Reading {
    let linear = if index % 2 == 0 { Vec3::new(4.0, 1.0, 0.0) } else { Vec3::new(13.0, 5.0, 2.0) };
    ReadingBuilder::new(t)
        .raw_acceleration(Vec3::new(linear.x, linear.y, linear.z + GRAVITY))
        .linear_acceleration(linear)
        .angular_velocity(Vec3::new(2.0, 1.0, 0.5))
        .build()
}

/// Near weightless and tumbling
pub fn falling(t: Timestamp) -> Reading {
    ReadingBuilder::new(t)
        .raw_acceleration(Vec3::new(1.5, 1.2, 0.8))
        .linear_acceleration(Vec3::new(0.8, 0.6, 0.4))
        .angular_velocity(Vec3::new(5.0, 4.0, 3.0))
        .build()
}

/// Launch push just before release (~13 m/s² linear)
pub fn launching(t: Timestamp) -> Reading {
    ReadingBuilder::new(t)
        .raw_acceleration(Vec3::new(12.0, 5.0, GRAVITY))
        .linear_acceleration(Vec3::new(12.0, 5.0, 0.0))
        .angular_velocity(Vec3::new(0.5, 0.3, 0.0))
        .build()
}

/// Landing spike
pub fn landing(t: Timestamp) -> Reading {
    ReadingBuilder::new(t)
        .raw_acceleration(Vec3::new(25.0, 20.0, 15.0))
        .linear_acceleration(Vec3::new(18.0, 15.0, 12.0))
        .angular_velocity(Vec3::new(1.0, 0.5, 0.0))
        .build()
}

/// Carried around: moderate acceleration and rotation
pub fn carried(t: Timestamp) -> Reading {
    ReadingBuilder::new(t)
        .raw_acceleration(Vec3::new(2.0, 1.0, 10.5))
        .linear_acceleration(Vec3::new(2.0, 1.0, 0.5))
        .angular_velocity(Vec3::new(0.8, 0.2, 0.1))
        .build()
}

/// Rolling across a table about the x axis
pub fn rolling(t: Timestamp) -> Reading {
    ReadingBuilder::new(t)
        .raw_acceleration(Vec3::new(0.0, 0.3, GRAVITY))
        .linear_acceleration(Vec3::new(0.3, 0.2, 0.0))
        .angular_velocity(Vec3::new(3.0, 0.2, 0.1))
        .build()
}
