//! Motion state classification engine for handheld devices
//!
//! Turns a noisy, irregularly sampled IMU stream into a stable motion state
//! (resting, held, moving, shaken, falling, impacted) plus discrete gesture
//! events (throw, catch, drop, arc swing, rolling, shake).
//!
//! Key constraints:
//! - Runs without an allocator (`no_std` with `default-features = false`)
//! - No heap allocation in the ingest path
//! - All timing comes from reading timestamps, never from tick counts
//!
//! ```no_run
//! use kinetic_core::{MotionClassifier, MotionConfig, ReadingBuilder, Vec3};
//!
//! let mut classifier = MotionClassifier::new(MotionConfig::default())?;
//!
//! let reading = ReadingBuilder::new(1_000)
//!     .raw_acceleration(Vec3::new(0.0, 0.0, 9.81))
//!     .linear_acceleration(Vec3::new(0.02, 0.0, 0.0))
//!     .angular_velocity(Vec3::new(0.01, 0.0, 0.0))
//!     .build();
//!
//! let result = classifier.ingest(reading);
//! if result.entered_motion() {
//!     // interrupt idle behaviour
//! }
//! # Ok::<(), kinetic_core::ConfigError>(())
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![deny(unsafe_code)]
#![warn(missing_docs)]

#[macro_use]
mod macros;

pub mod adapter;
pub mod buffer;
pub mod classifier;
pub mod confidence;
pub mod config;
pub mod constants;
pub mod detectors;
pub mod errors;
pub mod history;
pub mod reading;
pub mod state;
pub mod stats;
pub mod time;

#[cfg(feature = "std")]
pub mod shared;

// Public API
pub use adapter::{ReplayAdapter, SensorAdapter};
pub use classifier::{Classification, MotionClassifier};
pub use confidence::ConfidenceScore;
pub use config::MotionConfig;
pub use errors::{ConfigError, ConfigResult, SensorError};
pub use history::MotionHistory;
pub use reading::{Reading, ReadingBuilder, SensorAccuracy, StabilityTag, Vec3};
pub use state::{ConfirmedState, MotionState, PatternEvent, PatternKind};
pub use time::{TimeSource, Timestamp};

#[cfg(feature = "std")]
pub use shared::SharedClassifier;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
