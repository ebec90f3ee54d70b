//! Detection stages
//!
//! Per ingested reading the classifier runs, in order:
//!
//! ```text
//! history ──► priority (free fall / impact) ──┬─► FREE_FALL / IMPACT (immediate)
//!                                             │
//!                                             └─► candidate ──► stationary gate ──► stabilizer
//!
//! history ──► shake / arc / rolling / throw / landing ──► pattern events
//! ```
//!
//! Every stage owns its own small state and reads the shared history; none
//! of them allocates.

pub mod arc;
pub mod candidate;
pub mod priority;
pub mod rolling;
pub mod shake;
pub mod stabilizer;
pub mod stationary;
pub mod throw;

pub use arc::ArcDetector;
pub use candidate::{resolve, Magnitudes};
pub use priority::{FlightSummary, FreeFallEpisode, Priority, PriorityDetector};
pub use rolling::{RollingDetector, RollingEpisode};
pub use shake::{ShakeAnalysis, ShakeDetector};
pub use stabilizer::Stabilizer;
pub use stationary::{StationaryCandidateTracker, StationaryGate};
pub use throw::{launch_preceded, LandingResolver};
