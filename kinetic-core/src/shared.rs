//! Single-writer wrapper for multi-threaded hosts
//!
//! The classifier itself is single-threaded. When several threads can
//! deliver readings, `SharedClassifier` serialises them: each `ingest` holds
//! the lock for the whole classification step, so at most one reading is in
//! flight and the history and episode trackers never see interleaved
//! updates.
//!
//! A poisoned lock is recovered rather than propagated. The classifier is
//! consistent between steps, and a panic inside one step leaves at worst a
//! partially ingested reading.

use std::sync::{Mutex, MutexGuard};

use crate::classifier::{Classification, MotionClassifier};
use crate::config::MotionConfig;
use crate::errors::ConfigResult;
use crate::reading::Reading;
use crate::state::ConfirmedState;

/// `MotionClassifier` behind a mutex
#[derive(Debug)]
pub struct SharedClassifier {
    inner: Mutex<MotionClassifier>,
}

impl SharedClassifier {
    /// Build and wrap a classifier
    pub fn new(config: MotionConfig) -> ConfigResult<Self> {
        Ok(Self::from_classifier(MotionClassifier::new(config)?))
    }

    /// Wrap an existing classifier
    pub fn from_classifier(classifier: MotionClassifier) -> Self {
        Self {
            inner: Mutex::new(classifier),
        }
    }

    /// Classify one reading under the lock
    pub fn ingest(&self, reading: Reading) -> Classification {
        self.lock().ingest(reading)
    }

    /// Current confirmed state
    pub fn confirmed(&self) -> ConfirmedState {
        self.lock().confirmed()
    }

    /// Run `f` with exclusive access, e.g. for several queries at once
    pub fn with<R>(&self, f: impl FnOnce(&mut MotionClassifier) -> R) -> R {
        f(&mut self.lock())
    }

    /// Unwrap the classifier
    pub fn into_inner(self) -> MotionClassifier {
        self.inner.into_inner().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn lock(&self) -> MutexGuard<'_, MotionClassifier> {
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
