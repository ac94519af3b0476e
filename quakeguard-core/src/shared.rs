//! Engine shared between an acquisition thread and readers
//!
//! One mutex guards the whole engine. Every `ingest` and every `snapshot`
//! is a single critical section, so a reader never observes the window
//! half-updated and the snapshot always matches one point between two
//! ingestions.
//!
//! ```rust
//! use std::thread;
//! use quakeguard_core::SharedEngine;
//!
//! let engine = SharedEngine::new();
//! let producer = engine.clone();
//!
//! thread::spawn(move || {
//!     for _ in 0..5 {
//!         let _ = producer.ingest(0.0);
//!     }
//! })
//! .join()
//! .unwrap();
//!
//! assert!(engine.snapshot().is_calibrated());
//! ```

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::config::EngineConfig;
use crate::engine::SeismicEngine;
use crate::errors::DetectionResult;
use crate::snapshot::EngineSnapshot;

/// Cloneable handle to one engine behind a lock
#[derive(Debug, Clone, Default)]
pub struct SharedEngine {
    inner: Arc<Mutex<SeismicEngine>>,
}

impl SharedEngine {
    /// Share a fresh engine with default settings
    pub fn new() -> Self {
        Self::from_engine(SeismicEngine::new())
    }

    /// Share a fresh engine with custom settings
    pub fn with_config(config: EngineConfig) -> DetectionResult<Self> {
        SeismicEngine::with_config(config).map(Self::from_engine)
    }

    /// Share an existing engine
    pub fn from_engine(engine: SeismicEngine) -> Self {
        Self {
            inner: Arc::new(Mutex::new(engine)),
        }
    }

    /// Feed one sample under the lock
    pub fn ingest(&self, value: f64) -> DetectionResult<()> {
        self.lock().ingest(value)
    }

    /// Feed one sample and copy the resulting state in the same critical
    /// section
    pub fn ingest_and_snapshot(&self, value: f64) -> (DetectionResult<()>, EngineSnapshot) {
        let mut engine = self.lock();
        let result = engine.ingest(value);
        (result, engine.snapshot())
    }

    /// Consistent copy of the current state
    pub fn snapshot(&self) -> EngineSnapshot {
        self.lock().snapshot()
    }

    /// Current alert flag
    pub fn is_alert_active(&self) -> bool {
        self.lock().is_alert_active()
    }

    /// Run a read-only closure against the engine under the lock
    pub fn with_engine<R>(&self, f: impl FnOnce(&SeismicEngine) -> R) -> R {
        f(&*self.lock())
    }

    // `ingest` never panics midway through a mutation, so the state behind
    // a poisoned lock is still a valid engine.
    fn lock(&self) -> MutexGuard<'_, SeismicEngine> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn clones_share_state() {
        let engine = SharedEngine::new();
        let other = engine.clone();

        for _ in 0..5 {
            engine.ingest(1.0).unwrap();
        }
        other.ingest(2.0).unwrap();

        assert!(engine.is_alert_active());
        assert_eq!(engine.with_engine(|e| e.baseline()), 1.0);
    }

    #[test]
    fn ingest_and_snapshot_is_atomic() {
        let engine = SharedEngine::new();
        for _ in 0..5 {
            engine.ingest(0.0).unwrap();
        }

        let (result, snapshot) = engine.ingest_and_snapshot(0.6);
        assert!(result.is_ok());
        assert!(snapshot.alert_active);
        assert_eq!(snapshot.window.as_slice(), &[0.6]);
    }

    #[test]
    fn readers_never_see_oversized_window() {
        let engine = SharedEngine::new();
        let producer = engine.clone();

        let handle = thread::spawn(move || {
            for i in 0..2000 {
                producer.ingest((i % 7) as f64 * 0.1).unwrap();
            }
        });

        for _ in 0..200 {
            let snapshot = engine.snapshot();
            if snapshot.is_calibrated() {
                assert!(snapshot.window.len() <= 100);
            } else {
                assert!(snapshot.window.len() <= 5);
                assert_eq!(snapshot.baseline, 0.0);
            }
        }

        handle.join().unwrap();
        assert_eq!(engine.snapshot().window.len(), 100);
    }

    #[test]
    fn survives_poisoned_lock() {
        let engine = SharedEngine::new();
        let poisoner = engine.clone();

        let _ = thread::spawn(move || {
            poisoner.with_engine(|_| panic!("reader crashed"));
        })
        .join();

        engine.ingest(1.0).unwrap();
        assert_eq!(engine.snapshot().samples_accepted, 1);
    }
}
