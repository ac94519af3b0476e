//! Monitoring session loop
//!
//! One `Monitor` is one session: pull a sample, feed the engine, signal the
//! alarm, publish the snapshot, repeat until the source ends.
//!
//! ```text
//! poll_next ──► ingest ──► AlertSink::signal ──► SnapshotSink::publish
//!     │            │
//!     │            └── rejected sample: logged, counted, no signal
//!     ├── Overflow: source dropped a line, poll again
//!     └── WouldBlock: yield and poll again / EndOfStream: session over
//! ```
//!
//! The engine sits behind a `SharedEngine`, so a renderer on another thread
//! can take `monitor.engine().snapshot()` at any time while `run` or
//! `spawn` is going.

use std::fmt;
use std::thread::{self, JoinHandle};

use serde::Serialize;

use quakeguard_core::stream::StreamError;
use quakeguard_core::{DetectionError, EngineSnapshot, SharedEngine, Stream};

use crate::report::SnapshotSink;
use crate::signal::AlertSink;
use crate::{ConnectorError, ConnectorResult};

/// What happened during a session
#[derive(Debug, Default, Clone, PartialEq, Serialize)]
pub struct SessionSummary {
    /// Samples accepted by the engine
    pub samples: u64,
    /// Samples the engine refused
    pub rejected: u64,
    /// Times the alert went from inactive to active
    pub alerts_raised: u64,
    /// Commands the alert sink wrote
    pub commands_sent: u64,
}

/// Drives one monitoring session
pub struct Monitor<S, A> {
    source: S,
    engine: SharedEngine,
    sink: A,
    observers: Vec<Box<dyn SnapshotSink + Send>>,
    summary: SessionSummary,
    was_alerting: bool,
    calibrated_logged: bool,
}

impl<S, A, E> Monitor<S, A>
where
    S: Stream<Item = f64, Error = StreamError<E>>,
    E: fmt::Display,
    A: AlertSink,
{
    /// Session with a fresh default engine
    pub fn new(source: S, sink: A) -> Self {
        Self::with_engine(source, SharedEngine::new(), sink)
    }

    /// Session over an existing (possibly shared) engine
    pub fn with_engine(source: S, engine: SharedEngine, sink: A) -> Self {
        log::info!("Earthquake detector initialized. Waiting for data...");
        Self {
            source,
            engine,
            sink,
            observers: Vec::new(),
            summary: SessionSummary::default(),
            was_alerting: false,
            calibrated_logged: false,
        }
    }

    /// Publish every snapshot to `observer`
    pub fn with_observer(mut self, observer: impl SnapshotSink + Send + 'static) -> Self {
        self.observers.push(Box::new(observer));
        self
    }

    /// Handle for readers on other threads
    pub fn engine(&self) -> SharedEngine {
        self.engine.clone()
    }

    /// The alert sink
    pub fn sink(&self) -> &A {
        &self.sink
    }

    /// Counters so far
    pub fn summary(&self) -> &SessionSummary {
        &self.summary
    }

    /// Process at most one sample
    ///
    /// Returns `Ok(Some(snapshot))` after an accepted sample, `Ok(None)` when
    /// nothing reached the engine (a rejected sample or a line the source
    /// dropped), `WouldBlock` when the source has nothing yet, and
    /// `Other(None)` once the source has ended.
    pub fn step(&mut self) -> nb::Result<Option<EngineSnapshot>, Option<ConnectorError>> {
        let value = match self.source.poll_next() {
            Ok(value) => value,
            Err(nb::Error::WouldBlock) => return Err(nb::Error::WouldBlock),
            Err(nb::Error::Other(StreamError::EndOfStream)) => return Err(nb::Error::Other(None)),
            // Already logged by the source, which skips past the line
            Err(nb::Error::Other(StreamError::Overflow)) => return Ok(None),
            Err(nb::Error::Other(e)) => {
                return Err(nb::Error::Other(Some(ConnectorError::Source(e.to_string()))));
            }
        };

        let (result, snapshot) = self.engine.ingest_and_snapshot(value);
        match result {
            Ok(()) => {}
            Err(err @ DetectionError::InvalidSample { .. }) => {
                self.summary.rejected += 1;
                log::warn!("Dropped sample: {}", err);
                return Ok(None);
            }
            Err(err) => return Err(nb::Error::Other(Some(err.into()))),
        }

        self.summary.samples += 1;
        self.track_transitions(&snapshot);

        self.sink
            .signal(snapshot.alert_active)
            .map_err(|e| nb::Error::Other(Some(e)))?;
        self.summary.commands_sent = self.sink.stats().commands_sent;

        for observer in &mut self.observers {
            observer.publish(&snapshot).map_err(|e| nb::Error::Other(Some(e)))?;
        }

        Ok(Some(snapshot))
    }

    /// Run until the source ends
    pub fn run(&mut self) -> ConnectorResult<SessionSummary> {
        loop {
            match self.step() {
                Ok(_) => {}
                Err(nb::Error::WouldBlock) => thread::yield_now(),
                Err(nb::Error::Other(None)) => break,
                Err(nb::Error::Other(Some(err))) => {
                    log::error!("Session aborted: {}", err);
                    return Err(err);
                }
            }
        }

        log::info!(
            "Session ended: {} samples, {} rejected, {} alerts",
            self.summary.samples, self.summary.rejected, self.summary.alerts_raised
        );
        Ok(self.summary.clone())
    }

    /// Run the session on a background thread
    pub fn spawn(mut self) -> JoinHandle<ConnectorResult<SessionSummary>>
    where
        S: Send + 'static,
        A: Send + 'static,
    {
        thread::spawn(move || self.run())
    }

    fn track_transitions(&mut self, snapshot: &EngineSnapshot) {
        if snapshot.is_calibrated() && !self.calibrated_logged {
            self.calibrated_logged = true;
            log::info!("Monitoring started, baseline {:.2}g", snapshot.baseline);
        }

        match (self.was_alerting, snapshot.alert_active) {
            (false, true) => {
                self.summary.alerts_raised += 1;
                log::warn!("{} {}", quakeguard_core::constants::ALERT_BANNER, snapshot.readout());
            }
            (true, false) => log::info!("Alert cleared. {}", snapshot.readout()),
            _ => log::debug!("{}", snapshot.readout()),
        }
        self.was_alerting = snapshot.alert_active;
    }
}
