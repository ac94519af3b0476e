//! Collaborators around the QuakeGuard engine
//!
//! ## Overview
//!
//! The engine in `quakeguard-core` is pure state. Everything that touches the
//! outside world lives here:
//!
//! ```text
//! serial / file / pipe          alarm wire
//!        │                          ▲
//!   LineSource ──► Monitor ──► CommandWriter ('A' / 'N')
//!                    │
//!                    ├──► SharedEngine ◄── renderer thread (snapshot)
//!                    └──► JsonReporter (one snapshot per line)
//! ```
//!
//! ### Sample source
//!
//! `LineSource` reads newline-terminated decimal magnitudes from any
//! `BufRead` (a serial port handle, a recorded file, stdin). Lines that do
//! not parse are logged and skipped; the engine only ever sees numbers.
//!
//! ### Actuation
//!
//! `CommandWriter` mirrors the alert flag onto a byte channel: `A` while the
//! alert is active, `N` otherwise. By default one byte is written per
//! sample, which is what an LED/buzzer sketch on the other end of a serial
//! line expects.
//!
//! ### Presentation
//!
//! Renderers hold a `SharedEngine` clone and take snapshots, or subscribe a
//! `SnapshotSink` such as `JsonReporter` to the session.
//!
//! ## Example
//!
//! ```rust
//! use std::io::Cursor;
//! use quakeguard_connectors::{CommandWriter, LineSource, Monitor};
//!
//! let input = Cursor::new("1.0\n1.0\n1.0\n1.0\n1.0\ngarbage\n1.9\n1.1\n");
//! let mut monitor = Monitor::new(LineSource::new(input), CommandWriter::new(Vec::new()));
//!
//! let summary = monitor.run().unwrap();
//! assert_eq!(summary.samples, 7);
//! assert_eq!(summary.alerts_raised, 1);
//! assert_eq!(monitor.sink().get_ref().as_slice(), b"NNNNNAN");
//! ```

pub mod line;
pub mod monitor;
pub mod report;
pub mod signal;

// Re-export common types
pub use line::{LineSource, LineSourceStats};
pub use monitor::{Monitor, SessionSummary};
pub use report::{JsonReporter, SnapshotSink};
pub use signal::{AlertCommand, AlertSink, CommandWriter, SignalMode, SignalStats};

use quakeguard_core::DetectionError;
use thiserror::Error;

/// Result type for connector operations
pub type ConnectorResult<T> = Result<T, ConnectorError>;

/// Common connector errors
#[derive(Debug, Error)]
pub enum ConnectorError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("Sample source error: {0}")]
    Source(String),

    #[error("Engine error: {0}")]
    Detection(#[from] DetectionError),
}
