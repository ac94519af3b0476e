//! Core detection engine for QuakeGuard
//!
//! Turns a stream of accelerometer magnitude samples (in g) into a live
//! "is the ground shaking?" decision. Single channel, time domain only.
//!
//! Key constraints:
//! - Runs without an allocator (all buffers are fixed-size arrays)
//! - `ingest` is bounded and never blocks
//! - Collaborators (sensor transport, chart, alarm) only read engine state
//!
//! ```rust
//! use quakeguard_core::SeismicEngine;
//!
//! let mut engine = SeismicEngine::new();
//!
//! // Keep the sensor still while the baseline is measured
//! for _ in 0..5 {
//!     engine.ingest(1.0).unwrap();
//! }
//! assert!(engine.is_calibrated());
//!
//! engine.ingest(1.8).unwrap();
//! assert!(engine.is_alert_active());
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![deny(unsafe_code)]
#![warn(missing_docs)]

#[macro_use]
mod macros;

pub mod buffer;
pub mod config;
pub mod constants;
pub mod engine;
pub mod errors;
pub mod snapshot;
pub mod stream;
pub mod traits;
pub mod waveform;

#[cfg(feature = "std")]
pub mod shared;

// Public API
pub use config::{EngineConfig, NonFinitePolicy};
pub use engine::{Phase, SeismicEngine};
pub use errors::{DetectionError, DetectionResult};
pub use snapshot::EngineSnapshot;
pub use traits::Stream;

#[cfg(feature = "std")]
pub use shared::SharedEngine;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
