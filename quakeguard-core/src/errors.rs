//! Error Types for the Detection Engine
//!
//! ## Design Philosophy
//!
//! The engine performs no I/O, so the taxonomy is tiny:
//!
//! 1. **Small Size**: variants carry at most one `f64` or a `&'static str`,
//!    so errors stay `Copy` and cheap to return from the ingestion hot path.
//!
//! 2. **No Heap Allocation**: messages are static strings only.
//!
//! 3. **Never Fatal**: an error rejects one sample or one configuration. The
//!    engine state is left exactly as it was before the failing call.
//!
//! ## Error Categories
//!
//! - `InvalidSample`: the sample is NaN or infinite and the engine is set to
//!   reject such values (the default)
//! - `InvalidConfig`: an `EngineConfig` would break a detection invariant
//!
//! ```rust
//! use quakeguard_core::{DetectionError, SeismicEngine};
//!
//! let mut engine = SeismicEngine::new();
//! match engine.ingest(f64::NAN) {
//!     Err(DetectionError::InvalidSample { .. }) => {
//!         // Sensor glitch - drop the sample and keep going
//!     }
//!     _ => unreachable!(),
//! }
//! assert_eq!(engine.samples_rejected(), 1);
//! ```

use thiserror_no_std::Error;

/// Result type for engine operations
pub type DetectionResult<T> = Result<T, DetectionError>;

/// Detection errors - kept small for embedded use
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum DetectionError {
    /// Sample is NaN or infinite
    #[error("Invalid sample {value}: not a finite number")]
    InvalidSample {
        /// The rejected sample as received
        value: f64,
    },

    /// Configuration would break a detection invariant
    #[error("Invalid configuration: {reason}")]
    InvalidConfig {
        /// Which setting was rejected
        reason: &'static str,
    },
}

#[cfg(feature = "defmt")]
impl defmt::Format for DetectionError {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            Self::InvalidSample { value } =>
                defmt::write!(fmt, "Invalid sample {}", value),
            Self::InvalidConfig { reason } =>
                defmt::write!(fmt, "Invalid configuration: {}", reason),
        }
    }
}

#[cfg(all(test, feature = "std"))]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = DetectionError::InvalidConfig { reason: "threshold must be finite" };
        assert_eq!(err.to_string(), "Invalid configuration: threshold must be finite");

        let err = DetectionError::InvalidSample { value: f64::INFINITY };
        assert_eq!(err.to_string(), "Invalid sample inf: not a finite number");
    }
}
