//! Engine configuration
//!
//! Buffer capacities are fixed at compile time (see `constants::detection`);
//! the values here are the per-engine tunables.
//!
//! ```rust
//! use quakeguard_core::{EngineConfig, NonFinitePolicy, SeismicEngine};
//!
//! // Quieter site, more sensitive trigger
//! let config = EngineConfig::default()
//!     .with_threshold(0.3)
//!     .with_non_finite(NonFinitePolicy::Reject);
//!
//! let engine = SeismicEngine::with_config(config).unwrap();
//! assert_eq!(engine.config().threshold_g, 0.3);
//! ```

use crate::constants::detection::{DETECTION_THRESHOLD_G, PEAK_RESET_INTERVAL};
use crate::errors::{DetectionError, DetectionResult};

/// What `ingest` does with NaN or infinite samples
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum NonFinitePolicy {
    /// Return `DetectionError::InvalidSample` and leave state untouched
    #[default]
    Reject,

    /// Accept the sample as-is. NaN then poisons the baseline (during
    /// calibration) or is ignored by the peak and alert comparisons (during
    /// monitoring); infinity raises the alert and pins the peak.
    PassThrough,
}

/// Per-engine detection settings
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct EngineConfig {
    /// Deviation from baseline (g) that must be exceeded to raise the alert
    pub threshold_g: f64,

    /// Post-eviction window length multiple that clears the peak tracker
    pub peak_reset_interval: usize,

    /// Handling of non-finite samples
    pub non_finite: NonFinitePolicy,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            threshold_g: DETECTION_THRESHOLD_G,
            peak_reset_interval: PEAK_RESET_INTERVAL,
            non_finite: NonFinitePolicy::Reject,
        }
    }
}

impl EngineConfig {
    /// Set the alert threshold (g)
    pub fn with_threshold(mut self, threshold_g: f64) -> Self {
        self.threshold_g = threshold_g;
        self
    }

    /// Set the peak reset interval
    pub fn with_peak_reset_interval(mut self, interval: usize) -> Self {
        self.peak_reset_interval = interval;
        self
    }

    /// Set the non-finite sample policy
    pub fn with_non_finite(mut self, policy: NonFinitePolicy) -> Self {
        self.non_finite = policy;
        self
    }

    /// Check the settings can be used by an engine
    pub fn validate(&self) -> DetectionResult<()> {
        if !self.threshold_g.is_finite() {
            return Err(DetectionError::InvalidConfig {
                reason: "threshold must be finite",
            });
        }

        if self.threshold_g < 0.0 {
            return Err(DetectionError::InvalidConfig {
                reason: "threshold must not be negative",
            });
        }

        // Zero would make the reset check a division by zero
        if self.peak_reset_interval == 0 {
            return Err(DetectionError::InvalidConfig {
                reason: "peak reset interval must be positive",
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_constants() {
        let config = EngineConfig::default();
        assert_eq!(config.threshold_g, 0.5);
        assert_eq!(config.peak_reset_interval, 50);
        assert_eq!(config.non_finite, NonFinitePolicy::Reject);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn rejects_bad_threshold() {
        let nan = EngineConfig::default().with_threshold(f64::NAN);
        assert!(matches!(nan.validate(), Err(DetectionError::InvalidConfig { .. })));

        let negative = EngineConfig::default().with_threshold(-0.1);
        assert!(matches!(negative.validate(), Err(DetectionError::InvalidConfig { .. })));
    }

    #[test]
    fn rejects_zero_reset_interval() {
        let config = EngineConfig::default().with_peak_reset_interval(0);
        assert_eq!(
            config.validate(),
            Err(DetectionError::InvalidConfig { reason: "peak reset interval must be positive" })
        );
    }
}
