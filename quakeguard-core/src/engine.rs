//! Seismic Detection Engine
//!
//! ## Overview
//!
//! `SeismicEngine` is a two-state machine over one stream of raw magnitude
//! samples:
//!
//! ```text
//!             5 samples averaged
//! Calibrating ──────────────────► Monitoring
//! (baseline = 0, no alerts)       (terminal for the session)
//! ```
//!
//! While **calibrating**, samples are collected into a
//! `SampleWindow<CALIBRATION_SAMPLES>`. The sample that fills it fixes the
//! baseline at their mean and discards them.
//!
//! While **monitoring**, each sample:
//! 1. is appended raw to a `SampleWindow<WINDOW_SIZE>`
//! 2. raises the peak tracker to `|value - baseline|` if larger
//! 3. sets the alert iff `|value - baseline| > threshold`
//! 4. clears the peak tracker when it evicted the oldest sample and the
//!    window length is a multiple of the reset interval
//!
//! The alert is recomputed from the latest sample only. One quiet sample
//! drops it.
//!
//! ## Peak reset
//!
//! Step 4 runs after step 2, and the post-eviction length of a full window
//! is always `WINDOW_SIZE`. With the default sizes (100 and 50) the peak
//! therefore reads 0 after every ingestion once the window has filled, and
//! tracks the running maximum only during the first 100 monitoring samples.
//!
//! ## Example
//!
//! ```rust
//! use quakeguard_core::SeismicEngine;
//!
//! let mut engine = SeismicEngine::new();
//! for _ in 0..5 {
//!     engine.ingest(0.0).unwrap();
//! }
//!
//! engine.ingest(0.6).unwrap();
//! assert!(engine.is_alert_active());
//!
//! engine.ingest(0.2).unwrap();
//! assert!(!engine.is_alert_active());
//! assert_eq!(engine.peak_magnitude(), 0.6);
//! ```

use crate::buffer::SampleWindow;
use crate::config::{EngineConfig, NonFinitePolicy};
use crate::constants::detection::{CALIBRATION_SAMPLES, WINDOW_SIZE};
use crate::errors::{DetectionError, DetectionResult};
use crate::snapshot::EngineSnapshot;

/// Public view of the engine's lifecycle stage
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum Phase {
    /// Collecting samples for the baseline
    Calibrating,
    /// Baseline fixed, detection running
    Monitoring,
}

/// Phase-specific state; each phase owns its own window
#[derive(Debug, Clone)]
enum State {
    Calibrating {
        samples: SampleWindow<CALIBRATION_SAMPLES>,
    },
    Monitoring {
        baseline: f64,
        window: SampleWindow<WINDOW_SIZE>,
    },
}

/// Single-channel seismic amplitude detector
///
/// One engine per monitoring session. All methods are synchronous and
/// allocation-free; `ingest` does a bounded amount of work.
#[derive(Debug, Clone)]
pub struct SeismicEngine {
    config: EngineConfig,
    state: State,
    alert_active: bool,
    max_recent_magnitude: f64,
    last_deviation: Option<f64>,
    latest_sample: Option<f64>,
    samples_accepted: u64,
    samples_rejected: u64,
}

impl Default for SeismicEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl SeismicEngine {
    /// Create an uncalibrated engine with default settings
    pub fn new() -> Self {
        Self::from_valid_config(EngineConfig::default())
    }

    /// Create an uncalibrated engine with custom settings
    pub fn with_config(config: EngineConfig) -> DetectionResult<Self> {
        config.validate()?;
        Ok(Self::from_valid_config(config))
    }

    fn from_valid_config(config: EngineConfig) -> Self {
        Self {
            config,
            state: State::Calibrating {
                samples: SampleWindow::new(),
            },
            alert_active: false,
            max_recent_magnitude: 0.0,
            last_deviation: None,
            latest_sample: None,
            samples_accepted: 0,
            samples_rejected: 0,
        }
    }

    /// Feed one magnitude sample (g)
    ///
    /// Under `NonFinitePolicy::Reject` a NaN or infinite sample returns
    /// `InvalidSample` and changes nothing but the rejection counter.
    pub fn ingest(&mut self, value: f64) -> DetectionResult<()> {
        if !value.is_finite() && self.config.non_finite == NonFinitePolicy::Reject {
            self.samples_rejected += 1;
            log_warn!("Rejected non-finite sample {}", value);
            return Err(DetectionError::InvalidSample { value });
        }

        self.samples_accepted += 1;
        self.latest_sample = Some(value);

        match &mut self.state {
            State::Calibrating { samples } => {
                samples.push(value);

                if samples.is_full() {
                    let baseline = samples.mean().unwrap_or(0.0);
                    self.state = State::Monitoring {
                        baseline,
                        window: SampleWindow::new(),
                    };
                    log_info!("Calibration complete, baseline {:.3}g", baseline);
                }
            }
            State::Monitoring { baseline, window } => {
                let deviation = value - *baseline;
                let evicted = window.push(value);

                let magnitude = libm::fabs(deviation);
                if magnitude > self.max_recent_magnitude {
                    self.max_recent_magnitude = magnitude;
                }

                self.alert_active = magnitude > self.config.threshold_g;
                self.last_deviation = Some(deviation);

                if evicted.is_some() && window.len() % self.config.peak_reset_interval == 0 {
                    self.max_recent_magnitude = 0.0;
                }

                log_debug!(
                    "deviation {:.3}g, peak {:.3}g, alert {}",
                    deviation, self.max_recent_magnitude, self.alert_active
                );
            }
        }

        Ok(())
    }

    /// Whether the baseline has been established
    pub fn is_calibrated(&self) -> bool {
        matches!(self.state, State::Monitoring { .. })
    }

    /// Current lifecycle stage
    pub fn phase(&self) -> Phase {
        match self.state {
            State::Calibrating { .. } => Phase::Calibrating,
            State::Monitoring { .. } => Phase::Monitoring,
        }
    }

    /// Resting magnitude (g); 0 until calibrated
    pub fn baseline(&self) -> f64 {
        match self.state {
            State::Calibrating { .. } => 0.0,
            State::Monitoring { baseline, .. } => baseline,
        }
    }

    /// Copy of the buffered raw samples, oldest first
    ///
    /// While calibrating these are the calibration samples collected so far.
    pub fn window_snapshot(&self) -> heapless::Vec<f64, WINDOW_SIZE> {
        let mut out = heapless::Vec::new();
        for sample in self.window_iter() {
            if out.push(sample).is_err() {
                break;
            }
        }
        out
    }

    /// Number of buffered samples in the current phase
    pub fn window_len(&self) -> usize {
        match &self.state {
            State::Calibrating { samples } => samples.len(),
            State::Monitoring { window, .. } => window.len(),
        }
    }

    /// Whether the latest sample exceeded the threshold
    pub fn is_alert_active(&self) -> bool {
        self.alert_active
    }

    /// Largest absolute deviation (g) since the last periodic reset
    pub fn peak_magnitude(&self) -> f64 {
        self.max_recent_magnitude
    }

    /// Signed deviation of the latest monitoring sample; `None` while
    /// calibrating
    pub fn last_deviation(&self) -> Option<f64> {
        self.last_deviation
    }

    /// Raw value of the latest accepted sample, in either phase
    pub fn latest_sample(&self) -> Option<f64> {
        self.latest_sample
    }

    /// Samples accepted by `ingest`
    pub fn samples_accepted(&self) -> u64 {
        self.samples_accepted
    }

    /// Samples refused by `ingest`
    pub fn samples_rejected(&self) -> u64 {
        self.samples_rejected
    }

    /// Settings this engine was built with
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// All accessor values in one consistent copy
    pub fn snapshot(&self) -> EngineSnapshot {
        EngineSnapshot {
            phase: self.phase(),
            baseline: self.baseline(),
            window: self.window_snapshot(),
            alert_active: self.alert_active,
            peak_magnitude: self.max_recent_magnitude,
            last_deviation: self.last_deviation,
            latest_sample: self.latest_sample,
            threshold_g: self.config.threshold_g,
            samples_accepted: self.samples_accepted,
            samples_rejected: self.samples_rejected,
        }
    }

    fn window_iter(&self) -> impl Iterator<Item = f64> + '_ {
        let (calibration, monitoring) = match &self.state {
            State::Calibrating { samples } => (Some(samples.iter()), None),
            State::Monitoring { window, .. } => (None, Some(window.iter())),
        };
        calibration.into_iter().flatten().chain(monitoring.into_iter().flatten())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn calibrated(baseline: f64) -> SeismicEngine {
        let mut engine = SeismicEngine::new();
        for _ in 0..CALIBRATION_SAMPLES {
            engine.ingest(baseline).unwrap();
        }
        engine
    }

    #[test]
    fn starts_uncalibrated() {
        let engine = SeismicEngine::new();
        assert!(!engine.is_calibrated());
        assert_eq!(engine.phase(), Phase::Calibrating);
        assert_eq!(engine.baseline(), 0.0);
        assert!(engine.window_snapshot().is_empty());
        assert!(!engine.is_alert_active());
        assert_eq!(engine.peak_magnitude(), 0.0);
        assert_eq!(engine.last_deviation(), None);
        assert_eq!(engine.latest_sample(), None);
    }

    #[test]
    fn calibration_averages_five_samples() {
        let mut engine = SeismicEngine::new();
        for v in [0.8, 0.9, 1.0, 1.1, 1.2] {
            assert!(!engine.is_calibrated());
            engine.ingest(v).unwrap();
        }

        assert!(engine.is_calibrated());
        assert!((engine.baseline() - 1.0).abs() < 1e-12);
        assert!(engine.window_snapshot().is_empty());
    }

    #[test]
    fn calibration_never_alerts() {
        let mut engine = SeismicEngine::new();
        for v in [0.0, 5.0, -5.0, 9.0] {
            engine.ingest(v).unwrap();
            assert!(!engine.is_alert_active());
            assert_eq!(engine.baseline(), 0.0);
            assert_eq!(engine.peak_magnitude(), 0.0);
        }
        assert_eq!(engine.window_snapshot().as_slice(), &[0.0, 5.0, -5.0, 9.0]);
    }

    #[test]
    fn alert_follows_latest_sample() {
        let mut engine = calibrated(1.0);

        engine.ingest(1.6).unwrap();
        assert!(engine.is_alert_active());

        engine.ingest(1.4).unwrap();
        assert!(!engine.is_alert_active());

        engine.ingest(0.3).unwrap();
        assert!(engine.is_alert_active());
    }

    #[test]
    fn threshold_is_strict() {
        let mut engine = calibrated(0.0);
        engine.ingest(0.5).unwrap();
        assert!(!engine.is_alert_active());
        assert_eq!(engine.peak_magnitude(), 0.5);
    }

    #[test]
    fn window_stores_raw_values() {
        let mut engine = calibrated(1.0);
        engine.ingest(1.25).unwrap();
        engine.ingest(0.75).unwrap();

        assert_eq!(engine.window_snapshot().as_slice(), &[1.25, 0.75]);
        assert_eq!(engine.last_deviation(), Some(-0.25));
    }

    #[test]
    fn peak_survives_while_window_fills() {
        let mut engine = calibrated(0.0);
        engine.ingest(2.0).unwrap();
        for _ in 0..(WINDOW_SIZE - 1) {
            engine.ingest(0.1).unwrap();
        }

        assert_eq!(engine.window_len(), WINDOW_SIZE);
        assert_eq!(engine.peak_magnitude(), 2.0);
    }

    #[test]
    fn first_eviction_resets_peak() {
        let mut engine = calibrated(0.0);
        engine.ingest(2.0).unwrap();
        for _ in 0..(WINDOW_SIZE - 1) {
            engine.ingest(0.1).unwrap();
        }

        engine.ingest(0.3).unwrap();
        assert_eq!(engine.window_len(), WINDOW_SIZE);
        assert_eq!(engine.peak_magnitude(), 0.0);
        assert!(!engine.is_alert_active());
    }

    #[test]
    fn spike_on_full_window_still_alerts() {
        let mut engine = calibrated(0.0);
        for _ in 0..WINDOW_SIZE {
            engine.ingest(0.0).unwrap();
        }

        engine.ingest(1.5).unwrap();
        assert!(engine.is_alert_active());
        assert_eq!(engine.peak_magnitude(), 0.0);
    }

    #[test]
    fn reset_interval_not_dividing_window_never_fires() {
        let config = EngineConfig::default().with_peak_reset_interval(30);
        let mut engine = SeismicEngine::with_config(config).unwrap();
        for _ in 0..CALIBRATION_SAMPLES {
            engine.ingest(0.0).unwrap();
        }

        engine.ingest(2.0).unwrap();
        for _ in 0..(2 * WINDOW_SIZE) {
            engine.ingest(0.1).unwrap();
        }
        assert_eq!(engine.peak_magnitude(), 2.0);
    }

    #[test]
    fn rejects_non_finite_by_default() {
        let mut engine = calibrated(0.0);
        engine.ingest(0.7).unwrap();
        let before = engine.snapshot();

        for bad in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            assert_eq!(
                engine.ingest(bad).map_err(|e| matches!(e, DetectionError::InvalidSample { .. })),
                Err(true)
            );
        }

        let after = engine.snapshot();
        assert_eq!(after.window, before.window);
        assert_eq!(after.alert_active, before.alert_active);
        assert_eq!(after.peak_magnitude, before.peak_magnitude);
        assert_eq!(engine.samples_rejected(), 3);
        assert_eq!(engine.samples_accepted(), (CALIBRATION_SAMPLES + 1) as u64);
    }

    #[test]
    fn pass_through_propagates_infinity() {
        let config = EngineConfig::default().with_non_finite(NonFinitePolicy::PassThrough);
        let mut engine = SeismicEngine::with_config(config).unwrap();
        for _ in 0..CALIBRATION_SAMPLES {
            engine.ingest(0.0).unwrap();
        }

        engine.ingest(f64::INFINITY).unwrap();
        assert!(engine.is_alert_active());
        assert_eq!(engine.peak_magnitude(), f64::INFINITY);

        engine.ingest(f64::NAN).unwrap();
        assert!(!engine.is_alert_active());
        assert_eq!(engine.peak_magnitude(), f64::INFINITY);
    }

    #[test]
    fn pass_through_nan_poisons_baseline() {
        let config = EngineConfig::default().with_non_finite(NonFinitePolicy::PassThrough);
        let mut engine = SeismicEngine::with_config(config).unwrap();
        engine.ingest(f64::NAN).unwrap();
        for _ in 1..CALIBRATION_SAMPLES {
            engine.ingest(1.0).unwrap();
        }

        assert!(engine.is_calibrated());
        assert!(engine.baseline().is_nan());
    }

    #[test]
    fn calibrates_on_huge_finite_samples() {
        let mut engine = calibrated(1e308);
        assert_eq!(engine.baseline(), 1e308);

        engine.ingest(1e308).unwrap();
        assert!(!engine.is_alert_active());
        assert_eq!(engine.peak_magnitude(), 0.0);
        assert_eq!(engine.last_deviation(), Some(0.0));
    }

    #[test]
    fn latest_sample_tracks_both_phases() {
        let mut engine = SeismicEngine::new();
        engine.ingest(0.98).unwrap();
        assert_eq!(engine.latest_sample(), Some(0.98));
        assert_eq!(engine.last_deviation(), None);

        let _ = engine.ingest(f64::NAN);
        assert_eq!(engine.latest_sample(), Some(0.98));
    }

    #[test]
    fn invalid_config_refused() {
        let config = EngineConfig::default().with_threshold(f64::INFINITY);
        assert!(SeismicEngine::with_config(config).is_err());
    }
}
