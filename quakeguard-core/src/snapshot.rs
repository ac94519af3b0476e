//! Point-in-time copy of engine state
//!
//! Renderers and alarm drivers read an `EngineSnapshot` instead of reaching
//! into a live engine. Taken under one lock (see `SharedEngine`), a snapshot
//! is always internally consistent.

use core::fmt;

use crate::constants::detection::WINDOW_SIZE;
use crate::engine::Phase;
use crate::waveform::{self, PlotPoint};

/// Everything a presentation or actuation collaborator needs after one
/// `ingest`
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct EngineSnapshot {
    /// Lifecycle stage
    pub phase: Phase,
    /// Resting magnitude (g); 0 while calibrating
    pub baseline: f64,
    /// Buffered raw samples, oldest first
    pub window: heapless::Vec<f64, WINDOW_SIZE>,
    /// Whether the latest sample exceeded the threshold
    pub alert_active: bool,
    /// Largest absolute deviation since the last periodic reset
    pub peak_magnitude: f64,
    /// Signed deviation of the latest monitoring sample
    pub last_deviation: Option<f64>,
    /// Raw value of the latest accepted sample, in either phase
    pub latest_sample: Option<f64>,
    /// Threshold the alert was evaluated against
    pub threshold_g: f64,
    /// Samples accepted so far
    pub samples_accepted: u64,
    /// Samples refused so far
    pub samples_rejected: u64,
}

impl EngineSnapshot {
    /// Whether the baseline has been established
    pub fn is_calibrated(&self) -> bool {
        self.phase == Phase::Monitoring
    }

    /// Waveform points for the buffered samples
    pub fn waveform(&self) -> impl Iterator<Item = PlotPoint> + '_ {
        waveform::waveform(self.baseline, &self.window, self.threshold_g)
    }

    /// Top-of-chart status text
    pub fn status_line(&self) -> StatusLine {
        StatusLine {
            calibrated: self.is_calibrated(),
            peak_magnitude: self.peak_magnitude,
        }
    }

    /// Bottom-of-chart numeric readout
    ///
    /// `current` is the latest sample minus the baseline as it stands now,
    /// so while calibrating it shows the raw value.
    pub fn readout(&self) -> Readout {
        Readout {
            current: self.latest_sample.map_or(0.0, |v| v - self.baseline),
            peak_magnitude: self.peak_magnitude,
            baseline: self.baseline,
        }
    }
}

/// `Calibrating... (Keep sensor still)` or `Monitoring | Max: 0.60g`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StatusLine {
    calibrated: bool,
    peak_magnitude: f64,
}

impl fmt::Display for StatusLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.calibrated {
            write!(f, "Monitoring | Max: {:.2}g", self.peak_magnitude)
        } else {
            f.write_str(crate::constants::display::CALIBRATING_STATUS)
        }
    }
}

/// `Current: 0.60g | Max: 0.60g | Baseline: 0.00g`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Readout {
    /// Latest sample relative to the baseline
    pub current: f64,
    /// Peak tracker value
    pub peak_magnitude: f64,
    /// Baseline
    pub baseline: f64,
}

impl fmt::Display for Readout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Current: {:.2}g | Max: {:.2}g | Baseline: {:.2}g",
            self.current, self.peak_magnitude, self.baseline
        )
    }
}

#[cfg(all(test, feature = "std"))]
mod tests {
    use crate::SeismicEngine;

    #[test]
    fn status_text_by_phase() {
        let mut engine = SeismicEngine::new();
        engine.ingest(0.0).unwrap();
        assert_eq!(
            engine.snapshot().status_line().to_string(),
            "Calibrating... (Keep sensor still)"
        );

        for _ in 0..4 {
            engine.ingest(0.0).unwrap();
        }
        engine.ingest(0.6).unwrap();
        assert_eq!(engine.snapshot().status_line().to_string(), "Monitoring | Max: 0.60g");
    }

    #[test]
    fn readout_formats_two_decimals() {
        let mut engine = SeismicEngine::new();
        for _ in 0..5 {
            engine.ingest(1.0).unwrap();
        }
        engine.ingest(0.25).unwrap();

        assert_eq!(
            engine.snapshot().readout().to_string(),
            "Current: -0.75g | Max: 0.75g | Baseline: 1.00g"
        );
    }

    #[test]
    fn readout_during_calibration_shows_raw_value() {
        let mut engine = SeismicEngine::new();
        assert_eq!(
            engine.snapshot().readout().to_string(),
            "Current: 0.00g | Max: 0.00g | Baseline: 0.00g"
        );

        engine.ingest(0.98).unwrap();
        assert_eq!(
            engine.snapshot().readout().to_string(),
            "Current: 0.98g | Max: 0.00g | Baseline: 0.00g"
        );

        for _ in 0..4 {
            engine.ingest(1.0).unwrap();
        }
        // Sample that completes calibration is shown against the new baseline
        let readout = engine.snapshot().readout();
        assert!((readout.current - 0.004).abs() < 1e-9);
        assert!((readout.baseline - 0.996).abs() < 1e-9);
    }

    #[test]
    fn snapshot_serializes() {
        let mut engine = SeismicEngine::new();
        for _ in 0..5 {
            engine.ingest(0.0).unwrap();
        }
        engine.ingest(0.6).unwrap();

        let json = serde_json::to_value(engine.snapshot()).unwrap();
        assert_eq!(json["phase"], "Monitoring");
        assert_eq!(json["alert_active"], true);
        assert_eq!(json["window"], serde_json::json!([0.6]));
        assert_eq!(json["samples_accepted"], 6);
    }
}
