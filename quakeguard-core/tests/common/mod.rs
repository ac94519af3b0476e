//! Common test utilities for integration tests
//!
//! - Seeded accelerometer signal generator (rest noise, quake bursts)
//! - Engine helpers for getting past calibration

#![allow(dead_code)]

use quakeguard_core::{constants::CALIBRATION_SAMPLES, SeismicEngine};

/// Deterministic generator for accelerometer magnitude series
pub struct SignalGenerator {
    seed: u32,
    rest_g: f64,
}

impl SignalGenerator {
    /// Generator around a resting magnitude (1.0 g for a level sensor)
    pub fn new(rest_g: f64) -> Self {
        Self { seed: 42, rest_g }
    }

    /// Quiet ground: rest value plus uniform noise in ±`amplitude`
    pub fn rest(&mut self, count: usize, amplitude: f64) -> Vec<f64> {
        (0..count)
            .map(|_| self.rest_g + self.noise(amplitude))
            .collect()
    }

    /// Shaking: alternating ±`peak_g` swings around rest, with noise
    pub fn quake(&mut self, count: usize, peak_g: f64) -> Vec<f64> {
        (0..count)
            .map(|i| {
                let sign = if i % 2 == 0 { 1.0 } else { -1.0 };
                self.rest_g + sign * peak_g + self.noise(0.01)
            })
            .collect()
    }

    fn noise(&mut self, amplitude: f64) -> f64 {
        self.seed = self.seed.wrapping_mul(1664525).wrapping_add(1013904223);
        let uniform = self.seed as f64 / u32::MAX as f64;
        (uniform - 0.5) * 2.0 * amplitude
    }
}

/// Engine calibrated at exactly `baseline`
pub fn calibrated_engine(baseline: f64) -> SeismicEngine {
    let mut engine = SeismicEngine::new();
    for _ in 0..CALIBRATION_SAMPLES {
        engine.ingest(baseline).unwrap();
    }
    assert!(engine.is_calibrated());
    engine
}

/// Feed every sample, panicking on rejection
pub fn feed(engine: &mut SeismicEngine, samples: &[f64]) {
    for &sample in samples {
        engine.ingest(sample).unwrap();
    }
}

/// Float comparison with a tolerance suited to sums of a few samples
pub fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}
