//! Detection Parameters
//!
//! Buffer capacities are compile-time constants because they size the
//! stack-allocated ring buffers. The threshold and reset interval are the
//! defaults for `EngineConfig` and can be overridden per engine.

// ===== CALIBRATION =====

/// Samples averaged to establish the resting baseline.
///
/// The sensor must be kept still while these arrive. Five samples is short
/// enough to be unnoticeable at typical serial rates (10-100 Hz).
pub const CALIBRATION_SAMPLES: usize = 5;

// ===== MONITORING WINDOW =====

/// Capacity of the sliding window of recent raw samples.
///
/// - 100 samples × 8 bytes = 800 bytes
/// - One chart width of waveform history
pub const WINDOW_SIZE: usize = 100;

// ===== ALERTING =====

/// Deviation from baseline (g) above which a sample raises the alert.
///
/// Comparison is strict: a deviation of exactly 0.5 g is not an alert.
pub const DETECTION_THRESHOLD_G: f64 = 0.5;

/// Post-eviction window length multiple at which the peak tracker resets.
///
/// Tunable heuristic, not a physical constant. With `WINDOW_SIZE = 100` the
/// post-eviction length is always 100, so once the window is full the peak
/// is cleared at the end of every ingestion.
pub const PEAK_RESET_INTERVAL: usize = 50;
