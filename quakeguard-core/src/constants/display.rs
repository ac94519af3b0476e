//! Seismograph Display Constants
//!
//! Shared by the waveform projection and status text so every renderer
//! draws the same chart.

// ===== CHART GEOMETRY =====

/// Vertical half-range of the chart (g). The plot spans ±3 g.
pub const CHART_RANGE_G: f64 = 3.0;

/// Number of vertical time divisions across the chart.
pub const TIME_DIVISIONS: usize = 10;

/// Labelled horizontal magnitude gridlines above the center line (1g, 2g, 3g).
pub const MAGNITUDE_GRIDLINES: u8 = 3;

/// Default canvas width (px).
pub const DEFAULT_CANVAS_WIDTH: f64 = 1200.0;

/// Default canvas height (px).
pub const DEFAULT_CANVAS_HEIGHT: f64 = 600.0;

/// Default margin around the plot area (px).
pub const DEFAULT_CANVAS_MARGIN: f64 = 50.0;

// ===== STATUS TEXT =====

/// Banner shown while the alert is active.
pub const ALERT_BANNER: &str = "EARTHQUAKE DETECTED!";

/// Status shown while the baseline is being measured.
pub const CALIBRATING_STATUS: &str = "Calibrating... (Keep sensor still)";
