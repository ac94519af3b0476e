//! Constants for QuakeGuard Core
//!
//! Centralized numeric values used by the engine and by the presentation
//! helpers. Nothing outside this module should contain a bare threshold or
//! buffer size.
//!
//! ## Organization
//!
//! - **Detection**: calibration length, window capacity, alert threshold,
//!   peak reset interval
//! - **Display**: chart range, grid layout and status strings shared with
//!   whatever draws the seismograph

/// Detection parameters: buffer capacities and thresholds.
pub mod detection;

/// Seismograph chart geometry and status text.
pub mod display;

pub use detection::{
    CALIBRATION_SAMPLES, WINDOW_SIZE, DETECTION_THRESHOLD_G, PEAK_RESET_INTERVAL,
};

pub use display::{
    CHART_RANGE_G, TIME_DIVISIONS, MAGNITUDE_GRIDLINES, ALERT_BANNER,
};
