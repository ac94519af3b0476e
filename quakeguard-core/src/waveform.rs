//! Seismograph projection
//!
//! The engine does not draw anything. This module is the contract a renderer
//! uses to reproduce the chart from a snapshot:
//!
//! - sample `s_i` at position `i` (oldest first) becomes
//!   `PlotPoint { step: i, offset: s_i - baseline }`
//! - it is highlighted when `|s_i - baseline| > threshold`
//! - `ChartLayout` turns points into canvas coordinates, center line at half
//!   height, ±`CHART_RANGE_G` across the plot area
//!
//! ```rust
//! use quakeguard_core::waveform::{waveform, ChartLayout};
//!
//! let samples = [1.0, 1.7, 0.9];
//! let points: Vec<_> = waveform(1.0, &samples, 0.5).collect();
//! assert!(points[1].highlighted);
//!
//! let layout = ChartLayout::default();
//! let (x, y) = layout.project(&points[0]);
//! assert_eq!((x, y), (50.0, 300.0));
//! ```

use crate::constants::detection::WINDOW_SIZE;
use crate::constants::display::{
    CHART_RANGE_G, DEFAULT_CANVAS_HEIGHT, DEFAULT_CANVAS_MARGIN, DEFAULT_CANVAS_WIDTH,
    MAGNITUDE_GRIDLINES, TIME_DIVISIONS,
};

/// One waveform sample in chart space
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlotPoint {
    /// Horizontal position (0 = oldest buffered sample)
    pub step: usize,
    /// Signed deviation from baseline (g)
    pub offset: f64,
    /// Deviation exceeds the alert threshold
    pub highlighted: bool,
}

/// Map buffered samples to plot points
pub fn waveform<'a>(
    baseline: f64,
    samples: &'a [f64],
    threshold_g: f64,
) -> impl Iterator<Item = PlotPoint> + 'a {
    samples.iter().enumerate().map(move |(step, &sample)| {
        let offset = sample - baseline;
        PlotPoint {
            step,
            offset,
            highlighted: libm::fabs(offset) > threshold_g,
        }
    })
}

/// Canvas geometry for the seismograph
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChartLayout {
    /// Canvas width (px)
    pub width: f64,
    /// Canvas height (px)
    pub height: f64,
    /// Margin on every side (px)
    pub margin: f64,
}

impl Default for ChartLayout {
    fn default() -> Self {
        Self {
            width: DEFAULT_CANVAS_WIDTH,
            height: DEFAULT_CANVAS_HEIGHT,
            margin: DEFAULT_CANVAS_MARGIN,
        }
    }
}

/// A labelled horizontal gridline
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MagnitudeGridline {
    /// Canvas y coordinate
    pub y: f64,
    /// Label value in g
    pub label_g: u8,
}

impl ChartLayout {
    /// Create a layout for a canvas size
    pub fn new(width: f64, height: f64, margin: f64) -> Self {
        Self { width, height, margin }
    }

    /// Pixels per sample step; the full window spans the plot width
    pub fn x_scale(&self) -> f64 {
        (self.width - 2.0 * self.margin) / WINDOW_SIZE as f64
    }

    /// Pixels per g
    pub fn y_scale(&self) -> f64 {
        (self.height - 2.0 * self.margin) / (2.0 * CHART_RANGE_G)
    }

    /// Canvas y of the zero-deviation line
    pub fn center_y(&self) -> f64 {
        self.height / 2.0
    }

    /// Canvas coordinates of a point; positive deviation plots upwards
    pub fn project(&self, point: &PlotPoint) -> (f64, f64) {
        let x = self.margin + point.step as f64 * self.x_scale();
        let y = self.center_y() - point.offset * self.y_scale();
        (x, y)
    }

    /// X coordinates of the vertical time gridlines, left to right
    pub fn time_gridlines(&self) -> impl Iterator<Item = f64> + '_ {
        let span = self.width - 2.0 * self.margin;
        (0..=TIME_DIVISIONS).map(move |i| self.margin + i as f64 * span / TIME_DIVISIONS as f64)
    }

    /// Labelled gridlines above the center line (1g, 2g, 3g)
    pub fn magnitude_gridlines(&self) -> impl Iterator<Item = MagnitudeGridline> + '_ {
        (1..=MAGNITUDE_GRIDLINES).map(move |g| MagnitudeGridline {
            y: self.center_y() - f64::from(g) * self.y_scale(),
            label_g: g,
        })
    }
}
