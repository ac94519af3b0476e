//! Snapshot reporting
//!
//! Headless presentation: each processed sample's `EngineSnapshot` is handed
//! to every registered `SnapshotSink`. `JsonReporter` writes them as JSON
//! Lines, which a plotting script or dashboard can tail:
//!
//! ```json
//! {"phase":"Monitoring","baseline":0.0,"window":[0.6],"alert_active":true,"peak_magnitude":0.6,...}
//! ```

use std::io::Write;

use quakeguard_core::EngineSnapshot;

use crate::ConnectorResult;

/// Receives the engine state after every processed sample
pub trait SnapshotSink {
    /// Consume one snapshot
    fn publish(&mut self, snapshot: &EngineSnapshot) -> ConnectorResult<()>;
}

impl<F> SnapshotSink for F
where
    F: FnMut(&EngineSnapshot) -> ConnectorResult<()>,
{
    fn publish(&mut self, snapshot: &EngineSnapshot) -> ConnectorResult<()> {
        self(snapshot)
    }
}

/// Writes one JSON object per snapshot, newline separated
pub struct JsonReporter<W: Write> {
    writer: W,
    include_window: bool,
    lines_written: usize,
}

/// Snapshot fields without the sample window, plus the status text
#[derive(serde::Serialize)]
struct SnapshotSummary {
    phase: quakeguard_core::Phase,
    baseline: f64,
    alert_active: bool,
    peak_magnitude: f64,
    last_deviation: Option<f64>,
    latest_sample: Option<f64>,
    samples_accepted: u64,
    samples_rejected: u64,
    status: String,
}

impl<W: Write> JsonReporter<W> {
    /// Reporter writing full snapshots
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            include_window: true,
            lines_written: 0,
        }
    }

    /// Leave the sample window out of each line
    pub fn without_window(mut self) -> Self {
        self.include_window = false;
        self
    }

    /// Lines written so far
    pub fn lines_written(&self) -> usize {
        self.lines_written
    }

    /// Recover the underlying writer
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> SnapshotSink for JsonReporter<W> {
    fn publish(&mut self, snapshot: &EngineSnapshot) -> ConnectorResult<()> {
        if self.include_window {
            serde_json::to_writer(&mut self.writer, snapshot)?;
        } else {
            let summary = SnapshotSummary {
                phase: snapshot.phase,
                baseline: snapshot.baseline,
                alert_active: snapshot.alert_active,
                peak_magnitude: snapshot.peak_magnitude,
                last_deviation: snapshot.last_deviation,
                latest_sample: snapshot.latest_sample,
                samples_accepted: snapshot.samples_accepted,
                samples_rejected: snapshot.samples_rejected,
                status: snapshot.status_line().to_string(),
            };
            serde_json::to_writer(&mut self.writer, &summary)?;
        }
        self.writer.write_all(b"\n")?;
        self.writer.flush()?;
        self.lines_written += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quakeguard_core::SeismicEngine;

    fn monitoring_snapshot() -> EngineSnapshot {
        let mut engine = SeismicEngine::new();
        for _ in 0..5 {
            engine.ingest(0.0).unwrap();
        }
        engine.ingest(0.6).unwrap();
        engine.snapshot()
    }

    #[test]
    fn writes_json_lines() {
        let mut reporter = JsonReporter::new(Vec::new());
        let snapshot = monitoring_snapshot();
        reporter.publish(&snapshot).unwrap();
        reporter.publish(&snapshot).unwrap();
        assert_eq!(reporter.lines_written(), 2);

        let output = String::from_utf8(reporter.into_inner()).unwrap();
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines.len(), 2);

        let value: serde_json::Value = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(value["alert_active"], true);
        assert_eq!(value["window"], serde_json::json!([0.6]));
    }

    #[test]
    fn summary_mode_drops_window() {
        let mut reporter = JsonReporter::new(Vec::new()).without_window();
        reporter.publish(&monitoring_snapshot()).unwrap();

        let output = String::from_utf8(reporter.into_inner()).unwrap();
        let value: serde_json::Value = serde_json::from_str(output.trim()).unwrap();
        assert!(value.get("window").is_none());
        assert_eq!(value["status"], "Monitoring | Max: 0.60g");
        assert_eq!(value["peak_magnitude"], 0.6);
    }

    #[test]
    fn closures_are_sinks() {
        let mut seen = 0;
        {
            let mut sink = |s: &EngineSnapshot| -> ConnectorResult<()> {
                assert!(s.alert_active);
                seen += 1;
                Ok(())
            };
            sink.publish(&monitoring_snapshot()).unwrap();
        }
        assert_eq!(seen, 1);
    }
}
