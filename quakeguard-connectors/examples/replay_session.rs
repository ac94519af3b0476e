//! Replay a recorded sensor session
//!
//! This example demonstrates how to:
//! - Read magnitude lines from a file (or stdin)
//! - Run a monitoring session with `A`/`N` signaling
//! - Print the status and readout lines a seismograph would show
//!
//! ```bash
//! cargo run -p quakeguard-connectors --example replay_session -- capture.txt
//! ```

use std::io::{self, BufRead, BufReader};

use quakeguard_connectors::{CommandWriter, ConnectorResult, LineSource, Monitor};
use quakeguard_core::{constants::ALERT_BANNER, EngineSnapshot};

fn main() -> ConnectorResult<()> {
    println!("=== QuakeGuard Session Replay ===\n");

    let reader: Box<dyn BufRead + Send> = match std::env::args().nth(1) {
        Some(path) => Box::new(BufReader::new(std::fs::File::open(path)?)),
        None => Box::new(BufReader::new(io::stdin())),
    };

    let mut monitor = Monitor::new(LineSource::new(reader), CommandWriter::new(Vec::new()))
        .with_observer(|snapshot: &EngineSnapshot| -> ConnectorResult<()> {
            println!("{:<40} {}", snapshot.status_line().to_string(), snapshot.readout());
            if snapshot.alert_active {
                println!("    {}", ALERT_BANNER);
            }
            Ok(())
        });

    let summary = monitor.run()?;

    println!("\n{}", "=".repeat(50));
    println!("Samples:  {}", summary.samples);
    println!("Rejected: {}", summary.rejected);
    println!("Alerts:   {}", summary.alerts_raised);
    println!(
        "Commands: {}",
        String::from_utf8_lossy(monitor.sink().get_ref())
    );
    Ok(())
}
