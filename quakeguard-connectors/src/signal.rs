//! Alarm signaling
//!
//! The alert flag is mirrored onto an external channel as single-byte
//! commands. On the wire:
//!
//! ```text
//! 'A' (0x41)  alert active
//! 'N' (0x4E)  normal
//! ```
//!
//! The receiving side (typically a microcontroller driving an LED and a
//! buzzer) acts on the latest byte, so repeating the same command is
//! harmless and lets a device that reconnects mid-session resync at once.

use std::io::Write;

use serde::Serialize;

use crate::ConnectorResult;

/// Command sent to the actuation device
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum AlertCommand {
    /// Earthquake detected
    Alert,
    /// Ground at rest
    Normal,
}

impl AlertCommand {
    /// Command for an alert flag value
    pub fn from_alert(alert_active: bool) -> Self {
        if alert_active {
            Self::Alert
        } else {
            Self::Normal
        }
    }

    /// Wire byte
    pub fn as_byte(self) -> u8 {
        match self {
            Self::Alert => b'A',
            Self::Normal => b'N',
        }
    }

    /// Parse a wire byte
    pub fn from_byte(byte: u8) -> Option<Self> {
        match byte {
            b'A' => Some(Self::Alert),
            b'N' => Some(Self::Normal),
            _ => None,
        }
    }
}

/// When to emit a command
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SignalMode {
    /// One command after every sample
    #[default]
    EverySample,
    /// Only when the alert flag changes (first sample always sent)
    OnChange,
}

/// Counters for a signaling channel
#[derive(Debug, Default, Clone, PartialEq, Serialize)]
pub struct SignalStats {
    /// Commands written
    pub commands_sent: u64,
    /// `Alert` commands written
    pub alerts_sent: u64,
    /// Samples for which no command was needed
    pub suppressed: u64,
}

/// Something that reacts to the alert flag after each sample
pub trait AlertSink {
    /// Observe the alert flag for the latest sample
    fn signal(&mut self, alert_active: bool) -> ConnectorResult<()>;

    /// Counters so far
    fn stats(&self) -> SignalStats;
}

/// Writes `A`/`N` command bytes to any byte sink (serial port, pipe, file)
///
/// ```rust
/// use quakeguard_connectors::{AlertSink, CommandWriter};
///
/// let mut writer = CommandWriter::new(Vec::new());
/// writer.signal(false).unwrap();
/// writer.signal(true).unwrap();
/// assert_eq!(writer.into_inner(), b"NA");
/// ```
pub struct CommandWriter<W: Write> {
    writer: W,
    mode: SignalMode,
    last_sent: Option<AlertCommand>,
    stats: SignalStats,
}

impl<W: Write> CommandWriter<W> {
    /// Writer sending one command per sample
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            mode: SignalMode::EverySample,
            last_sent: None,
            stats: SignalStats::default(),
        }
    }

    /// Change when commands are emitted
    pub fn with_mode(mut self, mode: SignalMode) -> Self {
        self.mode = mode;
        self
    }

    /// Last command written
    pub fn last_sent(&self) -> Option<AlertCommand> {
        self.last_sent
    }

    /// Borrow the underlying writer
    pub fn get_ref(&self) -> &W {
        &self.writer
    }

    /// Recover the underlying writer
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> AlertSink for CommandWriter<W> {
    fn signal(&mut self, alert_active: bool) -> ConnectorResult<()> {
        let command = AlertCommand::from_alert(alert_active);

        if self.mode == SignalMode::OnChange && self.last_sent == Some(command) {
            self.stats.suppressed += 1;
            return Ok(());
        }

        self.writer.write_all(&[command.as_byte()])?;
        self.writer.flush()?;

        self.last_sent = Some(command);
        self.stats.commands_sent += 1;
        if command == AlertCommand::Alert {
            self.stats.alerts_sent += 1;
        }
        Ok(())
    }

    fn stats(&self) -> SignalStats {
        self.stats.clone()
    }
}
