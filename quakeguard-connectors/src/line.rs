//! Text line sample source
//!
//! Accelerometer sketches typically print one magnitude per line over a
//! serial link:
//!
//! ```text
//! 0.98
//! 1.02
//! 1.01
//! ```
//!
//! `LineSource` turns any `BufRead` carrying that format into a
//! `Stream<Item = f64>`. Leading/trailing whitespace and `\r` are trimmed,
//! blank lines are ignored, and lines that do not parse as `f64` are logged
//! and skipped.
//!
//! ## Bounded lines
//!
//! A pending line holds at most `MAX_LINE_LEN` bytes. A longer line (a link
//! at the wrong baud rate never sends `\n`) is dropped: the poll that hits
//! the limit returns `StreamError::Overflow`, and the rest of the line is
//! discarded up to the next newline. The source stays usable.
//!
//! ## Non-blocking transports
//!
//! A read that fails with `WouldBlock` or `TimedOut` (serial ports opened
//! with a read timeout) becomes `nb::Error::WouldBlock`. Bytes already
//! received for the current line are kept and completed on the next poll.

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

use quakeguard_core::stream::StreamError;
use quakeguard_core::Stream;

/// Longest accepted line in bytes, excluding the newline
pub const MAX_LINE_LEN: usize = 256;

/// Counters for a line source
#[derive(Debug, Default, Clone, PartialEq)]
pub struct LineSourceStats {
    /// Complete lines read, including blank, malformed and oversized ones
    pub lines_read: usize,
    /// Lines that produced a sample
    pub samples_parsed: usize,
    /// Lines that did not parse
    pub parse_errors: usize,
    /// Lines dropped for exceeding `MAX_LINE_LEN`
    pub overflows: usize,
}

/// Stream of samples parsed from text lines
pub struct LineSource<R> {
    reader: R,
    line: heapless::Vec<u8, MAX_LINE_LEN>,
    discarding: bool,
    eof: bool,
    stats: LineSourceStats,
}

impl LineSource<BufReader<File>> {
    /// Open a recorded session file
    pub fn open(path: impl AsRef<Path>) -> io::Result<Self> {
        let file = File::open(path)?;
        Ok(Self::new(BufReader::new(file)))
    }
}

impl<R: BufRead> LineSource<R> {
    /// Wrap a buffered reader
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            line: heapless::Vec::new(),
            discarding: false,
            eof: false,
            stats: LineSourceStats::default(),
        }
    }

    /// Get statistics
    pub fn stats(&self) -> &LineSourceStats {
        &self.stats
    }

    /// Recover the underlying reader
    pub fn into_inner(self) -> R {
        self.reader
    }

    /// Parse the buffered line; `None` for blank or malformed lines
    fn take_sample(&mut self) -> Option<f64> {
        self.stats.lines_read += 1;

        let sample = match core::str::from_utf8(&self.line) {
            Ok(text) => {
                let text = text.trim();
                if text.is_empty() {
                    None
                } else if let Ok(value) = text.parse::<f64>() {
                    self.stats.samples_parsed += 1;
                    Some(value)
                } else {
                    self.stats.parse_errors += 1;
                    log::warn!("Invalid data: {}", text);
                    None
                }
            }
            Err(_) => {
                self.stats.parse_errors += 1;
                log::warn!("Invalid data: line is not valid UTF-8");
                None
            }
        };

        self.line.clear();
        sample
    }
}

impl<R: BufRead> Stream for LineSource<R> {
    type Item = f64;
    type Error = StreamError<io::Error>;

    fn poll_next(&mut self) -> nb::Result<Self::Item, Self::Error> {
        loop {
            if self.eof {
                return Err(nb::Error::Other(StreamError::EndOfStream));
            }

            let available = match self.reader.fill_buf() {
                Ok(bytes) => bytes,
                Err(e) if matches!(e.kind(), io::ErrorKind::WouldBlock | io::ErrorKind::TimedOut) => {
                    return Err(nb::Error::WouldBlock);
                }
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(nb::Error::Other(StreamError::Transport(e))),
            };

            if available.is_empty() {
                self.eof = true;
                // Final line without a trailing newline
                if !self.discarding && !self.line.is_empty() {
                    if let Some(sample) = self.take_sample() {
                        return Ok(sample);
                    }
                }
                continue;
            }

            let newline = available.iter().position(|&b| b == b'\n');
            let chunk = &available[..newline.unwrap_or(available.len())];
            let overflowed = !self.discarding && self.line.extend_from_slice(chunk).is_err();
            let consumed = newline.map_or(chunk.len(), |pos| pos + 1);
            self.reader.consume(consumed);

            if overflowed {
                self.line.clear();
                self.discarding = newline.is_none();
                self.stats.lines_read += 1;
                self.stats.overflows += 1;
                log::warn!("Invalid data: line exceeds {} bytes", MAX_LINE_LEN);
                return Err(nb::Error::Other(StreamError::Overflow));
            }

            if newline.is_some() {
                if self.discarding {
                    self.discarding = false;
                } else if let Some(sample) = self.take_sample() {
                    return Ok(sample);
                }
            }
        }
    }
}
