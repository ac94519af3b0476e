//! Memory-based sample stream for tests and replay
//!
//! ```rust
//! use quakeguard_core::stream::MemoryStream;
//! use quakeguard_core::Stream;
//!
//! let samples = [1.0, 1.02, 0.98];
//! let mut stream = MemoryStream::new(&samples);
//! while let Ok(sample) = stream.poll_next() {
//!     // feed the engine
//! #   let _ = sample;
//! }
//! assert!(stream.is_exhausted());
//! ```

use core::convert::Infallible;

use super::{Stream, StreamError};

/// Replays a borrowed slice of samples in order
pub struct MemoryStream<'a> {
    samples: &'a [f64],
    position: usize,
}

impl<'a> MemoryStream<'a> {
    /// Create new memory stream from slice
    pub fn new(samples: &'a [f64]) -> Self {
        Self {
            samples,
            position: 0,
        }
    }

    /// Reset to beginning
    pub fn reset(&mut self) {
        self.position = 0;
    }

    /// Get current position
    pub fn position(&self) -> usize {
        self.position
    }

    /// Check if stream is exhausted
    pub fn is_exhausted(&self) -> bool {
        self.position >= self.samples.len()
    }
}

impl<'a> Stream for MemoryStream<'a> {
    type Item = f64;
    // A slice has no transport that can fail
    type Error = StreamError<Infallible>;

    fn poll_next(&mut self) -> nb::Result<Self::Item, Self::Error> {
        let sample = self
            .samples
            .get(self.position)
            .copied()
            .ok_or(nb::Error::Other(StreamError::EndOfStream))?;
        self.position += 1;
        Ok(sample)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.samples.len().saturating_sub(self.position);
        (remaining, Some(remaining))
    }
}
