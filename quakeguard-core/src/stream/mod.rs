//! Sample streams
//!
//! - Stream error type (this file)
//! - `memory` - replay a slice of samples (tests, recorded sessions)
//!
//! Text and serial sources live in `quakeguard-connectors`.

use core::fmt;

pub mod memory;

pub use memory::MemoryStream;

pub use crate::traits::Stream;

/// Errors that can occur while pulling samples
#[derive(Debug, Clone, PartialEq)]
pub enum StreamError<E> {
    /// Transport-level error (e.g., I/O error)
    Transport(E),
    /// Line or frame longer than the source's buffer; the source dropped it
    /// and can be polled again
    Overflow,
    /// End of stream reached
    EndOfStream,
}

impl<E: fmt::Display> fmt::Display for StreamError<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Transport(e) => write!(f, "Transport error: {}", e),
            Self::Overflow => write!(f, "Buffer overflow"),
            Self::EndOfStream => write!(f, "End of stream"),
        }
    }
}

impl<E> StreamError<E> {
    /// Whether this error just marks the end of a finite source
    pub fn is_end_of_stream(&self) -> bool {
        matches!(self, Self::EndOfStream)
    }
}
