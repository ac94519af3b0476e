//! Sample source trait
//!
//! The engine only needs "give me the next magnitude". Sources are
//! pull-based and non-blocking through `nb`, so the same loop drives a
//! serial port, a file replay or an in-memory test fixture without an async
//! runtime.
//!
//! ```rust
//! use quakeguard_core::{SeismicEngine, Stream};
//! use quakeguard_core::stream::MemoryStream;
//!
//! fn pump<S: Stream<Item = f64>>(source: &mut S, engine: &mut SeismicEngine) {
//!     loop {
//!         match source.poll_next() {
//!             Ok(value) => { let _ = engine.ingest(value); }
//!             Err(nb::Error::WouldBlock) => return, // come back later
//!             Err(nb::Error::Other(_)) => return,   // end of stream or transport failure
//!         }
//!     }
//! }
//!
//! let samples = [1.0; 6];
//! let mut engine = SeismicEngine::new();
//! pump(&mut MemoryStream::new(&samples), &mut engine);
//! assert!(engine.is_calibrated());
//! ```

/// Pull-based source of samples
///
/// ## Contract
///
/// - `poll_next` never blocks indefinitely
/// - `Err(nb::Error::WouldBlock)` means "nothing yet", try again
/// - `Err(nb::Error::Other(e))` is a real error; end of stream is reported
///   this way too and repeats on every later call
/// - Parsing and filtering of malformed input happen here, never in the
///   engine
pub trait Stream {
    /// Type of items produced by the stream
    type Item;

    /// Type of errors that can occur
    type Error;

    /// Attempt to pull the next item
    fn poll_next(&mut self) -> nb::Result<Self::Item, Self::Error>;

    /// Bounds on remaining items, like `Iterator::size_hint`
    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, None)
    }
}
