//! Fixed-Capacity Ring Buffer for Raw Samples
//!
//! ## Overview
//!
//! The engine keeps two windows of raw magnitude samples: the calibration
//! samples (capacity `CALIBRATION_SAMPLES`) and the monitoring window
//! (capacity `WINDOW_SIZE`). Both are a `SampleWindow<N>`, so the capacity of
//! each phase is part of its type rather than something trimmed by hand.
//!
//! ## Eviction
//!
//! `push` on a full window overwrites the oldest sample and hands it back:
//!
//! ```text
//! SampleWindow<3> after pushing 1, 2, 3, 4:
//! ┌─────┬─────┬─────┐
//! │  4  │  2  │  3  │  ← physical slots
//! └─────┴─────┴─────┘
//!          ↑
//!          └── oldest (write_pos = 1)
//!
//! Logical view: [2, 3, 4]   push(4) returned Some(1)
//! ```
//!
//! The returned sample is how the engine knows an eviction happened, which
//! drives the periodic peak reset.
//!
//! ## Usage Example
//!
//! ```rust
//! use quakeguard_core::buffer::SampleWindow;
//!
//! let mut window: SampleWindow<3> = SampleWindow::new();
//! assert_eq!(window.push(1.0), None);
//! window.push(2.0);
//! window.push(3.0);
//! assert_eq!(window.push(4.0), Some(1.0));
//!
//! let values: Vec<f64> = window.iter().collect();
//! assert_eq!(values, vec![2.0, 3.0, 4.0]);
//! ```

/// Fixed-size FIFO of `f64` samples
///
/// ## Internal Invariants
///
/// - `write_pos < N`
/// - `len <= N`
/// - Iteration yields samples oldest first
///
/// ## Thread Safety
///
/// Not synchronized. Share through `SharedEngine` or another lock.
#[derive(Debug, Clone)]
pub struct SampleWindow<const N: usize> {
    /// Storage; slots at or beyond `len` (when not full) are stale
    data: [f64; N],

    /// Index where the next write will occur
    write_pos: usize,

    /// Current number of valid samples
    len: usize,
}

impl<const N: usize> SampleWindow<N> {
    /// Creates an empty window
    ///
    /// ```rust
    /// use quakeguard_core::buffer::SampleWindow;
    /// static HISTORY: SampleWindow<100> = SampleWindow::new();
    /// ```
    pub const fn new() -> Self {
        Self {
            data: [0.0; N],
            write_pos: 0,
            len: 0,
        }
    }

    /// Appends a sample, returning the evicted oldest sample if the window
    /// was already full
    pub fn push(&mut self, sample: f64) -> Option<f64> {
        if N == 0 {
            return Some(sample);
        }

        let evicted = if self.len == N {
            Some(self.data[self.write_pos])
        } else {
            self.len += 1;
            None
        };

        self.data[self.write_pos] = sample;
        self.write_pos = (self.write_pos + 1) % N;
        evicted
    }

    /// Number of stored samples
    pub fn len(&self) -> usize {
        self.len
    }

    /// Check if window is empty
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Check if window is full
    pub fn is_full(&self) -> bool {
        self.len == N
    }

    /// Sample by logical index (0 = oldest, len-1 = newest)
    ///
    /// When the window is full the oldest sample sits at `write_pos`:
    ///
    /// ```text
    /// Physical: [D, E, A, B, C]  (write_pos = 2)
    /// Logical:  [A, B, C, D, E]
    /// logical[i] = physical[(write_pos + i) % N]
    /// ```
    pub fn get(&self, index: usize) -> Option<f64> {
        if index >= self.len {
            return None;
        }

        let actual_index = if self.len < N {
            index
        } else {
            (self.write_pos + index) % N
        };

        Some(self.data[actual_index])
    }

    /// Iterate over samples from oldest to newest
    pub fn iter(&self) -> SampleWindowIter<'_, N> {
        SampleWindowIter {
            window: self,
            index: 0,
        }
    }

    /// Arithmetic mean of the stored samples, `None` when empty
    ///
    /// Falls back to a running mean when the plain sum overflows, so the
    /// mean of finite samples is always finite (and exact for identical
    /// samples).
    pub fn mean(&self) -> Option<f64> {
        if self.is_empty() {
            return None;
        }

        let sum: f64 = self.iter().sum();
        if sum.is_finite() || self.iter().any(|s| !s.is_finite()) {
            return Some(sum / self.len as f64);
        }

        let mut mean = 0.0;
        for (i, sample) in self.iter().enumerate() {
            let k = (i + 1) as f64;
            mean += sample / k - mean / k;
        }
        Some(mean)
    }
}

/// Iterator over window contents, oldest first
pub struct SampleWindowIter<'a, const N: usize> {
    window: &'a SampleWindow<N>,
    index: usize,
}

impl<'a, const N: usize> Iterator for SampleWindowIter<'a, N> {
    type Item = f64;

    fn next(&mut self) -> Option<Self::Item> {
        let item = self.window.get(self.index)?;
        self.index += 1;
        Some(item)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.window.len().saturating_sub(self.index);
        (remaining, Some(remaining))
    }
}

impl<'a, const N: usize> ExactSizeIterator for SampleWindowIter<'a, N> {}

impl<const N: usize> Default for SampleWindow<N> {
    fn default() -> Self {
        Self::new()
    }
}
