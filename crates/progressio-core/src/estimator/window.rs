//! Fixed-size ring of (bytes, time) samples for instantaneous speed.

use std::time::Instant;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Sample {
    pub bytes: u64,
    pub at: Instant,
}

/// Circular buffer; `cursor` is the next slot to overwrite.
#[derive(Debug)]
pub(crate) struct SampleWindow {
    slots: Vec<Option<Sample>>,
    cursor: usize,
}

impl SampleWindow {
    /// At least one slot is always allocated.
    pub fn new(capacity: usize) -> Self {
        Self {
            slots: vec![None; capacity.max(1)],
            cursor: 0,
        }
    }

    /// Store a sample and return the oldest retained one, if the ring has
    /// wrapped at least once.
    pub fn record(&mut self, bytes: u64, at: Instant) -> Option<Sample> {
        self.slots[self.cursor] = Some(Sample { bytes, at });
        self.cursor = (self.cursor + 1) % self.slots.len();
        self.slots[self.cursor]
    }

    #[cfg(test)]
    pub fn set(&mut self, index: usize, sample: Sample) {
        self.slots[index] = Some(sample);
    }
}
