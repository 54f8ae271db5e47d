/// Session-wide packet-loss accumulator.
///
/// Loss is inferred from gaps in each stream's monotonically
/// increasing sequence counter and summed across all streams into a
/// single session counter. Sequence wraparound is not modeled: a
/// counter that goes backwards contributes no loss, it only resets
/// the expectation for the next packet.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LossTracker {
    count: u64,
}

impl LossTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Account for the gap between a stream's previous sequence number
    /// and the one just received.
    ///
    /// A gap of `g` missing integers adds `g` to the session loss
    /// count; a repeated or backwards sequence number adds nothing.
    pub fn observe_gap(&mut self, last_sequence: u64, sequence: u64) {
        if sequence > last_sequence {
            self.count += sequence - last_sequence - 1;
        }
    }

    /// Total packets inferred lost so far.
    pub fn count(&self) -> u64 {
        self.count
    }

    /// Loss rate over the session: `lost / (lost + received)`.
    ///
    /// Always in `[0, 1)` for a non-empty session: the received count
    /// keeps the denominator strictly larger than the numerator.
    pub fn rate(&self, received: u64) -> f64 {
        debug_assert!(received > 0, "rate is undefined for an empty session");
        self.count as f64 / (self.count + received) as f64
    }
}
