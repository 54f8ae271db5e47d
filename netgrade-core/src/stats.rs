//! Scoring results.
//!
//! [`NetworkScore`] is the read-only snapshot produced by one
//! [`NetworkScorer::score`](crate::NetworkScorer::score) call.

use crate::record::Ssrc;

/// The outcome of scoring one session's packet telemetry.
///
/// [`score`](NetworkScore::score) is the composite quality number in
/// `[0, 100]`. The component fields are reported raw — the delay and
/// throughput dimensions are not individually clamped, so a
/// pathological session remains visible in the breakdown even though
/// the composite is bounded.
#[derive(Debug, Clone, PartialEq)]
pub struct NetworkScore {
    /// Composite session score, clamped to `[0, 100]`.
    pub score: f64,
    /// Mean per-stream delay score (unclamped; `1.0` means zero jitter).
    pub delay_score: f64,
    /// Session throughput score under the configured formulation.
    pub throughput_score: f64,
    /// Packets inferred lost from sequence gaps, across all streams.
    pub loss_count: u64,
    /// `loss_count / (loss_count + packets)`, in `[0, 1)`.
    pub loss_rate: f64,
    /// Number of telemetry records scored.
    pub packets: usize,
    /// The distinct streams seen, in ascending SSRC order.
    pub streams: Vec<Ssrc>,
}
