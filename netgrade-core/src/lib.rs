/*!
# netgrade-core

Deterministic network-quality scoring for real-time media sessions.

Given the receiver-side telemetry of one session — a sequence of
[`PacketRecord`]s in arrival order, possibly interleaving several
streams — [`NetworkScorer`] reduces three independently degrading
dimensions to one composite score in `[0, 100]`:

- **delay**: per-stream relative delay against a first-packet
  baseline, reduced through a clamped 95th percentile;
- **loss**: packets inferred missing from sequence-counter gaps,
  summed session-wide;
- **throughput**: how well the receive pace tracked the send pace,
  under a configurable [`ThroughputFormulation`].

Scoring is a single pass, purely computational, and holds no state
between calls: the same telemetry always produces the same score.
*/

pub mod measure;
mod record;
mod scorer;
pub mod stats;
mod stream;

pub use self::{
    measure::{MaxDelay, ThroughputFormulation},
    record::{PacketRecord, Ssrc},
    scorer::{NetworkScorer, ScoreError},
    stats::NetworkScore,
};
