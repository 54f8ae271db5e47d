/*!
# netgrade

Network-quality evaluation of real-time media sessions.

`netgrade` wraps the scoring primitives of [`netgrade_core`] with the
session-facing surface: the [`Evaluator`] capability contract, the
[`SessionReport`] JSON ingestion for browser-style per-packet
statistics dumps, and the [`NetworkEvaluator`] that turns one report
into a composite `[0, 100]` score.
*/

mod evaluator;
mod report;

// convenient re-export of `netgrade_core` core objects
pub use netgrade_core::{
    MaxDelay, NetworkScore, NetworkScorer, PacketRecord, ScoreError, Ssrc, ThroughputFormulation,
};

pub use self::{
    evaluator::{Evaluator, NetworkEvaluator},
    report::{ReportError, SessionReport},
};
