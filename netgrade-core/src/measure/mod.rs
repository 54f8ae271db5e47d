//! Per-dimension quality measures.
//!
//! Each file covers one independently degrading dimension of a media
//! session: relative delay, sequence-gap loss, and throughput
//! pace. The [`NetworkScorer`](crate::NetworkScorer) folds packet
//! telemetry through these measures and aggregates the results.

mod delay;
mod loss;
mod percentile;
mod throughput;

pub use self::{
    delay::{DEFAULT_MAX_DELAY, DelayError, MaxDelay, MaxDelayError, MaxDelayParseError},
    loss::LossTracker,
    percentile::percentile,
    throughput::{FormulationParseError, ThroughputError, ThroughputFormulation},
};

pub(crate) use self::{
    delay::stream_delay_score,
    throughput::{cumulative_rate_score, instant_ratio_sample, mean},
};
