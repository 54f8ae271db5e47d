use crate::{
    measure::{
        DelayError, LossTracker, MaxDelay, ThroughputError, ThroughputFormulation,
        cumulative_rate_score, mean, stream_delay_score,
    },
    record::{PacketRecord, Ssrc},
    stats::NetworkScore,
    stream::StreamState,
};
use std::collections::BTreeMap;
use thiserror::Error;

/// Scores the network quality of a real-time media session from its
/// per-packet receiver telemetry.
///
/// One call to [`score`](NetworkScorer::score) makes a single pass
/// over the record sequence, accumulating per-stream state for the
/// delay, loss, and throughput dimensions, then reduces the three
/// dimensions to one composite number in `[0, 100]`. All accumulation
/// happens in locals: the scorer itself holds configuration only, so
/// scoring the same telemetry twice yields bit-identical results and
/// independent sessions can be scored from any number of threads.
///
/// # Example
///
/// ```
/// use netgrade_core::{NetworkScorer, PacketRecord, Ssrc};
///
/// // one stream, constant 50ms in flight, no sequence gaps
/// let records: Vec<PacketRecord> = (0..5)
///     .map(|i| PacketRecord::new(Ssrc::new(0xE0A1), i, i as i64 * 100, i as i64 * 100 + 50, 1_200))
///     .collect();
///
/// let result = NetworkScorer::new().score(&records).unwrap();
/// assert_eq!(result.score, 100.0);
/// assert_eq!(result.loss_count, 0);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct NetworkScorer {
    max_delay: MaxDelay,
    formulation: ThroughputFormulation,
}

impl NetworkScorer {
    /// A scorer with the default configuration: 400ms delay ceiling,
    /// [`ThroughputFormulation::InstantRatio`].
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the delay ceiling used by the delay dimension.
    pub fn with_max_delay(mut self, max_delay: MaxDelay) -> Self {
        self.max_delay = max_delay;
        self
    }

    /// Set the throughput formulation.
    pub fn with_formulation(mut self, formulation: ThroughputFormulation) -> Self {
        self.formulation = formulation;
        self
    }

    /// The configured delay ceiling.
    pub fn max_delay(&self) -> MaxDelay {
        self.max_delay
    }

    /// The configured throughput formulation.
    pub fn formulation(&self) -> ThroughputFormulation {
        self.formulation
    }

    /// Score one session's telemetry.
    ///
    /// The records must be in arrival order; streams may interleave
    /// freely. Every distinct SSRC needs at least two records, since
    /// the throughput dimension is defined over deltas.
    ///
    /// The composite score is clamped to `[0, 100]`. The unclamped
    /// per-dimension scores are reported in the returned
    /// [`NetworkScore`].
    ///
    /// # Errors
    ///
    /// Fails on an empty record sequence, on a stream with fewer than
    /// two records, and on degenerate statistics (a delay baseline
    /// whose scoring denominator collapses, or a zero-peak throughput
    /// sample set). There is no partial-result mode: any of these
    /// aborts the call.
    pub fn score(&self, records: &[PacketRecord]) -> Result<NetworkScore, ScoreError> {
        if records.is_empty() {
            return Err(ScoreError::EmptyInput);
        }

        // Single pass. BTreeMap keeps cross-stream reductions in a
        // fixed (ascending SSRC) order, which keeps floating-point
        // means identical from one call to the next.
        let mut streams: BTreeMap<Ssrc, StreamState> = BTreeMap::new();
        let mut loss = LossTracker::new();
        for record in records {
            match streams.get_mut(&record.ssrc) {
                Some(state) => state.observe(record, &mut loss),
                None => {
                    streams.insert(record.ssrc, StreamState::first(record));
                }
            }
        }

        for (ssrc, state) in &streams {
            if state.records < 2 {
                return Err(ScoreError::StreamTooShort {
                    ssrc: *ssrc,
                    records: state.records,
                });
            }
        }

        let delay_scores = streams
            .iter()
            .map(|(ssrc, state)| stream_delay_score(*ssrc, &state.delays, self.max_delay))
            .collect::<Result<Vec<f64>, DelayError>>()?;
        let delay_score = mean(&delay_scores);

        let throughput_score = match self.formulation {
            ThroughputFormulation::InstantRatio => {
                let per_stream: Vec<f64> = streams
                    .values()
                    .map(|state| mean(&state.ratio_samples))
                    .collect();
                mean(&per_stream)
            }
            ThroughputFormulation::CumulativeRate => {
                let samples: Vec<f64> = streams
                    .values()
                    .flat_map(|state| state.rate_samples.iter().copied())
                    .collect();
                cumulative_rate_score(&samples)?
            }
        };

        let loss_rate = loss.rate(records.len() as u64);

        let weight = 100.0 / 3.0;
        let raw = weight * delay_score + weight * throughput_score + weight * (1.0 - loss_rate);

        Ok(NetworkScore {
            score: raw.clamp(0.0, 100.0),
            delay_score,
            throughput_score,
            loss_count: loss.count(),
            loss_rate,
            packets: records.len(),
            streams: streams.keys().copied().collect(),
        })
    }
}

/// Error produced by [`NetworkScorer::score`].
#[derive(Debug, Clone, Error)]
pub enum ScoreError {
    /// The record sequence is empty. An empty session is a caller
    /// error, not a zero-quality session.
    #[error("no telemetry records to score")]
    EmptyInput,
    /// A stream has too few records for throughput deltas.
    #[error("stream {ssrc} has {records} record(s), need at least 2")]
    StreamTooShort { ssrc: Ssrc, records: u64 },
    /// A stream's delay statistics degenerated.
    #[error(transparent)]
    Delay(#[from] DelayError),
    /// The throughput samples degenerated.
    #[error(transparent)]
    Throughput(#[from] ThroughputError),
}
