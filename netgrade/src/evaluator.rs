use crate::report::SessionReport;
use anyhow::{Context as _, Result};
use log::{debug, warn};
use netgrade_core::{NetworkScore, NetworkScorer, ScoreError};
use std::collections::HashMap;

/// A session-quality evaluator.
///
/// An evaluator accepts one session's telemetry snapshot and returns a
/// bounded score in `[0, 100]`. Each quality dimension of the
/// surrounding toolkit (network transport, perceptual audio,
/// perceptual video) is a separate implementing type; evaluators hold
/// configuration only and never retain per-session state, so one
/// instance may evaluate any number of sessions, concurrently or not.
///
/// This crate ships [`NetworkEvaluator`]. Perceptual audio/video
/// evaluators delegate to external scoring engines and plug in behind
/// this same trait.
pub trait Evaluator {
    /// Short name of this evaluator, used as the key in result
    /// objects (e.g. `"network"`).
    fn name(&self) -> &str;

    /// Evaluate one session, returning its score in `[0, 100]`.
    fn evaluate(&self, report: &SessionReport) -> Result<f64>;
}

/// Scores a session's network quality from its packet telemetry.
///
/// A thin front-end over [`NetworkScorer`]: parses nothing itself,
/// logs what it sees, and surfaces the composite score through the
/// [`Evaluator`] contract.
///
/// ```
/// use netgrade::{Evaluator, NetworkEvaluator, SessionReport};
/// use netgrade_core::{PacketRecord, Ssrc};
///
/// let records: Vec<PacketRecord> = (0..5)
///     .map(|i| PacketRecord::new(Ssrc::new(1), i, i as i64 * 20, i as i64 * 20 + 50, 1_200))
///     .collect();
/// let report = SessionReport::from_records(records);
///
/// let evaluator = NetworkEvaluator::new();
/// let score = evaluator.evaluate(&report).unwrap();
/// assert_eq!(score, 100.0);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct NetworkEvaluator {
    scorer: NetworkScorer,
}

impl NetworkEvaluator {
    /// An evaluator with the default [`NetworkScorer`] configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// An evaluator using the given scorer configuration.
    pub fn with_scorer(scorer: NetworkScorer) -> Self {
        Self { scorer }
    }

    /// Evaluate one session, returning the full per-dimension
    /// breakdown instead of just the composite score.
    pub fn evaluate_detailed(&self, report: &SessionReport) -> Result<NetworkScore, ScoreError> {
        self.log_anomalies(report);
        let score = self.scorer.score(report.records())?;
        debug!(
            "network score {:.2} (delay {:.4}, throughput {:.4}, loss {}/{} rate {:.4}) over {} stream(s)",
            score.score,
            score.delay_score,
            score.throughput_score,
            score.loss_count,
            score.packets,
            score.loss_rate,
            score.streams.len(),
        );
        Ok(score)
    }

    /// Telemetry oddities worth flagging but legal to score.
    fn log_anomalies(&self, report: &SessionReport) {
        let mut last_seq: HashMap<u32, u64> = HashMap::new();
        for record in report.records() {
            let ssrc = record.ssrc.value();
            if let Some(&last) = last_seq.get(&ssrc)
                && record.sequence_number < last
            {
                warn!(
                    "stream {}: sequence number went backwards ({} after {}); \
                     wraparound is not modeled and no loss is counted for it",
                    record.ssrc, record.sequence_number, last
                );
            }
            last_seq.insert(ssrc, record.sequence_number);
        }
    }
}

impl Evaluator for NetworkEvaluator {
    fn name(&self) -> &str {
        "network"
    }

    fn evaluate(&self, report: &SessionReport) -> Result<f64> {
        let score = self
            .evaluate_detailed(report)
            .context("network evaluation failed")?;
        Ok(score.score)
    }
}
