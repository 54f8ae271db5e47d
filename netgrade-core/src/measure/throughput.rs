use std::{fmt, str::FromStr};

/// How the throughput dimension of a session is scored.
///
/// Two formulations are supported; they measure genuinely different
/// things and produce different numbers on the same telemetry, so the
/// choice is configuration rather than a hard-coded default buried in
/// the scorer.
///
/// # Example
///
/// ```
/// use netgrade_core::measure::ThroughputFormulation;
///
/// let default = ThroughputFormulation::default();
/// assert_eq!(default, ThroughputFormulation::InstantRatio);
/// assert_eq!(default.to_string(), "instant-ratio");
///
/// let parsed: ThroughputFormulation = "cumulative-rate".parse().unwrap();
/// assert_eq!(parsed, ThroughputFormulation::CumulativeRate);
/// ```
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ThroughputFormulation {
    /// Pace-tracking ratio per consecutive packet pair (default).
    ///
    /// For each consecutive pair of records within a stream the send
    /// spacing is compared to the arrival spacing. An interval where
    /// the receiver fell behind (zero arrival spacing, or send spacing
    /// exceeding arrival spacing) scores `0`; otherwise it scores
    /// `send_delta / recv_delta`, at most `1`. Per-stream score is the
    /// mean over intervals; the session score is the mean over streams.
    #[default]
    InstantRatio,
    /// Cumulative receive rate normalized to its own peak.
    ///
    /// Each time a stream's arrival clock advances past its first
    /// record, the cumulative bytes-per-millisecond since that first
    /// record is taken as one sample. The session score is
    /// `mean(samples) / max(samples)` over all streams' samples, so
    /// the best-performing moment of the session defines `1.0`.
    CumulativeRate,
}

impl fmt::Display for ThroughputFormulation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ThroughputFormulation::InstantRatio => write!(f, "instant-ratio"),
            ThroughputFormulation::CumulativeRate => write!(f, "cumulative-rate"),
        }
    }
}

impl FromStr for ThroughputFormulation {
    type Err = FormulationParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "instant-ratio" => Ok(ThroughputFormulation::InstantRatio),
            "cumulative-rate" => Ok(ThroughputFormulation::CumulativeRate),
            other => Err(FormulationParseError(other.to_owned())),
        }
    }
}

/// Error returned when parsing a [`ThroughputFormulation`] from a
/// string.
#[derive(Debug, Clone, thiserror::Error)]
#[error("unknown throughput formulation {0:?}, expected \"instant-ratio\" or \"cumulative-rate\"")]
pub struct FormulationParseError(String);

/// Error produced while reducing throughput samples.
///
/// Unlike delay errors, these name no stream: the cumulative-rate
/// sample pool is session-wide (every stream's samples are normalized
/// against one shared peak), so no single stream is the offender.
#[derive(Debug, Clone, Copy, thiserror::Error)]
pub enum ThroughputError {
    /// No stream ever advanced its arrival clock, so the cumulative
    /// formulation collected nothing to normalize.
    #[error("no throughput samples were collected on any stream")]
    NoSamples,
    /// Every collected cumulative-rate sample is zero; normalizing to
    /// the peak would divide by zero.
    #[error("peak throughput is zero across all streams' samples")]
    ZeroPeakRate,
}

/// One pace-tracking sample for a consecutive pair of records.
///
/// `0` when the receiver fell behind on this interval, otherwise the
/// send-spacing to arrival-spacing ratio (in `(0, 1]`).
pub(crate) fn instant_ratio_sample(send_delta_ms: i64, recv_delta_ms: i64) -> f64 {
    if recv_delta_ms == 0 || send_delta_ms > recv_delta_ms {
        0.0
    } else {
        send_delta_ms as f64 / recv_delta_ms as f64
    }
}

/// Mean of a non-empty sample slice.
pub(crate) fn mean(samples: &[f64]) -> f64 {
    debug_assert!(!samples.is_empty());
    samples.iter().sum::<f64>() / samples.len() as f64
}

/// Session throughput score under [`ThroughputFormulation::CumulativeRate`]:
/// the mean of all streams' cumulative-rate samples, normalized to the
/// peak sample.
pub(crate) fn cumulative_rate_score(samples: &[f64]) -> Result<f64, ThroughputError> {
    if samples.is_empty() {
        return Err(ThroughputError::NoSamples);
    }
    let peak = samples.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    if peak <= 0.0 {
        return Err(ThroughputError::ZeroPeakRate);
    }
    Ok(mean(samples) / peak)
}
