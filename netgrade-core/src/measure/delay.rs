use crate::{measure::percentile, record::Ssrc};
use std::{fmt, str::FromStr};

/// Default delay ceiling: 400ms.
pub const DEFAULT_MAX_DELAY: MaxDelay = MaxDelay(400.0);

/// The delay ceiling used when scoring a stream's relative delays.
///
/// Relative delays beyond this bound are treated as equally bad: each
/// stored delay is clamped to `MaxDelay` before the 95th percentile is
/// taken, so a handful of extreme outliers cannot dominate the score.
///
/// # Example
///
/// ```
/// use netgrade_core::measure::MaxDelay;
///
/// let default = MaxDelay::default();
/// assert_eq!(default.to_string(), "400ms");
///
/// // parsed, the `ms` suffix is optional
/// let parsed: MaxDelay = "250ms".parse().unwrap();
/// assert_eq!(parsed, MaxDelay::new(250.0).unwrap());
///
/// // non-positive ceilings are rejected at construction
/// assert!(MaxDelay::new(0.0).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct MaxDelay(f64);

impl MaxDelay {
    /// Create a new delay ceiling, in milliseconds.
    ///
    /// # Errors
    ///
    /// Returns [`MaxDelayError`] if `millis` is not strictly positive
    /// (including NaN).
    pub fn new(millis: f64) -> Result<Self, MaxDelayError> {
        if !(millis > 0.0) {
            return Err(MaxDelayError(millis));
        }
        Ok(Self(millis))
    }

    /// The ceiling in milliseconds.
    pub fn as_millis(self) -> f64 {
        self.0
    }
}

impl Default for MaxDelay {
    fn default() -> Self {
        DEFAULT_MAX_DELAY
    }
}

impl fmt::Display for MaxDelay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.fract() == 0.0 {
            write!(f, "{}ms", self.0 as u64)
        } else {
            write!(f, "{:.2}ms", self.0)
        }
    }
}

impl FromStr for MaxDelay {
    type Err = MaxDelayParseError;

    /// Parses a millisecond value like `"400"` or `"400ms"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let num = s.strip_suffix("ms").unwrap_or(s);
        let millis: f64 = num
            .trim()
            .parse()
            .map_err(|_| MaxDelayParseError::InvalidNumber)?;
        MaxDelay::new(millis).map_err(MaxDelayParseError::OutOfRange)
    }
}

/// Error returned when constructing a [`MaxDelay`] with a value that
/// is not strictly positive.
#[derive(Debug, Clone, Copy, thiserror::Error)]
#[error("max delay must be strictly positive milliseconds, got {0}")]
pub struct MaxDelayError(f64);

/// Error returned when parsing a [`MaxDelay`] from a string.
#[derive(Debug, Clone, thiserror::Error)]
pub enum MaxDelayParseError {
    /// The value could not be parsed as a float.
    #[error("invalid millisecond value")]
    InvalidNumber,
    /// The parsed value is not strictly positive.
    #[error("{0}")]
    OutOfRange(#[from] MaxDelayError),
}

/// Error produced while reducing a stream's delay distribution.
#[derive(Debug, Clone, Copy, thiserror::Error)]
pub enum DelayError {
    /// The scoring denominator `max_delay - min_delay / 2` collapsed
    /// to zero or below for this stream. Happens when the minimum
    /// relative delay is at least twice the ceiling, which means the
    /// stream's clock baseline is unusable for scoring.
    #[error("stream {ssrc}: degenerate delay baseline (denominator {denominator})")]
    DegenerateBaseline { ssrc: Ssrc, denominator: f64 },
}

/// Reduce one stream's relative-delay sequence to a delay score.
///
/// Each delay is clamped to `max_delay`, the 95th percentile of the
/// clamped sequence is taken, and the score is
/// `(max_delay - p95) / (max_delay - min/2)` where `min` is the
/// minimum of the *unclamped* delays. A zero-jitter stream scores
/// exactly `1.0`; the per-stream score is intentionally not clamped,
/// so pathological drift can push it above `1.0` or below `0.0`
/// (clamping happens once, on the final aggregate).
pub(crate) fn stream_delay_score(
    ssrc: Ssrc,
    delays: &[f64],
    max_delay: MaxDelay,
) -> Result<f64, DelayError> {
    debug_assert!(!delays.is_empty(), "a sighted stream has >= 1 delay");

    let ceiling = max_delay.as_millis();
    let min_delay = delays.iter().copied().fold(f64::INFINITY, f64::min);
    let scaled: Vec<f64> = delays.iter().map(|delay| delay.min(ceiling)).collect();

    // scaled is non-empty, the percentile is always present
    let p95 = percentile(&scaled, 95.0).unwrap_or(ceiling);

    let denominator = ceiling - min_delay / 2.0;
    if denominator <= 0.0 {
        return Err(DelayError::DegenerateBaseline { ssrc, denominator });
    }

    Ok((ceiling - p95) / denominator)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SSRC: Ssrc = Ssrc::new(0xCAFE);

    #[test]
    fn default_is_400ms() {
        assert_eq!(MaxDelay::default(), DEFAULT_MAX_DELAY);
        assert_eq!(MaxDelay::default().as_millis(), 400.0);
    }

    #[test]
    fn zero_rejected() {
        assert!(MaxDelay::new(0.0).is_err());
    }

    #[test]
    fn negative_rejected() {
        assert!(MaxDelay::new(-10.0).is_err());
    }

    #[test]
    fn nan_rejected() {
        assert!(MaxDelay::new(f64::NAN).is_err());
    }

    #[test]
    fn display() {
        assert_eq!(MaxDelay::new(400.0).unwrap().to_string(), "400ms");
        assert_eq!(MaxDelay::new(250.5).unwrap().to_string(), "250.50ms");
    }

    #[test]
    fn parse() {
        assert_eq!(
            "400ms".parse::<MaxDelay>().unwrap(),
            MaxDelay::new(400.0).unwrap()
        );
        assert_eq!(
            "250".parse::<MaxDelay>().unwrap(),
            MaxDelay::new(250.0).unwrap()
        );
    }

    #[test]
    fn parse_invalid() {
        assert!("abc".parse::<MaxDelay>().is_err());
        assert!("".parse::<MaxDelay>().is_err());
        assert!("-5ms".parse::<MaxDelay>().is_err());
    }

    #[test]
    fn display_round_trip() {
        let original = MaxDelay::new(150.0).unwrap();
        let parsed: MaxDelay = original.to_string().parse().unwrap();
        assert_eq!(original, parsed);
    }

    #[test]
    fn zero_jitter_scores_one() {
        let delays = [0.0, 0.0, 0.0];
        let score = stream_delay_score(SSRC, &delays, MaxDelay::default()).unwrap();
        assert_eq!(score, 1.0);
    }

    #[test]
    fn two_records_zero_jitter_scores_one() {
        let score = stream_delay_score(SSRC, &[0.0, 0.0], MaxDelay::default()).unwrap();
        assert_eq!(score, 1.0);
    }

    #[test]
    fn drift_lowers_the_score() {
        let flat = stream_delay_score(SSRC, &[0.0, 0.0, 0.0], MaxDelay::default()).unwrap();
        let drifting =
            stream_delay_score(SSRC, &[0.0, 50.0, 100.0], MaxDelay::default()).unwrap();
        assert!(drifting < flat);
    }

    #[test]
    fn outliers_are_clamped_to_the_ceiling() {
        // one absurd outlier must not be worse than one at the ceiling
        let at_ceiling =
            stream_delay_score(SSRC, &[0.0, 0.0, 400.0], MaxDelay::default()).unwrap();
        let beyond =
            stream_delay_score(SSRC, &[0.0, 0.0, 40_000.0], MaxDelay::default()).unwrap();
        assert_eq!(at_ceiling, beyond);
    }

    #[test]
    fn negative_min_widens_the_denominator() {
        // min of the raw (unclamped) delays feeds the denominator
        let score = stream_delay_score(SSRC, &[-100.0, 0.0], MaxDelay::default()).unwrap();
        // p95 of clamped [-100, 0] ~ -5.0; denominator = 400 - (-50) = 450
        let p95 = percentile(&[-100.0, 0.0], 95.0).unwrap();
        assert_eq!(score, (400.0 - p95) / 450.0);
    }

    #[test]
    fn degenerate_baseline_is_an_error() {
        // min delay = 2 * ceiling makes the denominator exactly zero
        let err = stream_delay_score(SSRC, &[800.0, 900.0], MaxDelay::default()).unwrap_err();
        let DelayError::DegenerateBaseline { ssrc, denominator } = err;
        assert_eq!(ssrc, SSRC);
        assert_eq!(denominator, 0.0);
    }

    #[test]
    fn degenerate_error_names_the_stream() {
        let err = stream_delay_score(SSRC, &[1_000.0], MaxDelay::default()).unwrap_err();
        assert!(err.to_string().contains("51966"), "got: {err}");
    }
}
