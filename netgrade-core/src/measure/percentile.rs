/// Percentile of a sample set, with linear interpolation between
/// order statistics.
///
/// `p` is expressed in percent (`95.0` for p95). The samples do not
/// need to be sorted; a copy is sorted internally. Returns `None` for
/// an empty sample set.
///
/// For `n` samples the rank of percentile `p` is `p/100 * (n - 1)`;
/// a fractional rank interpolates linearly between the two
/// surrounding order statistics:
///
/// ```
/// use netgrade_core::measure::percentile;
///
/// let samples: Vec<f64> = (1..=10).map(|i| (i * 10) as f64).collect();
/// let p95 = percentile(&samples, 95.0).unwrap();
/// // 95.5 up to f64 rounding of the fractional rank
/// assert!((p95 - 95.5).abs() < 1e-9);
/// ```
pub fn percentile(samples: &[f64], p: f64) -> Option<f64> {
    if samples.is_empty() {
        return None;
    }

    let mut sorted = samples.to_vec();
    sorted.sort_by(f64::total_cmp);

    let rank = (p / 100.0) * (sorted.len() - 1) as f64;
    let lo = rank.floor() as usize;
    let hi = rank.ceil() as usize;
    if lo == hi {
        return Some(sorted[lo]);
    }

    let fraction = rank - lo as f64;
    Some(sorted[lo] + (sorted[hi] - sorted[lo]) * fraction)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty() {
        assert_eq!(percentile(&[], 95.0), None);
    }

    #[test]
    fn single_sample() {
        assert_eq!(percentile(&[42.0], 95.0), Some(42.0));
        assert_eq!(percentile(&[42.0], 0.0), Some(42.0));
    }

    #[test]
    fn p95_of_ten_decades() {
        // the fractional rank 0.95 * 9 rounds just below 8.55 in f64,
        // so the interpolated value lands a hair under 95.5
        let samples: Vec<f64> = (1..=10).map(|i| (i * 10) as f64).collect();
        let p95 = percentile(&samples, 95.0).unwrap();
        assert!((p95 - 95.5).abs() < 1e-9, "got {p95}");
    }

    #[test]
    fn p0_is_min_p100_is_max() {
        let samples = [30.0, 10.0, 20.0];
        assert_eq!(percentile(&samples, 0.0), Some(10.0));
        assert_eq!(percentile(&samples, 100.0), Some(30.0));
    }

    #[test]
    fn median_of_even_count() {
        let samples = [1.0, 2.0, 3.0, 4.0];
        assert_eq!(percentile(&samples, 50.0), Some(2.5));
    }

    #[test]
    fn unsorted_input() {
        let samples = [100.0, 10.0, 50.0, 30.0, 80.0, 20.0, 90.0, 40.0, 70.0, 60.0];
        let p95 = percentile(&samples, 95.0).unwrap();
        assert!((p95 - 95.5).abs() < 1e-9, "got {p95}");
    }

    #[test]
    fn input_left_untouched() {
        let samples = [3.0, 1.0, 2.0];
        let _ = percentile(&samples, 50.0);
        assert_eq!(samples, [3.0, 1.0, 2.0]);
    }
}
