use num::{Num, ToPrimitive};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CdfError {
    #[error("cannot compute a cdf from an empty sample")]
    EmptySample,
}

/// Empirical CDF of a sample, as `(value, cumulative percent)` pairs.
///
/// The sample is sorted ascending and the maximum value is repeated once, so
/// the result has `n + 1` points whose percents run linearly from 0 to 100
/// inclusive. The duplicated max pins the right edge of the step function so
/// the curve closes cleanly when overlaid with other series on one chart.
/// Duplicate sample values keep their distinct ranks, which plots as a
/// vertical segment at a point mass. This linear-rank convention is the
/// study's charting contract; it is not the `(i - 0.5) / n` estimator.
pub fn calc_cdf<T>(sample: &[T]) -> Result<Vec<(T, f64)>, CdfError>
where
    T: Num + ToPrimitive + PartialOrd + Copy,
{
    if sample.is_empty() {
        return Err(CdfError::EmptySample);
    }

    let n = sample.len();
    let mut sorted = sample.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap());
    sorted.push(sorted[n - 1]);

    Ok(sorted
        .into_iter()
        .enumerate()
        .map(|(i, v)| (v, i as f64 / n as f64 * 100.0))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(a: f64, b: f64) {
        assert!((a - b).abs() < 1e-9, "{} != {}", a, b);
    }

    #[test]
    fn curve_has_one_extra_point() {
        for sample in [vec![3.0], vec![9.0, 1.0], vec![4.0, 4.0, 2.0, 7.0, 1.0]] {
            let curve = calc_cdf(&sample).unwrap();
            assert_eq!(curve.len(), sample.len() + 1);
        }
    }

    #[test]
    fn values_sorted_and_max_repeated() {
        let curve = calc_cdf(&[9.0, 1.0, 4.0, 7.0]).unwrap();
        let values: Vec<f64> = curve.iter().map(|(v, _)| *v).collect();
        let mut sorted = values.clone();
        sorted.sort_by(|a, b| a.partial_cmp(b).unwrap());
        assert_eq!(values, sorted);
        assert_eq!(values[values.len() - 1], 9.0);
        assert_eq!(values[values.len() - 2], 9.0);
    }

    #[test]
    fn percents_span_zero_to_hundred() {
        let curve = calc_cdf(&[2.5, 0.5, 1.5]).unwrap();
        assert_eq!(curve[0].1, 0.0);
        assert_eq!(curve[curve.len() - 1].1, 100.0);
        for pair in curve.windows(2) {
            assert!(pair[0].1 <= pair[1].1);
        }
    }

    #[test]
    fn single_observation() {
        let curve = calc_cdf(&[5.0]).unwrap();
        assert_eq!(curve, vec![(5.0, 0.0), (5.0, 100.0)]);
    }

    #[test]
    fn three_observations_use_linear_ranks() {
        let curve = calc_cdf(&[1.0, 2.0, 3.0]).unwrap();
        let values: Vec<f64> = curve.iter().map(|(v, _)| *v).collect();
        assert_eq!(values, vec![1.0, 2.0, 3.0, 3.0]);
        assert_eq!(curve[0].1, 0.0);
        assert_close(curve[1].1, 100.0 / 3.0);
        assert_close(curve[2].1, 200.0 / 3.0);
        assert_eq!(curve[3].1, 100.0);
    }

    #[test]
    fn empty_sample_is_an_error() {
        let sample: Vec<f64> = Vec::new();
        assert_eq!(calc_cdf(&sample), Err(CdfError::EmptySample));
    }

    #[test]
    fn point_mass_keeps_distinct_ranks() {
        let curve = calc_cdf(&[1.0, 1.0, 1.0]).unwrap();
        assert_eq!(curve.len(), 4);
        for (i, (value, percent)) in curve.iter().enumerate() {
            assert_eq!(*value, 1.0);
            assert_close(*percent, i as f64 / 3.0 * 100.0);
        }
    }

    #[test]
    fn integer_samples_work_through_the_generic_bound() {
        let curve = calc_cdf(&[30u32, 10, 20]).unwrap();
        let values: Vec<u32> = curve.iter().map(|(v, _)| *v).collect();
        assert_eq!(values, vec![10, 20, 30, 30]);
    }
}
