// Small numeric helpers. All sums run over values sorted with `total_cmp`, so
// results are bit-identical whatever order the inputs arrived in.

pub fn sorted(values: &[f64]) -> Vec<f64> {
    let mut values = values.to_vec();
    values.sort_by(f64::total_cmp);
    values
}

/// Sum of an already sorted slice.
pub fn sum_sorted(values: &[f64]) -> f64 {
    values.iter().sum()
}

pub fn mean_sorted(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(sum_sorted(values) / values.len() as f64)
}

/// Linear interpolation between the two closest ranks (`(n - 1) * q`).
pub fn quantile_sorted(values: &[f64], q: f64) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let position = (values.len() - 1) as f64 * q.clamp(0.0, 1.0);
    let lower = position.floor() as usize;
    let upper = position.ceil() as usize;
    let fraction = position - lower as f64;
    Some(values[lower] + (values[upper] - values[lower]) * fraction)
}

/// Sample standard deviation (n - 1 in the denominator); `None` below two values.
pub fn std_dev_sorted(values: &[f64]) -> Option<f64> {
    if values.len() < 2 {
        return None;
    }
    let mean = mean_sorted(values)?;
    let mut squared: Vec<f64> = values.iter().map(|v| (v - mean).powi(2)).collect();
    squared.sort_by(f64::total_cmp);
    Some((sum_sorted(&squared) / (values.len() - 1) as f64).sqrt())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(actual: f64, expected: f64) {
        assert!((actual - expected).abs() < 1e-9, "{} != {}", actual, expected);
    }

    #[test]
    fn test_mean_of_empty_is_none() {
        assert_eq!(mean_sorted(&[]), None);
        assert_eq!(quantile_sorted(&[], 0.5), None);
        assert_eq!(std_dev_sorted(&[1.0]), None);
    }

    #[test]
    fn test_quantiles_interpolate() {
        let values = sorted(&[4.0, 1.0, 3.0, 2.0]);
        assert_close(quantile_sorted(&values, 0.5).unwrap(), 2.5);
        assert_close(quantile_sorted(&values, 0.25).unwrap(), 1.75);
        assert_close(quantile_sorted(&values, 0.75).unwrap(), 3.25);
        assert_close(quantile_sorted(&values, 0.0).unwrap(), 1.0);
        assert_close(quantile_sorted(&values, 1.0).unwrap(), 4.0);
    }

    #[test]
    fn test_sample_std_dev() {
        let values = sorted(&[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]);
        // population std dev is 2.0; sample std dev is sqrt(32 / 7)
        assert_close(std_dev_sorted(&values).unwrap(), (32.0f64 / 7.0).sqrt());
    }

    #[test]
    fn test_sorted_sum_is_order_independent() {
        let a = [0.1, 1e16, -1e16, 0.2, 0.3];
        let b = [-1e16, 0.3, 0.2, 1e16, 0.1];
        assert_eq!(sum_sorted(&sorted(&a)).to_bits(), sum_sorted(&sorted(&b)).to_bits());
    }
}
