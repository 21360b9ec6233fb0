//! Scalar statistics with NaN-sentinel semantics.
//!
//! Statistical undefinedness is data, not a fault: every helper returns
//! NaN for degenerate input instead of erroring, so a feature row always
//! has its full shape.

/// Arithmetic mean; NaN for an empty slice.
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return f64::NAN;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Population standard deviation (ddof = 0); NaN for an empty slice.
pub fn population_std(values: &[f64]) -> f64 {
    if values.is_empty() {
        return f64::NAN;
    }
    let m = mean(values);
    let variance = values.iter().map(|v| (v - m).powi(2)).sum::<f64>() / values.len() as f64;
    variance.sqrt()
}

/// Lag-k autocorrelation: Pearson correlation between the series and its
/// k-shifted self. NaN when fewer than `lag + 2` observations exist or
/// either slice has zero variance.
pub fn autocorr(values: &[f64], lag: usize) -> f64 {
    let n = values.len();
    if n < lag + 2 {
        return f64::NAN;
    }

    let head = &values[..n - lag];
    let tail = &values[lag..];
    let mean_head = mean(head);
    let mean_tail = mean(tail);

    let mut cov = 0.0;
    let mut var_head = 0.0;
    let mut var_tail = 0.0;
    for (h, t) in head.iter().zip(tail.iter()) {
        let dh = h - mean_head;
        let dt = t - mean_tail;
        cov += dh * dt;
        var_head += dh * dh;
        var_tail += dt * dt;
    }

    let denom = (var_head * var_tail).sqrt();
    if denom == 0.0 {
        return f64::NAN;
    }
    cov / denom
}

/// Unbiased excess kurtosis (Fisher, pandas-compatible).
///
/// Requires at least 4 observations and non-zero sample variance; NaN
/// otherwise.
pub fn excess_kurtosis(values: &[f64]) -> f64 {
    let n = values.len();
    if n < 4 {
        return f64::NAN;
    }

    let nf = n as f64;
    let m = mean(values);
    let s2 = values.iter().map(|v| (v - m).powi(2)).sum::<f64>() / (nf - 1.0);
    if s2 == 0.0 {
        return f64::NAN;
    }

    let m4: f64 = values.iter().map(|v| (v - m).powi(4)).sum();
    let adjust = (nf * (nf + 1.0)) / ((nf - 1.0) * (nf - 2.0) * (nf - 3.0));
    let correction = 3.0 * (nf - 1.0).powi(2) / ((nf - 2.0) * (nf - 3.0));
    adjust * m4 / s2.powi(2) - correction
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mean_and_std_of_known_values() {
        let values = [1.0, 2.0, 3.0, 4.0];
        assert_eq!(mean(&values), 2.5);
        // population variance of 1..4 is 1.25
        assert!((population_std(&values) - 1.25f64.sqrt()).abs() < 1e-12);
    }

    #[test]
    fn empty_input_yields_nan() {
        assert!(mean(&[]).is_nan());
        assert!(population_std(&[]).is_nan());
    }

    #[test]
    fn single_value_has_zero_spread() {
        assert_eq!(population_std(&[3.0]), 0.0);
    }

    #[test]
    fn autocorr_of_alternating_series_is_negative() {
        let values = [1.0, -1.0, 1.0, -1.0, 1.0, -1.0];
        assert!((autocorr(&values, 1) + 1.0).abs() < 1e-12);
    }

    #[test]
    fn autocorr_of_linear_trend_is_near_one() {
        let values: Vec<f64> = (0..50).map(|i| i as f64).collect();
        assert!(autocorr(&values, 1) > 0.99);
        assert!(autocorr(&values, 2) > 0.99);
    }

    #[test]
    fn autocorr_short_or_flat_is_nan() {
        assert!(autocorr(&[1.0, 2.0], 1).is_nan());
        assert!(autocorr(&[5.0; 10], 1).is_nan());
        assert!(autocorr(&[1.0, 2.0, 3.0], 5).is_nan());
    }

    #[test]
    fn kurtosis_matches_pandas_on_known_input() {
        // pandas: pd.Series([1, 2, 3, 4, 100]).kurtosis() == 4.98686...
        let values = [1.0, 2.0, 3.0, 4.0, 100.0];
        let k = excess_kurtosis(&values);
        assert!((k - 4.98686).abs() < 1e-4, "kurtosis = {k}");
    }

    #[test]
    fn kurtosis_degenerate_is_nan() {
        assert!(excess_kurtosis(&[1.0, 2.0, 3.0]).is_nan());
        assert!(excess_kurtosis(&[2.0; 6]).is_nan());
    }
}
