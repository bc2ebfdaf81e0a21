//! Input checks shared by every statistical test.
use crate::statistical_tests::errors::{TestError, TestResult};

/// Require at least `required` observations, all finite.
pub fn validate_series(data: &[f64], required: usize) -> TestResult<()> {
    if data.len() < required {
        return Err(TestError::InsufficientData { len: data.len(), required });
    }
    if let Some((index, &value)) = data.iter().enumerate().find(|(_, v)| !v.is_finite()) {
        return Err(TestError::InvalidData { index, value });
    }
    Ok(())
}

/// Arithmetic mean and population variance (divisor `n`).
pub(crate) fn mean_and_variance(data: &[f64]) -> (f64, f64) {
    let n = data.len() as f64;
    let mean = data.iter().sum::<f64>() / n;
    let var = data.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / n;
    (mean, var)
}

#[cfg(test)]
mod tests {
    use super::*;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover length and finiteness checks, and the moments helper.
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // Length is checked before finiteness, and the first bad index wins.
    //
    // Given
    // -----
    // - A 2-element series against `required = 3`.
    // - `[0, inf, NaN]` against `required = 3`.
    //
    // Expect
    // ------
    // - `InsufficientData`, then `InvalidData { index: 1, .. }`.
    fn validate_series_checks_length_then_values() {
        assert_eq!(
            validate_series(&[1.0, 2.0], 3),
            Err(TestError::InsufficientData { len: 2, required: 3 })
        );
        assert!(matches!(
            validate_series(&[0.0, f64::INFINITY, f64::NAN], 3),
            Err(TestError::InvalidData { index: 1, .. })
        ));
        assert!(validate_series(&[0.0, 1.0, 2.0], 3).is_ok());
    }

    #[test]
    // Purpose
    // -------
    // Moments use the population divisor.
    //
    // Given
    // -----
    // - `[1, 2, 3, 4]`.
    //
    // Expect
    // ------
    // - Mean 2.5, variance 1.25.
    fn mean_and_variance_uses_population_divisor() {
        let (m, v) = mean_and_variance(&[1.0, 2.0, 3.0, 4.0]);

        assert_eq!(m, 2.5);
        assert_eq!(v, 1.25);
    }
}
