//! Jarque–Bera normality test.
//!
//! `JB = n/6 · (S² + (K − 3)²/4)` with sample skewness `S` and (non-excess)
//! kurtosis `K` from population moments, compared with χ²(2).
use crate::statistical_tests::{
    errors::{TestError, TestResult},
    validation::{mean_and_variance, validate_series},
};
use statrs::distribution::{ChiSquared, ContinuousCDF};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct JarqueBeraOutcome {
    stat: f64,
    p_value: f64,
    skew: f64,
    kurtosis: f64,
}

impl JarqueBeraOutcome {
    /// # Errors
    /// - `InsufficientData` for fewer than 3 observations, `InvalidData` for
    ///   non-finite values, `ZeroVariance` for a constant series.
    pub fn jarque_bera(data: &[f64]) -> TestResult<Self> {
        validate_series(data, 3)?;
        let n = data.len() as f64;
        let (mean, m2) = mean_and_variance(data);
        if m2 == 0.0 {
            return Err(TestError::ZeroVariance);
        }
        let m3 = data.iter().map(|x| (x - mean).powi(3)).sum::<f64>() / n;
        let m4 = data.iter().map(|x| (x - mean).powi(4)).sum::<f64>() / n;
        let skew = m3 / m2.powf(1.5);
        let kurtosis = m4 / (m2 * m2);
        let stat = n / 6.0 * (skew * skew + (kurtosis - 3.0).powi(2) / 4.0);
        let chi2 = ChiSquared::new(2.0)
            .map_err(|e| TestError::InvalidDistribution { reason: e.to_string() })?;
        Ok(JarqueBeraOutcome { stat, p_value: chi2.sf(stat), skew, kurtosis })
    }

    pub fn stat(&self) -> f64 {
        self.stat
    }

    pub fn p_value(&self) -> f64 {
        self.p_value
    }

    pub fn skew(&self) -> f64 {
        self.skew
    }

    /// Non-excess kurtosis (3 for a Gaussian).
    pub fn kurtosis(&self) -> f64 {
        self.kurtosis
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover the moment formulas on a symmetric two-point sample
    // and the constant-series error.
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // A symmetric two-point sample has zero skew and kurtosis 1.
    //
    // Given
    // -----
    // - 10 values alternating ±1.
    //
    // Expect
    // ------
    // - S = 0, K = 1, JB = 10/6 · 4/4, p = exp(−JB/2).
    fn two_point_sample_matches_closed_form() {
        // Arrange
        let data: Vec<f64> = (0..10).map(|t| if t % 2 == 0 { 1.0 } else { -1.0 }).collect();

        // Act
        let out = JarqueBeraOutcome::jarque_bera(&data).unwrap();

        // Assert
        let jb = 10.0 / 6.0;
        assert_abs_diff_eq!(out.skew(), 0.0, epsilon = 1e-12);
        assert_abs_diff_eq!(out.kurtosis(), 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(out.stat(), jb, epsilon = 1e-12);
        assert_abs_diff_eq!(out.p_value(), (-jb / 2.0).exp(), epsilon = 1e-10);
    }

    #[test]
    // Purpose
    // -------
    // Constant input has no defined skew or kurtosis.
    //
    // Given
    // -----
    // - Five equal values.
    //
    // Expect
    // ------
    // - `ZeroVariance`.
    fn constant_series_is_rejected() {
        assert_eq!(JarqueBeraOutcome::jarque_bera(&[2.0; 5]), Err(TestError::ZeroVariance));
    }
}
