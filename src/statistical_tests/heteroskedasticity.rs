//! Break-variance test for a change in residual variance.
//!
//! With `h = round(n/3)`, `H = Σ_{last h} e² / Σ_{first h} e²` is compared
//! with an F(h, h) distribution; the p-value is two-sided,
//! `2·min(F(H), 1 − F(H))`.
use crate::statistical_tests::{
    errors::{TestError, TestResult},
    validation::validate_series,
};
use statrs::distribution::{ContinuousCDF, FisherSnedecor};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BreakVarianceOutcome {
    stat: f64,
    p_value: f64,
    subsample: usize,
}

impl BreakVarianceOutcome {
    /// # Errors
    /// - `InsufficientData` for fewer than 3 observations (so `h ≥ 1`),
    ///   `InvalidData` for non-finite values.
    /// - `ZeroVariance` when the first subsample is identically zero.
    pub fn break_variance(data: &[f64]) -> TestResult<Self> {
        validate_series(data, 3)?;
        let n = data.len();
        let h = (n as f64 / 3.0).round() as usize;
        let head: f64 = data[..h].iter().map(|e| e * e).sum();
        let tail: f64 = data[n - h..].iter().map(|e| e * e).sum();
        if head == 0.0 {
            return Err(TestError::ZeroVariance);
        }
        let stat = tail / head;
        let f = FisherSnedecor::new(h as f64, h as f64)
            .map_err(|e| TestError::InvalidDistribution { reason: e.to_string() })?;
        let p_value = (2.0 * f.cdf(stat).min(f.sf(stat))).min(1.0);
        Ok(BreakVarianceOutcome { stat, p_value, subsample: h })
    }

    pub fn stat(&self) -> f64 {
        self.stat
    }

    /// Two-sided p-value.
    pub fn p_value(&self) -> f64 {
        self.p_value
    }

    /// Observations in each of the compared subsamples.
    pub fn subsample(&self) -> usize {
        self.subsample
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover the statistic, the symmetric p-value at H = 1, and
    // detection of a large variance break.
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // Equal first/last thirds give H = 1 and a p-value of 1.
    //
    // Given
    // -----
    // - 9 residuals whose first and last thirds have equal squared sums.
    //
    // Expect
    // ------
    // - h = 3, H = 1, p ≈ 1 (F(3,3) has median 1).
    fn equal_thirds_give_unit_statistic() {
        // Arrange
        let data = [1.0, -1.0, 2.0, 9.0, -9.0, 0.5, -2.0, 1.0, 1.0];

        // Act
        let out = BreakVarianceOutcome::break_variance(&data).unwrap();

        // Assert
        assert_eq!(out.subsample(), 3);
        assert_abs_diff_eq!(out.stat(), 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(out.p_value(), 1.0, epsilon = 1e-8);
    }

    #[test]
    // Purpose
    // -------
    // A tenfold jump in scale is flagged.
    //
    // Given
    // -----
    // - 60 residuals of ±1 followed by 30 of ±10.
    //
    // Expect
    // ------
    // - H = 100 and a p-value below 1e-6.
    fn variance_break_is_detected() {
        // Arrange
        let data: Vec<f64> = (0..90)
            .map(|t| {
                let s = if t % 2 == 0 { 1.0 } else { -1.0 };
                if t >= 60 { 10.0 * s } else { s }
            })
            .collect();

        // Act
        let out = BreakVarianceOutcome::break_variance(&data).unwrap();

        // Assert
        assert_abs_diff_eq!(out.stat(), 100.0, epsilon = 1e-9);
        assert!(out.p_value() < 1e-6);
    }
}
