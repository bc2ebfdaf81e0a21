//! Ljung–Box portmanteau test for residual autocorrelation.
//!
//! `Q = n(n+2) Σ_{k=1}^{L} ρ̂_k² / (n−k)`, compared with χ²(L − model_df).
//! `ρ̂_k` is the sample autocorrelation of the demeaned series using the
//! full-sample variance as denominator.
use crate::statistical_tests::{
    errors::{TestError, TestResult},
    validation::{mean_and_variance, validate_series},
};
use statrs::distribution::{ChiSquared, ContinuousCDF};

/// Result of [`LjungBoxOutcome::ljung_box`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LjungBoxOutcome {
    lags: usize,
    df: usize,
    stat: f64,
    p_value: f64,
}

impl LjungBoxOutcome {
    /// Ljung–Box Q over lags `1..=lags`.
    ///
    /// `model_df` is subtracted from `lags` to form the χ² degrees of
    /// freedom (pass the number of ARMA coefficients when testing fitted
    /// residuals, or 0 for a plain white-noise check).
    ///
    /// # Errors
    /// - `InsufficientData` / `InvalidData` for fewer than `lags + 1`
    ///   observations or non-finite values.
    /// - `InvalidLag` when `lags == 0` or `lags <= model_df`.
    /// - `ZeroVariance` for a constant series.
    pub fn ljung_box(data: &[f64], lags: usize, model_df: usize) -> TestResult<Self> {
        if lags == 0 {
            let reason = "At least one lag is required.";
            return Err(TestError::InvalidLag { lag: lags, reason });
        }
        if lags <= model_df {
            return Err(TestError::InvalidLag {
                lag: lags,
                reason: "Lags must exceed the model degrees of freedom.",
            });
        }
        validate_series(data, lags + 1)?;
        let n = data.len();
        let (mean, var) = mean_and_variance(data);
        if var == 0.0 {
            return Err(TestError::ZeroVariance);
        }
        let denom = var * n as f64;
        let nf = n as f64;
        let stat = nf
            * (nf + 2.0)
            * (1..=lags)
                .map(|k| {
                    let cov: f64 = data[k..]
                        .iter()
                        .zip(data)
                        .map(|(a, b)| (a - mean) * (b - mean))
                        .sum();
                    let rho = cov / denom;
                    rho * rho / (nf - k as f64)
                })
                .sum::<f64>();
        let df = lags - model_df;
        let chi2 = ChiSquared::new(df as f64)
            .map_err(|e| TestError::InvalidDistribution { reason: e.to_string() })?;
        Ok(LjungBoxOutcome { lags, df, stat, p_value: chi2.sf(stat) })
    }

    pub fn lags(&self) -> usize {
        self.lags
    }

    /// Degrees of freedom of the reference χ² distribution.
    pub fn df(&self) -> usize {
        self.df
    }

    pub fn stat(&self) -> f64 {
        self.stat
    }

    pub fn p_value(&self) -> f64 {
        self.p_value
    }
}
