//! Residual diagnostics of a fitted candidate.
use crate::{
    arima::models::arima::ArmaFit,
    statistical_tests::{
        errors::TestResult, heteroskedasticity::BreakVarianceOutcome,
        jarque_bera::JarqueBeraOutcome, ljung_box::LjungBoxOutcome,
    },
};

/// Ljung–Box at lag 1, Jarque–Bera, and the break-variance test on the
/// estimation-sample residuals.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResidualDiagnostics {
    pub ljung_box: LjungBoxOutcome,
    pub jarque_bera: JarqueBeraOutcome,
    pub heteroskedasticity: BreakVarianceOutcome,
}

impl ResidualDiagnostics {
    /// # Errors
    /// Propagates the first failing test, e.g. `ZeroVariance` for
    /// identically zero residuals.
    pub fn from_residuals(residuals: &[f64]) -> TestResult<Self> {
        Ok(ResidualDiagnostics {
            ljung_box: LjungBoxOutcome::ljung_box(residuals, 1, 0)?,
            jarque_bera: JarqueBeraOutcome::jarque_bera(residuals)?,
            heteroskedasticity: BreakVarianceOutcome::break_variance(residuals)?,
        })
    }

    pub fn from_fit(fit: &ArmaFit) -> TestResult<Self> {
        Self::from_residuals(&fit.residuals.to_vec())
    }
}
