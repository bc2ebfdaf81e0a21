//! Text report of an order search.
//!
//! [`SearchReport`] borrows a [`SearchOutcome`] and renders, in order:
//! the search trace, the selected order, the coefficient table with Wald
//! statistics, fit statistics, and residual diagnostics.
use crate::arima::{
    models::arima::ArmaFit,
    report::diagnostics::ResidualDiagnostics,
    search::{
        auto_arima::SearchOutcome,
        trace::{CandidateOutcome, SearchTrace},
    },
};
use statrs::function::erf::erfc;
use std::fmt;

/// Two-sided 95% standard normal quantile.
const Z_975: f64 = 1.959_963_984_540_054;

/// One row of the coefficient table.
#[derive(Debug, Clone, PartialEq)]
pub struct CoefficientRow {
    pub name: String,
    pub coef: f64,
    pub std_err: f64,
    pub z: f64,
    pub p_value: f64,
    pub lower: f64,
    pub upper: f64,
}

/// Wald rows for every estimated parameter of `fit`.
///
/// `z = coef / std err`, `P>|z| = 2·(1 − Φ(|z|))`, interval
/// `coef ± 1.96·std err`.
pub fn coefficient_table(fit: &ArmaFit) -> Vec<CoefficientRow> {
    let coefs = fit.coefficients();
    fit.param_names()
        .into_iter()
        .zip(coefs.iter().zip(fit.std_errors.iter()))
        .map(|(name, (&coef, &std_err))| {
            let z = coef / std_err;
            CoefficientRow {
                name,
                coef,
                std_err,
                z,
                p_value: erfc(z.abs() / std::f64::consts::SQRT_2),
                lower: coef - Z_975 * std_err,
                upper: coef + Z_975 * std_err,
            }
        })
        .collect()
}

/// Renderable summary of a [`SearchOutcome`].
#[derive(Debug, Clone, PartialEq)]
pub struct SearchReport<'a> {
    pub outcome: &'a SearchOutcome,
    pub coefficients: Vec<CoefficientRow>,
    /// `None` when a diagnostic could not be computed on the residuals.
    pub diagnostics: Option<ResidualDiagnostics>,
}

impl<'a> SearchReport<'a> {
    pub fn new(outcome: &'a SearchOutcome) -> SearchReport<'a> {
        let diagnostics = match ResidualDiagnostics::from_fit(&outcome.best) {
            Ok(diag) => Some(diag),
            Err(err) => {
                log::warn!("residual diagnostics unavailable: {err}");
                None
            }
        };
        SearchReport { outcome, coefficients: coefficient_table(&outcome.best), diagnostics }
    }
}

impl SearchOutcome {
    /// Rendered [`SearchReport`].
    pub fn summary(&self) -> String {
        SearchReport::new(self).to_string()
    }
}

fn write_trace(f: &mut fmt::Formatter<'_>, trace: &SearchTrace) -> fmt::Result {
    writeln!(f, "Search trace")?;
    writeln!(f, "{}", "-".repeat(72))?;
    writeln!(f, "{:>4}  {:<22} {:>14} {:>12}", "#", "candidate", "AIC", "time")?;
    for rec in trace.records() {
        let (idx, order) = (rec.index, rec.order.to_string());
        let time = format!("{:.1?}", rec.elapsed);
        match &rec.outcome {
            CandidateOutcome::Fitted { aic, .. } => {
                writeln!(f, "{idx:>4}  {order:<22} {aic:>14.4} {time:>12}")?
            }
            CandidateOutcome::Failed { reason } => {
                writeln!(f, "{idx:>4}  {order:<22} {:>14} {time:>12}  {reason}", "failed")?
            }
        }
    }
    Ok(())
}

/// One two-column line of the fit statistics block.
fn stat_line(
    f: &mut fmt::Formatter<'_>, left: &str, left_value: &dyn fmt::Display, right: &str,
    right_value: f64,
) -> fmt::Result {
    writeln!(f, "{left:<24}{left_value:>12}    {right:<20}{right_value:>12.3}")
}

/// One two-column line of the residual diagnostics block.
fn diag_line(f: &mut fmt::Formatter<'_>, left: &str, a: f64, right: &str, b: f64) -> fmt::Result {
    writeln!(f, "{left:<28}{a:>8.2}    {right:<20}{b:>8.2}")
}

impl fmt::Display for SearchReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let out = self.outcome;
        let fit = &out.best;
        let rule = "=".repeat(72);
        let crit = &fit.criteria;

        write_trace(f, &out.trace)?;
        writeln!(
            f,
            "Best model: {} (AIC = {:.4}); {} candidate(s), {} failed, total {:.2?} ({})",
            out.order,
            fit.aic(),
            out.trace.len(),
            out.trace.failures(),
            out.elapsed,
            out.termination
        )?;
        writeln!(f)?;

        writeln!(f, "{rule}")?;
        writeln!(f, "{:^72}", format!("{} results", out.order))?;
        writeln!(f, "{rule}")?;
        stat_line(f, "No. observations:", &fit.nobs, "Log likelihood:", fit.loglik)?;
        stat_line(f, "Covariance type:", &fit.covariance_type, "AIC:", crit.aic)?;
        stat_line(f, "Differencing (d):", &out.d, "BIC:", crit.bic)?;
        stat_line(f, "Iterations:", &fit.outcome.iterations, "HQIC:", crit.hqic)?;
        writeln!(f, "{}", "-".repeat(72))?;
        writeln!(
            f,
            "{:<12}{:>10} {:>10} {:>9} {:>8} {:>10} {:>10}",
            "", "coef", "std err", "z", "P>|z|", "[0.025", "0.975]"
        )?;
        writeln!(f, "{}", "-".repeat(72))?;
        for row in &self.coefficients {
            writeln!(
                f,
                "{:<12}{:>10.4} {:>10.4} {:>9.3} {:>8.3} {:>10.4} {:>10.4}",
                row.name, row.coef, row.std_err, row.z, row.p_value, row.lower, row.upper
            )?;
        }
        // Regression-form constant implied by the mean; not estimated directly.
        if fit.order.intercept {
            writeln!(f, "{:<12}{:>10.4}", "const", fit.params.intercept())?;
        }
        writeln!(f, "{rule}")?;

        match &self.diagnostics {
            Some(diag) => {
                let (lb, jb, h) = (&diag.ljung_box, &diag.jarque_bera, &diag.heteroskedasticity);
                diag_line(f, "Ljung-Box (L1) (Q):", lb.stat(), "Jarque-Bera (JB):", jb.stat())?;
                diag_line(f, "Prob(Q):", lb.p_value(), "Prob(JB):", jb.p_value())?;
                diag_line(f, "Heteroskedasticity (H):", h.stat(), "Skew:", jb.skew())?;
                diag_line(f, "Prob(H) (two-sided):", h.p_value(), "Kurtosis:", jb.kurtosis())?;
            }
            None => writeln!(f, "Residual diagnostics unavailable.")?,
        }
        write!(f, "{rule}")
    }
}
