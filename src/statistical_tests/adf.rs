//! Augmented Dickey–Fuller unit-root test (constant, no trend).
//!
//! Purpose
//! -------
//! Decide whether a series carries a unit root. The differencing stage of
//! the ARIMA search calls this repeatedly on successively differenced
//! series until the null is rejected.
//!
//! Key behaviors
//! -------------
//! - Regresses `Δx_t` on a constant, the lagged level `x_{t−1}`, and
//!   `k` lagged differences `Δx_{t−1}, …, Δx_{t−k}`.
//! - Chooses `k ∈ 0..=maxlag` by AIC on a common estimation sample, then
//!   refits the chosen `k` on its own (longer) sample.
//! - Reports the t-statistic of the level coefficient with a MacKinnon
//!   p-value and finite-sample critical values.
//!
//! Invariants & assumptions
//! ------------------------
//! - Default `maxlag = ⌈12·(n/100)^{1/4}⌉`, capped at `n/2 − 2`. A
//!   user-supplied lag above the cap is rejected.
//! - The level regressor is demeaned before entering the normal equations.
//!   With a constant in the regression this leaves the level coefficient
//!   and its standard error unchanged and keeps `XᵀX` well scaled for
//!   price-like inputs.
//!
//! Testing notes
//! -------------
//! - Unit tests compare a zero-lag fit against a direct OLS computation and
//!   check that white noise rejects while a random walk does not.
use crate::statistical_tests::{
    errors::{TestError, TestResult},
    mackinnon::{CriticalValues, mackinnon_critical_values, mackinnon_p_value},
    validation::validate_series,
};
use nalgebra::{DMatrix, DVector};

/// Smallest series for which the lag cap `n/2 − 2` is non-negative.
const MIN_OBS: usize = 4;

/// Result of [`AdfOutcome::adfuller`].
///
/// Fields
/// ------
/// - `stat`: t-statistic of the lagged level coefficient.
/// - `p_value`: MacKinnon approximate p-value of `stat`.
/// - `used_lag`: number of lagged differences in the final regression.
/// - `nobs`: observations in the final regression.
/// - `critical_values`: 1%, 5%, 10% critical values for `nobs`.
/// - `ic_best`: AIC of the selected lag on the common sample, `None` when
///   the lag was fixed by the caller.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AdfOutcome {
    stat: f64,
    p_value: f64,
    used_lag: usize,
    nobs: usize,
    critical_values: CriticalValues,
    ic_best: Option<f64>,
}

impl AdfOutcome {
    /// Run the ADF test on `data`.
    ///
    /// Parameters
    /// ----------
    /// - `data`: `&[f64]`
    ///   Series in levels; at least four finite observations.
    /// - `max_lag`: `Option<usize>`
    ///   `None` selects the lag by AIC over `0..=⌈12·(n/100)^{1/4}⌉` (capped).
    ///   `Some(k)` fixes the number of lagged differences at `k`.
    ///
    /// Returns
    /// -------
    /// `TestResult<AdfOutcome>`
    ///
    /// Errors
    /// ------
    /// - `InsufficientData` / `InvalidData` from input validation.
    /// - `ZeroVariance` when `data` is constant.
    /// - `InvalidLag` when `Some(k)` exceeds `n/2 − 2`.
    /// - `SingularRegression` when the normal equations cannot be solved.
    ///
    /// Examples
    /// --------
    /// ```rust
    /// use rust_arima::statistical_tests::adf::AdfOutcome;
    ///
    /// let data: Vec<f64> = (0..200).map(|t| ((t * 37 % 101) as f64).sin()).collect();
    /// let outcome = AdfOutcome::adfuller(&data, None).unwrap();
    ///
    /// assert!((0.0..=1.0).contains(&outcome.p_value()));
    /// ```
    pub fn adfuller(data: &[f64], max_lag: Option<usize>) -> TestResult<Self> {
        validate_series(data, MIN_OBS)?;
        let first = data[0];
        if data.iter().all(|&v| v == first) {
            return Err(TestError::ZeroVariance);
        }
        let n = data.len();
        let cap = n / 2 - 2;
        let diffs: Vec<f64> = data.windows(2).map(|w| w[1] - w[0]).collect();

        let (used_lag, ic_best) = match max_lag {
            Some(k) if k > cap => {
                return Err(TestError::InvalidLag {
                    lag: k,
                    reason: "Lag exceeds n/2 - 2 for this series.",
                });
            }
            Some(k) => (k, None),
            None => {
                let default = (12.0 * (n as f64 / 100.0).powf(0.25)).ceil() as usize;
                let (lag, ic) = select_lag_by_aic(data, &diffs, default.min(cap))?;
                (lag, Some(ic))
            }
        };

        let design = Design::build(data, &diffs, used_lag, used_lag);
        let fit = design.ols(used_lag)?;
        let nobs = design.nobs;
        Ok(AdfOutcome {
            stat: fit.level_t,
            p_value: mackinnon_p_value(fit.level_t),
            used_lag,
            nobs,
            critical_values: mackinnon_critical_values(nobs),
            ic_best,
        })
    }

    pub fn stat(&self) -> f64 {
        self.stat
    }

    pub fn p_value(&self) -> f64 {
        self.p_value
    }

    pub fn used_lag(&self) -> usize {
        self.used_lag
    }

    pub fn nobs(&self) -> usize {
        self.nobs
    }

    pub fn critical_values(&self) -> CriticalValues {
        self.critical_values
    }

    pub fn ic_best(&self) -> Option<f64> {
        self.ic_best
    }
}

// ---- Private helpers ----

/// Sufficient statistics of the ADF regression on a fixed sample.
///
/// Column order is `[level (demeaned), constant, Δx_{t−1}, …, Δx_{t−L}]`, so
/// the regression with `k` lagged differences uses the leading `k + 2`
/// columns.
struct Design {
    xtx: DMatrix<f64>,
    xty: DVector<f64>,
    yty: f64,
    nobs: usize,
}

struct OlsFit {
    level_t: f64,
    ssr: f64,
}

impl Design {
    /// Accumulate `XᵀX`, `Xᵀy`, `yᵀy` with `max_cols_lag` lagged differences,
    /// dropping the first `sample_lag` differences so that every regression
    /// up to `sample_lag` lags shares the same sample.
    fn build(levels: &[f64], diffs: &[f64], max_cols_lag: usize, sample_lag: usize) -> Self {
        let ncols = max_cols_lag + 2;
        let rows = sample_lag..diffs.len();
        let nobs = rows.len();
        let level_mean = rows.clone().map(|t| levels[t]).sum::<f64>() / nobs as f64;

        let mut xtx = DMatrix::<f64>::zeros(ncols, ncols);
        let mut xty = DVector::<f64>::zeros(ncols);
        let mut yty = 0.0;
        let mut row = vec![0.0; ncols];
        for t in rows {
            // Δx_t = x_{t+1} − x_t is regressed on x_t.
            row[0] = levels[t] - level_mean;
            row[1] = 1.0;
            for j in 1..=max_cols_lag {
                row[j + 1] = diffs[t - j];
            }
            let y = diffs[t];
            yty += y * y;
            for a in 0..ncols {
                xty[a] += row[a] * y;
                for b in 0..=a {
                    xtx[(a, b)] += row[a] * row[b];
                }
            }
        }
        for a in 0..ncols {
            for b in 0..a {
                xtx[(b, a)] = xtx[(a, b)];
            }
        }
        Design { xtx, xty, yty, nobs }
    }

    /// OLS using the leading `lag + 2` columns.
    fn ols(&self, lag: usize) -> TestResult<OlsFit> {
        let k = lag + 2;
        if self.nobs <= k {
            return Err(TestError::InsufficientData { len: self.nobs, required: k + 1 });
        }
        let xtx = self.xtx.view((0, 0), (k, k)).into_owned();
        let xty = self.xty.rows(0, k).into_owned();
        let chol = xtx.cholesky().ok_or(TestError::SingularRegression)?;
        let beta = chol.solve(&xty);
        let ssr = (self.yty - beta.dot(&xty)).max(0.0);
        let sigma2 = ssr / (self.nobs - k) as f64;
        let var_level = sigma2 * chol.inverse()[(0, 0)];
        if var_level.is_nan() || var_level <= 0.0 {
            return Err(TestError::SingularRegression);
        }
        Ok(OlsFit { level_t: beta[0] / var_level.sqrt(), ssr })
    }
}

/// AIC-minimizing number of lagged differences on the common sample that
/// drops the first `max_lag` differences. Ties keep the shorter lag.
fn select_lag_by_aic(levels: &[f64], diffs: &[f64], max_lag: usize) -> TestResult<(usize, f64)> {
    let design = Design::build(levels, diffs, max_lag, max_lag);
    let n = design.nobs as f64;
    let mut best: Option<(usize, f64)> = None;
    for lag in 0..=max_lag {
        let fit = match design.ols(lag) {
            Ok(fit) => fit,
            Err(TestError::SingularRegression) if best.is_some() => continue,
            Err(e) => return Err(e),
        };
        let k = (lag + 2) as f64;
        let aic = n * (fit.ssr / n).ln() + 2.0 * k;
        if best.is_none_or(|(_, b)| aic < b) {
            best = Some((lag, aic));
        }
    }
    best.ok_or(TestError::SingularRegression)
}
