//! rust_arima — automatic ARIMA order selection with Python bindings.
//!
//! Purpose
//! -------
//! Serve as the crate root for Rust callers and as the PyO3 bridge that exposes
//! the order search to Python via the `_rust_arima` extension module. When the
//! `python-bindings` feature is enabled, this module defines the Python-facing
//! classes and submodules used by the `rust_arima` package.
//!
//! Key behaviors
//! -------------
//! - Re-export the core Rust modules (`arima`, `statistical_tests`, `ingest`)
//!   as the public crate surface.
//! - Define `#[pyclass]` wrappers and the `#[pymodule]` initializer for the
//!   `_rust_arima` Python extension.
//! - Register the `arima_models` and `statistical_tests` submodules under
//!   `rust_arima` so that dot-notation imports work.
//!
//! Invariants & assumptions
//! ------------------------
//! - All numerical work lives in the inner Rust modules; this file performs
//!   only FFI glue, input conversion, and error mapping.
//! - Errors from core Rust code are converted to `PyErr` (`ValueError`) at
//!   the PyO3 boundary through their `From` impls.

pub mod arima;
pub mod inference;
pub mod ingest;
pub mod optimization;
pub mod statistical_tests;
pub mod utils;

#[cfg(feature = "python-bindings")]
use ndarray::Array1;

#[cfg(feature = "python-bindings")]
use pyo3::{prelude::*, types::PyAny};

#[cfg(feature = "python-bindings")]
use crate::{
    arima::search::{
        auto_arima::{AutoArima as AutoArimaSearch, SearchOutcome},
        options::DEFAULT_MAX_ORDER,
        trace::CandidateOutcome,
    },
    statistical_tests::adf::AdfOutcome,
    utils::{build_search_options, extract_f64_vec},
};

/// ADF — Python-facing wrapper for the augmented Dickey–Fuller test.
///
/// Constructed via `ADF(data, max_lag=None)`; with `max_lag=None` the lag is
/// chosen by AIC. Exposes `statistic`, `pvalue`, `used_lag`, `nobs`, and
/// `critical_values` as `(1%, 5%, 10%)`.
#[cfg(feature = "python-bindings")]
#[pyclass(module = "rust_arima.statistical_tests")]
pub struct ADF {
    inner: AdfOutcome,
}

#[cfg(feature = "python-bindings")]
#[pymethods]
impl ADF {
    #[new]
    #[pyo3(text_signature = "(data, /, max_lag=None)", signature = (raw_data, max_lag = None))]
    pub fn adfuller<'py>(
        py: Python<'py>, raw_data: &Bound<'py, PyAny>, max_lag: Option<usize>,
    ) -> PyResult<ADF> {
        let data = extract_f64_vec(py, raw_data)?;
        let inner = AdfOutcome::adfuller(&data, max_lag)?;
        Ok(ADF { inner })
    }

    #[getter]
    pub fn statistic(&self) -> f64 {
        self.inner.stat()
    }

    #[getter]
    pub fn pvalue(&self) -> f64 {
        self.inner.p_value()
    }

    #[getter]
    pub fn used_lag(&self) -> usize {
        self.inner.used_lag()
    }

    #[getter]
    pub fn nobs(&self) -> usize {
        self.inner.nobs()
    }

    #[getter]
    pub fn critical_values(&self) -> (f64, f64, f64) {
        let cv = self.inner.critical_values();
        (cv.one_pct, cv.five_pct, cv.ten_pct)
    }
}

/// AutoArima — Python-facing wrapper for the order search.
///
/// Purpose
/// -------
/// Run [`AutoArimaSearch::fit`] on a Python array-like at construction time
/// and expose the selected model, its estimates, the search trace, the text
/// summary, and level forecasts.
///
/// Parameters
/// ----------
/// Constructed via `AutoArima(data, **options)`:
/// - `start_p`, `start_q`, `max_p`, `max_q`, `max_order`: order bounds;
///   `max_order=None` lifts the cap on `p + q`.
/// - `max_d`, `alpha`, `d`: differencing; `d` fixes the order.
/// - `with_intercept`, `strategy` (`"stepwise"` or `"grid"`).
/// - `max_candidates`, `max_seconds`: search budget.
/// - `covariance` (`"opg"`, `"oim"`, `"robust"`).
/// - `tol_grad`, `tol_cost`, `max_iter`, `line_searcher`, `lbfgs_mem`:
///   optimizer settings.
///
/// Notes
/// -----
/// - The input series is kept so that `forecast` can integrate back to levels.
#[cfg(feature = "python-bindings")]
#[pyclass(module = "rust_arima.arima_models")]
pub struct AutoArima {
    series: Array1<f64>,
    outcome: SearchOutcome,
}

#[cfg(feature = "python-bindings")]
#[pymethods]
impl AutoArima {
    #[new]
    #[pyo3(
        signature = (
            data,
            start_p = None,
            start_q = None,
            max_p = None,
            max_q = None,
            max_order = Some(DEFAULT_MAX_ORDER),
            max_d = None,
            alpha = None,
            d = None,
            with_intercept = None,
            strategy = None,
            max_candidates = None,
            max_seconds = None,
            covariance = None,
            tol_grad = None,
            tol_cost = None,
            max_iter = None,
            line_searcher = None,
            lbfgs_mem = None,
        ),
        text_signature = "(data, /, start_p=1, start_q=1, max_p=3, max_q=3, max_order=5, \
                          max_d=2, alpha=0.05, d=None, with_intercept=True, strategy='stepwise', \
                          max_candidates=100, max_seconds=None, covariance='opg', tol_grad=None, \
                          tol_cost=None, max_iter=None, line_searcher=None, lbfgs_mem=None)"
    )]
    pub fn new<'py>(
        py: Python<'py>, data: &Bound<'py, PyAny>, start_p: Option<usize>, start_q: Option<usize>,
        max_p: Option<usize>, max_q: Option<usize>, max_order: Option<usize>,
        max_d: Option<usize>, alpha: Option<f64>, d: Option<usize>, with_intercept: Option<bool>,
        strategy: Option<&str>, max_candidates: Option<usize>, max_seconds: Option<f64>,
        covariance: Option<&str>, tol_grad: Option<f64>, tol_cost: Option<f64>,
        max_iter: Option<usize>, line_searcher: Option<&str>, lbfgs_mem: Option<usize>,
    ) -> PyResult<Self> {
        let series = Array1::from(extract_f64_vec(py, data)?);
        let options = build_search_options(
            start_p,
            start_q,
            max_p,
            max_q,
            max_order,
            max_d,
            alpha,
            d,
            with_intercept,
            strategy,
            max_candidates,
            max_seconds,
            covariance,
            tol_grad,
            tol_cost,
            max_iter,
            line_searcher,
            lbfgs_mem,
        )?;
        let outcome = AutoArimaSearch::new(options).fit(&series)?;
        Ok(AutoArima { series, outcome })
    }

    /// `(p, d, q)` of the selected model.
    #[getter]
    pub fn order(&self) -> (usize, usize, usize) {
        let o = self.outcome.order;
        (o.p, o.d, o.q)
    }

    #[getter]
    pub fn intercept(&self) -> bool {
        self.outcome.order.intercept
    }

    #[getter]
    pub fn aic(&self) -> f64 {
        self.outcome.aic()
    }

    #[getter]
    pub fn loglik(&self) -> f64 {
        self.outcome.best.loglik
    }

    /// Estimates keyed by `intercept`, `ar.L{i}`, `ma.L{j}`, `sigma2`.
    #[getter]
    pub fn params(&self) -> Vec<(String, f64)> {
        let fit = &self.outcome.best;
        fit.param_names().into_iter().zip(fit.coefficients().to_vec()).collect()
    }

    #[getter]
    pub fn std_errors(&self) -> Vec<(String, f64)> {
        let fit = &self.outcome.best;
        fit.param_names().into_iter().zip(fit.std_errors.iter().copied()).collect()
    }

    /// One `(order, aic, failure, seconds)` tuple per attempted candidate.
    #[getter]
    pub fn trace(&self) -> Vec<(String, Option<f64>, Option<String>, f64)> {
        self.outcome
            .trace
            .records()
            .iter()
            .map(|rec| {
                let failure = match &rec.outcome {
                    CandidateOutcome::Fitted { .. } => None,
                    CandidateOutcome::Failed { reason } => Some(reason.clone()),
                };
                (rec.order.to_string(), rec.aic(), failure, rec.elapsed.as_secs_f64())
            })
            .collect()
    }

    pub fn summary(&self) -> String {
        self.outcome.summary()
    }

    /// Level forecasts `horizon` steps past the end of the input series.
    #[pyo3(text_signature = "(self, horizon)")]
    pub fn forecast(&self, horizon: usize) -> PyResult<Vec<f64>> {
        Ok(self.outcome.forecast(&self.series, horizon)?.to_vec())
    }

    fn __repr__(&self) -> String {
        format!("AutoArima({}, aic={:.4})", self.outcome.order, self.outcome.aic())
    }
}

#[cfg(feature = "python-bindings")]
#[pymodule]
fn _rust_arima<'py>(_py: Python<'py>, m: &Bound<'py, PyModule>) -> PyResult<()> {
    let statistical_tests_mod = PyModule::new(_py, "statistical_tests")?;
    let arima_models_mod = PyModule::new(_py, "arima_models")?;
    statistical_tests(_py, m, &statistical_tests_mod)?;
    arima_models(_py, m, &arima_models_mod)?;

    // Manually add submodules into sys.modules to allow for dot notation.
    let modules = _py.import("sys")?.getattr("modules")?;
    modules.set_item("rust_arima.statistical_tests", statistical_tests_mod)?;
    modules.set_item("rust_arima.arima_models", arima_models_mod)?;
    Ok(())
}

#[cfg(feature = "python-bindings")]
fn statistical_tests<'py>(
    _py: Python, rust_arima: &Bound<'py, PyModule>, m: &Bound<'py, PyModule>,
) -> PyResult<()> {
    m.add_class::<ADF>()?;
    rust_arima.add_submodule(m)?;
    Ok(())
}

#[cfg(feature = "python-bindings")]
fn arima_models<'py>(
    _py: Python, rust_arima: &Bound<'py, PyModule>, m: &Bound<'py, PyModule>,
) -> PyResult<()> {
    m.add_class::<AutoArima>()?;
    rust_arima.add_submodule(m)?;
    Ok(())
}
