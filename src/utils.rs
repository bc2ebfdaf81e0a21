#[cfg(feature = "python-bindings")]
use pyo3::{exceptions::PyValueError, prelude::*, types::PyAny};

#[cfg(feature = "python-bindings")]
use crate::{
    arima::{
        core::options::ArimaOptions,
        errors::ArimaError,
        search::options::{
            DifferencingOptions, OrderBounds, SearchBudget, SearchOptions, SearchStrategy,
        },
    },
    inference::covariance::CovarianceType,
    optimization::loglik_optimizer::traits::{LineSearcher, MLEOptions, Tolerances},
};

#[cfg(feature = "python-bindings")]
use numpy::{
    IntoPyArray,    // Vec → PyArray
    PyArrayMethods, // .readonly()
    PyReadonlyArray1,
};

#[cfg(feature = "python-bindings")]
#[inline]
pub fn extract_f64_array<'py>(
    py: Python<'py>, raw_data: &Bound<'py, PyAny>,
) -> PyResult<PyReadonlyArray1<'py, f64>> {
    if let Ok(arr_ro) = raw_data.extract::<PyReadonlyArray1<f64>>() {
        if arr_ro.as_slice().is_ok() {
            return Ok(arr_ro);
        }
    }

    if let Ok(obj) = raw_data.call_method("to_numpy", (false,), None) {
        if let Ok(series_ro) = obj.extract::<PyReadonlyArray1<f64>>() {
            if series_ro.as_slice().is_ok() {
                return Ok(series_ro);
            }
        }
    }

    let vec: Vec<f64> = raw_data.extract().map_err(|_| {
        pyo3::exceptions::PyTypeError::new_err(
            "expected a 1-D numpy.ndarray, pandas.Series, or sequence of float64",
        )
    })?;
    Ok(vec.into_pyarray(py).readonly())
}

/// Copy a Python array-like into an owned `Vec<f64>`.
#[cfg(feature = "python-bindings")]
pub fn extract_f64_vec<'py>(py: Python<'py>, raw_data: &Bound<'py, PyAny>) -> PyResult<Vec<f64>> {
    let arr = extract_f64_array(py, raw_data)?;
    let slice = arr
        .as_slice()
        .map_err(|_| PyValueError::new_err("data must be a 1-D contiguous float64 array"))?;
    Ok(slice.to_vec())
}

#[cfg(feature = "python-bindings")]
fn extract_mle_opts(
    tol_grad: Option<f64>, tol_cost: Option<f64>, max_iter: Option<usize>,
    line_searcher: Option<&str>, lbfgs_mem: Option<usize>,
) -> PyResult<MLEOptions> {
    use std::str::FromStr;

    if tol_grad.is_none() && tol_cost.is_none() && max_iter.is_none() {
        return Ok(MLEOptions {
            line_searcher: match line_searcher {
                Some(name) => LineSearcher::from_str(name).map_err(ArimaError::from)?,
                None => LineSearcher::MoreThuente,
            },
            lbfgs_mem,
            ..MLEOptions::default()
        });
    }

    // Tolerances::new -> OptResult<Tolerances> -> ArimaError -> PyErr
    let tols = Tolerances::new(tol_grad, tol_cost, max_iter).map_err(ArimaError::from)?;

    let ls = match line_searcher {
        Some(name) => LineSearcher::from_str(name).map_err(ArimaError::from)?,
        None => LineSearcher::MoreThuente,
    };

    let opts = MLEOptions::new(tols, ls, lbfgs_mem).map_err(ArimaError::from)?;

    Ok(opts)
}

/// Assemble validated [`SearchOptions`] from the keyword arguments of the
/// Python `AutoArima` constructor. `None` keeps the Rust default, except
/// for `max_order`, where `None` removes the cap on `p + q`; the Python
/// signature already defaults it to [`DEFAULT_MAX_ORDER`].
///
/// [`DEFAULT_MAX_ORDER`]: crate::arima::search::options::DEFAULT_MAX_ORDER
#[cfg(feature = "python-bindings")]
pub fn build_search_options(
    start_p: Option<usize>, start_q: Option<usize>, max_p: Option<usize>, max_q: Option<usize>,
    max_order: Option<usize>, max_d: Option<usize>, alpha: Option<f64>, d: Option<usize>,
    with_intercept: Option<bool>, strategy: Option<&str>, max_candidates: Option<usize>,
    max_seconds: Option<f64>, covariance: Option<&str>, tol_grad: Option<f64>,
    tol_cost: Option<f64>, max_iter: Option<usize>, line_searcher: Option<&str>,
    lbfgs_mem: Option<usize>,
) -> PyResult<SearchOptions> {
    let bound_defaults = OrderBounds::default();
    let bounds = OrderBounds::new(
        start_p.unwrap_or(bound_defaults.start_p),
        start_q.unwrap_or(bound_defaults.start_q),
        max_p.unwrap_or(bound_defaults.max_p),
        max_q.unwrap_or(bound_defaults.max_q),
        max_order,
    )?;

    let diff_defaults = DifferencingOptions::default();
    let differencing = DifferencingOptions::new(
        alpha.unwrap_or(diff_defaults.alpha),
        max_d.unwrap_or(diff_defaults.max_d),
        None,
        d,
    )?;

    let max_duration = match max_seconds {
        Some(s) if !(s.is_finite() && s > 0.0) => {
            return Err(PyValueError::new_err("max_seconds must be a positive number"));
        }
        Some(s) => Some(std::time::Duration::from_secs_f64(s)),
        None => None,
    };
    let budget = SearchBudget::new(
        max_candidates.unwrap_or(SearchBudget::default().max_candidates),
        max_duration,
    )?;

    let strategy: SearchStrategy = strategy.unwrap_or("stepwise").parse()?;
    let covariance: CovarianceType =
        covariance.unwrap_or("opg").parse().map_err(PyValueError::new_err)?;

    let mle_opts = extract_mle_opts(tol_grad, tol_cost, max_iter, line_searcher, lbfgs_mem)?;
    let fit = ArimaOptions::new(mle_opts, covariance, true);

    Ok(SearchOptions::new(
        bounds,
        differencing,
        budget,
        strategy,
        with_intercept.unwrap_or(true),
        fit,
    ))
}

#[cfg(all(test, feature = "python-bindings"))]
mod tests {
    use super::*;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover the keyword-to-options mapping. Array extraction
    // needs a live interpreter and is left to the Python test suite.
    // -------------------------------------------------------------------------

    fn options_with_max_order(max_order: Option<usize>) -> SearchOptions {
        build_search_options(
            None, None, None, None, max_order, None, None, None, None, None, None, None, None,
            None, None, None, None, None,
        )
        .unwrap()
    }

    #[test]
    // Purpose
    // -------
    // `max_order` is passed through as given, so `None` lifts the cap.
    //
    // Given
    // -----
    // - `max_order = Some(2)` and `max_order = None`, everything else unset.
    //
    // Expect
    // ------
    // - A cap of 2 that excludes (2, 1); no cap that admits (3, 3); all
    //   other fields at their Rust defaults.
    fn max_order_none_removes_the_cap() {
        let capped = options_with_max_order(Some(2));
        let uncapped = options_with_max_order(None);

        assert_eq!(capped.bounds.max_order, Some(2));
        assert!(!capped.bounds.contains(2, 1));
        assert_eq!(uncapped.bounds.max_order, None);
        assert!(uncapped.bounds.contains(3, 3));
        assert_eq!(uncapped.differencing, DifferencingOptions::default());
        assert_eq!(uncapped.budget, SearchBudget::default());
    }
}
