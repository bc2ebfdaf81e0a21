//! Differencing, its inverse, and selection of the differencing order `d`.
//!
//! Key behaviors
//! -------------
//! - [`difference`]: apply `Δ^d`, shortening the series by `d`.
//! - [`integrate`]: undo `Δ^d` for a block of forecast increments, anchored
//!   on the tail of the original series.
//! - [`determine_differencing`]: the smallest `d ≤ max_d` whose ADF test
//!   rejects a unit root at level `alpha`.
use crate::{
    arima::errors::{ArimaError, ArimaResult},
    optimization::numerical_stability::transformations::GENERAL_TOL,
    statistical_tests::adf::AdfOutcome,
};
use ndarray::{Array1, ArrayView1, s};

/// Outcome of [`determine_differencing`].
///
/// - `d`: selected differencing order.
/// - `series`: the input differenced `d` times.
/// - `tests`: one ADF outcome per order tested, in order. Shorter than
///   `d + 1` when the loop stopped on a constant series.
#[derive(Debug, Clone, PartialEq)]
pub struct DifferencingOutcome {
    pub d: usize,
    pub series: Array1<f64>,
    pub tests: Vec<AdfOutcome>,
}

/// `Δ^d x`, of length `max(len − d, 0)`.
pub fn difference(x: ArrayView1<f64>, d: usize) -> Array1<f64> {
    let mut out = x.to_owned();
    for _ in 0..d {
        if out.len() < 2 {
            return Array1::zeros(0);
        }
        let next = &out.slice(s![1..]) - &out.slice(s![..-1]);
        out = next;
    }
    out
}

/// Map increments of `Δ^d x` beyond the end of `tail` back to levels.
///
/// `tail` must hold at least the last `d` observations of the original
/// series (more are fine). With `d = 0` the increments are returned as-is.
///
/// # Errors
/// - `SeriesTooShort` when `tail.len() < d`.
pub fn integrate(
    tail: ArrayView1<f64>, d: usize, increments: ArrayView1<f64>,
) -> ArimaResult<Array1<f64>> {
    if tail.len() < d {
        return Err(ArimaError::SeriesTooShort { len: tail.len(), required: d });
    }
    // Last value of each difference order 0..d of the tail.
    let anchors: Vec<f64> = (0..d)
        .map(|k| {
            let diffed = difference(tail.slice(s![tail.len() - d..]), k);
            diffed[diffed.len() - 1]
        })
        .collect();
    let mut out = increments.to_owned();
    for &anchor in anchors.iter().rev() {
        let mut acc = anchor;
        out.iter_mut().for_each(|v| {
            acc += *v;
            *v = acc;
        });
    }
    Ok(out)
}

/// `true` when the range of `x` is negligible relative to its scale.
///
/// Empty and single-element series count as constant.
pub fn is_constant(x: ArrayView1<f64>) -> bool {
    let (lo, hi, scale) = x.iter().fold(
        (f64::INFINITY, f64::NEG_INFINITY, 1.0_f64),
        |(lo, hi, scale), &v| (lo.min(v), hi.max(v), scale.max(v.abs())),
    );
    x.len() < 2 || hi - lo <= GENERAL_TOL * scale
}

/// Find the smallest `d ∈ 0..=max_d` for which `Δ^d series` is stationary
/// by the ADF test at level `alpha`.
///
/// The loop stops early, without testing, once the differenced series is
/// constant; the caller decides whether a constant series is usable.
///
/// Parameters
/// ----------
/// - `series`: levels, already validated as finite.
/// - `alpha`: significance level in `(0, 1)`.
/// - `max_d`: highest order tried.
/// - `adf_lag`: `None` selects the ADF lag by AIC at every step; `Some(k)`
///   fixes it.
///
/// Errors
/// ------
/// - `InvalidAlpha` for `alpha ∉ (0, 1)`.
/// - `StationarityTest` when the ADF test itself fails (too short, lag
///   too large).
/// - `DifferencingUndetermined` when `Δ^{max_d} series` still fails to
///   reject.
pub fn determine_differencing(
    series: ArrayView1<f64>, alpha: f64, max_d: usize, adf_lag: Option<usize>,
) -> ArimaResult<DifferencingOutcome> {
    if !(alpha > 0.0 && alpha < 1.0) {
        return Err(ArimaError::InvalidAlpha { alpha });
    }
    let mut current = series.to_owned();
    let mut tests = Vec::with_capacity(max_d + 1);
    for d in 0..=max_d {
        if is_constant(current.view()) {
            log::debug!("series is constant at d = {d}; stopping differencing");
            return Ok(DifferencingOutcome { d, series: current, tests });
        }
        let adf = AdfOutcome::adfuller(&current.to_vec(), adf_lag)?;
        log::debug!(
            "ADF at d = {d}: stat = {:.4}, p = {:.4}, lag = {}",
            adf.stat(),
            adf.p_value(),
            adf.used_lag()
        );
        tests.push(adf);
        if adf.p_value() <= alpha {
            return Ok(DifferencingOutcome { d, series: current, tests });
        }
        if d < max_d {
            current = difference(current.view(), 1);
        }
    }
    let last_pvalue = tests.last().map_or(f64::NAN, |t| t.p_value());
    Err(ArimaError::DifferencingUndetermined { max_d, last_pvalue })
}
