//! Out-of-sample forecasts for a fitted ARMA(p, q).
//!
//! Future innovations are set to their conditional mean of zero, so the
//! forecast at step `h` is
//!
//! ```text
//! ŵ_{T+h} = μ + Σ_i φ_i (w̃_{T+h−i} − μ) + Σ_{j ≥ h} θ_j e_{T+h−j}
//! ```
//!
//! where `w̃` is the observed series up to `T` and the forecast path
//! beyond. The MA part vanishes after `q` steps and the path decays
//! geometrically to `μ` for a stationary AR polynomial.
use crate::arima::{
    core::params::ArimaParams,
    errors::{ArimaError, ArimaResult, ParamError},
};
use ndarray::{Array1, ArrayView1};

/// Roll the ARMA recursion `horizon` steps past the sample.
///
/// - `w_lags`: the last `p` observations (newest last).
/// - `e_lags`: the last `q` in-sample innovations (newest last).
///
/// # Errors
/// - `InvalidHorizon` for `horizon == 0`.
/// - `Param(CoefficientLengthMismatch)` when a lag block has the wrong length.
pub fn forecast_recursion(
    params: &ArimaParams, w_lags: ArrayView1<f64>, e_lags: ArrayView1<f64>, horizon: usize,
) -> ArimaResult<Array1<f64>> {
    if horizon == 0 {
        return Err(ArimaError::InvalidHorizon { horizon });
    }
    let (p, q) = (params.ar.len(), params.ma.len());
    if w_lags.len() != p {
        return Err(ParamError::CoefficientLengthMismatch {
            which: "ar lags",
            expected: p,
            actual: w_lags.len(),
        }
        .into());
    }
    if e_lags.len() != q {
        return Err(ParamError::CoefficientLengthMismatch {
            which: "ma lags",
            expected: q,
            actual: e_lags.len(),
        }
        .into());
    }
    let mu = params.mean;
    // Deviations from the mean: the p lags, then the forecasts as they come.
    let mut path: Vec<f64> = w_lags.iter().map(|w| w - mu).collect();
    let mut out = Array1::<f64>::zeros(horizon);
    for h in 0..horizon {
        let mut x = 0.0;
        for i in 0..p {
            x += params.ar[i] * path[p + h - 1 - i];
        }
        for j in h..q {
            x += params.ma[j] * e_lags[q - 1 - (j - h)];
        }
        path.push(x);
        out[h] = mu + x;
    }
    Ok(out)
}
