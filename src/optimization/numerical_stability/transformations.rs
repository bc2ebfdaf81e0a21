//! Numerically stable reparameterizations for ARMA estimation.
//!
//! The optimizer works on unconstrained reals. This module maps them to
//! the constrained quantities the likelihood needs:
//!
//! - [`safe_softplus`] / [`safe_softplus_inv`]: ℝ ↔ (0, ∞), used for σ².
//! - [`safe_logistic`]: derivative of softplus, used in the σ² chain rule.
//! - [`constrain_stationary`]: ℝᵏ → the stationary region of an AR(k)
//!   polynomial, via partial autocorrelations and the Durbin–Levinson
//!   step-up recursion.
//! - [`stationary_jacobian`]: `∂φ/∂u` of the map above.
//!
//! Nothing here logs or allocates beyond the returned arrays.
use crate::optimization::loglik_optimizer::central_jacobian;
use ndarray::{Array1, Array2, ArrayView1};

/// Partial autocorrelations are kept inside `[−1 + m, 1 − m]` so that the
/// implied polynomial never sits on the unit circle in floating point.
pub const STATIONARITY_MARGIN: f64 = 1e-6;

/// Eigenvalues (and reciprocal condition numbers) at or below this value
/// are treated as zero.
pub const EIGEN_EPS: f64 = 1e-12;

/// Generic absolute tolerance for "is this effectively zero" checks.
pub const GENERAL_TOL: f64 = 1e-10;

/// Numerically stable softplus: `softplus(x) = ln(1 + exp(x))`.
///
/// For `x > 20` the result equals `x` to double precision; below that
/// `ln1p(exp(x))` keeps precision for very negative inputs.
pub fn safe_softplus(x: f64) -> f64 {
    if x > 20.0 { x } else { x.exp().ln_1p() }
}

/// Inverse of softplus on `(0, ∞)`: `ln(exp(x) − 1)`, via `expm1` below
/// the same cutoff used by [`safe_softplus`].
pub fn safe_softplus_inv(x: f64) -> f64 {
    if x > 20.0 { x } else { x.exp_m1().ln() }
}

/// Logistic function `1 / (1 + exp(−x))`, evaluated without overflow in
/// either tail.
pub fn safe_logistic(x: f64) -> f64 {
    if x >= 0.0 {
        1.0 / (1.0 + (-x).exp())
    } else {
        let e = x.exp();
        e / (1.0 + e)
    }
}

/// Map unconstrained reals to the coefficients of a stationary AR
/// polynomial `1 − φ₁z − … − φₖzᵏ`.
///
/// Each `u_k` becomes a partial autocorrelation `r_k = u_k / √(1 + u_k²)`,
/// then the step-up recursion
///
/// ```text
/// φ_{k,k} = r_k,   φ_{k,i} = φ_{k−1,i} − r_k·φ_{k−1,k−i}   (i < k)
/// ```
///
/// yields the coefficients. `u = 0` maps to `φ = 0`. An empty input maps
/// to an empty output.
pub fn constrain_stationary(u: ArrayView1<f64>) -> Array1<f64> {
    let k = u.len();
    let mut phi = Array1::<f64>::zeros(k);
    let mut prev = Array1::<f64>::zeros(k);
    let bound = 1.0 - STATIONARITY_MARGIN;
    for (m, &raw) in u.iter().enumerate() {
        let r = (raw / (1.0 + raw * raw).sqrt()).clamp(-bound, bound);
        prev.assign(&phi);
        for i in 0..m {
            phi[i] = prev[i] - r * prev[m - 1 - i];
        }
        phi[m] = r;
    }
    phi
}

/// Jacobian `J[i, k] = ∂φ_i/∂u_k` of [`constrain_stationary`] at `u`.
pub fn stationary_jacobian(u: ArrayView1<f64>) -> Array2<f64> {
    if u.is_empty() {
        return Array2::zeros((0, 0));
    }
    central_jacobian(&constrain_stationary, u)
}
