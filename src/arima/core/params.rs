//! ARMA(p, q) parameterization and scratch workspace.
//!
//! Two parameter spaces meet here:
//!
//! - **Coefficient space** `β = [μ? | φ(1..p) | θ(1..q) | σ²]`: what users
//!   see and what standard errors are reported for. `μ` is present only
//!   for candidates with an intercept.
//! - **Optimizer space** `ϑ = [μ? | u_φ(1..p) | u_θ(1..q) | s]`: unconstrained
//!   reals with
//!   - `φ = constrain_stationary(u_φ)` (stationary AR polynomial),
//!   - `θ = −constrain_stationary(u_θ)` (invertible MA polynomial),
//!   - `σ² = softplus(s)`,
//!   - `μ` passed through unchanged.
//!
//! [`ArimaScratch`] holds the residual and derivative buffers reused by the
//! likelihood and gradient so the optimizer loop stays allocation-light.
use crate::{
    arima::{
        core::order::CandidateOrder,
        errors::{ParamError, ParamResult},
    },
    optimization::numerical_stability::transformations::{
        constrain_stationary, safe_softplus,
    },
};
use ndarray::{Array1, Array2, ArrayView1, s};
use std::cell::RefCell;

/// Reusable buffers for one candidate fit.
///
/// - `resid_buf`: length `n`, innovations `e_t` (zero before the start index).
/// - `deriv_buf`: shape `(n, p + q + intercept)`, `∂e_t/∂β` for the
///   coefficients (σ² excluded).
#[derive(Debug, Clone, PartialEq)]
pub struct ArimaScratch {
    pub resid_buf: RefCell<Array1<f64>>,
    pub deriv_buf: RefCell<Array2<f64>>,
}

impl ArimaScratch {
    pub fn new(n: usize, order: &CandidateOrder) -> ArimaScratch {
        let resid_buf = RefCell::new(Array1::zeros(n));
        let deriv_buf = RefCell::new(Array2::zeros((n, order.n_coefs())));
        ArimaScratch { resid_buf, deriv_buf }
    }
}

/// Validated coefficient-space parameters of an ARMA(p, q) in mean form.
///
/// `mean` is `0.0` for candidates without an intercept.
#[derive(Debug, Clone, PartialEq)]
pub struct ArimaParams {
    pub mean: f64,
    pub ar: Array1<f64>,
    pub ma: Array1<f64>,
    pub sigma2: f64,
}

impl ArimaParams {
    /// # Errors
    /// - `CoefficientLengthMismatch` when `ar`/`ma` disagree with `order`.
    /// - `InvalidThetaInput` for a non-finite coefficient.
    /// - `InvalidVariance` unless `sigma2` is finite and positive.
    pub fn new(
        mean: f64, ar: Array1<f64>, ma: Array1<f64>, sigma2: f64, order: &CandidateOrder,
    ) -> ParamResult<Self> {
        validate_block("ar", ar.view(), order.p)?;
        validate_block("ma", ma.view(), order.q)?;
        if !mean.is_finite() {
            return Err(ParamError::InvalidThetaInput { index: 0, value: mean });
        }
        validate_sigma2(sigma2)?;
        let mean = if order.intercept { mean } else { 0.0 };
        Ok(ArimaParams { mean, ar, ma, sigma2 })
    }

    /// Map an optimizer-space vector to coefficient space.
    ///
    /// # Errors
    /// - `ThetaLengthMismatch` / `InvalidThetaInput` for a malformed `theta`.
    /// - `InvalidVariance` if `softplus(s)` underflows to zero.
    pub fn from_theta(theta: ArrayView1<f64>, order: &CandidateOrder) -> ParamResult<Self> {
        validate_theta(theta, order)?;
        let (p, q) = (order.p, order.q);
        let off = usize::from(order.intercept);
        let mean = if order.intercept { theta[0] } else { 0.0 };
        let ar = constrain_stationary(theta.slice(s![off..off + p]));
        let ma = -constrain_stationary(theta.slice(s![off + p..off + p + q]));
        let sigma2 = safe_softplus(theta[off + p + q]);
        validate_sigma2(sigma2)?;
        Ok(ArimaParams { mean, ar, ma, sigma2 })
    }

    /// Build from a coefficient-space vector `β = [μ? | φ | θ | σ²]`.
    ///
    /// No stationarity check is applied, so finite-difference probes around
    /// `β̂` stay usable near the boundary.
    pub fn from_coefficients(beta: ArrayView1<f64>, order: &CandidateOrder) -> ParamResult<Self> {
        if beta.len() != order.n_params() {
            return Err(ParamError::CoefficientLengthMismatch {
                which: "coefficients",
                expected: order.n_params(),
                actual: beta.len(),
            });
        }
        if let Some((index, &value)) = beta.iter().enumerate().find(|(_, v)| !v.is_finite()) {
            return Err(ParamError::InvalidThetaInput { index, value });
        }
        let (p, q) = (order.p, order.q);
        let off = usize::from(order.intercept);
        let mean = if order.intercept { beta[0] } else { 0.0 };
        let sigma2 = beta[off + p + q];
        validate_sigma2(sigma2)?;
        Ok(ArimaParams {
            mean,
            ar: beta.slice(s![off..off + p]).to_owned(),
            ma: beta.slice(s![off + p..off + p + q]).to_owned(),
            sigma2,
        })
    }

    /// Coefficient vector `β = [μ? | φ | θ | σ²]`.
    pub fn to_coefficients(&self, order: &CandidateOrder) -> Array1<f64> {
        let mut beta = Vec::with_capacity(order.n_params());
        if order.intercept {
            beta.push(self.mean);
        }
        beta.extend(self.ar.iter().copied());
        beta.extend(self.ma.iter().copied());
        beta.push(self.sigma2);
        Array1::from(beta)
    }

    /// Regression-form constant `c = μ(1 − Σφ)`.
    pub fn intercept(&self) -> f64 {
        self.mean * (1.0 - self.ar.sum())
    }
}

// ---- Helper methods ----

fn validate_theta(theta: ArrayView1<f64>, order: &CandidateOrder) -> ParamResult<()> {
    if theta.len() != order.n_params() {
        return Err(ParamError::ThetaLengthMismatch {
            expected: order.n_params(),
            actual: theta.len(),
        });
    }
    if let Some((index, &value)) = theta.iter().enumerate().find(|(_, v)| !v.is_finite()) {
        return Err(ParamError::InvalidThetaInput { index, value });
    }
    Ok(())
}

fn validate_block(which: &'static str, block: ArrayView1<f64>, expected: usize) -> ParamResult<()> {
    if block.len() != expected {
        return Err(ParamError::CoefficientLengthMismatch { which, expected, actual: block.len() });
    }
    if let Some((index, &value)) = block.iter().enumerate().find(|(_, v)| !v.is_finite()) {
        return Err(ParamError::InvalidThetaInput { index, value });
    }
    Ok(())
}

fn validate_sigma2(sigma2: f64) -> ParamResult<()> {
    if !sigma2.is_finite() || sigma2 <= 0.0 {
        return Err(ParamError::InvalidVariance { value: sigma2 });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::optimization::numerical_stability::transformations::safe_softplus_inv;
    use approx::assert_abs_diff_eq;
    use ndarray::array;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - The optimizer-space ↔ coefficient-space maps and their inverses.
    // - Layout with and without the mean.
    // - Rejection of malformed inputs.
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // `from_theta` respects the block layout and the MA sign convention.
    //
    // Given
    // -----
    // - ARMA(1,1) with intercept and ϑ = [2.0, 0.0, 0.0, softplus⁻¹(1.5)].
    //
    // Expect
    // ------
    // - μ = 2, φ = θ = 0, σ² = 1.5.
    fn from_theta_zero_coefficients_and_layout() {
        let order = CandidateOrder::new(1, 1, true);
        let theta = array![2.0, 0.0, 0.0, safe_softplus_inv(1.5)];

        let params = ArimaParams::from_theta(theta.view(), &order).unwrap();

        assert_abs_diff_eq!(params.mean, 2.0);
        assert_abs_diff_eq!(params.ar[0], 0.0);
        assert_abs_diff_eq!(params.ma[0], 0.0);
        assert_abs_diff_eq!(params.sigma2, 1.5, epsilon = 1e-12);
    }

    #[test]
    // Purpose
    // -------
    // Coefficient vectors round-trip and the regression constant follows
    // from the mean.
    //
    // Given
    // -----
    // - β = [10, 0.6, 2.0] for ARMA(1,0) with intercept.
    //
    // Expect
    // ------
    // - `to_coefficients` reproduces β; `intercept()` = 10·(1 − 0.6) = 4.
    fn coefficient_vector_round_trips() {
        let order = CandidateOrder::new(1, 0, true);
        let beta = array![10.0, 0.6, 2.0];

        let params = ArimaParams::from_coefficients(beta.view(), &order).unwrap();

        assert_eq!(params.to_coefficients(&order), beta);
        assert_abs_diff_eq!(params.intercept(), 4.0, epsilon = 1e-12);
    }

    #[test]
    // Purpose
    // -------
    // Malformed inputs are rejected with the matching error.
    //
    // Given
    // -----
    // - A θ of the wrong length, a non-finite θ, a negative variance, and
    //   an AR block of the wrong length.
    //
    // Expect
    // ------
    // - `ThetaLengthMismatch`, `InvalidThetaInput`, `InvalidVariance`,
    //   `CoefficientLengthMismatch { which: "ar", .. }`.
    fn malformed_inputs_are_rejected() {
        let order = CandidateOrder::new(1, 0, false);

        assert_eq!(
            ArimaParams::from_theta(array![0.0].view(), &order).unwrap_err(),
            ParamError::ThetaLengthMismatch { expected: 2, actual: 1 }
        );
        assert!(matches!(
            ArimaParams::from_theta(array![f64::NAN, 0.0].view(), &order).unwrap_err(),
            ParamError::InvalidThetaInput { index: 0, .. }
        ));
        assert_eq!(
            ArimaParams::from_coefficients(array![0.1, -1.0].view(), &order).unwrap_err(),
            ParamError::InvalidVariance { value: -1.0 }
        );
        assert_eq!(
            ArimaParams::new(0.0, array![0.1, 0.2], array![], 1.0, &order).unwrap_err(),
            ParamError::CoefficientLengthMismatch { which: "ar", expected: 1, actual: 2 }
        );
    }
}
