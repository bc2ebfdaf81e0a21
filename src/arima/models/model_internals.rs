//! ARMA(p, q) model internals: sample bookkeeping, recursion wiring, the
//! chain rule into optimizer space, and score construction.
//!
//! Conventions
//! -----------
//! - The estimation sample is `t ∈ start..n` with
//!   `start = max(t0.unwrap_or(0), p)`; `n_eff = n − start`.
//! - Coefficient-space quantities (`β = [μ? | φ | θ | σ²]`) are on the
//!   total log-likelihood scale. The optimizer sees the average scale; the
//!   division by `n_eff` happens in the `LogLikelihood` impl.
use crate::{
    arima::{
        core::{
            data::ArimaData,
            order::CandidateOrder,
            params::ArimaParams,
            recursion::{
                coefficient_gradient, coefficient_scores, compute_derivatives, compute_residuals,
            },
        },
        errors::{ArimaError, ArimaResult, ParamResult},
        models::arima::ArimaModel,
    },
    optimization::{
        loglik_optimizer::{Grad, Theta},
        numerical_stability::transformations::{safe_logistic, stationary_jacobian},
    },
};
use ndarray::{Array1, Array2, ArrayView1, ArrayView2, s};

/// First index that enters the likelihood.
pub fn start_idx(order: &CandidateOrder, data: &ArimaData) -> usize {
    data.t0.unwrap_or(0).max(order.p)
}

/// Number of observations in the likelihood.
pub fn n_eff(order: &CandidateOrder, data: &ArimaData) -> usize {
    data.len().saturating_sub(start_idx(order, data))
}

/// Run the innovation and derivative recursions for `params` in the
/// model's scratch buffers, then hand both to `closure`.
///
/// # Panics
/// - If the scratch buffers are already borrowed (`RefCell` rules).
pub fn with_recursions<T, F>(
    model: &ArimaModel, data: &ArimaData, params: &ArimaParams, closure: F,
) -> ParamResult<T>
where
    F: FnOnce(ArrayView1<f64>, ArrayView2<f64>, usize) -> T,
{
    let start = start_idx(&model.order, data);
    let w = data.data.view();
    let mut resid = model.scratch_bufs.resid_buf.borrow_mut();
    let mut deriv = model.scratch_bufs.deriv_buf.borrow_mut();
    compute_residuals(w, params, start, &mut resid)?;
    compute_derivatives(w, params, &model.order, start, resid.view(), &mut deriv);
    Ok(closure(resid.view(), deriv.view(), start))
}

/// Map `∂ℓ/∂β` to `∂ℓ/∂ϑ` for the optimizer-space vector `theta`.
///
/// - `μ`: identity.
/// - `φ = c(u_φ)`: `Jᵀ·∇_φ` with `J = ∂φ/∂u_φ`.
/// - `θ = −c(u_θ)`: `−Jᵀ·∇_θ`.
/// - `σ² = softplus(s)`: times `logistic(s)`.
pub fn theta_chain_rule(grad_beta: &Array1<f64>, theta: &Theta, order: &CandidateOrder) -> Grad {
    let (p, q) = (order.p, order.q);
    let off = usize::from(order.intercept);
    let mut grad = grad_beta.clone();
    if p > 0 {
        let jac = stationary_jacobian(theta.slice(s![off..off + p]));
        let mapped = jac.t().dot(&grad_beta.slice(s![off..off + p]));
        grad.slice_mut(s![off..off + p]).assign(&mapped);
    }
    if q > 0 {
        let jac = stationary_jacobian(theta.slice(s![off + p..off + p + q]));
        let mapped = -jac.t().dot(&grad_beta.slice(s![off + p..off + p + q]));
        grad.slice_mut(s![off + p..off + p + q]).assign(&mapped);
    }
    let last = off + p + q;
    grad[last] *= safe_logistic(theta[last]);
    grad
}

/// Per-observation scores `∂ℓ_t/∂β` at the fitted parameters, one row per
/// effective observation.
///
/// # Errors
/// - `ModelNotFitted` before a successful fit.
/// - `Param` if the recursion fails at the fitted parameters.
pub fn calculate_scores(model: &ArimaModel, data: &ArimaData) -> ArimaResult<Array2<f64>> {
    let params = model.fitted_params.as_ref().ok_or(ArimaError::ModelNotFitted)?;
    let scores = with_recursions(model, data, params, |resid, deriv, start| {
        coefficient_scores(resid, deriv, start, params.sigma2)
    })?;
    Ok(scores)
}

/// Analytic `∂ℓ/∂β` as a function of `β`, for finite-difference Hessians.
///
/// Uses its own buffers so it can be called while the model's scratch is
/// borrowed. Parameters outside the domain (σ² ≤ 0, overflowing
/// recursion) map to a NaN vector, which the Hessian routine reports as
/// an invalid entry.
pub fn coefficient_grad_fn<'a>(
    order: &'a CandidateOrder, data: &'a ArimaData,
) -> impl Fn(&Array1<f64>) -> Array1<f64> + 'a {
    move |beta: &Array1<f64>| {
        let start = start_idx(order, data);
        let n = data.len();
        let nan = || Array1::from_elem(order.n_params(), f64::NAN);
        let Ok(params) = ArimaParams::from_coefficients(beta.view(), order) else {
            return nan();
        };
        let mut resid = Array1::zeros(n);
        let mut deriv = Array2::zeros((n, order.n_coefs()));
        if compute_residuals(data.data.view(), &params, start, &mut resid).is_err() {
            return nan();
        }
        compute_derivatives(data.data.view(), &params, order, start, resid.view(), &mut deriv);
        coefficient_gradient(resid.view(), deriv.view(), start, params.sigma2)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::arima::core::options::ArimaOptions;
    use crate::optimization::numerical_stability::transformations::safe_softplus_inv;
    use approx::assert_abs_diff_eq;
    use ndarray::array;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Sample bookkeeping (`start_idx`, `n_eff`) with and without `t0`.
    // - The chain rule against finite differences of ℓ in optimizer space.
    // - `calculate_scores` on an unfitted model.
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // The likelihood starts at max(t0, p).
    //
    // Given
    // -----
    // - n = 10, p = 2, with t0 = None and t0 = 3.
    //
    // Expect
    // ------
    // - start 2 / n_eff 8, then start 3 / n_eff 7.
    fn start_idx_is_max_of_t0_and_p() {
        let order = CandidateOrder::new(2, 0, false);
        let plain = ArimaData::new(Array1::zeros(10), None).unwrap();
        let burned = ArimaData::new(Array1::zeros(10), Some(3)).unwrap();

        assert_eq!((start_idx(&order, &plain), n_eff(&order, &plain)), (2, 8));
        assert_eq!((start_idx(&order, &burned), n_eff(&order, &burned)), (3, 7));
    }

    #[test]
    // Purpose
    // -------
    // Chaining the β-gradient gives the ϑ-gradient.
    //
    // Given
    // -----
    // - ARMA(2,1) with intercept on a short series, at an interior ϑ.
    //
    // Expect
    // ------
    // - `theta_chain_rule(∂ℓ/∂β)` matches central differences of ℓ(ϑ).
    fn chain_rule_matches_finite_differences() {
        let order = CandidateOrder::new(2, 1, true);
        let data = ArimaData::new(
            array![0.4, 1.1, -0.2, 0.9, 1.6, 0.3, -0.5, 0.2, 1.0, 0.7, -0.1, 0.8, 0.5],
            None,
        )
        .unwrap();
        let theta = array![0.2, 0.3, -0.4, 0.5, safe_softplus_inv(0.9)];
        let loglik = |t: &Array1<f64>| -> f64 {
            let params = ArimaParams::from_theta(t.view(), &order).unwrap();
            let model = ArimaModel::new(order, ArimaOptions::default(), data.len());
            with_recursions(&model, &data, &params, |resid, _, start| {
                let sse: f64 = resid.slice(s![start..]).iter().map(|e| e * e).sum();
                let n = (resid.len() - start) as f64;
                -0.5 * n * (2.0 * std::f64::consts::PI * params.sigma2).ln()
                    - sse / (2.0 * params.sigma2)
            })
            .unwrap()
        };

        let params = ArimaParams::from_theta(theta.view(), &order).unwrap();
        let beta = params.to_coefficients(&order);
        let grad_beta = coefficient_grad_fn(&order, &data)(&beta);
        let grad_theta = theta_chain_rule(&grad_beta, &theta, &order);

        let h = 1e-6;
        for k in 0..theta.len() {
            let mut up = theta.clone();
            let mut down = theta.clone();
            up[k] += h;
            down[k] -= h;
            let fd = (loglik(&up) - loglik(&down)) / (2.0 * h);
            assert_abs_diff_eq!(grad_theta[k], fd, epsilon = 1e-4);
        }
    }

    #[test]
    // Purpose
    // -------
    // Accessors that need a fit report `ModelNotFitted` beforehand.
    //
    // Given
    // -----
    // - A freshly constructed model.
    //
    // Expect
    // ------
    // - `ModelNotFitted` from `calculate_scores`.
    fn unfitted_model_is_reported() {
        let order = CandidateOrder::new(1, 0, false);
        let data = ArimaData::new(array![1.0, 2.0, 3.0], None).unwrap();
        let model = ArimaModel::new(order, ArimaOptions::default(), data.len());

        assert_eq!(calculate_scores(&model, &data).unwrap_err(), ArimaError::ModelNotFitted);
    }
}
