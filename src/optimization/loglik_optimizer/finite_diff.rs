//! loglik_optimizer::finite_diff — numerical derivatives with validation.
//!
//! Purpose
//! -------
//! Wrap the `finitediff` crate (and a small hand-rolled Jacobian) behind
//! validated, error-aware helpers so the optimizer and the inference layer
//! can request derivatives without re-implementing the error plumbing.
//!
//! Key behaviors
//! -------------
//! - [`run_fd_diff`]: forward-difference gradient of a scalar objective,
//!   surfacing errors captured by the objective closure.
//! - [`compute_hessian`]: central-difference Hessian of a gradient map with
//!   a forward-difference fallback, symmetrized before it is returned.
//! - [`central_jacobian`]: column-wise central differences of a small
//!   vector map; used to chain ARMA coefficient gradients back to the
//!   unconstrained optimizer space.
//!
//! Invariants & assumptions
//! ------------------------
//! - Closures passed to [`run_fd_diff`] cannot return `Result`; they park
//!   the first error in a `RefCell` and return `NaN`.
//! - Everything returned from this module has passed [`validate_grad`] or
//!   [`validate_hessian`].
//!
//! Testing notes
//! -------------
//! - Unit tests cover the closure-error path, non-finite gradients, the
//!   Hessian fallback, symmetrization, and the Jacobian of a linear map.
use crate::optimization::{
    errors::OptResult,
    loglik_optimizer::{
        Grad, Theta,
        types::Hessian,
        validation::{validate_grad, validate_hessian},
    },
};
use argmin::core::Error;
use finitediff::FiniteDiff;
use ndarray::{Array1, Array2, ArrayView1};
use std::cell::RefCell;

/// Forward-difference gradient of `func` at `theta`.
///
/// Clears `closure_err`, differentiates, and returns any error the closure
/// parked there before validating the gradient.
///
/// # Errors
/// - The captured closure error, converted into `OptError`.
/// - `OptError::InvalidGradient` if the result has non-finite entries.
pub fn run_fd_diff<G: Fn(&Theta) -> f64>(
    theta: &Theta, func: &G, closure_err: &RefCell<Option<Error>>,
) -> OptResult<Grad> {
    closure_err.replace(None);
    let fd_grad = theta.forward_diff(func);
    if let Some(err) = closure_err.take() {
        return Err(err.into());
    }
    validate_grad(&fd_grad, theta.len())?;
    Ok(fd_grad)
}

/// Finite-difference Hessian of the gradient map `f` at `theta`.
///
/// Central differences first; if that matrix fails validation, forward
/// differences are tried. The accepted matrix is symmetrized in place.
///
/// # Errors
/// - `OptError::HessianDimMismatch` / `OptError::InvalidHessian` when both
///   approximations fail validation.
pub fn compute_hessian<F: Fn(&Theta) -> Grad>(f: &F, theta: &Theta) -> OptResult<Hessian> {
    let dim = theta.len();
    let mut hess = theta.central_hessian(f);
    if validate_hessian(&hess, dim).is_err() {
        hess = theta.forward_hessian(f);
        validate_hessian(&hess, dim)?;
    }
    symmetrize_hess(&mut hess);
    Ok(hess)
}

/// Central-difference Jacobian `J[i, k] = ∂f_i/∂x_k` of a vector map.
///
/// The step for coordinate `k` is `ε^{1/3}·(1 + |x_k|)`. Intended for the
/// low-dimensional coefficient maps of ARMA models, where `f` is cheap.
pub fn central_jacobian<F: Fn(ArrayView1<f64>) -> Array1<f64>>(
    f: &F, x: ArrayView1<f64>,
) -> Array2<f64> {
    let n = x.len();
    let mut jac = Array2::<f64>::zeros((f(x).len(), n));
    let mut probe = x.to_owned();
    for k in 0..n {
        let h = f64::EPSILON.cbrt() * (1.0 + x[k].abs());
        probe[k] = x[k] + h;
        let up = f(probe.view());
        probe[k] = x[k] - h;
        let down = f(probe.view());
        probe[k] = x[k];
        jac.column_mut(k).assign(&((&up - &down) / (2.0 * h)));
    }
    jac
}

// ---- Helper methods ----

/// Average each off-diagonal pair; the diagonal is left alone.
fn symmetrize_hess(hess: &mut Hessian) {
    for i in 0..hess.nrows() {
        for j in 0..i {
            let avg = 0.5 * (hess[[i, j]] + hess[[j, i]]);
            hess[[i, j]] = avg;
            hess[[j, i]] = avg;
        }
    }
}
