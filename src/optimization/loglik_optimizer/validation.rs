//! Shared sanity checks for the optimizer boundary.
//!
//! Tolerances are checked when options are built; gradients, estimates,
//! objective values, and Hessians are checked whenever they cross from
//! numerical code back into the crate. Every failure is an [`OptError`].
use crate::optimization::{
    errors::{OptError, OptResult},
    loglik_optimizer::{Grad, Theta, types::Hessian},
};

/// Gradient tolerance must be finite and strictly positive when set.
pub fn verify_tol_grad(tol: Option<f64>) -> OptResult<()> {
    if let Some(tol) = tol {
        if !tol.is_finite() {
            return Err(OptError::InvalidTolGrad { tol, reason: "Tolerance must be finite." });
        }
        if tol <= 0.0 {
            return Err(OptError::InvalidTolGrad { tol, reason: "Tolerance must be positive." });
        }
    }
    Ok(())
}

/// Cost-change tolerance must be finite and strictly positive when set.
pub fn verify_tol_cost(tol: Option<f64>) -> OptResult<()> {
    if let Some(tol) = tol {
        if !tol.is_finite() {
            return Err(OptError::InvalidTolCost { tol, reason: "Tolerance must be finite." });
        }
        if tol <= 0.0 {
            return Err(OptError::InvalidTolCost { tol, reason: "Tolerance must be positive." });
        }
    }
    Ok(())
}

/// Gradient must have length `dim` and only finite entries.
pub fn validate_grad(grad: &Grad, dim: usize) -> OptResult<()> {
    if grad.len() != dim {
        return Err(OptError::GradientDimMismatch { expected: dim, found: grad.len() });
    }
    match grad.iter().position(|v| !v.is_finite()) {
        Some(index) => Err(OptError::InvalidGradient {
            index,
            value: grad[index],
            reason: "Gradient elements must be finite.",
        }),
        None => Ok(()),
    }
}

/// Unwrap the solver's best parameter vector, rejecting non-finite entries.
pub fn validate_theta_hat(theta_hat: Option<Theta>) -> OptResult<Theta> {
    let theta = theta_hat.ok_or(OptError::MissingThetaHat)?;
    if let Some(index) = theta.iter().position(|v| !v.is_finite()) {
        return Err(OptError::InvalidThetaHat {
            index,
            value: theta[index],
            reason: "Parameter estimates must be finite.",
        });
    }
    Ok(theta)
}

pub fn validate_value(value: f64) -> OptResult<()> {
    if !value.is_finite() {
        return Err(OptError::NonFiniteCost { value });
    }
    Ok(())
}

/// Hessian must be `dim × dim` with finite entries.
pub fn validate_hessian(hessian: &Hessian, dim: usize) -> OptResult<()> {
    if hessian.nrows() != dim || hessian.ncols() != dim {
        return Err(OptError::HessianDimMismatch {
            expected: dim,
            found: (hessian.nrows(), hessian.ncols()),
        });
    }
    for ((row, col), &value) in hessian.indexed_iter() {
        if !value.is_finite() {
            return Err(OptError::InvalidHessian { row, col, value });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{Array2, array};

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover the error branches of each validator and the
    // index reported for the first offending entry.
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // `validate_grad` reports dimension problems before value problems and
    // points at the first non-finite entry.
    //
    // Given
    // -----
    // - A length-2 gradient checked against `dim = 3`.
    // - A gradient `[1, NaN, inf]` checked against `dim = 3`.
    //
    // Expect
    // ------
    // - `GradientDimMismatch`, then `InvalidGradient { index: 1, .. }`.
    fn validate_grad_reports_dimension_then_first_bad_index() {
        // Arrange
        let short = array![1.0, 2.0];
        let bad = array![1.0, f64::NAN, f64::INFINITY];

        // Act + Assert
        assert_eq!(
            validate_grad(&short, 3),
            Err(OptError::GradientDimMismatch { expected: 3, found: 2 })
        );
        assert!(matches!(validate_grad(&bad, 3), Err(OptError::InvalidGradient { index: 1, .. })));
    }

    #[test]
    // Purpose
    // -------
    // `validate_theta_hat` distinguishes a missing vector from a bad one.
    //
    // Given
    // -----
    // - `None` and `Some([0, -inf])`.
    //
    // Expect
    // ------
    // - `MissingThetaHat` and `InvalidThetaHat { index: 1, .. }`.
    fn validate_theta_hat_handles_missing_and_non_finite() {
        // Act + Assert
        assert_eq!(validate_theta_hat(None), Err(OptError::MissingThetaHat));
        assert!(matches!(
            validate_theta_hat(Some(array![0.0, f64::NEG_INFINITY])),
            Err(OptError::InvalidThetaHat { index: 1, .. })
        ));
    }

    #[test]
    // Purpose
    // -------
    // `validate_hessian` checks shape and finiteness.
    //
    // Given
    // -----
    // - A 2×3 matrix and a 2×2 matrix holding a NaN at (1, 0).
    //
    // Expect
    // ------
    // - `HessianDimMismatch`, then `InvalidHessian { row: 1, col: 0, .. }`.
    fn validate_hessian_checks_shape_and_entries() {
        // Arrange
        let wrong_shape = Array2::<f64>::zeros((2, 3));
        let mut nan_entry = Array2::<f64>::eye(2);
        nan_entry[[1, 0]] = f64::NAN;

        // Act + Assert
        assert!(matches!(
            validate_hessian(&wrong_shape, 2),
            Err(OptError::HessianDimMismatch { expected: 2, found: (2, 3) })
        ));
        assert!(matches!(
            validate_hessian(&nan_entry, 2),
            Err(OptError::InvalidHessian { row: 1, col: 0, .. })
        ));
    }
}
