//! Parameter covariance from scores and observed information.
//!
//! All estimators work on the total log-likelihood scale: `grad` returns
//! `∇ℓ(β)` and `scores` is the `n × k` matrix whose column sums equal that
//! gradient. Inverses go through a symmetric eigendecomposition, and a
//! matrix whose reciprocal condition number falls below [`EIGEN_EPS`] is
//! rejected rather than inverted.
use std::{fmt, str::FromStr};

use crate::{
    inference::errors::{InferenceError, InferenceResult},
    optimization::{loglik_optimizer::compute_hessian, numerical_stability::EIGEN_EPS},
};
use nalgebra::DMatrix;
use ndarray::{Array1, Array2};

/// Covariance estimator used for reported standard errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CovarianceType {
    /// Inverse outer product of per-observation scores.
    #[default]
    Opg,
    /// Inverse of the negative finite-difference Hessian of `ℓ`.
    Oim,
    /// Sandwich `A⁻¹ B A⁻¹` with `A` the observed information and `B` the
    /// score outer product.
    Robust,
}

impl FromStr for CovarianceType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "opg" => Ok(CovarianceType::Opg),
            "oim" => Ok(CovarianceType::Oim),
            "robust" => Ok(CovarianceType::Robust),
            _ => Err(format!(
                "unknown covariance type '{s}'; valid options are 'opg', 'oim', 'robust'"
            )),
        }
    }
}

impl fmt::Display for CovarianceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CovarianceType::Opg => "opg",
            CovarianceType::Oim => "oim",
            CovarianceType::Robust => "robust",
        };
        f.pad(name)
    }
}

/// Covariance of `β̂` under the chosen estimator.
///
/// # Errors
/// - `ScoreDimMismatch`, `NonFiniteScore`, `InsufficientObservations` for
///   malformed scores.
/// - `Hessian` when the finite-difference Hessian fails (`Oim`, `Robust`).
/// - `SingularInformation` when the matrix to invert is ill-conditioned.
pub fn calc_covariance<F: Fn(&Array1<f64>) -> Array1<f64>>(
    kind: CovarianceType, grad: &F, beta_hat: &Array1<f64>, scores: &Array2<f64>,
) -> InferenceResult<Array2<f64>> {
    let k = beta_hat.len();
    validate_scores(scores, k)?;
    match kind {
        CovarianceType::Opg => pinv_checked(&outer_product(scores)),
        CovarianceType::Oim => pinv_checked(&observed_information(grad, beta_hat)?),
        CovarianceType::Robust => {
            let a_inv = pinv_checked(&observed_information(grad, beta_hat)?)?;
            let b = outer_product(scores);
            Ok(a_inv.dot(&b).dot(&a_inv))
        }
    }
}

/// Square roots of the covariance diagonal; negative round-off is clamped
/// to zero.
pub fn standard_errors(cov: &Array2<f64>) -> Array1<f64> {
    cov.diag().mapv(|v| v.max(0.0).sqrt())
}

// ---- Helper methods ----

fn validate_scores(scores: &Array2<f64>, k: usize) -> InferenceResult<()> {
    if scores.ncols() != k {
        return Err(InferenceError::ScoreDimMismatch { expected: k, found: scores.ncols() });
    }
    if scores.nrows() < k {
        return Err(InferenceError::InsufficientObservations { n: scores.nrows(), k });
    }
    if let Some(((row, col), &value)) = scores.indexed_iter().find(|(_, v)| !v.is_finite()) {
        return Err(InferenceError::NonFiniteScore { row, col, value });
    }
    Ok(())
}

/// `Σ_t s_t s_tᵀ`.
fn outer_product(scores: &Array2<f64>) -> Array2<f64> {
    scores.t().dot(scores)
}

/// `−∇²ℓ(β̂)` from central differences of the analytic gradient.
fn observed_information<F: Fn(&Array1<f64>) -> Array1<f64>>(
    grad: &F, beta_hat: &Array1<f64>,
) -> InferenceResult<Array2<f64>> {
    let hess = compute_hessian(grad, beta_hat)?;
    Ok(-hess)
}

fn fill_dmatrix(src: &Array2<f64>) -> DMatrix<f64> {
    let n = src.nrows();
    let mut out = DMatrix::<f64>::zeros(n, n);
    for i in 0..n {
        out[(i, i)] = src[[i, i]];
        for j in 0..i {
            let avg = 0.5 * (src[[i, j]] + src[[j, i]]);
            out[(i, j)] = avg;
            out[(j, i)] = avg;
        }
    }
    out
}

/// Eigen-based inverse of a symmetric positive definite matrix.
///
/// Fails when the smallest eigenvalue over the largest is below
/// [`EIGEN_EPS`], which also catches indefinite matrices.
fn pinv_checked(info: &Array2<f64>) -> InferenceResult<Array2<f64>> {
    let n = info.nrows();
    let eigen = fill_dmatrix(info).symmetric_eigen();
    let max_eig = eigen.eigenvalues.max();
    let min_eig = eigen.eigenvalues.min();
    let rcond = if max_eig > 0.0 { min_eig / max_eig } else { f64::NEG_INFINITY };
    if !rcond.is_finite() || rcond < EIGEN_EPS {
        return Err(InferenceError::SingularInformation { rcond });
    }
    let q = eigen.eigenvectors;
    let mut inv = Array2::<f64>::zeros((n, n));
    for (k, &lambda) in eigen.eigenvalues.iter().enumerate() {
        for i in 0..n {
            let coeff = q[(i, k)] / lambda;
            for j in 0..n {
                inv[[i, j]] += coeff * q[(j, k)];
            }
        }
    }
    Ok(inv)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use ndarray::array;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - OPG, OIM, and sandwich covariances on problems with closed forms.
    // - Rejection of singular information and malformed scores.
    // - Parsing and display of `CovarianceType`.
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // OPG inverts Σ s sᵀ.
    //
    // Given
    // -----
    // - Scores whose outer product is diag(8, 2).
    //
    // Expect
    // ------
    // - Covariance diag(1/8, 1/2) and matching standard errors.
    fn opg_inverts_score_outer_product() {
        // Arrange
        let scores = array![[2.0, 1.0], [-2.0, 1.0]];
        let grad = |b: &Array1<f64>| b.clone();
        let beta = array![0.0, 0.0];

        // Act
        let cov = calc_covariance(CovarianceType::Opg, &grad, &beta, &scores).unwrap();
        let se = standard_errors(&cov);

        // Assert
        assert_abs_diff_eq!(cov[[0, 0]], 0.125, epsilon = 1e-12);
        assert_abs_diff_eq!(cov[[1, 1]], 0.5, epsilon = 1e-12);
        assert_abs_diff_eq!(cov[[0, 1]], 0.0, epsilon = 1e-12);
        assert_abs_diff_eq!(se[1], 0.5_f64.sqrt(), epsilon = 1e-12);
    }

    #[test]
    // Purpose
    // -------
    // OIM inverts the negative Hessian, and the sandwich collapses to it
    // when B equals A.
    //
    // Given
    // -----
    // - ℓ(β) = −½ βᵀAβ with A = [[4, 1], [1, 2]], so ∇ℓ = −Aβ.
    // - Scores with Σ s sᵀ = A (Cholesky rows of A).
    //
    // Expect
    // ------
    // - OIM ≈ A⁻¹ and Robust ≈ A⁻¹.
    fn oim_and_robust_match_inverse_information() {
        // Arrange
        let a = array![[4.0, 1.0], [1.0, 2.0]];
        let grad = |b: &Array1<f64>| -a.dot(b);
        let beta = array![0.1, -0.2];
        let l11 = 2.0;
        let l21 = 0.5;
        let l22 = (2.0_f64 - 0.25).sqrt();
        let scores = array![[l11, l21], [0.0, l22]];
        let det = 4.0 * 2.0 - 1.0;
        let a_inv = array![[2.0 / det, -1.0 / det], [-1.0 / det, 4.0 / det]];

        // Act
        let oim = calc_covariance(CovarianceType::Oim, &grad, &beta, &scores).unwrap();
        let robust = calc_covariance(CovarianceType::Robust, &grad, &beta, &scores).unwrap();

        // Assert
        for ((i, j), &v) in a_inv.indexed_iter() {
            assert_abs_diff_eq!(oim[[i, j]], v, epsilon = 1e-6);
            assert_abs_diff_eq!(robust[[i, j]], v, epsilon = 1e-6);
        }
    }

    #[test]
    // Purpose
    // -------
    // Collinear scores give a singular OPG matrix, which is reported.
    //
    // Given
    // -----
    // - Two identical score columns.
    //
    // Expect
    // ------
    // - `SingularInformation`.
    fn singular_information_is_rejected() {
        // Arrange
        let scores = array![[1.0, 1.0], [2.0, 2.0], [-1.0, -1.0]];
        let grad = |b: &Array1<f64>| b.clone();
        let beta = array![0.0, 0.0];

        // Act
        let err = calc_covariance(CovarianceType::Opg, &grad, &beta, &scores).unwrap_err();

        // Assert
        assert!(matches!(err, InferenceError::SingularInformation { .. }));
    }

    #[test]
    // Purpose
    // -------
    // Malformed score matrices are rejected before any algebra.
    //
    // Given
    // -----
    // - A 2×3 score matrix for a 2-parameter model.
    // - A 2×2 score matrix holding NaN at (1, 0).
    //
    // Expect
    // ------
    // - `ScoreDimMismatch`, then `NonFiniteScore { row: 1, col: 0, .. }`.
    fn malformed_scores_are_rejected() {
        // Arrange
        let grad = |b: &Array1<f64>| b.clone();
        let beta = array![0.0, 0.0];
        let wide = Array2::<f64>::ones((2, 3));
        let nan = array![[1.0, 0.0], [f64::NAN, 1.0]];

        // Act + Assert
        assert_eq!(
            calc_covariance(CovarianceType::Opg, &grad, &beta, &wide).unwrap_err(),
            InferenceError::ScoreDimMismatch { expected: 2, found: 3 }
        );
        assert!(matches!(
            calc_covariance(CovarianceType::Opg, &grad, &beta, &nan).unwrap_err(),
            InferenceError::NonFiniteScore { row: 1, col: 0, .. }
        ));
    }

    #[test]
    // Purpose
    // -------
    // Covariance types parse case-insensitively and display in lower case.
    //
    // Given
    // -----
    // - "OPG", "Robust", and an unknown name.
    //
    // Expect
    // ------
    // - Parsed variants, a round-tripped display, and an error message.
    fn covariance_type_parses_and_displays() {
        assert_eq!("OPG".parse::<CovarianceType>(), Ok(CovarianceType::Opg));
        assert_eq!("Robust".parse::<CovarianceType>(), Ok(CovarianceType::Robust));
        assert_eq!(CovarianceType::Oim.to_string(), "oim");
        assert!("hac".parse::<CovarianceType>().is_err());
        assert_eq!(CovarianceType::default(), CovarianceType::Opg);
    }
}
