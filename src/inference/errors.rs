//! Error type for post-estimation covariance routines.
//!
//! `InferenceError` covers malformed score matrices, information matrices
//! that cannot be inverted reliably, and failures of the finite-difference
//! Hessian borrowed from the optimizer layer. `InferenceResult<T>` is the
//! matching alias.
use crate::optimization::errors::OptError;

#[derive(Debug, Clone, PartialEq)]
pub enum InferenceError {
    // ---- Inputs ----
    /// Score matrix columns must match the parameter dimension.
    ScoreDimMismatch {
        expected: usize,
        found: usize,
    },

    /// Score entries must be finite.
    NonFiniteScore {
        row: usize,
        col: usize,
        value: f64,
    },

    /// At least one observation per parameter is required.
    InsufficientObservations {
        n: usize,
        k: usize,
    },

    // ---- Numerical ----
    /// Reciprocal condition number of the information matrix is too small
    /// (or the matrix is not positive definite).
    SingularInformation {
        rcond: f64,
    },

    /// The observed-information Hessian could not be computed.
    Hessian(OptError),
}

pub type InferenceResult<T> = Result<T, InferenceError>;

impl From<OptError> for InferenceError {
    fn from(err: OptError) -> Self {
        InferenceError::Hessian(err)
    }
}

impl std::error::Error for InferenceError {}

impl std::fmt::Display for InferenceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            // ---- Inputs ----
            InferenceError::ScoreDimMismatch { expected, found } => {
                write!(f, "Inference Error: score matrix has {found} columns, expected {expected}")
            }
            InferenceError::NonFiniteScore { row, col, value } => {
                write!(f, "Inference Error: non-finite score at ({row}, {col}): {value}")
            }
            InferenceError::InsufficientObservations { n, k } => {
                write!(f, "Inference Error: {n} observations for {k} parameters")
            }

            // ---- Numerical ----
            InferenceError::SingularInformation { rcond } => {
                write!(
                    f,
                    "Inference Error: information matrix is near-singular \
                     (reciprocal condition number {rcond:e})"
                )
            }
            InferenceError::Hessian(err) => write!(f, "Inference Error: {err}"),
        }
    }
}

#[cfg(feature = "python-bindings")]
impl From<InferenceError> for pyo3::PyErr {
    fn from(err: InferenceError) -> pyo3::PyErr {
        pyo3::exceptions::PyValueError::new_err(err.to_string())
    }
}
