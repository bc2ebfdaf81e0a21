//! Error type shared by the unit-root and residual diagnostic tests.
//!
//! Every test validates its input series up front, so most failures are
//! about the data (too short, non-finite, degenerate) rather than about the
//! arithmetic. `TestResult<T>` is the matching alias.
#[cfg(feature = "python-bindings")]
use pyo3::{PyErr, exceptions::PyValueError};

pub type TestResult<T> = Result<T, TestError>;

/// Errors raised by the tests in [`crate::statistical_tests`].
///
/// Implements [`std::error::Error`] and [`std::fmt::Display`]; with the
/// `python-bindings` feature it converts into a Python `ValueError`.
#[derive(Debug, Clone, PartialEq)]
pub enum TestError {
    /// The series is shorter than the test needs.
    InsufficientData { len: usize, required: usize },

    /// The series contains a NaN or infinity at `index`.
    InvalidData { index: usize, value: f64 },

    /// Requested lag is zero, too large, or leaves no degrees of freedom.
    InvalidLag { lag: usize, reason: &'static str },

    /// The test regression has a singular design matrix.
    SingularRegression,

    /// The series (or a subsample) has zero variance.
    ZeroVariance,

    /// A reference distribution could not be constructed.
    InvalidDistribution { reason: String },
}

impl std::error::Error for TestError {}

impl std::fmt::Display for TestError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TestError::InsufficientData { len, required } => {
                write!(f, "Need at least {required} observations, got {len}.")
            }
            TestError::InvalidData { index, value } => {
                write!(f, "Invalid data value {value} at index {index}. Must be a finite number.")
            }
            TestError::InvalidLag { lag, reason } => write!(f, "Invalid lag {lag}: {reason}"),
            TestError::SingularRegression => {
                write!(f, "Test regression design matrix is singular.")
            }
            TestError::ZeroVariance => write!(f, "Series has zero variance."),
            TestError::InvalidDistribution { reason } => {
                write!(f, "Could not build reference distribution: {reason}")
            }
        }
    }
}

#[cfg(feature = "python-bindings")]
impl From<TestError> for PyErr {
    fn from(err: TestError) -> PyErr {
        PyValueError::new_err(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover `Display` formatting and payload embedding.
    //
    // They intentionally DO NOT cover:
    // - The `From<TestError> for PyErr` conversion, which needs the Python
    //   C API and belongs in Python-level tests.
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // Payload values appear in the rendered messages.
    //
    // Given
    // -----
    // - `InsufficientData { len: 3, required: 10 }` and
    //   `InvalidData { index: 4, value: NaN }`.
    //
    // Expect
    // ------
    // - Both numbers appear; the NaN index appears.
    fn display_embeds_payloads() {
        let short = TestError::InsufficientData { len: 3, required: 10 }.to_string();
        let bad = TestError::InvalidData { index: 4, value: f64::NAN }.to_string();

        assert!(short.contains('3') && short.contains("10"));
        assert!(bad.contains("index 4"));
    }
}
