//! Error types for the ARIMA model and order search.
//!
//! - [`ArimaError`]: everything that can go wrong between receiving a series
//!   and returning a selected model. Per-candidate fit failures are also
//!   `ArimaError`s; the search records them instead of propagating.
//! - [`ParamError`]: invalid parameter vectors or recursions. These arise
//!   inside optimizer callbacks and travel through `OptError`.
#[cfg(feature = "python-bindings")]
use pyo3::{PyErr, exceptions::PyValueError};

use crate::{
    inference::errors::InferenceError, optimization::errors::OptError,
    statistical_tests::errors::TestError,
};

pub type ArimaResult<T> = Result<T, ArimaError>;

pub type ParamResult<T> = Result<T, ParamError>;

#[derive(Debug, Clone, PartialEq)]
pub enum ArimaError {
    // ---- Input data ----
    EmptySeries,

    NonFiniteData { index: usize, value: f64 },

    T0OutOfRange { t0: usize, len: usize },

    /// Too few observations for the requested orders.
    SeriesTooShort { len: usize, required: usize },

    /// The (differenced) series has no variation to model.
    ConstantSeries { d: usize },

    // ---- Options ----
    InvalidOrderBounds { reason: &'static str },

    InvalidAlpha { alpha: f64 },

    InvalidBudget { reason: &'static str },

    InvalidHorizon { horizon: usize },

    InvalidStrategy { name: String },

    // ---- Differencing ----
    /// The series is still non-stationary at `max_d`.
    DifferencingUndetermined { max_d: usize, last_pvalue: f64 },

    StationarityTest(TestError),

    // ---- Fitting ----
    NotConverged { status: String },

    SingularCovariance { rcond: f64 },

    Inference(InferenceError),

    Optimization(OptError),

    Param(ParamError),

    ModelNotFitted,

    // ---- Search ----
    /// No candidate produced a valid fit.
    NoViableCandidate { attempted: usize },
}

impl std::error::Error for ArimaError {}

impl std::fmt::Display for ArimaError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            // ---- Input data ----
            ArimaError::EmptySeries => write!(f, "Input series is empty."),
            ArimaError::NonFiniteData { index, value } => {
                write!(f, "Data point at index {index} is non-finite: {value}")
            }
            ArimaError::T0OutOfRange { t0, len } => {
                write!(f, "Burn-in t0 ({t0}) exceeds series length ({len}).")
            }
            ArimaError::SeriesTooShort { len, required } => {
                write!(f, "Series has {len} observations; at least {required} are required.")
            }
            ArimaError::ConstantSeries { d } => {
                write!(f, "Series is constant after differencing {d} time(s).")
            }

            // ---- Options ----
            ArimaError::InvalidOrderBounds { reason } => {
                write!(f, "Invalid order bounds: {reason}")
            }
            ArimaError::InvalidAlpha { alpha } => {
                write!(f, "Significance level must lie in (0, 1); got: {alpha}")
            }
            ArimaError::InvalidBudget { reason } => write!(f, "Invalid search budget: {reason}"),
            ArimaError::InvalidHorizon { horizon } => {
                write!(f, "Forecast horizon must be positive; got: {horizon}")
            }
            ArimaError::InvalidStrategy { name } => write!(
                f,
                "Unknown search strategy '{name}'. Valid options are case insensitive \
                 'stepwise' or 'grid'."
            ),

            // ---- Differencing ----
            ArimaError::DifferencingUndetermined { max_d, last_pvalue } => write!(
                f,
                "Could not determine differencing order: series is non-stationary at \
                 d = {max_d} (ADF p-value {last_pvalue:.4})."
            ),
            ArimaError::StationarityTest(err) => write!(f, "Stationarity test failed: {err}"),

            // ---- Fitting ----
            ArimaError::NotConverged { status } => {
                write!(f, "Optimizer did not converge: {status}")
            }
            ArimaError::SingularCovariance { rcond } => write!(
                f,
                "Parameter covariance is near-singular (reciprocal condition number {rcond:e})."
            ),
            ArimaError::Inference(err) => write!(f, "{err}"),
            ArimaError::Optimization(err) => write!(f, "Optimization failed: {err}"),
            ArimaError::Param(err) => write!(f, "{err}"),
            ArimaError::ModelNotFitted => write!(f, "Model has not been fitted yet."),

            // ---- Search ----
            ArimaError::NoViableCandidate { attempted } => {
                write!(f, "No viable model: all {attempted} candidate fit(s) failed.")
            }
        }
    }
}

impl From<TestError> for ArimaError {
    fn from(err: TestError) -> Self {
        ArimaError::StationarityTest(err)
    }
}

impl From<OptError> for ArimaError {
    fn from(err: OptError) -> Self {
        ArimaError::Optimization(err)
    }
}

impl From<ParamError> for ArimaError {
    fn from(err: ParamError) -> Self {
        ArimaError::Param(err)
    }
}

impl From<InferenceError> for ArimaError {
    fn from(err: InferenceError) -> Self {
        match err {
            InferenceError::SingularInformation { rcond } => {
                ArimaError::SingularCovariance { rcond }
            }
            other => ArimaError::Inference(other),
        }
    }
}

#[cfg(feature = "python-bindings")]
impl From<ArimaError> for PyErr {
    fn from(err: ArimaError) -> PyErr {
        PyValueError::new_err(err.to_string())
    }
}

/// Invalid ARMA parameters or recursion state.
#[derive(Debug, Clone, PartialEq)]
pub enum ParamError {
    /// θ length disagrees with the candidate order.
    ThetaLengthMismatch { expected: usize, actual: usize },

    InvalidThetaInput { index: usize, value: f64 },

    /// `which` names the block: "ar", "ma", or "coefficients".
    CoefficientLengthMismatch { which: &'static str, expected: usize, actual: usize },

    InvalidVariance { value: f64 },

    NonFiniteResidual { t: usize, value: f64 },
}

impl std::error::Error for ParamError {}

impl std::fmt::Display for ParamError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParamError::ThetaLengthMismatch { expected, actual } => {
                write!(f, "Theta must have length {expected}; got {actual}.")
            }
            ParamError::InvalidThetaInput { index, value } => {
                write!(f, "Theta entry {index} must be finite; got {value}.")
            }
            ParamError::CoefficientLengthMismatch { which, expected, actual } => {
                write!(f, "Expected {expected} {which} coefficient(s); got {actual}.")
            }
            ParamError::InvalidVariance { value } => {
                write!(f, "Innovation variance must be finite and > 0; got {value}.")
            }
            ParamError::NonFiniteResidual { t, value } => {
                write!(f, "Residual at t = {t} is non-finite: {value}")
            }
        }
    }
}
