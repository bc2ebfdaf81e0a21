//! inference — standard errors for fitted ARMA models.
//!
//! Purpose
//! -------
//! Turn per-observation scores and the analytic gradient at `β̂` into a
//! parameter covariance matrix on the model scale `[μ?, φ, θ, σ²]`.
//!
//! Key behaviors
//! -------------
//! - [`CovarianceType`] selects OPG (default), observed information, or a
//!   sandwich estimator.
//! - [`calc_covariance`] validates the scores, builds the matrix to invert,
//!   and refuses ill-conditioned information.
//! - [`standard_errors`] reads the diagonal.
//!
//! Conventions
//! -----------
//! - Scores and gradients are on the total log-likelihood scale (not
//!   averaged), so no extra `1/n` factors appear in the covariance.
//! - Pure functions: no logging, no global state.

pub mod covariance;
pub mod errors;

pub use self::covariance::{CovarianceType, calc_covariance, standard_errors};
pub use self::errors::{InferenceError, InferenceResult};

pub mod prelude {
    pub use super::covariance::{CovarianceType, calc_covariance, standard_errors};
    pub use super::errors::{InferenceError, InferenceResult};
}
