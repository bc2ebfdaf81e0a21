//! models — the per-candidate ARMA(p, q) model and its inference helpers.
//!
//! Purpose
//! -------
//! Fit one fixed order by conditional maximum likelihood and return an
//! [`ArmaFit`] with everything the search and the report need: estimates,
//! log-likelihood, information criteria, covariance, and residuals.
//!
//! Key behaviors
//! -------------
//! - [`ArimaModel`] implements [`LogLikelihood`] (average scale, analytic
//!   gradient) and provides `fit` and `forecast`.
//! - [`model_internals`] wires the recursions to the scratch buffers,
//!   chains β-space gradients into optimizer space, and builds the
//!   per-observation score matrix used by the OPG and sandwich covariances.
//!
//! Invariants & assumptions
//! ------------------------
//! - The input is the differenced series `w`; `d` is handled by the search.
//! - Scratch buffers are single-owner; an `ArimaModel` is not shared
//!   across threads.
//!
//! [`LogLikelihood`]: crate::optimization::loglik_optimizer::LogLikelihood

pub mod arima;
pub mod model_internals;

pub use self::arima::{ArimaModel, ArmaFit};

pub mod prelude {
    pub use super::arima::{ArimaModel, ArmaFit};
}
