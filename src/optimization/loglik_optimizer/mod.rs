//! loglik_optimizer — argmin-backed maximizer for ARMA log-likelihoods.
//!
//! Purpose
//! -------
//! Turn a model that can evaluate `ℓ(θ)` (and optionally `∇ℓ(θ)`) into a
//! maximum-likelihood estimate. Models implement [`LogLikelihood`]; callers
//! invoke [`maximize`] with an [`MLEOptions`] and read an [`OptimOutcome`].
//!
//! Key behaviors
//! -------------
//! - [`adapter::ArgMinAdapter`] exposes `c(θ) = −ℓ(θ)` to argmin and fills in
//!   finite-difference gradients when a model has none.
//! - [`builders`] constructs L-BFGS with the configured line search and
//!   tolerances; [`run::run_lbfgs`] executes it and normalizes the state.
//! - [`finite_diff`] provides validated gradient, Hessian, and Jacobian
//!   approximations that the inference layer reuses.
//!
//! Conventions
//! -----------
//! - Parameters live in unconstrained space. Mapping to stationary AR/MA
//!   coefficients and a positive variance happens in the model layer.
//! - [`OptimOutcome::value`] is reported on the log-likelihood scale.
//! - Every failure is an [`OptError`](crate::optimization::errors::OptError);
//!   nothing here panics on bad numerical input.
//!
//! Testing notes
//! -------------
//! - Unit tests live next to each submodule.
//! - `tests/integration_arima_search.rs` drives [`maximize`] through full
//!   ARMA fits.

pub mod adapter;
pub mod api;
pub mod builders;
pub mod finite_diff;
pub mod run;
pub mod traits;
pub mod types;
pub mod validation;

pub use self::api::maximize;
pub use self::finite_diff::{central_jacobian, compute_hessian};
pub use self::traits::{LineSearcher, LogLikelihood, MLEOptions, OptimOutcome, Tolerances};
pub use self::types::{Cost, DEFAULT_LBFGS_MEM, FnEvalMap, Grad, Theta};

// Downstream code can write
//
//     use rust_arima::optimization::loglik_optimizer::prelude::*;
//
// to pull in the optimizer surface in one line.

pub mod prelude {
    pub use super::api::maximize;
    pub use super::traits::{LineSearcher, LogLikelihood, MLEOptions, OptimOutcome, Tolerances};
    pub use super::types::{Cost, Grad, Theta};
}
