//! optimization — likelihood maximization, coefficient transforms, and errors.
//!
//! Purpose
//! -------
//! Host the estimation backend shared by every ARMA candidate fit: an
//! argmin-backed L-BFGS maximizer for log-likelihoods, the transforms that
//! keep AR/MA coefficients inside the stationary and invertible regions,
//! and the `OptError` surface that normalizes solver and model failures.
//!
//! Key behaviors
//! -------------
//! - `loglik_optimizer`: the [`LogLikelihood`](loglik_optimizer::LogLikelihood)
//!   trait, solver configuration (`MLEOptions`, `Tolerances`), the
//!   `maximize` entry point, and finite-difference helpers.
//! - `numerical_stability`: softplus/logistic guards, the partial
//!   autocorrelation (Durbin–Levinson) coefficient map and its Jacobian,
//!   and shared numeric tolerances.
//! - `errors`: [`OptError`](errors::OptError) and [`OptResult`](errors::OptResult).
//!
//! Invariants & assumptions
//! ------------------------
//! - Optimizers work in an unconstrained space `θ`; the model layer maps
//!   `θ` into coefficients and reports domain violations as `OptError`.
//! - The optimizer always maximizes `ℓ(θ)` by minimizing `c(θ) = −ℓ(θ)`.
//!
//! Conventions
//! -----------
//! - Vectors and matrices are `ndarray` containers over `f64`.
//! - This layer performs no logging; candidate-level logging happens in
//!   `arima::search`.
//!
//! Testing notes
//! -------------
//! - Unit tests live next to each submodule (solver wiring, transforms,
//!   error conversions). The model tests in `arima::models` exercise the
//!   full maximize path on simulated ARMA data.

pub mod errors;
pub mod loglik_optimizer;
pub mod numerical_stability;

// ---- Optional convenience prelude for downstream crates -------------------
//
// Downstream crates can write
//
//     use rust_arima::optimization::prelude::*;
//
// to import the main optimization surface in a single line.

pub mod prelude {
    pub use super::errors::{OptError, OptResult};
    pub use super::loglik_optimizer::prelude::*;
    pub use super::numerical_stability::prelude::*;
}
