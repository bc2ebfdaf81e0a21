//! numerical_stability — stable transforms between optimizer and model space.
//!
//! Purpose
//! -------
//! Keep σ² positive and AR/MA polynomials stationary/invertible while the
//! optimizer moves freely in ℝⁿ, and share the small tolerances used by the
//! optimizer and inference layers.
//!
//! Conventions
//! -----------
//! - σ² = `safe_softplus(s)`; `∂σ²/∂s = safe_logistic(s)`.
//! - φ = `constrain_stationary(u_φ)`, θ = −`constrain_stationary(u_θ)`, so
//!   the MA polynomial `1 + θ₁z + …` is invertible whenever the AR-style
//!   polynomial built from the same partial autocorrelations is stationary.
//! - Pure functions only; no logging, no I/O.

pub mod transformations;

pub use self::transformations::{
    EIGEN_EPS, GENERAL_TOL, STATIONARITY_MARGIN, constrain_stationary, safe_logistic,
    safe_softplus, safe_softplus_inv, stationary_jacobian,
};

pub mod prelude {
    pub use super::transformations::{
        EIGEN_EPS, GENERAL_TOL, constrain_stationary, safe_logistic, safe_softplus,
        safe_softplus_inv, stationary_jacobian,
    };
}
