//! core — ARMA data, orders, parameters, and recursions.
//!
//! Purpose
//! -------
//! Collect the building blocks shared by the per-candidate model and the
//! order search: validated series, candidate orders, the parameter maps
//! between optimizer and coefficient space, the innovation recursion with
//! its analytic derivatives, information criteria, differencing, and
//! forecasting.
//!
//! Key behaviors
//! -------------
//! - [`ArimaData`] and [`CandidateOrder`] / [`ArimaOrder`] describe what is
//!   fitted.
//! - [`ArimaParams`] maps optimizer vectors to stationary, invertible
//!   coefficients; [`ArimaScratch`] holds the reusable buffers.
//! - [`recursion`] computes innovations, the conditional Gaussian
//!   log-likelihood, `∂e/∂β`, gradients, and per-observation scores.
//! - [`determine_differencing`] picks `d`; [`difference`] and [`integrate`]
//!   move between levels and differences.
//! - [`forecast_recursion`] rolls the fitted model forward.
//!
//! Conventions
//! -----------
//! - Indexing is 0-based; lag blocks are ordered oldest first, newest last.
//! - Coefficient vectors are laid out `[μ? | φ | θ | σ²]` everywhere.
//! - Nothing here logs except [`determine_differencing`], which reports each
//!   ADF step at debug level.

pub mod criteria;
pub mod data;
pub mod differencing;
pub mod forecasts;
pub mod options;
pub mod order;
pub mod params;
pub mod recursion;

pub use self::criteria::InformationCriteria;
pub use self::data::ArimaData;
pub use self::differencing::{
    DifferencingOutcome, determine_differencing, difference, integrate, is_constant,
};
pub use self::forecasts::forecast_recursion;
pub use self::options::ArimaOptions;
pub use self::order::{ArimaOrder, CandidateOrder};
pub use self::params::{ArimaParams, ArimaScratch};

pub mod prelude {
    pub use super::criteria::InformationCriteria;
    pub use super::data::ArimaData;
    pub use super::options::ArimaOptions;
    pub use super::order::{ArimaOrder, CandidateOrder};
    pub use super::params::ArimaParams;
}
