//! statistical_tests — unit-root and residual diagnostic tests.
//!
//! Purpose
//! -------
//! Provide the hypothesis tests the ARIMA search needs: the augmented
//! Dickey–Fuller test that fixes the differencing order, and the residual
//! diagnostics printed in the model summary.
//!
//! Key behaviors
//! -------------
//! - [`AdfOutcome::adfuller`]: ADF with a constant, AIC lag selection, and
//!   MacKinnon p-values / critical values ([`mackinnon`]).
//! - [`LjungBoxOutcome::ljung_box`]: residual autocorrelation.
//! - [`JarqueBeraOutcome::jarque_bera`]: residual normality, with skew and
//!   kurtosis.
//! - [`BreakVarianceOutcome::break_variance`]: first-third vs last-third
//!   variance ratio.
//!
//! Conventions
//! -----------
//! - Every test validates its input through [`validation::validate_series`]
//!   and reports failures as [`TestError`].
//! - Outcomes are small `Copy` value objects with accessor methods.
//! - Reference distributions come from `statrs`.

pub mod adf;
pub mod errors;
pub mod heteroskedasticity;
pub mod jarque_bera;
pub mod ljung_box;
pub mod mackinnon;
pub mod validation;

pub use self::adf::AdfOutcome;
pub use self::errors::{TestError, TestResult};
pub use self::heteroskedasticity::BreakVarianceOutcome;
pub use self::jarque_bera::JarqueBeraOutcome;
pub use self::ljung_box::LjungBoxOutcome;
pub use self::mackinnon::{CriticalValues, mackinnon_critical_values, mackinnon_p_value};
pub use self::validation::validate_series;

// Downstream code can write
//
//     use rust_arima::statistical_tests::prelude::*;
//
// to import the test surface in one line.

pub mod prelude {
    pub use super::adf::AdfOutcome;
    pub use super::errors::{TestError, TestResult};
    pub use super::heteroskedasticity::BreakVarianceOutcome;
    pub use super::jarque_bera::JarqueBeraOutcome;
    pub use super::ljung_box::LjungBoxOutcome;
}
