//! arima — automatic ARIMA(p, d, q) selection.
//!
//! Purpose
//! -------
//! Choose the differencing order of a price-like series with ADF tests,
//! search ARMA orders on the differenced series by AIC, and report the
//! selected model with standard errors and residual diagnostics.
//!
//! Key behaviors
//! -------------
//! - [`core`]: data, orders, parameter maps, recursions, differencing,
//!   information criteria, and forecasting.
//! - [`models`]: the per-candidate [`ArimaModel`] fitted by conditional
//!   maximum likelihood into an [`ArmaFit`].
//! - [`search`]: [`AutoArima`], the stepwise walk and the grid, the budget,
//!   and the [`SearchTrace`].
//! - [`report`]: the text summary.
//!
//! Invariants & assumptions
//! ------------------------
//! - Candidates are fitted on the differenced series; `d` never enters the
//!   likelihood.
//! - Every fit in one search shares the estimation sample, so AICs compare.
//!
//! Downstream usage
//! ----------------
//! ```no_run
//! use ndarray::Array1;
//! use rust_arima::arima::{AutoArima, SearchOptions};
//!
//! let series: Array1<f64> = Array1::zeros(0); // your price series
//! let outcome = AutoArima::new(SearchOptions::default()).fit(&series)?;
//! println!("{}", outcome.summary());
//! # Ok::<(), rust_arima::arima::ArimaError>(())
//! ```

pub mod core;
pub mod errors;
pub mod models;
pub mod report;
pub mod search;

pub use self::core::{ArimaData, ArimaOptions, ArimaOrder, ArimaParams, CandidateOrder};
pub use self::errors::{ArimaError, ArimaResult, ParamError, ParamResult};
pub use self::models::{ArimaModel, ArmaFit};
pub use self::report::{ResidualDiagnostics, SearchReport};
pub use self::search::{
    AutoArima, DifferencingOptions, OrderBounds, SearchBudget, SearchOptions, SearchOutcome,
    SearchStrategy, SearchTrace, Termination,
};

pub mod prelude {
    pub use super::core::prelude::*;
    pub use super::errors::{ArimaError, ArimaResult};
    pub use super::models::prelude::*;
    pub use super::search::prelude::*;
}
