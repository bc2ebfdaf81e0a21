//! report — human-readable summary of a search.
//!
//! - [`SearchReport`]: trace, selected order, coefficient table, fit
//!   statistics, and residual diagnostics, rendered through `Display`.
//! - [`ResidualDiagnostics`]: Ljung–Box, Jarque–Bera, and break-variance
//!   tests on the final residuals.

pub mod diagnostics;
pub mod summary;

pub use self::diagnostics::ResidualDiagnostics;
pub use self::summary::{CoefficientRow, SearchReport, coefficient_table};
