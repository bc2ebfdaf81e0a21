//! search — automatic selection of `(d, p, q, intercept)`.
//!
//! Purpose
//! -------
//! Turn a raw series into a selected ARIMA order: fix `d` with ADF tests,
//! then walk (or enumerate) ARMA candidates on the differenced series and
//! keep the one with the lowest AIC.
//!
//! Key behaviors
//! -------------
//! - [`AutoArima`] is the entry point; it returns a [`SearchOutcome`].
//! - [`Searcher`] carries the visited set, the [`SearchTrace`], and the
//!   budget checks shared by the stepwise walk and the grid.
//! - Ties in AIC go to the order with fewer ARMA terms.
//!
//! Invariants & assumptions
//! ------------------------
//! - Every candidate is fitted on the same estimation sample, which starts
//!   at `max_p`.
//! - No candidate is fitted twice and none lies outside [`OrderBounds`].
//! - The search is deterministic for a given series and options.

pub mod auto_arima;
pub mod options;
pub mod stepwise;
pub mod trace;

pub use self::auto_arima::{AutoArima, SearchOutcome};
pub use self::options::{
    DifferencingOptions, OrderBounds, SearchBudget, SearchOptions, SearchStrategy,
};
pub use self::stepwise::{Searcher, Termination, neighbours, outranks};
pub use self::trace::{CandidateOutcome, CandidateRecord, SearchTrace};

pub mod prelude {
    pub use super::auto_arima::{AutoArima, SearchOutcome};
    pub use super::options::{
        DifferencingOptions, OrderBounds, SearchBudget, SearchOptions, SearchStrategy,
    };
    pub use super::stepwise::Termination;
    pub use super::trace::SearchTrace;
}
