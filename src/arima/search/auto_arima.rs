//! Automatic ARIMA order selection by AIC.
//!
//! Purpose
//! -------
//! Take a raw series, fix the differencing order `d` by repeated ADF tests,
//! then search `(p, q, intercept)` on the differenced series and return the
//! lowest-AIC fit together with the full search trace.
//!
//! Key behaviors
//! -------------
//! - `d` is chosen once, before any candidate is fitted, and never revisited.
//! - All candidates share one estimation sample: the first `max_p`
//!   differenced observations only seed the recursions. Their AICs are
//!   therefore directly comparable.
//! - Failed candidate fits are logged at warn level, kept in the trace with
//!   their reason, and otherwise ignored.
//!
//! Errors
//! ------
//! Input problems (empty, non-finite, too short, constant after
//! differencing), an undetermined `d`, and a search in which every
//! candidate failed are fatal.
use crate::arima::{
    core::{
        data::ArimaData,
        differencing::{
            DifferencingOutcome, determine_differencing, difference, integrate, is_constant,
        },
        order::ArimaOrder,
    },
    errors::{ArimaError, ArimaResult},
    models::arima::ArmaFit,
    search::{
        options::{SearchOptions, SearchStrategy},
        stepwise::{Searcher, Termination},
        trace::SearchTrace,
    },
};
use ndarray::Array1;
use std::time::Duration;

/// Order search front end.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AutoArima {
    pub options: SearchOptions,
}

impl AutoArima {
    pub fn new(options: SearchOptions) -> Self {
        AutoArima { options }
    }

    /// Smallest differenced length that leaves every candidate more
    /// observations than parameters: `n − max_p > max_p + max_q + 2`.
    pub fn min_differenced_len(&self) -> usize {
        let b = &self.options.bounds;
        2 * b.max_p + b.max_q + 3
    }

    /// Run differencing and the order search on `series` (levels).
    ///
    /// Errors
    /// ------
    /// - `EmptySeries`, `NonFiniteData` for invalid input.
    /// - `InvalidAlpha`, `StationarityTest`, `DifferencingUndetermined` from
    ///   the differencing stage.
    /// - `ConstantSeries { d }` when the differenced series is constant.
    /// - `SeriesTooShort` when it is shorter than
    ///   [`AutoArima::min_differenced_len`].
    /// - `NoViableCandidate` when every attempted fit failed.
    pub fn fit(&self, series: &Array1<f64>) -> ArimaResult<SearchOutcome> {
        let levels = ArimaData::new(series.clone(), None)?;
        let opts = &self.options;
        let required = self.min_differenced_len();
        if levels.len() < required {
            return Err(ArimaError::SeriesTooShort { len: levels.len(), required });
        }

        let differencing = match opts.differencing.fixed_d {
            Some(d) => DifferencingOutcome {
                d,
                series: difference(levels.data.view(), d),
                tests: Vec::new(),
            },
            None => determine_differencing(
                levels.data.view(),
                opts.differencing.alpha,
                opts.differencing.max_d,
                opts.differencing.adf_lag,
            )?,
        };
        let d = differencing.d;
        log::info!("differencing order d = {d} ({} ADF test(s))", differencing.tests.len());

        let w = &differencing.series;
        if w.len() < required {
            return Err(ArimaError::SeriesTooShort { len: w.len(), required });
        }
        if is_constant(w.view()) {
            return Err(ArimaError::ConstantSeries { d });
        }
        let data = ArimaData::new(w.clone(), Some(opts.bounds.max_p))?;

        let mut searcher = Searcher::new(&data, opts);
        let termination = match opts.strategy {
            SearchStrategy::Stepwise => searcher.run_stepwise(),
            SearchStrategy::Grid => searcher.run_grid(),
        };
        let elapsed = searcher.elapsed();
        let (best, trace) = searcher.finish()?;
        let order = best.order.with_d(d);
        log::info!(
            "selected {order} with AIC = {:.4} after {} candidate(s), {} failed, \
             in {elapsed:?} ({termination})",
            best.aic(),
            trace.len(),
            trace.failures()
        );

        Ok(SearchOutcome { d, order, best, trace, termination, elapsed, differencing })
    }
}

/// Result of [`AutoArima::fit`].
///
/// - `d`, `order`: the selected integrated order.
/// - `best`: the winning fit on the differenced series.
/// - `trace`: every attempted candidate in visit order.
/// - `termination`: why the search stopped.
/// - `elapsed`: wall-clock time of the candidate search.
/// - `differencing`: the ADF tests behind `d` and the differenced series.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchOutcome {
    pub d: usize,
    pub order: ArimaOrder,
    pub best: ArmaFit,
    pub trace: SearchTrace,
    pub termination: Termination,
    pub elapsed: Duration,
    pub differencing: DifferencingOutcome,
}

impl SearchOutcome {
    pub fn aic(&self) -> f64 {
        self.best.aic()
    }

    /// Forecast `horizon` steps of the original series.
    ///
    /// `series` must be the levels passed to [`AutoArima::fit`]; its last `d`
    /// values anchor the integration.
    ///
    /// # Errors
    /// - `InvalidHorizon` for `horizon == 0`.
    /// - `SeriesTooShort` when `series` has fewer than `d` values.
    pub fn forecast(&self, series: &Array1<f64>, horizon: usize) -> ArimaResult<Array1<f64>> {
        let increments = self.best.forecast(&self.differencing.series, horizon)?;
        integrate(series.view(), self.d, increments.view())
    }
}
