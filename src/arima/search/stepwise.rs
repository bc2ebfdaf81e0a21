//! Candidate enumeration: the stepwise walk and the exhaustive grid.
//!
//! Both strategies share one [`Searcher`], which owns the visited set, the
//! trace, the best fit so far, and the budget checks. A candidate is fitted
//! at most once; a failed fit is recorded and skipped.
//!
//! Stepwise walk
//! -------------
//! 1. Anchors: the seed `(start_p, start_q)`, then `(0,0)`, `(1,0)`,
//!    `(0,1)`, each with and without an intercept (only without when
//!    intercepts are disabled).
//! 2. Neighbours of the best order, in this order: `(p−1,q)`, `(p+1,q)`,
//!    `(p,q−1)`, `(p,q+1)`, `(p−1,q−1)`, `(p+1,q+1)`, `(p−1,q+1)`,
//!    `(p+1,q−1)`, then the intercept toggle.
//! 3. The first neighbour that outranks the best becomes the new centre.
//! 4. Stop when a full neighbourhood brings no improvement.
use crate::arima::{
    core::{data::ArimaData, order::CandidateOrder},
    errors::{ArimaError, ArimaResult},
    models::arima::{ArimaModel, ArmaFit},
    search::{
        options::SearchOptions,
        trace::{CandidateOutcome, SearchTrace},
    },
};
use std::{
    collections::BTreeSet,
    fmt,
    time::{Duration, Instant},
};

/// Why the search stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Termination {
    /// No neighbour improved (stepwise) or the grid was exhausted.
    Converged,
    CandidateBudget,
    TimeBudget,
}

impl fmt::Display for Termination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Termination::Converged => write!(f, "converged"),
            Termination::CandidateBudget => write!(f, "candidate budget exhausted"),
            Termination::TimeBudget => write!(f, "time budget exhausted"),
        }
    }
}

/// Result of offering one candidate to the [`Searcher`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Attempt {
    Improved,
    NotImproved,
    Skipped,
    Exhausted(Termination),
}

/// `true` when `new` should replace `current` as the best fit: strictly
/// lower AIC, or an exact tie with fewer ARMA terms.
pub fn outranks(new: &ArmaFit, current: Option<&ArmaFit>) -> bool {
    match current {
        None => true,
        Some(cur) => {
            new.aic() < cur.aic()
                || (new.aic() == cur.aic() && new.order.arma_order() < cur.order.arma_order())
        }
    }
}

/// The stepwise neighbourhood of `center`, in visiting order.
///
/// Orders below zero are dropped here; bounds are checked by the searcher.
pub fn neighbours(center: CandidateOrder, with_intercept: bool) -> Vec<CandidateOrder> {
    const MOVES: [(isize, isize); 8] =
        [(-1, 0), (1, 0), (0, -1), (0, 1), (-1, -1), (1, 1), (-1, 1), (1, -1)];
    let mut out: Vec<CandidateOrder> = MOVES
        .iter()
        .filter_map(|&(dp, dq)| {
            let p = center.p.checked_add_signed(dp)?;
            let q = center.q.checked_add_signed(dq)?;
            Some(CandidateOrder::new(p, q, center.intercept))
        })
        .collect();
    if with_intercept {
        out.push(CandidateOrder::new(center.p, center.q, !center.intercept));
    }
    out
}

/// Mutable state of one search run.
pub struct Searcher<'a> {
    data: &'a ArimaData,
    options: &'a SearchOptions,
    started: Instant,
    visited: BTreeSet<CandidateOrder>,
    pub trace: SearchTrace,
    pub best: Option<ArmaFit>,
}

impl<'a> Searcher<'a> {
    pub fn new(data: &'a ArimaData, options: &'a SearchOptions) -> Self {
        Searcher {
            data,
            options,
            started: Instant::now(),
            visited: BTreeSet::new(),
            trace: SearchTrace::new(),
            best: None,
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }

    fn intercepts(&self) -> &'static [bool] {
        if self.options.with_intercept { &[true, false] } else { &[false] }
    }

    fn budget_exhausted(&self) -> Option<Termination> {
        let budget = &self.options.budget;
        if self.trace.len() >= budget.max_candidates {
            return Some(Termination::CandidateBudget);
        }
        if budget.max_duration.is_some_and(|limit| self.elapsed() >= limit) {
            return Some(Termination::TimeBudget);
        }
        None
    }

    /// Fit `order` unless it is out of bounds, already visited, or the
    /// budget is spent.
    fn attempt(&mut self, order: CandidateOrder) -> Attempt {
        if !self.options.bounds.contains(order.p, order.q)
            || (order.intercept && !self.options.with_intercept)
            || self.visited.contains(&order)
        {
            return Attempt::Skipped;
        }
        if let Some(reason) = self.budget_exhausted() {
            log::warn!("stopping search before {order}: {reason}");
            return Attempt::Exhausted(reason);
        }
        self.visited.insert(order);

        let clock = Instant::now();
        let mut model = ArimaModel::new(order, self.options.fit.clone(), self.data.len());
        let result = model.fit(self.data);
        let elapsed = clock.elapsed();

        match result {
            Ok(fit) => {
                log::debug!(
                    "{order}: AIC = {:.4}, loglik = {:.4}, {} iterations in {elapsed:?}",
                    fit.aic(),
                    fit.loglik,
                    fit.outcome.iterations
                );
                self.trace.push(
                    order,
                    CandidateOutcome::Fitted { aic: fit.aic(), loglik: fit.loglik },
                    elapsed,
                );
                if outranks(&fit, self.best.as_ref()) {
                    self.best = Some(fit);
                    Attempt::Improved
                } else {
                    Attempt::NotImproved
                }
            }
            Err(err) => {
                log::warn!("{order}: fit failed: {err}");
                let outcome = CandidateOutcome::Failed { reason: err.to_string() };
                self.trace.push(order, outcome, elapsed);
                Attempt::NotImproved
            }
        }
    }

    /// Run the stepwise walk to completion or budget exhaustion.
    pub fn run_stepwise(&mut self) -> Termination {
        let bounds = self.options.bounds;
        let anchors = [(bounds.start_p, bounds.start_q), (0, 0), (1, 0), (0, 1)];
        for (p, q) in anchors {
            for &intercept in self.intercepts() {
                let order = CandidateOrder::new(p, q, intercept);
                if let Attempt::Exhausted(reason) = self.attempt(order) {
                    return reason;
                }
            }
        }
        loop {
            let Some(center) = self.best.as_ref().map(|b| b.order) else {
                return Termination::Converged;
            };
            let mut moved = false;
            for candidate in neighbours(center, self.options.with_intercept) {
                match self.attempt(candidate) {
                    Attempt::Improved => {
                        moved = true;
                        break;
                    }
                    Attempt::Exhausted(reason) => return reason,
                    Attempt::NotImproved | Attempt::Skipped => {}
                }
            }
            if !moved {
                return Termination::Converged;
            }
        }
    }

    /// Hand back the best fit and the trace.
    ///
    /// # Errors
    /// - `NoViableCandidate` when no attempted candidate was fitted.
    pub fn finish(self) -> ArimaResult<(ArmaFit, SearchTrace)> {
        match self.best {
            Some(best) => Ok((best, self.trace)),
            None => Err(ArimaError::NoViableCandidate { attempted: self.trace.len() }),
        }
    }

    /// Fit every in-bounds candidate in `(p, q, intercept)` order.
    pub fn run_grid(&mut self) -> Termination {
        let bounds = self.options.bounds;
        for p in 0..=bounds.max_p {
            for q in 0..=bounds.max_q {
                for intercept in [false, true] {
                    if let Attempt::Exhausted(reason) =
                        self.attempt(CandidateOrder::new(p, q, intercept))
                    {
                        return reason;
                    }
                }
            }
        }
        Termination::Converged
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::arima::{
        core::options::ArimaOptions,
        search::options::{OrderBounds, SearchBudget},
    };
    use ndarray::Array1;
    use rand::{SeedableRng, rngs::StdRng};
    use rand_distr::{Distribution, StandardNormal};

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - The neighbourhood order.
    // - The ranking rule, including the tie-break on `p + q`.
    // - The time budget and the hand-over of an empty search.
    //
    // Full searches are exercised in `auto_arima` and the integration tests.
    // -------------------------------------------------------------------------

    fn noise(n: usize, seed: u64) -> Array1<f64> {
        let mut rng = StdRng::seed_from_u64(seed);
        Array1::from_iter((0..n).map(|_| StandardNormal.sample(&mut rng)))
    }

    /// A real fit relabelled with `order` and `aic`; only these two fields
    /// take part in the ranking.
    fn relabel(base: &ArmaFit, p: usize, q: usize, aic: f64) -> ArmaFit {
        let mut fit = base.clone();
        fit.order = CandidateOrder::new(p, q, true);
        fit.criteria.aic = aic;
        fit
    }

    #[test]
    // Purpose
    // -------
    // A candidate replaces the best only on strictly lower AIC, or on an
    // exact tie with fewer ARMA terms.
    //
    // Given
    // -----
    // - A fitted white-noise model relabelled as several orders and AICs.
    // - Current best ARMA(1,1) with AIC 100.
    //
    // Expect
    // ------
    // - Anything outranks an empty slot.
    // - Equal AIC: ARMA(1,0) wins; ARMA(2,1) and ARMA(2,0) (same p + q)
    //   do not.
    // - Lower AIC wins even with more terms; higher AIC never wins.
    fn outranks_prefers_lower_aic_then_fewer_terms() {
        let data = ArimaData::new(noise(300, 17), None).unwrap();
        let order = CandidateOrder::new(0, 0, true);
        let base =
            ArimaModel::new(order, ArimaOptions::default(), data.len()).fit(&data).unwrap();
        let current = relabel(&base, 1, 1, 100.0);

        assert!(outranks(&current, None));
        assert!(outranks(&relabel(&base, 1, 0, 100.0), Some(&current)));
        assert!(!outranks(&relabel(&base, 2, 1, 100.0), Some(&current)));
        assert!(!outranks(&relabel(&base, 2, 0, 100.0), Some(&current)));
        assert!(outranks(&relabel(&base, 3, 3, 99.5), Some(&current)));
        assert!(!outranks(&relabel(&base, 0, 0, 100.5), Some(&current)));
    }

    #[test]
    // Purpose
    // -------
    // The time budget is checked before the first fit, and a search that
    // fitted nothing cannot be handed over.
    //
    // Given
    // -----
    // - A 1 ms time budget that has already run out when the walk starts.
    //
    // Expect
    // ------
    // - `TimeBudget` with an empty trace; `finish` reports
    //   `NoViableCandidate { attempted: 0 }`.
    fn time_budget_stops_before_first_fit() {
        let data = ArimaData::new(noise(200, 23), Some(1)).unwrap();
        let options = SearchOptions {
            bounds: OrderBounds::new(1, 1, 1, 1, None).unwrap(),
            budget: SearchBudget::new(100, Some(Duration::from_millis(1))).unwrap(),
            ..SearchOptions::default()
        };
        let mut searcher = Searcher::new(&data, &options);
        std::thread::sleep(Duration::from_millis(5));

        let termination = searcher.run_stepwise();

        assert_eq!(termination, Termination::TimeBudget);
        assert!(searcher.trace.is_empty());
        assert_eq!(
            searcher.finish().unwrap_err(),
            ArimaError::NoViableCandidate { attempted: 0 }
        );
    }

    #[test]
    // Purpose
    // -------
    // Neighbours come in the fixed visiting order, with the intercept
    // toggle last, and never go below zero.
    //
    // Given
    // -----
    // - Centre (1, 1, intercept) and centre (0, 0, no intercept).
    //
    // Expect
    // ------
    // - Nine neighbours for (1, 1) in the documented order; only the
    //   non-negative moves for (0, 0), without a toggle when disabled.
    fn neighbours_follow_fixed_order() {
        let n = neighbours(CandidateOrder::new(1, 1, true), true);
        let pq: Vec<(usize, usize, bool)> = n.iter().map(|o| (o.p, o.q, o.intercept)).collect();

        assert_eq!(
            pq,
            vec![
                (0, 1, true),
                (2, 1, true),
                (1, 0, true),
                (1, 2, true),
                (0, 0, true),
                (2, 2, true),
                (0, 2, true),
                (2, 0, true),
                (1, 1, false),
            ]
        );

        let origin = neighbours(CandidateOrder::new(0, 0, false), false);
        assert_eq!(
            origin,
            vec![
                CandidateOrder::new(1, 0, false),
                CandidateOrder::new(0, 1, false),
                CandidateOrder::new(1, 1, false),
            ]
        );
    }
}
