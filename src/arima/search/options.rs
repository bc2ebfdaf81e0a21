//! Configuration of the order search.
//!
//! Every struct here has a validating `new` and a `Default` that matches
//! the classical auto-ARIMA settings: seed `(1, 1)`, maxima `(3, 3)`,
//! `p + q ≤ 5`, ADF at 5% with `d ≤ 2`, and at most 100 candidate fits.
use crate::arima::{
    core::options::ArimaOptions,
    errors::{ArimaError, ArimaResult},
};
use std::{str::FromStr, time::Duration};

/// Default cap on `p + q`.
pub const DEFAULT_MAX_ORDER: usize = 5;

/// Bounds of the `(p, q)` lattice and the seed of the stepwise walk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderBounds {
    pub start_p: usize,
    pub start_q: usize,
    pub max_p: usize,
    pub max_q: usize,
    /// Cap on `p + q`; `None` leaves only the per-order maxima.
    pub max_order: Option<usize>,
}

impl OrderBounds {
    /// # Errors
    /// - `InvalidOrderBounds` when the seed lies outside the maxima.
    pub fn new(
        start_p: usize, start_q: usize, max_p: usize, max_q: usize, max_order: Option<usize>,
    ) -> ArimaResult<Self> {
        if start_p > max_p {
            return Err(ArimaError::InvalidOrderBounds { reason: "start_p exceeds max_p." });
        }
        if start_q > max_q {
            return Err(ArimaError::InvalidOrderBounds { reason: "start_q exceeds max_q." });
        }
        Ok(OrderBounds { start_p, start_q, max_p, max_q, max_order })
    }

    /// Whether `(p, q)` lies inside the lattice.
    pub fn contains(&self, p: usize, q: usize) -> bool {
        p <= self.max_p && q <= self.max_q && self.max_order.is_none_or(|m| p + q <= m)
    }
}

impl Default for OrderBounds {
    fn default() -> Self {
        let max_order = Some(DEFAULT_MAX_ORDER);
        OrderBounds { start_p: 1, start_q: 1, max_p: 3, max_q: 3, max_order }
    }
}

/// How `d` is chosen.
///
/// - `alpha`: ADF significance level in `(0, 1)`.
/// - `max_d`: highest order tried before giving up.
/// - `adf_lag`: fixed ADF lag; `None` selects it by AIC.
/// - `fixed_d`: skip testing and use this order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DifferencingOptions {
    pub alpha: f64,
    pub max_d: usize,
    pub adf_lag: Option<usize>,
    pub fixed_d: Option<usize>,
}

impl DifferencingOptions {
    /// # Errors
    /// - `InvalidAlpha` for `alpha ∉ (0, 1)`.
    pub fn new(
        alpha: f64, max_d: usize, adf_lag: Option<usize>, fixed_d: Option<usize>,
    ) -> ArimaResult<Self> {
        if !(alpha > 0.0 && alpha < 1.0) {
            return Err(ArimaError::InvalidAlpha { alpha });
        }
        Ok(DifferencingOptions { alpha, max_d, adf_lag, fixed_d })
    }
}

impl Default for DifferencingOptions {
    fn default() -> Self {
        DifferencingOptions { alpha: 0.05, max_d: 2, adf_lag: None, fixed_d: None }
    }
}

/// Limits checked before every candidate fit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchBudget {
    pub max_candidates: usize,
    pub max_duration: Option<Duration>,
}

impl SearchBudget {
    /// # Errors
    /// - `InvalidBudget` for zero candidates or a zero duration.
    pub fn new(max_candidates: usize, max_duration: Option<Duration>) -> ArimaResult<Self> {
        if max_candidates == 0 {
            return Err(ArimaError::InvalidBudget {
                reason: "max_candidates must be at least 1.",
            });
        }
        if max_duration.is_some_and(|d| d.is_zero()) {
            return Err(ArimaError::InvalidBudget { reason: "max_duration must be positive." });
        }
        Ok(SearchBudget { max_candidates, max_duration })
    }
}

impl Default for SearchBudget {
    fn default() -> Self {
        SearchBudget { max_candidates: 100, max_duration: None }
    }
}

/// Candidate enumeration policy.
///
/// Parses case-insensitively from `"stepwise"` or `"grid"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchStrategy {
    #[default]
    Stepwise,
    Grid,
}

impl FromStr for SearchStrategy {
    type Err = ArimaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "stepwise" => Ok(SearchStrategy::Stepwise),
            "grid" => Ok(SearchStrategy::Grid),
            _ => Err(ArimaError::InvalidStrategy { name: s.to_string() }),
        }
    }
}

/// Full search configuration.
///
/// `with_intercept = false` restricts every candidate to a zero mean;
/// otherwise (the default) each order is tried with and without one.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchOptions {
    pub bounds: OrderBounds,
    pub differencing: DifferencingOptions,
    pub budget: SearchBudget,
    pub strategy: SearchStrategy,
    pub with_intercept: bool,
    pub fit: ArimaOptions,
}

impl SearchOptions {
    pub fn new(
        bounds: OrderBounds, differencing: DifferencingOptions, budget: SearchBudget,
        strategy: SearchStrategy, with_intercept: bool, fit: ArimaOptions,
    ) -> SearchOptions {
        SearchOptions { bounds, differencing, budget, strategy, with_intercept, fit }
    }
}

impl Default for SearchOptions {
    fn default() -> Self {
        SearchOptions {
            bounds: OrderBounds::default(),
            differencing: DifferencingOptions::default(),
            budget: SearchBudget::default(),
            strategy: SearchStrategy::Stepwise,
            with_intercept: true,
            fit: ArimaOptions::default(),
        }
    }
}
