//! Model orders: the `(p, q, intercept)` triple searched over, and the
//! integrated `(p, d, q)` order reported to users.
use std::fmt;

/// One point of the search lattice.
///
/// Ordering is lexicographic in `(p, q, intercept)`, which is also the
/// enumeration order of the grid strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CandidateOrder {
    pub p: usize,
    pub q: usize,
    pub intercept: bool,
}

impl CandidateOrder {
    pub fn new(p: usize, q: usize, intercept: bool) -> Self {
        CandidateOrder { p, q, intercept }
    }

    /// Mean (if any) plus AR and MA coefficients.
    pub fn n_coefs(&self) -> usize {
        self.p + self.q + usize::from(self.intercept)
    }

    /// Free parameters counted by the information criteria: the
    /// coefficients plus the innovation variance.
    pub fn n_params(&self) -> usize {
        self.n_coefs() + 1
    }

    /// `p + q`, the tie-breaker between equal-AIC candidates.
    pub fn arma_order(&self) -> usize {
        self.p + self.q
    }

    pub fn with_d(&self, d: usize) -> ArimaOrder {
        ArimaOrder { p: self.p, d, q: self.q, intercept: self.intercept }
    }
}

impl fmt::Display for CandidateOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ARMA({},{})", self.p, self.q)?;
        if self.intercept {
            write!(f, " intercept")?;
        }
        Ok(())
    }
}

/// Full non-seasonal order, rendered as `ARIMA(p,d,q)` with a trailing
/// ` intercept` when a mean is estimated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ArimaOrder {
    pub p: usize,
    pub d: usize,
    pub q: usize,
    pub intercept: bool,
}

impl ArimaOrder {
    pub fn candidate(&self) -> CandidateOrder {
        CandidateOrder::new(self.p, self.q, self.intercept)
    }
}

impl fmt::Display for ArimaOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ARIMA({},{},{})", self.p, self.d, self.q)?;
        if self.intercept {
            write!(f, " intercept")?;
        }
        Ok(())
    }
}
