//! Record of every candidate the search attempted.
use crate::arima::core::order::CandidateOrder;
use std::time::Duration;

/// What happened to one candidate.
#[derive(Debug, Clone, PartialEq)]
pub enum CandidateOutcome {
    Fitted { aic: f64, loglik: f64 },
    /// The fit failed; `reason` is the rendered error.
    Failed { reason: String },
}

/// One attempted candidate, in visit order.
#[derive(Debug, Clone, PartialEq)]
pub struct CandidateRecord {
    pub index: usize,
    pub order: CandidateOrder,
    pub outcome: CandidateOutcome,
    pub elapsed: Duration,
}

impl CandidateRecord {
    pub fn aic(&self) -> Option<f64> {
        match self.outcome {
            CandidateOutcome::Fitted { aic, .. } => Some(aic),
            CandidateOutcome::Failed { .. } => None,
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self.outcome, CandidateOutcome::Failed { .. })
    }
}

/// Ordered list of [`CandidateRecord`]s.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SearchTrace {
    records: Vec<CandidateRecord>,
}

impl SearchTrace {
    pub fn new() -> Self {
        SearchTrace { records: Vec::new() }
    }

    /// Append a record; the visit index is assigned here.
    pub fn push(&mut self, order: CandidateOrder, outcome: CandidateOutcome, elapsed: Duration) {
        let index = self.records.len();
        self.records.push(CandidateRecord { index, order, outcome, elapsed });
    }

    pub fn records(&self) -> &[CandidateRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn failures(&self) -> usize {
        self.records.iter().filter(|r| r.is_failed()).count()
    }

    /// Candidate orders in visit order.
    pub fn orders(&self) -> Vec<CandidateOrder> {
        self.records.iter().map(|r| r.order).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    // Purpose
    // -------
    // Records are indexed in push order and failures are counted.
    //
    // Given
    // -----
    // - One fitted and one failed candidate.
    //
    // Expect
    // ------
    // - Indices 0 and 1, one failure, `aic()` only on the fitted record.
    fn push_assigns_indices_and_counts_failures() {
        let mut trace = SearchTrace::new();

        trace.push(
            CandidateOrder::new(1, 1, true),
            CandidateOutcome::Fitted { aic: 10.0, loglik: -1.0 },
            Duration::from_millis(3),
        );
        trace.push(
            CandidateOrder::new(0, 0, false),
            CandidateOutcome::Failed { reason: "boom".to_string() },
            Duration::from_millis(1),
        );

        assert_eq!(trace.len(), 2);
        assert_eq!(trace.failures(), 1);
        assert_eq!(trace.records()[1].index, 1);
        assert_eq!(trace.records()[0].aic(), Some(10.0));
        assert_eq!(trace.records()[1].aic(), None);
        assert_eq!(
            trace.orders(),
            vec![CandidateOrder::new(1, 1, true), CandidateOrder::new(0, 0, false)]
        );
    }
}
