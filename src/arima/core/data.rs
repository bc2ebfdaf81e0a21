//! Validated input series for ARMA fitting.
use crate::arima::errors::{ArimaError, ArimaResult};
use ndarray::Array1;

/// A finite series plus an optional burn-in index.
///
/// Observations before `t0` condition the recursion but do not enter the
/// likelihood. The order search sets `t0 = max_p` so that every candidate
/// is scored on the same sample.
#[derive(Debug, Clone, PartialEq)]
pub struct ArimaData {
    pub data: Array1<f64>,
    pub t0: Option<usize>,
}

impl ArimaData {
    /// # Errors
    /// - `EmptySeries`, `NonFiniteData { index, value }` for the first bad
    ///   value, and `T0OutOfRange` when `t0 >= len`.
    pub fn new(data: Array1<f64>, t0: Option<usize>) -> ArimaResult<Self> {
        if data.is_empty() {
            return Err(ArimaError::EmptySeries);
        }
        if let Some((index, &value)) = data.iter().enumerate().find(|(_, v)| !v.is_finite()) {
            return Err(ArimaError::NonFiniteData { index, value });
        }
        if let Some(t0_val) = t0 {
            if t0_val >= data.len() {
                return Err(ArimaError::T0OutOfRange { t0: t0_val, len: data.len() });
            }
        }
        Ok(ArimaData { data, t0 })
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover each validation branch of `ArimaData::new`.
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // Valid inputs are stored unchanged; negative values are allowed.
    //
    // Given
    // -----
    // - [1.0, −2.0, 3.0] with t0 = 1.
    //
    // Expect
    // ------
    // - `Ok` with the same data and t0.
    fn arimadata_new_returns_ok_for_valid_input() {
        let data = array![1.0, -2.0, 3.0];

        let result = ArimaData::new(data.clone(), Some(1)).unwrap();

        assert_eq!(result.data, data);
        assert_eq!(result.t0, Some(1));
        assert_eq!(result.len(), 3);
    }

    #[test]
    // Purpose
    // -------
    // Each invalid input maps to its own error.
    //
    // Given
    // -----
    // - An empty series, a series with +∞ at index 1, and t0 equal to len.
    //
    // Expect
    // ------
    // - `EmptySeries`, `NonFiniteData { index: 1, .. }`, `T0OutOfRange`.
    fn arimadata_new_rejects_invalid_inputs() {
        assert_eq!(ArimaData::new(array![], None).unwrap_err(), ArimaError::EmptySeries);
        assert_eq!(
            ArimaData::new(array![1.0, f64::INFINITY, 3.0], None).unwrap_err(),
            ArimaError::NonFiniteData { index: 1, value: f64::INFINITY }
        );
        assert_eq!(
            ArimaData::new(array![1.0, 2.0, 3.0], Some(3)).unwrap_err(),
            ArimaError::T0OutOfRange { t0: 3, len: 3 }
        );
    }
}
