//! Information criteria for fitted candidates.

/// AIC, BIC and HQIC for one fit.
///
/// With `k` free parameters (coefficients plus σ²), log-likelihood `ℓ` and
/// `n` effective observations:
///
/// ```text
/// AIC  = 2k − 2ℓ
/// BIC  = k·ln(n) − 2ℓ
/// HQIC = 2k·ln(ln(n)) − 2ℓ
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InformationCriteria {
    pub aic: f64,
    pub bic: f64,
    pub hqic: f64,
}

impl InformationCriteria {
    pub fn new(loglik: f64, k: usize, nobs: usize) -> Self {
        let k = k as f64;
        let n = nobs as f64;
        InformationCriteria {
            aic: 2.0 * k - 2.0 * loglik,
            bic: k * n.ln() - 2.0 * loglik,
            hqic: 2.0 * k * n.ln().ln() - 2.0 * loglik,
        }
    }
}
