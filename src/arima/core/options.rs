//! Per-fit configuration.
use crate::{inference::CovarianceType, optimization::loglik_optimizer::MLEOptions};

/// How a single ARMA candidate is estimated.
///
/// - `mle_opts`: optimizer tolerances, line search, L-BFGS memory.
/// - `covariance`: estimator behind the reported standard errors.
/// - `require_convergence`: when set, a fit whose optimizer stopped for any
///   reason other than convergence is a failed fit.
#[derive(Debug, Clone, PartialEq)]
pub struct ArimaOptions {
    pub mle_opts: MLEOptions,
    pub covariance: CovarianceType,
    pub require_convergence: bool,
}

impl ArimaOptions {
    pub fn new(
        mle_opts: MLEOptions, covariance: CovarianceType, require_convergence: bool,
    ) -> ArimaOptions {
        ArimaOptions { mle_opts, covariance, require_convergence }
    }
}

impl Default for ArimaOptions {
    fn default() -> Self {
        ArimaOptions {
            mle_opts: MLEOptions::default(),
            covariance: CovarianceType::Opg,
            require_convergence: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::optimization::loglik_optimizer::{LineSearcher, Tolerances};

    #[test]
    // Purpose
    // -------
    // `new` stores its arguments and the default requires convergence.
    //
    // Given
    // -----
    // - Hager–Zhang options with the OIM covariance.
    //
    // Expect
    // ------
    // - Fields preserved; `Default` uses OPG and `require_convergence`.
    fn arimaoptions_new_preserves_fields_and_default_is_strict() {
        let tols = Tolerances::new(Some(1e-5), None, Some(100)).unwrap();
        let mle = MLEOptions::new(tols, LineSearcher::HagerZhang, Some(5)).unwrap();

        let opts = ArimaOptions::new(mle.clone(), CovarianceType::Oim, false);
        let default = ArimaOptions::default();

        assert_eq!(opts.mle_opts, mle);
        assert_eq!(opts.covariance, CovarianceType::Oim);
        assert!(!opts.require_convergence);
        assert_eq!(default.covariance, CovarianceType::Opg);
        assert!(default.require_convergence);
    }
}
