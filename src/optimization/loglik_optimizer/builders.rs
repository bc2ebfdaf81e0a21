//! L-BFGS construction for each supported line search.
//!
//! Tolerances are copied from [`MLEOptions`]; argmin re-validates them and
//! its errors surface as `OptError` through `?`.
use argmin::solver::quasinewton::LBFGS;

use crate::optimization::{
    errors::OptResult,
    loglik_optimizer::{
        traits::MLEOptions,
        types::{
            Cost, DEFAULT_LBFGS_MEM, Grad, HagerZhangLS, LbfgsHagerZhang, LbfgsMoreThuente,
            MoreThuenteLS, Theta,
        },
    },
};

pub fn build_optimizer_hager_zhang(opts: &MLEOptions) -> OptResult<LbfgsHagerZhang> {
    let mem = opts.lbfgs_mem.unwrap_or(DEFAULT_LBFGS_MEM);
    configure_lbfgs(LbfgsHagerZhang::new(HagerZhangLS::new(), mem), opts)
}

pub fn build_optimizer_more_thuente(opts: &MLEOptions) -> OptResult<LbfgsMoreThuente> {
    let mem = opts.lbfgs_mem.unwrap_or(DEFAULT_LBFGS_MEM);
    configure_lbfgs(LbfgsMoreThuente::new(MoreThuenteLS::new(), mem), opts)
}

/// Apply whichever of the gradient/cost tolerances are set.
pub fn configure_lbfgs<L>(
    mut solver: LBFGS<L, Theta, Grad, Cost>, opts: &MLEOptions,
) -> OptResult<LBFGS<L, Theta, Grad, Cost>> {
    if let Some(g) = opts.tols.tol_grad {
        solver = solver.with_tolerance_grad(g)?;
    }
    if let Some(c) = opts.tols.tol_cost {
        solver = solver.with_tolerance_cost(c)?;
    }
    Ok(solver)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::optimization::loglik_optimizer::traits::{LineSearcher, Tolerances};

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover solver construction for both line searches with
    // default and explicit memory, and with partially absent tolerances.
    // Solver behavior is exercised through `api::maximize`.
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // Both builders accept default and explicit L-BFGS memory.
    //
    // Given
    // -----
    // - Valid tolerances and `lbfgs_mem` in {None, Some(11)}.
    //
    // Expect
    // ------
    // - Every construction succeeds.
    fn builders_accept_default_and_explicit_memory() {
        for mem in [None, Some(11)] {
            // Arrange
            let tols = Tolerances::new(Some(1e-6), Some(1e-10), Some(50)).unwrap();
            let hz = MLEOptions::new(tols, LineSearcher::HagerZhang, mem).unwrap();
            let mt = MLEOptions::new(tols, LineSearcher::MoreThuente, mem).unwrap();

            // Act + Assert
            assert!(build_optimizer_hager_zhang(&hz).is_ok());
            assert!(build_optimizer_more_thuente(&mt).is_ok());
        }
    }

    #[test]
    // Purpose
    // -------
    // An iteration cap alone is a valid configuration.
    //
    // Given
    // -----
    // - Tolerances with only `max_iter` set.
    //
    // Expect
    // ------
    // - `configure_lbfgs` leaves argmin's defaults in place and succeeds.
    fn configure_lbfgs_respects_absent_tolerances() {
        // Arrange
        let raw = LBFGS::new(MoreThuenteLS::new(), DEFAULT_LBFGS_MEM);
        let tols = Tolerances::new(None, None, Some(50)).unwrap();
        let opts = MLEOptions::new(tols, LineSearcher::MoreThuente, None).unwrap();

        // Act
        let configured = configure_lbfgs(raw, &opts);

        // Assert
        assert!(configured.is_ok());
    }
}
