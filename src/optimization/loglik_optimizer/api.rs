//! Public entry point of the optimizer.
use crate::optimization::{
    errors::OptResult,
    loglik_optimizer::{
        OptimOutcome, Theta,
        adapter::ArgMinAdapter,
        builders::{build_optimizer_hager_zhang, build_optimizer_more_thuente},
        run::run_lbfgs,
        traits::{LineSearcher, LogLikelihood, MLEOptions},
    },
};

/// Maximize `f`'s log-likelihood on `data`, starting from `theta0`.
///
/// `theta0` is validated with [`LogLikelihood::check`] before any solver is
/// built. The solver is L-BFGS with the line search chosen in `opts`.
///
/// # Errors
/// - Whatever `check` rejects.
/// - Tolerance or line-search construction errors from
///   [`crate::optimization::loglik_optimizer::builders`].
/// - Errors raised by the model during the run, or by final-state
///   validation in [`run_lbfgs`].
pub fn maximize<F: LogLikelihood>(
    f: &F, theta0: Theta, data: &F::Data, opts: &MLEOptions,
) -> OptResult<OptimOutcome> {
    f.check(&theta0, data)?;
    let problem = ArgMinAdapter::new(f, data);
    match opts.line_searcher {
        LineSearcher::MoreThuente => {
            let solver = build_optimizer_more_thuente(opts)?;
            run_lbfgs(theta0, opts, problem, solver)
        }
        LineSearcher::HagerZhang => {
            let solver = build_optimizer_hager_zhang(opts)?;
            run_lbfgs(theta0, opts, problem, solver)
        }
    }
}
