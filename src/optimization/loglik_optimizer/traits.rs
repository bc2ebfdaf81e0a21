//! Public configuration and result types for likelihood maximization.
//!
//! - [`LogLikelihood`]: what a model implements to be fitted.
//! - [`Tolerances`], [`MLEOptions`], [`LineSearcher`]: solver configuration.
//! - [`OptimOutcome`]: what `maximize` hands back.
//!
//! Every type here speaks in terms of the log-likelihood `ℓ(θ)`; the sign
//! flip to argmin's minimization convention happens in the adapter only.
use crate::optimization::{
    errors::{OptError, OptResult},
    loglik_optimizer::{
        Cost, FnEvalMap, Grad, Theta,
        validation::{validate_theta_hat, validate_value, verify_tol_cost, verify_tol_grad},
    },
};
use argmin::core::{TerminationReason, TerminationStatus};
use argmin_math::ArgminL2Norm;
use std::str::FromStr;

/// Model-side interface consumed by [`maximize`](super::maximize).
///
/// Implementors evaluate `ℓ(θ)` for an unconstrained parameter vector and
/// may supply `∇ℓ(θ)`. `check` runs once on the starting point; `value`
/// and `grad` run inside the solver loop and must report domain problems
/// as `OptError` rather than panicking.
///
/// When `grad` is left at its default, the adapter falls back to central
/// (then forward) finite differences of the cost.
pub trait LogLikelihood {
    type Data: 'static;

    // Required methods
    fn value(&self, theta: &Theta, data: &Self::Data) -> OptResult<Cost>;
    fn check(&self, theta: &Theta, data: &Self::Data) -> OptResult<()>;

    // Optional methods
    fn grad(&self, _theta: &Theta, _data: &Self::Data) -> OptResult<Grad> {
        Err(OptError::GradientNotImplemented)
    }
}

/// Line search used inside L-BFGS.
///
/// Parses case-insensitively from `"MoreThuente"` or `"HagerZhang"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineSearcher {
    MoreThuente,
    HagerZhang,
}

impl FromStr for LineSearcher {
    type Err = OptError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "morethuente" => Ok(LineSearcher::MoreThuente),
            "hagerzhang" => Ok(LineSearcher::HagerZhang),
            _ => Err(OptError::InvalidLineSearch {
                name: s.to_string(),
                reason: "Valid options are case insensitive 'MoreThuente' or 'HagerZhang'.",
            }),
        }
    }
}

/// Solver configuration for one likelihood maximization.
///
/// Fields
/// ------
/// - `tols`: stopping rules, see [`Tolerances`].
/// - `line_searcher`: line search used by L-BFGS.
/// - `lbfgs_mem`: history length; `None` means
///   [`DEFAULT_LBFGS_MEM`](super::DEFAULT_LBFGS_MEM).
/// - `verbose`: log the starting point at debug level and, with the
///   `obs_slog` feature, stream per-iteration progress to the terminal.
///
/// Default
/// -------
/// `tol_grad = 1e-6`, `tol_cost = 1e-10`, `max_iter = 500`, More–Thuente,
/// default memory, quiet. The tolerances are tuned for objectives on the
/// average log-likelihood scale, which is what the ARMA models expose.
#[derive(Debug, Clone, PartialEq)]
pub struct MLEOptions {
    pub tols: Tolerances,
    pub line_searcher: LineSearcher,
    pub lbfgs_mem: Option<usize>,
    pub verbose: bool,
}

impl MLEOptions {
    /// Build validated options.
    ///
    /// # Errors
    /// - [`OptError::InvalidLBFGSMem`] when `lbfgs_mem == Some(0)`.
    pub fn new(
        tols: Tolerances, line_searcher: LineSearcher, lbfgs_mem: Option<usize>,
    ) -> OptResult<Self> {
        if let Some(m) = lbfgs_mem {
            if m == 0 {
                return Err(OptError::InvalidLBFGSMem {
                    mem: m,
                    reason: "L-BFGS memory must be greater than zero.",
                });
            }
        }
        Ok(Self { tols, line_searcher, lbfgs_mem, verbose: false })
    }

    /// Toggle solver progress output.
    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }
}

impl Default for MLEOptions {
    fn default() -> Self {
        Self {
            tols: Tolerances { tol_grad: Some(1e-6), tol_cost: Some(1e-10), max_iter: Some(500) },
            line_searcher: LineSearcher::MoreThuente,
            lbfgs_mem: None,
            verbose: false,
        }
    }
}

/// Stopping rules for the solver.
///
/// - `tol_grad`: stop once `‖∇c(θ)‖₂` drops below this value.
/// - `tol_cost`: stop once the cost changes by less than this value.
/// - `max_iter`: hard iteration cap.
///
/// At least one of the three must be set.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tolerances {
    pub tol_grad: Option<f64>,
    pub tol_cost: Option<f64>,
    pub max_iter: Option<usize>,
}

impl Tolerances {
    /// Construct validated tolerances.
    ///
    /// # Errors
    /// - [`OptError::NoTolerancesProvided`] if all three are `None`.
    /// - [`OptError::InvalidTolGrad`] / [`OptError::InvalidTolCost`] for
    ///   non-finite or non-positive tolerances.
    /// - [`OptError::InvalidMaxIter`] if `max_iter == Some(0)`.
    pub fn new(
        tol_grad: Option<f64>, tol_cost: Option<f64>, max_iter: Option<usize>,
    ) -> OptResult<Self> {
        if tol_grad.is_none() && tol_cost.is_none() && max_iter.is_none() {
            return Err(OptError::NoTolerancesProvided);
        }
        verify_tol_cost(tol_cost)?;
        verify_tol_grad(tol_grad)?;
        if let Some(max_iter) = max_iter {
            if max_iter == 0 {
                return Err(OptError::InvalidMaxIter {
                    max_iter,
                    reason: "Maximum iterations must be greater than zero.",
                });
            }
        }
        Ok(Self { tol_grad, tol_cost, max_iter })
    }
}

/// Result of [`maximize`](super::maximize).
///
/// - `theta_hat`: best parameter vector found.
/// - `value`: `ℓ(θ̂)` on the scale the model reports (not the cost).
/// - `converged`: `true` only when the solver met a tolerance
///   (`SolverConverged` or `TargetCostReached`). Hitting `max_iter`, a
///   timeout, or an interrupt leaves it `false`.
/// - `status`: argmin's termination status, rendered for reports.
/// - `iterations`, `fn_evals`: solver bookkeeping.
/// - `grad_norm`: `‖∇c(θ̂)‖₂` when argmin kept the last gradient.
#[derive(Debug, Clone, PartialEq)]
pub struct OptimOutcome {
    pub theta_hat: Theta,
    pub value: f64,
    pub converged: bool,
    pub status: String,
    pub iterations: usize,
    pub fn_evals: FnEvalMap,
    pub grad_norm: Option<f64>,
}

impl OptimOutcome {
    /// Normalize argmin's final state.
    ///
    /// # Errors
    /// - [`OptError::MissingThetaHat`] / [`OptError::InvalidThetaHat`] when
    ///   the solver produced no usable parameter vector.
    /// - [`OptError::NonFiniteCost`] when `value` is not finite.
    pub fn new(
        theta_hat_opt: Option<Theta>, value: f64, termination: TerminationStatus,
        iterations: u64, fn_evals: FnEvalMap, grad: Option<Grad>,
    ) -> OptResult<Self> {
        let theta_hat = validate_theta_hat(theta_hat_opt)?;
        validate_value(value)?;
        let (converged, status) = match &termination {
            TerminationStatus::NotTerminated => (false, "Not terminated".to_string()),
            TerminationStatus::Terminated(reason) => {
                let converged = matches!(
                    reason,
                    TerminationReason::SolverConverged | TerminationReason::TargetCostReached
                );
                (converged, format!("{reason:?}"))
            }
        };
        let grad_norm = grad.map(|g| g.l2_norm());
        Ok(Self {
            theta_hat,
            value,
            converged,
            status,
            iterations: iterations as usize,
            fn_evals,
            grad_norm,
        })
    }
}
