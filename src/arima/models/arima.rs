//! ARMA(p, q) model with analytic log-likelihood and gradient.
//!
//! The model fits the (already differenced) series in mean form by
//! conditional Gaussian maximum likelihood. Parameters live in an
//! unconstrained space (see [`ArimaParams`]) so every optimizer iterate is
//! stationary and invertible; the gradient is the innovation-derivative
//! recursion chained through the coefficient map.
//!
//! The optimizer maximizes the **average** log-likelihood `ℓ/n_eff`, which
//! keeps tolerances meaningful across sample sizes. Everything reported
//! afterwards (log-likelihood, criteria, covariance) is on the total scale.
use crate::{
    arima::{
        core::{
            criteria::InformationCriteria,
            data::ArimaData,
            forecasts::forecast_recursion,
            options::ArimaOptions,
            order::CandidateOrder,
            params::{ArimaParams, ArimaScratch},
            recursion::{coefficient_gradient, compute_residuals, gaussian_loglik, sum_of_squares},
        },
        errors::{ArimaError, ArimaResult, ParamError},
        models::model_internals::{
            calculate_scores, coefficient_grad_fn, n_eff, start_idx, theta_chain_rule,
            with_recursions,
        },
    },
    inference::covariance::{CovarianceType, calc_covariance, standard_errors},
    optimization::{
        errors::{OptError, OptResult},
        loglik_optimizer::{Grad, LogLikelihood, OptimOutcome, Theta, maximize},
        numerical_stability::transformations::safe_softplus_inv,
    },
    statistical_tests::validation::mean_and_variance,
};
use ndarray::{Array1, Array2, s};

/// ARMA(p, q) model for one candidate order.
///
/// Holds the order, fit options, and scratch buffers reused across
/// likelihood evaluations. After [`ArimaModel::fit`], `results` keeps the
/// optimizer outcome and `fitted_params` the coefficient-space estimates.
#[derive(Debug, Clone, PartialEq)]
pub struct ArimaModel {
    pub order: CandidateOrder,
    pub options: ArimaOptions,
    pub scratch_bufs: ArimaScratch,
    pub results: Option<OptimOutcome>,
    pub fitted_params: Option<ArimaParams>,
}

impl ArimaModel {
    /// Build a model with scratch buffers sized for `n` observations.
    pub fn new(order: CandidateOrder, options: ArimaOptions, n: usize) -> ArimaModel {
        let scratch_bufs = ArimaScratch::new(n, &order);
        ArimaModel { order, options, scratch_bufs, results: None, fitted_params: None }
    }

    /// Starting point: zero ARMA coefficients, sample mean, sample variance.
    ///
    /// Both moments are taken over the estimation sample.
    pub fn initial_theta(&self, data: &ArimaData) -> ArimaResult<Theta> {
        let start = start_idx(&self.order, data);
        let sample = data.data.slice(s![start..]).to_vec();
        let (mean, var) = mean_and_variance(&sample);
        if var.is_nan() || var <= 0.0 {
            return Err(ParamError::InvalidVariance { value: var }.into());
        }
        let mut theta = Array1::<f64>::zeros(self.order.n_params());
        if self.order.intercept {
            theta[0] = mean;
        }
        theta[self.order.n_params() - 1] = safe_softplus_inv(var);
        Ok(theta)
    }

    /// Fit by maximum likelihood and assemble the inference summary.
    ///
    /// Steps
    /// -----
    /// 1. Check the sample is long enough: `n_eff > k` with `k` the number
    ///    of free parameters.
    /// 2. Maximize `ℓ/n_eff` from [`ArimaModel::initial_theta`].
    /// 3. Reject a non-converged run when `require_convergence` is set.
    /// 4. Recompute residuals and the exact `ℓ` at `θ̂`.
    /// 5. Compute the covariance of `β̂` and the information criteria.
    ///
    /// Errors
    /// ------
    /// - `SeriesTooShort` on too few observations, `Param(InvalidVariance)`
    ///   on a constant estimation sample.
    /// - `Optimization` for solver failures, `NotConverged` per the options.
    /// - `SingularCovariance` / `Inference` from the covariance step.
    /// - `Param` if the recursion breaks down at `θ̂`.
    pub fn fit(&mut self, data: &ArimaData) -> ArimaResult<ArmaFit> {
        let n = data.len();
        let start = start_idx(&self.order, data);
        let nobs = n_eff(&self.order, data);
        let k = self.order.n_params();
        if nobs <= k {
            return Err(ArimaError::SeriesTooShort { len: n, required: start + k + 1 });
        }
        if self.scratch_bufs.resid_buf.borrow().len() != n {
            self.scratch_bufs = ArimaScratch::new(n, &self.order);
        }
        self.results = None;
        self.fitted_params = None;

        let theta0 = self.initial_theta(data)?;
        let outcome = maximize(self, theta0, data, &self.options.mle_opts)?;
        if self.options.require_convergence && !outcome.converged {
            return Err(ArimaError::NotConverged { status: outcome.status.clone() });
        }
        let params = ArimaParams::from_theta(outcome.theta_hat.view(), &self.order)?;
        let residuals = with_recursions(self, data, &params, |resid, _, start| {
            resid.slice(s![start..]).to_owned()
        })?;
        let loglik = gaussian_loglik(sum_of_squares(residuals.view(), 0), nobs, params.sigma2);
        if !loglik.is_finite() {
            return Err(OptError::NonFiniteCost { value: loglik }.into());
        }
        self.results = Some(outcome.clone());
        self.fitted_params = Some(params.clone());

        let beta_hat = params.to_coefficients(&self.order);
        let scores = calculate_scores(self, data)?;
        let grad_fn = coefficient_grad_fn(&self.order, data);
        let cov = calc_covariance(self.options.covariance, &grad_fn, &beta_hat, &scores)?;
        let std_errors = standard_errors(&cov);

        Ok(ArmaFit {
            order: self.order,
            params,
            loglik,
            criteria: InformationCriteria::new(loglik, k, nobs),
            nobs,
            start,
            cov,
            std_errors,
            covariance_type: self.options.covariance,
            residuals,
            outcome,
        })
    }

    /// Forecast the modelled series `horizon` steps past the end of `data`.
    ///
    /// Innovations are recomputed at the fitted parameters over all of
    /// `data`, so `data` may extend the series the model was fitted on.
    ///
    /// # Errors
    /// - `ModelNotFitted` before a successful fit.
    /// - `SeriesTooShort` if `data` cannot seed the recursion.
    /// - `InvalidHorizon` for `horizon == 0`.
    pub fn forecast(&self, data: &ArimaData, horizon: usize) -> ArimaResult<Array1<f64>> {
        let params = self.fitted_params.as_ref().ok_or(ArimaError::ModelNotFitted)?;
        let (p, q) = (self.order.p, self.order.q);
        let n = data.len();
        let start = start_idx(&self.order, data);
        if n < start + q.max(1) {
            return Err(ArimaError::SeriesTooShort { len: n, required: start + q.max(1) });
        }
        let mut resid = Array1::<f64>::zeros(n);
        compute_residuals(data.data.view(), params, start, &mut resid)?;
        forecast_recursion(params, data.data.slice(s![n - p..]), resid.slice(s![n - q..]), horizon)
    }
}

impl LogLikelihood for ArimaModel {
    type Data = ArimaData;

    /// Average conditional log-likelihood `ℓ(ϑ)/n_eff`.
    fn value(&self, theta: &Theta, data: &Self::Data) -> OptResult<f64> {
        let params = ArimaParams::from_theta(theta.view(), &self.order)?;
        let start = start_idx(&self.order, data);
        let nobs = n_eff(&self.order, data);
        let mut resid = self.scratch_bufs.resid_buf.borrow_mut();
        compute_residuals(data.data.view(), &params, start, &mut resid)?;
        let sse = sum_of_squares(resid.view(), start);
        Ok(gaussian_loglik(sse, nobs, params.sigma2) / nobs as f64)
    }

    /// Validate length and finiteness of `ϑ`.
    fn check(&self, theta: &Theta, _data: &Self::Data) -> OptResult<()> {
        ArimaParams::from_theta(theta.view(), &self.order)?;
        Ok(())
    }

    /// Analytic gradient of `ℓ(ϑ)/n_eff`.
    fn grad(&self, theta: &Theta, data: &Self::Data) -> OptResult<Grad> {
        let params = ArimaParams::from_theta(theta.view(), &self.order)?;
        let nobs = n_eff(&self.order, data) as f64;
        let grad_beta = with_recursions(self, data, &params, |resid, deriv, start| {
            coefficient_gradient(resid, deriv, start, params.sigma2)
        })?;
        Ok(theta_chain_rule(&grad_beta, theta, &self.order) / nobs)
    }
}

/// Everything known about one successful candidate fit.
///
/// - `order`: the fitted `(p, q, intercept)`.
/// - `params`: coefficient-space estimates.
/// - `loglik`: conditional log-likelihood at the estimates.
/// - `criteria`: AIC / BIC / HQIC with `k = p + q + intercept + 1`.
/// - `nobs`, `start`: effective sample size and its first index.
/// - `cov`, `std_errors`: covariance of `β = [μ? | φ | θ | σ²]` and the
///   square roots of its diagonal, per `covariance_type`.
/// - `residuals`: innovations over the estimation sample.
/// - `outcome`: raw optimizer outcome (status, iterations, evaluations).
#[derive(Debug, Clone, PartialEq)]
pub struct ArmaFit {
    pub order: CandidateOrder,
    pub params: ArimaParams,
    pub loglik: f64,
    pub criteria: InformationCriteria,
    pub nobs: usize,
    pub start: usize,
    pub cov: Array2<f64>,
    pub std_errors: Array1<f64>,
    pub covariance_type: CovarianceType,
    pub residuals: Array1<f64>,
    pub outcome: OptimOutcome,
}

impl ArmaFit {
    pub fn aic(&self) -> f64 {
        self.criteria.aic
    }

    /// `β̂ = [μ? | φ | θ | σ²]`.
    pub fn coefficients(&self) -> Array1<f64> {
        self.params.to_coefficients(&self.order)
    }

    /// Names aligned with [`ArmaFit::coefficients`]: `intercept`,
    /// `ar.L1..`, `ma.L1..`, `sigma2`.
    pub fn param_names(&self) -> Vec<String> {
        let mut names = Vec::with_capacity(self.order.n_params());
        if self.order.intercept {
            names.push("intercept".to_string());
        }
        names.extend((1..=self.order.p).map(|i| format!("ar.L{i}")));
        names.extend((1..=self.order.q).map(|j| format!("ma.L{j}")));
        names.push("sigma2".to_string());
        names
    }

    /// Forecast the modelled series `horizon` steps past the end of `w`,
    /// the same series the fit was computed on.
    ///
    /// # Errors
    /// - `SeriesTooShort` if `w` holds fewer than `p` observations.
    /// - `InvalidHorizon` for `horizon == 0`.
    pub fn forecast(&self, w: &Array1<f64>, horizon: usize) -> ArimaResult<Array1<f64>> {
        let (p, q) = (self.order.p, self.order.q);
        if w.len() < p {
            return Err(ArimaError::SeriesTooShort { len: w.len(), required: p });
        }
        let m = self.residuals.len();
        forecast_recursion(
            &self.params,
            w.slice(s![w.len() - p..]),
            self.residuals.slice(s![m - q..]),
            horizon,
        )
    }
}
