//! loglik_optimizer::types — numeric aliases and pre-wired solver types.
//!
//! Purpose
//! -------
//! Keep the `ndarray`/argmin generics in one place so the rest of the
//! optimizer and the ARMA model layer speak in terms of `Theta`, `Grad`,
//! `Hessian`, and `Cost`.
//!
//! Conventions
//! -----------
//! - `Theta` and `Grad` have one entry per free parameter, laid out as
//!   `[μ?, u_φ (p), u_θ (q), s_σ²]` for ARMA models.
//! - `Cost` is a scalar on the log-likelihood scale; the adapter owns the
//!   sign flip.
//! - `DEFAULT_LBFGS_MEM` is the L-BFGS history used when
//!   `MLEOptions::lbfgs_mem` is `None`.
use argmin::solver::{
    linesearch::{HagerZhangLineSearch, MoreThuenteLineSearch},
    quasinewton::LBFGS,
};
use ndarray::{Array1, Array2};
use std::collections::HashMap;

/// Unconstrained parameter vector.
pub type Theta = Array1<f64>;

/// Gradient with the same layout as [`Theta`].
pub type Grad = Array1<f64>;

/// Dense square matrix of second derivatives.
pub type Hessian = Array2<f64>;

pub type Cost = f64;

/// argmin's per-operation evaluation counters (`"cost_count"`, ...).
pub type FnEvalMap = HashMap<String, u64>;

pub const DEFAULT_LBFGS_MEM: usize = 7;

pub type HagerZhangLS = HagerZhangLineSearch<Theta, Grad, Cost>;

pub type MoreThuenteLS = MoreThuenteLineSearch<Theta, Grad, Cost>;

pub type LbfgsHagerZhang = LBFGS<HagerZhangLS, Theta, Grad, Cost>;

pub type LbfgsMoreThuente = LBFGS<MoreThuenteLS, Theta, Grad, Cost>;
