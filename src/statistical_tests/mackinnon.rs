//! MacKinnon approximate p-values and critical values for the ADF test.
//!
//! Only the single-series, constant-only case is tabulated: that is the
//! regression [`crate::statistical_tests::adf`] runs.
//!
//! - p-values: MacKinnon (1994) response surface, `Φ(Σ cᵢ τⁱ)`, with one
//!   polynomial for the lower tail and one for the rest.
//! - critical values: MacKinnon (2010), `c₀ + c₁/n + c₂/n² + c₃/n³`.
use statrs::function::erf::erfc;

/// Statistics above this are assigned p = 1.
const TAU_MAX: f64 = 2.74;
/// Statistics below this are assigned p = 0.
const TAU_MIN: f64 = -18.83;
/// Switch point between the small-p and large-p polynomials.
const TAU_STAR: f64 = -1.61;

const TAU_SMALLP: [f64; 3] = [2.1659, 1.4412, 0.038269];
const TAU_LARGEP: [f64; 4] = [1.7339, 0.93202, -0.12745, -0.010368];

/// Rows are the 1%, 5%, 10% levels; columns the `1/nⁱ` coefficients.
const TAU_CRIT_2010: [[f64; 4]; 3] = [
    [-3.43035, -6.5393, -16.786, -79.433],
    [-2.86154, -2.8903, -4.234, -40.04],
    [-2.56677, -1.5384, -2.809, 0.0],
];

/// ADF critical values at the conventional levels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CriticalValues {
    pub one_pct: f64,
    pub five_pct: f64,
    pub ten_pct: f64,
}

/// Approximate p-value of an ADF statistic `tau` (constant, no trend).
pub fn mackinnon_p_value(tau: f64) -> f64 {
    if tau > TAU_MAX {
        return 1.0;
    }
    if tau < TAU_MIN {
        return 0.0;
    }
    let z = if tau <= TAU_STAR { horner(&TAU_SMALLP, tau) } else { horner(&TAU_LARGEP, tau) };
    std_normal_cdf(z)
}

/// Finite-sample critical values for `nobs` regression observations.
pub fn mackinnon_critical_values(nobs: usize) -> CriticalValues {
    let inv = 1.0 / nobs as f64;
    let at = |row: usize| horner(&TAU_CRIT_2010[row], inv);
    CriticalValues { one_pct: at(0), five_pct: at(1), ten_pct: at(2) }
}

/// `c₀ + c₁x + c₂x² + …`
fn horner(coefs: &[f64], x: f64) -> f64 {
    coefs.iter().rev().fold(0.0, |acc, c| acc * x + c)
}

fn std_normal_cdf(x: f64) -> f64 {
    0.5 * erfc(-x / std::f64::consts::SQRT_2)
}
