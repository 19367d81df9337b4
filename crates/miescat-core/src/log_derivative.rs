//! Logarithmic derivative of the Riccati–Bessel function $\psi_n$.
//!
//! $D_n(z) = \psi_n'(z) / \psi_n(z)$ is evaluated for orders `0..N` either by
//! downward recurrence seeded with Lentz's continued fraction, which is stable
//! everywhere, or by the cheaper upward recurrence, which is only stable for
//! weakly absorbing, moderate-index spheres.
//!
//! # Reference
//! W. J. Lentz, *Appl. Opt.* **15**, 668–671 (1976);
//! W. J. Wiscombe, *Appl. Opt.* **19**, 1505–1509 (1980).

use num_complex::Complex64;

use crate::error::{MieError, Result};

/// Cap on continued-fraction iterations before reporting non-convergence.
pub const MAX_LENTZ_ITERATIONS: usize = 100_000;

const LENTZ_TOLERANCE: f64 = 1e-12;

/// Whether `D_n(m·x)` must be computed by downward recurrence.
///
/// Upward recurrence diverges for `Re(m)` outside `[1, 10]`, for strong
/// absorption, or once `x·|Im(m)|` exceeds Wiscombe's quadratic bound.
pub fn needs_downward_recurrence(m: Complex64, x: f64) -> bool {
    let n = m.re;
    let kappa = m.im.abs();
    n < 1.0 || n > 10.0 || kappa > 10.0 || x * kappa >= 3.9 - 10.8 * n + 13.78 * n * n
}

/// $D_n(m x)$ for `n = 0..n_terms`, choosing the stable recurrence.
pub fn log_derivative(m: Complex64, x: f64, n_terms: usize) -> Result<Vec<Complex64>> {
    let z = m * x;
    if needs_downward_recurrence(m, x) {
        log::trace!("D_n(z={z}): downward recurrence, {n_terms} orders");
        log_derivative_downward(z, n_terms)
    } else {
        log::trace!("D_n(z={z}): upward recurrence, {n_terms} orders");
        log_derivative_upward(z, n_terms)
    }
}

/// $D_N(z)$ from Lentz's continued fraction.
pub fn lentz_seed(z: Complex64, order: usize) -> Result<Complex64> {
    lentz_seed_capped(z, order, MAX_LENTZ_ITERATIONS)
}

pub(crate) fn lentz_seed_capped(
    z: Complex64,
    order: usize,
    max_iterations: usize,
) -> Result<Complex64> {
    check_argument(z)?;
    let order_f = order as f64;
    let mut zinv = 2.0 / z;
    let alpha = (order_f + 0.5) * zinv;
    let mut aj = -(order_f + 1.5) * zinv;
    let mut alpha_j1 = aj + 1.0 / alpha;
    let mut alpha_j2 = aj;
    let mut ratio = alpha_j1 / alpha_j2;
    let mut runratio = alpha * ratio;

    let mut iterations = 0;
    while (ratio.norm() - 1.0).abs() >= LENTZ_TOLERANCE {
        if iterations >= max_iterations || !ratio.is_finite() {
            return Err(MieError::Convergence { order, iterations });
        }
        aj = zinv - aj;
        alpha_j1 = 1.0 / alpha_j1 + aj;
        alpha_j2 = 1.0 / alpha_j2 + aj;
        ratio = alpha_j1 / alpha_j2;
        zinv = -zinv;
        runratio *= ratio;
        iterations += 1;
    }
    log::trace!("Lentz seed for order {order} converged in {iterations} iterations");

    let seed = -order_f / z + runratio;
    if seed.is_finite() {
        Ok(seed)
    } else {
        Err(MieError::Convergence { order, iterations })
    }
}

/// $D_n(z)$ for `n = 0..n_terms` by downward recurrence from $D_{N}$,
/// `N = n_terms`.
pub fn log_derivative_downward(z: Complex64, n_terms: usize) -> Result<Vec<Complex64>> {
    let mut d = vec![Complex64::new(0.0, 0.0); n_terms];
    let mut last = lentz_seed(z, n_terms)?;
    for n in (1..=n_terms).rev() {
        let n_over_z = n as f64 / z;
        last = n_over_z - 1.0 / (last + n_over_z);
        d[n - 1] = last;
    }
    Ok(d)
}

/// $D_n(z)$ for `n = 0..n_terms` by upward recurrence from the closed-form
/// $D_1$.
pub fn log_derivative_upward(z: Complex64, n_terms: usize) -> Result<Vec<Complex64>> {
    check_argument(z)?;
    let mut d = vec![Complex64::new(0.0, 0.0); n_terms];
    if n_terms == 0 {
        return Ok(d);
    }

    let i = Complex64::i();
    let e = (-2.0 * i * z).exp();
    let d1 = -1.0 / z + (1.0 - e) / ((1.0 - e) / z - i * (1.0 + e));
    let z_inv = 1.0 / z;
    d[0] = z_inv - 1.0 / (d1 + z_inv);
    if n_terms > 1 {
        d[1] = d1;
    }
    for n in 2..n_terms {
        let n_over_z = n as f64 / z;
        d[n] = 1.0 / (n_over_z - d[n - 1]) - n_over_z;
    }
    Ok(d)
}

fn check_argument(z: Complex64) -> Result<()> {
    if !z.is_finite() || z.norm() == 0.0 {
        return Err(MieError::invalid(format!(
            "logarithmic derivative needs a finite, non-zero argument, got {z}"
        )));
    }
    Ok(())
}
