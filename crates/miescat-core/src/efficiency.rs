//! Extinction efficiency with small-particle / full-series branch selection.
//!
//! Below `|m|·x = 0.1` the partial-wave series is dominated by cancellation
//! between nearly equal Riccati–Bessel values, so a closed-form expansion is
//! used instead. The two branches are exposed separately so they can be
//! compared across the threshold.

use num_complex::Complex64;

use crate::coefficients::coated::small_coated_terms;
use crate::coefficients::{coated_coefficients, homogeneous_coefficients};
use crate::error::{MieError, Result};
use crate::types::{check_index, check_positive};

/// Threshold on `|m|·x` below which the small-particle forms are used.
pub const SMALL_PARTICLE_LIMIT: f64 = 0.1;

/// Whether `(m, x)` is evaluated with the small-particle expansion.
pub fn is_small_particle(m: Complex64, x: f64) -> bool {
    m.re > 0.0 && m.norm() * x < SMALL_PARTICLE_LIMIT
}

/// Whether a coated sphere is evaluated with the small-particle expansion.
pub fn is_small_coated(m1: Complex64, m2: Complex64, x: f64, y: f64) -> bool {
    is_small_particle(m1, x) && is_small_particle(m2, y)
}

/// Extinction efficiency $Q_{\text{ext}}$ of a homogeneous sphere.
pub fn extinction_efficiency(m: Complex64, x: f64) -> Result<f64> {
    if is_small_particle(m, x) {
        log::debug!("Q_ext(m={m}, x={x}): small-particle expansion");
        small_particle_efficiency(m, x)
    } else {
        series_efficiency(m, x)
    }
}

/// Small-particle expansion of $Q_{\text{ext}}$: electric dipole through
/// $x^4$ with radiative reaction, magnetic dipole and electric quadrupole.
///
/// # Reference
/// W. J. Wiscombe, NCAR Technical Note TN-140+STR (1979), eq. 8.
pub fn small_particle_efficiency(m: Complex64, x: f64) -> Result<f64> {
    check_index("relative refractive index", m)?;
    check_positive("size parameter", x)?;

    let i = Complex64::i();
    let m2 = m * m;
    let x2 = x * x;
    let x4 = x2 * x2;

    let d = m2 + 2.0 + (1.0 - 0.7 * m2) * x2 - (8.0 * m2 * m2 - 385.0 * m2 + 350.0) * x4 / 1400.0
        + 2.0 * i * (m2 - 1.0) * x2 * x * (1.0 - 0.1 * x2) / 3.0;
    let ahat1 = 2.0 * i * (m2 - 1.0) / 3.0 * (1.0 - 0.1 * x2 + (4.0 * m2 + 5.0) * x4 / 1400.0) / d;

    let bhat1 = i * x2 * (m2 - 1.0) / 45.0 * (1.0 + (2.0 * m2 - 5.0) / 70.0 * x2)
        / (1.0 - (2.0 * m2 - 5.0) / 30.0 * x2);

    let ahat2 = i * x2 * (m2 - 1.0) / 15.0 * (1.0 - x2 / 14.0)
        / (2.0 * m2 + 3.0 - (2.0 * m2 - 7.0) / 14.0 * x2);

    let q = 6.0 * x * (ahat1 + bhat1 + 5.0 * ahat2 / 3.0).re;
    representable(q, || format!("m = {m}, x = {x}"))
}

/// $Q_{\text{ext}} = \frac{2}{x^2} \sum_n (2n+1)\,\mathrm{Re}(a_n + b_n)$.
pub fn series_efficiency(m: Complex64, x: f64) -> Result<f64> {
    let coeffs = homogeneous_coefficients(m, x)?;
    let q = 2.0 * coeffs.extinction_sum() / (x * x);
    representable(q, || format!("m = {m}, x = {x}"))
}

/// Extinction efficiency of a coated sphere, normalised to the outer radius.
pub fn coated_extinction_efficiency(m1: Complex64, m2: Complex64, x: f64, y: f64) -> Result<f64> {
    if is_small_coated(m1, m2, x, y) {
        log::debug!("Q_ext(m1={m1}, m2={m2}, x={x}, y={y}): small-particle expansion");
        small_coated_efficiency(m1, m2, x, y)
    } else {
        coated_series_efficiency(m1, m2, x, y)
    }
}

/// Coated-sphere $Q_{\text{ext}}$ from the closed-form small-particle coefficients.
pub fn small_coated_efficiency(m1: Complex64, m2: Complex64, x: f64, y: f64) -> Result<f64> {
    let [a1, a2, b1] = small_coated_terms(m1, m2, x, y)?;
    let q = 2.0 * (3.0 * (a1 + b1).re + 5.0 * a2.re);
    representable(q, || format!("m1 = {m1}, m2 = {m2}, x = {x}, y = {y}"))
}

/// Coated-sphere $Q_{\text{ext}}$ from the full partial-wave series.
pub fn coated_series_efficiency(m1: Complex64, m2: Complex64, x: f64, y: f64) -> Result<f64> {
    let coeffs = coated_coefficients(m1, m2, x, y)?;
    let q = 2.0 * coeffs.extinction_sum() / (y * y);
    representable(q, || format!("m1 = {m1}, m2 = {m2}, x = {x}, y = {y}"))
}

/// Reject a non-finite efficiency instead of passing NaN or infinity on.
fn representable(q: f64, inputs: impl FnOnce() -> String) -> Result<f64> {
    if q.is_finite() {
        Ok(q)
    } else {
        Err(MieError::invalid(format!(
            "extinction efficiency is not representable in floating point ({q}) for {}",
            inputs()
        )))
    }
}
