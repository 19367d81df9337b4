//! Riccati–Hankel functions of complex argument, in ratio form.
//!
//! $\xi_n = \psi_n - i\chi_n$ and $\zeta_n = \psi_n + i\chi_n$ are the two
//! travelling-wave solutions of the Riccati–Bessel equation. For an absorbing
//! argument one grows like $e^{|\mathrm{Im}\,z|}$ and the other decays, so
//! their values overflow long before their ratios do. Only the successive
//! ratios $f_n / f_{n-1}$ and logarithmic derivatives $f_n' / f_n$ are stored.
//! Both functions are dominant in `n`, so upward recurrence is stable.

use num_complex::Complex64;

use crate::error::{MieError, Result};

/// Successive ratios and logarithmic derivatives of $\xi_n$, $\zeta_n$ at one
/// argument, for orders `0..=n_max`.
#[derive(Debug, Clone)]
pub struct RiccatiHankel {
    /// $\xi_n / \xi_{n-1}$; index 0 holds 1.
    pub xi_factors: Vec<Complex64>,
    /// $\zeta_n / \zeta_{n-1}$; index 0 holds 1.
    pub zeta_factors: Vec<Complex64>,
    /// $\xi_n' / \xi_n$.
    pub d_xi: Vec<Complex64>,
    /// $\zeta_n' / \zeta_n$.
    pub d_zeta: Vec<Complex64>,
}

impl RiccatiHankel {
    /// Tabulate orders `0..=n_max` at `z`.
    pub fn new(z: Complex64, n_max: usize) -> Result<Self> {
        if !z.is_finite() || z.norm() == 0.0 {
            return Err(MieError::invalid(format!(
                "Riccati-Hankel functions need a finite, non-zero argument, got {z}"
            )));
        }
        let i = Complex64::i();
        let one = Complex64::new(1.0, 0.0);
        let len = n_max + 1;

        let mut xi_factors = Vec::with_capacity(len);
        let mut zeta_factors = Vec::with_capacity(len);
        let mut d_xi = Vec::with_capacity(len);
        let mut d_zeta = Vec::with_capacity(len);

        // xi_0 = i e^{-iz}, zeta_0 = -i e^{iz}
        xi_factors.push(one);
        zeta_factors.push(one);
        d_xi.push(-i);
        d_zeta.push(i);

        let mut r_xi = 1.0 / z + i;
        let mut r_zeta = 1.0 / z - i;
        for n in 1..len {
            if n > 1 {
                let step = (2 * n - 1) as f64 / z;
                r_xi = step - 1.0 / r_xi;
                r_zeta = step - 1.0 / r_zeta;
            }
            let n_over_z = n as f64 / z;
            xi_factors.push(r_xi);
            zeta_factors.push(r_zeta);
            // f_n' = f_{n-1} - (n/z) f_n
            d_xi.push(1.0 / r_xi - n_over_z);
            d_zeta.push(1.0 / r_zeta - n_over_z);
        }

        Ok(Self {
            xi_factors,
            zeta_factors,
            d_xi,
            d_zeta,
        })
    }
}
