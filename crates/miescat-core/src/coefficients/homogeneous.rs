//! Coefficients of a homogeneous sphere.
//!
//! # Reference
//! Bohren & Huffman, *Absorption and Scattering of Light by Small Particles*
//! (1983), §4.4; W. J. Wiscombe, *Appl. Opt.* **19**, 1505 (1980).

use num_complex::Complex64;

use crate::error::Result;
use crate::log_derivative::log_derivative;
use crate::types::{check_index, check_positive, order_cutoff, MieCoefficients};

/// Compute $a_n$, $b_n$ for orders `1..N_stop` of a sphere with relative
/// index `m` and size parameter `x`.
///
/// For `Re(m) < 0` the sphere is treated in the perfectly conducting limit,
/// where the interior field (and thus $D_n$) drops out.
pub fn homogeneous_coefficients(m: Complex64, x: f64) -> Result<MieCoefficients> {
    check_index("relative refractive index", m)?;
    check_positive("size parameter", x)?;

    let nstop = order_cutoff(x);
    let orders = nstop.saturating_sub(1);
    let mut a = Vec::with_capacity(orders);
    let mut b = Vec::with_capacity(orders);

    let (sin, cos) = x.sin_cos();
    let mut psi_nm1 = sin;
    let mut psi_n = psi_nm1 / x - cos;
    let mut xi_nm1 = Complex64::new(psi_nm1, cos);
    let mut xi_n = Complex64::new(psi_n, cos / x + sin);

    if m.re > 0.0 {
        let d = log_derivative(m, x, nstop + 1)?;
        for n in 1..nstop {
            let n_over_x = n as f64 / x;

            let temp = d[n] / m + n_over_x;
            a.push((temp * psi_n - psi_nm1) / (temp * xi_n - xi_nm1));
            let temp = d[n] * m + n_over_x;
            b.push((temp * psi_n - psi_nm1) / (temp * xi_n - xi_nm1));

            let xi = (2 * n + 1) as f64 * xi_n / x - xi_nm1;
            xi_nm1 = xi_n;
            xi_n = xi;
            psi_nm1 = psi_n;
            psi_n = xi_n.re;
        }
    } else {
        log::debug!("m = {m}: perfectly conducting limit");
        for n in 1..nstop {
            let n_over_x = n as f64 / x;
            a.push((n_over_x * psi_n - psi_nm1) / (n_over_x * xi_n - xi_nm1));
            b.push(psi_n / xi_n);

            let xi = (2 * n + 1) as f64 * xi_n / x - xi_nm1;
            xi_nm1 = xi_n;
            xi_n = xi;
            psi_nm1 = psi_n;
            psi_n = xi_n.re;
        }
    }

    Ok(MieCoefficients { a, b })
}
