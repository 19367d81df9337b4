//! Coefficients of a two-layer (core + shell) sphere.
//!
//! `m1` and `m2` are the core and shell indices relative to the medium, `x`
//! and `y` the core and outer size parameters. The shell field of each order
//! is fixed by its logarithmic derivative at the core surface; that value is
//! carried to the outer surface in the travelling-wave basis $\xi_n$,
//! $\zeta_n$ and matched to the outside field there. No Bessel function
//! enters except through ratios, so opaque cores, thick shells and tiny
//! cores in large shells stay finite.
//!
//! # Reference
//! Bohren & Huffman (1983), §8.1 and §5.4 (small coated spheres);
//! O. B. Toon and T. P. Ackerman, *Appl. Opt.* **20**, 3657 (1981).

use num_complex::Complex64;

use crate::error::{MieError, Result};
use crate::log_derivative::log_derivative_downward;
use crate::riccati::RiccatiHankel;
use crate::types::{check_index, check_positive, order_cutoff, MieCoefficients};

/// Compute $a_n$, $b_n$ of a coated sphere for orders `1..N_stop(y)`.
pub fn coated_coefficients(
    m1: Complex64,
    m2: Complex64,
    x: f64,
    y: f64,
) -> Result<MieCoefficients> {
    check_coated(m1, m2, x, y)?;

    let nstop = order_cutoff(y);
    let n_max = nstop.saturating_sub(1);

    let (z_inner, z_outer) = (m2 * x, m2 * y);
    let d_core = log_derivative_downward(m1 * x, n_max + 1)?;
    let inner = RiccatiHankel::new(z_inner, n_max)?;
    let outer = RiccatiHankel::new(z_outer, n_max)?;

    // zeta_n(z_inner) xi_n(z_outer) / (xi_n(z_inner) zeta_n(z_outer)), from order 0
    let mut shell_ratio = (2.0 * Complex64::i() * (z_inner - z_outer)).exp();

    let (sin, cos) = y.sin_cos();
    let mut psi_nm1 = sin;
    let mut psi_n = psi_nm1 / y - cos;
    let mut xi_nm1 = Complex64::new(psi_nm1, cos);
    let mut xi_n = Complex64::new(psi_n, cos / y + sin);

    let mut a = Vec::with_capacity(n_max);
    let mut b = Vec::with_capacity(n_max);

    for n in 1..=n_max {
        shell_ratio *= inner.zeta_factors[n] / inner.xi_factors[n] * outer.xi_factors[n]
            / outer.zeta_factors[n];

        // Shell log-derivatives at the core surface, TM then TE
        let g_a = carry_across_shell(m2 / m1 * d_core[n], n, &inner, &outer, shell_ratio);
        let g_b = carry_across_shell(m1 / m2 * d_core[n], n, &inner, &outer, shell_ratio);

        let n_over_y = n as f64 / y;
        let temp = g_a / m2 + n_over_y;
        a.push((temp * psi_n - psi_nm1) / (temp * xi_n - xi_nm1));
        let temp = g_b * m2 + n_over_y;
        b.push((temp * psi_n - psi_nm1) / (temp * xi_n - xi_nm1));

        let xi = (2 * n + 1) as f64 * xi_n / y - xi_nm1;
        xi_nm1 = xi_n;
        xi_n = xi;
        psi_nm1 = psi_n;
        psi_n = xi_n.re;
    }

    Ok(MieCoefficients { a, b })
}

/// Log-derivative at the outer surface of the order-`n` shell solution whose
/// log-derivative at the core surface is `g`.
///
/// Writing that solution as $\zeta_n + W \xi_n$, the weight seen at the
/// outer surface is $T = W \xi_n(z_o) / \zeta_n(z_o)$, built from
/// `shell_ratio`. $|T|$ decays through an absorbing shell.
fn carry_across_shell(
    g: Complex64,
    n: usize,
    inner: &RiccatiHankel,
    outer: &RiccatiHankel,
    shell_ratio: Complex64,
) -> Complex64 {
    let t = -(inner.d_zeta[n] - g) / (inner.d_xi[n] - g) * shell_ratio;
    if t.norm() <= 1.0 {
        (outer.d_zeta[n] + t * outer.d_xi[n]) / (1.0 + t)
    } else {
        let t_inv = 1.0 / t;
        (outer.d_zeta[n] * t_inv + outer.d_xi[n]) / (t_inv + 1.0)
    }
}

/// Closed-form coefficients of a coated sphere much smaller than the
/// wavelength, through order 2.
///
/// Holds $a_1$ (radiatively corrected quasi-static dipole of the layered
/// sphere), $a_2$ (quadrupole) and $b_1$ (magnetic dipole, proportional to
/// $\int (\varepsilon(r) - 1) r^4 dr$); $b_2$ is of higher order and zero.
pub fn small_coated_coefficients(
    m1: Complex64,
    m2: Complex64,
    x: f64,
    y: f64,
) -> Result<MieCoefficients> {
    let [a1, a2, b1] = small_coated_terms(m1, m2, x, y)?.map(|c| c * (y * y));
    Ok(MieCoefficients {
        a: vec![a1, a2],
        b: vec![b1, Complex64::new(0.0, 0.0)],
    })
}

/// $a_1/y^2$, $a_2/y^2$, $b_1/y^2$ of the small coated sphere. Dividing out
/// $y^2$ analytically keeps the efficiency finite as $y \to 0$.
pub(crate) fn small_coated_terms(
    m1: Complex64,
    m2: Complex64,
    x: f64,
    y: f64,
) -> Result<[Complex64; 3]> {
    check_coated(m1, m2, x, y)?;

    let eps1 = m1 * m1;
    let eps2 = m2 * m2;
    let ratio = x / y;
    let i = Complex64::i();

    let alpha1 = layered_polarisability(1, eps1, eps2, ratio.powi(3));
    let t = 2.0 * i * y.powi(3) / 3.0 * alpha1;
    let a1 = 2.0 * i * y / 3.0 * alpha1 / (1.0 + t);

    let alpha2 = layered_polarisability(2, eps1, eps2, ratio.powi(5));
    let a2 = i * y.powi(3) / 30.0 * alpha2;

    let b1 = i / 45.0 * ((eps2 - 1.0) * y.powi(3) + (eps1 - eps2) * x.powi(3) * ratio * ratio);

    Ok([a1, a2, b1])
}

/// Static multipole polarisability factor of order `l` for a core
/// ($\varepsilon_1$) in a shell ($\varepsilon_2$) in unit medium, with
/// `fill = (x/y)^(2l+1)`. Reduces to $l(\varepsilon-1)/(l\varepsilon + l + 1)$
/// when the layers match.
fn layered_polarisability(l: u32, eps1: Complex64, eps2: Complex64, fill: f64) -> Complex64 {
    let l = l as f64;
    let u = l * (eps2 - eps1) / (l * eps1 + (l + 1.0) * eps2);
    let g = eps2 * (l - (l + 1.0) * u * fill) / (1.0 + u * fill);
    (g - l) / (g + l + 1.0)
}

fn check_coated(m1: Complex64, m2: Complex64, x: f64, y: f64) -> Result<()> {
    check_index("core relative refractive index", m1)?;
    check_index("shell relative refractive index", m2)?;
    check_positive("core size parameter", x)?;
    check_positive("outer size parameter", y)?;
    if y < x {
        return Err(MieError::invalid(format!(
            "outer size parameter {y} is smaller than core size parameter {x}"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coefficients::homogeneous_coefficients;

    // High orders are negligible and carry the homogeneous kernel's upward
    // psi recurrence error, so compare against the dominant coefficient.
    fn assert_coeffs_close(lhs: &MieCoefficients, rhs: &MieCoefficients, tol: f64) {
        assert_eq!(lhs.len(), rhs.len());
        let scale = rhs.a.iter().chain(&rhs.b).map(|c| c.norm()).fold(0.0, f64::max);
        for (l, r) in lhs.a.iter().zip(&rhs.a).chain(lhs.b.iter().zip(&rhs.b)) {
            let err = (l - r).norm();
            assert!(err <= tol * scale, "{l} vs {r}");
        }
    }

    #[test]
    fn test_matching_layers_reduce_to_homogeneous() {
        let m = Complex64::new(1.5, -0.1);
        let x = 3.0;
        let coated = coated_coefficients(m, m, x, x).unwrap();
        let homogeneous = homogeneous_coefficients(m, x).unwrap();
        assert_coeffs_close(&coated, &homogeneous, 1e-8);
    }

    #[test]
    fn test_matching_layers_metal() {
        let m = Complex64::new(0.2, -3.0);
        let x = 0.6;
        // core radius is irrelevant when both layers match
        let coated = coated_coefficients(m, m, 0.4, x).unwrap();
        let homogeneous = homogeneous_coefficients(m, x).unwrap();
        assert_coeffs_close(&coated, &homogeneous, 1e-8);
    }

    #[test]
    fn test_opaque_shell_hides_the_core() {
        let shell = Complex64::new(1.5, -5.0);
        let coated = coated_coefficients(Complex64::new(1.5, -0.1), shell, 2.0, 40.0).unwrap();
        let homogeneous = homogeneous_coefficients(shell, 40.0).unwrap();
        assert_coeffs_close(&coated, &homogeneous, 1e-10);
    }

    #[test]
    fn test_tiny_core_in_large_shell() {
        let shell = Complex64::new(1.33, 0.0);
        let coated = coated_coefficients(Complex64::new(1.5, -0.1), shell, 0.01, 100.0).unwrap();
        let homogeneous = homogeneous_coefficients(shell, 100.0).unwrap();
        assert_coeffs_close(&coated, &homogeneous, 1e-5);
    }

    #[test]
    fn test_strongly_absorbing_core_stays_finite() {
        // |Im(m1 x)| = 900: sin(m1 x) is not representable
        let coeffs =
            coated_coefficients(Complex64::new(0.2, -3.0), Complex64::new(1.45, 0.0), 300.0, 320.0)
                .unwrap();
        assert!(coeffs.a.iter().chain(&coeffs.b).all(|c| c.is_finite()));
    }

    #[test]
    fn test_small_form_reduces_to_rayleigh_dipole() {
        let m = Complex64::new(1.5, -0.2);
        let x = 0.01;
        let small = small_coated_coefficients(m, m, x, x).unwrap();
        let eps = m * m;
        let expected = 2.0 * Complex64::i() * x.powi(3) / 3.0 * (eps - 1.0) / (eps + 2.0);
        assert!((small.a[0] - expected).norm() < 1e-4 * expected.norm());
    }

    #[test]
    fn test_layered_polarisability_homogeneous_limit() {
        let eps = Complex64::new(-5.0, 1.2);
        for fill in [0.0, 0.3, 1.0] {
            let alpha = layered_polarisability(1, eps, eps, fill);
            let expected = (eps - 1.0) / (eps + 2.0);
            assert!((alpha - expected).norm() < 1e-12);
        }
    }

    #[test]
    fn test_shell_smaller_than_core_is_invalid() {
        let m = Complex64::new(1.5, 0.0);
        assert!(coated_coefficients(m, m, 1.0, 0.5).is_err());
        assert!(small_coated_coefficients(m, m, 0.02, 0.01).is_err());
    }
}
