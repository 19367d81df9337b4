//! Core types shared across the extinction pipeline.
//!
//! All refractive indices use the `n − ik` convention: a negative imaginary
//! part denotes absorption. This holds for every public function in this
//! crate, so callers never conjugate.

use ndarray::Array1;
use num_complex::Complex64;
use serde::{Deserialize, Serialize};

use crate::error::{MieError, Result};

/// Partial-wave scattering amplitudes of a sphere.
///
/// Index `i` of `a` and `b` holds order `n = i + 1`.
#[derive(Debug, Clone)]
pub struct MieCoefficients {
    /// Electric multipole coefficients $a_n$.
    pub a: Vec<Complex64>,
    /// Magnetic multipole coefficients $b_n$.
    pub b: Vec<Complex64>,
}

impl MieCoefficients {
    /// Number of orders held.
    pub fn len(&self) -> usize {
        self.a.len()
    }

    pub fn is_empty(&self) -> bool {
        self.a.is_empty()
    }

    /// $\sum_n (2n+1)\,\mathrm{Re}(a_n + b_n)$, the extinction series.
    pub fn extinction_sum(&self) -> f64 {
        self.a
            .iter()
            .zip(&self.b)
            .enumerate()
            .map(|(i, (a, b))| (2 * i + 3) as f64 * (a + b).re)
            .sum()
    }
}

/// Wiscombe's truncation order $N_{\text{stop}} = \lfloor x + 4.05 x^{1/3} + 2 \rfloor + 1$.
///
/// Coefficient arrays hold orders `1..N_stop`, i.e. `N_stop − 1` entries.
pub fn order_cutoff(x: f64) -> usize {
    ((x + 4.05 * x.cbrt() + 2.0).floor() as usize + 1).max(1)
}

/// Size parameter $x = 2\pi n_{\text{med}} r / \lambda$.
///
/// `radius` and `wavelength` must share a length unit; `n_medium` is the real
/// part of the medium index.
pub fn size_parameter(n_medium: f64, radius: f64, wavelength: f64) -> Result<f64> {
    check_positive("medium refractive index (real part)", n_medium)?;
    check_positive("radius", radius)?;
    check_positive("wavelength", wavelength)?;
    Ok(2.0 * std::f64::consts::PI * n_medium * radius / wavelength)
}

pub(crate) fn check_positive(what: &str, value: f64) -> Result<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(MieError::invalid(format!("{what} must be finite and positive, got {value}")))
    }
}

pub(crate) fn check_index(what: &str, m: Complex64) -> Result<()> {
    if !m.is_finite() {
        return Err(MieError::invalid(format!("{what} must be finite, got {m}")));
    }
    if m.re == 0.0 {
        return Err(MieError::invalid(format!(
            "{what} has zero real part ({m}); the branch selection is undefined there"
        )));
    }
    Ok(())
}

/// Particle refractive index over a sweep: one value for all wavelengths or
/// one per wavelength.
#[derive(Debug, Clone)]
pub enum IndexSpectrum {
    Constant(Complex64),
    Sampled(Array1<Complex64>),
}

impl IndexSpectrum {
    pub(crate) fn at(&self, i: usize) -> Complex64 {
        match self {
            Self::Constant(n) => *n,
            Self::Sampled(values) => values[i],
        }
    }

    pub(crate) fn check_len(&self, what: &str, expected: usize) -> Result<()> {
        match self {
            Self::Sampled(values) if values.len() != expected => Err(MieError::invalid(format!(
                "{what} has {} samples but the sweep has {expected} wavelengths",
                values.len()
            ))),
            _ => Ok(()),
        }
    }
}

impl From<Complex64> for IndexSpectrum {
    fn from(n: Complex64) -> Self {
        Self::Constant(n)
    }
}

impl From<Array1<Complex64>> for IndexSpectrum {
    fn from(values: Array1<Complex64>) -> Self {
        Self::Sampled(values)
    }
}

/// Vacuum wavelength: a single value or a sweep.
#[derive(Debug, Clone)]
pub enum Wavelengths {
    Single(f64),
    Sweep(Array1<f64>),
}

impl From<f64> for Wavelengths {
    fn from(wavelength: f64) -> Self {
        Self::Single(wavelength)
    }
}

impl From<Array1<f64>> for Wavelengths {
    fn from(values: Array1<f64>) -> Self {
        Self::Sweep(values)
    }
}

/// Result of a batch evaluation, shaped like the wavelength input.
#[derive(Debug, Clone, PartialEq)]
pub enum Extinction {
    /// Dimensionless efficiency for a single wavelength.
    Efficiency(f64),
    /// Cross-sections (length unit squared), one per swept wavelength.
    CrossSections(Array1<f64>),
}

impl Extinction {
    pub fn as_efficiency(&self) -> Option<f64> {
        match self {
            Self::Efficiency(q) => Some(*q),
            Self::CrossSections(_) => None,
        }
    }

    pub fn as_cross_sections(&self) -> Option<&Array1<f64>> {
        match self {
            Self::Efficiency(_) => None,
            Self::CrossSections(c) => Some(c),
        }
    }
}

/// Extinction at a single wavelength, as written by the output writers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtinctionSample {
    /// Vacuum wavelength (same unit as the radius).
    pub wavelength: f64,
    /// Real part `n` of the particle (or core) index.
    pub n: f64,
    /// Extinction coefficient `k` of the particle (or core), `N = n − ik`.
    pub k: f64,
    /// Extinction efficiency $Q_{\text{ext}}$.
    pub efficiency: f64,
    /// Extinction cross-section $Q_{\text{ext}} \pi r^2$ (unit squared).
    pub cross_section: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_cutoff_matches_wiscombe() {
        // x = 1: floor(1 + 4.05 + 2) + 1 = 8
        assert_eq!(order_cutoff(1.0), 8);
        // x = 8: floor(8 + 8.1 + 2) + 1 = 19
        assert_eq!(order_cutoff(8.0), 19);
        assert!(order_cutoff(1e-6) >= 1);
    }

    #[test]
    fn test_size_parameter_rejects_degenerate_geometry() {
        assert!(size_parameter(1.0, 0.0, 500.0).is_err());
        assert!(size_parameter(1.0, -1.0, 500.0).is_err());
        assert!(size_parameter(1.0, 10.0, 0.0).is_err());
        assert!(size_parameter(1.0, 10.0, f64::NAN).is_err());
        let x = size_parameter(1.33, 50.0, 500.0).unwrap();
        assert!((x - 2.0 * std::f64::consts::PI * 1.33 * 0.1).abs() < 1e-12);
    }

    #[test]
    fn test_extinction_sum_weights_by_order() {
        let coeffs = MieCoefficients {
            a: vec![Complex64::new(1.0, 5.0), Complex64::new(0.5, 0.0)],
            b: vec![Complex64::new(0.0, 1.0), Complex64::new(0.25, -2.0)],
        };
        // 3·1 + 5·0.75
        assert!((coeffs.extinction_sum() - 6.75).abs() < 1e-12);
    }

    #[test]
    fn test_zero_real_index_is_rejected() {
        assert!(check_index("m", Complex64::new(0.0, -1.0)).is_err());
        assert!(check_index("m", Complex64::new(f64::INFINITY, 0.0)).is_err());
        assert!(check_index("m", Complex64::new(-0.5, 0.0)).is_ok());
    }
}
