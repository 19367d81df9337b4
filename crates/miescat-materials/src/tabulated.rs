//! Spline-interpolated tabulated dielectric data.

use num_complex::Complex64;

use crate::provider::{check_range, MaterialError, MaterialProvider};
use crate::spline::CubicSpline;

/// A material known on a wavelength table, interpolated per component.
#[derive(Debug, Clone)]
pub struct TabulatedMaterial {
    name: String,
    spline_real: CubicSpline,
    spline_imag: CubicSpline,
}

impl TabulatedMaterial {
    /// Build from $\varepsilon_1$, $\varepsilon_2$ sampled at `wavelengths_nm`.
    pub fn from_dielectric(
        name: impl Into<String>,
        wavelengths_nm: Vec<f64>,
        eps_real: Vec<f64>,
        eps_imag: Vec<f64>,
    ) -> Result<Self, MaterialError> {
        Ok(Self {
            name: name.into(),
            spline_real: CubicSpline::new(wavelengths_nm.clone(), eps_real)?,
            spline_imag: CubicSpline::new(wavelengths_nm, eps_imag)?,
        })
    }

    /// Build from `(λ/nm, n, k)` rows, converting via $\varepsilon_1 = n^2 - k^2$,
    /// $\varepsilon_2 = 2nk$.
    pub fn from_index_table(
        name: impl Into<String>,
        rows: &[(f64, f64, f64)],
    ) -> Result<Self, MaterialError> {
        let wavelengths_nm = rows.iter().map(|&(wl, _, _)| wl).collect();
        let eps_real = rows.iter().map(|&(_, n, k)| n * n - k * k).collect();
        let eps_imag = rows.iter().map(|&(_, n, k)| 2.0 * n * k).collect();
        Self::from_dielectric(name, wavelengths_nm, eps_real, eps_imag)
    }
}

impl MaterialProvider for TabulatedMaterial {
    fn name(&self) -> &str {
        &self.name
    }

    fn wavelength_range(&self) -> (f64, f64) {
        self.spline_real.domain()
    }

    fn dielectric_function(&self, wavelength_nm: f64) -> Result<Complex64, MaterialError> {
        check_range(wavelength_nm, self.wavelength_range())?;
        Ok(Complex64::new(
            self.spline_real.evaluate(wavelength_nm),
            self.spline_imag.evaluate(wavelength_nm),
        ))
    }
}
