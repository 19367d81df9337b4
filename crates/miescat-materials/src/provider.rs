//! Material provider trait.
//!
//! Providers work in the physics convention $\varepsilon = \varepsilon_1 +
//! i\varepsilon_2$ with $\varepsilon_2 \ge 0$ for absorbing media. The index
//! handed to the kernels is the conjugate root, `n − ik`.

use ndarray::Array1;
use num_complex::Complex64;
use thiserror::Error;

/// Errors from material providers.
#[derive(Debug, Error)]
pub enum MaterialError {
    #[error("Wavelength {wavelength_nm} nm is outside the data range [{min}, {max}] nm")]
    OutOfRange {
        wavelength_nm: f64,
        min: f64,
        max: f64,
    },

    #[error("Material not found: {0}")]
    NotFound(String),

    #[error("Data error: {0}")]
    DataError(String),
}

/// Provides wavelength-dependent optical constants.
pub trait MaterialProvider: Send + Sync {
    /// Human-readable name of this material.
    fn name(&self) -> &str;

    /// Wavelength range over which data is available (nm).
    fn wavelength_range(&self) -> (f64, f64);

    /// Complex dielectric function $\varepsilon(\lambda)$.
    fn dielectric_function(&self, wavelength_nm: f64) -> Result<Complex64, MaterialError>;

    /// Complex refractive index `n − ik` at a given wavelength.
    ///
    /// Default implementation takes the principal root of $\varepsilon$ and
    /// conjugates it.
    fn refractive_index(&self, wavelength_nm: f64) -> Result<Complex64, MaterialError> {
        let eps = self.dielectric_function(wavelength_nm)?;
        Ok(eps.sqrt().conj())
    }

    /// Refractive index sampled on a wavelength grid.
    fn refractive_index_spectrum(
        &self,
        wavelengths_nm: &[f64],
    ) -> Result<Array1<Complex64>, MaterialError> {
        wavelengths_nm
            .iter()
            .map(|&wl| self.refractive_index(wl))
            .collect::<Result<Vec<_>, _>>()
            .map(Array1::from_vec)
    }
}

/// Fail with [`MaterialError::OutOfRange`] unless `wavelength_nm` lies in `range`.
pub(crate) fn check_range(wavelength_nm: f64, range: (f64, f64)) -> Result<(), MaterialError> {
    let (min, max) = range;
    if wavelength_nm >= min && wavelength_nm <= max {
        Ok(())
    } else {
        Err(MaterialError::OutOfRange {
            wavelength_nm,
            min,
            max,
        })
    }
}
