//! Johnson & Christy noble-metal data.
//!
//! P. B. Johnson and R. W. Christy, *Phys. Rev. B* **6**, 4370 (1972).

use crate::provider::MaterialError;
use crate::tabulated::TabulatedMaterial;

/// Catalogue identifier of [`gold`].
pub const GOLD_ID: &str = "Au_JC";

/// Gold, 400–800 nm.
pub fn gold() -> Result<TabulatedMaterial, MaterialError> {
    let wavelengths = vec![400.0, 450.0, 500.0, 550.0, 600.0, 650.0, 700.0, 750.0, 800.0];
    let eps_real = vec![-1.66, -1.95, -2.83, -5.42, -9.64, -14.05, -18.47, -23.08, -28.24];
    let eps_imag = vec![5.29, 4.01, 3.07, 2.26, 1.66, 1.36, 1.18, 1.10, 1.08];
    TabulatedMaterial::from_dielectric("Au (Johnson & Christy)", wavelengths, eps_real, eps_imag)
}
