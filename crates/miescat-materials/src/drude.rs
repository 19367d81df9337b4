//! Free-electron (Drude) metals and surface-scattering size correction.
//!
//! When a particle is smaller than the electron mean free path, collisions
//! with the boundary add to the bulk damping:
//!
//! $$\gamma(R) = \gamma_{\text{bulk}} + A\,\frac{v_F}{R}$$
//!
//! All energies are photon energies in eV, $\hbar\omega = hc/\lambda$.

use num_complex::Complex64;

use crate::provider::{check_range, MaterialError, MaterialProvider};

/// $hc$ in eV·nm.
pub const HC_EV_NM: f64 = 1239.841_984;

/// Reduced Planck constant in eV·s.
pub const HBAR_EV_S: f64 = 6.582_119_569e-16;

/// Photon energy (eV) at a vacuum wavelength (nm).
pub fn photon_energy_ev(wavelength_nm: f64) -> f64 {
    HC_EV_NM / wavelength_nm
}

/// Analytic Drude metal with optional surface-scattering correction.
#[derive(Debug, Clone)]
pub struct DrudeMetal {
    name: String,
    /// High-frequency background permittivity.
    pub eps_inf: f64,
    /// $\hbar\omega_p$ (eV).
    pub plasma_ev: f64,
    /// Bulk $\hbar\gamma$ (eV).
    pub damping_ev: f64,
    /// Fermi velocity (nm/s).
    pub fermi_velocity_nm_s: f64,
    /// Dimensionless surface-scattering constant $A$.
    pub scattering_constant: f64,
    radius_nm: Option<f64>,
}

impl DrudeMetal {
    /// Gold: ε∞ = 9.84, ħωp = 9.0 eV, ħγ = 0.067 eV, v_F = 1.40·10⁶ m/s.
    pub fn gold() -> Self {
        Self {
            name: "Au (Drude)".into(),
            eps_inf: 9.84,
            plasma_ev: 9.0,
            damping_ev: 0.067,
            fermi_velocity_nm_s: 1.40e15,
            scattering_constant: 1.0,
            radius_nm: None,
        }
    }

    /// Apply surface scattering for a particle of radius `radius_nm`.
    pub fn with_radius(mut self, radius_nm: f64) -> Result<Self, MaterialError> {
        if !(radius_nm.is_finite() && radius_nm > 0.0) {
            return Err(MaterialError::DataError(format!(
                "particle radius must be positive, got {radius_nm} nm"
            )));
        }
        self.radius_nm = Some(radius_nm);
        Ok(self)
    }

    /// Extra damping $\hbar A v_F / R$ (eV) from boundary collisions.
    pub fn surface_damping_ev(&self, radius_nm: f64) -> f64 {
        HBAR_EV_S * self.scattering_constant * self.fermi_velocity_nm_s / radius_nm
    }

    /// Total damping (eV), including surface scattering when a radius is set.
    pub fn effective_damping_ev(&self) -> f64 {
        self.damping_ev + self.radius_nm.map_or(0.0, |r| self.surface_damping_ev(r))
    }

    /// Free-electron term $-\omega_p^2 / (\omega^2 + i\omega\gamma)$.
    pub fn free_electron(&self, energy_ev: f64, damping_ev: f64) -> Complex64 {
        let denominator = Complex64::new(energy_ev * energy_ev, energy_ev * damping_ev);
        -(self.plasma_ev * self.plasma_ev) / denominator
    }
}

impl MaterialProvider for DrudeMetal {
    fn name(&self) -> &str {
        &self.name
    }

    /// 0.69–6.2 eV, where the free-electron picture is usable.
    fn wavelength_range(&self) -> (f64, f64) {
        (200.0, 1800.0)
    }

    fn dielectric_function(&self, wavelength_nm: f64) -> Result<Complex64, MaterialError> {
        check_range(wavelength_nm, self.wavelength_range())?;
        let energy = photon_energy_ev(wavelength_nm);
        Ok(self.eps_inf + self.free_electron(energy, self.effective_damping_ev()))
    }
}

/// A measured metal with its bulk free-electron damping swapped for the
/// size-corrected damping:
///
/// $$\varepsilon_R = \varepsilon_{\text{tab}} - \varepsilon_{\text{free}}(\gamma_{\text{bulk}})
///   + \varepsilon_{\text{free}}(\gamma_{\text{bulk}} + A v_F / R)$$
///
/// The interband (bound) contribution of the table is kept as measured.
#[derive(Debug, Clone)]
pub struct SizeCorrected<P> {
    inner: P,
    free: DrudeMetal,
    radius_nm: f64,
    name: String,
}

impl<P: MaterialProvider> SizeCorrected<P> {
    /// Correct `inner` using the free-electron parameters of `free`.
    pub fn new(inner: P, free: DrudeMetal, radius_nm: f64) -> Result<Self, MaterialError> {
        let free = free.with_radius(radius_nm)?;
        let name = format!("{} (r = {radius_nm} nm)", inner.name());
        Ok(Self {
            inner,
            free,
            radius_nm,
            name,
        })
    }

    pub fn radius_nm(&self) -> f64 {
        self.radius_nm
    }
}

impl<P: MaterialProvider> MaterialProvider for SizeCorrected<P> {
    fn name(&self) -> &str {
        &self.name
    }

    fn wavelength_range(&self) -> (f64, f64) {
        let (lo, hi) = self.inner.wavelength_range();
        let (free_lo, free_hi) = self.free.wavelength_range();
        (lo.max(free_lo), hi.min(free_hi))
    }

    fn dielectric_function(&self, wavelength_nm: f64) -> Result<Complex64, MaterialError> {
        check_range(wavelength_nm, self.wavelength_range())?;
        let measured = self.inner.dielectric_function(wavelength_nm)?;
        let energy = photon_energy_ev(wavelength_nm);
        let bulk = self.free.free_electron(energy, self.free.damping_ev);
        let corrected = self.free.free_electron(energy, self.free.effective_damping_ev());
        Ok(measured - bulk + corrected)
    }
}
