//! Beer–Lambert attenuation through a dilute slab of identical particles.

use crate::error::{MieError, Result};

/// Absorbance above which single scattering no longer describes the slab.
pub const MULTIPLE_SCATTERING_THRESHOLD: f64 = 1.0;

/// Attenuation through a particle slab.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Attenuation {
    /// Optical depth $\tau = N d C_{\text{ext}}$.
    pub absorbance: f64,
    /// Transmitted fraction $e^{-\tau}$.
    pub transmittance: f64,
    /// Set when $\tau \ge 1$; the value is still computed.
    pub multiple_scattering_likely: bool,
}

/// Attenuate light through a slab with `density` particles per unit volume,
/// of `thickness`, each particle with extinction `cross_section`.
///
/// Units must be consistent (e.g. m⁻³, m, m²). The cross-section is not
/// sign-checked so that gain media pass through.
pub fn attenuate(density: f64, thickness: f64, cross_section: f64) -> Result<Attenuation> {
    check_non_negative("particle number density", density)?;
    check_non_negative("slab thickness", thickness)?;
    if !cross_section.is_finite() {
        return Err(MieError::invalid(format!(
            "extinction cross-section must be finite, got {cross_section}"
        )));
    }

    let absorbance = density * thickness * cross_section;
    let multiple_scattering_likely = absorbance >= MULTIPLE_SCATTERING_THRESHOLD;
    if multiple_scattering_likely {
        log::warn!(
            "slab absorbance {absorbance:.3} >= {MULTIPLE_SCATTERING_THRESHOLD}: \
             multiple scattering likely, Beer-Lambert result is unreliable"
        );
    }

    Ok(Attenuation {
        absorbance,
        transmittance: (-absorbance).exp(),
        multiple_scattering_likely,
    })
}

/// Transmitted fraction $e^{-N d C_{\text{ext}}}$; see [`attenuate`].
pub fn transmittance(density: f64, thickness: f64, cross_section: f64) -> Result<f64> {
    attenuate(density, thickness, cross_section).map(|a| a.transmittance)
}

fn check_non_negative(what: &str, value: f64) -> Result<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(MieError::invalid(format!("{what} must be finite and non-negative, got {value}")))
    }
}
