//! # miescat Core
//!
//! Mie-theory extinction for homogeneous and coated spheres.
//!
//! ## Conventions
//!
//! Refractive indices are `n − ik`: a negative imaginary part means the
//! material absorbs. Relative indices are particle over medium, size
//! parameters are $x = 2\pi n_{\text{med}} r / \lambda$. Lengths may be in any
//! unit as long as radius and wavelength agree.
//!
//! ## Modules
//!
//! - [`log_derivative`]: $D_n(z)$ by Lentz-seeded downward or upward recurrence.
//! - [`riccati`]: Riccati–Hankel ratio tables for complex arguments.
//! - [`coefficients`]: $a_n$, $b_n$ for homogeneous and coated spheres.
//! - [`efficiency`]: $Q_{\text{ext}}$ with small-particle branch selection.
//! - [`batch`]: wavelength sweeps over a compute backend.
//! - [`slab`]: Beer–Lambert attenuation through a particle slab.
//! - [`types`]: shared data types and size-parameter helpers.

pub mod batch;
pub mod coefficients;
pub mod efficiency;
pub mod error;
pub mod log_derivative;
pub mod riccati;
pub mod slab;
pub mod types;

pub use batch::{BatchDriver, CoatedParticle};
pub use efficiency::{coated_extinction_efficiency, extinction_efficiency};
pub use error::MieError;
pub use slab::{attenuate, transmittance, Attenuation};
pub use types::{Extinction, ExtinctionSample, IndexSpectrum, MieCoefficients, Wavelengths};
