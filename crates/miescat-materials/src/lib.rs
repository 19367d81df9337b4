//! # miescat Materials
//!
//! Refractive-index providers for the extinction kernels. Every material
//! implements [`MaterialProvider`](provider::MaterialProvider), which yields
//! the dielectric function $\varepsilon = \varepsilon_1 + i\varepsilon_2$ and
//! the matching `n − ik` refractive index.
//!
//! ## Available data sources
//!
//! | Identifier | Source | Module |
//! |------------|--------|--------|
//! | `Au_JC` | Johnson & Christy (1972) gold | [`johnson_christy`] |
//! | `TiO2_Palik`, `SiO2_Palik` | Palik handbook oxides | [`palik`] |
//! | `Au_Drude` | Free-electron gold | [`drude`] |
//! | `{ n, k }` | User constant | [`constant`] |
//!
//! Tabulated data is interpolated with natural cubic splines
//! ([`spline::CubicSpline`]). [`drude::SizeCorrected`] adds surface
//! scattering to any tabulated metal.

pub mod catalog;
pub mod constant;
pub mod drude;
pub mod johnson_christy;
pub mod palik;
pub mod provider;
pub mod spline;
pub mod tabulated;

pub use catalog::{lookup, MATERIAL_IDS};
pub use constant::ConstantIndex;
pub use drude::{DrudeMetal, SizeCorrected};
pub use provider::{MaterialError, MaterialProvider};
pub use tabulated::TabulatedMaterial;
