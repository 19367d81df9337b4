//! Palik handbook oxides.
//!
//! E. D. Palik, *Handbook of Optical Constants of Solids* (Academic Press,
//! 1985). Rows are `(λ/nm, n, k)`.

use crate::provider::MaterialError;
use crate::tabulated::TabulatedMaterial;

pub const TIO2_ID: &str = "TiO2_Palik";
pub const SIO2_ID: &str = "SiO2_Palik";

/// Rutile TiO₂, ordinary ray. Absorbs below the ~380 nm band edge.
const TIO2: &[(f64, f64, f64)] = &[
    (300.0, 3.340, 0.880), (310.0, 3.140, 0.660), (320.0, 2.990, 0.480),
    (330.0, 2.870, 0.330), (340.0, 2.780, 0.220), (350.0, 2.720, 0.140),
    (360.0, 2.680, 0.080), (370.0, 2.655, 0.040), (380.0, 2.640, 0.018),
    (390.0, 2.629, 0.008), (400.0, 2.620, 0.003), (420.0, 2.607, 0.001),
    (440.0, 2.596, 0.000), (460.0, 2.587, 0.000), (480.0, 2.579, 0.000),
    (500.0, 2.572, 0.000), (520.0, 2.566, 0.000), (540.0, 2.560, 0.000),
    (560.0, 2.555, 0.000), (580.0, 2.551, 0.000), (600.0, 2.547, 0.000),
    (620.0, 2.543, 0.000), (640.0, 2.540, 0.000), (660.0, 2.537, 0.000),
    (680.0, 2.534, 0.000), (700.0, 2.531, 0.000), (720.0, 2.529, 0.000),
    (740.0, 2.527, 0.000), (760.0, 2.525, 0.000), (780.0, 2.523, 0.000),
    (800.0, 2.521, 0.000), (820.0, 2.519, 0.000), (840.0, 2.518, 0.000),
    (860.0, 2.516, 0.000), (880.0, 2.515, 0.000), (900.0, 2.513, 0.000),
    (920.0, 2.512, 0.000), (940.0, 2.511, 0.000), (960.0, 2.510, 0.000),
    (980.0, 2.508, 0.000), (1000.0, 2.507, 0.000),
];

/// Fused silica.
const SIO2: &[(f64, f64, f64)] = &[
    (300.0, 1.487, 0.000), (310.0, 1.484, 0.000), (320.0, 1.482, 0.000),
    (330.0, 1.480, 0.000), (340.0, 1.478, 0.000), (350.0, 1.476, 0.000),
    (360.0, 1.475, 0.000), (370.0, 1.474, 0.000), (380.0, 1.473, 0.000),
    (390.0, 1.472, 0.000), (400.0, 1.470, 0.000), (420.0, 1.469, 0.000),
    (440.0, 1.468, 0.000), (460.0, 1.467, 0.000), (480.0, 1.466, 0.000),
    (500.0, 1.462, 0.000), (520.0, 1.461, 0.000), (540.0, 1.460, 0.000),
    (560.0, 1.459, 0.000), (580.0, 1.458, 0.000), (600.0, 1.458, 0.000),
    (620.0, 1.457, 0.000), (640.0, 1.457, 0.000), (660.0, 1.456, 0.000),
    (680.0, 1.455, 0.000), (700.0, 1.455, 0.000), (720.0, 1.454, 0.000),
    (740.0, 1.454, 0.000), (760.0, 1.453, 0.000), (780.0, 1.453, 0.000),
    (800.0, 1.452, 0.000), (820.0, 1.452, 0.000), (840.0, 1.451, 0.000),
    (860.0, 1.451, 0.000), (880.0, 1.450, 0.000), (900.0, 1.450, 0.000),
    (920.0, 1.450, 0.000), (940.0, 1.449, 0.000), (960.0, 1.449, 0.000),
    (980.0, 1.449, 0.000), (1000.0, 1.448, 0.000),
];

/// Rutile TiO₂, 300–1000 nm.
pub fn tio2() -> Result<TabulatedMaterial, MaterialError> {
    TabulatedMaterial::from_index_table("TiO₂ (Palik)", TIO2)
}

/// Fused silica SiO₂, 300–1000 nm.
pub fn sio2() -> Result<TabulatedMaterial, MaterialError> {
    TabulatedMaterial::from_index_table("SiO₂ (Palik)", SIO2)
}
