//! Built-in materials by identifier.

use crate::drude::DrudeMetal;
use crate::johnson_christy::{self, GOLD_ID};
use crate::palik::{self, SIO2_ID, TIO2_ID};
use crate::provider::{MaterialError, MaterialProvider};

/// Identifier of [`DrudeMetal::gold`].
pub const DRUDE_GOLD_ID: &str = "Au_Drude";

/// `(identifier, description)` for every built-in material.
pub const MATERIAL_IDS: &[(&str, &str)] = &[
    (GOLD_ID, "Gold, Johnson & Christy (1972), 400–800 nm"),
    (DRUDE_GOLD_ID, "Gold, free-electron Drude model, 200–1800 nm"),
    (TIO2_ID, "Rutile TiO₂, Palik, 300–1000 nm"),
    (SIO2_ID, "Fused silica SiO₂, Palik, 300–1000 nm"),
];

/// Load a built-in material.
pub fn lookup(id: &str) -> Result<Box<dyn MaterialProvider>, MaterialError> {
    let provider: Box<dyn MaterialProvider> = match id {
        GOLD_ID => Box::new(johnson_christy::gold()?),
        DRUDE_GOLD_ID => Box::new(DrudeMetal::gold()),
        TIO2_ID => Box::new(palik::tio2()?),
        SIO2_ID => Box::new(palik::sio2()?),
        other => {
            let known: Vec<&str> = MATERIAL_IDS.iter().map(|(id, _)| *id).collect();
            return Err(MaterialError::NotFound(format!(
                "'{other}' (valid identifiers: {})",
                known.join(", ")
            )));
        }
    };
    Ok(provider)
}
