//! TOML configuration for extinction jobs.

use std::path::Path;

use anyhow::{bail, ensure, Context};
use serde::Deserialize;

/// Top-level job configuration.
#[derive(Debug, Deserialize)]
pub struct JobConfig {
    pub simulation: SimulationConfig,
    pub particle: ParticleConfig,
    /// Beer–Lambert slab; when present, transmittance is reported.
    #[serde(default)]
    pub slab: Option<SlabConfig>,
    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Debug, Deserialize)]
pub struct SimulationConfig {
    /// Vacuum wavelengths in nm.
    pub wavelengths: WavelengthSpec,
    #[serde(default = "default_medium_n")]
    pub medium_n: f64,
    /// Medium extinction coefficient (`n − ik`). Default: 0.
    #[serde(default)]
    pub medium_k: f64,
    /// Compute backend: "auto", "cpu" or "serial". Default: "auto".
    #[serde(default = "default_backend")]
    pub backend: String,
    /// Worker threads for the CPU backend. Default: Rayon's global pool.
    #[serde(default)]
    pub threads: Option<usize>,
}

fn default_medium_n() -> f64 {
    1.0
}

fn default_backend() -> String {
    "auto".into()
}

/// Wavelength specification: either a range or explicit list.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum WavelengthSpec {
    Range { range: [f64; 2], points: usize },
    List { values: Vec<f64> },
}

impl WavelengthSpec {
    /// Expand to the list of wavelengths. A one-point range yields its start.
    pub fn grid(&self) -> Vec<f64> {
        match self {
            WavelengthSpec::Range { range, points } => {
                let [start, end] = *range;
                let steps = points.saturating_sub(1).max(1) as f64;
                (0..*points)
                    .map(|i| start + (end - start) * i as f64 / steps)
                    .collect()
            }
            WavelengthSpec::List { values } => values.clone(),
        }
    }
}

/// Either a catalogue identifier or an inline constant index.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum MaterialSpec {
    /// `material = { n = 1.5, k = 0.01 }`, read as `n − ik`.
    Constant {
        n: f64,
        #[serde(default)]
        k: f64,
    },
    /// `material = "Au_JC"`.
    Named(String),
}

impl std::fmt::Display for MaterialSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MaterialSpec::Constant { n, k } => write!(f, "n={n} k={k}"),
            MaterialSpec::Named(id) => f.write_str(id),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ParticleConfig {
    /// Core material, or the whole sphere when uncoated.
    pub material: MaterialSpec,
    /// Core radius in nm.
    pub radius_nm: f64,
    /// Add surface scattering to a gold core (Drude size correction).
    #[serde(default)]
    pub size_correction: bool,
    #[serde(default)]
    pub coat: Option<CoatConfig>,
}

#[derive(Debug, Deserialize)]
pub struct CoatConfig {
    pub material: MaterialSpec,
    pub outer_radius_nm: f64,
}

#[derive(Debug, Deserialize)]
pub struct SlabConfig {
    pub number_density_per_m3: f64,
    pub thickness_m: f64,
}

/// Output configuration.
#[derive(Debug, Deserialize)]
pub struct OutputConfig {
    /// Output directory (default: "./output").
    #[serde(default = "default_output_dir")]
    pub directory: String,
    /// Whether to save spectra as CSV (default: true).
    #[serde(default = "default_true")]
    pub save_spectra: bool,
    /// Whether to also save spectra as JSON (default: false).
    #[serde(default)]
    pub save_json: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: default_output_dir(),
            save_spectra: true,
            save_json: false,
        }
    }
}

fn default_output_dir() -> String {
    "./output".into()
}

fn default_true() -> bool {
    true
}

impl JobConfig {
    /// Reject configurations the engine would refuse, before any work starts.
    pub fn validate(&self) -> anyhow::Result<()> {
        let sim = &self.simulation;
        if let WavelengthSpec::Range { range, points } = &sim.wavelengths {
            ensure!(*points > 0, "wavelength range needs at least one point");
            ensure!(
                range[0] <= range[1],
                "wavelength range [{}, {}] is reversed",
                range[0],
                range[1]
            );
        }
        let grid = sim.wavelengths.grid();
        ensure!(!grid.is_empty(), "no wavelengths given");
        if let Some(bad) = grid.iter().find(|wl| !(wl.is_finite() && **wl > 0.0)) {
            bail!("wavelength {bad} nm is not positive");
        }
        ensure!(sim.medium_n > 0.0, "medium_n must be positive, got {}", sim.medium_n);
        match sim.backend.as_str() {
            "auto" | "cpu" | "serial" => {}
            other => bail!("unknown backend '{other}' (expected auto, cpu or serial)"),
        }
        if let Some(threads) = sim.threads {
            ensure!(threads > 0, "threads must be at least 1");
        }

        let particle = &self.particle;
        ensure!(
            particle.radius_nm > 0.0,
            "particle radius must be positive, got {} nm",
            particle.radius_nm
        );
        if let Some(coat) = &particle.coat {
            ensure!(
                coat.outer_radius_nm >= particle.radius_nm,
                "coat outer radius {} nm is smaller than the core radius {} nm",
                coat.outer_radius_nm,
                particle.radius_nm
            );
        }

        if let Some(slab) = &self.slab {
            ensure!(
                slab.number_density_per_m3 >= 0.0 && slab.thickness_m >= 0.0,
                "slab density and thickness must be non-negative"
            );
        }
        Ok(())
    }
}

/// Load, parse and validate a TOML job configuration file.
pub fn load_config(path: &Path) -> anyhow::Result<JobConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("reading {}", path.display()))?;
    let config: JobConfig =
        toml::from_str(&content).with_context(|| format!("parsing {}", path.display()))?;
    config.validate()?;
    Ok(config)
}
