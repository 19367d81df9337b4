//! Job runner: ties together materials, the batch driver and output writers.

use std::io::Write;
use std::path::Path;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use ndarray::Array1;
use num_complex::Complex64;
use serde::Serialize;

use miescat_compute::{ComputeBackend, CpuBackend, SerialBackend};
use miescat_core::efficiency::{extinction_efficiency, is_small_particle};
use miescat_core::{attenuate, BatchDriver, CoatedParticle, ExtinctionSample, IndexSpectrum};
use miescat_materials::catalog::DRUDE_GOLD_ID;
use miescat_materials::johnson_christy::GOLD_ID;
use miescat_materials::{lookup, ConstantIndex, DrudeMetal, MaterialProvider, SizeCorrected};

use crate::config::{JobConfig, MaterialSpec};

/// nm² → m².
const NM2_TO_M2: f64 = 1e-18;

/// One row of the output spectrum.
#[derive(Debug, Clone, Serialize)]
pub struct SpectrumRow {
    #[serde(flatten)]
    pub sample: ExtinctionSample,
    /// Slab transmittance, when a slab is configured.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transmittance: Option<f64>,
}

/// Run an extinction sweep from a parsed job configuration.
pub fn run_simulation(job: &JobConfig) -> Result<Vec<SpectrumRow>> {
    let sim = &job.simulation;
    let wavelengths = sim.wavelengths.grid();
    let grid = Array1::from_vec(wavelengths.clone());
    let medium = Complex64::new(sim.medium_n, -sim.medium_k);

    let backend = create_backend(&sim.backend, sim.threads)?;
    let info = backend.device_info();
    println!("Backend: {} ({} threads)", info.name, info.threads);
    let driver = BatchDriver::new(backend);

    let particle = &job.particle;
    let core = resolve_material(&particle.material, particle.radius_nm, particle.size_correction)?;
    println!("Core: {} (r = {} nm)", core.name(), particle.radius_nm);
    let core_index = core
        .refractive_index_spectrum(&wavelengths)
        .with_context(|| format!("material '{}'", particle.material))?;

    let samples = match &particle.coat {
        None => driver
            .spectrum(&IndexSpectrum::Sampled(core_index), medium, particle.radius_nm, &grid)
            .context("extinction sweep failed")?,
        Some(coat) => {
            let shell = resolve_material(&coat.material, coat.outer_radius_nm, false)?;
            println!("Coat: {} (r = {} nm)", shell.name(), coat.outer_radius_nm);
            let coat_index = shell
                .refractive_index_spectrum(&wavelengths)
                .with_context(|| format!("material '{}'", coat.material))?;
            let coated = CoatedParticle {
                core: IndexSpectrum::Sampled(core_index),
                coat: IndexSpectrum::Sampled(coat_index),
                core_radius: particle.radius_nm,
                coat_radius: coat.outer_radius_nm,
            };
            driver
                .coated_spectrum(&coated, medium, &grid)
                .context("coated extinction sweep failed")?
        }
    };

    let mut flagged = 0;
    let rows = samples
        .into_iter()
        .map(|sample| -> Result<SpectrumRow> {
            let transmittance = match &job.slab {
                Some(slab) => {
                    let attenuation = attenuate(
                        slab.number_density_per_m3,
                        slab.thickness_m,
                        sample.cross_section * NM2_TO_M2,
                    )
                    .with_context(|| format!("slab at λ={:.1} nm", sample.wavelength))?;
                    if attenuation.multiple_scattering_likely {
                        flagged += 1;
                    }
                    Some(attenuation.transmittance)
                }
                None => None,
            };
            Ok(SpectrumRow { sample, transmittance })
        })
        .collect::<Result<Vec<_>>>()?;

    if flagged > 0 {
        println!(
            "Warning: {flagged} of {} wavelengths have absorbance >= 1; multiple scattering likely",
            rows.len()
        );
    }
    Ok(rows)
}

/// Resolve a material spec into a provider, optionally size-corrected for a
/// particle of `radius_nm`.
pub fn resolve_material(
    spec: &MaterialSpec,
    radius_nm: f64,
    size_correction: bool,
) -> Result<Box<dyn MaterialProvider>> {
    let id = match spec {
        MaterialSpec::Constant { n, k } if !size_correction => {
            return Ok(Box::new(ConstantIndex::new(*n, *k)));
        }
        MaterialSpec::Constant { .. } => {
            bail!("size correction needs a gold material, not a constant index")
        }
        MaterialSpec::Named(id) => id.as_str(),
    };

    if !size_correction {
        return Ok(lookup(id)?);
    }
    match id {
        GOLD_ID => {
            let table = miescat_materials::johnson_christy::gold()?;
            Ok(Box::new(SizeCorrected::new(table, DrudeMetal::gold(), radius_nm)?))
        }
        DRUDE_GOLD_ID => Ok(Box::new(DrudeMetal::gold().with_radius(radius_nm)?)),
        other => bail!(
            "size correction is only available for {GOLD_ID} and {DRUDE_GOLD_ID}, not '{other}'"
        ),
    }
}

/// Select a compute backend.
///
/// - `"serial"`: single-threaded.
/// - `"cpu"`, `"auto"`: Rayon, with a dedicated pool when `threads` is set.
pub fn create_backend(preference: &str, threads: Option<usize>) -> Result<Arc<dyn ComputeBackend>> {
    let backend: Arc<dyn ComputeBackend> = match (preference, threads) {
        ("serial", _) => Arc::new(SerialBackend),
        ("cpu" | "auto", None) => Arc::new(CpuBackend::new()),
        ("cpu" | "auto", Some(n)) => Arc::new(CpuBackend::with_threads(n)?),
        (other, _) => bail!("unknown backend '{other}'"),
    };
    log::info!("compute backend: {:?}", backend.device_info());
    Ok(backend)
}

/// Where a single-point efficiency is evaluated.
#[derive(Debug, Clone, Copy)]
pub enum PointGeometry {
    SizeParameter(f64),
    Physical { radius: f64, wavelength: f64 },
}

/// Extinction efficiency at one point; also reports whether the
/// small-particle expansion was used.
pub fn point_efficiency(
    particle: Complex64,
    medium_n: f64,
    geometry: PointGeometry,
) -> Result<(f64, bool)> {
    let m = particle / medium_n;
    let x = match geometry {
        PointGeometry::SizeParameter(x) => x,
        PointGeometry::Physical { radius, wavelength } => {
            miescat_core::types::size_parameter(medium_n, radius, wavelength)?
        }
    };
    let q = extinction_efficiency(m, x)?;
    Ok((q, is_small_particle(m, x)))
}

/// Write spectra to a CSV file with a metadata header.
pub fn write_spectra_csv(rows: &[SpectrumRow], path: &Path, job: &JobConfig) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let mut file = std::fs::File::create(path)
        .with_context(|| format!("creating {}", path.display()))?;

    writeln!(file, "# miescat extinction spectra")?;
    writeln!(file, "# version: {}", env!("CARGO_PKG_VERSION"))?;
    writeln!(
        file,
        "# medium: n={} k={}",
        job.simulation.medium_n, job.simulation.medium_k
    )?;
    writeln!(
        file,
        "# particle: material={}, radius={} nm, size_correction={}",
        job.particle.material, job.particle.radius_nm, job.particle.size_correction
    )?;
    if let Some(coat) = &job.particle.coat {
        writeln!(
            file,
            "# coat: material={}, outer_radius={} nm",
            coat.material, coat.outer_radius_nm
        )?;
    }
    if let Some(slab) = &job.slab {
        writeln!(
            file,
            "# slab: number_density={:e} m^-3, thickness={:e} m",
            slab.number_density_per_m3, slab.thickness_m
        )?;
    }
    writeln!(file, "#")?;

    let has_slab = rows.iter().any(|r| r.transmittance.is_some());
    if has_slab {
        writeln!(file, "wavelength_nm,n,k,q_ext,c_ext_nm2,transmittance")?;
    } else {
        writeln!(file, "wavelength_nm,n,k,q_ext,c_ext_nm2")?;
    }

    for row in rows {
        let s = &row.sample;
        write!(
            file,
            "{:.2},{:.6},{:.6},{:.6e},{:.6e}",
            s.wavelength, s.n, s.k, s.efficiency, s.cross_section
        )?;
        match row.transmittance {
            Some(t) => writeln!(file, ",{t:.6e}")?,
            None => writeln!(file)?,
        }
    }

    println!("Spectra written to: {}", path.display());
    Ok(())
}

/// Write spectra to a JSON file.
pub fn write_spectra_json(rows: &[SpectrumRow], path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(rows).context("JSON serialisation")?;
    std::fs::write(path, json).with_context(|| format!("writing {}", path.display()))?;

    println!("Spectra (JSON) written to: {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{
        OutputConfig, ParticleConfig, SimulationConfig, SlabConfig, WavelengthSpec,
    };
    use approx::assert_relative_eq;
    use std::f64::consts::PI;

    fn job(material: MaterialSpec, slab: Option<SlabConfig>) -> JobConfig {
        JobConfig {
            simulation: SimulationConfig {
                wavelengths: WavelengthSpec::List { values: vec![450.0, 550.0, 650.0] },
                medium_n: 1.0,
                medium_k: 0.0,
                backend: "serial".into(),
                threads: None,
            },
            particle: ParticleConfig {
                material,
                radius_nm: 40.0,
                size_correction: false,
                coat: None,
            },
            slab,
            output: OutputConfig::default(),
        }
    }

    #[test]
    fn test_constant_index_sweep_matches_kernel() {
        let job = job(MaterialSpec::Constant { n: 1.5, k: 0.01 }, None);
        let rows = run_simulation(&job).unwrap();
        assert_eq!(rows.len(), 3);
        for row in &rows {
            let x = 2.0 * PI * 40.0 / row.sample.wavelength;
            let q = extinction_efficiency(Complex64::new(1.5, -0.01), x).unwrap();
            assert_relative_eq!(row.sample.cross_section, q * PI * 1600.0, max_relative = 1e-12);
            assert_eq!(row.sample.k, 0.01);
            assert!(row.transmittance.is_none());
        }
    }

    #[test]
    fn test_slab_transmittance_uses_square_metres() {
        let slab = SlabConfig {
            number_density_per_m3: 1e15,
            thickness_m: 1e-2,
        };
        let rows = run_simulation(&job(MaterialSpec::Named("Au_JC".into()), Some(slab))).unwrap();
        for row in &rows {
            let tau = 1e15 * 1e-2 * row.sample.cross_section * 1e-18;
            assert_relative_eq!(row.transmittance.unwrap(), (-tau).exp(), max_relative = 1e-12);
        }
    }

    #[test]
    fn test_size_correction_requires_gold() {
        assert!(resolve_material(&MaterialSpec::Named("SiO2_Palik".into()), 5.0, true).is_err());
        assert!(resolve_material(&MaterialSpec::Constant { n: 1.5, k: 0.0 }, 5.0, true).is_err());
        let corrected = resolve_material(&MaterialSpec::Named("Au_JC".into()), 5.0, true).unwrap();
        let bulk = resolve_material(&MaterialSpec::Named("Au_JC".into()), 5.0, false).unwrap();
        let eps_corrected = corrected.dielectric_function(600.0).unwrap();
        let eps_bulk = bulk.dielectric_function(600.0).unwrap();
        assert!(eps_corrected.im > eps_bulk.im);
    }

    #[test]
    fn test_out_of_range_material_fails_the_run() {
        let mut job = job(MaterialSpec::Named("Au_JC".into()), None);
        job.simulation.wavelengths = WavelengthSpec::List { values: vec![300.0] };
        assert!(run_simulation(&job).is_err());
    }

    #[test]
    fn test_point_efficiency_branches() {
        let (q, small) = point_efficiency(
            Complex64::new(1.5, -0.1),
            1.0,
            PointGeometry::SizeParameter(0.01),
        )
        .unwrap();
        assert!(small && q > 0.0);

        let (q, small) = point_efficiency(
            Complex64::new(1.55, 0.0),
            1.0,
            PointGeometry::Physical { radius: 5.213 * 500.0 / (2.0 * PI), wavelength: 500.0 },
        )
        .unwrap();
        assert!(!small);
        assert_relative_eq!(q, 3.1054, max_relative = 1e-3);
    }

    #[test]
    fn test_writers_emit_header_and_rows() {
        let dir = tempfile::tempdir().unwrap();
        let slab = SlabConfig {
            number_density_per_m3: 1e14,
            thickness_m: 1e-3,
        };
        let job = job(MaterialSpec::Constant { n: 1.5, k: 0.0 }, Some(slab));
        let rows = run_simulation(&job).unwrap();

        let csv_path = dir.path().join("nested").join("spectra.csv");
        write_spectra_csv(&rows, &csv_path, &job).unwrap();
        let csv = std::fs::read_to_string(&csv_path).unwrap();
        assert!(csv.starts_with("# miescat extinction spectra"));
        assert!(csv.contains("# slab:"));
        let data: Vec<&str> = csv.lines().filter(|l| !l.starts_with('#')).collect();
        assert_eq!(data[0], "wavelength_nm,n,k,q_ext,c_ext_nm2,transmittance");
        assert_eq!(data.len(), 4);
        assert_eq!(data[1].split(',').count(), 6);

        let json_path = dir.path().join("spectra.json");
        write_spectra_json(&rows, &json_path).unwrap();
        let parsed: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&json_path).unwrap()).unwrap();
        let first = &parsed.as_array().unwrap()[0];
        assert_eq!(first["wavelength"], 450.0);
        assert!(first["transmittance"].is_number());
    }
}
