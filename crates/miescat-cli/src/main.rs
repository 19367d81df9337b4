//! miescat command-line interface.
//!
//! Run extinction sweeps from TOML configuration files:
//! ```sh
//! miescat run job.toml
//! miescat validate job.toml
//! miescat materials
//! miescat efficiency --n 1.55 --x 5.213
//! ```

mod config;
mod runner;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use num_complex::Complex64;

use runner::PointGeometry;

#[derive(Parser)]
#[command(name = "miescat")]
#[command(about = "Mie extinction spectra of homogeneous and coated spheres")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run an extinction sweep from a TOML configuration file.
    Run {
        /// Path to the job configuration file.
        config: PathBuf,
        /// Output directory (overrides config file setting).
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Validate a configuration file without running it.
    Validate {
        /// Path to the job configuration file.
        config: PathBuf,
    },
    /// List built-in materials.
    Materials,
    /// Extinction efficiency of one homogeneous sphere.
    Efficiency {
        /// Real part of the particle index.
        #[arg(long)]
        n: f64,
        /// Extinction coefficient (index is n - ik).
        #[arg(long, default_value_t = 0.0)]
        k: f64,
        /// Size parameter 2π·n_medium·r/λ.
        #[arg(long, conflicts_with_all = ["radius", "wavelength"], required_unless_present_all = ["radius", "wavelength"])]
        x: Option<f64>,
        /// Radius (same unit as the wavelength).
        #[arg(long, requires = "wavelength")]
        radius: Option<f64>,
        /// Vacuum wavelength.
        #[arg(long, requires = "radius")]
        wavelength: Option<f64>,
        /// Real refractive index of the medium.
        #[arg(long, default_value_t = 1.0)]
        medium_n: f64,
    },
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Run { config, output } => {
            println!("miescat extinction sweep");
            println!("========================");
            let job = config::load_config(&config)?;
            println!("Configuration: {}", config.display());

            let rows = runner::run_simulation(&job)?;

            let out_dir = output.unwrap_or_else(|| PathBuf::from(&job.output.directory));
            if job.output.save_spectra {
                runner::write_spectra_csv(&rows, &out_dir.join("spectra.csv"), &job)?;
            }
            if job.output.save_json {
                runner::write_spectra_json(&rows, &out_dir.join("spectra.json"))?;
            }

            println!("Done: {} wavelengths.", rows.len());
            Ok(())
        }
        Commands::Validate { config } => {
            let job = config::load_config(&config)?;
            println!(
                "Configuration is valid: {} ({} wavelengths)",
                config.display(),
                job.simulation.wavelengths.grid().len()
            );
            Ok(())
        }
        Commands::Materials => {
            println!("Available materials:");
            println!();
            for (id, description) in miescat_materials::MATERIAL_IDS {
                println!("  {id:<11} {description}");
            }
            println!();
            println!("  Inline constants: material = {{ n = 1.5, k = 0.0 }}");
            Ok(())
        }
        Commands::Efficiency {
            n,
            k,
            x,
            radius,
            wavelength,
            medium_n,
        } => {
            let geometry = match (x, radius, wavelength) {
                (Some(x), _, _) => PointGeometry::SizeParameter(x),
                (None, Some(radius), Some(wavelength)) => PointGeometry::Physical { radius, wavelength },
                _ => anyhow::bail!("give either --x or both --radius and --wavelength"),
            };
            let (q, small) = runner::point_efficiency(Complex64::new(n, -k), medium_n, geometry)?;
            let branch = if small { "small-particle expansion" } else { "partial-wave series" };
            println!("Q_ext = {q:.6e} ({branch})");
            Ok(())
        }
    }
}
