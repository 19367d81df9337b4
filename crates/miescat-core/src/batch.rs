//! Wavelength-sweep driver over the efficiency kernels.
//!
//! Converts absolute refractive indices, radii and vacuum wavelengths into
//! relative indices and size parameters, then evaluates each sample through
//! a [`ComputeBackend`]. Samples share only read-only inputs.

use std::f64::consts::PI;
use std::sync::{Arc, Mutex, PoisonError};

use ndarray::Array1;
use num_complex::Complex64;

use miescat_compute::{ComputeBackend, CpuBackend};

use crate::efficiency::{coated_extinction_efficiency, extinction_efficiency};
use crate::error::{MieError, Result};
use crate::types::{
    check_positive, size_parameter, Extinction, ExtinctionSample, IndexSpectrum, Wavelengths,
};

/// Evaluates extinction for single wavelengths or whole sweeps.
pub struct BatchDriver {
    /// Compute backend used for sweeps.
    pub backend: Arc<dyn ComputeBackend>,
}

impl Default for BatchDriver {
    fn default() -> Self {
        Self {
            backend: Arc::new(CpuBackend::new()),
        }
    }
}

/// A coated particle: core index, shell index and the two radii.
#[derive(Debug, Clone)]
pub struct CoatedParticle {
    pub core: IndexSpectrum,
    pub coat: IndexSpectrum,
    pub core_radius: f64,
    pub coat_radius: f64,
}

impl BatchDriver {
    pub fn new(backend: Arc<dyn ComputeBackend>) -> Self {
        Self { backend }
    }

    /// Extinction of a homogeneous sphere.
    ///
    /// `Wavelengths::Single` yields the dimensionless efficiency;
    /// `Wavelengths::Sweep` yields cross-sections $Q_{\text{ext}} \pi r^2$ in
    /// the square of the length unit shared by `radius` and the wavelengths.
    pub fn extinction_cross_section(
        &self,
        particle: &IndexSpectrum,
        n_medium: Complex64,
        radius: f64,
        wavelength: &Wavelengths,
    ) -> Result<Extinction> {
        check_medium(n_medium)?;
        check_positive("radius", radius)?;

        match wavelength {
            Wavelengths::Single(lambda) => {
                let n_particle = single_index(particle, "particle index")?;
                let x = size_parameter(n_medium.re, radius, *lambda)?;
                extinction_efficiency(n_particle / n_medium, x).map(Extinction::Efficiency)
            }
            Wavelengths::Sweep(lambdas) => {
                particle.check_len("particle index", lambdas.len())?;
                let area = PI * radius * radius;
                let cross_sections = self.fill(lambdas.len(), |i| {
                    let x = size_parameter(n_medium.re, radius, lambdas[i])?;
                    Ok(extinction_efficiency(particle.at(i) / n_medium, x)? * area)
                })?;
                Ok(Extinction::CrossSections(cross_sections))
            }
        }
    }

    /// Extinction of a coated sphere; cross-sections use the outer radius.
    pub fn coated_extinction_cross_section(
        &self,
        particle: &CoatedParticle,
        n_medium: Complex64,
        wavelength: &Wavelengths,
    ) -> Result<Extinction> {
        check_medium(n_medium)?;
        check_positive("core radius", particle.core_radius)?;
        check_positive("coat radius", particle.coat_radius)?;

        match wavelength {
            Wavelengths::Single(lambda) => {
                let core = single_index(&particle.core, "core index")?;
                let coat = single_index(&particle.coat, "coat index")?;
                let (x, y) = coated_size_parameters(particle, n_medium, *lambda)?;
                coated_extinction_efficiency(core / n_medium, coat / n_medium, x, y)
                    .map(Extinction::Efficiency)
            }
            Wavelengths::Sweep(lambdas) => {
                particle.core.check_len("core index", lambdas.len())?;
                particle.coat.check_len("coat index", lambdas.len())?;
                let area = PI * particle.coat_radius * particle.coat_radius;
                let cross_sections = self.fill(lambdas.len(), |i| {
                    let (x, y) = coated_size_parameters(particle, n_medium, lambdas[i])?;
                    let m1 = particle.core.at(i) / n_medium;
                    let m2 = particle.coat.at(i) / n_medium;
                    Ok(coated_extinction_efficiency(m1, m2, x, y)? * area)
                })?;
                Ok(Extinction::CrossSections(cross_sections))
            }
        }
    }

    /// Per-wavelength records for a homogeneous sphere.
    pub fn spectrum(
        &self,
        particle: &IndexSpectrum,
        n_medium: Complex64,
        radius: f64,
        wavelengths: &Array1<f64>,
    ) -> Result<Vec<ExtinctionSample>> {
        let sweep = Wavelengths::Sweep(wavelengths.clone());
        let extinction = self.extinction_cross_section(particle, n_medium, radius, &sweep)?;
        Ok(samples(particle, wavelengths, &extinction, radius))
    }

    /// Per-wavelength records for a coated sphere. `n` and `k` describe the core.
    pub fn coated_spectrum(
        &self,
        particle: &CoatedParticle,
        n_medium: Complex64,
        wavelengths: &Array1<f64>,
    ) -> Result<Vec<ExtinctionSample>> {
        let sweep = Wavelengths::Sweep(wavelengths.clone());
        let extinction = self.coated_extinction_cross_section(particle, n_medium, &sweep)?;
        Ok(samples(&particle.core, wavelengths, &extinction, particle.coat_radius))
    }

    /// Run `eval` for every index on the backend, reporting the lowest failing
    /// sample if any fail.
    fn fill<F>(&self, len: usize, eval: F) -> Result<Array1<f64>>
    where
        F: Fn(usize) -> Result<f64> + Send + Sync,
    {
        let failure = FirstFailure::default();
        let values = self.backend.parallel_fill(len, &|i| match eval(i) {
            Ok(value) => value,
            Err(e) => {
                failure.record(i, e);
                f64::NAN
            }
        })?;
        failure.into_result(values)
    }
}

/// The lowest-index sample error seen by any worker.
#[derive(Default)]
struct FirstFailure {
    slot: Mutex<Option<(usize, MieError)>>,
}

impl FirstFailure {
    fn record(&self, index: usize, error: MieError) {
        // The slot is only ever overwritten whole, so a poisoned lock is still usable
        let mut slot = self.slot.lock().unwrap_or_else(PoisonError::into_inner);
        if slot.as_ref().map_or(true, |(j, _)| index < *j) {
            *slot = Some((index, error));
        }
    }

    fn into_result<T>(self, value: T) -> Result<T> {
        match self.slot.into_inner().unwrap_or_else(PoisonError::into_inner) {
            Some((index, source)) => Err(MieError::Sample {
                index,
                source: Box::new(source),
            }),
            None => Ok(value),
        }
    }
}

fn samples(
    particle: &IndexSpectrum,
    wavelengths: &Array1<f64>,
    extinction: &Extinction,
    radius: f64,
) -> Vec<ExtinctionSample> {
    let area = PI * radius * radius;
    let cross_sections = extinction.as_cross_sections();
    wavelengths
        .iter()
        .enumerate()
        .map(|(i, &wavelength)| {
            let index = particle.at(i);
            let cross_section = cross_sections.map_or(f64::NAN, |c| c[i]);
            ExtinctionSample {
                wavelength,
                n: index.re,
                k: -index.im,
                efficiency: cross_section / area,
                cross_section,
            }
        })
        .collect()
}

fn coated_size_parameters(
    particle: &CoatedParticle,
    n_medium: Complex64,
    wavelength: f64,
) -> Result<(f64, f64)> {
    let x = size_parameter(n_medium.re, particle.core_radius, wavelength)?;
    let y = size_parameter(n_medium.re, particle.coat_radius, wavelength)?;
    Ok((x, y))
}

fn single_index(spectrum: &IndexSpectrum, what: &str) -> Result<Complex64> {
    match spectrum {
        IndexSpectrum::Constant(n) => Ok(*n),
        IndexSpectrum::Sampled(values) if values.len() == 1 => Ok(values[0]),
        IndexSpectrum::Sampled(values) => Err(MieError::invalid(format!(
            "{what} has {} samples but a single wavelength was given",
            values.len()
        ))),
    }
}

fn check_medium(n_medium: Complex64) -> Result<()> {
    if n_medium.is_finite() && n_medium.re > 0.0 {
        Ok(())
    } else {
        Err(MieError::invalid(format!(
            "medium refractive index must have a positive real part, got {n_medium}"
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use miescat_compute::SerialBackend;

    #[test]
    fn test_scalar_wavelength_returns_efficiency() {
        let driver = BatchDriver::default();
        let n = Complex64::new(1.5, -0.01);
        let result = driver
            .extinction_cross_section(&n.into(), Complex64::new(1.0, 0.0), 100.0, &500.0.into())
            .unwrap();
        let x = 2.0 * PI * 100.0 / 500.0;
        let expected = extinction_efficiency(n, x).unwrap();
        assert_eq!(result, Extinction::Efficiency(expected));
    }

    #[test]
    fn test_sweep_returns_cross_sections() {
        let driver = BatchDriver::new(Arc::new(SerialBackend));
        let n_medium = Complex64::new(1.33, 0.0);
        let lambdas = Array1::linspace(400.0, 800.0, 9);
        let indices = lambdas.mapv(|l: f64| Complex64::new(1.5 + 1e-4 * l, -0.02));
        let radius = 60.0;

        let result = driver
            .extinction_cross_section(
                &IndexSpectrum::Sampled(indices.clone()),
                n_medium,
                radius,
                &Wavelengths::Sweep(lambdas.clone()),
            )
            .unwrap();
        let c_ext = result.as_cross_sections().unwrap();
        assert_eq!(c_ext.len(), 9);
        for i in 0..9 {
            let x = 2.0 * PI * 1.33 * radius / lambdas[i];
            let q = extinction_efficiency(indices[i] / n_medium, x).unwrap();
            assert_relative_eq!(c_ext[i], q * PI * radius * radius, max_relative = 1e-12);
        }
    }

    #[test]
    fn test_length_mismatch_is_rejected() {
        let driver = BatchDriver::default();
        let indices = Array1::from_elem(3, Complex64::new(1.5, 0.0));
        let lambdas = Array1::linspace(400.0, 800.0, 4);
        let err = driver
            .extinction_cross_section(
                &indices.into(),
                Complex64::new(1.0, 0.0),
                50.0,
                &lambdas.into(),
            )
            .unwrap_err();
        assert!(matches!(err, MieError::InvalidParameter(_)));
    }

    #[test]
    fn test_failing_sample_is_reported_by_index() {
        let driver = BatchDriver::default();
        let lambdas = Array1::from_vec(vec![500.0, 600.0, 0.0, 700.0, -1.0]);
        let err = driver
            .extinction_cross_section(
                &Complex64::new(1.5, 0.0).into(),
                Complex64::new(1.0, 0.0),
                50.0,
                &lambdas.into(),
            )
            .unwrap_err();
        match err {
            MieError::Sample { index, ref source } => {
                assert_eq!(index, 2);
                assert!(matches!(**source, MieError::InvalidParameter(_)));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_failure_survives_poisoned_lock() {
        let failure = FirstFailure::default();
        failure.record(7, MieError::invalid("late sample"));
        std::thread::scope(|s| {
            let poisoner = s.spawn(|| {
                let _guard = failure.slot.lock();
                panic!("worker died holding the lock");
            });
            assert!(poisoner.join().is_err());
        });
        assert!(failure.slot.is_poisoned());

        failure.record(4, MieError::Convergence { order: 12, iterations: 100_000 });
        failure.record(9, MieError::invalid("later sample"));
        match failure.into_result(()) {
            Err(MieError::Sample { index, source }) => {
                assert_eq!(index, 4);
                assert!(matches!(*source, MieError::Convergence { order: 12, .. }));
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_no_failure_passes_value_through() {
        assert_eq!(FirstFailure::default().into_result(3).unwrap(), 3);
    }

    #[test]
    fn test_degenerate_geometry_is_rejected() {
        let driver = BatchDriver::default();
        let n = IndexSpectrum::Constant(Complex64::new(1.5, 0.0));
        let medium = Complex64::new(1.0, 0.0);
        assert!(driver.extinction_cross_section(&n, medium, 0.0, &500.0.into()).is_err());
        assert!(driver.extinction_cross_section(&n, medium, 10.0, &0.0.into()).is_err());
        assert!(driver
            .extinction_cross_section(&n, Complex64::new(0.0, 0.0), 10.0, &500.0.into())
            .is_err());
    }

    #[test]
    fn test_coated_sweep_uses_outer_area() {
        let driver = BatchDriver::default();
        let lambdas = Array1::linspace(450.0, 650.0, 5);
        let particle = CoatedParticle {
            core: Complex64::new(0.3, -2.5).into(),
            coat: Complex64::new(1.45, 0.0).into(),
            core_radius: 20.0,
            coat_radius: 30.0,
        };
        let medium = Complex64::new(1.0, 0.0);
        let result = driver
            .coated_extinction_cross_section(&particle, medium, &lambdas.clone().into())
            .unwrap();
        let c_ext = result.as_cross_sections().unwrap();
        for (i, &lambda) in lambdas.iter().enumerate() {
            let x = 2.0 * PI * 20.0 / lambda;
            let y = 2.0 * PI * 30.0 / lambda;
            let q = coated_extinction_efficiency(
                Complex64::new(0.3, -2.5),
                Complex64::new(1.45, 0.0),
                x,
                y,
            )
            .unwrap();
            assert_relative_eq!(c_ext[i], q * PI * 900.0, max_relative = 1e-12);
        }
    }

    #[test]
    fn test_spectrum_records_index_convention() {
        let driver = BatchDriver::default();
        let lambdas = Array1::linspace(500.0, 600.0, 3);
        let records = driver
            .spectrum(&Complex64::new(0.5, -2.0).into(), Complex64::new(1.0, 0.0), 10.0, &lambdas)
            .unwrap();
        assert_eq!(records.len(), 3);
        for r in &records {
            assert_eq!(r.n, 0.5);
            assert_eq!(r.k, 2.0);
            assert!(r.efficiency > 0.0);
            assert_relative_eq!(r.cross_section, r.efficiency * PI * 100.0, max_relative = 1e-12);
        }
    }
}
