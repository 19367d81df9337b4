//! Wavelength-independent refractive index.

use num_complex::Complex64;

use crate::provider::{MaterialError, MaterialProvider};

/// A material with a fixed `n − ik`, given as the pair `(n, k)`.
#[derive(Debug, Clone)]
pub struct ConstantIndex {
    name: String,
    n: f64,
    k: f64,
}

impl ConstantIndex {
    pub fn new(n: f64, k: f64) -> Self {
        Self {
            name: format!("n = {n}, k = {k}"),
            n,
            k,
        }
    }
}

impl MaterialProvider for ConstantIndex {
    fn name(&self) -> &str {
        &self.name
    }

    fn wavelength_range(&self) -> (f64, f64) {
        (0.0, f64::INFINITY)
    }

    fn dielectric_function(&self, _wavelength_nm: f64) -> Result<Complex64, MaterialError> {
        let index = Complex64::new(self.n, self.k);
        Ok(index * index)
    }

    fn refractive_index(&self, _wavelength_nm: f64) -> Result<Complex64, MaterialError> {
        Ok(Complex64::new(self.n, -self.k))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constant_index() {
        let m = ConstantIndex::new(0.2, 3.0);
        assert_eq!(m.refractive_index(123.0).unwrap(), Complex64::new(0.2, -3.0));
        let eps = m.dielectric_function(123.0).unwrap();
        assert!((eps - Complex64::new(0.04 - 9.0, 1.2)).norm() < 1e-12);
        assert_eq!(m.refractive_index_spectrum(&[400.0, 500.0]).unwrap().len(), 2);
    }
}
