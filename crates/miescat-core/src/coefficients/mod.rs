//! Mie coefficients $a_n$, $b_n$ for homogeneous and coated spheres.
//!
//! Both builders take relative refractive indices (particle / medium) in the
//! `n − ik` convention and size parameters in the surrounding medium.

pub mod coated;
pub mod homogeneous;

pub use coated::{coated_coefficients, small_coated_coefficients};
pub use homogeneous::homogeneous_coefficients;
