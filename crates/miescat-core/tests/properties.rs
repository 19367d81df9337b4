//! Property tests over randomised inputs.

use approx::assert_relative_eq;
use num_complex::Complex64;
use proptest::prelude::*;

use miescat_core::efficiency::{series_efficiency, small_particle_efficiency};
use miescat_core::log_derivative::{
    log_derivative_downward, log_derivative_upward, needs_downward_recurrence,
};
use miescat_core::slab::transmittance;

proptest! {
    #[test]
    fn rayleigh_agrees_with_series_below_x_001(
        n in 0.1f64..3.0,
        k in 0.1f64..3.0,
        x in 1e-3f64..9e-3,
    ) {
        let m = Complex64::new(n, -k);
        let small = small_particle_efficiency(m, x).unwrap();
        let series = series_efficiency(m, x).unwrap();
        prop_assert!(small > 0.0);
        prop_assert!(
            ((small - series) / series).abs() < 0.01,
            "m={}, x={}: {} vs {}", m, x, small, series
        );
    }

    #[test]
    fn recurrences_agree_in_stable_region(
        n in 1.0f64..2.0,
        k in 0.0f64..0.05,
        x in 0.5f64..5.0,
    ) {
        let m = Complex64::new(n, -k);
        prop_assume!(!needs_downward_recurrence(m, x));
        let z = m * x;
        let terms = z.norm() as usize + 3;
        let down = log_derivative_downward(z, terms).unwrap();
        let up = log_derivative_upward(z, terms).unwrap();
        for (d, u) in down.iter().zip(&up) {
            prop_assert!((d - u).norm() <= 1e-6 * d.norm().max(1.0), "{} vs {}", d, u);
        }
    }

    #[test]
    fn transmittance_decreases_with_thickness(
        density in 1e10f64..1e18,
        cross_section in 1e-20f64..1e-14,
        thickness in 1e-6f64..1e-2,
        growth in 1.01f64..10.0,
    ) {
        let thin = transmittance(density, thickness, cross_section).unwrap();
        let thick = transmittance(density, thickness * growth, cross_section).unwrap();
        prop_assert!(thick <= thin);
        let tau = density * thickness * cross_section;
        if tau > 1e-10 && tau < 10.0 {
            prop_assert!(thick < thin);
        }
    }

    #[test]
    fn transmittance_decreases_with_density(
        density in 1e10f64..1e18,
        cross_section in 1e-20f64..1e-14,
        thickness in 1e-6f64..1e-2,
        growth in 1.01f64..10.0,
    ) {
        let sparse = transmittance(density, thickness, cross_section).unwrap();
        let dense = transmittance(density * growth, thickness, cross_section).unwrap();
        prop_assert!(dense <= sparse);
        prop_assert!((0.0..=1.0).contains(&dense));
    }
}

#[test]
fn transmittance_is_exact_exponential() {
    let t = transmittance(1e16, 1e-3, 1e-15).unwrap();
    assert_relative_eq!(t, (-10.0f64).exp(), max_relative = 1e-12);
}
