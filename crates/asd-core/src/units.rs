// asd-core/src/units.rs

use crate::Real;
use uom::si::f64::{
    MassDensity as UomMassDensity, TemperatureInterval as UomTemperatureInterval,
    ThermodynamicTemperature as UomThermodynamicTemperature,
};

// Public canonical unit types (SI, f64)
pub type Density = UomMassDensity;
pub type TempInterval = UomTemperatureInterval;
pub type Temperature = UomThermodynamicTemperature;

/// Offset between the Celsius and Kelvin scales.
pub const ZERO_CELSIUS_K: Real = 273.15;

#[inline]
pub fn k(v: f64) -> Temperature {
    use uom::si::thermodynamic_temperature::kelvin;
    Temperature::new::<kelvin>(v)
}

#[inline]
pub fn g_per_cm3(v: f64) -> Density {
    use uom::si::mass_density::gram_per_cubic_centimeter;
    Density::new::<gram_per_cubic_centimeter>(v)
}

#[inline]
pub fn dk(v: f64) -> TempInterval {
    use uom::si::temperature_interval::kelvin;
    TempInterval::new::<kelvin>(v)
}

#[inline]
pub fn celsius_to_kelvin(c: Real) -> Real {
    c + ZERO_CELSIUS_K
}

#[inline]
pub fn kelvin_to_celsius(t_k: Real) -> Real {
    t_k - ZERO_CELSIUS_K
}

/// Kelvin counterpart of an optional Celsius value. Absent stays absent.
#[inline]
pub fn kelvin_from_celsius(c: Option<Real>) -> Option<Real> {
    c.map(celsius_to_kelvin)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Tolerances, nearly_equal};
    use proptest::prelude::*;

    #[test]
    fn constructors_smoke() {
        let _t = k(300.0);
        let _rho = g_per_cm3(1.2);
        let _dt = dk(5.0);
    }

    #[test]
    fn freezing_point() {
        assert_eq!(celsius_to_kelvin(0.0), 273.15);
        assert_eq!(kelvin_from_celsius(Some(25.0)), Some(298.15));
        assert_eq!(kelvin_from_celsius(None), None);
    }

    #[test]
    fn density_is_stored_in_si() {
        let rho = g_per_cm3(1.25);
        assert!(nearly_equal(rho.value, 1250.0, Tolerances::default()));
    }

    proptest! {
        #[test]
        fn kelvin_round_trip(c in -273.0_f64..2000.0) {
            let back = kelvin_to_celsius(celsius_to_kelvin(c));
            let tol = Tolerances { abs: 1e-9, rel: 1e-12 };
            prop_assert!(nearly_equal(back, c, tol));
        }

        #[test]
        fn kelvin_offset_is_exact_addition(c in -273.0_f64..2000.0) {
            prop_assert_eq!(celsius_to_kelvin(c), c + 273.15);
        }
    }
}
