// dcd-core/src/units.rs

use uom::si::f64::{Mass as UomMass, Volume as UomVolume};

pub type Mass = UomMass;
pub type Volume = UomVolume;

/// Stream days per calendar year used by the power/fuel formulas.
pub const DAYS_PER_YEAR: f64 = 365.25;

/// Standard cubic metres of gas counted as one Sm3 of oil equivalent.
pub const GAS_SM3_PER_OE_SM3: f64 = 1_000.0;

#[inline]
pub fn kg(v: f64) -> Mass {
    use uom::si::mass::kilogram;
    Mass::new::<kilogram>(v)
}

#[inline]
pub fn sm3(v: f64) -> Volume {
    use uom::si::volume::cubic_meter;
    Volume::new::<cubic_meter>(v)
}

/// Mass in kilograms to metric tonnes.
#[inline]
pub fn kg_to_tonnes(v: f64) -> f64 {
    use uom::si::mass::ton;
    kg(v).get::<ton>()
}

/// Million standard cubic metres (MSm3) to Sm3.
#[inline]
pub fn msm3_to_sm3(v: f64) -> f64 {
    use uom::si::volume::{cubic_hectometer, cubic_meter};
    Volume::new::<cubic_hectometer>(v).get::<cubic_meter>()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Tolerances, nearly_equal};

    #[test]
    fn kg_to_tonnes_divides_by_thousand() {
        assert!(nearly_equal(kg_to_tonnes(260.0), 0.26, Tolerances::default()));
        assert_eq!(kg_to_tonnes(0.0), 0.0);
    }

    #[test]
    fn msm3_conversion() {
        assert!(nearly_equal(
            msm3_to_sm3(2.5),
            2_500_000.0,
            Tolerances::default()
        ));
    }

    #[test]
    fn constructors_smoke() {
        let _m = kg(1.0);
        let _v = sm3(1.0);
    }
}
