//! # WGS-84 reference ellipsoid
//!
//! The Earth figure used by every coordinate conversion in this crate.
//! The parameters are exposed as an immutable value rather than free-standing
//! constants so that the converters in [`crate::frames`] receive the full
//! model they depend on from a single place.

use crate::constants::Meter;

/// A rotational reference ellipsoid, defined by its equatorial radius and flattening.
///
/// The only instance used by the crate is [`Ellipsoid::WGS84`]; the type exists
/// so the derived quantities (`e²`, polar radius) are computed next to the
/// parameters they come from instead of being scattered at call sites.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ellipsoid {
    /// Semi-major (equatorial) axis, in meters.
    pub semi_major_axis: Meter,

    /// Flattening, dimensionless.
    pub flattening: f64,
}

impl Ellipsoid {
    /// The WGS-84 Earth model.
    pub const WGS84: Ellipsoid = Ellipsoid {
        semi_major_axis: 6_378_137.0,
        flattening: 1.0 / 298.257_223_563,
    };

    /// First eccentricity squared, `e² = f(2 − f)`.
    pub fn eccentricity_squared(&self) -> f64 {
        self.flattening * (2.0 - self.flattening)
    }

    /// Semi-minor (polar) axis, `b = a(1 − f)`, in meters.
    pub fn semi_minor_axis(&self) -> Meter {
        self.semi_major_axis * (1.0 - self.flattening)
    }
}

#[cfg(test)]
mod earth_test {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_wgs84_parameters() {
        let wgs84 = Ellipsoid::WGS84;
        assert_eq!(wgs84.semi_major_axis, 6_378_137.0);
        assert_eq!(wgs84.flattening, 1.0 / 298.257_223_563);
    }

    #[test]
    fn test_derived_quantities() {
        let wgs84 = Ellipsoid::WGS84;
        assert_relative_eq!(
            wgs84.eccentricity_squared(),
            6.694_379_990_14e-3,
            max_relative = 1e-9
        );
        assert_relative_eq!(
            wgs84.semi_minor_axis(),
            6_356_752.314_245,
            max_relative = 1e-9
        );
    }
}
