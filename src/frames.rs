//! # Coordinate frames and conversions
//!
//! Cartesian ECEF coordinates, geographic (latitude/longitude/height)
//! coordinates on the WGS-84 ellipsoid, and local East-North-Up displacements
//! about a reference point.
//!
//! ## Units
//!
//! - ECEF components and heights: **meters**.
//! - [`Geographic`] angles: **radians**, always. Degrees exist only at the
//!   explicit boundary ([`Geographic::from_degrees`],
//!   [`Geographic::latitude_degrees`], [`Geographic::longitude_degrees`]), so
//!   a degree/radian mix-up cannot travel silently through a call chain.
//!
//! ## Conversions
//!
//! ```text
//! Ecef --(ecef_to_geographic, iterative)--> Geographic
//! Geographic --(geographic_to_ecef, closed form)--> Ecef
//! (Ecef, reference Ecef + Geographic) --(ecef_to_enu)--> EnuDisplacement
//! ```
//!
//! All conversions are pure; the ENU frame is a local tangent-plane
//! approximation valid near its reference point, not a global system.

use nalgebra::{Matrix3, Vector3};

use crate::constants::{Degree, Meter, Radian};
use crate::earth::Ellipsoid;
use crate::enuplot_errors::EnuplotError;

/// Maximum number of fixed-point iterations in [`ecef_to_geographic`].
///
/// Terrestrial inputs converge in a handful of iterations; the cap turns a
/// pathological input into an explicit [`EnuplotError::ConvergenceFailure`]
/// instead of an unbounded loop.
const MAX_GEODETIC_ITERATIONS: usize = 16;

/// Convergence tolerance on successive z estimates, in meters.
const GEODETIC_TOLERANCE: f64 = 1e-4;

/// An Earth-Centered-Earth-Fixed Cartesian coordinate, in meters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ecef {
    pub x: Meter,
    pub y: Meter,
    pub z: Meter,
}

impl Ecef {
    pub const fn new(x: Meter, y: Meter, z: Meter) -> Ecef {
        Ecef { x, y, z }
    }

    /// View this coordinate as a nalgebra column vector.
    pub fn as_vector(&self) -> Vector3<f64> {
        Vector3::new(self.x, self.y, self.z)
    }

    fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }
}

impl From<Vector3<f64>> for Ecef {
    fn from(v: Vector3<f64>) -> Ecef {
        Ecef::new(v.x, v.y, v.z)
    }
}

/// A geographic coordinate on the WGS-84 ellipsoid.
///
/// Latitude and longitude are stored in **radians**; the height is in meters
/// above the ellipsoid.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Geographic {
    pub latitude: Radian,
    pub longitude: Radian,
    pub height: Meter,
}

impl Geographic {
    pub const fn new(latitude: Radian, longitude: Radian, height: Meter) -> Geographic {
        Geographic {
            latitude,
            longitude,
            height,
        }
    }

    /// Build a geographic coordinate from angles in degrees.
    pub fn from_degrees(latitude: Degree, longitude: Degree, height: Meter) -> Geographic {
        Geographic::new(latitude.to_radians(), longitude.to_radians(), height)
    }

    pub fn latitude_degrees(&self) -> Degree {
        self.latitude.to_degrees()
    }

    pub fn longitude_degrees(&self) -> Degree {
        self.longitude.to_degrees()
    }
}

/// A displacement in the local East-North-Up tangent plane, in meters,
/// relative to the reference point the frame was built from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnuDisplacement {
    pub east: Meter,
    pub north: Meter,
    pub up: Meter,
}

/// Convert an ECEF coordinate to geographic latitude, longitude and height.
///
/// Iterative (Bowring-style) solution on the WGS-84 ellipsoid: the z estimate
/// is refined with the prime-vertical radius of curvature until two successive
/// estimates agree within 0.1 mm. At least one iteration always runs, so
/// points on the ellipsoid surface resolve exactly.
///
/// Argument
/// --------
/// * `point`: ECEF coordinate in meters. Must be finite and off the polar
///   axis (`x² + y² > 0`).
///
/// Return
/// ------
/// * The [`Geographic`] coordinate (angles in radians, height in meters), or
///   * [`EnuplotError::NonFiniteCoordinate`] for NaN/infinite components,
///   * [`EnuplotError::SingularEcefPoint`] on the polar axis, where longitude
///     is undefined,
///   * [`EnuplotError::ConvergenceFailure`] if the iteration cap is exceeded.
pub fn ecef_to_geographic(point: &Ecef) -> Result<Geographic, EnuplotError> {
    if !point.is_finite() {
        return Err(EnuplotError::NonFiniteCoordinate);
    }

    let ellipsoid = Ellipsoid::WGS84;
    let e2 = ellipsoid.eccentricity_squared();
    let r2 = point.x * point.x + point.y * point.y;
    if r2 <= 0.0 {
        return Err(EnuplotError::SingularEcefPoint);
    }

    let mut z = point.z;
    let mut residual = f64::INFINITY;
    for _ in 0..MAX_GEODETIC_ITERATIONS {
        let z_previous = z;
        let sinp = z / (r2 + z * z).sqrt();
        let n = ellipsoid.semi_major_axis / (1.0 - e2 * sinp * sinp).sqrt();
        z = point.z + n * e2 * sinp;
        residual = (z - z_previous).abs();
        if residual < GEODETIC_TOLERANCE {
            return Ok(Geographic::new(
                (z / r2.sqrt()).atan(),
                point.y.atan2(point.x),
                (r2 + z * z).sqrt() - n,
            ));
        }
    }

    Err(EnuplotError::ConvergenceFailure {
        iterations: MAX_GEODETIC_ITERATIONS,
        residual,
    })
}

/// Convert a geographic coordinate to ECEF, in closed form.
///
/// Argument
/// --------
/// * `geographic`: latitude/longitude in radians, height in meters
///
/// Return
/// ------
/// * The ECEF coordinate in meters.
pub fn geographic_to_ecef(geographic: &Geographic) -> Ecef {
    let ellipsoid = Ellipsoid::WGS84;
    let e2 = ellipsoid.eccentricity_squared();

    let (sin_lat, cos_lat) = geographic.latitude.sin_cos();
    let n = ellipsoid.semi_major_axis / (1.0 - e2 * sin_lat * sin_lat).sqrt();
    let equatorial_radius = (n + geographic.height) * cos_lat;

    Ecef::new(
        equatorial_radius * geographic.longitude.cos(),
        equatorial_radius * geographic.longitude.sin(),
        ((1.0 - e2) * n + geographic.height) * sin_lat,
    )
}

/// Rotation matrix from ECEF differences to the local East-North-Up frame at
/// the given geographic latitude and longitude.
///
/// The rows are the local east, north and up unit vectors expressed in ECEF,
/// so `enu = R · d` for an ECEF difference vector `d`.
pub fn enu_rotation(latitude: Radian, longitude: Radian) -> Matrix3<f64> {
    let (sin_lat, cos_lat) = latitude.sin_cos();
    let (sin_lon, cos_lon) = longitude.sin_cos();

    Matrix3::new(
        -sin_lon,
        cos_lon,
        0.0,
        -sin_lat * cos_lon,
        -sin_lat * sin_lon,
        cos_lat,
        cos_lat * cos_lon,
        cos_lat * sin_lon,
        sin_lat,
    )
}

/// Express an ECEF coordinate as an East-North-Up displacement about a
/// reference point.
///
/// Arguments
/// ---------
/// * `point`: the ECEF coordinate to express, in meters
/// * `reference`: the ECEF origin of the local frame, in meters
/// * `reference_geographic`: the geographic coordinate of the reference,
///   typically obtained from [`ecef_to_geographic`]
///
/// Return
/// ------
/// * The [`EnuDisplacement`] of `point` relative to `reference`. The result is
///   a tangent-plane approximation, accurate near the reference point.
pub fn ecef_to_enu(
    point: &Ecef,
    reference: &Ecef,
    reference_geographic: &Geographic,
) -> EnuDisplacement {
    let rotation = enu_rotation(
        reference_geographic.latitude,
        reference_geographic.longitude,
    );
    let difference = point.as_vector() - reference.as_vector();
    let enu = rotation * difference;

    EnuDisplacement {
        east: enu.x,
        north: enu.y,
        up: enu.z,
    }
}
