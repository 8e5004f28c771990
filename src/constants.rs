//! # Constants and type definitions for enuplot
//!
//! This module centralizes the **time constants** and **common type aliases**
//! used throughout the `enuplot` library.
//!
//! The WGS-84 ellipsoid parameters live in [`crate::earth`], next to the
//! coordinate conversions that consume them.

// -------------------------------------------------------------------------------------------------
// Time constants
// -------------------------------------------------------------------------------------------------

/// Number of seconds in a day
pub const SECONDS_PER_DAY: f64 = 86_400.0;

/// Number of seconds in a GPS week
pub const SECONDS_PER_WEEK: f64 = 604_800.0;

/// Number of days in a GPS week
pub const DAYS_PER_WEEK: f64 = 7.0;

/// Julian day of the GPS time epoch (1980-01-06T00:00:00 UTC)
pub const GPS_EPOCH_JD: f64 = 2_444_244.5;

// -------------------------------------------------------------------------------------------------
// Type aliases
// -------------------------------------------------------------------------------------------------

/// Angle in degrees
pub type Degree = f64;
/// Angle in radians
pub type Radian = f64;
/// Distance in meters
pub type Meter = f64;
/// Duration in seconds
pub type Seconds = f64;
