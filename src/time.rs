//! # Civil time and GPS time
//!
//! Conversion of UTC calendar timestamps to GPS time (week, second of week,
//! day of week) through the standard Julian-day formulation.
//!
//! No leap-second table is applied: the resulting GPS time is offset from
//! true GPST by the accumulated GPS-UTC leap seconds. This is the usual
//! convention for building a plotting time axis out of a receiver log, where
//! only differences between epochs matter.

use std::str::FromStr;

use hifitime::Epoch;

use crate::constants::{DAYS_PER_WEEK, GPS_EPOCH_JD, SECONDS_PER_DAY, SECONDS_PER_WEEK};
use crate::enuplot_errors::EnuplotError;

/// A UTC civil timestamp, broken into calendar fields.
///
/// Construction is validated ([`CalendarTimestamp::new`]), so a value of this
/// type always denotes a real calendar date. The `second` field is fractional
/// to carry sub-second epochs from receiver logs.
#[derive(Debug, Clone, PartialEq)]
pub struct CalendarTimestamp {
    pub year: i32,
    /// 1–12
    pub month: u8,
    /// 1–28/29/30/31 depending on the month
    pub day: u8,
    /// 0–23
    pub hour: u8,
    /// 0–59
    pub minute: u8,
    /// 0 ≤ s < 60
    pub second: f64,
}

/// GPS time: week counter since 1980-01-06 plus the position inside the week.
///
/// Derived from a [`CalendarTimestamp`], never mutated after construction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GpsTime {
    /// Weeks elapsed since the GPS epoch (no 1024-week rollover applied).
    pub week: u32,
    /// Seconds since the start of the week, in `[0, 604800)`.
    pub second_of_week: f64,
    /// Day inside the week, 0 = Sunday … 6 = Saturday.
    pub day_of_week: u8,
}

impl CalendarTimestamp {
    /// Build a validated UTC timestamp from calendar fields.
    ///
    /// Arguments
    /// ---------
    /// * `year`: four-digit calendar year
    /// * `month`: month number, 1–12
    /// * `day`: day of month, checked against the month length (leap-year aware)
    /// * `hour`, `minute`: time of day
    /// * `second`: seconds with optional fraction, `0 ≤ s < 60`
    ///
    /// Return
    /// ------
    /// * The timestamp, or [`EnuplotError::InvalidTimestamp`] if any field is
    ///   out of range or the day does not exist in that month.
    pub fn new(
        year: i32,
        month: u8,
        day: u8,
        hour: u8,
        minute: u8,
        second: f64,
    ) -> Result<CalendarTimestamp, EnuplotError> {
        if !(1..=12).contains(&month) {
            return Err(EnuplotError::InvalidTimestamp(format!(
                "month {month} out of range"
            )));
        }
        let month_length = days_in_month(year, month);
        if day == 0 || day > month_length {
            return Err(EnuplotError::InvalidTimestamp(format!(
                "day {day} out of range for {year}-{month:02}"
            )));
        }
        if hour > 23 || minute > 59 {
            return Err(EnuplotError::InvalidTimestamp(format!(
                "time of day {hour:02}:{minute:02} out of range"
            )));
        }
        if !second.is_finite() || !(0.0..60.0).contains(&second) {
            return Err(EnuplotError::InvalidTimestamp(format!(
                "second {second} out of range"
            )));
        }
        Ok(CalendarTimestamp {
            year,
            month,
            day,
            hour,
            minute,
            second,
        })
    }

    /// Parse the two time columns of a positioning log (`YYYY/MM/DD` and
    /// `HH:MM:SS[.sss]`) into a validated timestamp.
    ///
    /// Arguments
    /// ---------
    /// * `date`: calendar date field, slash separated
    /// * `time`: time-of-day field, with optional fractional seconds
    ///
    /// Return
    /// ------
    /// * The parsed timestamp, or [`EnuplotError::InvalidTimestamp`] when the
    ///   fields do not form a valid UTC date.
    pub fn parse(date: &str, time: &str) -> Result<CalendarTimestamp, EnuplotError> {
        let iso = format!("{}T{}", date.trim().replace('/', "-"), time.trim());
        let epoch = Epoch::from_str(&iso)
            .map_err(|e| EnuplotError::InvalidTimestamp(format!("{date} {time}: {e}")))?;
        let (year, month, day, hour, minute, second, nanos) = epoch.to_gregorian_utc();
        CalendarTimestamp::new(
            year,
            month,
            day,
            hour,
            minute,
            f64::from(second) + f64::from(nanos) * 1e-9,
        )
    }

    /// Expand a fractional day-of-year into a calendar timestamp.
    ///
    /// Arguments
    /// ---------
    /// * `year`: four-digit calendar year
    /// * `days`: day of year with fraction, `1.0 ≤ days < 366` (367 on leap years)
    ///
    /// Return
    /// ------
    /// * The corresponding timestamp, or [`EnuplotError::InvalidTimestamp`] if
    ///   `days` falls outside the year.
    pub fn from_day_of_year(year: i32, days: f64) -> Result<CalendarTimestamp, EnuplotError> {
        if !days.is_finite() || days < 1.0 {
            return Err(EnuplotError::InvalidTimestamp(format!(
                "day of year {days} out of range"
            )));
        }
        let day_of_year = days.floor() as u16;

        // Walk the months until the remaining day count fits inside one.
        let mut month = 1u8;
        let mut elapsed = 0u16;
        while month < 12 && day_of_year > elapsed + u16::from(days_in_month(year, month)) {
            elapsed += u16::from(days_in_month(year, month));
            month += 1;
        }
        let day = day_of_year - elapsed;
        if day > u16::from(days_in_month(year, month)) {
            return Err(EnuplotError::InvalidTimestamp(format!(
                "day of year {days} out of range for {year}"
            )));
        }

        let mut fraction = (days - f64::from(day_of_year)) * 24.0;
        let hour = fraction.trunc() as u8;
        fraction = (fraction - f64::from(hour)) * 60.0;
        let minute = fraction.trunc() as u8;
        let second = (fraction - f64::from(minute)) * 60.0;

        CalendarTimestamp::new(year, month, day as u8, hour, minute, second)
    }

    /// Convert this UTC timestamp to GPS time.
    ///
    /// The conversion goes through the Julian day of the timestamp and the
    /// Julian day of the GPS epoch (1980-01-06). The GPS-UTC leap-second
    /// offset is deliberately not applied.
    ///
    /// Timestamps before the GPS epoch are outside the contract of this
    /// function.
    ///
    /// Return
    /// ------
    /// * The [`GpsTime`] of this timestamp: week counter, second of week and
    ///   day of week.
    pub fn to_gps(&self) -> GpsTime {
        let elapsed = julian_day(self) - GPS_EPOCH_JD;
        debug_assert!(elapsed >= 0.0, "timestamp predates the GPS epoch");

        let week = (elapsed / DAYS_PER_WEEK).floor() as u32;
        let day_of_week = elapsed.rem_euclid(DAYS_PER_WEEK).floor() as u8;
        let second_of_week = f64::from(day_of_week) * SECONDS_PER_DAY
            + f64::from(self.hour) * 3_600.0
            + f64::from(self.minute) * 60.0
            + self.second;
        debug_assert!((0.0..SECONDS_PER_WEEK).contains(&second_of_week));

        GpsTime {
            week,
            second_of_week,
            day_of_week,
        }
    }
}

/// Julian day of a UTC timestamp.
///
/// Uses the standard epoch shift: for January and February the computation
/// runs with `(year − 1, month + 12)`. The shift happens on local copies only,
/// the input timestamp is never mutated.
///
/// Argument
/// --------
/// * `ts`: a validated UTC timestamp
///
/// Return
/// ------
/// * The Julian day, including the fractional day from the time fields.
pub fn julian_day(ts: &CalendarTimestamp) -> f64 {
    let (year, month) = if ts.month <= 2 {
        (ts.year - 1, u16::from(ts.month) + 12)
    } else {
        (ts.year, u16::from(ts.month))
    };

    (365.25 * f64::from(year)).floor()
        + (30.6001 * f64::from(month + 1)).floor()
        + f64::from(ts.day)
        + 1_720_981.5
        + f64::from(ts.hour) / 24.0
        + f64::from(ts.minute) / 1_440.0
        + ts.second / SECONDS_PER_DAY
}

/// Length of a month in days, accounting for Gregorian leap years.
fn days_in_month(year: i32, month: u8) -> u8 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 => {
            if is_leap_year(year) {
                29
            } else {
                28
            }
        }
        _ => 0,
    }
}

fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

#[cfg(test)]
mod time_test {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_gps_epoch() {
        let epoch = CalendarTimestamp::new(1980, 1, 6, 0, 0, 0.0).unwrap();
        assert_eq!(julian_day(&epoch), GPS_EPOCH_JD);

        let gps = epoch.to_gps();
        assert_eq!(gps.week, 0);
        assert_eq!(gps.second_of_week, 0.0);
        assert_eq!(gps.day_of_week, 0);
    }

    #[test]
    fn test_week_rollover() {
        // one day after the epoch
        let gps = CalendarTimestamp::new(1980, 1, 7, 0, 0, 0.0)
            .unwrap()
            .to_gps();
        assert_eq!(gps.week, 0);
        assert_eq!(gps.day_of_week, 1);
        assert_eq!(gps.second_of_week, SECONDS_PER_DAY);

        // one week after the epoch
        let gps = CalendarTimestamp::new(1980, 1, 13, 0, 0, 0.0)
            .unwrap()
            .to_gps();
        assert_eq!(gps.week, 1);
        assert_eq!(gps.day_of_week, 0);
        assert_eq!(gps.second_of_week, 0.0);
    }

    #[test]
    fn test_modern_date() {
        // 2020-07-30 was a Thursday of GPS week 2116
        let gps = CalendarTimestamp::new(2020, 7, 30, 10, 5, 39.0)
            .unwrap()
            .to_gps();
        assert_eq!(gps.week, 2116);
        assert_eq!(gps.day_of_week, 4);
        assert_eq!(
            gps.second_of_week,
            4.0 * SECONDS_PER_DAY + 10.0 * 3_600.0 + 5.0 * 60.0 + 39.0
        );
    }

    #[test]
    fn test_january_epoch_shift() {
        // the (year - 1, month + 12) shift applies below March
        let gps = CalendarTimestamp::new(2021, 2, 28, 12, 0, 0.0)
            .unwrap()
            .to_gps();
        assert_eq!(gps.week, 2147);
        assert_eq!(gps.day_of_week, 0);
    }

    #[test]
    fn test_second_of_week_monotonicity() {
        let earlier = CalendarTimestamp::new(2020, 7, 30, 10, 5, 39.0)
            .unwrap()
            .to_gps();
        let later = CalendarTimestamp::new(2020, 7, 30, 10, 6, 9.0)
            .unwrap()
            .to_gps();
        assert_eq!(earlier.week, later.week);
        assert!(earlier.second_of_week < later.second_of_week);
        assert_abs_diff_eq!(
            later.second_of_week - earlier.second_of_week,
            30.0,
            epsilon = 1e-9
        );
    }

    #[test]
    fn test_invalid_timestamps() {
        assert!(CalendarTimestamp::new(2020, 13, 1, 0, 0, 0.0).is_err());
        assert!(CalendarTimestamp::new(2020, 2, 30, 0, 0, 0.0).is_err());
        assert!(CalendarTimestamp::new(2021, 2, 29, 0, 0, 0.0).is_err());
        assert!(CalendarTimestamp::new(2020, 6, 0, 0, 0, 0.0).is_err());
        assert!(CalendarTimestamp::new(2020, 6, 15, 24, 0, 0.0).is_err());
        assert!(CalendarTimestamp::new(2020, 6, 15, 0, 60, 0.0).is_err());
        assert!(CalendarTimestamp::new(2020, 6, 15, 0, 0, 60.0).is_err());
        assert!(CalendarTimestamp::new(2020, 6, 15, 0, 0, f64::NAN).is_err());

        // leap day on a leap year is fine
        assert!(CalendarTimestamp::new(2020, 2, 29, 0, 0, 0.0).is_ok());
    }

    #[test]
    fn test_parse_log_fields() {
        let ts = CalendarTimestamp::parse("2020/07/30", "10:05:39.000").unwrap();
        assert_eq!(
            ts,
            CalendarTimestamp::new(2020, 7, 30, 10, 5, 39.0).unwrap()
        );

        let ts = CalendarTimestamp::parse("2020/07/30", "23:59:59.500").unwrap();
        assert_eq!(ts.hour, 23);
        assert_abs_diff_eq!(ts.second, 59.5, epsilon = 1e-6);

        assert!(CalendarTimestamp::parse("2020/02/30", "00:00:00").is_err());
        assert!(CalendarTimestamp::parse("not a date", "10:05:39").is_err());
    }

    #[test]
    fn test_from_day_of_year() {
        // day 61 of a leap year is March 1st
        let ts = CalendarTimestamp::from_day_of_year(2020, 61.5).unwrap();
        assert_eq!((ts.month, ts.day, ts.hour), (3, 1, 12));

        // day 60 of a common year is March 1st as well
        let ts = CalendarTimestamp::from_day_of_year(2019, 60.25).unwrap();
        assert_eq!((ts.month, ts.day, ts.hour), (3, 1, 6));

        let ts = CalendarTimestamp::from_day_of_year(2019, 1.0).unwrap();
        assert_eq!((ts.month, ts.day, ts.hour, ts.minute), (1, 1, 0, 0));
        assert_eq!(ts.second, 0.0);

        let ts = CalendarTimestamp::from_day_of_year(2020, 366.0).unwrap();
        assert_eq!((ts.month, ts.day), (12, 31));

        assert!(CalendarTimestamp::from_day_of_year(2019, 366.0).is_err());
        assert!(CalendarTimestamp::from_day_of_year(2019, 0.5).is_err());
    }
}
