//! Calendar and Julian day conversions.
//!
//! Dates are proleptic Gregorian throughout. Julian days are kept as
//! unrounded `f64` until [`julian_to_utc`] turns them into minute-aligned
//! UTC instants, the only place where rounding happens.

#![allow(clippy::unreadable_literal)]

use crate::math::round_half_up;
use crate::{Error, Result};
use chrono::{DateTime, Datelike, NaiveDate, Utc};

/// Seconds per day (86,400)
const SECONDS_PER_DAY: f64 = 86_400.0;

/// Julian Day Number for J2000.0 epoch (2000-01-01 12:00:00 UTC)
pub const J2000_JDN: f64 = 2_451_545.0;

/// Julian date of the Unix epoch (1970-01-01 00:00:00 UTC)
const UNIX_EPOCH_JD: f64 = 2_440_587.5;

/// Offset between chrono's day count from 0001-01-01 (day 1) and the Julian Day Number.
const CE_TO_JDN_OFFSET: i64 = 1_721_425;

/// Builds a calendar date from numeric components.
///
/// # Errors
/// Returns `InvalidDateTime` if any component is outside its valid range or
/// the day does not exist in that month.
///
/// # Example
/// ```
/// # use solar_ephemeris::time::calendar_date;
/// assert!(calendar_date(2024, 2, 29).is_ok());
/// assert!(calendar_date(2023, 2, 29).is_err());
/// ```
pub fn calendar_date(year: i32, month: u32, day: u32) -> Result<NaiveDate> {
    if !(1..=12).contains(&month) {
        return Err(Error::invalid_datetime("month must be between 1 and 12"));
    }
    if !(1..=31).contains(&day) {
        return Err(Error::invalid_datetime("day must be between 1 and 31"));
    }
    NaiveDate::from_ymd_opt(year, month, day)
        .ok_or_else(|| Error::invalid_datetime("day is out of range for month"))
}

/// Julian Day Number of a calendar date, i.e. the Julian date at 12:00 UT.
///
/// # Example
/// ```
/// # use solar_ephemeris::time::julian_day_number;
/// # use chrono::NaiveDate;
/// let j2000 = NaiveDate::from_ymd_opt(2000, 1, 1).unwrap();
/// assert_eq!(julian_day_number(j2000), 2_451_545);
/// ```
#[must_use]
pub fn julian_day_number(date: NaiveDate) -> i64 {
    i64::from(date.num_days_from_ce()) + CE_TO_JDN_OFFSET
}

/// Days elapsed since J2000.0 for a Julian date.
#[must_use]
pub fn days_since_j2000(julian_date: f64) -> f64 {
    julian_date - J2000_JDN
}

/// Converts a Julian date to a UTC instant rounded to the nearest minute.
///
/// Seconds round half-up: `hh:mm:30` becomes `hh:mm+1`.
///
/// # Errors
/// Returns `InvalidDateTime` if the Julian date is not finite or falls
/// outside chrono's representable range.
///
/// # Example
/// ```
/// # use solar_ephemeris::time::julian_to_utc;
/// let noon = julian_to_utc(2_451_545.0).unwrap();
/// assert_eq!(noon.to_rfc3339(), "2000-01-01T12:00:00+00:00");
/// ```
pub fn julian_to_utc(julian_date: f64) -> Result<DateTime<Utc>> {
    if !julian_date.is_finite() {
        return Err(Error::invalid_datetime("julian date must be finite"));
    }

    let seconds = (julian_date - UNIX_EPOCH_JD) * SECONDS_PER_DAY;
    let minutes = round_half_up(seconds / 60.0);
    // i64 casts saturate, so the checked multiply catches absurd inputs
    let timestamp = (minutes as i64)
        .checked_mul(60)
        .ok_or_else(|| Error::invalid_datetime("julian date out of range"))?;

    DateTime::from_timestamp(timestamp, 0)
        .ok_or_else(|| Error::invalid_datetime("julian date out of range"))
}
