//! Conversion of UTC solar events into civil timezones.
//!
//! Offsets come from the zone's own rules (the IANA tz database via
//! `chrono-tz` for named zones), so a sunrise on either side of a DST switch
//! picks up the offset in force at that instant.

use crate::{DayEvents, Error, Result, SolarEvent};
use chrono::{DateTime, TimeZone, Utc};
use chrono_tz::Tz;

/// Resolves an IANA timezone identifier such as `"Europe/Berlin"`.
///
/// # Errors
/// Returns `UnknownTimezone` if the identifier is not in the tz database.
///
/// # Example
/// ```
/// # use solar_ephemeris::convert::parse_timezone;
/// assert_eq!(parse_timezone("Europe/Berlin").unwrap(), chrono_tz::Europe::Berlin);
/// assert!(parse_timezone("Europe/Atlantis").is_err());
/// ```
pub fn parse_timezone(name: &str) -> Result<Tz> {
    name.trim()
        .parse::<Tz>()
        .map_err(|_| Error::unknown_timezone(name))
}

/// Re-expresses a UTC solar event in `tz`.
///
/// Polar day and polar night pass through unchanged.
///
/// # Example
/// ```
/// use solar_ephemeris::{convert, SolarEvent};
/// use chrono::{DateTime, Utc};
/// use chrono_tz::Europe::Berlin;
///
/// let sunrise = "2024-06-21T02:52:00Z".parse::<DateTime<Utc>>().unwrap();
/// let local = convert::to_local(SolarEvent::Instant(sunrise), &Berlin);
/// assert_eq!(local.instant().unwrap().to_rfc3339(), "2024-06-21T04:52:00+02:00");
///
/// let polar: SolarEvent = SolarEvent::PolarDay;
/// assert_eq!(convert::to_local(polar, &Berlin), SolarEvent::PolarDay);
/// ```
pub fn to_local<Tz2: TimeZone>(
    event: SolarEvent<DateTime<Utc>>,
    tz: &Tz2,
) -> SolarEvent<DateTime<Tz2>> {
    event.map(|instant| instant.with_timezone(tz))
}

/// Re-expresses sunrise, transit and sunset in `tz`.
pub fn day_to_local<Tz2: TimeZone>(
    events: DayEvents<DateTime<Utc>>,
    tz: &Tz2,
) -> DayEvents<DateTime<Tz2>> {
    events.map(|instant| instant.with_timezone(tz))
}
