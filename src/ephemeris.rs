//! Sunrise/sunset ephemeris.
//!
//! Simplified solar-position method: mean anomaly, equation of center and
//! ecliptic longitude give the solar transit and declination for a calendar
//! day; the hour-angle equation then yields sunrise and sunset, or tells that
//! the sun never crosses the horizon (polar day/night).
//!
//! Accuracy is about a minute for mid latitudes, which matches the
//! minute-rounded output of [`compute`].

#![allow(clippy::unreadable_literal)]

use crate::math::{acos_deg, asin_deg, cos_deg, mul_add, normalize_degrees_0_to_360, sin_deg};
use crate::time::{J2000_JDN, days_since_j2000, julian_day_number, julian_to_utc};
use crate::{DayEvents, Horizon, Location, Result, SolarEvent};
use chrono::NaiveDate;
use log::{debug, warn};

/// Fraction of a day added to the day count (leap seconds and TT drift)
const LEAP_SECOND_DRIFT_DAYS: f64 = 0.00084;

/// Mean anomaly at J2000.0 (degrees)
const MEAN_ANOMALY_AT_EPOCH: f64 = 357.5291;

/// Mean anomaly advance per day (degrees)
const MEAN_ANOMALY_RATE: f64 = 0.98560028;

/// Argument of perihelion of the Earth (degrees)
const PERIHELION_ARGUMENT: f64 = 102.9372;

/// Obliquity of the ecliptic (degrees)
const OBLIQUITY: f64 = 23.44;

/// Horizon dip per square root of altitude in meters (degrees)
const ALTITUDE_DIP_COEFFICIENT: f64 = 2.076 / 60.0;

/// Intermediate solar quantities for one location and calendar day.
///
/// Angles are in degrees, normalized to `[0, 360)` where they come out of a
/// modulo step. Julian values are unrounded.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolarGeometry {
    /// Days since J2000.0 for the calendar day, including the drift term
    pub day_number: f64,
    /// Mean solar time: `day_number` corrected for longitude
    pub mean_solar_time: f64,
    /// Solar mean anomaly M
    pub mean_anomaly: f64,
    /// Equation of center C
    pub equation_of_center: f64,
    /// Ecliptic longitude λ
    pub ecliptic_longitude: f64,
    /// Julian date of the solar transit (local solar noon)
    pub transit: f64,
    /// Solar declination δ
    pub declination: f64,
}

/// Derives the intermediate solar quantities for `date` at `location`.
///
/// Only longitude matters here; latitude and altitude enter at the
/// hour-angle step.
///
/// # Example
/// ```
/// # use solar_ephemeris::{ephemeris, Location};
/// # use chrono::NaiveDate;
/// let hamburg = Location::new(9.99, 53.55, 0.0).unwrap();
/// let date = NaiveDate::from_ymd_opt(2024, 6, 21).unwrap();
/// let geometry = ephemeris::solar_geometry(hamburg, date);
/// assert!((geometry.declination - 23.44).abs() < 0.01);
/// ```
#[must_use]
pub fn solar_geometry(location: Location, date: NaiveDate) -> SolarGeometry {
    let julian_day = julian_day_number(date) as f64;
    let day_number = days_since_j2000(julian_day) + LEAP_SECOND_DRIFT_DAYS;
    let mean_solar_time = day_number - location.longitude() / 360.0;

    let mean_anomaly = normalize_degrees_0_to_360(mul_add(
        MEAN_ANOMALY_RATE,
        mean_solar_time,
        MEAN_ANOMALY_AT_EPOCH,
    ));
    let equation_of_center = equation_of_center(mean_anomaly);
    let ecliptic_longitude = normalize_degrees_0_to_360(
        mean_anomaly + equation_of_center + 180.0 + PERIHELION_ARGUMENT,
    );

    let transit = mul_add(
        -0.0069,
        sin_deg(2.0 * ecliptic_longitude),
        mul_add(0.0053, sin_deg(mean_anomaly), J2000_JDN + mean_solar_time),
    );
    let declination = asin_deg(sin_deg(ecliptic_longitude) * sin_deg(OBLIQUITY));

    SolarGeometry {
        day_number,
        mean_solar_time,
        mean_anomaly,
        equation_of_center,
        ecliptic_longitude,
        transit,
        declination,
    }
}

fn equation_of_center(mean_anomaly: f64) -> f64 {
    let second_order = mul_add(
        0.0200,
        sin_deg(2.0 * mean_anomaly),
        0.0003 * sin_deg(3.0 * mean_anomaly),
    );
    mul_add(1.9148, sin_deg(mean_anomaly), second_order)
}

/// Elevation (degrees) the sun's center must reach for a rise/set event.
///
/// The horizon's nominal angle is lowered by the dip of the visible horizon
/// for an observer `altitude` meters above sea level.
///
/// # Example
/// ```
/// # use solar_ephemeris::{ephemeris, Horizon};
/// assert_eq!(ephemeris::effective_horizon(Horizon::SunriseSunset, 0.0), -0.833);
/// assert!(ephemeris::effective_horizon(Horizon::SunriseSunset, 100.0) < -1.1);
/// ```
#[must_use]
pub fn effective_horizon(horizon: Horizon, altitude: f64) -> f64 {
    mul_add(
        -ALTITUDE_DIP_COEFFICIENT,
        altitude.sqrt(),
        horizon.elevation_angle(),
    )
}

/// Cosine of the sunrise hour angle ω0.
///
/// Values above 1 mean the sun never reaches `horizon_elevation` (polar
/// night); values below -1 mean it never drops to it (polar day). At the
/// poles the denominator is only a rounding error away from zero, which
/// pushes the result far outside `[-1, 1]` with the correct sign.
#[must_use]
pub fn hour_angle_cosine(latitude: f64, declination: f64, horizon_elevation: f64) -> f64 {
    mul_add(
        -sin_deg(latitude),
        sin_deg(declination),
        sin_deg(horizon_elevation),
    ) / (cos_deg(latitude) * cos_deg(declination))
}

/// Sunrise, transit and sunset as unrounded Julian dates.
///
/// Numeric counterpart of [`compute_for_horizon`]; useful for comparing
/// day lengths without minute rounding.
///
/// # Example
/// ```
/// # use solar_ephemeris::{ephemeris, Horizon, Location};
/// # use chrono::NaiveDate;
/// let equator = Location::new(0.0, 0.0, 0.0).unwrap();
/// let equinox = NaiveDate::from_ymd_opt(2024, 3, 20).unwrap();
/// let events = ephemeris::compute_julian(equator, equinox, Horizon::Geometric);
/// let hours = events.day_length().unwrap() * 24.0;
/// assert!((hours - 12.0).abs() < 1.0 / 60.0);
/// ```
#[must_use]
pub fn compute_julian(location: Location, date: NaiveDate, horizon: Horizon) -> DayEvents<f64> {
    warn_if_polar(location);
    julian_events(location, date, horizon)
}

/// Logs the polar-region advisory for `location`, if it applies.
pub(crate) fn warn_if_polar(location: Location) {
    if location.is_polar_region() {
        warn!(
            "latitude {}° lies beyond the polar circle; expect polar day/night results around the solstices",
            location.latitude()
        );
    }
}

fn julian_events(location: Location, date: NaiveDate, horizon: Horizon) -> DayEvents<f64> {
    let geometry = solar_geometry(location, date);
    let horizon_elevation = effective_horizon(horizon, location.altitude());
    let cos_omega = hour_angle_cosine(
        location.latitude(),
        geometry.declination,
        horizon_elevation,
    );

    debug!(
        "{date} at ({}, {}): M={:.4} C={:.4} λ={:.4} δ={:.4} transit={:.6} h={:.4} cos(ω0)={:.6}",
        location.longitude(),
        location.latitude(),
        geometry.mean_anomaly,
        geometry.equation_of_center,
        geometry.ecliptic_longitude,
        geometry.declination,
        geometry.transit,
        horizon_elevation,
        cos_omega,
    );

    let transit = geometry.transit;
    if cos_omega > 1.0 {
        debug!("{date}: sun stays below {horizon_elevation:.3}° (polar night)");
        return DayEvents {
            sunrise: SolarEvent::PolarNight,
            transit,
            sunset: SolarEvent::PolarNight,
        };
    }
    if cos_omega < -1.0 {
        debug!("{date}: sun stays above {horizon_elevation:.3}° (polar day)");
        return DayEvents {
            sunrise: SolarEvent::PolarDay,
            transit,
            sunset: SolarEvent::PolarDay,
        };
    }

    let half_day = acos_deg(cos_omega) / 360.0;
    DayEvents {
        sunrise: SolarEvent::Instant(transit - half_day),
        transit,
        sunset: SolarEvent::Instant(transit + half_day),
    }
}

/// Calculates sunrise, solar transit and sunset in UTC for a horizon type.
///
/// Instants are rounded to the nearest minute. Sunrise and sunset belong to
/// the solar day around the local transit of `date`, so west or east of
/// Greenwich they may fall on the neighbouring UTC calendar day.
///
/// # Errors
/// Returns `InvalidDateTime` only if an event falls outside chrono's
/// representable range (dates at the extreme ends of [`NaiveDate`]).
///
/// # Example
/// ```
/// # use solar_ephemeris::{ephemeris, Horizon, Location};
/// # use chrono::NaiveDate;
/// let hamburg = Location::new(9.99, 53.55, 0.0).unwrap();
/// let date = NaiveDate::from_ymd_opt(2024, 6, 21).unwrap();
///
/// let civil = ephemeris::compute_for_horizon(hamburg, date, Horizon::CivilTwilight).unwrap();
/// let standard = ephemeris::compute(hamburg, date).unwrap();
/// assert!(civil.sunrise.instant() < standard.sunrise.instant());
/// ```
pub fn compute_for_horizon(
    location: Location,
    date: NaiveDate,
    horizon: Horizon,
) -> Result<DayEvents> {
    warn_if_polar(location);
    utc_events(location, date, horizon)
}

/// [`compute_for_horizon`] without the polar-region advisory, for callers
/// that issue it once for a whole batch.
pub(crate) fn utc_events(
    location: Location,
    date: NaiveDate,
    horizon: Horizon,
) -> Result<DayEvents> {
    let events = julian_events(location, date, horizon);
    Ok(DayEvents {
        sunrise: event_to_utc(events.sunrise)?,
        transit: julian_to_utc(events.transit)?,
        sunset: event_to_utc(events.sunset)?,
    })
}

/// Calculates standard sunrise and sunset in UTC for a location and calendar date.
///
/// Uses [`Horizon::SunriseSunset`]. The result is a pure function of its
/// inputs, so callers may memoize it by `(location, date)`.
///
/// # Errors
/// Returns `InvalidDateTime` only if an event falls outside chrono's
/// representable range.
///
/// # Example
/// ```
/// use solar_ephemeris::{ephemeris, Location, SolarEvent};
/// use chrono::NaiveDate;
///
/// let longyearbyen = Location::new(15.65, 78.22, 0.0).unwrap();
/// let midsummer = NaiveDate::from_ymd_opt(2024, 6, 21).unwrap();
///
/// let events = ephemeris::compute(longyearbyen, midsummer).unwrap();
/// match events.sunrise {
///     SolarEvent::Instant(sunrise) => println!("Sunrise: {sunrise}"),
///     SolarEvent::PolarDay => println!("Midnight sun"),
///     SolarEvent::PolarNight => println!("Polar night"),
/// }
/// assert!(events.is_polar_day());
/// ```
pub fn compute(location: Location, date: NaiveDate) -> Result<DayEvents> {
    compute_for_horizon(location, date, Horizon::SunriseSunset)
}

fn event_to_utc(event: SolarEvent<f64>) -> Result<SolarEvent> {
    Ok(match event {
        SolarEvent::Instant(julian_date) => SolarEvent::Instant(julian_to_utc(julian_date)?),
        SolarEvent::PolarDay => SolarEvent::PolarDay,
        SolarEvent::PolarNight => SolarEvent::PolarNight,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Utc};

    const EPSILON: f64 = 1e-6;

    fn hamburg() -> Location {
        Location::new(9.99, 53.55, 0.0).unwrap()
    }

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    fn utc(s: &str) -> DateTime<Utc> {
        s.parse::<DateTime<Utc>>().unwrap()
    }

    #[test]
    fn test_solar_geometry_summer_solstice() {
        let geometry = solar_geometry(hamburg(), date(2024, 6, 21));

        assert!((geometry.day_number - 8938.00084).abs() < EPSILON);
        assert!((geometry.mean_solar_time - (8938.00084 - 9.99 / 360.0)).abs() < EPSILON);
        assert!((geometry.mean_anomaly - 166.7979).abs() < 1e-3);
        assert!((geometry.equation_of_center - 0.4286).abs() < 1e-3);
        assert!((geometry.ecliptic_longitude - 90.1637).abs() < 1e-3);
        assert!((geometry.declination - 23.4399).abs() < 1e-3);
    }

    #[test]
    fn test_solar_geometry_winter_solstice() {
        let geometry = solar_geometry(hamburg(), date(2024, 12, 21));

        assert!((geometry.mean_anomaly - 347.1627).abs() < 1e-3);
        assert!((geometry.equation_of_center + 0.434_287).abs() < 1e-3);
        assert!((geometry.ecliptic_longitude - 269.6656).abs() < 1e-3);
        assert!((geometry.declination + 23.4396).abs() < 1e-3);
    }

    #[test]
    fn test_angles_are_normalized() {
        for year in [1900, 1999, 2024, 2100] {
            for month in 1..=12 {
                let geometry = solar_geometry(hamburg(), date(year, month, 15));
                assert!((0.0..360.0).contains(&geometry.mean_anomaly));
                assert!((0.0..360.0).contains(&geometry.ecliptic_longitude));
                assert!(geometry.declination.abs() <= OBLIQUITY + EPSILON);
            }
        }
    }

    #[test]
    fn test_effective_horizon_altitude_dip() {
        assert_eq!(effective_horizon(Horizon::SunriseSunset, 0.0), -0.833);
        assert_eq!(effective_horizon(Horizon::Geometric, 0.0), 0.0);
        let at_100m = effective_horizon(Horizon::SunriseSunset, 100.0);
        assert!((at_100m - (-0.833 - 2.076 * 10.0 / 60.0)).abs() < EPSILON);
        let civil_at_400m = effective_horizon(Horizon::CivilTwilight, 400.0);
        assert!((civil_at_400m - (-6.0 - 2.076 * 20.0 / 60.0)).abs() < EPSILON);
    }

    #[test]
    fn test_hour_angle_cosine_polar_sign() {
        // Summer at the north pole: sun always up
        assert!(hour_angle_cosine(90.0, 23.44, -0.833) < -1.0);
        // Winter at the north pole: sun always down
        assert!(hour_angle_cosine(90.0, -23.44, -0.833) > 1.0);
        // Equator with geometric horizon: exactly a quarter turn
        assert!(hour_angle_cosine(0.0, 10.0, 0.0).abs() < EPSILON);
    }

    #[test]
    fn test_hamburg_reference_times() {
        let summer = compute(hamburg(), date(2024, 6, 21)).unwrap();
        assert_eq!(summer.sunrise, SolarEvent::Instant(utc("2024-06-21T02:52:00Z")));
        assert_eq!(summer.transit, utc("2024-06-21T11:23:00Z"));
        assert_eq!(summer.sunset, SolarEvent::Instant(utc("2024-06-21T19:54:00Z")));

        let winter = compute(hamburg(), date(2024, 12, 21)).unwrap();
        assert_eq!(winter.sunset, SolarEvent::Instant(utc("2024-12-21T15:03:00Z")));
        // 07:35:45 sits on the rounding boundary
        let sunrise = *winter.sunrise.instant().unwrap();
        let offset = sunrise.signed_duration_since(utc("2024-12-21T07:36:00Z"));
        assert!(offset.num_minutes().abs() <= 1);
    }

    #[test]
    fn test_output_is_minute_aligned() {
        let events = compute(hamburg(), date(2024, 3, 20)).unwrap();
        for instant in [
            events.sunrise.instant().copied(),
            Some(events.transit),
            events.sunset.instant().copied(),
        ]
        .into_iter()
        .flatten()
        {
            assert_eq!(instant.timestamp() % 60, 0);
        }
    }

    #[test]
    fn test_altitude_widens_the_day() {
        let sea_level = compute_julian(hamburg(), date(2024, 6, 21), Horizon::SunriseSunset);
        let mountain = Location::new(9.99, 53.55, 1000.0).unwrap();
        let elevated = compute_julian(mountain, date(2024, 6, 21), Horizon::SunriseSunset);

        assert_eq!(sea_level.transit, elevated.transit);
        assert!(elevated.day_length().unwrap() > sea_level.day_length().unwrap());
    }

    #[test]
    fn test_twilight_ordering() {
        let horizons = [
            Horizon::AstronomicalTwilight,
            Horizon::NauticalTwilight,
            Horizon::CivilTwilight,
            Horizon::SunriseSunset,
            Horizon::Geometric,
        ];
        let berlin_equinox = Location::new(13.405, 52.52, 0.0).unwrap();

        let lengths: Vec<f64> = horizons
            .iter()
            .map(|h| {
                compute_julian(berlin_equinox, date(2024, 3, 20), *h)
                    .day_length()
                    .unwrap()
            })
            .collect();
        assert!(lengths.windows(2).all(|pair| pair[0] > pair[1]));
    }

    #[test]
    fn test_polar_outcomes_keep_transit() {
        let longyearbyen = Location::new(15.65, 78.22, 0.0).unwrap();

        let summer = compute(longyearbyen, date(2024, 6, 21)).unwrap();
        assert!(summer.is_polar_day());
        assert_eq!(summer.sunset, SolarEvent::PolarDay);
        assert_eq!(summer.transit, utc("2024-06-21T11:00:00Z"));

        let winter = compute(longyearbyen, date(2024, 12, 21)).unwrap();
        assert!(winter.is_polar_night());
        assert_eq!(winter.sunset, SolarEvent::PolarNight);
        assert_eq!(winter.transit, utc("2024-12-21T10:57:00Z"));
    }

    #[test]
    fn test_poles() {
        let north_pole = Location::new(0.0, 90.0, 0.0).unwrap();
        assert!(compute(north_pole, date(2024, 6, 21)).unwrap().is_polar_day());
        assert!(compute(north_pole, date(2024, 12, 21)).unwrap().is_polar_night());

        let south_pole = Location::new(0.0, -90.0, 2835.0).unwrap();
        assert!(compute(south_pole, date(2024, 6, 21)).unwrap().is_polar_night());
        assert!(compute(south_pole, date(2024, 12, 21)).unwrap().is_polar_day());
    }

    #[test]
    fn test_extreme_dates_are_reported() {
        // Sunset near the date line falls on the next UTC day, past chrono's last date
        let date_line_west = Location::new(-170.0, 0.0, 0.0).unwrap();
        assert!(compute(date_line_west, NaiveDate::MAX).is_err());
        // Sunrise near the eastern date line falls before chrono's first date
        let date_line_east = Location::new(170.0, 0.0, 0.0).unwrap();
        assert!(compute(date_line_east, NaiveDate::MIN).is_err());

        assert!(compute(hamburg(), date(1, 1, 1)).is_ok());
    }
}
