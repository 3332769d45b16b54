//! Core data types for sunrise/sunset calculations.

use crate::Result;
use crate::error::{check_altitude, check_coordinates, check_elevation_angle};
use chrono::{DateTime, Duration, TimeZone, Utc};

/// Absolute latitude (degrees) beyond which polar day/night results are common.
pub const POLAR_CIRCLE_LATITUDE: f64 = 66.56;

/// Observer position on Earth.
///
/// Immutable value type; ranges are enforced once at construction so every
/// computation can take a `Location` by value without revalidating it.
///
/// # Example
/// ```
/// # use solar_ephemeris::Location;
/// let hamburg = Location::new(9.99, 53.55, 0.0).unwrap();
/// assert_eq!(hamburg.latitude(), 53.55);
/// assert!(!hamburg.is_polar_region());
///
/// assert!(Location::new(9.99, 95.0, 0.0).is_err());
/// assert!(Location::new(9.99, 53.55, -1.0).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Location {
    /// Longitude in degrees, east positive (-180 to +180)
    longitude: f64,
    /// Latitude in degrees, north positive (-90 to +90)
    latitude: f64,
    /// Altitude above sea level in meters (≥ 0)
    altitude: f64,
}

impl Location {
    /// Creates a validated location.
    ///
    /// # Errors
    /// Returns `InvalidLongitude`, `InvalidLatitude` or `InvalidAltitude` for
    /// out-of-range or non-finite values.
    pub fn new(longitude: f64, latitude: f64, altitude: f64) -> Result<Self> {
        check_coordinates(latitude, longitude)?;
        check_altitude(altitude)?;
        Ok(Self {
            longitude,
            latitude,
            altitude,
        })
    }

    /// Creates a validated location at sea level.
    ///
    /// # Errors
    /// Returns `InvalidLongitude` or `InvalidLatitude` for out-of-range values.
    pub fn at_sea_level(longitude: f64, latitude: f64) -> Result<Self> {
        Self::new(longitude, latitude, 0.0)
    }

    /// Gets the longitude in degrees (east positive).
    #[must_use]
    pub const fn longitude(&self) -> f64 {
        self.longitude
    }

    /// Gets the latitude in degrees (north positive).
    #[must_use]
    pub const fn latitude(&self) -> f64 {
        self.latitude
    }

    /// Gets the altitude above sea level in meters.
    #[must_use]
    pub const fn altitude(&self) -> f64 {
        self.altitude
    }

    /// Checks whether the location lies beyond either polar circle.
    ///
    /// Results there are frequently [`SolarEvent::PolarDay`] or
    /// [`SolarEvent::PolarNight`].
    #[must_use]
    pub fn is_polar_region(&self) -> bool {
        self.latitude.abs() > POLAR_CIRCLE_LATITUDE
    }
}

/// Sun elevation that counts as "on the horizon" for a rise/set event.
///
/// The observer's altitude lowers the effective horizon further; see
/// [`ephemeris::effective_horizon`](crate::ephemeris::effective_horizon).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum Horizon {
    /// Standard sunrise/sunset: upper limb on the horizon, first-order refraction (-0.833°)
    #[default]
    SunriseSunset,
    /// Sun's center on the mathematical horizon, no refraction (0°)
    Geometric,
    /// Civil twilight (sun is 6° below horizon)
    CivilTwilight,
    /// Nautical twilight (sun is 12° below horizon)
    NauticalTwilight,
    /// Astronomical twilight (sun is 18° below horizon)
    AstronomicalTwilight,
    /// Custom elevation angle
    Custom(f64),
}

impl Horizon {
    /// Gets the elevation angle in degrees for this horizon definition.
    ///
    /// Negative values indicate the sun is below the horizon.
    #[must_use]
    pub const fn elevation_angle(&self) -> f64 {
        match self {
            Self::SunriseSunset => -0.833,
            Self::Geometric => 0.0,
            Self::CivilTwilight => -6.0,
            Self::NauticalTwilight => -12.0,
            Self::AstronomicalTwilight => -18.0,
            Self::Custom(angle) => *angle,
        }
    }

    /// Creates a custom horizon with the specified elevation angle.
    ///
    /// # Errors
    /// Returns `InvalidElevationAngle` if elevation is outside -90 to +90 degrees.
    pub fn custom(elevation_degrees: f64) -> Result<Self> {
        check_elevation_angle(elevation_degrees)?;
        Ok(Self::Custom(elevation_degrees))
    }
}

/// Outcome of a sunrise or sunset computation.
///
/// Near the poles the sun may not cross the horizon at all on a given day;
/// those outcomes are regular results, not errors. Consumers must branch on
/// the variant rather than assume an instant is present.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum SolarEvent<T = DateTime<Utc>> {
    /// The event happens at this instant
    Instant(T),
    /// Sun stays above the horizon all day (it never sets)
    PolarDay,
    /// Sun stays below the horizon all day (it never rises)
    PolarNight,
}

impl<T> SolarEvent<T> {
    /// Gets the event instant, if there is one.
    pub const fn instant(&self) -> Option<&T> {
        if let Self::Instant(instant) = self {
            Some(instant)
        } else {
            None
        }
    }

    /// Checks if this is a regular rise/set instant.
    pub const fn is_instant(&self) -> bool {
        matches!(self, Self::Instant(_))
    }

    /// Checks if this represents a polar day (sun never sets).
    pub const fn is_polar_day(&self) -> bool {
        matches!(self, Self::PolarDay)
    }

    /// Checks if this represents a polar night (sun never rises).
    pub const fn is_polar_night(&self) -> bool {
        matches!(self, Self::PolarNight)
    }

    /// Maps the instant with `f`; polar variants pass through unchanged.
    pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> SolarEvent<U> {
        match self {
            Self::Instant(instant) => SolarEvent::Instant(f(instant)),
            Self::PolarDay => SolarEvent::PolarDay,
            Self::PolarNight => SolarEvent::PolarNight,
        }
    }
}

/// Sunrise, solar transit and sunset for one location and calendar date.
///
/// The transit (local solar noon) is always defined; on polar days it is the
/// sun's highest point, on polar nights its least-low point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct DayEvents<T = DateTime<Utc>> {
    /// Sunrise outcome
    pub sunrise: SolarEvent<T>,
    /// Time of solar transit (sun crosses the local meridian)
    pub transit: T,
    /// Sunset outcome
    pub sunset: SolarEvent<T>,
}

impl<T> DayEvents<T> {
    /// Checks if both sunrise and sunset are regular instants.
    pub const fn is_regular_day(&self) -> bool {
        self.sunrise.is_instant() && self.sunset.is_instant()
    }

    /// Checks if this represents a polar day (sun never sets).
    pub const fn is_polar_day(&self) -> bool {
        self.sunrise.is_polar_day()
    }

    /// Checks if this represents a polar night (sun never rises).
    pub const fn is_polar_night(&self) -> bool {
        self.sunrise.is_polar_night()
    }

    /// Maps every instant with `f`.
    pub fn map<U, F: FnMut(T) -> U>(self, mut f: F) -> DayEvents<U> {
        DayEvents {
            sunrise: self.sunrise.map(&mut f),
            transit: f(self.transit),
            sunset: self.sunset.map(&mut f),
        }
    }
}

impl<Tz: TimeZone> DayEvents<DateTime<Tz>> {
    /// Duration from sunrise to sunset, when both happen.
    #[must_use]
    pub fn daylight(&self) -> Option<Duration> {
        match (&self.sunrise, &self.sunset) {
            (SolarEvent::Instant(sunrise), SolarEvent::Instant(sunset)) => {
                Some(sunset.clone().signed_duration_since(sunrise.clone()))
            }
            _ => None,
        }
    }
}

impl DayEvents<f64> {
    /// Unrounded sunrise-to-sunset length in days, when both happen.
    #[must_use]
    pub fn day_length(&self) -> Option<f64> {
        match (self.sunrise, self.sunset) {
            (SolarEvent::Instant(sunrise), SolarEvent::Instant(sunset)) => Some(sunset - sunrise),
            _ => None,
        }
    }
}
