//! Error types for the solar ephemeris library.

use std::fmt;

/// Result type alias for operations in this crate.
pub type Result<T> = core::result::Result<T, Error>;

/// Errors that can occur while building inputs or computing solar events.
///
/// Polar day and polar night are not errors; they are regular
/// [`SolarEvent`](crate::SolarEvent) variants.
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// Invalid latitude value (must be between -90 and +90 degrees).
    InvalidLatitude {
        /// The invalid latitude value provided.
        value: f64,
    },
    /// Invalid longitude value (must be between -180 and +180 degrees).
    InvalidLongitude {
        /// The invalid longitude value provided.
        value: f64,
    },
    /// Invalid observer altitude (must be a finite, non-negative number of meters).
    InvalidAltitude {
        /// The invalid altitude value provided.
        value: f64,
    },
    /// Invalid elevation angle for a custom horizon.
    InvalidElevationAngle {
        /// The invalid elevation angle value provided.
        value: f64,
    },
    /// Invalid calendar date, or an instant outside the representable range.
    InvalidDateTime {
        /// Description of the date/time constraint violation.
        message: &'static str,
    },
    /// Timezone identifier not found in the IANA timezone database.
    UnknownTimezone {
        /// The identifier that failed to resolve.
        name: String,
    },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidLatitude { value } => {
                write!(
                    f,
                    "invalid latitude {value}° (must be between -90° and +90°)"
                )
            }
            Self::InvalidLongitude { value } => {
                write!(
                    f,
                    "invalid longitude {value}° (must be between -180° and +180°)"
                )
            }
            Self::InvalidAltitude { value } => {
                write!(f, "invalid altitude {value} m (must be zero or positive)")
            }
            Self::InvalidElevationAngle { value } => {
                write!(
                    f,
                    "invalid elevation angle {value}° (must be between -90° and +90°)"
                )
            }
            Self::InvalidDateTime { message } => {
                write!(f, "invalid date/time: {message}")
            }
            Self::UnknownTimezone { name } => {
                write!(f, "unknown timezone '{name}' (expected an IANA zone id)")
            }
        }
    }
}

impl std::error::Error for Error {}

impl Error {
    /// Creates an invalid latitude error.
    #[must_use]
    pub const fn invalid_latitude(value: f64) -> Self {
        Self::InvalidLatitude { value }
    }

    /// Creates an invalid longitude error.
    #[must_use]
    pub const fn invalid_longitude(value: f64) -> Self {
        Self::InvalidLongitude { value }
    }

    /// Creates an invalid altitude error.
    #[must_use]
    pub const fn invalid_altitude(value: f64) -> Self {
        Self::InvalidAltitude { value }
    }

    /// Creates an invalid elevation angle error.
    #[must_use]
    pub const fn invalid_elevation_angle(value: f64) -> Self {
        Self::InvalidElevationAngle { value }
    }

    /// Creates an invalid date/time error.
    #[must_use]
    pub const fn invalid_datetime(message: &'static str) -> Self {
        Self::InvalidDateTime { message }
    }

    /// Creates an unknown timezone error.
    #[must_use]
    pub fn unknown_timezone(name: impl Into<String>) -> Self {
        Self::UnknownTimezone { name: name.into() }
    }
}

/// Validates latitude is within the valid range (-90 to +90 degrees).
///
/// # Errors
/// Returns `InvalidLatitude` if latitude is outside -90 to +90 degrees or not finite.
pub fn check_latitude(latitude: f64) -> Result<()> {
    if !(-90.0..=90.0).contains(&latitude) {
        return Err(Error::invalid_latitude(latitude));
    }
    Ok(())
}

/// Validates longitude is within the valid range (-180 to +180 degrees).
///
/// # Errors
/// Returns `InvalidLongitude` if longitude is outside -180 to +180 degrees or not finite.
pub fn check_longitude(longitude: f64) -> Result<()> {
    if !(-180.0..=180.0).contains(&longitude) {
        return Err(Error::invalid_longitude(longitude));
    }
    Ok(())
}

/// Validates both latitude and longitude are within valid ranges.
///
/// # Errors
/// Returns `InvalidLatitude` or `InvalidLongitude` for out-of-range coordinates.
pub fn check_coordinates(latitude: f64, longitude: f64) -> Result<()> {
    check_latitude(latitude)?;
    check_longitude(longitude)?;
    Ok(())
}

/// Validates the observer altitude is finite and not below sea level.
///
/// # Errors
/// Returns `InvalidAltitude` for negative, NaN or infinite altitudes.
pub fn check_altitude(altitude: f64) -> Result<()> {
    if !altitude.is_finite() || altitude < 0.0 {
        return Err(Error::invalid_altitude(altitude));
    }
    Ok(())
}

/// Validates a horizon elevation angle (-90 to +90 degrees).
///
/// # Errors
/// Returns `InvalidElevationAngle` if the angle is outside -90 to +90 degrees or not finite.
pub fn check_elevation_angle(elevation: f64) -> Result<()> {
    if !(-90.0..=90.0).contains(&elevation) {
        return Err(Error::invalid_elevation_angle(elevation));
    }
    Ok(())
}
