//! # Solar Ephemeris Library
//!
//! Sunrise and sunset instants for any point on Earth and any calendar date, with
//! polar day / polar night handled as regular results and conversion into civil
//! IANA timezones.
//!
//! The library is organised in three stateless layers:
//! - [`ephemeris`]: solar transit, declination and hour angle for a location and
//!   date, giving sunrise/sunset in UTC (minute precision) or a polar indicator
//! - [`convert`]: re-expresses UTC results in a timezone using tz database rules
//! - [`schedule`]: turns a zoned time series (e.g. an hourly forecast) into one
//!   sunrise/sunset row per local calendar day
//!
//! Every function is a pure function of its inputs, so results can be memoized
//! externally by `(location, date)` and computed from any thread.
//!
//! ## Feature Flags
//!
//! - `serde`: implement `serde::Serialize` for result types, e.g. to hand a
//!   daylight table to a charting front end as JSON
//!
//! ## Quick Start
//!
//! ### Single day
//! ```rust
//! use solar_ephemeris::{ephemeris, convert, Location, SolarEvent};
//! use chrono::NaiveDate;
//!
//! let hamburg = Location::new(9.99, 53.55, 0.0).unwrap();
//! let date = NaiveDate::from_ymd_opt(2024, 6, 21).unwrap();
//!
//! let events = ephemeris::compute(hamburg, date).unwrap();
//! let berlin_time = convert::parse_timezone("Europe/Berlin").unwrap();
//!
//! match convert::to_local(events.sunrise, &berlin_time) {
//!     SolarEvent::Instant(sunrise) => println!("Sunrise: {}", sunrise.format("%H:%M")),
//!     SolarEvent::PolarDay => println!("The sun does not set today"),
//!     SolarEvent::PolarNight => println!("The sun does not rise today"),
//! }
//! ```
//!
//! ### Daylight table for a forecast series
//! ```rust
//! use solar_ephemeris::{schedule, Location, SolarEvent};
//! use chrono::{Duration, TimeZone};
//! use chrono_tz::Europe::Oslo;
//!
//! let tromso = Location::new(18.9553, 69.6492, 0.0).unwrap();
//! let start = Oslo.with_ymd_and_hms(2024, 5, 18, 0, 0, 0).unwrap();
//! let forecast = (0..24 * 4).map(|h| start + Duration::hours(h));
//!
//! for row in schedule::build(tromso, forecast).iter() {
//!     let row = row.unwrap();
//!     match (row.sunrise, row.sunset) {
//!         (SolarEvent::Instant(rise), SolarEvent::Instant(set)) => {
//!             println!("{}: shade {} - {}", row.date, rise.format("%H:%M"), set.format("%H:%M"));
//!         }
//!         (SolarEvent::PolarDay, _) => println!("{}: full-width daylight band", row.date),
//!         _ => println!("{}: no daylight band", row.date),
//!     }
//! }
//! ```
//!
//! ## Conventions
//!
//! - Longitude: degrees east positive (-180° to +180°)
//! - Latitude: degrees north positive (-90° to +90°)
//! - Altitude: meters above sea level (≥ 0), lowers the visible horizon
//! - Standard horizon: -0.833° (first-order refraction plus solar semi-diameter)

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![warn(clippy::pedantic, clippy::nursery, clippy::cargo, clippy::all)]
#![allow(
    clippy::module_name_repetitions,
    clippy::cast_possible_truncation,
    clippy::cast_precision_loss,
    clippy::cargo_common_metadata,
    clippy::multiple_crate_versions, // Acceptable for dev-dependencies
    clippy::float_cmp, // Exact comparisons of constants in tests
)]

// Public API exports
pub use crate::error::{Error, Result};
pub use crate::schedule::{DailyRow, DailySchedule};
pub use crate::types::{DayEvents, Horizon, Location, POLAR_CIRCLE_LATITUDE, SolarEvent};

// Algorithm modules
pub mod convert;
pub mod ephemeris;
pub mod schedule;

// Core modules
pub mod error;
pub mod types;

// Internal modules
mod math;

// Public modules
pub mod time;
