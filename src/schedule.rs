//! Per-day sunrise/sunset tables for zoned time series.
//!
//! A forecast series in `Europe/Berlin` yields one row per Berlin calendar
//! day, each row expressed in Berlin time. Rows are computed lazily and can be
//! iterated any number of times with identical results.

use crate::{Horizon, Location, Result, SolarEvent, convert, ephemeris};
use chrono::{DateTime, NaiveDate, TimeZone};
use log::{debug, trace};
use std::borrow::Borrow;
use std::collections::BTreeSet;

/// Sunrise, transit and sunset for one local calendar day.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(bound(serialize = "")))]
pub struct DailyRow<Tz: TimeZone> {
    /// Local calendar date the row belongs to
    pub date: NaiveDate,
    /// Sunrise in the series' timezone
    pub sunrise: SolarEvent<DateTime<Tz>>,
    /// Solar transit in the series' timezone
    pub transit: DateTime<Tz>,
    /// Sunset in the series' timezone
    pub sunset: SolarEvent<DateTime<Tz>>,
}

/// Distinct local dates of a series, ready to be turned into daylight rows.
#[derive(Debug, Clone)]
pub struct DailySchedule<Tz: TimeZone> {
    location: Location,
    horizon: Horizon,
    timezone: Option<Tz>,
    dates: Vec<NaiveDate>,
}

impl<Tz: TimeZone> DailySchedule<Tz> {
    /// Creates a schedule for explicit calendar dates in `timezone`.
    ///
    /// Dates are sorted and deduplicated. The polar-region advisory is
    /// logged once here, not per row.
    ///
    /// # Example
    /// ```
    /// # use solar_ephemeris::{schedule::DailySchedule, Horizon, Location};
    /// # use chrono::NaiveDate;
    /// let quito = Location::new(-78.4678, -0.1807, 2850.0).unwrap();
    /// let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
    /// let week = start.iter_days().take(7);
    ///
    /// let schedule = DailySchedule::for_dates(quito, week, chrono_tz::America::Guayaquil, Horizon::default());
    /// assert_eq!(schedule.len(), 7);
    /// ```
    pub fn for_dates<I>(location: Location, dates: I, timezone: Tz, horizon: Horizon) -> Self
    where
        I: IntoIterator<Item = NaiveDate>,
    {
        let dates: BTreeSet<NaiveDate> = dates.into_iter().collect();
        if !dates.is_empty() {
            ephemeris::warn_if_polar(location);
        }
        Self {
            location,
            horizon,
            timezone: Some(timezone),
            dates: dates.into_iter().collect(),
        }
    }

    /// Gets the location the rows are computed for.
    #[must_use]
    pub const fn location(&self) -> Location {
        self.location
    }

    /// Gets the horizon the rows are computed for.
    #[must_use]
    pub const fn horizon(&self) -> Horizon {
        self.horizon
    }

    /// Gets the series' timezone; `None` for an empty series.
    #[must_use]
    pub const fn timezone(&self) -> Option<&Tz> {
        self.timezone.as_ref()
    }

    /// Gets the distinct local dates, ascending.
    #[must_use]
    pub fn dates(&self) -> &[NaiveDate] {
        &self.dates
    }

    /// Number of rows the schedule yields.
    #[must_use]
    pub fn len(&self) -> usize {
        self.dates.len()
    }

    /// Checks if the schedule yields no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    /// Lazily computes one row per date, ascending by date.
    ///
    /// Each call starts a fresh pass over the same dates.
    pub fn iter(&self) -> impl Iterator<Item = Result<DailyRow<Tz>>> + '_ {
        self.timezone
            .iter()
            .flat_map(move |tz| self.dates.iter().map(move |&date| self.row(date, tz)))
    }

    /// Computes every row.
    ///
    /// # Errors
    /// Returns the first row error; see [`ephemeris::compute_for_horizon`].
    pub fn rows(&self) -> Result<Vec<DailyRow<Tz>>> {
        self.iter().collect()
    }

    fn row(&self, date: NaiveDate, tz: &Tz) -> Result<DailyRow<Tz>> {
        trace!("computing daylight row for {date}");
        let events = ephemeris::utc_events(self.location, date, self.horizon)?;
        let local = convert::day_to_local(events, tz);
        Ok(DailyRow {
            date,
            sunrise: local.sunrise,
            transit: local.transit,
            sunset: local.sunset,
        })
    }
}

/// Builds the standard sunrise/sunset schedule for a zoned timestamp series.
///
/// See [`build_for_horizon`].
///
/// # Example
/// ```
/// use solar_ephemeris::{schedule, Location};
/// use chrono::{Duration, TimeZone};
/// use chrono_tz::Europe::Berlin;
///
/// let hamburg = Location::new(9.99, 53.55, 0.0).unwrap();
/// let start = Berlin.with_ymd_and_hms(2024, 6, 21, 0, 0, 0).unwrap();
/// let hourly = (0..72).map(|h| start + Duration::hours(h));
///
/// let table = schedule::build(hamburg, hourly);
/// assert_eq!(table.len(), 3);
/// for row in table.iter() {
///     let row = row.unwrap();
///     println!("{}: {:?} - {:?}", row.date, row.sunrise, row.sunset);
/// }
/// ```
pub fn build<Tz, I>(location: Location, timestamps: I) -> DailySchedule<Tz>
where
    Tz: TimeZone,
    I: IntoIterator,
    I::Item: Borrow<DateTime<Tz>>,
{
    build_for_horizon(location, timestamps, Horizon::SunriseSunset)
}

/// Builds a schedule for a zoned timestamp series and horizon type.
///
/// The series timezone is the zone of the first timestamp; every timestamp is
/// re-expressed in it and reduced to its local calendar date. Duplicate dates
/// collapse into one row and rows are ordered by date, whatever the order of
/// the input. The polar-region advisory is logged once per call.
pub fn build_for_horizon<Tz, I>(
    location: Location,
    timestamps: I,
    horizon: Horizon,
) -> DailySchedule<Tz>
where
    Tz: TimeZone,
    I: IntoIterator,
    I::Item: Borrow<DateTime<Tz>>,
{
    let mut timestamps = timestamps.into_iter();
    let Some(first) = timestamps.next() else {
        debug!("empty timestamp series, no daylight rows");
        return DailySchedule {
            location,
            horizon,
            timezone: None,
            dates: Vec::new(),
        };
    };

    let first = first.borrow();
    let timezone = first.timezone();
    let mut dates = BTreeSet::new();
    dates.insert(first.date_naive());
    for timestamp in timestamps {
        dates.insert(timestamp.borrow().with_timezone(&timezone).date_naive());
    }

    debug!(
        "series spans {} local day(s) from {:?} to {:?}",
        dates.len(),
        dates.first(),
        dates.last()
    );
    ephemeris::warn_if_polar(location);

    DailySchedule {
        location,
        horizon,
        timezone: Some(timezone),
        dates: dates.into_iter().collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, FixedOffset, Utc};
    use chrono_tz::Europe::Berlin;

    fn berlin() -> Location {
        Location::new(13.405, 52.52, 0.0).unwrap()
    }

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    #[test]
    fn test_groups_by_local_day_not_utc_day() {
        let start = Berlin.with_ymd_and_hms(2024, 6, 21, 0, 0, 0).unwrap();
        let hourly: Vec<_> = (0..48).map(|h| start + Duration::hours(h)).collect();

        let schedule = build(berlin(), &hourly);
        assert_eq!(schedule.dates(), &[date(2024, 6, 21), date(2024, 6, 22)]);

        // The same instants seen in UTC touch three calendar days
        let as_utc: Vec<_> = hourly.iter().map(|t| t.with_timezone(&Utc)).collect();
        assert_eq!(build(berlin(), &as_utc).len(), 3);
    }

    #[test]
    fn test_duplicates_collapse_and_sort() {
        let stamps = [
            Berlin.with_ymd_and_hms(2024, 3, 31, 12, 0, 0).unwrap(),
            Berlin.with_ymd_and_hms(2024, 3, 30, 8, 0, 0).unwrap(),
            Berlin.with_ymd_and_hms(2024, 3, 31, 6, 0, 0).unwrap(),
            Berlin.with_ymd_and_hms(2024, 3, 30, 23, 0, 0).unwrap(),
            Berlin.with_ymd_and_hms(2024, 3, 29, 1, 0, 0).unwrap(),
        ];

        let schedule = build(berlin(), stamps);
        assert_eq!(
            schedule.dates(),
            &[date(2024, 3, 29), date(2024, 3, 30), date(2024, 3, 31)]
        );

        let rows = schedule.rows().unwrap();
        assert_eq!(rows.len(), 3);
        assert!(rows.windows(2).all(|pair| pair[0].date < pair[1].date));
    }

    #[test]
    fn test_rows_use_series_timezone_across_dst() {
        let stamps = [
            Berlin.with_ymd_and_hms(2024, 3, 30, 12, 0, 0).unwrap(),
            Berlin.with_ymd_and_hms(2024, 3, 31, 12, 0, 0).unwrap(),
        ];
        let rows = build(berlin(), stamps).rows().unwrap();

        let before = rows[0].sunrise.instant().unwrap();
        let after = rows[1].sunrise.instant().unwrap();
        assert_eq!(before.to_rfc3339(), "2024-03-30T05:46:00+01:00");
        assert_eq!(after.to_rfc3339(), "2024-03-31T06:44:00+02:00");
    }

    #[test]
    fn test_later_timestamps_follow_first_zone() {
        let first = FixedOffset::east_opt(2 * 3600)
            .unwrap()
            .with_ymd_and_hms(2024, 6, 21, 12, 0, 0)
            .unwrap();
        // 23:30 UTC is already the 22nd at +02:00
        let late_utc = Utc
            .with_ymd_and_hms(2024, 6, 21, 23, 30, 0)
            .unwrap()
            .fixed_offset();

        let schedule = build(berlin(), [first, late_utc]);
        assert_eq!(schedule.dates(), &[date(2024, 6, 21), date(2024, 6, 22)]);
        assert_eq!(
            schedule.timezone(),
            Some(&FixedOffset::east_opt(2 * 3600).unwrap())
        );
    }

    const fn assert_total_eq<T: Eq>() {}

    #[test]
    fn test_iteration_is_restartable() {
        let start = Berlin.with_ymd_and_hms(2024, 10, 25, 0, 0, 0).unwrap();
        let schedule = build(berlin(), (0..24 * 5).map(|h| start + Duration::hours(h)));

        let first: Vec<_> = schedule.iter().collect::<Result<_>>().unwrap();
        let second: Vec<_> = schedule.iter().collect::<Result<_>>().unwrap();
        assert_eq!(first.len(), 5);
        assert_eq!(first, second);
        assert_total_eq::<DailyRow<chrono_tz::Tz>>();
    }

    #[test]
    fn test_empty_series() {
        let schedule = build::<Utc, _>(berlin(), Vec::<DateTime<Utc>>::new());
        assert!(schedule.is_empty());
        assert_eq!(schedule.timezone(), None);
        assert_eq!(schedule.iter().count(), 0);
        assert!(schedule.rows().unwrap().is_empty());
    }

    #[test]
    fn test_polar_rows() {
        let tromso = Location::new(18.9553, 69.6492, 0.0).unwrap();
        let oslo_time = chrono_tz::Europe::Oslo;
        let stamps = [
            oslo_time.with_ymd_and_hms(2024, 6, 21, 12, 0, 0).unwrap(),
            oslo_time.with_ymd_and_hms(2024, 12, 21, 12, 0, 0).unwrap(),
        ];

        let rows = build(tromso, stamps).rows().unwrap();
        assert_eq!(rows[0].sunrise, SolarEvent::PolarDay);
        assert_eq!(rows[0].sunset, SolarEvent::PolarDay);
        assert_eq!(rows[1].sunrise, SolarEvent::PolarNight);
        assert_eq!(rows[1].sunset, SolarEvent::PolarNight);
        assert_eq!(rows[1].transit.date_naive(), date(2024, 12, 21));
    }

    #[test]
    fn test_for_dates_and_horizon() {
        let dates = [date(2024, 9, 23), date(2024, 9, 22), date(2024, 9, 22)];
        let civil = DailySchedule::for_dates(berlin(), dates, Berlin, Horizon::CivilTwilight);
        let standard = DailySchedule::for_dates(berlin(), dates, Berlin, Horizon::SunriseSunset);

        assert_eq!(civil.len(), 2);
        assert_eq!(civil.horizon(), Horizon::CivilTwilight);

        for (civil_row, standard_row) in civil.iter().zip(standard.iter()) {
            let (civil_row, standard_row) = (civil_row.unwrap(), standard_row.unwrap());
            assert!(civil_row.sunrise.instant() < standard_row.sunrise.instant());
            assert!(civil_row.sunset.instant() > standard_row.sunset.instant());
            assert_eq!(civil_row.transit, standard_row.transit);
        }
    }
}
