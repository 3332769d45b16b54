//! Prints a week of sunrise/sunset times in local time for cities around the world.
//!
//! Set `RUST_LOG=debug` to see the intermediate solar quantities.

use chrono::{DateTime, Duration, Local, NaiveTime, TimeZone};
use chrono_tz::Tz;
use log::info;
use solar_ephemeris::{DailyRow, Location, SolarEvent, convert, schedule};

#[derive(Debug)]
struct City {
    name: &'static str,
    timezone: &'static str,
    latitude: f64,
    longitude: f64,
    altitude: f64,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .try_init()?;

    let cities = [
        City {
            name: "Hamburg, Germany",
            timezone: "Europe/Berlin",
            latitude: 53.55,
            longitude: 9.99,
            altitude: 0.0,
        },
        City {
            name: "Tromsø, Norway (Arctic)",
            timezone: "Europe/Oslo",
            latitude: 69.6492,
            longitude: 18.9553,
            altitude: 0.0,
        },
        City {
            name: "Quito, Ecuador",
            timezone: "America/Guayaquil",
            latitude: -0.1807,
            longitude: -78.4678,
            altitude: 2850.0,
        },
        City {
            name: "Auckland, New Zealand",
            timezone: "Pacific/Auckland",
            latitude: -36.840556,
            longitude: 174.74,
            altitude: 0.0,
        },
    ];

    let today = Local::now().date_naive();
    info!("daylight table for the week starting {today}");

    for city in &cities {
        let tz = convert::parse_timezone(city.timezone)?;
        let location = Location::new(city.longitude, city.latitude, city.altitude)?;

        // An hourly forecast grid, the way a weather feed would deliver it
        let Some(midnight) = tz.from_local_datetime(&today.and_time(NaiveTime::MIN)).earliest() else {
            continue;
        };
        let forecast: Vec<DateTime<Tz>> = (0..24 * 7).map(|h| midnight + Duration::hours(h)).collect();

        println!("=== {} ({}) ===", city.name, city.timezone);
        println!(
            "Coordinates: {:.2}°N, {:.2}°E, {:.0} m",
            city.latitude, city.longitude, city.altitude
        );
        if location.is_polar_region() {
            println!("Inside the polar circle: expect days without sunrise or sunset");
        }

        for row in schedule::build(location, &forecast).iter() {
            print_row(&row?);
        }
        println!();
    }

    Ok(())
}

fn print_row(row: &DailyRow<Tz>) {
    let daylight = match (&row.sunrise, &row.sunset) {
        (SolarEvent::Instant(sunrise), SolarEvent::Instant(sunset)) => {
            let length = sunset.signed_duration_since(sunrise);
            format!("{}h{:02}m", length.num_hours(), length.num_minutes() % 60)
        }
        (SolarEvent::PolarDay, _) => "24h00m".to_string(),
        _ => "0h00m".to_string(),
    };

    println!(
        "{}  rise {:>11}  noon {}  set {:>11}  daylight {}",
        row.date,
        format_event(&row.sunrise),
        row.transit.format("%H:%M"),
        format_event(&row.sunset),
        daylight
    );
}

fn format_event(event: &SolarEvent<DateTime<Tz>>) -> String {
    match event {
        SolarEvent::Instant(instant) => instant.format("%H:%M %Z").to_string(),
        SolarEvent::PolarDay => "polar day".to_string(),
        SolarEvent::PolarNight => "polar night".to_string(),
    }
}
