// Synthetic demo data used whenever a live feed fails
use crate::application::feeds::{FetchError, ForecastFeed, StationFeed};
use crate::domain::forecast::ForecastEntry;
use crate::domain::reading::{RawStationReading, StationTimestamp};
use crate::domain::units::{celsius_to_fahrenheit, native, round_to};
use async_trait::async_trait;
use chrono::{DateTime, Duration, Local, TimeZone, Timelike, Utc};
use rand::Rng;
use std::f64::consts::PI;

const FORECAST_DAYS: i64 = 5;
const DESCRIPTIONS: [&str; 4] = ["clear sky", "few clouds", "scattered clouds", "partly cloudy"];

/// Diurnal base temperature in °C, peaking in the early afternoon
fn base_temperature(hour: u32) -> f64 {
    22.0 + (hour as f64 / 24.0 * PI * 2.0).sin() * 5.0
}

/// Daylight curve in [0, 1], zero between 18:00 and 06:00
fn daylight(hour: u32) -> f64 {
    ((hour as f64 - 6.0) / 12.0 * PI).sin().max(0.0)
}

/// A full station reading in native units with every sensor field present.
///
/// Values are drawn in metric ranges and stored as °F/mph/inHg/in so the
/// reading goes through the same normalizer as live data.
pub fn station_reading<Tz: TimeZone, R: Rng>(now: &DateTime<Tz>, rng: &mut R) -> RawStationReading {
    let hour = now.hour();
    let base = base_temperature(hour);
    let wind_kmh = rng.random_range(0.0..20.0);
    let light = daylight(hour);

    RawStationReading {
        dateutc: Some(StationTimestamp::EpochMillis(now.timestamp_millis() as f64)),
        date: None,
        temp_f: Some(celsius_to_fahrenheit(base)),
        feels_like_f: Some(celsius_to_fahrenheit(base - 1.0)),
        dew_point_f: Some(celsius_to_fahrenheit(base - 5.0)),
        humidity: Some(rng.random_range(60.0f64..80.0).round()),
        barom_rel_in: Some(native::hpa_to_in_hg(rng.random_range(1008.0..1018.0))),
        barom_abs_in: Some(native::hpa_to_in_hg(rng.random_range(1008.0..1018.0))),
        wind_speed_mph: Some(native::kmh_to_mph(wind_kmh)),
        wind_dir: Some(rng.random_range(0..360) as f64),
        wind_gust_mph: Some(native::kmh_to_mph(wind_kmh + rng.random_range(0.0..10.0))),
        hourly_rain_in: Some(native::mm_to_inches(rng.random_range(0.0..2.0))),
        daily_rain_in: Some(native::mm_to_inches(rng.random_range(0.0..10.0))),
        weekly_rain_in: Some(native::mm_to_inches(rng.random_range(0.0..30.0))),
        monthly_rain_in: Some(native::mm_to_inches(rng.random_range(0.0..100.0))),
        solar_radiation: Some((light * 1000.0).round()),
        uv: Some(round_to(light * 11.0, 1)),
        temp_in_f: Some(celsius_to_fahrenheit(base)),
    }
}

/// Five synthetic daily entries for the days after `now`, ascending
pub fn forecast<Tz: TimeZone, R: Rng>(now: &DateTime<Tz>, rng: &mut R) -> Vec<ForecastEntry> {
    (1..=FORECAST_DAYS)
        .map(|offset| {
            let day = now.clone() + Duration::days(offset);
            ForecastEntry {
                date: day.date_naive(),
                time: day.with_timezone(&Utc),
                temp: round_to(rng.random_range(20.0..30.0), 1),
                temp_min: round_to(rng.random_range(15.0..20.0), 1),
                temp_max: round_to(rng.random_range(25.0..30.0), 1),
                humidity: rng.random_range(50.0f64..80.0).round(),
                description: DESCRIPTIONS[rng.random_range(0..DESCRIPTIONS.len())].to_string(),
                icon: "01d".to_string(),
                wind_speed_kmh: round_to(rng.random_range(0.0..20.0), 1),
                clouds: rng.random_range(0..100) as f64,
                rain: round_to(rng.random_range(0.0..5.0), 1),
            }
        })
        .collect()
}

/// Station feed backed by the synthetic generator
#[derive(Debug, Clone, Copy, Default)]
pub struct DemoStationFeed;

#[async_trait]
impl StationFeed for DemoStationFeed {
    async fn latest(&self) -> Result<RawStationReading, FetchError> {
        Ok(station_reading(&Local::now(), &mut rand::rng()))
    }
}

/// Forecast feed backed by the synthetic generator
#[derive(Debug, Clone, Copy, Default)]
pub struct DemoForecastFeed;

#[async_trait]
impl ForecastFeed for DemoForecastFeed {
    async fn daily(&self) -> Result<Vec<ForecastEntry>, FetchError> {
        Ok(forecast(&Local::now(), &mut rand::rng()))
    }
}
