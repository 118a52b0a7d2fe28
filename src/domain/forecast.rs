// Forecast domain models
use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;

use super::units::{self, DisplayUnits, round_to};

/// One provider sample, metric units (°C, m/s, mm)
#[derive(Debug, Clone, PartialEq)]
pub struct ForecastSample {
    pub time: DateTime<Utc>,
    pub temp: f64,
    pub temp_min: f64,
    pub temp_max: f64,
    pub humidity: f64,
    pub description: String,
    pub icon: String,
    pub wind_speed_ms: f64,
    pub clouds: f64,
    pub rain_3h: Option<f64>,
}

/// One day's summary in source units (°C, km/h, mm)
#[derive(Debug, Clone, PartialEq)]
pub struct ForecastEntry {
    pub date: NaiveDate,
    pub time: DateTime<Utc>,
    pub temp: f64,
    pub temp_min: f64,
    pub temp_max: f64,
    pub humidity: f64,
    pub description: String,
    pub icon: String,
    pub wind_speed_kmh: f64,
    pub clouds: f64,
    pub rain: f64,
}

/// Coarse icon category derived from the forecast description
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ForecastIcon {
    Rain,
    Cloud,
    Clear,
}

impl ForecastIcon {
    pub fn from_description(description: &str) -> Self {
        if description.contains("rain") {
            ForecastIcon::Rain
        } else if description.contains("cloud") {
            ForecastIcon::Cloud
        } else {
            ForecastIcon::Clear
        }
    }
}

/// Forecast entry as handed to the renderer, temperatures in display units
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ForecastView {
    pub date: NaiveDate,
    pub weekday: String,
    pub date_label: String,
    pub temp: f64,
    pub temp_min: f64,
    pub temp_max: f64,
    pub humidity: f64,
    pub description: String,
    pub icon: String,
    pub icon_kind: ForecastIcon,
    pub wind_speed: f64,
    pub clouds: f64,
    pub rain: f64,
}

impl ForecastView {
    pub fn from_entry(entry: &ForecastEntry, units: &DisplayUnits) -> Self {
        let temperature = units.temperature();
        Self {
            date: entry.date,
            weekday: entry.date.format("%a").to_string(),
            date_label: entry.date.format("%b %-d").to_string(),
            temp: units::temperature_from_celsius(entry.temp, temperature),
            temp_min: units::temperature_from_celsius(entry.temp_min, temperature),
            temp_max: units::temperature_from_celsius(entry.temp_max, temperature),
            humidity: entry.humidity.round(),
            description: entry.description.clone(),
            icon: entry.icon.clone(),
            icon_kind: ForecastIcon::from_description(&entry.description),
            wind_speed: round_to(entry.wind_speed_kmh, 1),
            clouds: entry.clouds,
            rain: round_to(entry.rain, 1),
        }
    }
}
