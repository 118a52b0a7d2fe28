// Derived classifications computed from an already-converted reading
use chrono::{DateTime, TimeZone, Utc};
use serde::Serialize;

use super::reading::CanonicalReading;

const COMPASS: [&str; 16] = [
    "N", "NNE", "NE", "ENE", "E", "ESE", "SE", "SSE", "S", "SSW", "SW", "WSW", "W", "WNW", "NW",
    "NNW",
];

/// Map wind direction degrees to one of 16 compass points
pub fn compass_point(degrees: f64) -> &'static str {
    let idx = ((degrees / 22.5).round() as i64).rem_euclid(16);
    COMPASS[idx as usize]
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PressureTrend {
    Steady,
    Rising,
    Falling,
}

/// Compare relative against absolute pressure, both in the same display unit
pub fn pressure_trend(current: f64, absolute: f64) -> PressureTrend {
    let diff = current - absolute;
    if diff.abs() < 0.5 {
        PressureTrend::Steady
    } else if diff > 0.0 {
        PressureTrend::Rising
    } else {
        PressureTrend::Falling
    }
}

/// Five-band level shared by UV index and solar intensity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Level {
    Low,
    Moderate,
    High,
    #[serde(rename = "Very High")]
    VeryHigh,
    Extreme,
}

impl Level {
    fn banded(value: f64, bounds: [f64; 4]) -> Self {
        if value < bounds[0] {
            Level::Low
        } else if value < bounds[1] {
            Level::Moderate
        } else if value < bounds[2] {
            Level::High
        } else if value < bounds[3] {
            Level::VeryHigh
        } else {
            Level::Extreme
        }
    }
}

pub fn uv_level(uv: f64) -> Level {
    Level::banded(uv, [3.0, 6.0, 8.0, 11.0])
}

/// Solar radiation in W/m²
pub fn solar_intensity(radiation: f64) -> Level {
    Level::banded(radiation, [200.0, 400.0, 600.0, 800.0])
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum WeatherSummary {
    Rainy,
    Humid,
    Hot,
    Cold,
    Pleasant,
    #[serde(rename = "Partly Cloudy")]
    PartlyCloudy,
}

/// First matching rule wins; an absent input never matches its rule.
pub fn weather_summary(
    temperature: Option<f64>,
    humidity: Option<f64>,
    rain_rate: Option<f64>,
) -> WeatherSummary {
    let above = |value: Option<f64>, limit: f64| value.is_some_and(|v| v > limit);

    if above(rain_rate, 1.0) {
        WeatherSummary::Rainy
    } else if above(humidity, 80.0) {
        WeatherSummary::Humid
    } else if above(temperature, 30.0) {
        WeatherSummary::Hot
    } else if temperature.is_some_and(|t| t < 10.0) {
        WeatherSummary::Cold
    } else if temperature.is_some_and(|t| (20.0..=25.0).contains(&t)) {
        WeatherSummary::Pleasant
    } else {
        WeatherSummary::PartlyCloudy
    }
}

/// `HH:MM` (24h) of a reading's timestamp in the given zone
pub fn update_time<Tz: TimeZone>(timestamp: &DateTime<Utc>, tz: &Tz) -> String
where
    Tz::Offset: std::fmt::Display,
{
    timestamp.with_timezone(tz).format("%H:%M").to_string()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Insights {
    pub compass: Option<&'static str>,
    pub pressure_trend: Option<PressureTrend>,
    pub uv_level: Option<Level>,
    pub solar_intensity: Option<Level>,
    pub description: Option<WeatherSummary>,
    pub updated_at: Option<String>,
}

impl Insights {
    pub fn from_reading<Tz: TimeZone>(reading: &CanonicalReading, tz: &Tz) -> Self
    where
        Tz::Offset: std::fmt::Display,
    {
        Self {
            compass: reading.wind_direction.map(compass_point),
            pressure_trend: reading
                .pressure
                .zip(reading.pressure_absolute)
                .map(|(current, absolute)| pressure_trend(current, absolute)),
            uv_level: reading.uv.map(uv_level),
            solar_intensity: reading.solar_radiation.map(solar_intensity),
            description: [reading.temperature, reading.humidity, reading.rain_rate]
                .iter()
                .any(Option::is_some)
                .then(|| weather_summary(reading.temperature, reading.humidity, reading.rain_rate)),
            updated_at: reading.timestamp.as_ref().map(|ts| update_time(ts, tz)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::FixedOffset;

    #[test]
    fn test_compass_point() {
        assert_eq!(compass_point(0.0), "N");
        assert_eq!(compass_point(22.5), "NNE");
        assert_eq!(compass_point(90.0), "E");
        assert_eq!(compass_point(180.0), "S");
        assert_eq!(compass_point(270.0), "W");
        assert_eq!(compass_point(359.0), "N");
        assert_eq!(compass_point(360.0), "N");
    }

    #[test]
    fn test_pressure_trend() {
        assert_eq!(pressure_trend(1013.0, 1013.0), PressureTrend::Steady);
        assert_eq!(pressure_trend(1013.4, 1013.0), PressureTrend::Steady);
        assert_eq!(pressure_trend(1015.0, 1010.0), PressureTrend::Rising);
        assert_eq!(pressure_trend(1008.0, 1013.0), PressureTrend::Falling);
    }

    #[test]
    fn test_uv_level_bands() {
        assert_eq!(uv_level(2.9), Level::Low);
        assert_eq!(uv_level(3.0), Level::Moderate);
        assert_eq!(uv_level(7.9), Level::High);
        assert_eq!(uv_level(10.9), Level::VeryHigh);
        assert_eq!(uv_level(11.0), Level::Extreme);
    }

    #[test]
    fn test_solar_intensity_bands() {
        assert_eq!(solar_intensity(0.0), Level::Low);
        assert_eq!(solar_intensity(200.0), Level::Moderate);
        assert_eq!(solar_intensity(599.9), Level::High);
        assert_eq!(solar_intensity(799.0), Level::VeryHigh);
        assert_eq!(solar_intensity(1000.0), Level::Extreme);
    }

    #[test]
    fn test_weather_summary_order() {
        // rain takes precedence over humidity
        assert_eq!(weather_summary(Some(22.0), Some(90.0), Some(2.0)), WeatherSummary::Rainy);
        assert_eq!(weather_summary(Some(35.0), Some(90.0), Some(0.0)), WeatherSummary::Humid);
        assert_eq!(weather_summary(Some(35.0), Some(40.0), Some(0.0)), WeatherSummary::Hot);
        assert_eq!(weather_summary(Some(5.0), Some(40.0), None), WeatherSummary::Cold);
        assert_eq!(weather_summary(Some(20.0), Some(40.0), None), WeatherSummary::Pleasant);
        assert_eq!(weather_summary(Some(25.0), Some(40.0), None), WeatherSummary::Pleasant);
        assert_eq!(weather_summary(Some(27.0), Some(40.0), None), WeatherSummary::PartlyCloudy);
        assert_eq!(weather_summary(None, None, None), WeatherSummary::PartlyCloudy);
    }

    #[test]
    fn test_level_labels() {
        assert_eq!(serde_json::to_value(Level::VeryHigh).unwrap(), "Very High");
        assert_eq!(serde_json::to_value(WeatherSummary::PartlyCloudy).unwrap(), "Partly Cloudy");
    }

    #[test]
    fn test_insights_from_reading() {
        let reading = CanonicalReading {
            timestamp: Some(Utc.with_ymd_and_hms(2024, 5, 1, 9, 5, 0).unwrap()),
            temperature: Some(22.0),
            humidity: Some(50.0),
            rain_rate: Some(0.0),
            wind_direction: Some(180.0),
            pressure: Some(1015.0),
            pressure_absolute: Some(1010.0),
            uv: Some(5.0),
            ..Default::default()
        };
        let tz = FixedOffset::east_opt(3 * 3600).unwrap();

        let insights = Insights::from_reading(&reading, &tz);
        assert_eq!(insights.compass, Some("S"));
        assert_eq!(insights.pressure_trend, Some(PressureTrend::Rising));
        assert_eq!(insights.uv_level, Some(Level::Moderate));
        assert_eq!(insights.solar_intensity, None);
        assert_eq!(insights.description, Some(WeatherSummary::Pleasant));
        assert_eq!(insights.updated_at.as_deref(), Some("12:05"));
    }

    #[test]
    fn test_insights_without_inputs_are_null() {
        let reading = CanonicalReading {
            uv: Some(2.0),
            ..Default::default()
        };

        let insights = Insights::from_reading(&reading, &Utc);
        assert_eq!(insights.uv_level, Some(Level::Low));
        assert_eq!(insights.description, None);
        assert_eq!(insights.compass, None);
        assert_eq!(insights.pressure_trend, None);
        assert_eq!(insights.updated_at, None);

        let json = serde_json::to_value(&insights).unwrap();
        assert!(json["description"].is_null());

        let humid_only = CanonicalReading {
            humidity: Some(90.0),
            ..Default::default()
        };
        let insights = Insights::from_reading(&humid_only, &Utc);
        assert_eq!(insights.description, Some(WeatherSummary::Humid));
    }
}
