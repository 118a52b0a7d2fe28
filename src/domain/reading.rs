// Station reading domain models
use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

/// Timestamp as delivered by the station feed: epoch milliseconds or ISO-8601 text
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum StationTimestamp {
    EpochMillis(f64),
    Text(String),
}

impl StationTimestamp {
    pub fn to_utc(&self) -> Option<DateTime<Utc>> {
        match self {
            StationTimestamp::EpochMillis(ms) => Utc.timestamp_millis_opt(*ms as i64).single(),
            StationTimestamp::Text(text) => DateTime::parse_from_rfc3339(text)
                .ok()
                .map(|t| t.with_timezone(&Utc)),
        }
    }
}

/// Sensor values in the station's native units (°F, mph, inHg, inches).
/// Any field may be absent; absence propagates to the canonical reading.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RawStationReading {
    pub dateutc: Option<StationTimestamp>,
    pub date: Option<StationTimestamp>,
    #[serde(rename = "tempf")]
    pub temp_f: Option<f64>,
    #[serde(rename = "feelsLike")]
    pub feels_like_f: Option<f64>,
    #[serde(rename = "dewPoint")]
    pub dew_point_f: Option<f64>,
    pub humidity: Option<f64>,
    #[serde(rename = "baromrelin")]
    pub barom_rel_in: Option<f64>,
    #[serde(rename = "baromabsin")]
    pub barom_abs_in: Option<f64>,
    #[serde(rename = "windspeedmph")]
    pub wind_speed_mph: Option<f64>,
    #[serde(rename = "winddir")]
    pub wind_dir: Option<f64>,
    #[serde(rename = "windgustmph")]
    pub wind_gust_mph: Option<f64>,
    #[serde(rename = "hourlyrainin")]
    pub hourly_rain_in: Option<f64>,
    #[serde(rename = "dailyrainin")]
    pub daily_rain_in: Option<f64>,
    #[serde(rename = "weeklyrainin")]
    pub weekly_rain_in: Option<f64>,
    #[serde(rename = "monthlyrainin")]
    pub monthly_rain_in: Option<f64>,
    #[serde(rename = "solarradiation")]
    pub solar_radiation: Option<f64>,
    pub uv: Option<f64>,
    #[serde(rename = "tempinf")]
    pub temp_in_f: Option<f64>,
}

impl RawStationReading {
    /// Station timestamp, preferring `dateutc` over `date`
    pub fn timestamp(&self) -> Option<&StationTimestamp> {
        self.dateutc.as_ref().or(self.date.as_ref())
    }

    /// True when at least one sensor field is present
    pub fn has_sensor_payload(&self) -> bool {
        [
            self.temp_f,
            self.feels_like_f,
            self.dew_point_f,
            self.humidity,
            self.barom_rel_in,
            self.barom_abs_in,
            self.wind_speed_mph,
            self.wind_dir,
            self.wind_gust_mph,
            self.hourly_rain_in,
            self.daily_rain_in,
            self.weekly_rain_in,
            self.monthly_rain_in,
            self.solar_radiation,
            self.uv,
            self.temp_in_f,
        ]
        .iter()
        .any(Option::is_some)
    }
}

/// Normalized snapshot in the display units of the preference it was derived with
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CanonicalReading {
    pub timestamp: Option<DateTime<Utc>>,
    pub temperature: Option<f64>,
    pub temperature_feels_like: Option<f64>,
    pub humidity: Option<f64>,
    pub dew_point: Option<f64>,
    pub pressure: Option<f64>,
    pub pressure_absolute: Option<f64>,
    pub wind_speed: Option<f64>,
    pub wind_direction: Option<f64>,
    pub wind_gust: Option<f64>,
    pub rain_rate: Option<f64>,
    pub rain_daily: Option<f64>,
    pub rain_weekly: Option<f64>,
    pub rain_monthly: Option<f64>,
    pub solar_radiation: Option<f64>,
    pub uv: Option<f64>,
    pub temp_min_24h: Option<f64>,
    pub temp_max_24h: Option<f64>,
    pub humidity_min_24h: Option<f64>,
    pub humidity_max_24h: Option<f64>,
    pub pressure_min_24h: Option<f64>,
    pub pressure_max_24h: Option<f64>,
}

impl CanonicalReading {
    /// True when no field is absent
    pub fn is_complete(&self) -> bool {
        self.timestamp.is_some()
            && [
                self.temperature,
                self.temperature_feels_like,
                self.humidity,
                self.dew_point,
                self.pressure,
                self.pressure_absolute,
                self.wind_speed,
                self.wind_direction,
                self.wind_gust,
                self.rain_rate,
                self.rain_daily,
                self.rain_weekly,
                self.rain_monthly,
                self.solar_radiation,
                self.uv,
                self.temp_min_24h,
                self.temp_max_24h,
                self.humidity_min_24h,
                self.humidity_max_24h,
                self.pressure_min_24h,
                self.pressure_max_24h,
            ]
            .iter()
            .all(Option::is_some)
    }
}
