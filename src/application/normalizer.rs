// Raw station reading -> canonical reading in the requested display units
use crate::domain::reading::{CanonicalReading, RawStationReading, StationTimestamp};
use crate::domain::units::{self, DisplayUnits};

/// Normalize a raw station reading.
///
/// Returns `None` when there is no reading or it carries no sensor values;
/// the caller substitutes fallback data in that case. Each field goes through
/// the conversion picked by `display`, fields without a conversion pass through.
///
/// The 24h min/max fields mirror instantaneous values (`tempinf`, `humidity`,
/// `baromrelin`); the station feed carries no true extrema.
pub fn normalize(
    raw: Option<&RawStationReading>,
    display: &DisplayUnits,
) -> Option<CanonicalReading> {
    let raw = raw.filter(|r| r.has_sensor_payload())?;

    let temperature = |f: Option<f64>| f.map(|v| units::temperature(v, display.temperature()));
    let wind = |mph: Option<f64>| mph.map(|v| units::wind_speed(v, display.wind()));
    let pressure = |in_hg: Option<f64>| in_hg.map(|v| units::pressure(v, display.pressure()));
    let rain = |inches: Option<f64>| inches.map(|v| units::rain(v, display.rain()));

    Some(CanonicalReading {
        timestamp: raw.timestamp().and_then(StationTimestamp::to_utc),
        temperature: temperature(raw.temp_f),
        temperature_feels_like: temperature(raw.feels_like_f),
        humidity: raw.humidity,
        dew_point: temperature(raw.dew_point_f),
        pressure: pressure(raw.barom_rel_in),
        pressure_absolute: pressure(raw.barom_abs_in),
        wind_speed: wind(raw.wind_speed_mph),
        wind_direction: raw.wind_dir,
        wind_gust: wind(raw.wind_gust_mph),
        rain_rate: rain(raw.hourly_rain_in),
        rain_daily: rain(raw.daily_rain_in),
        rain_weekly: rain(raw.weekly_rain_in),
        rain_monthly: rain(raw.monthly_rain_in),
        solar_radiation: raw.solar_radiation,
        uv: raw.uv,
        temp_min_24h: temperature(raw.temp_in_f),
        temp_max_24h: temperature(raw.temp_in_f),
        humidity_min_24h: raw.humidity,
        humidity_max_24h: raw.humidity,
        pressure_min_24h: pressure(raw.barom_rel_in),
        pressure_max_24h: pressure(raw.barom_rel_in),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::units::{TemperatureUnit, UnitSystem};

    fn station_reading() -> RawStationReading {
        RawStationReading {
            dateutc: Some(StationTimestamp::EpochMillis(1_714_564_800_000.0)),
            temp_f: Some(72.0),
            feels_like_f: Some(71.0),
            dew_point_f: Some(50.0),
            humidity: Some(46.0),
            barom_rel_in: Some(29.92),
            barom_abs_in: Some(29.80),
            wind_speed_mph: Some(10.0),
            wind_dir: Some(225.0),
            wind_gust_mph: Some(15.0),
            hourly_rain_in: Some(0.0),
            daily_rain_in: Some(0.1),
            weekly_rain_in: Some(0.5),
            monthly_rain_in: Some(2.0),
            solar_radiation: Some(512.3),
            uv: Some(4.0),
            temp_in_f: Some(70.0),
            ..Default::default()
        }
    }

    fn metric() -> DisplayUnits {
        DisplayUnits::for_system(UnitSystem::Metric)
    }

    fn imperial() -> DisplayUnits {
        DisplayUnits::for_system(UnitSystem::Imperial)
    }

    #[test]
    fn test_absent_reading_yields_none() {
        assert_eq!(normalize(None, &metric()), None);
        assert_eq!(normalize(Some(&RawStationReading::default()), &metric()), None);
    }

    #[test]
    fn test_metric_conversion() {
        let reading = normalize(Some(&station_reading()), &metric()).unwrap();
        assert_eq!(reading.temperature, Some(22.2));
        assert_eq!(reading.temperature_feels_like, Some(21.7));
        assert_eq!(reading.dew_point, Some(10.0));
        assert_eq!(reading.pressure, Some(1013.2));
        assert_eq!(reading.pressure_absolute, Some(1009.1));
        assert_eq!(reading.wind_speed, Some(16.1));
        assert_eq!(reading.wind_gust, Some(24.1));
        assert_eq!(reading.rain_daily, Some(2.5));
        assert_eq!(reading.rain_monthly, Some(50.8));
        assert!(reading.timestamp.is_some());
    }

    #[test]
    fn test_imperial_is_identity_with_precision() {
        let reading = normalize(Some(&station_reading()), &imperial()).unwrap();
        assert_eq!(reading.temperature, Some(72.0));
        assert_eq!(reading.pressure, Some(29.92));
        assert_eq!(reading.wind_speed, Some(10.0));
        assert_eq!(reading.rain_weekly, Some(0.5));
    }

    #[test]
    fn test_unconverted_fields_pass_through() {
        for display in [metric(), imperial()] {
            let reading = normalize(Some(&station_reading()), &display).unwrap();
            assert_eq!(reading.humidity, Some(46.0));
            assert_eq!(reading.wind_direction, Some(225.0));
            assert_eq!(reading.solar_radiation, Some(512.3));
            assert_eq!(reading.uv, Some(4.0));
        }
    }

    #[test]
    fn test_missing_fields_stay_absent() {
        let raw = RawStationReading {
            temp_f: Some(50.0),
            ..Default::default()
        };
        let reading = normalize(Some(&raw), &metric()).unwrap();
        assert_eq!(reading.temperature, Some(10.0));
        assert_eq!(reading.humidity, None);
        assert_eq!(reading.wind_speed, None);
        assert_eq!(reading.timestamp, None);
    }

    #[test]
    fn test_daily_extrema_mirror_instantaneous_fields() {
        let reading = normalize(Some(&station_reading()), &metric()).unwrap();
        assert_eq!(reading.temp_min_24h, Some(21.1));
        assert_eq!(reading.temp_max_24h, Some(21.1));
        assert_eq!(reading.humidity_min_24h, reading.humidity);
        assert_eq!(reading.pressure_max_24h, reading.pressure);
    }

    #[test]
    fn test_switching_units_rederives_from_raw() {
        let raw = station_reading();
        let first = normalize(Some(&raw), &metric()).unwrap();
        let as_imperial = normalize(Some(&raw), &imperial()).unwrap();
        let again = normalize(Some(&raw), &metric()).unwrap();
        assert_eq!(first, again);

        let back = units::temperature_from_celsius(
            first.temperature.unwrap(),
            TemperatureUnit::Fahrenheit,
        );
        assert!((back - as_imperial.temperature.unwrap()).abs() <= 0.1 + 1e-9);
    }
}
