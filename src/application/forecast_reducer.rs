// Reduce 3-hourly forecast samples to one midday entry per day
use crate::domain::forecast::{ForecastEntry, ForecastSample};
use chrono::{NaiveDate, TimeZone, Timelike};
use std::collections::HashSet;
use std::ops::RangeInclusive;

pub const MAX_DAYS: usize = 5;
const MIDDAY_HOURS: RangeInclusive<u32> = 11..=13;
const MS_TO_KMH: f64 = 3.6;

/// Pick the first sample per local calendar day whose local hour is within
/// 11:00-13:00. Days without such a sample are dropped, so fewer than
/// [`MAX_DAYS`] entries may come back.
pub fn reduce<Tz: TimeZone>(samples: &[ForecastSample], tz: &Tz) -> Vec<ForecastEntry> {
    let mut ordered: Vec<&ForecastSample> = samples.iter().collect();
    ordered.sort_by_key(|s| s.time);

    let mut seen_days: HashSet<NaiveDate> = HashSet::new();
    let mut entries = Vec::with_capacity(MAX_DAYS);

    for sample in ordered {
        if entries.len() == MAX_DAYS {
            break;
        }

        let local = sample.time.with_timezone(tz);
        let day = local.date_naive();
        if seen_days.contains(&day) || !MIDDAY_HOURS.contains(&local.hour()) {
            continue;
        }

        seen_days.insert(day);
        entries.push(ForecastEntry {
            date: day,
            time: sample.time,
            temp: sample.temp,
            temp_min: sample.temp_min,
            temp_max: sample.temp_max,
            humidity: sample.humidity,
            description: sample.description.clone(),
            icon: sample.icon.clone(),
            wind_speed_kmh: sample.wind_speed_ms * MS_TO_KMH,
            clouds: sample.clouds,
            rain: sample.rain_3h.unwrap_or(0.0),
        });
    }

    entries
}
