// OpenWeatherMap 5 day / 3 hour forecast feed
use crate::application::feeds::{FetchError, ForecastFeed};
use crate::application::forecast_reducer;
use crate::domain::forecast::{ForecastEntry, ForecastSample};
use crate::infrastructure::config::configured;
use crate::infrastructure::http_client::get_json;
use async_trait::async_trait;
use chrono::{Local, TimeZone, Utc};
use reqwest::Client;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct OwmForecastResponse {
    list: Vec<OwmSample>,
}

#[derive(Debug, Deserialize)]
struct OwmSample {
    dt: i64,
    main: OwmMain,
    #[serde(default)]
    weather: Vec<OwmWeather>,
    wind: OwmWind,
    clouds: OwmClouds,
    rain: Option<OwmRain>,
}

#[derive(Debug, Deserialize)]
struct OwmMain {
    temp: f64,
    temp_min: f64,
    temp_max: f64,
    humidity: f64,
}

#[derive(Debug, Deserialize)]
struct OwmWeather {
    description: String,
    icon: String,
}

#[derive(Debug, Deserialize)]
struct OwmWind {
    speed: f64,
}

#[derive(Debug, Deserialize)]
struct OwmClouds {
    all: f64,
}

#[derive(Debug, Deserialize)]
struct OwmRain {
    #[serde(rename = "3h")]
    three_hours: Option<f64>,
}

impl OwmSample {
    fn into_sample(self) -> Option<ForecastSample> {
        let time = Utc.timestamp_opt(self.dt, 0).single()?;
        let (description, icon) = self
            .weather
            .into_iter()
            .next()
            .map(|w| (w.description, w.icon))
            .unwrap_or_default();

        Some(ForecastSample {
            time,
            temp: self.main.temp,
            temp_min: self.main.temp_min,
            temp_max: self.main.temp_max,
            humidity: self.main.humidity,
            description,
            icon,
            wind_speed_ms: self.wind.speed,
            clouds: self.clouds.all,
            rain_3h: self.rain.and_then(|r| r.three_hours),
        })
    }
}

/// Days are grouped in `tz`, the host's local zone unless overridden
#[derive(Debug, Clone)]
pub struct OpenWeatherMapClient<Tz = Local> {
    client: Client,
    base_url: String,
    api_key: Option<String>,
    latitude: f64,
    longitude: f64,
    tz: Tz,
}

impl OpenWeatherMapClient {
    pub fn new(
        client: Client,
        base_url: String,
        api_key: Option<String>,
        latitude: f64,
        longitude: f64,
    ) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
            latitude,
            longitude,
            tz: Local,
        }
    }
}

impl<Tz: TimeZone> OpenWeatherMapClient<Tz> {
    pub fn with_time_zone<Other: TimeZone>(self, tz: Other) -> OpenWeatherMapClient<Other> {
        OpenWeatherMapClient {
            client: self.client,
            base_url: self.base_url,
            api_key: self.api_key,
            latitude: self.latitude,
            longitude: self.longitude,
            tz,
        }
    }

    fn build_forecast_url(&self, api_key: &str) -> String {
        format!(
            "{}/forecast?lat={}&lon={}&appid={}&units=metric",
            self.base_url,
            self.latitude,
            self.longitude,
            urlencoding::encode(api_key)
        )
    }

    /// Raw 3-hourly samples, metric units. Fails without a network attempt
    /// when no API key is configured.
    pub async fn fetch_samples(&self) -> Result<Vec<ForecastSample>, FetchError> {
        let api_key = configured(self.api_key.as_deref()).ok_or(FetchError::MissingApiKey)?;
        tracing::debug!(
            "Fetching forecast for {},{} from {}",
            self.latitude,
            self.longitude,
            self.base_url
        );

        let response: OwmForecastResponse =
            get_json(&self.client, &self.build_forecast_url(api_key)).await?;
        Ok(response
            .list
            .into_iter()
            .filter_map(OwmSample::into_sample)
            .collect())
    }
}

#[async_trait]
impl<Tz> ForecastFeed for OpenWeatherMapClient<Tz>
where
    Tz: TimeZone + Send + Sync + 'static,
{
    async fn daily(&self) -> Result<Vec<ForecastEntry>, FetchError> {
        let samples = self.fetch_samples().await?;
        Ok(forecast_reducer::reduce(&samples, &self.tz))
    }
}
