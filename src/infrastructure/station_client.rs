// Station feeds: local backend endpoint and the Ambient Weather REST API
use crate::application::feeds::{FetchError, StationFeed};
use crate::domain::reading::RawStationReading;
use crate::infrastructure::config::configured;
use crate::infrastructure::http_client::get_json;
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

/// Backend that serves the latest raw reading as a flat JSON object
#[derive(Debug, Clone)]
pub struct LocalStationClient {
    client: Client,
    endpoint: String,
}

impl LocalStationClient {
    pub fn new(client: Client, endpoint: String) -> Self {
        Self { client, endpoint }
    }
}

#[async_trait]
impl StationFeed for LocalStationClient {
    async fn latest(&self) -> Result<RawStationReading, FetchError> {
        tracing::debug!("Fetching current conditions from {}", self.endpoint);
        get_json(&self.client, &self.endpoint).await
    }
}

#[derive(Debug, Deserialize)]
struct AmbientDevice {
    #[serde(rename = "lastData")]
    last_data: Option<RawStationReading>,
}

/// Ambient Weather `/devices` endpoint; the first device's `lastData` is used
#[derive(Debug, Clone)]
pub struct AmbientStationClient {
    client: Client,
    base_url: String,
    api_key: Option<String>,
    application_key: Option<String>,
}

impl AmbientStationClient {
    pub fn new(
        client: Client,
        base_url: String,
        api_key: Option<String>,
        application_key: Option<String>,
    ) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
            application_key,
        }
    }

    fn build_devices_url(&self) -> Result<String, FetchError> {
        let (Some(api_key), Some(application_key)) = (
            configured(self.api_key.as_deref()),
            configured(self.application_key.as_deref()),
        ) else {
            return Err(FetchError::MissingApiKey);
        };

        Ok(format!(
            "{}/devices?applicationKey={}&apiKey={}",
            self.base_url,
            urlencoding::encode(application_key),
            urlencoding::encode(api_key)
        ))
    }
}

#[async_trait]
impl StationFeed for AmbientStationClient {
    async fn latest(&self) -> Result<RawStationReading, FetchError> {
        let url = self.build_devices_url()?;
        tracing::debug!("Fetching devices from {}/devices", self.base_url);

        let devices: Vec<AmbientDevice> = get_json(&self.client, &url).await?;
        devices
            .into_iter()
            .next()
            .and_then(|device| device.last_data)
            .ok_or_else(|| FetchError::Payload("no device data".to_string()))
    }
}
