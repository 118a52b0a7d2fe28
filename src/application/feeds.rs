// Feed traits for current conditions and forecast data
use crate::domain::forecast::ForecastEntry;
use crate::domain::reading::RawStationReading;
use async_trait::async_trait;

/// Every way a feed can fail. Callers treat all of them as "fetch failed".
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),
    #[error("upstream returned HTTP {0}")]
    Status(u16),
    #[error("malformed payload: {0}")]
    Payload(String),
    #[error("API key not configured")]
    MissingApiKey,
}

impl From<serde_json::Error> for FetchError {
    fn from(e: serde_json::Error) -> Self {
        FetchError::Payload(e.to_string())
    }
}

#[async_trait]
pub trait StationFeed: Send + Sync {
    /// Fetch the latest raw reading from the station
    async fn latest(&self) -> Result<RawStationReading, FetchError>;
}

#[async_trait]
pub trait ForecastFeed: Send + Sync {
    /// Fetch up to five daily forecast entries, ascending by date
    async fn daily(&self) -> Result<Vec<ForecastEntry>, FetchError>;
}
