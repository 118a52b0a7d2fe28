// Dashboard configuration: file plus environment overrides
use crate::domain::units::UnitSystem;
use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

/// Placeholder shipped in example configs; treated as "no key"
const API_KEY_PLACEHOLDER: &str = "YOUR_OWM_API_KEY_HERE";

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct DashboardConfig {
    /// Serve synthetic data only, never touch the network
    pub demo: bool,
    pub server: ServerSettings,
    pub station: StationSettings,
    pub forecast: ForecastSettings,
    pub units: UnitSettings,
    pub preferences: PreferenceSettings,
    pub http: HttpSettings,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ServerSettings {
    pub bind: String,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            bind: "0.0.0.0:8080".to_string(),
        }
    }
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum StationKind {
    /// Local backend returning the raw reading as a flat JSON object
    #[default]
    Local,
    /// Ambient Weather REST API, first device's `lastData`
    Ambient,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct StationSettings {
    pub kind: StationKind,
    pub endpoint: String,
    pub api_key: Option<String>,
    pub application_key: Option<String>,
    pub base_url: String,
    pub interval_secs: u64,
}

impl Default for StationSettings {
    fn default() -> Self {
        Self {
            kind: StationKind::Local,
            endpoint: "http://localhost:8000/api/current".to_string(),
            api_key: None,
            application_key: None,
            base_url: "https://api.ambientweather.net/v1".to_string(),
            interval_secs: 60,
        }
    }
}

impl StationSettings {
    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_secs)
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ForecastSettings {
    pub api_key: Option<String>,
    pub latitude: f64,
    pub longitude: f64,
    pub base_url: String,
    pub interval_secs: u64,
}

impl Default for ForecastSettings {
    fn default() -> Self {
        Self {
            api_key: None,
            latitude: 32.4,
            longitude: 35.0,
            base_url: "https://api.openweathermap.org/data/2.5".to_string(),
            interval_secs: 1800,
        }
    }
}

impl ForecastSettings {
    /// The configured key, unless it is empty or the example placeholder
    pub fn api_key(&self) -> Option<&str> {
        configured(self.api_key.as_deref()).filter(|k| *k != API_KEY_PLACEHOLDER)
    }

    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_secs)
    }
}

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct UnitSettings {
    /// Used when no preference has been persisted yet
    #[serde(rename = "default")]
    pub initial: UnitSystem,
}

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct PreferenceSettings {
    pub path: Option<PathBuf>,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct HttpSettings {
    pub timeout_secs: u64,
}

impl Default for HttpSettings {
    fn default() -> Self {
        Self { timeout_secs: 10 }
    }
}

impl HttpSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl DashboardConfig {
    /// Reject periods that would stall the pollers or fail every request
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.station.interval_secs == 0 {
            anyhow::bail!("station.interval_secs must be greater than zero");
        }
        if self.forecast.interval_secs == 0 {
            anyhow::bail!("forecast.interval_secs must be greater than zero");
        }
        if self.http.timeout_secs == 0 {
            anyhow::bail!("http.timeout_secs must be greater than zero");
        }
        Ok(())
    }
}

/// Trimmed, non-empty value
pub fn configured(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// Load `config/dashboard.toml` (optional) overridden by `PWS__SECTION__KEY`
/// environment variables.
pub fn load_dashboard_config() -> anyhow::Result<DashboardConfig> {
    let settings = config::Config::builder()
        .add_source(config::File::with_name("config/dashboard").required(false))
        .add_source(
            config::Environment::with_prefix("PWS")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    let config: DashboardConfig = settings.try_deserialize()?;
    config.validate()?;
    Ok(config)
}
