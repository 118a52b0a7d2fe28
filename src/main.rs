// Main entry point - Dependency injection and server setup
mod domain;
mod application;
mod infrastructure;
mod presentation;

use std::{net::SocketAddr, sync::Arc};
use anyhow::Context;
use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{compression::CompressionLayer, trace::TraceLayer};
use tracing_subscriber::EnvFilter;

use crate::application::dashboard_service::DashboardService;
use crate::application::fallback::{DemoForecastFeed, DemoStationFeed};
use crate::application::feeds::{ForecastFeed, StationFeed};
use crate::application::poller::{spawn_pollers, PollIntervals};
use crate::application::preferences::{MemoryPreferenceStore, PreferenceStore};
use crate::infrastructure::config::{load_dashboard_config, DashboardConfig, StationKind};
use crate::infrastructure::forecast_client::OpenWeatherMapClient;
use crate::infrastructure::http_client::build_client;
use crate::infrastructure::preference_file::FilePreferenceStore;
use crate::infrastructure::station_client::{AmbientStationClient, LocalStationClient};
use crate::presentation::app_state::AppState;
use crate::presentation::handlers::{
    current, forecast, get_units, health_check, put_units, refresh, status, toggle_units,
};

fn build_feeds(
    config: &DashboardConfig,
) -> anyhow::Result<(Arc<dyn StationFeed>, Arc<dyn ForecastFeed>)> {
    if config.demo {
        tracing::info!("Demo mode: serving synthetic data only");
        return Ok((Arc::new(DemoStationFeed), Arc::new(DemoForecastFeed)));
    }

    let client = build_client(config.http.timeout()).context("Failed to build HTTP client")?;

    let station: Arc<dyn StationFeed> = match config.station.kind {
        StationKind::Local => {
            tracing::info!("Station feed: {}", config.station.endpoint);
            Arc::new(LocalStationClient::new(
                client.clone(),
                config.station.endpoint.clone(),
            ))
        }
        StationKind::Ambient => {
            tracing::info!("Station feed: Ambient Weather at {}", config.station.base_url);
            Arc::new(AmbientStationClient::new(
                client.clone(),
                config.station.base_url.clone(),
                config.station.api_key.clone(),
                config.station.application_key.clone(),
            ))
        }
    };

    if config.forecast.api_key().is_none() {
        tracing::warn!("No forecast API key configured; the forecast will use demo data");
    }
    let forecast: Arc<dyn ForecastFeed> = Arc::new(OpenWeatherMapClient::new(
        client,
        config.forecast.base_url.clone(),
        config.forecast.api_key().map(str::to_string),
        config.forecast.latitude,
        config.forecast.longitude,
    ));

    Ok((station, forecast))
}

fn build_preferences(config: &DashboardConfig) -> Arc<dyn PreferenceStore> {
    match &config.preferences.path {
        Some(path) => {
            tracing::info!("Unit preference file: {}", path.display());
            Arc::new(FilePreferenceStore::new(path.clone()))
        }
        None => Arc::new(MemoryPreferenceStore::new()),
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("pws_dashboard=info,tower_http=info")),
        )
        .init();

    // Load configuration
    let config = load_dashboard_config().context("Failed to load configuration")?;

    // Create feeds and preference store (infrastructure layer)
    let (station, forecast_feed) = build_feeds(&config)?;
    let preferences = build_preferences(&config);

    // Create service and start polling (application layer)
    let dashboard = DashboardService::new(station, forecast_feed, preferences, config.units.initial);
    let _pollers = spawn_pollers(
        dashboard.clone(),
        PollIntervals {
            current: config.station.interval(),
            forecast: config.forecast.interval(),
        },
    );

    let state = Arc::new(AppState { dashboard });

    // Build router (presentation layer)
    let router = Router::new()
        .route("/healthz", get(health_check))
        .route("/api/current", get(current))
        .route("/api/forecast", get(forecast))
        .route("/api/status", get(status))
        .route("/api/units", get(get_units).put(put_units))
        .route("/api/units/toggle", post(toggle_units))
        .route("/api/refresh", post(refresh))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    // Start server
    let addr: SocketAddr = config
        .server
        .bind
        .parse()
        .with_context(|| format!("Invalid bind address {}", config.server.bind))?;
    tracing::info!("Starting pws-dashboard on {}", addr);

    axum::serve(tokio::net::TcpListener::bind(addr).await?, router).await?;

    Ok(())
}
