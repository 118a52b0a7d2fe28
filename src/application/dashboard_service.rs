// Dashboard service - Fetch cycles, held data and unit preference
use crate::application::fallback::{DemoForecastFeed, DemoStationFeed};
use crate::application::feeds::{FetchError, ForecastFeed, StationFeed};
use crate::application::normalizer::normalize;
use crate::application::preferences::{PreferenceStore, initial_preference};
use crate::domain::dashboard::{CurrentConditions, ForecastReport, UnitsView};
use crate::domain::forecast::{ForecastEntry, ForecastView};
use crate::domain::insights::Insights;
use crate::domain::reading::RawStationReading;
use crate::domain::status::ConnectionStatus;
use crate::domain::units::{DisplayUnits, UnitSystem};
use chrono::Local;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Everything the renderer reads. Raw station values are kept so a unit
/// change can re-derive the canonical reading.
#[derive(Debug, Default)]
struct DashboardState {
    raw: Option<RawStationReading>,
    forecast: Vec<ForecastEntry>,
    status: ConnectionStatus,
    system: UnitSystem,
}

#[derive(Clone)]
pub struct DashboardService {
    station: Arc<dyn StationFeed>,
    forecast: Arc<dyn ForecastFeed>,
    station_fallback: Arc<dyn StationFeed>,
    forecast_fallback: Arc<dyn ForecastFeed>,
    preferences: Arc<dyn PreferenceStore>,
    state: Arc<RwLock<DashboardState>>,
}

impl DashboardService {
    pub fn new(
        station: Arc<dyn StationFeed>,
        forecast: Arc<dyn ForecastFeed>,
        preferences: Arc<dyn PreferenceStore>,
        default_system: UnitSystem,
    ) -> Self {
        let system = initial_preference(preferences.as_ref(), default_system);
        tracing::info!("Display units: {}", system.as_str());

        Self {
            station,
            forecast,
            station_fallback: Arc::new(DemoStationFeed),
            forecast_fallback: Arc::new(DemoForecastFeed),
            preferences,
            state: Arc::new(RwLock::new(DashboardState {
                system,
                ..Default::default()
            })),
        }
    }

    /// Replace the synthetic feeds used when a live fetch fails
    pub fn with_fallback(
        mut self,
        station: Arc<dyn StationFeed>,
        forecast: Arc<dyn ForecastFeed>,
    ) -> Self {
        self.station_fallback = station;
        self.forecast_fallback = forecast;
        self
    }

    /// One current-conditions cycle: live fetch, else synthetic reading.
    /// The held reading is replaced wholesale; the last cycle to finish wins.
    pub async fn refresh_current(&self) {
        self.state.write().await.status = ConnectionStatus::connecting();

        let (raw, status) = match self.fetch_station().await {
            Ok(raw) => {
                tracing::info!("Fetched current conditions");
                (raw, ConnectionStatus::connected())
            }
            Err(e) => {
                tracing::warn!("Current conditions fetch failed, using demo data: {}", e);
                match self.station_fallback.latest().await {
                    Ok(raw) => (raw, ConnectionStatus::error()),
                    Err(e) => {
                        tracing::error!("Fallback reading unavailable: {}", e);
                        self.state.write().await.status = ConnectionStatus::error();
                        return;
                    }
                }
            }
        };

        let mut state = self.state.write().await;
        state.raw = Some(raw);
        state.status = status;
    }

    /// One forecast cycle: live fetch, else synthetic forecast
    pub async fn refresh_forecast(&self) {
        let entries = match self.forecast.daily().await {
            Ok(entries) => {
                tracing::info!("Fetched forecast ({} days)", entries.len());
                entries
            }
            Err(e) => {
                tracing::warn!("Forecast fetch failed, using demo forecast: {}", e);
                match self.forecast_fallback.daily().await {
                    Ok(entries) => entries,
                    Err(e) => {
                        tracing::error!("Fallback forecast unavailable: {}", e);
                        return;
                    }
                }
            }
        };

        self.state.write().await.forecast = entries;
    }

    /// Run both cycles now
    pub async fn refresh_all(&self) {
        tokio::join!(self.refresh_current(), self.refresh_forecast());
    }

    async fn fetch_station(&self) -> Result<RawStationReading, FetchError> {
        let raw = self.station.latest().await?;
        if raw.has_sensor_payload() {
            Ok(raw)
        } else {
            Err(FetchError::Payload("reading has no sensor values".to_string()))
        }
    }

    pub async fn current(&self) -> CurrentConditions {
        let state = self.state.read().await;
        let units = DisplayUnits::for_system(state.system);
        let reading = normalize(state.raw.as_ref(), &units);
        let insights = reading.as_ref().map(|r| Insights::from_reading(r, &Local));

        CurrentConditions {
            status: state.status.clone(),
            units: UnitsView::new(units),
            reading,
            insights,
        }
    }

    pub async fn forecast(&self) -> ForecastReport {
        let state = self.state.read().await;
        let units = DisplayUnits::for_system(state.system);

        ForecastReport {
            units: UnitsView::new(units),
            days: state
                .forecast
                .iter()
                .map(|entry| ForecastView::from_entry(entry, &units))
                .collect(),
        }
    }

    pub async fn status(&self) -> ConnectionStatus {
        self.state.read().await.status.clone()
    }

    pub async fn units(&self) -> DisplayUnits {
        DisplayUnits::for_system(self.state.read().await.system)
    }

    /// Switch the display system and persist it. Held data is re-derived on
    /// the next read; nothing is fetched.
    pub async fn set_units(&self, system: UnitSystem) -> DisplayUnits {
        self.state.write().await.system = system;
        self.persist_units(system).await;
        DisplayUnits::for_system(system)
    }

    pub async fn toggle_units(&self) -> DisplayUnits {
        let next = {
            let mut state = self.state.write().await;
            state.system = state.system.toggled();
            state.system
        };

        self.persist_units(next).await;
        DisplayUnits::for_system(next)
    }

    /// Stores may touch the filesystem, so saves run on the blocking pool
    async fn persist_units(&self, system: UnitSystem) {
        let preferences = self.preferences.clone();
        match tokio::task::spawn_blocking(move || preferences.save(system)).await {
            Ok(Ok(())) => {}
            Ok(Err(e)) => tracing::error!("Failed to persist unit preference: {:#}", e),
            Err(e) => tracing::error!("Unit preference save task failed: {}", e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::preferences::MemoryPreferenceStore;
    use crate::domain::status::ConnectionState;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct FixedStation {
        reading: RawStationReading,
        calls: AtomicUsize,
    }

    impl FixedStation {
        fn new(reading: RawStationReading) -> Self {
            Self {
                reading,
                calls: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl StationFeed for FixedStation {
        async fn latest(&self) -> Result<RawStationReading, FetchError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.reading.clone())
        }
    }

    /// Records which thread each save ran on
    #[derive(Default)]
    struct ThreadRecordingStore {
        save_threads: std::sync::Mutex<Vec<std::thread::ThreadId>>,
    }

    impl PreferenceStore for ThreadRecordingStore {
        fn load(&self) -> anyhow::Result<Option<UnitSystem>> {
            Ok(None)
        }

        fn save(&self, _system: UnitSystem) -> anyhow::Result<()> {
            self.save_threads
                .lock()
                .unwrap()
                .push(std::thread::current().id());
            Ok(())
        }
    }

    struct DownStation;

    #[async_trait]
    impl StationFeed for DownStation {
        async fn latest(&self) -> Result<RawStationReading, FetchError> {
            Err(FetchError::Status(503))
        }
    }

    struct DownForecast;

    #[async_trait]
    impl ForecastFeed for DownForecast {
        async fn daily(&self) -> Result<Vec<ForecastEntry>, FetchError> {
            Err(FetchError::MissingApiKey)
        }
    }

    fn station_reading() -> RawStationReading {
        RawStationReading {
            temp_f: Some(77.0),
            humidity: Some(40.0),
            hourly_rain_in: Some(0.0),
            barom_rel_in: Some(29.92),
            barom_abs_in: Some(29.92),
            ..Default::default()
        }
    }

    fn service(station: Arc<dyn StationFeed>, forecast: Arc<dyn ForecastFeed>) -> DashboardService {
        DashboardService::new(
            station,
            forecast,
            Arc::new(MemoryPreferenceStore::new()),
            UnitSystem::Metric,
        )
    }

    #[tokio::test]
    async fn test_before_first_cycle() {
        let service = service(Arc::new(DownStation), Arc::new(DownForecast));
        let current = service.current().await;
        assert_eq!(current.status.state, ConnectionState::Connecting);
        assert!(current.reading.is_none());
        assert!(current.insights.is_none());
        assert!(service.forecast().await.days.is_empty());
    }

    #[tokio::test]
    async fn test_live_reading_connected() {
        let service = service(
            Arc::new(FixedStation::new(station_reading())),
            Arc::new(DownForecast),
        );
        service.refresh_current().await;

        let current = service.current().await;
        assert_eq!(current.status, ConnectionStatus::connected());
        let reading = current.reading.unwrap();
        assert_eq!(reading.temperature, Some(25.0));
        assert_eq!(reading.pressure, Some(1013.2));
        let insights = current.insights.unwrap();
        assert_eq!(
            insights.description,
            Some(crate::domain::insights::WeatherSummary::Pleasant)
        );
    }

    #[tokio::test]
    async fn test_failed_fetch_uses_complete_fallback() {
        let service = service(Arc::new(DownStation), Arc::new(DownForecast));
        service.refresh_current().await;

        let current = service.current().await;
        assert_eq!(current.status, ConnectionStatus::error());
        assert!(current.reading.unwrap().is_complete());
    }

    #[tokio::test]
    async fn test_reading_without_sensors_falls_back() {
        let service = service(
            Arc::new(FixedStation::new(RawStationReading::default())),
            Arc::new(DownForecast),
        );
        service.refresh_current().await;

        let current = service.current().await;
        assert_eq!(current.status.state, ConnectionState::Error);
        assert!(current.reading.unwrap().is_complete());
    }

    #[tokio::test]
    async fn test_forecast_fallback_keeps_status() {
        let service = service(
            Arc::new(FixedStation::new(station_reading())),
            Arc::new(DownForecast),
        );
        service.refresh_all().await;

        assert_eq!(service.status().await, ConnectionStatus::connected());
        assert_eq!(service.forecast().await.days.len(), 5);
    }

    #[tokio::test]
    async fn test_toggle_rederives_without_fetch() {
        let station = Arc::new(FixedStation::new(station_reading()));
        let store = Arc::new(MemoryPreferenceStore::new());
        let service = DashboardService::new(
            station.clone(),
            Arc::new(DownForecast),
            store.clone(),
            UnitSystem::Metric,
        );
        service.refresh_current().await;
        let before = service.current().await;

        let units = service.toggle_units().await;
        assert_eq!(units.system(), UnitSystem::Imperial);
        assert_eq!(store.load().unwrap(), Some(UnitSystem::Imperial));
        let imperial = service.current().await;
        assert_eq!(imperial.reading.unwrap().temperature, Some(77.0));

        let units = service.toggle_units().await;
        assert_eq!(units, DisplayUnits::for_system(UnitSystem::Metric));
        assert_eq!(store.load().unwrap(), Some(UnitSystem::Metric));
        assert_eq!(service.current().await, before);

        assert_eq!(station.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_set_units_and_startup_preference() {
        let store = Arc::new(MemoryPreferenceStore::new());
        store.save(UnitSystem::Imperial).unwrap();

        let service = DashboardService::new(
            Arc::new(DownStation),
            Arc::new(DownForecast),
            store.clone(),
            UnitSystem::Metric,
        );
        assert_eq!(service.units().await.system(), UnitSystem::Imperial);

        service.set_units(UnitSystem::Metric).await;
        assert_eq!(service.units().await.system(), UnitSystem::Metric);
        assert_eq!(store.load().unwrap(), Some(UnitSystem::Metric));
    }

    #[tokio::test]
    async fn test_forecast_view_follows_units() {
        let service = service(
            Arc::new(DownStation),
            Arc::new(DownForecast),
        )
        .with_fallback(Arc::new(DownStation), Arc::new(DemoForecastFeed));
        service.refresh_forecast().await;

        let metric = service.forecast().await;
        service.toggle_units().await;
        let imperial = service.forecast().await;

        assert_eq!(metric.days.len(), imperial.days.len());
        for (c, f) in metric.days.iter().zip(&imperial.days) {
            assert!(f.temp > c.temp);
            assert_eq!(c.date, f.date);
        }
    }

    #[tokio::test]
    async fn test_failed_fallback_keeps_previous_reading() {
        let service = service(Arc::new(DownStation), Arc::new(DownForecast))
            .with_fallback(Arc::new(DownStation), Arc::new(DownForecast));
        service.refresh_current().await;
        service.refresh_forecast().await;

        let current = service.current().await;
        assert_eq!(current.status.state, ConnectionState::Error);
        assert!(current.reading.is_none());
        assert!(service.forecast().await.days.is_empty());
    }

    #[tokio::test]
    async fn test_unit_saves_run_off_the_runtime_thread() {
        let store = Arc::new(ThreadRecordingStore::default());
        let service = DashboardService::new(
            Arc::new(DownStation),
            Arc::new(DownForecast),
            store.clone(),
            UnitSystem::Metric,
        );

        service.toggle_units().await;
        service.set_units(UnitSystem::Metric).await;

        let runtime_thread = std::thread::current().id();
        let threads = store.save_threads.lock().unwrap();
        assert_eq!(threads.len(), 2);
        assert!(threads.iter().all(|id| *id != runtime_thread));
    }
}
