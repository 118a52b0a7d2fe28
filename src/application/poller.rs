// Independent repeating timers driving the two fetch cycles
use crate::application::dashboard_service::DashboardService;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::{MissedTickBehavior, interval};

#[derive(Debug, Clone, Copy)]
pub struct PollIntervals {
    pub current: Duration,
    pub forecast: Duration,
}

/// Spawn both pull loops. The first tick fires immediately.
///
/// Every tick spawns its own fetch task, so a slow request never delays the
/// next tick and is never cancelled by it.
pub fn spawn_pollers(service: DashboardService, intervals: PollIntervals) -> Vec<JoinHandle<()>> {
    let current = {
        let service = service.clone();
        spawn_loop("current", intervals.current, move || {
            let service = service.clone();
            tokio::spawn(async move { service.refresh_current().await });
        })
    };

    let forecast = spawn_loop("forecast", intervals.forecast, move || {
        let service = service.clone();
        tokio::spawn(async move { service.refresh_forecast().await });
    });

    vec![current, forecast]
}

fn spawn_loop<F>(name: &'static str, period: Duration, mut on_tick: F) -> JoinHandle<()>
where
    F: FnMut() + Send + 'static,
{
    tokio::spawn(async move {
        tracing::info!("Starting {} poller every {:?}", name, period);
        let mut ticker = interval(period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        loop {
            ticker.tick().await;
            tracing::debug!("{} poller tick", name);
            on_tick();
        }
    })
}
