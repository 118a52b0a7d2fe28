// HTTP request handlers
use crate::domain::dashboard::{CurrentConditions, ForecastReport};
use crate::domain::status::ConnectionStatus;
use crate::domain::units::{DisplayUnits, UnitSystem};
use crate::presentation::app_state::AppState;
use axum::{Json, extract::State};
use serde::Deserialize;
use std::sync::Arc;

#[derive(Debug, Deserialize)]
pub struct UnitsRequest {
    pub system: UnitSystem,
}

/// Health check endpoint
pub async fn health_check() -> &'static str {
    "ok"
}

/// Latest reading converted to the active units, with derived insights
pub async fn current(State(state): State<Arc<AppState>>) -> Json<CurrentConditions> {
    Json(state.dashboard.current().await)
}

pub async fn forecast(State(state): State<Arc<AppState>>) -> Json<ForecastReport> {
    Json(state.dashboard.forecast().await)
}

pub async fn status(State(state): State<Arc<AppState>>) -> Json<ConnectionStatus> {
    Json(state.dashboard.status().await)
}

pub async fn get_units(State(state): State<Arc<AppState>>) -> Json<DisplayUnits> {
    Json(state.dashboard.units().await)
}

pub async fn put_units(
    State(state): State<Arc<AppState>>,
    Json(request): Json<UnitsRequest>,
) -> Json<DisplayUnits> {
    Json(state.dashboard.set_units(request.system).await)
}

pub async fn toggle_units(State(state): State<Arc<AppState>>) -> Json<DisplayUnits> {
    Json(state.dashboard.toggle_units().await)
}

/// Run both fetch cycles now and return the fresh current conditions
pub async fn refresh(State(state): State<Arc<AppState>>) -> Json<CurrentConditions> {
    state.dashboard.refresh_all().await;
    Json(state.dashboard.current().await)
}
