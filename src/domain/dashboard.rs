// Dashboard payloads consumed by the renderer
use super::forecast::ForecastView;
use super::insights::Insights;
use super::reading::CanonicalReading;
use super::status::ConnectionStatus;
use super::units::DisplayUnits;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UnitLabels {
    pub temperature: &'static str,
    pub wind: &'static str,
    pub pressure: &'static str,
    pub rain: &'static str,
}

/// Unit codes and their display labels for the active preference
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UnitsView {
    #[serde(flatten)]
    pub units: DisplayUnits,
    pub labels: UnitLabels,
}

impl UnitsView {
    pub fn new(units: DisplayUnits) -> Self {
        Self {
            units,
            labels: UnitLabels {
                temperature: units.temperature().label(),
                wind: units.wind().label(),
                pressure: units.pressure().label(),
                rain: units.rain().label(),
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CurrentConditions {
    pub status: ConnectionStatus,
    pub units: UnitsView,
    pub reading: Option<CanonicalReading>,
    pub insights: Option<Insights>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ForecastReport {
    pub units: UnitsView,
    pub days: Vec<ForecastView>,
}
