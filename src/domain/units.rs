// Unit preference and station-native unit conversions
use serde::{Deserialize, Serialize};

/// Display unit system chosen by the user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnitSystem {
    #[default]
    Metric,
    Imperial,
}

impl UnitSystem {
    pub fn toggled(self) -> Self {
        match self {
            UnitSystem::Metric => UnitSystem::Imperial,
            UnitSystem::Imperial => UnitSystem::Metric,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            UnitSystem::Metric => "metric",
            UnitSystem::Imperial => "imperial",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TemperatureUnit {
    #[serde(rename = "C")]
    Celsius,
    #[serde(rename = "F")]
    Fahrenheit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum WindUnit {
    #[serde(rename = "kmh")]
    KilometersPerHour,
    #[serde(rename = "ms")]
    MetersPerSecond,
    #[serde(rename = "mph")]
    MilesPerHour,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PressureUnit {
    #[serde(rename = "hPa")]
    Hectopascal,
    #[serde(rename = "mb")]
    Millibar,
    #[serde(rename = "inHg")]
    InchesOfMercury,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RainUnit {
    #[serde(rename = "mm")]
    Millimeters,
    #[serde(rename = "in")]
    Inches,
}

impl TemperatureUnit {
    pub fn label(self) -> &'static str {
        match self {
            TemperatureUnit::Celsius => "°C",
            TemperatureUnit::Fahrenheit => "°F",
        }
    }
}

impl WindUnit {
    pub fn label(self) -> &'static str {
        match self {
            WindUnit::KilometersPerHour => "km/h",
            WindUnit::MetersPerSecond => "m/s",
            WindUnit::MilesPerHour => "mph",
        }
    }
}

impl PressureUnit {
    pub fn label(self) -> &'static str {
        match self {
            PressureUnit::Hectopascal => "hPa",
            PressureUnit::Millibar => "mb",
            PressureUnit::InchesOfMercury => "inHg",
        }
    }

    /// Decimal places used when formatting a pressure in this unit
    pub fn precision(self) -> u32 {
        match self {
            PressureUnit::InchesOfMercury => 2,
            PressureUnit::Hectopascal | PressureUnit::Millibar => 1,
        }
    }
}

impl RainUnit {
    pub fn label(self) -> &'static str {
        match self {
            RainUnit::Millimeters => "mm",
            RainUnit::Inches => "in",
        }
    }
}

/// The four display units derived from a [`UnitSystem`].
///
/// Only constructible through [`DisplayUnits::for_system`], so the derived
/// units can never disagree with the system they came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DisplayUnits {
    system: UnitSystem,
    temperature: TemperatureUnit,
    wind: WindUnit,
    pressure: PressureUnit,
    rain: RainUnit,
}

impl DisplayUnits {
    pub fn for_system(system: UnitSystem) -> Self {
        match system {
            UnitSystem::Metric => Self {
                system,
                temperature: TemperatureUnit::Celsius,
                wind: WindUnit::KilometersPerHour,
                pressure: PressureUnit::Hectopascal,
                rain: RainUnit::Millimeters,
            },
            UnitSystem::Imperial => Self {
                system,
                temperature: TemperatureUnit::Fahrenheit,
                wind: WindUnit::MilesPerHour,
                pressure: PressureUnit::InchesOfMercury,
                rain: RainUnit::Inches,
            },
        }
    }

    pub fn system(&self) -> UnitSystem {
        self.system
    }

    pub fn temperature(&self) -> TemperatureUnit {
        self.temperature
    }

    pub fn wind(&self) -> WindUnit {
        self.wind
    }

    pub fn pressure(&self) -> PressureUnit {
        self.pressure
    }

    pub fn rain(&self) -> RainUnit {
        self.rain
    }
}

impl Default for DisplayUnits {
    fn default() -> Self {
        Self::for_system(UnitSystem::default())
    }
}

const KMH_PER_MPH: f64 = 1.60934;
const MS_PER_MPH: f64 = 0.44704;
const HPA_PER_INHG: f64 = 33.8639;
const MM_PER_INCH: f64 = 25.4;

/// Round to a fixed number of decimal places
pub fn round_to(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    (value * factor).round() / factor
}

pub fn fahrenheit_to_celsius(fahrenheit: f64) -> f64 {
    (fahrenheit - 32.0) * 5.0 / 9.0
}

pub fn celsius_to_fahrenheit(celsius: f64) -> f64 {
    celsius * 9.0 / 5.0 + 32.0
}

/// Convert a station temperature (°F) to the display unit, 1 decimal
pub fn temperature(fahrenheit: f64, unit: TemperatureUnit) -> f64 {
    let value = match unit {
        TemperatureUnit::Celsius => fahrenheit_to_celsius(fahrenheit),
        TemperatureUnit::Fahrenheit => fahrenheit,
    };
    round_to(value, 1)
}

/// Convert a Celsius-source temperature (forecast data) to the display unit, 1 decimal
pub fn temperature_from_celsius(celsius: f64, unit: TemperatureUnit) -> f64 {
    let value = match unit {
        TemperatureUnit::Celsius => celsius,
        TemperatureUnit::Fahrenheit => celsius_to_fahrenheit(celsius),
    };
    round_to(value, 1)
}

/// Convert a station wind speed (mph) to the display unit, 1 decimal
pub fn wind_speed(mph: f64, unit: WindUnit) -> f64 {
    let value = match unit {
        WindUnit::KilometersPerHour => mph * KMH_PER_MPH,
        WindUnit::MetersPerSecond => mph * MS_PER_MPH,
        WindUnit::MilesPerHour => mph,
    };
    round_to(value, 1)
}

/// Convert a station pressure (inHg) to the display unit
pub fn pressure(in_hg: f64, unit: PressureUnit) -> f64 {
    let value = match unit {
        PressureUnit::Hectopascal | PressureUnit::Millibar => in_hg * HPA_PER_INHG,
        PressureUnit::InchesOfMercury => in_hg,
    };
    round_to(value, unit.precision())
}

/// Convert a station rain depth (inches) to the display unit, 1 decimal
pub fn rain(inches: f64, unit: RainUnit) -> f64 {
    let value = match unit {
        RainUnit::Millimeters => inches * MM_PER_INCH,
        RainUnit::Inches => inches,
    };
    round_to(value, 1)
}

/// Inverse helpers used to express synthetic metric values in station-native units
pub mod native {
    use super::{HPA_PER_INHG, KMH_PER_MPH, MM_PER_INCH};

    pub fn kmh_to_mph(kmh: f64) -> f64 {
        kmh / KMH_PER_MPH
    }

    pub fn hpa_to_in_hg(hpa: f64) -> f64 {
        hpa / HPA_PER_INHG
    }

    pub fn mm_to_inches(mm: f64) -> f64 {
        mm / MM_PER_INCH
    }
}
