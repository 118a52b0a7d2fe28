// Domain layer - Units, readings, forecasts and derived classifications
pub mod dashboard;
pub mod forecast;
pub mod insights;
pub mod reading;
pub mod status;
pub mod units;
