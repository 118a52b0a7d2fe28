// Application layer - Fetch cycles, normalization and use cases
pub mod dashboard_service;
pub mod fallback;
pub mod feeds;
pub mod forecast_reducer;
pub mod normalizer;
pub mod poller;
pub mod preferences;
