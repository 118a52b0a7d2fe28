// Infrastructure layer - External dependencies and adapters
pub mod config;
pub mod forecast_client;
pub mod http_client;
pub mod preference_file;
pub mod station_client;
