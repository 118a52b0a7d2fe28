// Presentation layer - HTTP interface consumed by the renderer
pub mod app_state;
pub mod handlers;
