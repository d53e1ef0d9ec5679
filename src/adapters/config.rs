pub mod app_config;
pub mod auth_config;
pub mod server_config;
pub mod sheets_config;
pub mod telemetry_config;
