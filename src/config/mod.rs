/// Admin access configuration from environment variables
pub mod admins;
/// Festival defaults and refresh tuning from config.toml
pub mod app;
/// Database configuration and connection management
pub mod database;

pub use admins::AdminConfig;
pub use app::{AppConfig, FestivalDefaults, RefreshConfig};
