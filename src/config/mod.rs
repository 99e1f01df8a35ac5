/// Database configuration and connection management
pub mod database;

/// Trip configuration loading from config.toml
pub mod trip;

pub use trip::{AppConfig, load_app_configuration};
