use anyhow::{Context, Result};
use serde::Deserialize;

/// Application configuration, layered from built-in defaults, an optional
/// TOML file, and `TEE_TIME_GRID_*` environment variables.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Base URL of the aggregation server.
    pub base_url: String,
    /// SQLite database holding saved preferences.
    pub db_path: String,
    /// Log destination; stdout belongs to the terminal UI.
    pub log_file: String,
    pub request_timeout_seconds: u64,
    /// Offset in days from today for the initial date range.
    pub days_ahead: i64,
}

impl AppConfig {
    pub fn load(file: Option<&str>) -> Result<Self> {
        let config = config::Config::builder()
            .set_default("base_url", "http://127.0.0.1:10000")?
            .set_default("db_path", "tee-time-grid.db")?
            .set_default("log_file", "tee-time-grid.log")?
            .set_default("request_timeout_seconds", 25_i64)?
            .set_default("days_ahead", 1_i64)?
            .add_source(config::File::with_name(file.unwrap_or("tee-time-grid")).required(false))
            .add_source(config::Environment::with_prefix("TEE_TIME_GRID"))
            .build()?;

        config
            .try_deserialize()
            .context("Invalid configuration")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_load_without_a_file() {
        let config = AppConfig::load(None).unwrap();

        assert_eq!(config.base_url, "http://127.0.0.1:10000");
        assert_eq!(config.request_timeout_seconds, 25);
        assert_eq!(config.days_ahead, 1);
    }
}
