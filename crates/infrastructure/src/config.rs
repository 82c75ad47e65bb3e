use config::{Config, ConfigError, Environment, File};
use domain::sensor::SensorType;
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct DatabaseConfig {
    #[serde(default = "default_database_url")]
    pub url: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    #[serde(default = "default_acquire_timeout")]
    pub acquire_timeout_secs: u64,
    /// Catalog entries guaranteed to exist after startup
    #[serde(default = "default_sensor_types")]
    pub sensor_types: Vec<SensorType>,
}

fn default_database_url() -> String {
    "sqlite://buddy.sqlite".to_string()
}
fn default_max_connections() -> u32 {
    1 // SQLite is single-writer
}
fn default_acquire_timeout() -> u64 {
    5
}
fn default_sensor_types() -> Vec<SensorType> {
    vec![
        SensorType::new("brightness", "lux"),
        SensorType::new("humidity", "%"),
        SensorType::new("moisture", "%"),
        SensorType::new("temperature", "°C"),
    ]
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: default_database_url(),
            max_connections: default_max_connections(),
            acquire_timeout_secs: default_acquire_timeout(),
            sensor_types: default_sensor_types(),
        }
    }
}

impl DatabaseConfig {
    /// Private in-memory database, gone once the pool closes.
    pub fn in_memory() -> Self {
        Self {
            url: "sqlite::memory:".to_string(),
            ..Default::default()
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct AppConfig {
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default)]
    pub database: DatabaseConfig,
}

fn default_port() -> u16 {
    3333
}

impl AppConfig {
    pub fn load(config_dir: &str) -> Result<Self, ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let s = Config::builder()
            // Shared settings, e.g. config/default.toml
            .add_source(File::with_name(&format!("{}/default", config_dir)).required(false))
            // Per environment overrides, e.g. config/production.toml
            .add_source(File::with_name(&format!("{}/{}", config_dir, run_mode)).required(false))
            // Environment variables (e.g. PLANTBUDDY__DATABASE__URL=sqlite://other.sqlite)
            .add_source(Environment::with_prefix("PLANTBUDDY").separator("__"))
            .build()?;

        s.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_without_files() {
        let config = AppConfig::load("does/not/exist").unwrap();
        assert_eq!(config.port, 3333);
        assert_eq!(config.database.max_connections, 1);
        assert_eq!(config.database.sensor_types.len(), 4);
    }

    #[test]
    fn test_in_memory_keeps_catalog() {
        let config = DatabaseConfig::in_memory();
        assert_eq!(config.url, "sqlite::memory:");
        assert!(config.sensor_types.iter().any(|t| t.name == "moisture"));
    }

    #[test]
    fn test_partial_database_section() {
        let config: AppConfig =
            serde_json::from_str(r#"{"database":{"url":"sqlite://other.sqlite"}}"#).unwrap();
        assert_eq!(config.port, 3333);
        assert_eq!(config.database.url, "sqlite://other.sqlite");
        assert_eq!(config.database.acquire_timeout_secs, 5);
    }
}
